//! Chain access for deployment planning.
//!
//! The planner and builder never talk to a node directly; they receive a
//! [`ChainClient`] so the same code runs against a JSON-RPC endpoint in
//! production and against an in-memory double in tests.
//!
//! ```text
//!   SafeDeploymentPlanner / build_proxy_deployment_tx
//!     → ChainClient
//!       → JsonRpcChainClient  (eth_* over HTTP)
//!       → MockChainClient     (tests)
//! ```

pub mod helpers;
pub mod rpc;

#[cfg(test)]
pub(crate) mod mock;

pub use helpers::{decode_address_word, encode_address_word};
pub use rpc::{EthApiClient, EthApiServer, JsonRpcChainClient, RpcCallRequest};

use alloy_primitives::{Address, Bytes, U256};

use crate::errors::ChainClientError;
use crate::types::CallRequest;

/// Read-only view of an EVM chain.
///
/// Every method is a single blocking round trip. Implementations own their
/// timeout policy and never retry on behalf of the caller.
pub trait ChainClient {
    /// Balance of `address` in wei.
    fn get_balance(&self, address: Address) -> Result<U256, ChainClientError>;

    /// Runtime bytecode at `address`, empty for accounts without code.
    fn get_code(&self, address: Address) -> Result<Bytes, ChainClientError>;

    /// Number of transactions sent from `address`, the next transaction nonce.
    fn get_transaction_count(&self, address: Address) -> Result<u64, ChainClientError>;

    /// Simulate `request` without sending it and return the raw output.
    fn call(&self, request: &CallRequest) -> Result<Bytes, ChainClientError>;

    /// Gas the node expects `request` to use.
    fn estimate_gas(&self, request: &CallRequest) -> Result<u64, ChainClientError>;
}

impl<T: ChainClient + ?Sized> ChainClient for &T {
    fn get_balance(&self, address: Address) -> Result<U256, ChainClientError> {
        (**self).get_balance(address)
    }

    fn get_code(&self, address: Address) -> Result<Bytes, ChainClientError> {
        (**self).get_code(address)
    }

    fn get_transaction_count(&self, address: Address) -> Result<u64, ChainClientError> {
        (**self).get_transaction_count(address)
    }

    fn call(&self, request: &CallRequest) -> Result<Bytes, ChainClientError> {
        (**self).call(request)
    }

    fn estimate_gas(&self, request: &CallRequest) -> Result<u64, ChainClientError> {
        (**self).estimate_gas(request)
    }
}
