//! Offline Safe proxy address derivation.
//!
//! Matches `ProxyFactory.createProxyWithNonce`:
//! ```text
//! salt      = keccak256(keccak256(initializer) ++ saltNonce)
//! init_code = proxyCreationCode ++ abi.encode(masterCopy)
//! address   = keccak256(0xff ++ factory ++ salt ++ keccak256(init_code))[12..32]
//! ```
//!
//! The planner never relies on this: the simulated factory call is the source
//! of truth. [`verify_predicted_address`] compares the two.

use alloy_primitives::{keccak256, Address, Bytes, B256, U256};
use alloy_sol_types::SolCall;
use tracing::{debug, warn};

use crate::builder::ProxyDeployment;
use crate::chain::{encode_address_word, ChainClient};
use crate::contracts::{proxy_creation_code_calldata, ProxyFactory};
use crate::errors::ChainClientError;
use crate::types::CallRequest;

/// CREATE2 salt the factory derives from the initializer and salt nonce.
pub fn proxy_salt(initializer: &[u8], salt_nonce: U256) -> B256 {
    let mut preimage = [0u8; 64];
    preimage[..32].copy_from_slice(keccak256(initializer).as_slice());
    preimage[32..].copy_from_slice(&salt_nonce.to_be_bytes::<32>());
    keccak256(preimage)
}

/// Address of the proxy the factory would deploy.
///
/// `proxy_creation_code` is the factory's `proxyCreationCode()`.
pub fn compute_proxy_address(
    proxy_factory: Address,
    master_copy: Address,
    initializer: &[u8],
    salt_nonce: U256,
    proxy_creation_code: &[u8],
) -> Address {
    let mut init_code = Vec::with_capacity(proxy_creation_code.len() + 32);
    init_code.extend_from_slice(proxy_creation_code);
    init_code.extend_from_slice(encode_address_word(master_copy).as_slice());

    proxy_factory.create2(proxy_salt(initializer, salt_nonce).0, keccak256(&init_code).0)
}

/// Outcome of an offline address check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AddressCheck {
    /// Address returned by the simulated factory call
    pub predicted: Address,
    /// Address recomputed locally
    pub computed: Address,
}

impl AddressCheck {
    pub fn matches(&self) -> bool {
        self.predicted == self.computed
    }
}

/// Fetch `proxyCreationCode()` from the factory and recompute the proxy address.
pub fn verify_predicted_address(
    client: &impl ChainClient,
    deployment: &ProxyDeployment,
    predicted: Address,
) -> Result<AddressCheck, ChainClientError> {
    let output = client.call(&CallRequest {
        from: deployment.sender,
        to: deployment.proxy_factory,
        data: proxy_creation_code_calldata(),
        gas: None,
        gas_price: None,
    })?;
    let creation_code: Bytes = ProxyFactory::proxyCreationCodeCall::abi_decode_returns(&output)
        .map_err(|e| ChainClientError::MalformedResponse {
            method: "eth_call",
            reason: e.to_string(),
        })?;
    debug!(target: "create2", code_len = creation_code.len(), "fetched proxy creation code");

    let computed = compute_proxy_address(
        deployment.proxy_factory,
        deployment.master_copy,
        &deployment.initializer,
        deployment.salt_nonce,
        &creation_code,
    );
    let check = AddressCheck {
        predicted,
        computed,
    };
    if !check.matches() {
        warn!(
            target: "create2",
            %predicted,
            %computed,
            "simulated and computed proxy addresses differ"
        );
    }
    Ok(check)
}
