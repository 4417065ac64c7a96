//! `eth_*` JSON-RPC namespace and the HTTP-backed [`ChainClient`].

use std::fmt;
use std::future::Future;
use std::time::Duration;

use alloy_primitives::{Address, Bytes, U128, U256, U64};
use jsonrpsee::core::{ClientError, RpcResult};
use jsonrpsee::http_client::{HttpClient, HttpClientBuilder};
use jsonrpsee::proc_macros::rpc;
use serde::{Deserialize, Serialize};
use tokio::runtime::Runtime;
use tracing::debug;

use super::ChainClient;
use crate::constants::LATEST_BLOCK;
use crate::errors::ChainClientError;
use crate::types::CallRequest;

/// Call object accepted by `eth_call` and `eth_estimateGas`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RpcCallRequest {
    pub from: Address,
    pub to: Address,
    pub data: Bytes,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gas: Option<U64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gas_price: Option<U128>,
}

impl From<&CallRequest> for RpcCallRequest {
    fn from(request: &CallRequest) -> Self {
        Self {
            from: request.from,
            to: request.to,
            data: request.data.clone(),
            gas: request.gas.map(U64::from),
            gas_price: request.gas_price.map(U128::from),
        }
    }
}

/// The subset of the `eth_*` namespace a deployment plan needs.
#[rpc(client, server, namespace = "eth")]
pub trait EthApi {
    /// Returns the balance of the account at the given block.
    #[method(name = "getBalance")]
    async fn get_balance(&self, address: Address, block: String) -> RpcResult<U256>;

    /// Returns the code stored at the given address.
    #[method(name = "getCode")]
    async fn get_code(&self, address: Address, block: String) -> RpcResult<Bytes>;

    /// Returns the number of transactions sent from the address.
    #[method(name = "getTransactionCount")]
    async fn get_transaction_count(&self, address: Address, block: String) -> RpcResult<U64>;

    /// Executes a call without creating a transaction.
    #[method(name = "call")]
    async fn call(&self, request: RpcCallRequest, block: String) -> RpcResult<Bytes>;

    /// Estimates the gas a transaction would use.
    #[method(name = "estimateGas")]
    async fn estimate_gas(&self, request: RpcCallRequest) -> RpcResult<U64>;
}

/// Blocking [`ChainClient`] over JSON-RPC HTTP.
///
/// Owns a current-thread runtime and blocks on every request, so it must not
/// be used from inside another async runtime.
pub struct JsonRpcChainClient {
    url: String,
    client: HttpClient,
    runtime: Runtime,
}

impl JsonRpcChainClient {
    /// Create a client for `url`; every request fails after `request_timeout`.
    pub fn new(url: &str, request_timeout: Duration) -> Result<Self, ChainClientError> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| ChainClientError::Rpc {
                method: "runtime",
                message: e.to_string(),
            })?;

        let client = {
            let _guard = runtime.enter();
            HttpClientBuilder::default()
                .request_timeout(request_timeout)
                .build(url)
                .map_err(|e| ChainClientError::Rpc {
                    method: "connect",
                    message: e.to_string(),
                })?
        };

        Ok(Self {
            url: url.to_string(),
            client,
            runtime,
        })
    }

    /// Endpoint this client talks to.
    pub fn url(&self) -> &str {
        &self.url
    }

    fn request<T>(
        &self,
        method: &'static str,
        fut: impl Future<Output = Result<T, ClientError>>,
    ) -> Result<T, ChainClientError> {
        debug!(target: "chain::rpc", method, url = %self.url, "request");
        self.runtime
            .block_on(fut)
            .map_err(|e| ChainClientError::Rpc {
                method,
                message: e.to_string(),
            })
    }
}

impl fmt::Debug for JsonRpcChainClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JsonRpcChainClient").field("url", &self.url).finish_non_exhaustive()
    }
}

impl ChainClient for JsonRpcChainClient {
    fn get_balance(&self, address: Address) -> Result<U256, ChainClientError> {
        self.request(
            "eth_getBalance",
            EthApiClient::get_balance(&self.client, address, LATEST_BLOCK.to_string()),
        )
    }

    fn get_code(&self, address: Address) -> Result<Bytes, ChainClientError> {
        self.request(
            "eth_getCode",
            EthApiClient::get_code(&self.client, address, LATEST_BLOCK.to_string()),
        )
    }

    fn get_transaction_count(&self, address: Address) -> Result<u64, ChainClientError> {
        let count = self.request(
            "eth_getTransactionCount",
            EthApiClient::get_transaction_count(&self.client, address, LATEST_BLOCK.to_string()),
        )?;
        Ok(count.to::<u64>())
    }

    fn call(&self, request: &CallRequest) -> Result<Bytes, ChainClientError> {
        self.request(
            "eth_call",
            EthApiClient::call(&self.client, request.into(), LATEST_BLOCK.to_string()),
        )
    }

    fn estimate_gas(&self, request: &CallRequest) -> Result<u64, ChainClientError> {
        let gas = self.request(
            "eth_estimateGas",
            EthApiClient::estimate_gas(&self.client, request.into()),
        )?;
        Ok(gas.to::<u64>())
    }
}
