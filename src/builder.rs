//! Proxy deployment transaction builder.
//!
//! Turns (factory, master copy, initializer, salt nonce) into an unsigned
//! `createProxyWithNonce` transaction plus the address the proxy will land at.
//!
//! Queries, in order:
//! 1. `eth_call` of the deployment itself, whose return value is the proxy address
//! 2. `eth_estimateGas`, unless a gas override is given
//! 3. `eth_getTransactionCount` of the sender, unless a nonce override is given
//!
//! The address comes from the factory itself rather than a local CREATE2
//! computation, so it always matches the deployed factory's logic.
//! See [`crate::create2`] for an offline cross-check.

use alloy_primitives::{Address, Bytes, U256};
use tracing::debug;

use crate::chain::{decode_address_word, ChainClient};
use crate::constants::CREATE2_GAS_BUFFER;
use crate::contracts::create_proxy_with_nonce_calldata;
use crate::errors::ChainClientError;
use crate::types::{CallRequest, DeployedProxyPlan, TransactionParameters, TxOverrides};

/// Inputs of a `createProxyWithNonce` deployment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProxyDeployment {
    /// Factory that performs the CREATE2
    pub proxy_factory: Address,
    /// Singleton the proxy delegates to
    pub master_copy: Address,
    /// Call data executed on the fresh proxy
    pub initializer: Bytes,
    /// CREATE2 salt nonce (not the transaction nonce)
    pub salt_nonce: U256,
    /// Account sending the deployment
    pub sender: Address,
}

impl ProxyDeployment {
    /// Call data of the factory call.
    pub fn calldata(&self) -> Bytes {
        create_proxy_with_nonce_calldata(self.master_copy, &self.initializer, self.salt_nonce)
    }
}

/// Build the deployment transaction and predict the proxy address.
///
/// Overrides are applied verbatim. Without a gas override the estimate is
/// padded by [`CREATE2_GAS_BUFFER`]; without a nonce override the sender's
/// current transaction count is used. Client errors are returned unchanged.
pub fn build_proxy_deployment_tx(
    client: &impl ChainClient,
    deployment: &ProxyDeployment,
    overrides: &TxOverrides,
) -> Result<DeployedProxyPlan, ChainClientError> {
    let mut request = CallRequest {
        from: deployment.sender,
        to: deployment.proxy_factory,
        data: deployment.calldata(),
        gas: None,
        gas_price: None,
    };

    let output = client.call(&request)?;
    let predicted_address =
        decode_address_word(&output).ok_or_else(|| ChainClientError::MalformedResponse {
            method: "eth_call",
            reason: format!(
                "createProxyWithNonce returned {} byte(s), expected an address word",
                output.len()
            ),
        })?;

    request.gas_price = overrides.gas_price;

    let gas = match overrides.gas {
        Some(gas) => gas,
        None => {
            let estimate = client.estimate_gas(&request)?;
            debug!(
                target: "builder",
                estimate,
                buffer = CREATE2_GAS_BUFFER,
                "estimated deployment gas"
            );
            estimate.saturating_add(CREATE2_GAS_BUFFER)
        }
    };

    let nonce = match overrides.nonce {
        Some(nonce) => nonce,
        None => client.get_transaction_count(deployment.sender)?,
    };

    Ok(DeployedProxyPlan {
        transaction: TransactionParameters {
            from: request.from,
            to: request.to,
            data: request.data,
            gas,
            gas_price: request.gas_price,
            nonce,
        },
        predicted_address,
    })
}
