use alloy_primitives::{Address, Bytes, U256};
use serde::{Deserialize, Serialize};

/// Optional values that replace what the builder would otherwise query or estimate
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TxOverrides {
    /// Gas limit, used verbatim (no buffer is added)
    pub gas: Option<u64>,
    /// Gas price in wei
    pub gas_price: Option<u128>,
    /// Transaction sequence number of the sender
    pub nonce: Option<u64>,
}

/// A request to deploy a new Safe
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeploymentRequest {
    /// Account that will pay for and send the deployment transaction
    pub sender: Address,
    /// Safe owners, in the order they are passed to `setup`
    pub owners: Vec<Address>,
    /// Number of owner signatures the Safe requires
    pub threshold: u64,
    /// CREATE2 salt nonce; drawn at random when absent
    pub salt_nonce: Option<U256>,
    /// Passed to the builder unchanged
    pub overrides: TxOverrides,
}

impl DeploymentRequest {
    /// Create a request with a random salt nonce and no overrides.
    pub fn new(sender: Address, owners: Vec<Address>, threshold: u64) -> Self {
        Self {
            sender,
            owners,
            threshold,
            salt_nonce: None,
            overrides: TxOverrides::default(),
        }
    }

    /// Use a fixed CREATE2 salt nonce.
    pub fn with_salt_nonce(mut self, salt_nonce: U256) -> Self {
        self.salt_nonce = Some(salt_nonce);
        self
    }

    /// Replace the builder overrides.
    pub fn with_overrides(mut self, overrides: TxOverrides) -> Self {
        self.overrides = overrides;
        self
    }
}

/// Chain state the planner checks before building anything
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChainSnapshot {
    /// Sender balance in wei
    pub sender_balance: U256,
    /// Whether the Safe master copy has code
    pub master_copy_has_code: bool,
    /// Whether the proxy factory has code
    pub proxy_factory_has_code: bool,
}

/// Read-only call or gas-estimation request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallRequest {
    pub from: Address,
    pub to: Address,
    pub data: Bytes,
    pub gas: Option<u64>,
    pub gas_price: Option<u128>,
}

/// Unsigned transaction parameters, ready for an external signer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionParameters {
    pub from: Address,
    pub to: Address,
    pub data: Bytes,
    pub gas: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gas_price: Option<u128>,
    pub nonce: u64,
}

/// Result of planning a deployment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeployedProxyPlan {
    /// The `createProxyWithNonce` transaction
    pub transaction: TransactionParameters,
    /// Address the Safe proxy will be deployed at
    pub predicted_address: Address,
}
