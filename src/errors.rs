use alloy_primitives::Address;
use thiserror::Error;

/// Errors raised while planning a Safe deployment
#[derive(Debug, Error)]
pub enum DeploymentError {
    /// Threshold is zero or exceeds the number of distinct owners
    #[error("Threshold {threshold} is invalid for {distinct_owners} distinct owner(s)")]
    InvalidThreshold {
        /// Requested signature threshold
        threshold: u64,
        /// Number of distinct owner addresses supplied
        distinct_owners: usize,
    },

    /// An owner address that `Safe.setup` would reject
    #[error("Owner {owner} cannot be used: {reason}")]
    InvalidOwner {
        /// The rejected owner
        owner: Address,
        /// Why it was rejected
        reason: &'static str,
    },

    /// The sender cannot pay for the deployment
    #[error("Sender {sender} has no funds to pay for the deployment")]
    InsufficientFunds {
        /// The unfunded sender
        sender: Address,
    },

    /// The Safe infrastructure contracts are not deployed on this network
    #[error("Network {network} is not supported: no {contract} code at {address}")]
    UnsupportedNetwork {
        /// Configured network name
        network: String,
        /// Which infrastructure contract is missing
        contract: &'static str,
        /// Where it was expected
        address: Address,
    },

    /// A chain query failed or returned garbage
    #[error("Chain query failed: {0}")]
    ChainQueryFailed(#[from] ChainClientError),
}

/// Errors surfaced by a [`ChainClient`](crate::chain::ChainClient) implementation
#[derive(Debug, Error)]
pub enum ChainClientError {
    /// Transport or node-side failure
    #[error("{method} request failed: {message}")]
    Rpc {
        /// JSON-RPC method name
        method: &'static str,
        /// Error reported by the transport or node
        message: String,
    },

    /// The node answered but the payload could not be interpreted
    #[error("Malformed {method} response: {reason}")]
    MalformedResponse {
        /// JSON-RPC method name
        method: &'static str,
        /// What was wrong with it
        reason: String,
    },
}

/// Errors loading a network configuration file
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be read
    #[error("Failed to read {path}: {source}")]
    Io {
        /// Path that was read
        path: String,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// The file is not a valid network configuration
    #[error("Invalid network configuration in {path}: {source}")]
    Parse {
        /// Path that was parsed
        path: String,
        /// Underlying JSON error
        source: serde_json::Error,
    },
}
