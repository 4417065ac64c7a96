//! # Safe Deployment Planner
//!
//! Plans the deployment of a new Safe multisig wallet through the canonical
//! `ProxyFactory`. Given owners, a threshold and a sender, it checks the chain,
//! encodes `setup`, builds an unsigned `createProxyWithNonce` transaction and
//! predicts the proxy address by simulating the call. Nothing is signed or sent.

pub mod builder;
pub mod chain;
pub mod cli;
pub mod config;
pub mod constants;
pub mod contracts;
pub mod create2;
pub mod errors;
pub mod output;
pub mod planner;
pub mod salt;
pub mod types;

pub use builder::{build_proxy_deployment_tx, ProxyDeployment};
pub use chain::{ChainClient, JsonRpcChainClient};
pub use config::{NetworkConfig, SafeContracts};
pub use errors::{ChainClientError, ConfigError, DeploymentError};
pub use planner::{validate_owners, SafeDeploymentPlanner};
pub use salt::{FixedSaltSource, OsRngSaltSource, SaltSource};
pub use types::{
    ChainSnapshot, DeployedProxyPlan, DeploymentRequest, TransactionParameters, TxOverrides,
};
