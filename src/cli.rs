use std::path::PathBuf;

use alloy_primitives::{Address, U256};
use clap::{Parser, ValueEnum};

use crate::config::{NetworkConfig, SafeContracts};
use crate::constants::UNNAMED_NETWORK;
use crate::errors::ConfigError;
use crate::types::{DeploymentRequest, TxOverrides};

/// Canonical Safe releases with built-in contract addresses
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SafeVersion {
    #[default]
    #[value(name = "1.3.0")]
    V1_3_0,
    #[value(name = "1.4.1")]
    V1_4_1,
}

impl SafeVersion {
    pub fn contracts(self) -> SafeContracts {
        match self {
            Self::V1_3_0 => SafeContracts::v1_3_0(),
            Self::V1_4_1 => SafeContracts::v1_4_1(),
        }
    }
}

/// CLI arguments for planning a Safe deployment
#[derive(Parser, Debug)]
#[command(
    name = "safe-deploy",
    about = "Plan an unsigned Safe proxy deployment and predict its address"
)]
pub struct Cli {
    /// JSON-RPC endpoint of the target chain
    #[arg(long, env = "ETH_RPC_URL", default_value = "http://127.0.0.1:8545")]
    pub rpc_url: String,

    /// Account that will send (and pay for) the deployment
    #[arg(long)]
    pub sender: Address,

    /// Comma-separated Safe owners, in setup order
    #[arg(long, value_delimiter = ',', required = true)]
    pub owners: Vec<Address>,

    /// Confirmations required to execute a Safe transaction
    #[arg(long)]
    pub threshold: u64,

    /// CREATE2 salt nonce. Random when omitted.
    #[arg(long)]
    pub salt_nonce: Option<U256>,

    /// Safe release whose canonical addresses are used
    #[arg(long, value_enum, default_value = "1.3.0")]
    pub safe_version: SafeVersion,

    /// JSON file with the network name and contract addresses.
    /// Takes precedence over --safe-version.
    #[arg(long)]
    pub contracts: Option<PathBuf>,

    /// Network name shown in logs and errors
    #[arg(long)]
    pub network_name: Option<String>,

    /// Gas limit override, used verbatim
    #[arg(long)]
    pub gas: Option<u64>,

    /// Gas price override in wei
    #[arg(long)]
    pub gas_price: Option<u128>,

    /// Transaction nonce override
    #[arg(long)]
    pub nonce: Option<u64>,

    /// RPC request timeout in seconds
    #[arg(long, default_value = "30")]
    pub rpc_timeout: u64,

    /// Print the plan as JSON instead of colored text
    #[arg(long)]
    pub json: bool,

    /// Recompute the predicted address from the factory's creation code
    #[arg(long)]
    pub verify_address: bool,
}

impl Cli {
    /// Resolve the target network from --contracts, --safe-version and --network-name.
    pub fn network_config(&self) -> Result<NetworkConfig, ConfigError> {
        let mut network = match &self.contracts {
            Some(path) => NetworkConfig::from_json_file(path)?,
            None => NetworkConfig::new(UNNAMED_NETWORK, self.safe_version.contracts()),
        };
        if let Some(name) = &self.network_name {
            network.name = name.clone();
        }
        Ok(network)
    }

    pub fn overrides(&self) -> TxOverrides {
        TxOverrides {
            gas: self.gas,
            gas_price: self.gas_price,
            nonce: self.nonce,
        }
    }

    pub fn request(&self) -> DeploymentRequest {
        let mut request =
            DeploymentRequest::new(self.sender, self.owners.clone(), self.threshold)
                .with_overrides(self.overrides());
        if let Some(salt_nonce) = self.salt_nonce {
            request = request.with_salt_nonce(salt_nonce);
        }
        request
    }
}
