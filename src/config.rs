use std::fs;
use std::path::Path;

use alloy_primitives::Address;
use serde::{Deserialize, Serialize};

use crate::constants::{
    SAFE_FALLBACK_HANDLER_V1_3_0, SAFE_FALLBACK_HANDLER_V1_4_1, SAFE_PROXY_FACTORY_V1_3_0,
    SAFE_PROXY_FACTORY_V1_4_1, SAFE_SINGLETON_V1_3_0, SAFE_SINGLETON_V1_4_1, UNNAMED_NETWORK,
};
use crate::errors::ConfigError;

/// Well-known Safe infrastructure addresses on one network
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SafeContracts {
    /// Safe singleton the proxy delegates to
    pub master_copy: Address,
    /// Factory exposing `createProxyWithNonce`
    pub proxy_factory: Address,
    /// Fallback handler installed by `setup`
    pub fallback_handler: Address,
}

impl Default for SafeContracts {
    fn default() -> Self {
        Self::v1_3_0()
    }
}

impl SafeContracts {
    /// Canonical Safe v1.3.0 deployment.
    pub fn v1_3_0() -> Self {
        Self {
            master_copy: SAFE_SINGLETON_V1_3_0,
            proxy_factory: SAFE_PROXY_FACTORY_V1_3_0,
            fallback_handler: SAFE_FALLBACK_HANDLER_V1_3_0,
        }
    }

    /// Canonical Safe v1.4.1 deployment.
    pub fn v1_4_1() -> Self {
        Self {
            master_copy: SAFE_SINGLETON_V1_4_1,
            proxy_factory: SAFE_PROXY_FACTORY_V1_4_1,
            fallback_handler: SAFE_FALLBACK_HANDLER_V1_4_1,
        }
    }
}

/// Target network: a display name plus its Safe contracts
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkConfig {
    /// Name used in logs and errors
    pub name: String,
    /// Safe infrastructure addresses
    #[serde(default)]
    pub contracts: SafeContracts,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self::new(UNNAMED_NETWORK, SafeContracts::default())
    }
}

impl NetworkConfig {
    pub fn new(name: impl Into<String>, contracts: SafeContracts) -> Self {
        Self {
            name: name.into(),
            contracts,
        }
    }

    /// A preset network nobody gave a name to.
    pub fn is_unnamed(&self) -> bool {
        self.name == UNNAMED_NETWORK
    }

    /// Load a network description from a JSON file.
    ///
    /// ```json
    /// {
    ///   "name": "gnosis",
    ///   "contracts": {
    ///     "masterCopy": "0x…",
    ///     "proxyFactory": "0x…",
    ///     "fallbackHandler": "0x…"
    ///   }
    /// }
    /// ```
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let display = path.display().to_string();
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: display.clone(),
            source,
        })?;
        serde_json::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: display,
            source,
        })
    }
}
