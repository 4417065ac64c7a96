//! Safe deployment planner.
//!
//! Validates a [`DeploymentRequest`], checks that the target network can host
//! the deployment, and hands the encoded `setup` call to the proxy builder.
//!
//! Flow:
//! ```text
//!   owners / threshold check   (local, no I/O)
//!   → ChainSnapshot            (eth_getBalance, then eth_getCode ×2 if funded)
//!   → salt nonce               (request or SaltSource)
//!   → SafeSetupCall
//!   → build_proxy_deployment_tx
//! ```
//!
//! Nothing is cached between calls; every plan re-reads chain state.

use std::collections::HashSet;

use alloy_primitives::utils::format_ether;
use alloy_primitives::Address;
use tracing::{info, warn};

use crate::builder::{build_proxy_deployment_tx, ProxyDeployment};
use crate::chain::ChainClient;
use crate::config::{NetworkConfig, SafeContracts};
use crate::constants::SENTINEL_OWNER;
use crate::contracts::SafeSetupCall;
use crate::create2::{verify_predicted_address, AddressCheck};
use crate::errors::DeploymentError;
use crate::salt::{OsRngSaltSource, SaltSource};
use crate::types::{ChainSnapshot, DeployedProxyPlan, DeploymentRequest, TxOverrides};

impl ChainSnapshot {
    /// Read the sender balance, then the code presence of the Safe contracts.
    ///
    /// An unfunded sender fails before any code is read.
    pub fn fetch(
        client: &impl ChainClient,
        sender: Address,
        contracts: &SafeContracts,
    ) -> Result<Self, DeploymentError> {
        let sender_balance = client.get_balance(sender)?;
        if sender_balance.is_zero() {
            return Err(DeploymentError::InsufficientFunds { sender });
        }
        Ok(Self {
            sender_balance,
            master_copy_has_code: !client.get_code(contracts.master_copy)?.is_empty(),
            proxy_factory_has_code: !client.get_code(contracts.proxy_factory)?.is_empty(),
        })
    }

    /// Funding first, then infrastructure.
    pub fn ensure_deployable(
        &self,
        sender: Address,
        network: &NetworkConfig,
    ) -> Result<(), DeploymentError> {
        if self.sender_balance.is_zero() {
            return Err(DeploymentError::InsufficientFunds { sender });
        }
        if !self.master_copy_has_code {
            return Err(DeploymentError::UnsupportedNetwork {
                network: network.name.clone(),
                contract: "Safe master copy",
                address: network.contracts.master_copy,
            });
        }
        if !self.proxy_factory_has_code {
            return Err(DeploymentError::UnsupportedNetwork {
                network: network.name.clone(),
                contract: "proxy factory",
                address: network.contracts.proxy_factory,
            });
        }
        Ok(())
    }
}

/// Check owners and threshold the way `Safe.setup` will.
///
/// The threshold is checked against the distinct owners before anything else.
pub fn validate_owners(owners: &[Address], threshold: u64) -> Result<(), DeploymentError> {
    let distinct: HashSet<&Address> = owners.iter().collect();
    if threshold == 0 || (distinct.len() as u64) < threshold {
        return Err(DeploymentError::InvalidThreshold {
            threshold,
            distinct_owners: distinct.len(),
        });
    }

    let mut seen = HashSet::with_capacity(owners.len());
    for owner in owners {
        if owner.is_zero() {
            return Err(DeploymentError::InvalidOwner {
                owner: *owner,
                reason: "zero address",
            });
        }
        if *owner == SENTINEL_OWNER {
            return Err(DeploymentError::InvalidOwner {
                owner: *owner,
                reason: "reserved sentinel address",
            });
        }
        if !seen.insert(owner) {
            return Err(DeploymentError::InvalidOwner {
                owner: *owner,
                reason: "duplicate owner",
            });
        }
    }
    Ok(())
}

/// Plans Safe deployments on one network.
///
/// Chain access and salt generation are injected, so a planner holds no
/// global state and can run against a test double.
#[derive(Debug)]
pub struct SafeDeploymentPlanner<C, S = OsRngSaltSource> {
    client: C,
    salt_source: S,
    network: NetworkConfig,
}

impl<C: ChainClient> SafeDeploymentPlanner<C> {
    /// Planner drawing random salt nonces from the OS.
    pub fn new(client: C, network: NetworkConfig) -> Self {
        Self::with_salt_source(client, OsRngSaltSource, network)
    }
}

impl<C: ChainClient, S: SaltSource> SafeDeploymentPlanner<C, S> {
    pub fn with_salt_source(client: C, salt_source: S, network: NetworkConfig) -> Self {
        Self {
            client,
            salt_source,
            network,
        }
    }

    pub fn network(&self) -> &NetworkConfig {
        &self.network
    }

    /// Plan the deployment of a new Safe.
    ///
    /// Fails without any chain query when the owners or threshold are invalid.
    /// On success the transaction is unsigned and nothing has been sent.
    pub fn plan_safe_deployment(
        &self,
        request: &DeploymentRequest,
    ) -> Result<DeployedProxyPlan, DeploymentError> {
        let deployment = self.prepare_deployment(request)?;
        self.build(&deployment, &request.overrides)
    }

    /// Validate the request and the chain, pick the salt nonce and encode `setup`.
    pub fn prepare_deployment(
        &self,
        request: &DeploymentRequest,
    ) -> Result<ProxyDeployment, DeploymentError> {
        validate_owners(&request.owners, request.threshold)?;

        let contracts = self.network.contracts;
        if self.network.is_unnamed() {
            warn!(target: "planner", "network name not configured, reporting it as unknown");
        }
        let snapshot = ChainSnapshot::fetch(&self.client, request.sender, &contracts)?;
        snapshot.ensure_deployable(request.sender, &self.network)?;
        let balance = format!("{}Ξ", format_ether(snapshot.sender_balance));
        info!(
            target: "planner",
            network = %self.network.name,
            sender = %request.sender,
            %balance,
            "sender funded"
        );

        let salt_nonce = request
            .salt_nonce
            .unwrap_or_else(|| self.salt_source.salt_nonce());
        info!(
            target: "planner",
            owners = ?request.owners,
            threshold = request.threshold,
            fallback_handler = %contracts.fallback_handler,
            %salt_nonce,
            "creating new Safe"
        );

        let setup = SafeSetupCall::encode(
            &request.owners,
            request.threshold,
            contracts.fallback_handler,
        );
        Ok(ProxyDeployment {
            proxy_factory: contracts.proxy_factory,
            master_copy: contracts.master_copy,
            initializer: setup.into_bytes(),
            salt_nonce,
            sender: request.sender,
        })
    }

    /// Build the transaction for a prepared deployment.
    pub fn build(
        &self,
        deployment: &ProxyDeployment,
        overrides: &TxOverrides,
    ) -> Result<DeployedProxyPlan, DeploymentError> {
        let plan = build_proxy_deployment_tx(&self.client, deployment, overrides)?;
        info!(
            target: "planner",
            predicted_address = %plan.predicted_address,
            gas = plan.transaction.gas,
            nonce = plan.transaction.nonce,
            "Safe deployment planned"
        );
        Ok(plan)
    }

    /// Recompute the predicted address offline and compare.
    pub fn verify_address(
        &self,
        deployment: &ProxyDeployment,
        plan: &DeployedProxyPlan,
    ) -> Result<AddressCheck, DeploymentError> {
        Ok(verify_predicted_address(&self.client, deployment, plan.predicted_address)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chain::mock::MockChainClient;
    use crate::errors::ChainClientError;
    use crate::salt::FixedSaltSource;
    use alloy_primitives::{address, U256};

    const SENDER: Address = address!("5B38Da6a701c568545dCfcB03FcB875f56beddC4");
    const OWNER_A: Address = address!("1111111111111111111111111111111111111111");
    const OWNER_B: Address = address!("2222222222222222222222222222222222222222");
    const OWNER_C: Address = address!("3333333333333333333333333333333333333333");
    const PROXY: Address = address!("Ab8483F64d9C6d1EcF9b849Ae677dD3315835cb2");
    const ESTIMATE: u64 = 280_000;
    const TX_COUNT: u64 = 17;

    fn one_ether() -> U256 {
        U256::from(1_000_000_000_000_000_000u64)
    }

    fn network() -> NetworkConfig {
        NetworkConfig::new("testnet", SafeContracts::v1_3_0())
    }

    /// Funded sender on a network with both Safe contracts deployed
    fn healthy_chain() -> MockChainClient {
        let contracts = SafeContracts::v1_3_0();
        MockChainClient::new()
            .with_balance(SENDER, one_ether())
            .with_code(contracts.master_copy)
            .with_code(contracts.proxy_factory)
            .with_simulated_address(PROXY)
            .with_gas_estimate(ESTIMATE)
            .with_transaction_count(SENDER, TX_COUNT)
    }

    fn request() -> DeploymentRequest {
        DeploymentRequest::new(SENDER, vec![OWNER_A, OWNER_B, OWNER_C], 2)
            .with_salt_nonce(U256::from(42))
    }

    #[test]
    fn test_plans_deployment() {
        let chain = healthy_chain();
        let planner = SafeDeploymentPlanner::new(&chain, network());

        let plan = planner.plan_safe_deployment(&request()).unwrap();

        assert_eq!(plan.transaction.to, SafeContracts::v1_3_0().proxy_factory);
        assert_eq!(plan.transaction.from, SENDER);
        assert_eq!(plan.transaction.nonce, TX_COUNT);
        assert_eq!(plan.transaction.gas, ESTIMATE + 50_000);
        assert_eq!(plan.transaction.gas_price, None);
        assert_eq!(plan.predicted_address, PROXY);
        assert_eq!(
            chain.calls(),
            vec![
                "eth_getBalance",
                "eth_getCode",
                "eth_getCode",
                "eth_call",
                "eth_estimateGas",
                "eth_getTransactionCount",
            ]
        );
    }

    #[test]
    fn test_transaction_data_wraps_setup_call() {
        let chain = healthy_chain();
        let planner = SafeDeploymentPlanner::new(&chain, network());
        let plan = planner.plan_safe_deployment(&request()).unwrap();

        let contracts = SafeContracts::v1_3_0();
        let owners = [OWNER_A, OWNER_B, OWNER_C];
        let setup = SafeSetupCall::encode(&owners, 2, contracts.fallback_handler);
        let expected = ProxyDeployment {
            proxy_factory: contracts.proxy_factory,
            master_copy: contracts.master_copy,
            initializer: setup.into_bytes(),
            salt_nonce: U256::from(42),
            sender: SENDER,
        };
        assert_eq!(plan.transaction.data, expected.calldata());
    }

    #[test]
    fn test_threshold_above_owner_count_fails_without_queries() {
        let chain = healthy_chain();
        let planner = SafeDeploymentPlanner::new(&chain, network());
        let request = DeploymentRequest::new(SENDER, vec![OWNER_A, OWNER_B], 3);

        let err = planner.plan_safe_deployment(&request).unwrap_err();

        assert!(matches!(
            err,
            DeploymentError::InvalidThreshold {
                threshold: 3,
                distinct_owners: 2,
            }
        ));
        assert!(chain.calls().is_empty());
    }

    #[test]
    fn test_threshold_counts_distinct_owners() {
        let chain = healthy_chain();
        let planner = SafeDeploymentPlanner::new(&chain, network());
        let request = DeploymentRequest::new(SENDER, vec![OWNER_A, OWNER_A, OWNER_A], 2);

        let err = planner.plan_safe_deployment(&request).unwrap_err();

        assert!(matches!(
            err,
            DeploymentError::InvalidThreshold {
                threshold: 2,
                distinct_owners: 1,
            }
        ));
        assert!(chain.calls().is_empty());
    }

    #[test]
    fn test_zero_threshold_fails() {
        let chain = healthy_chain();
        let planner = SafeDeploymentPlanner::new(&chain, network());

        for owners in [vec![], vec![OWNER_A]] {
            let request = DeploymentRequest::new(SENDER, owners, 0);
            let err = planner.plan_safe_deployment(&request).unwrap_err();
            assert!(matches!(err, DeploymentError::InvalidThreshold { threshold: 0, .. }));
        }
        assert!(chain.calls().is_empty());
    }

    #[test]
    fn test_invalid_owners_fail_without_queries() {
        let chain = healthy_chain();
        let planner = SafeDeploymentPlanner::new(&chain, network());

        let cases = [
            (vec![OWNER_A, Address::ZERO], "zero address"),
            (vec![SENTINEL_OWNER, OWNER_B], "reserved sentinel address"),
            (vec![OWNER_A, OWNER_B, OWNER_A], "duplicate owner"),
        ];
        for (owners, expected) in cases {
            let request = DeploymentRequest::new(SENDER, owners, 2);
            match planner.plan_safe_deployment(&request).unwrap_err() {
                DeploymentError::InvalidOwner { reason, .. } => assert_eq!(reason, expected),
                other => panic!("expected InvalidOwner, got {other:?}"),
            }
        }
        assert!(chain.calls().is_empty());
    }

    #[test]
    fn test_zero_balance_is_insufficient_funds() {
        let chain = healthy_chain().with_balance(SENDER, U256::ZERO);
        let planner = SafeDeploymentPlanner::new(&chain, network());

        let err = planner.plan_safe_deployment(&request()).unwrap_err();

        match err {
            DeploymentError::InsufficientFunds { sender } => assert_eq!(sender, SENDER),
            other => panic!("expected InsufficientFunds, got {other:?}"),
        }
        // no code is read for an unfunded sender
        assert_eq!(chain.calls(), vec!["eth_getBalance"]);
    }

    #[test]
    fn test_snapshot_checks_funds_before_reading_code() {
        let contracts = SafeContracts::v1_3_0();

        let unfunded = healthy_chain().with_balance(SENDER, U256::ZERO);
        let err = ChainSnapshot::fetch(&unfunded, SENDER, &contracts).unwrap_err();
        assert!(matches!(err, DeploymentError::InsufficientFunds { .. }));
        assert_eq!(unfunded.calls(), vec!["eth_getBalance"]);

        let funded = healthy_chain();
        let snapshot = ChainSnapshot::fetch(&funded, SENDER, &contracts).unwrap();
        assert_eq!(
            snapshot,
            ChainSnapshot {
                sender_balance: one_ether(),
                master_copy_has_code: true,
                proxy_factory_has_code: true,
            }
        );
        assert_eq!(
            funded.calls(),
            vec!["eth_getBalance", "eth_getCode", "eth_getCode"]
        );
    }

    #[test]
    fn test_unnamed_network_still_plans() {
        let chain = healthy_chain();
        let planner = SafeDeploymentPlanner::new(&chain, NetworkConfig::default());
        assert!(planner.network().is_unnamed());

        let plan = planner.plan_safe_deployment(&request()).unwrap();
        assert_eq!(plan.predicted_address, PROXY);
    }

    #[test]
    fn test_missing_master_copy_is_unsupported_network() {
        let contracts = SafeContracts::v1_3_0();
        let chain = MockChainClient::new()
            .with_balance(SENDER, one_ether())
            .with_code(contracts.proxy_factory);
        let planner = SafeDeploymentPlanner::new(&chain, network());

        let err = planner.plan_safe_deployment(&request()).unwrap_err();

        match err {
            DeploymentError::UnsupportedNetwork { network, address, .. } => {
                assert_eq!(network, "testnet");
                assert_eq!(address, contracts.master_copy);
            }
            other => panic!("expected UnsupportedNetwork, got {other:?}"),
        }
    }

    #[test]
    fn test_missing_proxy_factory_is_unsupported_network() {
        let contracts = SafeContracts::v1_3_0();
        let chain = MockChainClient::new()
            .with_balance(SENDER, one_ether())
            .with_code(contracts.master_copy);
        let planner = SafeDeploymentPlanner::new(&chain, network());

        let err = planner.plan_safe_deployment(&request()).unwrap_err();

        match err {
            DeploymentError::UnsupportedNetwork { address, .. } => {
                assert_eq!(address, contracts.proxy_factory)
            }
            other => panic!("expected UnsupportedNetwork, got {other:?}"),
        }
        assert!(!chain.calls().contains(&"eth_call"));
    }

    #[test]
    fn test_wrong_network_constants_are_unsupported() {
        // v1.4.1 addresses against a chain that only has v1.3.0 deployed
        let chain = healthy_chain();
        let network = NetworkConfig::new("legacy", SafeContracts::v1_4_1());
        let planner = SafeDeploymentPlanner::new(&chain, network);

        let err = planner.plan_safe_deployment(&request()).unwrap_err();
        assert!(matches!(err, DeploymentError::UnsupportedNetwork { .. }));
    }

    #[test]
    fn test_chain_failure_is_chain_query_failed() {
        for method in ["eth_getBalance", "eth_getCode", "eth_call", "eth_getTransactionCount"] {
            let chain = healthy_chain().failing(method);
            let planner = SafeDeploymentPlanner::new(&chain, network());

            let err = planner.plan_safe_deployment(&request()).unwrap_err();
            match err {
                DeploymentError::ChainQueryFailed(ChainClientError::Rpc { method: failed, .. }) => {
                    assert_eq!(failed, method)
                }
                other => panic!("unexpected error for {method}: {other:?}"),
            }
        }
    }

    #[test]
    fn test_random_salt_comes_from_salt_source() {
        let chain = healthy_chain();
        let salt = U256::from(0xfeed_u64) << 200;
        let planner =
            SafeDeploymentPlanner::with_salt_source(&chain, FixedSaltSource(salt), network());
        let request = DeploymentRequest::new(SENDER, vec![OWNER_A, OWNER_B, OWNER_C], 2);

        let plan = planner.plan_safe_deployment(&request).unwrap();

        let data = &plan.transaction.data;
        assert_eq!(U256::from_be_slice(&data[4 + 64..4 + 96]), salt);
    }

    #[test]
    fn test_requested_salt_wins_over_salt_source() {
        let chain = healthy_chain();
        let planner = SafeDeploymentPlanner::with_salt_source(
            &chain,
            FixedSaltSource(U256::from(7)),
            network(),
        );

        let plan = planner.plan_safe_deployment(&request()).unwrap();

        let data = &plan.transaction.data;
        assert_eq!(U256::from_be_slice(&data[4 + 64..4 + 96]), U256::from(42));
    }

    #[test]
    fn test_same_salt_gives_identical_data() {
        let chain = healthy_chain();
        let planner = SafeDeploymentPlanner::new(&chain, network());

        let first = planner.plan_safe_deployment(&request()).unwrap();
        let second = planner.plan_safe_deployment(&request()).unwrap();

        assert_eq!(first.transaction.data, second.transaction.data);
        assert_eq!(first.predicted_address, second.predicted_address);
        // chain state is read again for the second plan
        assert_eq!(chain.calls().len(), 12);
    }

    #[test]
    fn test_overrides_are_passed_to_builder() {
        let chain = healthy_chain();
        let planner = SafeDeploymentPlanner::new(&chain, network());
        let overrides = TxOverrides {
            gas: Some(500_000),
            gas_price: Some(7),
            nonce: Some(3),
        };

        let plan = planner.plan_safe_deployment(&request().with_overrides(overrides)).unwrap();

        assert_eq!(plan.transaction.gas, 500_000);
        assert_eq!(plan.transaction.gas_price, Some(7));
        assert_eq!(plan.transaction.nonce, 3);
    }

    #[test]
    fn test_prepare_then_verify_address() {
        let code = alloy_primitives::bytes!("3d602d80600a3d3981f3");
        let contracts = SafeContracts::v1_3_0();
        let deployment = {
            let chain = healthy_chain();
            SafeDeploymentPlanner::new(&chain, network()).prepare_deployment(&request()).unwrap()
        };
        let expected = crate::create2::compute_proxy_address(
            contracts.proxy_factory,
            contracts.master_copy,
            &deployment.initializer,
            U256::from(42),
            &code,
        );
        let encoded = alloy_sol_types::SolValue::abi_encode_params(&(code,));
        let chain = healthy_chain()
            .with_simulated_address(expected)
            .with_call_output_for([0x53, 0xe5, 0xd9, 0x35], encoded.into());
        let planner = SafeDeploymentPlanner::new(&chain, network());

        let deployment = planner.prepare_deployment(&request()).unwrap();
        let plan = planner.build(&deployment, &TxOverrides::default()).unwrap();
        let check = planner.verify_address(&deployment, &plan).unwrap();

        assert_eq!(plan.predicted_address, expected);
        assert!(check.matches());
    }

    #[test]
    fn test_snapshot_reports_code_presence() {
        let contracts = SafeContracts::v1_3_0();
        let chain = MockChainClient::new()
            .with_balance(SENDER, U256::from(5))
            .with_code(contracts.proxy_factory);

        let snapshot = ChainSnapshot::fetch(&chain, SENDER, &contracts).unwrap();

        assert_eq!(
            snapshot,
            ChainSnapshot {
                sender_balance: U256::from(5),
                master_copy_has_code: false,
                proxy_factory_has_code: true,
            }
        );
    }
}
