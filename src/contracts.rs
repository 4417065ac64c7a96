//! ABI definitions for the Safe contracts touched by a deployment.
//!
//! Only the functions the planner encodes or simulates are declared here.

use alloy_primitives::{Address, Bytes, U256};
use alloy_sol_types::{sol, SolCall};

sol! {
    /// Safe singleton (master copy), `setup` is the proxy initializer
    contract GnosisSafe {
        function setup(
            address[] owners,
            uint256 threshold,
            address to,
            bytes data,
            address fallbackHandler,
            address paymentToken,
            uint256 payment,
            address payable paymentReceiver
        ) external;
    }
}

sol! {
    /// Safe proxy factory
    contract ProxyFactory {
        function createProxyWithNonce(address singleton, bytes initializer, uint256 saltNonce)
            external
            returns (address proxy);

        function proxyCreationCode() external pure returns (bytes memory);
    }
}

/// Encoded `Safe.setup` call used as the proxy initializer.
///
/// No delegate module call, no payment token, no payment, no payment receiver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SafeSetupCall(Bytes);

impl SafeSetupCall {
    /// Encode `setup(owners, threshold, 0x0, 0x, fallback_handler, 0x0, 0, 0x0)`.
    pub fn encode(owners: &[Address], threshold: u64, fallback_handler: Address) -> Self {
        let call = GnosisSafe::setupCall {
            owners: owners.to_vec(),
            threshold: U256::from(threshold),
            to: Address::ZERO,
            data: Bytes::new(),
            fallbackHandler: fallback_handler,
            paymentToken: Address::ZERO,
            payment: U256::ZERO,
            paymentReceiver: Address::ZERO,
        };
        Self(call.abi_encode().into())
    }

    /// Consume into the encoded call data.
    pub fn into_bytes(self) -> Bytes {
        self.0
    }
}

/// Encode `createProxyWithNonce(master_copy, initializer, salt_nonce)`.
pub fn create_proxy_with_nonce_calldata(
    master_copy: Address,
    initializer: &Bytes,
    salt_nonce: U256,
) -> Bytes {
    ProxyFactory::createProxyWithNonceCall {
        singleton: master_copy,
        initializer: initializer.clone(),
        saltNonce: salt_nonce,
    }
    .abi_encode()
    .into()
}

/// Encode `proxyCreationCode()`, which takes no arguments.
pub fn proxy_creation_code_calldata() -> Bytes {
    Bytes::copy_from_slice(&ProxyFactory::proxyCreationCodeCall::SELECTOR)
}
