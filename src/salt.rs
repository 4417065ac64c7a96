//! CREATE2 salt nonce sources.
//!
//! The salt nonce only selects the proxy address; it is unrelated to the
//! sender's transaction nonce.

use alloy_primitives::U256;
use rand::rngs::OsRng;
use rand::RngCore;

/// Supplies a salt nonce when the caller did not pick one.
pub trait SaltSource {
    /// Draw a salt nonce.
    fn salt_nonce(&self) -> U256;
}

/// Uniform salt over the full 256-bit range, read from the operating system CSPRNG.
#[derive(Debug, Clone, Copy, Default)]
pub struct OsRngSaltSource;

impl SaltSource for OsRngSaltSource {
    fn salt_nonce(&self) -> U256 {
        let mut bytes = [0u8; 32];
        OsRng.fill_bytes(&mut bytes);
        U256::from_be_bytes(bytes)
    }
}

/// Always returns the same salt nonce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedSaltSource(pub U256);

impl SaltSource for FixedSaltSource {
    fn salt_nonce(&self) -> U256 {
        self.0
    }
}
