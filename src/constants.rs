use alloy_primitives::{address, Address};

/// Extra gas added on top of `eth_estimateGas` for a proxy deployment.
/// Estimation under-reports CREATE2 deployments, so an estimate is never used as-is.
pub const CREATE2_GAS_BUFFER: u64 = 50_000;

/// Block tag used for every state query
pub const LATEST_BLOCK: &str = "latest";

/// Network name used when none was configured
pub const UNNAMED_NETWORK: &str = "unknown";

/// Ethereum address length (20 bytes)
pub const ADDRESS_LENGTH: usize = 20;
/// ABI word length (32 bytes)
pub const WORD_LENGTH: usize = 32;

/// Head of the Safe owner linked list. `setup` rejects it as an owner.
pub const SENTINEL_OWNER: Address = address!("0000000000000000000000000000000000000001");

/// Gnosis Safe Singleton v1.3.0 canonical address
pub const SAFE_SINGLETON_V1_3_0: Address =
    address!("d9Db270c1B5E3Bd161E8c8503c55cEABeE709552");

/// Gnosis Safe Proxy Factory v1.3.0 canonical address
pub const SAFE_PROXY_FACTORY_V1_3_0: Address =
    address!("a6B71E26C5e0845f74c812102Ca7114b6a896AB2");

/// Gnosis Safe Compatibility Fallback Handler v1.3.0 canonical address
pub const SAFE_FALLBACK_HANDLER_V1_3_0: Address =
    address!("f48f2B2d2a534e402487b3ee7C18c33Aec0Fe5e4");

/// Safe Singleton v1.4.1 canonical address
pub const SAFE_SINGLETON_V1_4_1: Address =
    address!("41675C099F32341bf84BFc5382aF534df5C7461a");

/// Safe Proxy Factory v1.4.1 canonical address
pub const SAFE_PROXY_FACTORY_V1_4_1: Address =
    address!("4e1DCf7AD4e460CfD30791CCC4F9c8a4f820ec67");

/// Safe Compatibility Fallback Handler v1.4.1 canonical address
pub const SAFE_FALLBACK_HANDLER_V1_4_1: Address =
    address!("fd0732Dc9E303f09fCEf3a7388Ad10A83459Ec99");
