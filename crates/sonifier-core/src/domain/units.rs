//! # Unit Conversions
//!
//! Exact-decimal conversions between the chain's integer units (wei) and the
//! human-scale representations used for mapping and display (ether, gwei).

use primitive_types::U256;

/// Wei per ether (1e18).
pub const WEI_PER_ETH: f64 = 1e18;

/// Wei per gwei (1e9).
pub const WEI_PER_GWEI: f64 = 1e9;

/// Convert a wei amount to a float without panicking.
///
/// Amounts above 128 bits are beyond any circulating supply; they saturate
/// rather than abort the pipeline.
pub fn u256_to_f64(value: U256) -> f64 {
    if value.bits() > 128 {
        return f64::MAX;
    }
    value.as_u128() as f64
}

/// Wei to whole ether.
pub fn wei_to_eth(value: U256) -> f64 {
    u256_to_f64(value) / WEI_PER_ETH
}

/// Wei to gwei, the unit gas prices are quoted in.
pub fn wei_to_gwei(value: U256) -> f64 {
    u256_to_f64(value) / WEI_PER_GWEI
}

/// Gwei to wei.
pub fn gwei_to_wei(gwei: u64) -> U256 {
    U256::from(gwei) * U256::from(1_000_000_000u64)
}
