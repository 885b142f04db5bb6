//! # Parameter Mapping
//!
//! Pure functions turning raw transaction fields into musical parameters.
//! Fully deterministic; no I/O, no shared state.

use crate::domain::{wei_to_eth, wei_to_gwei, Transaction};
use primitive_types::U256;

/// Instrument patch for a plain value transfer.
pub const INSTRUMENT_TRANSFER: i32 = 1;

/// Instrument patch for a contract interaction.
pub const INSTRUMENT_CONTRACT: i32 = 2;

/// Map a transferred value (wei) to a MIDI note.
///
/// # Algorithm
///
/// 1. Zero wei maps to `min_note`.
/// 2. Otherwise compress the ether amount logarithmically:
///    `log_value = clamp(10 * log10(amount + 1) - 10, 0, 20)`.
/// 3. Scale `log_value` linearly into `[min_note, max_note]` and floor.
///
/// Logarithmic compression keeps the enormous spread of on-chain values
/// inside a playable pitch range.
pub fn map_value_to_note(value: U256, min_note: i32, max_note: i32) -> i32 {
    if value.is_zero() {
        return min_note;
    }

    let amount = wei_to_eth(value);
    let log_value = (10.0 * (amount + 1.0).log10() - 10.0).clamp(0.0, 20.0);

    min_note + ((log_value / 20.0) * f64::from(max_note - min_note)) as i32
}

/// Map a gas price (wei) to a MIDI velocity.
///
/// Prices at or below 10 gwei sit on the velocity floor; the range up to
/// 310 gwei spreads linearly across `[min_vel, max_vel]`.
pub fn map_gas_to_velocity(gas_price: U256, min_vel: i32, max_vel: i32) -> i32 {
    let gwei = wei_to_gwei(gas_price);
    let normalized = ((gwei - 10.0) / 300.0).clamp(0.0, 1.0);

    min_vel + (normalized * f64::from(max_vel - min_vel)) as i32
}

/// Pick the instrument patch for a transaction.
///
/// Contract interactions (non-empty call data) get their own patch.
pub fn instrument_for(tx: &Transaction) -> i32 {
    if tx.is_contract_call() {
        INSTRUMENT_CONTRACT
    } else {
        INSTRUMENT_TRANSFER
    }
}

/// Map a transferred value (wei) to a note duration in seconds.
///
/// Larger transfers ring longer, capped at two seconds.
pub fn map_duration(value: U256) -> f32 {
    (0.2 + wei_to_eth(value) / 100.0).min(2.0) as f32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::gwei_to_wei;
    use primitive_types::{H256, U256};

    const ONE_ETH: u64 = 1_000_000_000_000_000_000;

    fn tx_with_input(input: Vec<u8>) -> Transaction {
        Transaction {
            hash: H256::zero(),
            value: U256::from(ONE_ETH),
            gas_price: Some(gwei_to_wei(20)),
            to: Some(Default::default()),
            input,
        }
    }

    #[test]
    fn test_zero_value_maps_to_min_note() {
        assert_eq!(map_value_to_note(U256::zero(), 36, 84), 36);
    }

    #[test]
    fn test_one_ether_maps_to_min_note() {
        // 10 * log10(2) - 10 is negative, so it clamps to the floor.
        assert_eq!(map_value_to_note(U256::from(ONE_ETH), 36, 84), 36);
    }

    #[test]
    fn test_ten_ether_rises_above_floor() {
        let ten_eth = U256::from(ONE_ETH) * U256::from(10u64);
        let note = map_value_to_note(ten_eth, 36, 84);
        // 10 * log10(11) - 10 ~= 0.414
        assert!(note >= 36);
        assert!(note <= 84);
        assert_eq!(note, 36 + ((10.0f64 * 11.0f64.log10() - 10.0) / 20.0 * 48.0) as i32);
    }

    #[test]
    fn test_note_monotone_and_bounded() {
        let mut last = 0;
        for exp in 0..30u32 {
            let value = U256::from(ONE_ETH) * U256::from(2u64).pow(U256::from(exp));
            let note = map_value_to_note(value, 36, 84);
            assert!(note >= 36 && note <= 84);
            assert!(note >= last);
            last = note;
        }
    }

    #[test]
    fn test_extreme_value_hits_ceiling() {
        let whale = U256::from(ONE_ETH) * U256::from(10_000_000_000u64);
        assert_eq!(map_value_to_note(whale, 36, 84), 84);
    }

    #[test]
    fn test_cheap_gas_maps_to_min_velocity() {
        assert_eq!(map_gas_to_velocity(U256::zero(), 30, 120), 30);
        assert_eq!(map_gas_to_velocity(gwei_to_wei(10), 30, 120), 30);
    }

    #[test]
    fn test_velocity_monotone_and_bounded() {
        let mut last = 0;
        for gwei in (0..500).step_by(10) {
            let vel = map_gas_to_velocity(gwei_to_wei(gwei), 30, 120);
            assert!(vel >= 30 && vel <= 120);
            assert!(vel >= last);
            last = vel;
        }
    }

    #[test]
    fn test_extreme_gas_hits_max_velocity() {
        assert_eq!(map_gas_to_velocity(gwei_to_wei(310), 30, 120), 120);
        assert_eq!(map_gas_to_velocity(gwei_to_wei(5000), 30, 120), 120);
    }

    #[test]
    fn test_instrument_selection() {
        assert_eq!(instrument_for(&tx_with_input(Vec::new())), INSTRUMENT_TRANSFER);
        assert_eq!(
            instrument_for(&tx_with_input(vec![0xa9, 0x05, 0x9c, 0xbb])),
            INSTRUMENT_CONTRACT
        );
    }

    #[test]
    fn test_zero_value_duration_floor() {
        assert!((map_duration(U256::zero()) - 0.2).abs() < 1e-6);
    }

    #[test]
    fn test_duration_grows_with_value() {
        let one = map_duration(U256::from(ONE_ETH));
        let fifty = map_duration(U256::from(ONE_ETH) * U256::from(50u64));
        assert!((one - 0.21).abs() < 1e-6);
        assert!(fifty > one);
    }

    #[test]
    fn test_duration_capped_at_two_seconds() {
        let huge = U256::from(ONE_ETH) * U256::from(100_000u64);
        assert_eq!(map_duration(huge), 2.0);
    }
}
