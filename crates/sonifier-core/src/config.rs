//! # Sonifier Configuration
//!
//! Fixed-at-startup settings for the polling and mapping pipeline.

use primitive_types::U256;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default minimum transaction value, in wei (0.0001 ETH).
pub const DEFAULT_MIN_VALUE_WEI: u64 = 100_000_000_000_000;

/// Pipeline configuration. Read once at startup; never reloaded.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SonifierConfig {
    /// Ethereum JSON-RPC endpoint URL.
    pub rpc_url: String,

    /// Host the sound process listens on.
    pub osc_host: String,

    /// Port the sound process listens on (SuperCollider default).
    pub osc_port: u16,

    /// Seconds between polls for new blocks.
    pub poll_interval_secs: u64,

    /// Milliseconds between consecutive note emissions, spreading the
    /// sounds of a busy block over time.
    pub pacing_ms: u64,

    /// Transactions below this value (wei) are never emitted.
    pub min_value_threshold: U256,

    /// Lowest MIDI note.
    pub min_note: i32,

    /// Highest MIDI note.
    pub max_note: i32,

    /// Lowest MIDI velocity.
    pub min_velocity: i32,

    /// Highest MIDI velocity.
    pub max_velocity: i32,

    /// Ledger size that triggers a trim pass.
    pub ledger_trim_threshold: usize,

    /// Ledger size after a trim pass.
    pub ledger_retain_size: usize,
}

impl Default for SonifierConfig {
    fn default() -> Self {
        Self {
            rpc_url: "http://localhost:8545".to_string(),
            osc_host: "127.0.0.1".to_string(),
            osc_port: 57120,
            poll_interval_secs: 3,
            pacing_ms: 50,
            min_value_threshold: U256::from(DEFAULT_MIN_VALUE_WEI),
            min_note: 36,
            max_note: 84,
            min_velocity: 30,
            max_velocity: 120,
            ledger_trim_threshold: 1000,
            ledger_retain_size: 500,
        }
    }
}

impl SonifierConfig {
    /// Create a config for testing (no delays, small ledger).
    pub fn for_testing() -> Self {
        Self {
            poll_interval_secs: 0,
            pacing_ms: 0,
            ledger_trim_threshold: 8,
            ledger_retain_size: 4,
            ..Self::default()
        }
    }

    /// Poll interval as a [`Duration`].
    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs)
    }

    /// Inter-note pacing delay as a [`Duration`].
    pub fn pacing(&self) -> Duration {
        Duration::from_millis(self.pacing_ms)
    }
}
