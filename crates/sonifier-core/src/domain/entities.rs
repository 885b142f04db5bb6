//! # Domain Entities
//!
//! Core entities for the sonification pipeline: confirmed blocks, their
//! transactions, and the derived control-message payloads.

use super::units::{wei_to_eth, wei_to_gwei};
use primitive_types::{H160, H256, U256};
use serde::{Deserialize, Serialize};

/// Marker sent in place of a recipient for contract-creation transactions.
pub const CONTRACT_CREATION_MARKER: &str = "contract_creation";

/// A confirmed block with full transaction bodies.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Block {
    /// Block height.
    pub number: u64,
    /// Transactions in on-chain order. Order is preserved end to end.
    pub transactions: Vec<Transaction>,
}

impl Block {
    /// Create a block at a height with the given transactions.
    pub fn new(number: u64, transactions: Vec<Transaction>) -> Self {
        Self {
            number,
            transactions,
        }
    }
}

/// A confirmed transaction, reduced to the fields the pipeline reads.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Transaction {
    /// Transaction hash.
    pub hash: H256,
    /// Transferred value in wei.
    pub value: U256,
    /// Legacy gas price in wei. Absent for fee-market transaction types;
    /// treated as zero downstream.
    pub gas_price: Option<U256>,
    /// Recipient address. Absent for contract creation.
    pub to: Option<H160>,
    /// Call data. Empty for a plain value transfer.
    pub input: Vec<u8>,
}

impl Transaction {
    /// Whether this transaction carries call data (contract interaction).
    pub fn is_contract_call(&self) -> bool {
        !self.input.is_empty()
    }
}

/// Musical parameters derived from one transaction. Never persisted.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct NoteEvent {
    /// MIDI note number.
    pub note: i32,
    /// MIDI velocity.
    pub velocity: i32,
    /// Instrument patch selector.
    pub instrument: i32,
    /// Note duration in seconds.
    pub duration: f32,
}

/// Auxiliary display data sent alongside each note, for visualization.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct TxDisplay {
    /// First 10 characters of the 0x-prefixed transaction hash.
    pub hash_prefix: String,
    /// Transferred value in ether.
    pub value_eth: f32,
    /// Gas price in gwei.
    pub gas_gwei: f32,
    /// Last 8 hex characters of the recipient, or the contract-creation
    /// marker when there is none.
    pub recipient: String,
}

impl TxDisplay {
    /// Derive display data from a transaction.
    pub fn for_transaction(tx: &Transaction) -> Self {
        let full_hash = format!("0x{}", hex::encode(tx.hash.as_bytes()));
        let recipient = match tx.to {
            Some(addr) => {
                let hex_addr = hex::encode(addr.as_bytes());
                hex_addr[hex_addr.len() - 8..].to_string()
            }
            None => CONTRACT_CREATION_MARKER.to_string(),
        };

        Self {
            hash_prefix: full_hash[..10].to_string(),
            value_eth: wei_to_eth(tx.value) as f32,
            gas_gwei: wei_to_gwei(tx.gas_price.unwrap_or_default()) as f32,
            recipient,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn transfer(value: u64) -> Transaction {
        Transaction {
            hash: H256::repeat_byte(0xab),
            value: U256::from(value),
            gas_price: Some(U256::from(20_000_000_000u64)),
            to: Some(H160::repeat_byte(0xcd)),
            input: Vec::new(),
        }
    }

    #[test]
    fn test_contract_call_detection() {
        let mut tx = transfer(1);
        assert!(!tx.is_contract_call());

        tx.input = vec![0xa9, 0x05, 0x9c, 0xbb];
        assert!(tx.is_contract_call());
    }

    #[test]
    fn test_display_hash_prefix() {
        let display = TxDisplay::for_transaction(&transfer(1));
        assert_eq!(display.hash_prefix, "0xabababab");
        assert_eq!(display.hash_prefix.len(), 10);
    }

    #[test]
    fn test_display_recipient_suffix() {
        let display = TxDisplay::for_transaction(&transfer(1));
        assert_eq!(display.recipient, "cdcdcdcd");
    }

    #[test]
    fn test_display_contract_creation_marker() {
        let mut tx = transfer(1);
        tx.to = None;
        let display = TxDisplay::for_transaction(&tx);
        assert_eq!(display.recipient, CONTRACT_CREATION_MARKER);
    }

    #[test]
    fn test_display_missing_gas_price_defaults_to_zero() {
        let mut tx = transfer(1);
        tx.gas_price = None;
        let display = TxDisplay::for_transaction(&tx);
        assert_eq!(display.gas_gwei, 0.0);
    }

    #[test]
    fn test_display_value_in_ether() {
        let mut tx = transfer(0);
        tx.value = U256::from(1_500_000_000_000_000_000u64);
        let display = TxDisplay::for_transaction(&tx);
        assert!((display.value_eth - 1.5).abs() < 1e-6);
    }
}
