//! # Outbound Ports
//!
//! Traits for the two external collaborators: the Ethereum node and the
//! control-message transport to the sound process.

use crate::domain::{Block, NoteEvent, SonifierError, TxDisplay};
use async_trait::async_trait;

/// Ethereum node connection - outbound port.
#[async_trait]
pub trait ChainRpc: Send + Sync {
    /// Current confirmed chain height.
    async fn current_height(&self) -> Result<u64, SonifierError>;

    /// Fetch the block at a height with full transaction bodies.
    async fn fetch_block(&self, height: u64) -> Result<Block, SonifierError>;
}

/// Control-message transport - outbound port.
///
/// Fire-and-forget: no acknowledgement, no retry. Sends are synchronous,
/// matching a connected UDP socket.
pub trait ControlSink: Send + Sync {
    /// Send the musical parameters for one transaction.
    fn send_note(&self, event: &NoteEvent) -> Result<(), SonifierError>;

    /// Send the auxiliary display data for one transaction.
    fn send_tx_info(&self, info: &TxDisplay) -> Result<(), SonifierError>;
}

// =============================================================================
// Mock Implementations for Testing
// =============================================================================

use primitive_types::U256;
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Mutex;

/// Mock chain connection for testing.
///
/// Height and blocks are scripted by the test; individual heights can be
/// made to fail to exercise the skip-on-error path.
#[derive(Default)]
pub struct MockChainRpc {
    height: AtomicU64,
    blocks: Mutex<HashMap<u64, Block>>,
    failing_heights: Mutex<HashSet<u64>>,
    fail_height_query: AtomicBool,
}

impl MockChainRpc {
    /// Create a mock chain at height zero with no blocks.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the reported chain height.
    pub fn set_height(&self, height: u64) {
        self.height.store(height, Ordering::SeqCst);
    }

    /// Register a block, retrievable by its height.
    pub fn add_block(&self, block: Block) {
        self.blocks
            .lock()
            .expect("mock lock poisoned")
            .insert(block.number, block);
    }

    /// Make fetches of the given height fail.
    pub fn fail_height(&self, height: u64) {
        self.failing_heights
            .lock()
            .expect("mock lock poisoned")
            .insert(height);
    }

    /// Make the height query itself fail (simulated node outage).
    pub fn set_fail_height_query(&self, fail: bool) {
        self.fail_height_query.store(fail, Ordering::SeqCst);
    }
}

#[async_trait]
impl ChainRpc for MockChainRpc {
    async fn current_height(&self) -> Result<u64, SonifierError> {
        if self.fail_height_query.load(Ordering::SeqCst) {
            return Err(SonifierError::Transport("mock outage".to_string()));
        }
        Ok(self.height.load(Ordering::SeqCst))
    }

    async fn fetch_block(&self, height: u64) -> Result<Block, SonifierError> {
        if self
            .failing_heights
            .lock()
            .expect("mock lock poisoned")
            .contains(&height)
        {
            return Err(SonifierError::Transport("mock fetch failure".to_string()));
        }

        self.blocks
            .lock()
            .expect("mock lock poisoned")
            .get(&height)
            .cloned()
            .ok_or(SonifierError::BlockNotFound(height))
    }
}

/// One message captured by [`RecordingSink`].
#[derive(Clone, Debug, PartialEq)]
pub enum SentMessage {
    /// A `/eth/note` payload.
    Note(NoteEvent),
    /// A `/eth/tx_info` payload.
    TxInfo(TxDisplay),
}

/// Recording sink for testing: captures every message in send order.
#[derive(Default)]
pub struct RecordingSink {
    sent: Mutex<Vec<SentMessage>>,
    should_fail: AtomicBool,
}

impl RecordingSink {
    /// Create an empty recording sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything sent so far, in order.
    pub fn sent(&self) -> Vec<SentMessage> {
        self.sent.lock().expect("mock lock poisoned").clone()
    }

    /// Note payloads only, in send order.
    pub fn notes(&self) -> Vec<NoteEvent> {
        self.sent()
            .into_iter()
            .filter_map(|m| match m {
                SentMessage::Note(event) => Some(event),
                SentMessage::TxInfo(_) => None,
            })
            .collect()
    }

    /// Make subsequent sends fail.
    pub fn set_should_fail(&self, fail: bool) {
        self.should_fail.store(fail, Ordering::SeqCst);
    }
}

impl ControlSink for RecordingSink {
    fn send_note(&self, event: &NoteEvent) -> Result<(), SonifierError> {
        if self.should_fail.load(Ordering::SeqCst) {
            return Err(SonifierError::Send("mock send failure".to_string()));
        }
        self.sent
            .lock()
            .expect("mock lock poisoned")
            .push(SentMessage::Note(event.clone()));
        Ok(())
    }

    fn send_tx_info(&self, info: &TxDisplay) -> Result<(), SonifierError> {
        if self.should_fail.load(Ordering::SeqCst) {
            return Err(SonifierError::Send("mock send failure".to_string()));
        }
        self.sent
            .lock()
            .expect("mock lock poisoned")
            .push(SentMessage::TxInfo(info.clone()));
        Ok(())
    }
}

/// Build a plain-transfer transaction for tests.
pub fn test_transfer(hash_byte: u8, value: U256, gas_price: U256) -> crate::domain::Transaction {
    crate::domain::Transaction {
        hash: primitive_types::H256::repeat_byte(hash_byte),
        value,
        gas_price: Some(gas_price),
        to: Some(primitive_types::H160::repeat_byte(0x11)),
        input: Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_chain_reports_height() {
        let rpc = MockChainRpc::new();
        rpc.set_height(42);
        assert_eq!(rpc.current_height().await.unwrap(), 42);
    }

    #[tokio::test]
    async fn test_mock_chain_outage() {
        let rpc = MockChainRpc::new();
        rpc.set_fail_height_query(true);
        assert!(rpc.current_height().await.is_err());
    }

    #[tokio::test]
    async fn test_mock_chain_missing_block() {
        let rpc = MockChainRpc::new();
        assert!(matches!(
            rpc.fetch_block(7).await,
            Err(SonifierError::BlockNotFound(7))
        ));
    }

    #[tokio::test]
    async fn test_mock_chain_injected_fetch_failure() {
        let rpc = MockChainRpc::new();
        rpc.add_block(Block::new(5, Vec::new()));
        rpc.fail_height(5);
        assert!(rpc.fetch_block(5).await.is_err());
    }

    #[test]
    fn test_recording_sink_captures_in_order() {
        let sink = RecordingSink::new();
        let event = NoteEvent {
            note: 60,
            velocity: 90,
            instrument: 1,
            duration: 0.5,
        };
        sink.send_note(&event).unwrap();
        assert_eq!(sink.sent(), vec![SentMessage::Note(event)]);
    }

    #[test]
    fn test_recording_sink_failure_mode() {
        let sink = RecordingSink::new();
        sink.set_should_fail(true);
        let event = NoteEvent {
            note: 60,
            velocity: 90,
            instrument: 1,
            duration: 0.5,
        };
        assert!(sink.send_note(&event).is_err());
        assert!(sink.sent().is_empty());
    }
}
