//! # Emitter
//!
//! Hands mapped parameters to the control-message transport, pacing
//! emission so a busy block becomes a phrase instead of a cluster.

use crate::domain::{NoteEvent, Transaction, TxDisplay};
use crate::ports::ControlSink;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

/// Forwards note events and display data to the control sink.
///
/// Best-effort: a failed send is logged and dropped, never retried, and
/// never disturbs the polling cycle.
pub struct Emitter<S: ControlSink> {
    sink: Arc<S>,
    pacing: Duration,
}

impl<S: ControlSink> Emitter<S> {
    /// Create an emitter over a sink with the given inter-note pacing.
    pub fn new(sink: Arc<S>, pacing: Duration) -> Self {
        Self { sink, pacing }
    }

    /// Emit one transaction: the note message, then its display data,
    /// then the pacing delay.
    pub async fn emit(&self, event: &NoteEvent, tx: &Transaction) {
        let info = TxDisplay::for_transaction(tx);

        info!(
            "TX {}... value {:.5} ETH -> note {}, vel {}",
            info.hash_prefix, info.value_eth, event.note, event.velocity
        );

        if let Err(e) = self.sink.send_note(event) {
            warn!("Dropping note message: {}", e);
        }
        if let Err(e) = self.sink.send_tx_info(&info) {
            warn!("Dropping tx_info message: {}", e);
        }

        tokio::time::sleep(self.pacing).await;
    }
}
