//! # Block Poller
//!
//! Drives the discovery of new blocks: queries the chain height each tick,
//! drains newly confirmed blocks in order, filters and dedups their
//! transactions, and hands the mapped results to the emitter.

use crate::algorithms::{instrument_for, map_duration, map_gas_to_velocity, map_value_to_note};
use crate::application::Emitter;
use crate::config::SonifierConfig;
use crate::domain::{Block, NoteEvent, SeenLedger, SonifierError};
use crate::ports::{ChainRpc, ControlSink};
use std::sync::Arc;
use tracing::{error, info, warn};

/// Mutable polling state, owned by the polling task alone.
#[derive(Clone, Debug)]
pub struct PollerState {
    /// Height of the last block whose transactions were drained.
    pub last_processed_height: u64,
    /// Hashes already emitted.
    pub ledger: SeenLedger,
}

/// Polls the chain and pushes qualifying transactions through the pipeline.
///
/// Two logical states: idle between ticks, processing while draining newly
/// confirmed blocks. There is no terminal state; the poller runs until the
/// process is killed.
pub struct BlockPoller<R: ChainRpc, S: ControlSink> {
    config: SonifierConfig,
    rpc: Arc<R>,
    emitter: Emitter<S>,
    state: PollerState,
}

impl<R: ChainRpc, S: ControlSink> BlockPoller<R, S> {
    /// Create a poller that starts after `start_height`; blocks at or below
    /// it are never fetched.
    pub fn new(config: SonifierConfig, rpc: Arc<R>, emitter: Emitter<S>, start_height: u64) -> Self {
        let ledger = SeenLedger::new(config.ledger_trim_threshold, config.ledger_retain_size);
        Self {
            config,
            rpc,
            emitter,
            state: PollerState {
                last_processed_height: start_height,
                ledger,
            },
        }
    }

    /// Height of the last processed block.
    pub fn last_processed_height(&self) -> u64 {
        self.state.last_processed_height
    }

    /// Number of hashes currently in the dedup ledger.
    pub fn ledger_len(&self) -> usize {
        self.state.ledger.len()
    }

    /// Run the poll loop forever.
    ///
    /// A failed tick is logged and the loop sleeps and carries on; transient
    /// node trouble never terminates the poller.
    pub async fn run(&mut self) {
        info!(
            "Starting to poll for new blocks every {} seconds...",
            self.config.poll_interval_secs
        );

        loop {
            if let Err(e) = self.run_tick().await {
                error!("Polling tick failed: {}", e);
            }
            tokio::time::sleep(self.config.poll_interval()).await;
        }
    }

    /// One polling tick: drain every block confirmed since the last tick.
    ///
    /// A height whose fetch fails is skipped permanently; the cursor still
    /// advances past it.
    pub async fn run_tick(&mut self) -> Result<(), SonifierError> {
        let current = self.rpc.current_height().await?;
        if current <= self.state.last_processed_height {
            return Ok(());
        }

        info!(
            "New block(s) detected, processing {} through {}",
            self.state.last_processed_height + 1,
            current
        );

        for height in self.state.last_processed_height + 1..=current {
            match self.rpc.fetch_block(height).await {
                Ok(block) => self.process_block(&block).await,
                Err(e) => {
                    warn!("Skipping block {}: {}", height, e);
                }
            }
        }

        self.state.last_processed_height = current;
        self.state.ledger.trim();

        Ok(())
    }

    /// Filter, dedup, map, and emit one block's transactions in chain order.
    async fn process_block(&mut self, block: &Block) {
        info!(
            "Block {} has {} transactions",
            block.number,
            block.transactions.len()
        );

        for tx in &block.transactions {
            if self.state.ledger.contains(&tx.hash) {
                continue;
            }
            if tx.value < self.config.min_value_threshold {
                continue;
            }

            self.state.ledger.insert(tx.hash);

            let event = NoteEvent {
                note: map_value_to_note(tx.value, self.config.min_note, self.config.max_note),
                velocity: map_gas_to_velocity(
                    tx.gas_price.unwrap_or_default(),
                    self.config.min_velocity,
                    self.config.max_velocity,
                ),
                instrument: instrument_for(tx),
                duration: map_duration(tx.value),
            };

            self.emitter.emit(&event, tx).await;
        }
    }
}
