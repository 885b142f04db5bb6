//! # Domain Errors
//!
//! Error types for the sonification pipeline.

use thiserror::Error;

/// Pipeline error types.
#[derive(Debug, Error)]
pub enum SonifierError {
    /// Transport-level failure talking to the Ethereum node.
    #[error("RPC transport error: {0}")]
    Transport(String),

    /// The node answered with a JSON-RPC error object.
    #[error("RPC error {code}: {message}")]
    Rpc {
        /// JSON-RPC error code
        code: i64,
        /// JSON-RPC error message
        message: String,
    },

    /// The node answered without a result payload.
    #[error("RPC response missing result")]
    MissingResult,

    /// A hex-encoded quantity could not be parsed.
    #[error("Invalid hex quantity: {0}")]
    InvalidQuantity(String),

    /// The requested block does not exist on the node.
    #[error("Block not found at height {0}")]
    BlockNotFound(u64),

    /// Failure sending a control message to the sound process.
    #[error("Control message send failed: {0}")]
    Send(String),
}
