//! Error types.
//!
//! [`MessageError`] covers faults confined to a single message; the protocol
//! engine answers those with an unchanged reply and keeps going.
//! [`ProtocolError`] covers failures of the channel to the host itself.

use std::io;

use thiserror::Error;

/// A fault while processing one message.
#[derive(Debug, Error)]
pub enum MessageError {
    /// The line was not valid UTF-8.
    #[error("message is not valid UTF-8 (byte {valid_up_to})")]
    InvalidUtf8 { valid_up_to: usize },

    /// Masking panicked.
    #[error("masking panicked: {0}")]
    Panicked(String),

    /// The reply could not be serialized.
    #[error("failed to serialize reply: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// A failure talking to the host. These end the session.
#[derive(Debug, Error)]
pub enum ProtocolError {
    #[error("failed to read request: {0}")]
    Read(#[source] io::Error),

    #[error("failed to write reply: {0}")]
    Write(#[source] io::Error),

    #[error("failed to flush reply: {0}")]
    Flush(#[source] io::Error),
}
