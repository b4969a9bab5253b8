//! Host line protocol.
//!
//! - **`engine`**: the request/reply state machine ([`ProtocolEngine`])
//! - **`reply`**: reply encoding ([`Reply`])
//!
//! The filter applied to each message sits behind [`MessageFilter`], so the
//! engine can be driven with any transformation.

mod engine;
mod reply;

use std::io;

pub use engine::{EngineState, ProtocolEngine, SessionSummary, answer};
pub use reply::Reply;

use crate::{
    anonymizer::{Transformed, transform},
    error::ProtocolError,
    policy::EmailPolicy,
};

/// Transformation applied to each message.
pub trait MessageFilter {
    /// Filters one message (without its line terminator).
    fn filter(&self, line: &str) -> Transformed;
}

impl MessageFilter for EmailPolicy {
    fn filter(&self, line: &str) -> Transformed {
        transform(line, self)
    }
}

/// Serves the host over the process's standard input and output until the
/// host closes its side.
///
/// # Errors
///
/// Fails only when standard input or output fails.
pub fn serve_stdio(policy: EmailPolicy) -> Result<SessionSummary, ProtocolError> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    ProtocolEngine::new(stdin.lock(), stdout.lock(), policy).run()
}
