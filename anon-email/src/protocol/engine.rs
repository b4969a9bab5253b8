//! Blocking request/reply loop.
//!
//! The engine reads one line, answers it with exactly one JSON line and flushes
//! before reading again. The host blocks on every reply, so an unflushed reply
//! stalls the whole pipeline.

use std::{
    any::Any,
    io::{BufRead, Write},
    panic::{self, AssertUnwindSafe},
};

use tracing::{debug, info, trace, warn};

use super::{MessageFilter, reply::Reply};
use crate::error::{MessageError, ProtocolError};

/// Reply written when a message could not be processed.
const UNCHANGED_LINE: &[u8] = b"{}";

/// Lifecycle of an engine.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EngineState {
    /// Created, nothing read yet.
    Init,
    /// Serving requests.
    Running,
    /// Input closed; nothing more will be read.
    Exited,
}

/// Counters for one session, reported when the engine exits.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SessionSummary {
    /// Requests answered.
    pub messages: u64,
    /// Requests answered with a modified message.
    pub modified: u64,
    /// Requests whose processing failed and were answered unchanged.
    pub faults: u64,
}

/// Line protocol engine over any reader/writer pair.
pub struct ProtocolEngine<R, W, F> {
    input: R,
    output: W,
    filter: F,
    state: EngineState,
    summary: SessionSummary,
    buf: Vec<u8>,
}

impl<R, W, F> ProtocolEngine<R, W, F>
where
    R: BufRead,
    W: Write,
    F: MessageFilter,
{
    pub fn new(input: R, output: W, filter: F) -> Self {
        Self {
            input,
            output,
            filter,
            state: EngineState::Init,
            summary: SessionSummary::default(),
            buf: Vec::new(),
        }
    }

    pub const fn state(&self) -> EngineState {
        self.state
    }

    pub const fn summary(&self) -> SessionSummary {
        self.summary
    }

    /// Runs until the input is closed.
    ///
    /// # Errors
    ///
    /// Returns an error only when the channel itself fails; message-level
    /// faults are answered with `{}` and never end the loop.
    pub fn run(&mut self) -> Result<SessionSummary, ProtocolError> {
        if self.state == EngineState::Init {
            self.state = EngineState::Running;
            debug!("protocol engine running");
        }
        while self.state == EngineState::Running {
            self.step()?;
        }
        info!(
            messages = self.summary.messages,
            modified = self.summary.modified,
            faults = self.summary.faults,
            "input closed, exiting"
        );
        Ok(self.summary)
    }

    /// Serves a single request and returns the resulting state.
    ///
    /// Reaching end of input moves the engine to [`EngineState::Exited`] and
    /// performs the final flush.
    pub fn step(&mut self) -> Result<EngineState, ProtocolError> {
        match self.state {
            EngineState::Exited => return Ok(EngineState::Exited),
            EngineState::Init => self.state = EngineState::Running,
            EngineState::Running => {}
        }

        self.buf.clear();
        let read = self
            .input
            .read_until(b'\n', &mut self.buf)
            .map_err(ProtocolError::Read)?;
        if read == 0 {
            self.state = EngineState::Exited;
            self.output.flush().map_err(ProtocolError::Flush)?;
            return Ok(self.state);
        }

        strip_terminator(&mut self.buf);
        let rendered = answer(&self.filter, &self.buf)
            .and_then(|reply| Ok((reply.to_line()?, reply.is_modified())));
        self.summary.messages += 1;

        let line = match rendered {
            Ok((line, modified)) => {
                if modified {
                    self.summary.modified += 1;
                }
                line
            }
            Err(err) => {
                self.summary.faults += 1;
                warn!(error = %err, request = self.summary.messages, "replying unchanged after fault");
                UNCHANGED_LINE.to_vec()
            }
        };

        self.output.write_all(&line).map_err(ProtocolError::Write)?;
        self.output.write_all(b"\n").map_err(ProtocolError::Write)?;
        self.output.flush().map_err(ProtocolError::Flush)?;
        Ok(self.state)
    }

    /// Returns the reader, writer and filter.
    pub fn into_parts(self) -> (R, W, F) {
        (self.input, self.output, self.filter)
    }
}

/// Processes one message behind a fault boundary.
///
/// Invalid UTF-8 and panics inside the filter both become a [`MessageError`].
pub fn answer<F: MessageFilter>(filter: &F, raw: &[u8]) -> Result<Reply, MessageError> {
    let line = std::str::from_utf8(raw).map_err(|err| MessageError::InvalidUtf8 {
        valid_up_to: err.valid_up_to(),
    })?;

    let transformed = panic::catch_unwind(AssertUnwindSafe(|| filter.filter(line)))
        .map_err(|payload| MessageError::Panicked(panic_message(payload.as_ref())))?;

    debug!(
        matches = transformed.matches,
        changed = transformed.changed,
        "message processed"
    );
    if transformed.changed {
        trace!(masked = %transformed.text, "masked message");
    }
    Ok(Reply::from(transformed))
}

/// Drops the trailing `\n`. Anything before it, `\r` included, is content.
fn strip_terminator(buf: &mut Vec<u8>) {
    if buf.last() == Some(&b'\n') {
        buf.pop();
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        (*msg).to_string()
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.clone()
    } else {
        "unknown panic".to_string()
    }
}
