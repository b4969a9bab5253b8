//! Replies sent back to the host.
//!
//! The host expects one JSON object per line: `{}` when the message is left
//! alone, or `{"msg": "..."}` carrying the replacement text.

use std::io;

use serde::Serialize;
use serde_json::ser::Formatter;

use crate::{anonymizer::Transformed, error::MessageError};

/// A reply to a single message.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Reply {
    /// Message modified; carries the fully reconstructed line.
    Modified { msg: String },
    /// Message unchanged. Serializes as `{}`.
    Unchanged {},
}

impl Reply {
    /// Serializes the reply to a single JSON line, without the terminator.
    ///
    /// serde_json escapes control characters, so the result never contains a
    /// line break.
    pub fn to_line(&self) -> Result<Vec<u8>, MessageError> {
        let mut buf = Vec::with_capacity(64);
        let mut ser = serde_json::Serializer::with_formatter(&mut buf, ReplyFormatter);
        self.serialize(&mut ser)?;
        Ok(buf)
    }

    pub const fn is_modified(&self) -> bool {
        matches!(self, Self::Modified { .. })
    }
}

impl From<Transformed> for Reply {
    fn from(transformed: Transformed) -> Self {
        if transformed.changed {
            Self::Modified {
                msg: transformed.text,
            }
        } else {
            Self::Unchanged {}
        }
    }
}

/// Compact JSON with a space after each key separator (`{"msg": "..."}`).
#[derive(Clone, Copy, Debug, Default)]
struct ReplyFormatter;

impl Formatter for ReplyFormatter {
    fn begin_object_value<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        writer.write_all(b": ")
    }
}
