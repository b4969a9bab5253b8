//! Email detection and in-line masking.
//!
//! [`transform`] scans a line for email-shaped substrings and rebuilds it with
//! every address masked by an [`EmailPolicy`]. Text outside the matches is
//! copied through byte-for-byte.

use std::ops::Range;

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use crate::policy::EmailPolicy;

/// Email shape: a local part of `[A-Za-z0-9_.+-]`, `@`, and at least two
/// domain labels of `[A-Za-z0-9-]` joined by dots.
pub const EMAIL_PATTERN: &str =
    r"(?P<local>[a-zA-Z0-9_.+-]+)@(?P<domain>[a-zA-Z0-9-]+(?:\.[a-zA-Z0-9-]+)+)";

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(EMAIL_PATTERN).expect("email pattern is a valid regex"));

/// A located email address within a line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EmailMatch<'a> {
    /// Portion before `@`.
    pub local_part: &'a str,
    /// Portion after `@`.
    pub domain: &'a str,
    /// Byte range of the whole address in the scanned line.
    pub span: Range<usize>,
}

impl<'a> EmailMatch<'a> {
    fn from_captures(caps: &Captures<'a>) -> Option<Self> {
        let whole = caps.get(0)?;
        Some(Self {
            local_part: caps.name("local")?.as_str(),
            domain: caps.name("domain")?.as_str(),
            span: whole.range(),
        })
    }

    /// Masked replacement for this address.
    #[must_use]
    pub fn masked(&self, policy: &EmailPolicy) -> String {
        policy.mask(self.local_part, self.domain)
    }
}

/// Result of anonymizing one line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Transformed {
    /// Whether `text` differs from the input.
    pub changed: bool,
    /// The reconstructed line.
    pub text: String,
    /// Number of addresses found.
    pub matches: usize,
}

/// Finds every email-shaped substring, left to right and non-overlapping.
pub fn find_emails(line: &str) -> Vec<EmailMatch<'_>> {
    EMAIL_RE
        .captures_iter(line)
        .filter_map(|caps| EmailMatch::from_captures(&caps))
        .collect()
}

/// Masks every email address in `line` according to `policy`.
///
/// # Example
/// ```
/// use anon_email::{EmailPolicy, transform};
///
/// let out = transform("login by john.doe@example.com ok", &EmailPolicy::default());
/// assert!(out.changed);
/// assert_eq!(out.text, "login by j******e@e******.com ok");
/// ```
pub fn transform(line: &str, policy: &EmailPolicy) -> Transformed {
    let mut text = String::with_capacity(line.len());
    let mut last = 0;
    let mut matches = 0;

    for found in find_emails(line) {
        text.push_str(&line[last..found.span.start]);
        text.push_str(&found.masked(policy));
        last = found.span.end;
        matches += 1;
    }
    text.push_str(&line[last..]);

    Transformed {
        changed: text != line,
        text,
        matches,
    }
}
