//! Email address anonymizer for rsyslog's external message modification
//! interface (`mmexternal`).
//!
//! The host sends one log message per line on standard input and blocks until
//! it reads one JSON reply line on standard output. For every email address
//! found in the message, this crate keeps a few leading and trailing
//! characters of the local part and of the domain and masks the rest:
//!
//! ```rust
//! use anon_email::{EmailPolicy, Reply, transform};
//!
//! let policy = EmailPolicy::default(); // reveal 1/1 of the local part, 1/4 of the domain
//! let out = transform("user john.doe@example.com logged in", &policy);
//! assert_eq!(out.text, "user j******e@e******.com logged in");
//!
//! let reply = Reply::from(out).to_line().unwrap();
//! assert_eq!(reply, br#"{"msg": "user j******e@e******.com logged in"}"#);
//! ```
//!
//! What this crate does:
//! - masks email-shaped substrings by position (`policy`, `anonymizer`)
//! - speaks the one-request/one-reply line protocol (`protocol`)
//! - loads the reveal counts permissively from startup values (`config`)
//!
//! What it does not do:
//! - validate addresses against the full mail grammar
//! - detect any other kind of personal data
//! - provide cryptographic anonymization; masking is visual redaction only

// <https://doc.rust-lang.org/rustc/lints/listing/allowed-by-default.html>
#![warn(
    anonymous_parameters,
    bare_trait_objects,
    elided_lifetimes_in_paths,
    missing_copy_implementations,
    rust_2018_idioms,
    trivial_casts,
    trivial_numeric_casts,
    unreachable_pub,
    unsafe_code,
    unused_extern_crates,
    unused_import_braces
)]
// <https://rust-lang.github.io/rust-clippy/stable>
#![warn(
    clippy::all,
    clippy::cargo,
    clippy::dbg_macro,
    clippy::float_cmp_const,
    clippy::get_unwrap,
    clippy::mem_forget,
    clippy::nursery,
    clippy::pedantic,
    clippy::todo,
    clippy::unwrap_used,
    clippy::uninlined_format_args
)]
// Allow some clippy lints
#![allow(
    clippy::default_trait_access,
    clippy::doc_markdown,
    clippy::module_name_repetitions,
    clippy::multiple_crate_versions,
    clippy::must_use_candidate,
    clippy::cargo_common_metadata,
    clippy::missing_errors_doc,
    clippy::missing_const_for_fn,
    clippy::redundant_pub_crate,
    clippy::option_if_let_else
)]
// Allow some lints while testing
#![cfg_attr(test, allow(clippy::non_ascii_literal, clippy::unwrap_used))]

pub mod anonymizer;
pub mod config;
pub mod error;
pub mod policy;
pub mod protocol;

pub use anonymizer::{EMAIL_PATTERN, EmailMatch, Transformed, find_emails, transform};
pub use config::RawSettings;
pub use error::{MessageError, ProtocolError};
pub use policy::{EmailPolicy, MASK_CHAR, RevealConfig};
pub use protocol::{
    EngineState, MessageFilter, ProtocolEngine, Reply, SessionSummary, serve_stdio,
};
