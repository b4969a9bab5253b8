//! Masking policies: the per-token reveal window and the email policy built
//! from two of them.
//!
//! - **Text policy** (`text`): [`RevealConfig`] masks the middle of one token.
//! - **Email policy** (`email`): [`EmailPolicy`] pairs a local-part window with
//!   a domain window and is the filter's whole configuration.

pub mod email;
pub mod text;

pub use email::{
    DEFAULT_DOMAIN_PREFIX, DEFAULT_DOMAIN_SUFFIX, DEFAULT_LOCAL_PREFIX, DEFAULT_LOCAL_SUFFIX,
    EmailPolicy,
};
pub use text::{MASK_CHAR, MIN_HIDDEN, RevealConfig};
