//! Email address masking policy.
//!
//! An [`EmailPolicy`] is the immutable configuration of the filter: one
//! [`RevealConfig`] for the local part and one for the domain. It is built once
//! at startup and passed by reference into every anonymization call.

use super::text::RevealConfig;

/// Default number of leading local-part characters left visible.
pub const DEFAULT_LOCAL_PREFIX: usize = 1;
/// Default number of trailing local-part characters left visible.
pub const DEFAULT_LOCAL_SUFFIX: usize = 1;
/// Default number of leading domain characters left visible.
pub const DEFAULT_DOMAIN_PREFIX: usize = 1;
/// Default number of trailing domain characters left visible (e.g. `.com`).
pub const DEFAULT_DOMAIN_SUFFIX: usize = 4;

/// Reveal windows for both halves of an email address.
///
/// # Example
/// ```
/// use anon_email::EmailPolicy;
///
/// let policy = EmailPolicy::default();
/// assert_eq!(policy.mask("john.doe", "example.com"), "j******e@e******.com");
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EmailPolicy {
    local: RevealConfig,
    domain: RevealConfig,
}

impl EmailPolicy {
    /// Creates a policy from the four reveal counts.
    #[must_use]
    pub const fn new(
        local_prefix: usize,
        local_suffix: usize,
        domain_prefix: usize,
        domain_suffix: usize,
    ) -> Self {
        Self {
            local: RevealConfig::new(local_prefix, local_suffix),
            domain: RevealConfig::new(domain_prefix, domain_suffix),
        }
    }

    /// Uses a specific masking character for both halves.
    #[must_use]
    pub fn with_mask_char(mut self, mask_char: char) -> Self {
        self.local.set_mask_char(mask_char);
        self.domain.set_mask_char(mask_char);
        self
    }

    pub const fn local(&self) -> &RevealConfig {
        &self.local
    }

    pub const fn domain(&self) -> &RevealConfig {
        &self.domain
    }

    pub const fn mask_char(&self) -> char {
        self.local.mask_char()
    }

    /// Masks both halves independently and rejoins them with `@`.
    #[must_use]
    pub fn mask(&self, local_part: &str, domain: &str) -> String {
        let local_part = self.local.apply_to(local_part);
        let domain = self.domain.apply_to(domain);
        format!("{local_part}@{domain}")
    }
}

impl Default for EmailPolicy {
    fn default() -> Self {
        Self::new(
            DEFAULT_LOCAL_PREFIX,
            DEFAULT_LOCAL_SUFFIX,
            DEFAULT_DOMAIN_PREFIX,
            DEFAULT_DOMAIN_SUFFIX,
        )
    }
}
