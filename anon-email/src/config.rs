//! Startup configuration loading.
//!
//! The filter takes up to four reveal counts in a fixed order:
//! local-part prefix, local-part suffix, domain prefix, domain suffix.
//! Every value is optional and parsed permissively: anything that is not a
//! non-negative integer silently falls back to that field's default, so a bad
//! command line never keeps the host's pipeline from starting.

use std::num::IntErrorKind;

use tracing::debug;

use crate::policy::{
    DEFAULT_DOMAIN_PREFIX, DEFAULT_DOMAIN_SUFFIX, DEFAULT_LOCAL_PREFIX, DEFAULT_LOCAL_SUFFIX,
    EmailPolicy, MASK_CHAR,
};

/// Environment variables consulted for each positional, in positional order.
pub const REVEAL_ENV_VARS: [&str; 4] = [
    "ANON_EMAIL_LOCAL_PREFIX",
    "ANON_EMAIL_LOCAL_SUFFIX",
    "ANON_EMAIL_DOMAIN_PREFIX",
    "ANON_EMAIL_DOMAIN_SUFFIX",
];

/// Environment variable holding the mask character.
pub const MASK_CHAR_ENV_VAR: &str = "ANON_EMAIL_MASK_CHAR";

const FIELD_NAMES: [&str; 4] = ["local_prefix", "local_suffix", "domain_prefix", "domain_suffix"];

const FIELD_DEFAULTS: [usize; 4] = [
    DEFAULT_LOCAL_PREFIX,
    DEFAULT_LOCAL_SUFFIX,
    DEFAULT_DOMAIN_PREFIX,
    DEFAULT_DOMAIN_SUFFIX,
];

/// Unvalidated startup values, exactly as they arrived.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RawSettings {
    /// Reveal counts in positional order.
    pub reveal: [Option<String>; 4],
    /// Requested mask character; only the first character is used.
    pub mask_char: Option<String>,
}

impl RawSettings {
    /// Builds settings from bare positional values, ignoring anything past the
    /// fourth.
    pub fn from_positionals<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut reveal: [Option<String>; 4] = Default::default();
        for (slot, value) in reveal.iter_mut().zip(values) {
            *slot = Some(value.into());
        }
        Self {
            reveal,
            mask_char: None,
        }
    }

    /// Fills positions that were not given on the command line from `lookup`,
    /// keyed by [`REVEAL_ENV_VARS`] and [`MASK_CHAR_ENV_VAR`].
    #[must_use]
    pub fn or_lookup<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        for (slot, var) in self.reveal.iter_mut().zip(REVEAL_ENV_VARS) {
            if slot.is_none() {
                *slot = lookup(var);
            }
        }
        if self.mask_char.is_none() {
            self.mask_char = lookup(MASK_CHAR_ENV_VAR);
        }
        self
    }

    /// Same as [`RawSettings::or_lookup`] against the process environment.
    #[must_use]
    pub fn or_env(self) -> Self {
        self.or_lookup(|var| std::env::var(var).ok())
    }

    /// Resolves the raw values into a complete policy. Never fails.
    pub fn resolve(&self) -> EmailPolicy {
        let mut counts = FIELD_DEFAULTS;
        for ((count, field), raw) in counts.iter_mut().zip(FIELD_NAMES).zip(&self.reveal) {
            *count = parse_reveal_count(field, raw.as_deref(), *count);
        }
        let [local_prefix, local_suffix, domain_prefix, domain_suffix] = counts;

        EmailPolicy::new(local_prefix, local_suffix, domain_prefix, domain_suffix)
            .with_mask_char(parse_mask_char(self.mask_char.as_deref()))
    }
}

/// Parses one reveal count, falling back to `default` on anything that is not
/// a non-negative integer.
///
/// Integers too large for `usize` saturate rather than fall back, and a
/// negative zero (`-0`, `-000`) is zero: both still ask for less to be
/// revealed than the default.
pub fn parse_reveal_count(field: &str, raw: Option<&str>, default: usize) -> usize {
    let Some(raw) = raw else {
        return default;
    };
    let value = raw.trim();
    if value
        .strip_prefix('-')
        .is_some_and(|digits| !digits.is_empty() && digits.bytes().all(|byte| byte == b'0'))
    {
        return 0;
    }
    match value.parse::<usize>() {
        Ok(count) => count,
        Err(err) if *err.kind() == IntErrorKind::PosOverflow => usize::MAX,
        Err(err) => {
            debug!(field, value = raw, error = %err, default, "using default reveal count");
            default
        }
    }
}

fn parse_mask_char(raw: Option<&str>) -> char {
    raw.and_then(|value| value.chars().next())
        .filter(|ch| !ch.is_control())
        .unwrap_or(MASK_CHAR)
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    #[test]
    fn no_values_yields_defaults() {
        let policy = RawSettings::default().resolve();
        assert_eq!(policy, EmailPolicy::default());
        assert_eq!(policy.domain().visible_suffix(), 4);
    }

    #[test]
    fn positionals_fill_fields_in_order() {
        let policy = RawSettings::from_positionals(["2", "3", "0", "5"]).resolve();
        assert_eq!(policy, EmailPolicy::new(2, 3, 0, 5));
    }

    #[test]
    fn bad_values_fall_back_per_field() {
        let policy = RawSettings::from_positionals(["-5", "abc", "", "3.5"]).resolve();
        assert_eq!(policy, EmailPolicy::default());

        let policy = RawSettings::from_positionals(["7", "-1"]).resolve();
        assert_eq!(policy, EmailPolicy::new(7, 1, 1, 4));
    }

    #[test]
    fn surrounding_whitespace_is_ignored() {
        assert_eq!(parse_reveal_count("local_prefix", Some(" 3 "), 1), 3);
        assert_eq!(parse_reveal_count("local_prefix", Some("+2"), 1), 2);
    }

    #[test]
    fn oversized_counts_saturate() {
        assert_eq!(
            parse_reveal_count("local_suffix", Some("99999999999999999999999"), 1),
            usize::MAX
        );
        // Still not a non-negative integer
        assert_eq!(
            parse_reveal_count("local_suffix", Some("-99999999999999999999999"), 1),
            1
        );
    }

    #[test]
    fn negative_zero_is_zero() {
        assert_eq!(parse_reveal_count("local_prefix", Some("-0"), 1), 0);
        assert_eq!(parse_reveal_count("local_prefix", Some(" -000 "), 1), 0);
        assert_eq!(parse_reveal_count("local_prefix", Some("-"), 1), 1);
        assert_eq!(parse_reveal_count("local_prefix", Some("-01"), 1), 1);
    }

    #[test]
    fn oversized_and_negative_zero_hide_more_not_less() {
        let policy = RawSettings::from_positionals(["-0", "99999999999999999999999"]).resolve();
        assert_eq!(policy.local().visible_prefix(), 0);
        assert_eq!(policy.local().visible_suffix(), usize::MAX);
        assert_eq!(policy.mask("john.doe", "example.com"), "*@e******.com");
    }

    #[test]
    fn values_past_the_fourth_are_ignored() {
        let policy = RawSettings::from_positionals(["0", "0", "0", "0", "9"]).resolve();
        assert_eq!(policy, EmailPolicy::new(0, 0, 0, 0));
    }

    #[test]
    fn lookup_only_fills_missing_positions() {
        let env: HashMap<&str, &str> = HashMap::from([
            ("ANON_EMAIL_LOCAL_PREFIX", "9"),
            ("ANON_EMAIL_DOMAIN_SUFFIX", "2"),
            ("ANON_EMAIL_MASK_CHAR", "#"),
        ]);
        let settings = RawSettings::from_positionals(["3"])
            .or_lookup(|var| env.get(var).map(|value| (*value).to_string()));

        let policy = settings.resolve();
        assert_eq!(policy.local().visible_prefix(), 3);
        assert_eq!(policy.domain().visible_suffix(), 2);
        assert_eq!(policy.mask_char(), '#');
    }

    #[test]
    fn mask_char_uses_first_character_or_default() {
        assert_eq!(parse_mask_char(Some("xy")), 'x');
        assert_eq!(parse_mask_char(Some("")), MASK_CHAR);
        assert_eq!(parse_mask_char(Some("\n")), MASK_CHAR);
        assert_eq!(parse_mask_char(None), MASK_CHAR);
    }
}
