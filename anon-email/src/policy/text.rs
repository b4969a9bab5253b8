//! Character-level masking of a single token.
//!
//! [`RevealConfig`] keeps a window of leading and trailing characters visible
//! and replaces the middle with a mask character. Tokens too short to hide at
//! least [`MIN_HIDDEN`] characters collapse to a single mask character, which
//! also hides their length.

/// Default character used to mask hidden characters.
pub const MASK_CHAR: char = '*';

/// Minimum number of characters that must stay hidden for a token to keep its
/// shape. Anything shorter collapses to one mask character.
pub const MIN_HIDDEN: usize = 2;

/// Keeps a prefix and a suffix visible while masking everything in between.
///
/// The policy operates on Unicode scalar values.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RevealConfig {
    /// Number of leading characters to keep visible.
    visible_prefix: usize,
    /// Number of trailing characters to keep visible.
    visible_suffix: usize,
    /// Symbol used to mask the middle.
    mask_char: char,
}

impl RevealConfig {
    /// Keeps `visible_prefix` leading and `visible_suffix` trailing characters.
    #[must_use]
    pub const fn new(visible_prefix: usize, visible_suffix: usize) -> Self {
        Self {
            visible_prefix,
            visible_suffix,
            mask_char: MASK_CHAR,
        }
    }

    /// Uses a specific masking character.
    #[must_use]
    pub fn with_mask_char(mut self, mask_char: char) -> Self {
        self.mask_char = mask_char;
        self
    }

    /// Sets the masking character in place.
    pub(crate) fn set_mask_char(&mut self, mask_char: char) {
        self.mask_char = mask_char;
    }

    pub const fn visible_prefix(&self) -> usize {
        self.visible_prefix
    }

    pub const fn visible_suffix(&self) -> usize {
        self.visible_suffix
    }

    pub const fn mask_char(&self) -> char {
        self.mask_char
    }

    /// Applies the policy to `value`.
    ///
    /// When fewer than [`MIN_HIDDEN`] characters would be hidden (including
    /// when the reveal window is wider than the value), the result is a single
    /// mask character regardless of the input length.
    #[must_use]
    pub fn apply_to(&self, value: &str) -> String {
        let mut chars: Vec<char> = value.chars().collect();
        let total = chars.len();

        let revealed = self.visible_prefix.saturating_add(self.visible_suffix);
        if total.saturating_sub(revealed) < MIN_HIDDEN {
            return self.mask_char.to_string();
        }

        // revealed <= total - MIN_HIDDEN here, so both bounds are in range
        for ch in &mut chars[self.visible_prefix..(total - self.visible_suffix)] {
            *ch = self.mask_char;
        }
        chars.into_iter().collect()
    }
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self::new(1, 1)
    }
}
