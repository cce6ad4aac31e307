//! Key universe and value synthesis.

use std::ops::Range;

use trace::Key;

/// Leading text of every synthesized value.
pub const VALUE_PREFIX: &str = "RND_DATA_";

/// Filler character appended after the generation index.
pub const VALUE_FILL: char = 'R';

/// Combined width of the generation index and its filler.
pub const VALUE_PAD_WIDTH: usize = 80;

/// Length of every synthesized value: prefix, index plus filler, separator.
pub const VALUE_LEN: usize = VALUE_PREFIX.len() + VALUE_PAD_WIDTH + 1;

/// The key universe `[0, records)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyDomain {
    records: u64,
}

impl KeyDomain {
    #[must_use]
    pub const fn new(records: u64) -> Self {
        Self { records }
    }

    /// Number of keys, `N`.
    #[must_use]
    pub const fn len(&self) -> u64 {
        self.records
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.records == 0
    }

    /// Keys in generation order.
    #[must_use]
    pub const fn keys(&self) -> Range<Key> {
        0..self.records
    }

    /// Builds the payload for generation index `index`.
    ///
    /// The value is `RND_DATA_{index}_` followed by `80 - digits(index)` filler
    /// characters, so every value has length [`VALUE_LEN`] whatever the index.
    #[must_use]
    pub fn synthesize_value(&self, index: u64) -> String {
        synthesize_value(index)
    }

    #[must_use]
    pub const fn value_len(&self) -> usize {
        VALUE_LEN
    }
}

/// Builds the payload for generation index `index`.
#[must_use]
pub fn synthesize_value(index: u64) -> String {
    let digits = index.to_string();
    let fill = VALUE_PAD_WIDTH.saturating_sub(digits.len());

    let mut value = String::with_capacity(VALUE_LEN);
    value.push_str(VALUE_PREFIX);
    value.push_str(&digits);
    value.push('_');
    value.extend(std::iter::repeat(VALUE_FILL).take(fill));
    value
}
