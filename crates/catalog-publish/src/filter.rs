use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

/// Selection over the `_id` key. Ranges are inclusive on both ends.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum KeyFilter {
    All,
    Eq(i64),
    Range { min: i64, max: i64 },
}

impl KeyFilter {
    pub fn matches(&self, id: i64) -> bool {
        match self {
            KeyFilter::All => true,
            KeyFilter::Eq(key) => *key == id,
            KeyFilter::Range { min, max } => (*min..=*max).contains(&id),
        }
    }
}

impl From<RangeInclusive<i64>> for KeyFilter {
    fn from(range: RangeInclusive<i64>) -> Self {
        KeyFilter::Range {
            min: *range.start(),
            max: *range.end(),
        }
    }
}
