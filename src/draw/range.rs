//! Range configuration and the candidate set derived from it.

use super::error::DrawError;
use serde::{Deserialize, Serialize};

/// Inclusive numeric range with one excluded "lucky number".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RangeConfig {
    /// Lower bound, inclusive.
    pub min: i64,
    /// Upper bound, inclusive.
    pub max: i64,
    /// Value never drawn.
    pub excluded: i64,
}

impl Default for RangeConfig {
    fn default() -> Self {
        Self {
            min: 1,
            max: 100,
            excluded: 7,
        }
    }
}

impl RangeConfig {
    /// Creates a range configuration without validating it.
    pub fn new(min: i64, max: i64, excluded: i64) -> Self {
        Self { min, max, excluded }
    }

    /// Parses raw form input. Surrounding whitespace is ignored.
    pub fn parse(min: &str, max: &str, excluded: &str) -> Result<Self, DrawError> {
        Ok(Self {
            min: parse_field("min", min)?,
            max: parse_field("max", max)?,
            excluded: parse_field("excluded", excluded)?,
        })
    }

    /// Validates the range and derives its candidate set.
    pub fn candidates(&self) -> Result<CandidateSet, DrawError> {
        CandidateSet::new(self)
    }
}

fn parse_field(field: &'static str, input: &str) -> Result<i64, DrawError> {
    input
        .trim()
        .parse::<i64>()
        .map_err(|_| DrawError::InvalidNumber {
            field,
            input: input.to_string(),
        })
}

/// Integers in `[min, max]` minus the excluded value, in ascending order.
///
/// Stored as bounds plus an optional hole so indexing is constant time
/// and wide ranges never allocate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CandidateSet {
    min: i64,
    max: i64,
    excluded: i64,
    /// Present only when the excluded value lies inside the range.
    hole: Option<i64>,
    len: u64,
}

impl CandidateSet {
    /// Validates `range` and builds its candidate set.
    pub fn new(range: &RangeConfig) -> Result<Self, DrawError> {
        let RangeConfig { min, max, excluded } = *range;

        if min >= max {
            return Err(DrawError::InvalidRange { min, max });
        }

        let span = max as i128 - min as i128 + 1;
        let hole = (min..=max).contains(&excluded).then_some(excluded);
        let len = span - i128::from(hole.is_some());

        // Indices must survive the round trip through f64 in winner selection.
        if len > (1i128 << 53) {
            return Err(DrawError::RangeTooWide { min, max });
        }
        if len <= 0 {
            return Err(DrawError::EmptyCandidateSet { min, max, excluded });
        }

        Ok(Self {
            min,
            max,
            excluded,
            hole,
            len: len as u64,
        })
    }

    /// Number of candidates. Never zero.
    #[inline]
    pub fn len(&self) -> u64 {
        self.len
    }

    /// Always false; kept for API symmetry with `len`.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the candidate at `index`, or `None` past the end.
    pub fn get(&self, index: u64) -> Option<i64> {
        if index >= self.len {
            return None;
        }
        let value = self.min as i128 + index as i128;
        let value = match self.hole {
            Some(hole) if value >= hole as i128 => value + 1,
            _ => value,
        };
        Some(value as i64)
    }

    /// Returns true if `value` is a candidate.
    pub fn contains(&self, value: i64) -> bool {
        (self.min..=self.max).contains(&value) && self.hole != Some(value)
    }

    /// The single candidate, if there is exactly one.
    pub fn sole(&self) -> Option<i64> {
        (self.len == 1).then(|| self.get(0)).flatten()
    }

    /// Iterates the candidates in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = i64> + '_ {
        (0..self.len).filter_map(move |i| self.get(i))
    }

    /// Collects the candidates into a vector.
    pub fn to_vec(&self) -> Vec<i64> {
        self.iter().collect()
    }

    /// Lower bound of the originating range.
    pub fn min(&self) -> i64 {
        self.min
    }

    /// Upper bound of the originating range.
    pub fn max(&self) -> i64 {
        self.max
    }

    /// Excluded value of the originating range.
    pub fn excluded(&self) -> i64 {
        self.excluded
    }
}
