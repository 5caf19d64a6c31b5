//! This module defines the unit types used for durations in the schedule.
use chrono::TimeDelta;
use serde::{Deserialize, Serialize};

/// The number of milliseconds in a day
const MILLISECONDS_PER_DAY: f64 = 24.0 * 60.0 * 60.0 * 1000.0;

/// A duration measured in (possibly fractional) days.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    PartialOrd,
    Serialize,
    Deserialize,
    derive_more::Add,
    derive_more::Sub,
    derive_more::Display,
)]
#[serde(transparent)]
pub struct Days(pub f64);

impl Days {
    /// Zero days
    pub const ZERO: Days = Days(0.0);

    /// Creates a new instance from a f64 value.
    pub fn new(val: f64) -> Self {
        Self(val)
    }

    /// Returns the value as a f64.
    pub fn value(self) -> f64 {
        self.0
    }

    /// Whether the value is finite (i.e. not infinite or NaN)
    pub fn is_finite(self) -> bool {
        self.0.is_finite()
    }

    /// Convert to a [`TimeDelta`] with millisecond resolution.
    ///
    /// Fractions of a millisecond are truncated towards zero.
    #[allow(clippy::cast_possible_truncation)]
    pub fn to_time_delta(self) -> TimeDelta {
        TimeDelta::milliseconds((self.0 * MILLISECONDS_PER_DAY) as i64)
    }
}

impl From<f64> for Days {
    fn from(val: f64) -> Self {
        Self(val)
    }
}

impl From<Days> for f64 {
    fn from(val: Days) -> Self {
        val.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0.0, 0)]
    #[case(1.0, 86_400_000)]
    #[case(0.5, 43_200_000)]
    #[case(1.2, 103_680_000)]
    #[case(-1.0, -86_400_000)]
    fn test_to_time_delta(#[case] days: f64, #[case] expected_ms: i64) {
        assert_eq!(
            Days(days).to_time_delta(),
            TimeDelta::milliseconds(expected_ms)
        );
    }

    #[test]
    fn test_add_sub() {
        assert_eq!(Days(1.5) + Days(0.5), Days(2.0));
        assert_eq!(Days(1.5) - Days(0.5), Days(1.0));
    }
}
