//! # **TimeUnits Module** - *Temporal resolutions*
//!
//! `TimeUnit` parameterises `Time32`, `Time64`, and `Timestamp` logical types, and records
//! the implicit resolution of `Date32` (days) and `Date64` (milliseconds).

use std::fmt::{Display, Formatter, Result as FmtResult};

/// # TimeUnit
///
/// Resolution of a temporal value.
///
/// ## Behaviour
/// - Stored on every `DatetimeArray`, so the logical type of a temporal array is fully
///   recoverable from the array itself.
/// - Valid combinations are enforced by `LogicalType::validate`: `Time32` takes seconds or
///   milliseconds, `Time64` takes micro or nanoseconds, `Timestamp` takes anything but days.
#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug, Default)]
pub enum TimeUnit {
    Seconds,
    Milliseconds,
    Microseconds,
    Nanoseconds,
    /// Only used by `Date32`.
    #[default]
    Days,
}

impl TimeUnit {
    /// Short suffix used in type names, e.g. `timestamp[ms]`.
    pub fn suffix(&self) -> &'static str {
        match self {
            TimeUnit::Seconds => "s",
            TimeUnit::Milliseconds => "ms",
            TimeUnit::Microseconds => "us",
            TimeUnit::Nanoseconds => "ns",
            TimeUnit::Days => "d",
        }
    }

    /// Inverse of [`TimeUnit::suffix`].
    pub fn from_suffix(s: &str) -> Option<Self> {
        match s {
            "s" => Some(TimeUnit::Seconds),
            "ms" => Some(TimeUnit::Milliseconds),
            "us" => Some(TimeUnit::Microseconds),
            "ns" => Some(TimeUnit::Nanoseconds),
            "d" => Some(TimeUnit::Days),
            _ => None,
        }
    }

    /// Nanoseconds per unit.
    pub fn nanos(&self) -> i64 {
        match self {
            TimeUnit::Seconds => 1_000_000_000,
            TimeUnit::Milliseconds => 1_000_000,
            TimeUnit::Microseconds => 1_000,
            TimeUnit::Nanoseconds => 1,
            TimeUnit::Days => 86_400_000_000_000,
        }
    }
}

impl Display for TimeUnit {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.suffix())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_suffix_roundtrip() {
        for u in [
            TimeUnit::Seconds,
            TimeUnit::Milliseconds,
            TimeUnit::Microseconds,
            TimeUnit::Nanoseconds,
            TimeUnit::Days,
        ] {
            assert_eq!(TimeUnit::from_suffix(u.suffix()), Some(u));
        }
        assert_eq!(TimeUnit::from_suffix("h"), None);
    }

    #[test]
    fn test_nanos() {
        assert_eq!(TimeUnit::Milliseconds.nanos() * 1000, TimeUnit::Seconds.nanos());
    }
}
