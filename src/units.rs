//! Time unit arithmetic: conversions between milliseconds and named units.

use std::str::FromStr;

use crate::parse::ParseError;

pub const MILLIS_IN_SEC: i64 = 1000;
pub const SECS_IN_MIN: i64 = 60;
pub const MINS_IN_HOUR: i64 = 60;
pub const HOURS_IN_DAY: i64 = 24;

pub const MILLIS_IN_MIN: i64 = MILLIS_IN_SEC * SECS_IN_MIN;
pub const MILLIS_IN_HOUR: i64 = MILLIS_IN_MIN * MINS_IN_HOUR;
pub const MILLIS_IN_DAY: i64 = MILLIS_IN_HOUR * HOURS_IN_DAY;

/// A unit of duration, from milliseconds up to days.
///
/// The ordering follows significance: `Milli < Sec < Min < Hour < Day`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TimeUnit {
    Milli,
    Sec,
    Min,
    Hour,
    Day,
}

impl TimeUnit {
    pub const MILLI_TOKENS: [&'static str; 7] = [
        "ms",
        "milli",
        "millis",
        "millisec",
        "millisecs",
        "millisecond",
        "milliseconds",
    ];
    pub const SEC_TOKENS: [&'static str; 5] = ["s", "sec", "secs", "second", "seconds"];
    pub const MIN_TOKENS: [&'static str; 5] = ["m", "min", "mins", "minute", "minutes"];
    pub const HOUR_TOKENS: [&'static str; 5] = ["h", "hr", "hrs", "hour", "hours"];
    pub const DAY_TOKENS: [&'static str; 3] = ["d", "day", "days"];

    const fn index(self) -> u8 {
        match self {
            Self::Milli => 0,
            Self::Sec => 1,
            Self::Min => 2,
            Self::Hour => 3,
            Self::Day => 4,
        }
    }

    const fn from_index(index: u8) -> Option<Self> {
        match index {
            0 => Some(Self::Milli),
            1 => Some(Self::Sec),
            2 => Some(Self::Min),
            3 => Some(Self::Hour),
            4 => Some(Self::Day),
            _ => None,
        }
    }

    /// The unit one step more significant, or `None` for `Day`.
    pub const fn larger_unit(self) -> Option<Self> {
        Self::from_index(self.index().saturating_add(1))
    }

    /// The unit one step less significant, or `None` for `Milli`.
    pub const fn smaller_unit(self) -> Option<Self> {
        Self::from_index(self.index().wrapping_sub(1))
    }

    /// The unit `n` steps more significant than `Sec`, if it exists.
    ///
    /// Used by the parser to map a separator count onto the leading unit
    /// of a colon notation (`1` -> `Min`, `2` -> `Hour`, `3` -> `Day`).
    pub const fn above_secs(n: u8) -> Option<Self> {
        Self::from_index(Self::Sec.index().saturating_add(n))
    }

    /// Milliseconds in one of this unit.
    pub const fn millis(self) -> i64 {
        match self {
            Self::Milli => 1,
            Self::Sec => MILLIS_IN_SEC,
            Self::Min => MILLIS_IN_MIN,
            Self::Hour => MILLIS_IN_HOUR,
            Self::Day => MILLIS_IN_DAY,
        }
    }

    /// How many of this unit fit in the next larger unit.
    ///
    /// `Day` has no larger unit and reports 0.
    pub const fn per_larger(self) -> i64 {
        match self {
            Self::Milli => MILLIS_IN_SEC,
            Self::Sec => SECS_IN_MIN,
            Self::Min => MINS_IN_HOUR,
            Self::Hour => HOURS_IN_DAY,
            Self::Day => 0,
        }
    }

    /// Converts a count of this unit into milliseconds.
    pub fn to_millis(self, value: f64) -> f64 {
        value * self.millis() as f64
    }

    /// Converts a millisecond count into this unit.
    pub fn from_millis(self, ms: f64) -> f64 {
        ms / self.millis() as f64
    }
}

/// Converts a count of `from` units into `to` units.
///
/// Fractional values are carried through, e.g. 90 seconds is 1.5 minutes.
pub fn convert(value: f64, from: TimeUnit, to: TimeUnit) -> f64 {
    to.from_millis(from.to_millis(value))
}

impl FromStr for TimeUnit {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            s if Self::MILLI_TOKENS.contains(&s) => Self::Milli,
            s if Self::SEC_TOKENS.contains(&s) => Self::Sec,
            s if Self::MIN_TOKENS.contains(&s) => Self::Min,
            s if Self::HOUR_TOKENS.contains(&s) => Self::Hour,
            s if Self::DAY_TOKENS.contains(&s) => Self::Day,
            s => return Err(ParseError::UnknownUnit(s.to_string())),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unit_to_millis() {
        assert_eq!(TimeUnit::Milli.to_millis(250.0), 250.0);
        assert_eq!(TimeUnit::Sec.to_millis(2.0), 2000.0);
        assert_eq!(TimeUnit::Min.to_millis(3.5), 210_000.0);
        assert_eq!(TimeUnit::Hour.to_millis(1.0), 3_600_000.0);
        assert_eq!(TimeUnit::Day.to_millis(2.0), 172_800_000.0);
    }

    #[test]
    fn millis_to_unit() {
        assert_eq!(TimeUnit::Sec.from_millis(1500.0), 1.5);
        assert_eq!(TimeUnit::Min.from_millis(90_000.0), 1.5);
        assert_eq!(TimeUnit::Day.from_millis(86_400_000.0), 1.0);
    }

    #[test]
    fn cross_unit_conversion() {
        assert_eq!(convert(90.0, TimeUnit::Sec, TimeUnit::Min), 1.5);
        assert_eq!(convert(1.0, TimeUnit::Day, TimeUnit::Hour), 24.0);
        assert_eq!(convert(500.0, TimeUnit::Milli, TimeUnit::Sec), 0.5);
    }

    #[test]
    fn neighbours() {
        assert_eq!(TimeUnit::Sec.larger_unit(), Some(TimeUnit::Min));
        assert_eq!(TimeUnit::Day.larger_unit(), None);
        assert_eq!(TimeUnit::Hour.smaller_unit(), Some(TimeUnit::Min));
        assert_eq!(TimeUnit::Milli.smaller_unit(), None);
    }

    #[test]
    fn unit_spellings() {
        assert_eq!("ms".parse::<TimeUnit>(), Ok(TimeUnit::Milli));
        assert_eq!("millisecond".parse::<TimeUnit>(), Ok(TimeUnit::Milli));
        assert_eq!("secs".parse::<TimeUnit>(), Ok(TimeUnit::Sec));
        assert_eq!("minutes".parse::<TimeUnit>(), Ok(TimeUnit::Min));
        assert_eq!("hr".parse::<TimeUnit>(), Ok(TimeUnit::Hour));
        assert_eq!("days".parse::<TimeUnit>(), Ok(TimeUnit::Day));
        assert!("x".parse::<TimeUnit>().is_err());
    }

    #[test]
    fn ordering_follows_significance() {
        assert!(TimeUnit::Milli < TimeUnit::Sec);
        assert!(TimeUnit::Sec < TimeUnit::Min);
        assert!(TimeUnit::Min < TimeUnit::Hour);
        assert!(TimeUnit::Hour < TimeUnit::Day);
    }
}
