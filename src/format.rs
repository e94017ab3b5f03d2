//! Duration formatting: decomposing a millisecond count into per-unit values
//! and rendering padded clock strings over a chosen unit range.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::units::{TimeUnit, MILLIS_IN_DAY, MILLIS_IN_HOUR, MILLIS_IN_MIN, MILLIS_IN_SEC};

/// A millisecond count broken into days/hours/minutes/seconds/millis.
///
/// The decomposition truncates, so a negative input produces components that
/// are individually zero or negative, never wrapped positive:
/// `-100` gives `{millis: -100}`, not `{secs: -1, millis: 900}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct UnitValues {
    pub days: i64,
    pub hours: i64,
    pub mins: i64,
    pub secs: i64,
    pub millis: i64,
}

/// Decomposes a millisecond count into per-unit values.
pub fn to_units(ms: i64) -> UnitValues {
    UnitValues {
        days: ms / MILLIS_IN_DAY,
        hours: (ms / MILLIS_IN_HOUR) % 24,
        mins: (ms / MILLIS_IN_MIN) % 60,
        secs: (ms / MILLIS_IN_SEC) % 60,
        millis: ms % 1000,
    }
}

/// An inclusive range of units to display, normalized largest-first.
///
/// The two ends may be given in either order. Every unit strictly between
/// the ends is also shown; units outside the range are folded into the
/// nearest end by the formatter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnitRange {
    largest: TimeUnit,
    smallest: TimeUnit,
}

impl UnitRange {
    pub fn new(a: TimeUnit, b: TimeUnit) -> Self {
        Self {
            largest: a.max(b),
            smallest: a.min(b),
        }
    }

    pub const fn largest(&self) -> TimeUnit {
        self.largest
    }

    pub const fn smallest(&self) -> TimeUnit {
        self.smallest
    }

    /// Units in the range, most significant first.
    fn descending(&self) -> Vec<TimeUnit> {
        let mut units = Vec::with_capacity(5);
        let mut unit = Some(self.largest);
        while let Some(u) = unit {
            units.push(u);
            if u == self.smallest {
                break;
            }
            unit = u.smaller_unit();
        }
        units
    }
}

impl Default for UnitRange {
    fn default() -> Self {
        Self::new(TimeUnit::Milli, TimeUnit::Day)
    }
}

/// Reduces `ms` into the units of `range`, most significant first.
///
/// Values are absolute; the caller reattaches the sign. Units above the
/// range top are folded into it, a nonzero remainder below the range bottom
/// rounds the bottom up (non-negative inputs only), and any carry this
/// introduces cascades upward but never past the range top.
fn reduce(ms: i64, range: UnitRange, auto: bool) -> Vec<(TimeUnit, i64)> {
    let abs = ms.abs();

    let mut segments: Vec<(TimeUnit, i64)> = range
        .descending()
        .into_iter()
        .enumerate()
        .map(|(i, unit)| {
            let value = if i == 0 {
                abs / unit.millis()
            } else {
                (abs / unit.millis()) % unit.per_larger()
            };
            (unit, value)
        })
        .collect();

    // A countdown shown in whole seconds should read "1:00" at 59999ms,
    // not tick down early. Negative (overtime) values are never rounded up.
    let dropped = abs % range.smallest().millis();
    if dropped != 0 && ms >= 0 {
        let last = segments.len() - 1;
        segments[last].1 += 1;
        for i in (1..segments.len()).rev() {
            let (unit, value) = segments[i];
            if value >= unit.per_larger() {
                segments[i].1 -= unit.per_larger();
                segments[i - 1].1 += 1;
            } else {
                break;
            }
        }
    }

    if auto {
        // Trim leading zero positions, but never the seconds position:
        // exactly 123ms renders as "0.123", not ".123".
        while segments.len() > 1 && segments[0].1 == 0 && segments[0].0 != TimeUnit::Sec {
            segments.remove(0);
        }
    }

    segments
}

fn render_segment(position: usize, unit: TimeUnit, value: i64, negative: bool) -> String {
    if position == 0 {
        let sign = if negative { "-" } else { "" };
        format!("{sign}{value}")
    } else if unit == TimeUnit::Milli {
        format!("{value:03}")
    } else {
        format!("{value:02}")
    }
}

/// Renders a millisecond count as a padded clock string over `range`.
///
/// The leading unit is unpadded and carries the sign; later units are
/// zero-padded to 2 digits (3 for milliseconds) and separated by `:`,
/// except the milliseconds segment which follows a `.`.
///
/// With `auto`, leading zero units are dropped down to (at minimum) the
/// seconds unit.
pub fn to_clock(ms: i64, range: UnitRange, auto: bool) -> String {
    let negative = ms < 0;
    let mut out = String::new();
    for (i, (unit, value)) in reduce(ms, range, auto).into_iter().enumerate() {
        if i > 0 {
            out.push(if unit == TimeUnit::Milli { '.' } else { ':' });
        }
        out.push_str(&render_segment(i, unit, value, negative));
    }
    out
}

/// Same reduction as [`to_clock`], but returned per unit so callers can
/// style each segment independently.
///
/// Iteration order of the map is ascending significance; display callers
/// reverse it.
pub fn to_strings(ms: i64, range: UnitRange, auto: bool) -> BTreeMap<TimeUnit, String> {
    let negative = ms < 0;
    reduce(ms, range, auto)
        .into_iter()
        .enumerate()
        .map(|(i, (unit, value))| (unit, render_segment(i, unit, value, negative)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decomposes_into_units() {
        assert_eq!(
            to_units(93_784_005),
            UnitValues {
                days: 1,
                hours: 2,
                mins: 3,
                secs: 4,
                millis: 5,
            }
        );
        assert_eq!(
            to_units(0),
            UnitValues {
                days: 0,
                hours: 0,
                mins: 0,
                secs: 0,
                millis: 0,
            }
        );
    }

    #[test]
    fn negative_units_truncate_toward_zero() {
        assert_eq!(
            to_units(-100),
            UnitValues {
                days: 0,
                hours: 0,
                mins: 0,
                secs: 0,
                millis: -100,
            }
        );
        assert_eq!(
            to_units(-61_500),
            UnitValues {
                days: 0,
                hours: 0,
                mins: -1,
                secs: -1,
                millis: -500,
            }
        );
    }

    #[test]
    fn range_normalizes_order() {
        let a = UnitRange::new(TimeUnit::Milli, TimeUnit::Min);
        let b = UnitRange::new(TimeUnit::Min, TimeUnit::Milli);
        assert_eq!(a, b);
        assert_eq!(a.largest(), TimeUnit::Min);
        assert_eq!(a.smallest(), TimeUnit::Milli);
    }

    #[test]
    fn clock_folds_into_range_top() {
        let range = UnitRange::new(TimeUnit::Milli, TimeUnit::Min);
        assert_eq!(to_clock(137_020, range, false), "2:17.020");

        // 1 day shown in hours.
        let range = UnitRange::new(TimeUnit::Sec, TimeUnit::Hour);
        assert_eq!(to_clock(90_000_000, range, false), "25:00:00");
    }

    #[test]
    fn clock_full_range_negative() {
        assert_eq!(
            to_clock(-19_394, UnitRange::default(), false),
            "-0:00:00:19.394"
        );
    }

    #[test]
    fn clock_rounds_dropped_remainder_up() {
        let range = UnitRange::new(TimeUnit::Sec, TimeUnit::Day);
        assert_eq!(to_clock(59_999, range, true), "1:00");
        assert_eq!(to_clock(59_999, range, false), "0:00:01:00");

        // Whole values do not round.
        assert_eq!(to_clock(60_000, range, true), "1:00");
    }

    #[test]
    fn clock_never_rounds_negative_up() {
        let range = UnitRange::new(TimeUnit::Sec, TimeUnit::Day);
        assert_eq!(to_clock(-40, range, true), "-0");
    }

    #[test]
    fn clock_single_unit_range_is_exact() {
        let range = UnitRange::new(TimeUnit::Day, TimeUnit::Day);
        assert_eq!(to_clock(172_800_000, range, false), "2");
        assert_eq!(to_clock(172_800_001, range, false), "3");
    }

    #[test]
    fn auto_trim_keeps_seconds() {
        assert_eq!(to_clock(123, UnitRange::default(), true), "0.123");
        assert_eq!(to_clock(0, UnitRange::default(), true), "0.000");
    }

    #[test]
    fn auto_trim_stops_at_first_nonzero() {
        let range = UnitRange::new(TimeUnit::Sec, TimeUnit::Day);
        assert_eq!(to_clock(3_600_000, range, true), "1:00:00");
        assert_eq!(to_clock(90_061_000, range, true), "1:01:01:01");
    }

    #[test]
    fn strings_map_matches_clock_segments() {
        let range = UnitRange::new(TimeUnit::Milli, TimeUnit::Min);
        let map = to_strings(137_020, range, false);
        assert_eq!(map[&TimeUnit::Min], "2");
        assert_eq!(map[&TimeUnit::Sec], "17");
        assert_eq!(map[&TimeUnit::Milli], "020");

        // Ascending significance when iterated.
        let keys: Vec<_> = map.keys().copied().collect();
        assert_eq!(keys, vec![TimeUnit::Milli, TimeUnit::Sec, TimeUnit::Min]);
    }
}
