//! Countdown timer core.
//!
//! The pieces a timer UI needs and nothing it renders: a pause-aware
//! [`TimerController`] whose completion callback fires exactly once at the
//! right wall-clock moment, a [`parse_input`] grammar for free-form duration
//! text, and clock-string formatting over an arbitrary unit range.
//!
//! ```
//! use tickdown::{parse_input, to_clock, TimerController, UnitRange, TimeUnit};
//!
//! let duration_ms = parse_input("1m 30s").unwrap();
//! let mut timer = TimerController::new(duration_ms);
//! timer.start();
//!
//! let range = UnitRange::new(TimeUnit::Sec, TimeUnit::Min);
//! assert_eq!(to_clock(timer.duration(), range, true), "1:30");
//! ```

pub mod format;
pub mod parse;
pub mod timer;
pub mod units;

pub use format::{to_clock, to_strings, to_units, UnitRange, UnitValues};
pub use parse::{parse_input, parse_input_with_separator, ParseError};
pub use timer::{FinishScheduler, TimerController, TimerSnapshot, TimerStatus};
pub use units::{convert, TimeUnit};
