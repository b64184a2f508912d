//! Time primitives: half-open intervals, working windows, and the
//! clip/sort/sweep subtraction the availability computations are built on.
//!
//! Everything in this module operates on `DateTime<FixedOffset>` instants in
//! the business time zone. There is no calendar awareness here beyond
//! constructing per-date windows; weekday filtering lives in the scanner.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveTime, TimeDelta};
use serde::{Deserialize, Serialize};

/// Fixed end of the assignable working day (16:30 local).
pub const WORKING_END: NaiveTime = hm(16, 30);

/// Default start of the assignable working day (08:30 local).
pub const DEFAULT_WORKING_START: NaiveTime = hm(8, 30);

/// Lower bound of the daily clipping window (07:00 local).
pub const DAY_CLIP_START: NaiveTime = hm(7, 0);

/// Upper bound of the daily clipping window (17:00 local).
pub const DAY_CLIP_END: NaiveTime = hm(17, 0);

const fn hm(hours: u32, minutes: u32) -> NaiveTime {
    match NaiveTime::from_hms_opt(hours, minutes, 0) {
        Some(t) => t,
        None => panic!("invalid literal time of day"),
    }
}

/// Half-open time range `[start, end)` with `start < end`.
///
/// Construction through [`Interval::new`] enforces non-emptiness; empty or
/// inverted ranges yield `None` and are discarded by callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Interval {
    pub start: DateTime<FixedOffset>,
    pub end: DateTime<FixedOffset>,
}

impl Interval {
    /// Create a non-empty interval, or `None` when `start >= end`.
    pub fn new(start: DateTime<FixedOffset>, end: DateTime<FixedOffset>) -> Option<Self> {
        if start < end {
            Some(Self { start, end })
        } else {
            None
        }
    }

    /// Intersect with `window`, discarding an empty result.
    pub fn clip_to(&self, window: &Interval) -> Option<Interval> {
        Interval::new(self.start.max(window.start), self.end.min(window.end))
    }

    /// Length in fractional hours.
    pub fn duration_hours(&self) -> f64 {
        (self.end - self.start).num_seconds() as f64 / 3600.0
    }
}

/// Resolve a naive local date and time of day to an instant in the business
/// offset. Total for any `FixedOffset`; no DST ambiguity can arise.
pub fn local_instant(date: NaiveDate, time: NaiveTime, offset: FixedOffset) -> DateTime<FixedOffset> {
    let local = date.and_time(time);
    let utc = local - TimeDelta::seconds(i64::from(offset.local_minus_utc()));
    DateTime::from_naive_utc_and_offset(utc, offset)
}

/// The assignable working window for a date, from a configurable start time
/// to the fixed [`WORKING_END`]. `None` when the start does not precede the
/// end, in which case there is no free time at all that day.
pub fn working_window(date: NaiveDate, start: NaiveTime, offset: FixedOffset) -> Option<Interval> {
    Interval::new(
        local_instant(date, start, offset),
        local_instant(date, WORKING_END, offset),
    )
}

/// The wider daily clipping window (07:00-17:00) used to project external
/// intervals onto a business day before working-window arithmetic.
pub fn day_clipping_window(date: NaiveDate, offset: FixedOffset) -> Interval {
    Interval {
        start: local_instant(date, DAY_CLIP_START, offset),
        end: local_instant(date, DAY_CLIP_END, offset),
    }
}

/// Free intervals left in `window` after removing the union of `busy`.
///
/// Each busy interval is clipped to the window, the clipped set is sorted by
/// `(start, end)`, and a single left-to-right sweep emits the gaps. The
/// output is pairwise disjoint, non-empty, and time-ordered; overlapping or
/// duplicated busy inputs are merged implicitly by the sweep.
pub fn subtract_busy_intervals(window: Interval, busy: &[Interval]) -> Vec<Interval> {
    let mut clipped: Vec<Interval> = busy.iter().filter_map(|b| b.clip_to(&window)).collect();
    clipped.sort_by_key(|iv| (iv.start, iv.end));

    let mut free = Vec::new();
    let mut cursor = window.start;
    for b in &clipped {
        if b.start > cursor {
            free.push(Interval { start: cursor, end: b.start });
        }
        if b.end > cursor {
            cursor = b.end;
        }
    }
    if cursor < window.end {
        free.push(Interval { start: cursor, end: window.end });
    }
    free
}

/// Largest contiguous free stretch in `window`, in fractional hours.
/// Zero when the busy set covers the window entirely.
pub fn max_contiguous_free_hours(window: Interval, busy: &[Interval]) -> f64 {
    subtract_busy_intervals(window, busy)
        .iter()
        .map(Interval::duration_hours)
        .fold(0.0, f64::max)
}

/// Round hours to two decimals for presentation. Internal comparisons always
/// use the unrounded value.
pub fn round_hours(hours: f64) -> f64 {
    (hours * 100.0).round() / 100.0
}
