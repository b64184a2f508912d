//! Unit and property tests for the interval library.

use super::time::*;
use chrono::{DateTime, FixedOffset, NaiveDate, NaiveTime};
use proptest::prelude::*;

fn utc() -> FixedOffset {
    FixedOffset::east_opt(0).unwrap()
}

fn date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 3).unwrap()
}

fn at(hour: u32, minute: u32) -> DateTime<FixedOffset> {
    local_instant(date(), NaiveTime::from_hms_opt(hour, minute, 0).unwrap(), utc())
}

fn minutes_after_7(minutes: u32) -> DateTime<FixedOffset> {
    at(7, 0) + chrono::TimeDelta::minutes(i64::from(minutes))
}

fn window() -> Interval {
    working_window(date(), DEFAULT_WORKING_START, utc()).unwrap()
}

#[test]
fn test_interval_rejects_empty_and_inverted() {
    assert!(Interval::new(at(9, 0), at(9, 0)).is_none());
    assert!(Interval::new(at(10, 0), at(9, 0)).is_none());
    assert!(Interval::new(at(9, 0), at(10, 0)).is_some());
}

#[test]
fn test_interval_duration_hours() {
    let iv = Interval::new(at(9, 0), at(12, 30)).unwrap();
    assert_eq!(iv.duration_hours(), 3.5);
}

#[test]
fn test_clip_to_window() {
    let w = window();
    let outside = Interval::new(at(17, 0), at(18, 0)).unwrap();
    assert!(outside.clip_to(&w).is_none());

    let straddling = Interval::new(at(7, 0), at(9, 15)).unwrap();
    let clipped = straddling.clip_to(&w).unwrap();
    assert_eq!(clipped.start, at(8, 30));
    assert_eq!(clipped.end, at(9, 15));
}

#[test]
fn test_working_window_empty_when_start_not_before_end() {
    let late = NaiveTime::from_hms_opt(16, 30, 0).unwrap();
    assert!(working_window(date(), late, utc()).is_none());
    let later = NaiveTime::from_hms_opt(17, 0, 0).unwrap();
    assert!(working_window(date(), later, utc()).is_none());
}

#[test]
fn test_day_clipping_window_bounds() {
    let clip = day_clipping_window(date(), utc());
    assert_eq!(clip.start, at(7, 0));
    assert_eq!(clip.end, at(17, 0));
}

#[test]
fn test_subtraction_with_overlapping_busy() {
    // 08:30-16:30 minus [09:00-10:00), [09:30-11:00), [15:00-15:30).
    let busy = [
        Interval::new(at(9, 0), at(10, 0)).unwrap(),
        Interval::new(at(9, 30), at(11, 0)).unwrap(),
        Interval::new(at(15, 0), at(15, 30)).unwrap(),
    ];
    let free = subtract_busy_intervals(window(), &busy);
    assert_eq!(
        free,
        vec![
            Interval::new(at(8, 30), at(9, 0)).unwrap(),
            Interval::new(at(11, 0), at(15, 0)).unwrap(),
            Interval::new(at(15, 30), at(16, 30)).unwrap(),
        ]
    );
    assert_eq!(max_contiguous_free_hours(window(), &busy), 4.0);
}

#[test]
fn test_pre_window_start_does_not_leak() {
    // A busy interval reaching back before the window start subtracts the
    // same free time as one starting exactly at the window start.
    let early = [Interval::new(at(7, 0), at(9, 15)).unwrap()];
    let aligned = [Interval::new(at(8, 30), at(9, 15)).unwrap()];
    assert_eq!(
        subtract_busy_intervals(window(), &early),
        subtract_busy_intervals(window(), &aligned)
    );
}

#[test]
fn test_unordered_and_duplicated_busy_inputs() {
    let busy = [
        Interval::new(at(14, 0), at(15, 0)).unwrap(),
        Interval::new(at(9, 0), at(10, 0)).unwrap(),
        Interval::new(at(9, 0), at(10, 0)).unwrap(),
    ];
    let free = subtract_busy_intervals(window(), &busy);
    assert_eq!(
        free,
        vec![
            Interval::new(at(8, 30), at(9, 0)).unwrap(),
            Interval::new(at(10, 0), at(14, 0)).unwrap(),
            Interval::new(at(15, 0), at(16, 30)).unwrap(),
        ]
    );
}

#[test]
fn test_fully_busy_window_has_no_free_time() {
    let busy = [Interval::new(at(7, 0), at(17, 0)).unwrap()];
    assert!(subtract_busy_intervals(window(), &busy).is_empty());
    assert_eq!(max_contiguous_free_hours(window(), &busy), 0.0);
}

#[test]
fn test_round_hours() {
    assert_eq!(round_hours(3.333333), 3.33);
    assert_eq!(round_hours(3.336), 3.34);
    assert_eq!(round_hours(8.0), 8.0);
}

#[test]
fn test_local_instant_respects_offset() {
    let madrid = FixedOffset::east_opt(2 * 3600).unwrap();
    let instant = local_instant(date(), NaiveTime::from_hms_opt(8, 30, 0).unwrap(), madrid);
    assert_eq!(instant.to_utc().time(), NaiveTime::from_hms_opt(6, 30, 0).unwrap());
}

/// Busy intervals as minute offsets from 07:00, deliberately allowed to
/// spill outside the working window so clipping is exercised.
fn busy_strategy() -> impl Strategy<Value = Vec<Interval>> {
    prop::collection::vec((0u32..660, 1u32..300), 0..8).prop_map(|pairs| {
        pairs
            .into_iter()
            .filter_map(|(start, len)| {
                Interval::new(minutes_after_7(start), minutes_after_7(start + len))
            })
            .collect()
    })
}

/// Total minutes covered by the union of the clipped busy intervals,
/// computed independently of the code under test.
fn clipped_union_minutes(window: Interval, busy: &[Interval]) -> i64 {
    let mut clipped: Vec<Interval> = busy.iter().filter_map(|b| b.clip_to(&window)).collect();
    clipped.sort_by_key(|iv| (iv.start, iv.end));
    let mut total = 0i64;
    let mut cursor = window.start;
    for b in &clipped {
        let start = b.start.max(cursor);
        if b.end > start {
            total += (b.end - start).num_minutes();
            cursor = b.end;
        }
    }
    total
}

proptest! {
    #[test]
    fn prop_free_and_busy_partition_the_window(busy in busy_strategy()) {
        let w = window();
        let free = subtract_busy_intervals(w, &busy);

        // Ordered, disjoint, non-empty, inside the window.
        let mut cursor = w.start;
        for f in &free {
            prop_assert!(f.start < f.end);
            prop_assert!(f.start >= cursor);
            prop_assert!(f.start >= w.start && f.end <= w.end);
            cursor = f.end;
        }

        // Free time never overlaps any busy interval.
        for f in &free {
            for b in &busy {
                prop_assert!(f.end <= b.start || b.end <= f.start);
            }
        }

        // Exact partition of the window by minute count.
        let free_minutes: i64 = free.iter().map(|f| (f.end - f.start).num_minutes()).sum();
        let busy_minutes = clipped_union_minutes(w, &busy);
        prop_assert_eq!(free_minutes + busy_minutes, (w.end - w.start).num_minutes());
    }

    #[test]
    fn prop_subtraction_is_idempotent_on_free_output(busy in busy_strategy()) {
        let w = window();
        for f in subtract_busy_intervals(w, &busy) {
            prop_assert_eq!(subtract_busy_intervals(f, &[]), vec![f]);
        }
    }

    #[test]
    fn prop_adding_busy_never_grows_free(busy in busy_strategy(), extra_start in 0u32..660, extra_len in 1u32..300) {
        let w = window();
        let base_max = max_contiguous_free_hours(w, &busy);

        let mut grown = busy.clone();
        if let Some(extra) = Interval::new(
            minutes_after_7(extra_start),
            minutes_after_7(extra_start + extra_len),
        ) {
            grown.push(extra);
        }
        let grown_max = max_contiguous_free_hours(w, &grown);
        prop_assert!(grown_max <= base_max + 1e-9);

        // Every free interval after growth is contained in one before it.
        let before = subtract_busy_intervals(w, &busy);
        for f in subtract_busy_intervals(w, &grown) {
            prop_assert!(before.iter().any(|b| b.start <= f.start && f.end <= b.end));
        }
    }
}
