//! Candidate scanning: walk future workdays, evaluate availability, and
//! collect the first blocks on which the whole staffing demand holds.
//!
//! Single-day demands are blocks of length one, so one scan loop serves both
//! the day scanner and the block composer.

use crate::api::{Candidate, ScheduleRequest};
use crate::models::time::round_hours;
use crate::scheduler::availability::free_hours_by_tech;
use crate::scheduler::matching::{eligible_for_row, match_rows};
use chrono::{Datelike, Days, NaiveDate, Weekday};
use std::collections::{BTreeMap, BTreeSet};

/// Scan `today + 1 ..= today + horizon_days` and return the first
/// `max_results` feasible blocks in ascending start-date order.
///
/// The request must already have passed `validate`; this function never
/// errors, it only finds fewer (possibly zero) candidates.
pub fn scan(request: &ScheduleRequest) -> Vec<Candidate> {
    let block_len = request
        .rows
        .iter()
        .map(|row| row.required_days)
        .max()
        .unwrap_or(1)
        .max(1);

    let mut candidates = Vec::new();
    for day_offset in 1..=u64::from(request.horizon_days) {
        let Some(start_date) = request.today.checked_add_days(Days::new(day_offset)) else {
            break;
        };
        let Some(dates) = block_dates(start_date, block_len, &request.allowed_weekdays) else {
            continue;
        };
        if let Some(candidate) = evaluate_block(request, start_date, &dates) {
            candidates.push(candidate);
            if candidates.len() >= request.max_results as usize {
                break;
            }
        }
    }
    candidates
}

/// The `length` consecutive calendar dates starting at `start`, provided
/// every one of them falls on an allowed weekday. A disallowed weekday
/// anywhere in the span breaks the block; the scan then restarts at the next
/// start date.
fn block_dates(start: NaiveDate, length: u32, allowed: &[Weekday]) -> Option<Vec<NaiveDate>> {
    let mut dates = Vec::with_capacity(length as usize);
    let mut date = start;
    for _ in 0..length {
        if !allowed.contains(&date.weekday()) {
            return None;
        }
        dates.push(date);
        date = date.checked_add_days(Days::new(1))?;
    }
    Some(dates)
}

fn evaluate_block(
    request: &ScheduleRequest,
    start_date: NaiveDate,
    dates: &[NaiveDate],
) -> Option<Candidate> {
    let day_maps: Vec<BTreeMap<String, f64>> = dates
        .iter()
        .map(|date| free_hours_by_tech(*date, request))
        .collect();

    // Per row, only technicians eligible on every day of the span can form
    // its stable core.
    let eligible: Vec<BTreeSet<String>> = request
        .rows
        .iter()
        .map(|row| {
            let mut days = day_maps
                .iter()
                .map(|free| eligible_for_row(row, &request.technicians, free));
            let first = days.next().unwrap_or_default();
            days.fold(first, |acc, day| acc.intersection(&day).cloned().collect())
        })
        .collect();

    let assignment = match_rows(&request.rows, &eligible)?;

    // Qualifying technicians with their worst-day hours across the block.
    let mut tech_free_hours = BTreeMap::new();
    for name in eligible.iter().flatten() {
        let worst = day_maps
            .iter()
            .filter_map(|free| free.get(name))
            .copied()
            .fold(f64::INFINITY, f64::min);
        if worst.is_finite() {
            tech_free_hours.insert(name.clone(), round_hours(worst));
        }
    }

    Some(Candidate {
        start_date,
        length_days: dates.len() as u32,
        tech_free_hours,
        assignment,
    })
}
