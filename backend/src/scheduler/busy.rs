//! Busy-set builder: projects the day's appointment and absence streams onto
//! one technician's busy intervals for one date.

use crate::api::{Absence, Appointment, Technician};
use crate::models::time::{day_clipping_window, local_instant, Interval, WORKING_END};
use chrono::{DateTime, FixedOffset, NaiveDate};
use log::debug;

/// Job name excluded when the `include_rrsc` flag is set. Exact match after
/// trimming, case-sensitive.
pub const RRSC_JOB_NAME: &str = "RRSC AGENT";

/// Busy intervals for `tech` on `date`, clipped to the daily clipping window
/// and capped at the fixed working end.
///
/// An appointment contributes at most one interval per technician even when
/// the same name appears several times in its tech list; name matching is
/// case-insensitive and whitespace-trimmed. Records whose projection onto
/// the date is empty, or whose range is degenerate, are skipped.
pub fn busy_intervals_for_tech(
    date: NaiveDate,
    tech: &Technician,
    appointments: &[Appointment],
    absences: &[Absence],
    include_rrsc: bool,
    offset: FixedOffset,
) -> Vec<Interval> {
    let clip = day_clipping_window(date, offset);
    let working_end = local_instant(date, WORKING_END, offset);
    let mut busy = Vec::new();

    for appt in appointments {
        if include_rrsc && is_rrsc(appt) {
            continue;
        }
        if !appt.technicians.iter().any(|name| tech.matches_name(name)) {
            continue;
        }
        if let Some(interval) = project(appt.start, appt.end, &clip, working_end) {
            busy.push(interval);
        }
    }

    for absence in absences {
        if !tech.matches_name(&absence.technician) {
            continue;
        }
        if let Some(interval) = project(absence.start, absence.end, &clip, working_end) {
            busy.push(interval);
        }
    }

    busy
}

fn is_rrsc(appt: &Appointment) -> bool {
    appt.job_name.as_deref().map(str::trim) == Some(RRSC_JOB_NAME)
}

/// Project an external record onto the date: clip below at 07:00 and above
/// at min(end, 17:00, 16:30). Pre-working-hours busy time may survive down
/// to 07:00 here; the working-window subtraction removes it again, so an
/// external start before the working window never leaks into free time.
fn project(
    start: DateTime<FixedOffset>,
    end: DateTime<FixedOffset>,
    clip: &Interval,
    working_end: DateTime<FixedOffset>,
) -> Option<Interval> {
    if start >= end {
        debug!("skipping record with degenerate range: {start} >= {end}");
        return None;
    }
    let effective_start = start.max(clip.start);
    let effective_end = end.min(clip.end).min(working_end);
    Interval::new(effective_start, effective_end)
}
