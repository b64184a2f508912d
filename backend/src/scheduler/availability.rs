//! Per-technician free-time evaluation for a candidate date.

use crate::api::ScheduleRequest;
use crate::models::time::{max_contiguous_free_hours, working_window};
use crate::scheduler::busy::busy_intervals_for_tech;
use chrono::NaiveDate;
use std::collections::BTreeMap;

/// Maximum contiguous free hours per active technician on `date`.
///
/// Keys are trimmed display names. Values are unrounded; rounding to two
/// decimals happens only in the outbound candidate map. An empty map is
/// returned when the working window itself is empty.
pub fn free_hours_by_tech(date: NaiveDate, request: &ScheduleRequest) -> BTreeMap<String, f64> {
    let offset = request.business_offset();
    let mut free = BTreeMap::new();

    let Some(window) = working_window(date, request.working_start_time, offset) else {
        return free;
    };

    for tech in request.technicians.iter().filter(|t| t.active) {
        let busy = busy_intervals_for_tech(
            date,
            tech,
            &request.appointments,
            &request.absences,
            request.include_rrsc,
            offset,
        );
        let hours = max_contiguous_free_hours(window, &busy);
        free.insert(tech.display_name().to_string(), hours);
    }

    free
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{Absence, Appointment, Technician};
    use crate::models::time::local_instant;
    use chrono::{DateTime, FixedOffset, NaiveTime};
    use std::collections::BTreeSet;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 3).unwrap()
    }

    fn at(hour: u32, minute: u32) -> DateTime<FixedOffset> {
        let offset = FixedOffset::east_opt(0).unwrap();
        local_instant(date(), NaiveTime::from_hms_opt(hour, minute, 0).unwrap(), offset)
    }

    fn request_with(technicians: Vec<Technician>) -> ScheduleRequest {
        ScheduleRequest {
            appointments: Vec::new(),
            absences: Vec::new(),
            technicians,
            rows: Vec::new(),
            allowed_weekdays: vec![chrono::Weekday::Tue],
            working_start_time: NaiveTime::from_hms_opt(8, 30, 0).unwrap(),
            include_rrsc: false,
            max_results: 5,
            horizon_days: 90,
            today: date(),
            utc_offset_minutes: 0,
        }
    }

    fn tech(name: &str, active: bool) -> Technician {
        Technician {
            name: name.to_string(),
            types: BTreeSet::from(["mid".to_string()]),
            active,
        }
    }

    #[test]
    fn test_fully_free_day() {
        let request = request_with(vec![tech("Alex", true)]);
        let free = free_hours_by_tech(date(), &request);
        assert_eq!(free.get("Alex"), Some(&8.0));
    }

    #[test]
    fn test_inactive_tech_excluded() {
        let request = request_with(vec![tech("Alex", true), tech("Bea", false)]);
        let free = free_hours_by_tech(date(), &request);
        assert!(free.contains_key("Alex"));
        assert!(!free.contains_key("Bea"));
    }

    #[test]
    fn test_appointment_splits_the_day() {
        let mut request = request_with(vec![tech("Alex", true)]);
        request.appointments.push(Appointment {
            start: at(12, 0),
            end: at(13, 0),
            technicians: vec!["alex".to_string()],
            job_name: None,
        });
        let free = free_hours_by_tech(date(), &request);
        // 08:30-12:00 is 3.5h, 13:00-16:30 is 3.5h.
        assert_eq!(free.get("Alex"), Some(&3.5));
    }

    #[test]
    fn test_absence_swallows_the_day() {
        let mut request = request_with(vec![tech("Alex", true)]);
        request.absences.push(Absence {
            start: at(7, 0),
            end: at(17, 0),
            technician: "Alex".to_string(),
        });
        let free = free_hours_by_tech(date(), &request);
        assert_eq!(free.get("Alex"), Some(&0.0));
    }

    #[test]
    fn test_name_casing_does_not_change_result() {
        let mut request = request_with(vec![tech("Alex", true)]);
        request.appointments.push(Appointment {
            start: at(9, 0),
            end: at(10, 0),
            technicians: vec!["ALEX".to_string()],
            job_name: None,
        });
        let upper = free_hours_by_tech(date(), &request);

        request.appointments[0].technicians = vec!["alex".to_string()];
        let lower = free_hours_by_tech(date(), &request);
        assert_eq!(upper, lower);
    }

    #[test]
    fn test_empty_working_window_yields_empty_map() {
        let mut request = request_with(vec![tech("Alex", true)]);
        // validate() rejects this, but the evaluator must still be total.
        request.working_start_time = NaiveTime::from_hms_opt(17, 0, 0).unwrap();
        assert!(free_hours_by_tech(date(), &request).is_empty());
    }
}
