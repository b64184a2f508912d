//! Public API surface for the scheduling kernel.
//!
//! This file consolidates the inbound request contract and the outbound
//! candidate contract. All types derive Serialize/Deserialize so a web or
//! CLI layer can drive the kernel over JSON; defaults mirror the documented
//! contract (Mon-Fri weekdays, 08:30 working start, 5 results, 90-day
//! horizon).

use crate::error::{Error, Result};
use crate::models::time::WORKING_END;
use anyhow::Context;
use chrono::{DateTime, FixedOffset, NaiveDate, NaiveTime, Offset, Utc, Weekday};
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// External appointment record from the field-service system.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Appointment {
    /// Start instant
    pub start: DateTime<FixedOffset>,
    /// End instant
    pub end: DateTime<FixedOffset>,
    /// Names of the technicians assigned to this appointment
    #[serde(default)]
    pub technicians: Vec<String>,
    /// Job descriptor name, when the upstream record carries one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job_name: Option<String>,
}

/// External absence record (holiday, sickness, training) for one technician.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Absence {
    /// Start instant
    pub start: DateTime<FixedOffset>,
    /// End instant
    pub end: DateTime<FixedOffset>,
    /// Name of the absent technician
    pub technician: String,
}

/// A technician known to the scheduler.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Technician {
    /// Stable name; matching against external records is case-insensitive
    /// and whitespace-trimmed
    pub name: String,
    /// Opaque type tags (e.g. senior/mid/junior/trainee/sprinkler)
    #[serde(default)]
    pub types: BTreeSet<String>,
    /// Only active technicians participate in scheduling
    #[serde(default = "default_active")]
    pub active: bool,
}

impl Technician {
    /// Name with surrounding whitespace removed, as used in result maps.
    pub fn display_name(&self) -> &str {
        self.name.trim()
    }

    /// Case-insensitive, whitespace-trimmed name comparison.
    pub fn matches_name(&self, other: &str) -> bool {
        self.name.trim().to_lowercase() == other.trim().to_lowercase()
    }

    /// Whether this technician carries at least one of the wanted type tags.
    pub fn has_any_type(&self, wanted: &BTreeSet<String>) -> bool {
        wanted.iter().any(|tag| self.types.contains(tag))
    }
}

fn default_active() -> bool {
    true
}

/// One staffing demand: at least `count` technicians of an acceptable type,
/// each free for `required_hours` contiguous hours, for `required_days`
/// consecutive working days.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StaffingRow {
    /// Number of distinct technicians required
    pub count: u32,
    /// Type tags that qualify a technician for this row
    #[serde(default)]
    pub acceptable_types: BTreeSet<String>,
    /// Minimum contiguous free hours per technician per day
    pub required_hours: f64,
    /// Consecutive working days the same technicians must cover
    #[serde(default = "default_required_days")]
    pub required_days: u32,
}

fn default_required_days() -> u32 {
    1
}

/// Inbound contract: one complete scheduling request.
///
/// The kernel is pure; everything it needs, including `today`, arrives in
/// this record. Callers normalize all instants to the business time zone
/// expressed by `utc_offset_minutes` before invoking the kernel.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleRequest {
    /// Appointment stream for the scan horizon
    #[serde(default)]
    pub appointments: Vec<Appointment>,
    /// Absence stream for the scan horizon
    #[serde(default)]
    pub absences: Vec<Absence>,
    /// Known technicians; inactive entries are ignored
    #[serde(default)]
    pub technicians: Vec<Technician>,
    /// Ordered staffing demand rows
    #[serde(default)]
    pub rows: Vec<StaffingRow>,
    /// Weekdays eligible for scheduling
    #[serde(default = "default_allowed_weekdays")]
    pub allowed_weekdays: Vec<Weekday>,
    /// Local start of the assignable working day
    #[serde(default = "default_working_start")]
    pub working_start_time: NaiveTime,
    /// When true, appointments whose job name is exactly "RRSC AGENT" are
    /// ignored. The flag name is inherited from the upstream system and is
    /// intentionally not inverted.
    #[serde(default)]
    pub include_rrsc: bool,
    /// Maximum number of candidates to return
    #[serde(default = "default_max_results")]
    pub max_results: u32,
    /// Days past `today` to scan
    #[serde(default = "default_horizon_days")]
    pub horizon_days: u32,
    /// Date the horizon is measured from; injected for determinism
    pub today: NaiveDate,
    /// Business time zone as minutes east of UTC
    #[serde(default)]
    pub utc_offset_minutes: i32,
}

fn default_allowed_weekdays() -> Vec<Weekday> {
    vec![
        Weekday::Mon,
        Weekday::Tue,
        Weekday::Wed,
        Weekday::Thu,
        Weekday::Fri,
    ]
}

fn default_working_start() -> NaiveTime {
    crate::models::time::DEFAULT_WORKING_START
}

fn default_max_results() -> u32 {
    5
}

fn default_horizon_days() -> u32 {
    90
}

impl ScheduleRequest {
    /// The business time zone offset. Falls back to UTC for offsets that
    /// `validate` would have rejected.
    pub fn business_offset(&self) -> FixedOffset {
        FixedOffset::east_opt(self.utc_offset_minutes.saturating_mul(60))
            .unwrap_or_else(|| Utc.fix())
    }

    /// Fail-fast validation of the configuration, run before any scanning.
    ///
    /// Malformed appointment/absence records are *not* rejected here; those
    /// are skipped one by one during the scan.
    pub fn validate(&self) -> Result<()> {
        for (index, row) in self.rows.iter().enumerate() {
            if !row.required_hours.is_finite() || row.required_hours < 0.0 {
                return Err(Error::InvalidRow {
                    index,
                    reason: format!("required_hours {} must be non-negative", row.required_hours),
                });
            }
            if row.required_days == 0 {
                return Err(Error::InvalidRow {
                    index,
                    reason: "required_days must be positive".to_string(),
                });
            }
        }
        if self.allowed_weekdays.is_empty() {
            return Err(Error::EmptyWeekdays);
        }
        if self.working_start_time >= WORKING_END {
            return Err(Error::InvalidWorkingStart {
                start: self.working_start_time,
                end: WORKING_END,
            });
        }
        if self.max_results == 0 {
            return Err(Error::ZeroMaxResults);
        }
        if self.horizon_days == 0 {
            return Err(Error::ZeroHorizon);
        }
        let offset_seconds = self.utc_offset_minutes.checked_mul(60);
        if offset_seconds.and_then(FixedOffset::east_opt).is_none() {
            return Err(Error::OffsetOutOfRange {
                minutes: self.utc_offset_minutes,
            });
        }
        Ok(())
    }
}

/// Outbound contract: one feasible date (or block of consecutive dates).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    /// First date of the block
    pub start_date: NaiveDate,
    /// Number of consecutive working days in the block
    pub length_days: u32,
    /// Worst-day maximum contiguous free hours per qualifying technician,
    /// rounded to two decimals for display
    pub tech_free_hours: BTreeMap<String, f64>,
    /// Row index to the stable set of technician names committed to it
    pub assignment: BTreeMap<usize, BTreeSet<String>>,
}

/// Deserialize a schedule request from JSON with contextual errors.
///
/// Appointment and absence records are external data and are parsed
/// leniently: a record that does not deserialize (missing instant, wrong
/// shape) is dropped with a debug log and the rest of the request stands.
/// Errors in the request's own configuration fields remain fatal.
pub fn parse_request_json_str(json: &str) -> anyhow::Result<ScheduleRequest> {
    let mut value: serde_json::Value =
        serde_json::from_str(json).context("Failed to deserialize schedule request JSON")?;
    if let Some(fields) = value.as_object_mut() {
        retain_parsable::<Appointment>(fields, "appointments");
        retain_parsable::<Absence>(fields, "absences");
    }
    let request: ScheduleRequest =
        serde_json::from_value(value).context("Failed to deserialize schedule request JSON")?;
    Ok(request)
}

/// Drop the elements of the named array field that fail to deserialize
/// as `T`, keeping the rest in order.
fn retain_parsable<T: serde::de::DeserializeOwned>(
    fields: &mut serde_json::Map<String, serde_json::Value>,
    field: &str,
) {
    if let Some(serde_json::Value::Array(records)) = fields.get_mut(field) {
        records.retain(|record| {
            let parses = serde_json::from_value::<T>(record.clone()).is_ok();
            if !parses {
                debug!("Skipping malformed {field} record: {record}");
            }
            parses
        });
    }
}

/// Serialize a candidate list to JSON for an HTTP or CLI caller.
pub fn candidates_to_json(candidates: &[Candidate]) -> anyhow::Result<String> {
    serde_json::to_string(candidates).context("Failed to serialize candidate list")
}
