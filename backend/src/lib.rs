//! # TAS Rust Backend
//!
//! Technician availability scheduling kernel.
//!
//! Given a fleet of named technicians, their committed time (appointments
//! and absences sourced from an external field-service system), and a
//! staffing demand expressed as rows of "at least K technicians of approved
//! types, each free for H contiguous hours, for D consecutive working
//! days", this crate finds the earliest future workdays and blocks on which
//! the whole demand is jointly satisfiable.
//!
//! ## Features
//!
//! - **Interval arithmetic**: clipping, merging, and subtraction of
//!   half-open busy intervals within a working window
//! - **Availability**: per-technician maximum contiguous free time per day
//! - **Joint satisfaction**: exact bipartite matching of technicians to
//!   staffing rows, never double-assigning a technician
//! - **Scanning**: chronological candidate days and multi-day blocks over a
//!   configurable horizon
//!
//! ## Architecture
//!
//! - [`api`]: inbound request and outbound candidate contracts (JSON-ready)
//! - [`models`]: time primitives and interval arithmetic
//! - [`scheduler`]: busy-set building, free-time evaluation, row matching,
//!   and the candidate scanner
//! - [`error`]: the kernel's narrow error taxonomy
//!
//! The kernel is pure and single-threaded by design: each request is a
//! synchronous call computing its answer from its arguments. Booking,
//! ingestion, persistence, and HTTP surfaces are external collaborators.
//!
//! ## Example
//!
//! ```rust,ignore
//! use tas_rust::{find_candidates, parse_request_json_str};
//!
//! let request = parse_request_json_str(&request_json)?;
//! let candidates = find_candidates(&request)?;
//! for candidate in &candidates {
//!     println!("{} ({} day block)", candidate.start_date, candidate.length_days);
//! }
//! ```

pub mod api;
pub mod error;
pub mod models;
pub mod scheduler;

pub use api::{
    candidates_to_json, parse_request_json_str, Absence, Appointment, Candidate, ScheduleRequest,
    StaffingRow, Technician,
};
pub use error::{Error, Result};
pub use scheduler::find_candidates;
