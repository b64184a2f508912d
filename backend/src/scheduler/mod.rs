//! Scheduling kernel: availability evaluation and demand satisfaction.
//!
//! The kernel is a pure, synchronous function of its request: no I/O, no
//! spawning, no shared state. Inputs may be shared across concurrent
//! invocations freely.

pub mod availability;
pub mod busy;
pub mod matching;
pub mod scanner;


use crate::api::{Candidate, ScheduleRequest};
use crate::error::Result;

/// Find the earliest future workdays (or consecutive-day blocks) on which
/// the request's staffing rows are jointly satisfiable.
///
/// Validates the configuration first; a valid request that matches nothing
/// within the horizon yields an empty list, not an error.
pub fn find_candidates(request: &ScheduleRequest) -> Result<Vec<Candidate>> {
    request.validate()?;
    Ok(scanner::scan(request))
}
