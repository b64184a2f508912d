//! Row satisfaction checking: exact joint feasibility of a staffing demand
//! against a per-technician free-hours map.
//!
//! A technician may qualify for several rows but can serve only one, so the
//! check is a bipartite matching problem, not a per-row cardinality test.
//! Each row expands into `count` identical slots and an augmenting-path
//! matching decides whether every slot can be saturated by a distinct
//! technician. Row counts are small, so the quadratic-ish augmenting search
//! is ample.

use crate::api::{StaffingRow, Technician};
use std::collections::{BTreeMap, BTreeSet};

/// Technicians able to fill `row` given the day's free-hours map: active,
/// carrying an acceptable type tag, and free for at least the required
/// contiguous hours. The free-hours comparison uses the unrounded value.
pub fn eligible_for_row(
    row: &StaffingRow,
    technicians: &[Technician],
    free_hours: &BTreeMap<String, f64>,
) -> BTreeSet<String> {
    let mut eligible = BTreeSet::new();
    for tech in technicians.iter().filter(|t| t.active) {
        if !tech.has_any_type(&row.acceptable_types) {
            continue;
        }
        let name = tech.display_name();
        if let Some(hours) = free_hours.get(name) {
            if *hours >= row.required_hours {
                eligible.insert(name.to_string());
            }
        }
    }
    eligible
}

/// Try to assign distinct technicians to every row's slots.
///
/// `eligible` is parallel to `rows`. On success the returned map has one
/// entry per row index; rows with `count == 0` map to an empty set, and no
/// technician appears under more than one row. `None` means the joint demand
/// is infeasible even though individual rows may look satisfiable.
///
/// Candidate technicians are tried most-constrained first (fewest eligible
/// rows, then name order), so feasible assignments prefer to leave the
/// flexible technicians unassigned.
pub fn match_rows(
    rows: &[StaffingRow],
    eligible: &[BTreeSet<String>],
) -> Option<BTreeMap<usize, BTreeSet<String>>> {
    debug_assert_eq!(rows.len(), eligible.len());

    // A row demanding more technicians than are eligible for it can never
    // be saturated; bail out before materializing any slots. This also
    // bounds the slot expansion below, which would otherwise allocate
    // Θ(Σ count) for arbitrarily large counts.
    for (row, set) in rows.iter().zip(eligible) {
        if row.count as usize > set.len() {
            return None;
        }
    }

    // Union of eligible technicians, indexed for the matching arrays.
    let tech_names: Vec<String> = eligible
        .iter()
        .flatten()
        .collect::<BTreeSet<_>>()
        .into_iter()
        .cloned()
        .collect();
    let tech_index: BTreeMap<&str, usize> = tech_names
        .iter()
        .enumerate()
        .map(|(i, name)| (name.as_str(), i))
        .collect();

    // Eligibility degree: how many rows each technician could serve.
    let mut degree = vec![0usize; tech_names.len()];
    for set in eligible {
        for name in set {
            degree[tech_index[name.as_str()]] += 1;
        }
    }

    // Per-row candidate order: most-constrained technicians first.
    let candidates: Vec<Vec<usize>> = eligible
        .iter()
        .map(|set| {
            let mut row_techs: Vec<usize> =
                set.iter().map(|name| tech_index[name.as_str()]).collect();
            row_techs.sort_by_key(|&t| (degree[t], tech_names[t].clone()));
            row_techs
        })
        .collect();

    // One slot per required technician, tagged with its row.
    let slot_rows: Vec<usize> = rows
        .iter()
        .enumerate()
        .flat_map(|(r, row)| std::iter::repeat(r).take(row.count as usize))
        .collect();

    let mut slot_of_tech: Vec<Option<usize>> = vec![None; tech_names.len()];
    for slot in 0..slot_rows.len() {
        let mut visited = vec![false; tech_names.len()];
        if !augment(slot, &slot_rows, &candidates, &mut slot_of_tech, &mut visited) {
            return None;
        }
    }

    let mut assignment: BTreeMap<usize, BTreeSet<String>> =
        (0..rows.len()).map(|r| (r, BTreeSet::new())).collect();
    for (tech, slot) in slot_of_tech.iter().enumerate() {
        if let Some(slot) = slot {
            let row = slot_rows[*slot];
            if let Some(names) = assignment.get_mut(&row) {
                names.insert(tech_names[tech].clone());
            }
        }
    }
    Some(assignment)
}

/// Boolean verdict of [`match_rows`].
pub fn rows_satisfiable(rows: &[StaffingRow], eligible: &[BTreeSet<String>]) -> bool {
    match_rows(rows, eligible).is_some()
}

fn augment(
    slot: usize,
    slot_rows: &[usize],
    candidates: &[Vec<usize>],
    slot_of_tech: &mut Vec<Option<usize>>,
    visited: &mut Vec<bool>,
) -> bool {
    for &tech in &candidates[slot_rows[slot]] {
        if visited[tech] {
            continue;
        }
        visited[tech] = true;
        match slot_of_tech[tech] {
            None => {
                slot_of_tech[tech] = Some(slot);
                return true;
            }
            Some(holder) => {
                if augment(holder, slot_rows, candidates, slot_of_tech, visited) {
                    slot_of_tech[tech] = Some(slot);
                    return true;
                }
            }
        }
    }
    false
}
