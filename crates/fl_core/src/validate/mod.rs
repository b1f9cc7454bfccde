//! Shared lineup validator: the single source of truth for lineup legality.
//!
//! Every pipeline stage (optimizer output, variant generation, contest
//! field sampling) goes through [`validate`]. It is a pure function over
//! read-only `PlayerPool`/`Rules` references with no hidden state, so any
//! number of threads may call it concurrently.
//!
//! Policy: the validator collects *all* applicable violations rather than
//! stopping at the first. This feeds the sampler's per-reason rejection
//! tally and makes batch-level diagnostics meaningful.

pub mod allocator;
pub mod salary;
pub mod team_limit;

use std::fmt;

use fxhash::FxHashSet;
use serde::{Deserialize, Serialize};

use crate::models::pool::PlayerPool;
use crate::models::rules::Rules;

pub use allocator::allocate;
pub use salary::{lineup_salary, SalaryTracker};
pub use team_limit::TeamTracker;

// ============================================================================
// Violation codes
// ============================================================================

/// Why a candidate lineup is invalid. Serialized as the wire codes the
/// rest of the pipeline keys its tallies on, e.g. `SALARY_CAP_EXCEEDED`.
#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ViolationCode {
    RosterSizeMismatch,
    DuplicatePlayer,
    MissingPlayer,
    SlotEligibilityFail,
    SalaryCapExceeded,
    TeamLimitExceeded,
    InactivePlayer,
    InjuryStatusBlocked,
}

impl fmt::Display for ViolationCode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let code = match self {
            ViolationCode::RosterSizeMismatch => "ROSTER_SIZE_MISMATCH",
            ViolationCode::DuplicatePlayer => "DUPLICATE_PLAYER",
            ViolationCode::MissingPlayer => "MISSING_PLAYER",
            ViolationCode::SlotEligibilityFail => "SLOT_ELIGIBILITY_FAIL",
            ViolationCode::SalaryCapExceeded => "SALARY_CAP_EXCEEDED",
            ViolationCode::TeamLimitExceeded => "TEAM_LIMIT_EXCEEDED",
            ViolationCode::InactivePlayer => "INACTIVE_PLAYER",
            ViolationCode::InjuryStatusBlocked => "INJURY_STATUS_BLOCKED",
        };
        f.write_str(code)
    }
}

// ============================================================================
// Validation result
// ============================================================================

/// Verdict for one candidate. `reasons` is an ordered set: check order,
/// each code at most once, empty iff `valid`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ValidationResult {
    pub valid: bool,
    pub reasons: Vec<ViolationCode>,
    /// Player id per roster slot when the allocator found an assignment.
    /// Kept on failure paths too, to aid diagnostics (e.g. a lineup that
    /// slots fine but busts the cap).
    pub slot_assignment: Option<Vec<String>>,
}

fn push_unique(reasons: &mut Vec<ViolationCode>, code: ViolationCode) {
    if !reasons.contains(&code) {
        reasons.push(code);
    }
}

// ============================================================================
// Validator
// ============================================================================

/// Validate a candidate player set against the ruleset.
///
/// `player_ids` is interpreted in the caller's order; order only matters
/// for tie-breaking in the slot assignment, never for the verdict.
pub fn validate(player_ids: &[String], pool: &PlayerPool, rules: &Rules) -> ValidationResult {
    let mut reasons: Vec<ViolationCode> = Vec::new();

    if player_ids.len() != rules.roster_slots.len() {
        push_unique(&mut reasons, ViolationCode::RosterSizeMismatch);
    }

    let mut seen: FxHashSet<&str> = FxHashSet::default();
    for id in player_ids {
        if !seen.insert(id.as_str()) {
            push_unique(&mut reasons, ViolationCode::DuplicatePlayer);
        }
    }

    // Resolve ids; unknown ids are flagged and excluded from the numeric
    // checks below (an unknown player has no salary/team to count).
    let mut resolved: Vec<usize> = Vec::with_capacity(player_ids.len());
    let mut any_missing = false;
    for id in player_ids {
        match pool.index_of(id) {
            Some(idx) => resolved.push(idx),
            None => {
                any_missing = true;
                push_unique(&mut reasons, ViolationCode::MissingPlayer);
            }
        }
    }

    // Slot feasibility via matching; only meaningful when the candidate
    // count matches the template and every id resolved.
    let mut slot_assignment: Option<Vec<String>> = None;
    if player_ids.len() == rules.roster_slots.len() && !any_missing {
        match allocate(&resolved, pool, rules) {
            Some(by_slot) => {
                slot_assignment =
                    Some(by_slot.iter().map(|&idx| pool.by_index(idx).id.clone()).collect());
            }
            None => push_unique(&mut reasons, ViolationCode::SlotEligibilityFail),
        }
    }

    let total = lineup_salary(resolved.iter().map(|&idx| pool.by_index(idx)));
    if total > rules.salary_cap {
        push_unique(&mut reasons, ViolationCode::SalaryCapExceeded);
    }

    let mut teams = TeamTracker::new(rules.max_per_team);
    for &idx in &resolved {
        if teams.try_add(&pool.by_index(idx).team).is_err() {
            push_unique(&mut reasons, ViolationCode::TeamLimitExceeded);
        }
    }

    if rules.require_active {
        for &idx in &resolved {
            let player = pool.by_index(idx);
            if !player.active {
                push_unique(&mut reasons, ViolationCode::InactivePlayer);
            }
            if let Some(status) = player.injury_status {
                if rules.blocked_injury_statuses.contains(&status) {
                    push_unique(&mut reasons, ViolationCode::InjuryStatusBlocked);
                }
            }
        }
    }

    ValidationResult { valid: reasons.is_empty(), reasons, slot_assignment }
}
