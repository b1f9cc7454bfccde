//! Incremental salary tracking during candidate construction.
//!
//! One fresh tracker per candidate attempt; nothing is shared across
//! attempts. The validator's final check reuses [`lineup_salary`] so both
//! paths agree on the arithmetic.

use crate::models::player::Player;
use crate::validate::ViolationCode;

#[derive(Debug, Clone)]
pub struct SalaryTracker {
    cap: u32,
    total: u32,
}

impl SalaryTracker {
    pub fn new(cap: u32) -> Self {
        SalaryTracker { cap, total: 0 }
    }

    pub fn total(&self) -> u32 {
        self.total
    }

    /// Whether adding `salary` would stay under the cap.
    #[inline]
    pub fn fits(&self, salary: u32) -> bool {
        self.total.saturating_add(salary) <= self.cap
    }

    /// Add a player's salary, or report the violation without mutating.
    pub fn try_add(&mut self, salary: u32) -> Result<u32, ViolationCode> {
        if !self.fits(salary) {
            return Err(ViolationCode::SalaryCapExceeded);
        }
        self.total += salary;
        Ok(self.total)
    }
}

/// Total salary of a completed candidate.
pub fn lineup_salary<'a>(players: impl Iterator<Item = &'a Player>) -> u32 {
    players.map(|p| p.salary).fold(0u32, u32::saturating_add)
}
