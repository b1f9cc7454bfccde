//! Contest ruleset: roster shape and numeric limits.
//!
//! A `Rules` value is immutable for a run. Site presets live here as
//! templates; contest-specific overrides (salary cap, team limit) are
//! applied with the `with_*` builders.

use std::collections::BTreeSet;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::models::player::{InjuryStatus, Position, PositionSet};

// ============================================================================
// Slot requirements
// ============================================================================

/// What a roster slot accepts.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SlotRequirement {
    /// UTIL-style slot: any position qualifies.
    Any,
    /// The player's position set must intersect this set.
    Positions(PositionSet),
}

/// One positional requirement in a roster template.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SlotSpec {
    /// Display label, e.g. "PG", "G", "UTIL".
    pub label: String,
    pub requirement: SlotRequirement,
}

impl SlotSpec {
    pub fn single(label: &str, pos: Position) -> Self {
        SlotSpec {
            label: label.to_string(),
            requirement: SlotRequirement::Positions(PositionSet::empty().with(pos)),
        }
    }

    pub fn flex(label: &str, positions: &[Position]) -> Self {
        SlotSpec {
            label: label.to_string(),
            requirement: SlotRequirement::Positions(PositionSet::from_slice(positions)),
        }
    }

    pub fn util(label: &str) -> Self {
        SlotSpec { label: label.to_string(), requirement: SlotRequirement::Any }
    }

    /// Eligibility is set intersection, never order-sensitive.
    #[inline]
    pub fn accepts(&self, positions: PositionSet) -> bool {
        match self.requirement {
            SlotRequirement::Any => !positions.is_empty(),
            SlotRequirement::Positions(required) => required.intersects(positions),
        }
    }

    /// Number of distinct positions the slot accepts. UTIL counts as
    /// accepting every position, so it sorts after every explicit set.
    pub fn breadth(&self) -> usize {
        match self.requirement {
            SlotRequirement::Any => Position::ALL.len() + 1,
            SlotRequirement::Positions(set) => set.len(),
        }
    }
}

// ============================================================================
// Rules
// ============================================================================

/// Immutable contest configuration handed to the engine.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Rules {
    pub roster_slots: Vec<SlotSpec>,
    pub salary_cap: u32,
    pub max_per_team: u8,
    #[serde(default = "default_require_active")]
    pub require_active: bool,
    #[serde(default = "default_blocked_statuses")]
    pub blocked_injury_statuses: BTreeSet<InjuryStatus>,
}

fn default_require_active() -> bool {
    true
}

fn default_blocked_statuses() -> BTreeSet<InjuryStatus> {
    BTreeSet::from([InjuryStatus::Out])
}

/// 8-slot NBA classic template: PG, SG, SF, PF, C, G, F, UTIL.
static NBA_CLASSIC: Lazy<Rules> = Lazy::new(|| Rules {
    roster_slots: vec![
        SlotSpec::single("PG", Position::PG),
        SlotSpec::single("SG", Position::SG),
        SlotSpec::single("SF", Position::SF),
        SlotSpec::single("PF", Position::PF),
        SlotSpec::single("C", Position::C),
        SlotSpec::flex("G", &[Position::PG, Position::SG]),
        SlotSpec::flex("F", &[Position::SF, Position::PF]),
        SlotSpec::util("UTIL"),
    ],
    salary_cap: 50_000,
    max_per_team: 4,
    require_active: true,
    blocked_injury_statuses: default_blocked_statuses(),
});

impl Rules {
    /// Built-in NBA classic site preset.
    pub fn nba_classic() -> Self {
        NBA_CLASSIC.clone()
    }

    #[must_use]
    pub fn with_salary_cap(mut self, cap: u32) -> Self {
        self.salary_cap = cap;
        self
    }

    #[must_use]
    pub fn with_max_per_team(mut self, limit: u8) -> Self {
        self.max_per_team = limit;
        self
    }

    #[must_use]
    pub fn with_require_active(mut self, required: bool) -> Self {
        self.require_active = required;
        self
    }

    pub fn slot_count(&self) -> usize {
        self.roster_slots.len()
    }

    /// Deterministic slot processing order: most constrained first
    /// (single-position slots, then flex by breadth, then UTIL), ties broken
    /// by slot index. Both the sampler's per-slot draws and the allocator's
    /// tie-break costs use this order, so any feasible template produces one
    /// reproducible assignment.
    pub fn slot_order(&self) -> Vec<usize> {
        let mut order: Vec<usize> = (0..self.roster_slots.len()).collect();
        order.sort_by_key(|&i| (self.roster_slots[i].breadth(), i));
        order
    }

    /// Structural sanity, checked once at `generate()` entry.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.roster_slots.is_empty() {
            return Err(ConfigError::EmptyRoster);
        }
        if self.salary_cap == 0 {
            return Err(ConfigError::NonPositiveSalaryCap(self.salary_cap));
        }
        if self.max_per_team == 0 {
            return Err(ConfigError::ZeroTeamLimit);
        }
        Ok(())
    }
}
