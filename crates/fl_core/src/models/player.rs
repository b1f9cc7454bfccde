//! Player data for the lineup engine.
//!
//! # Boundary Contract
//! - This is the engine-side representation of one pool entry
//! - Produced by the external ingester (CSV/JSON) before a run starts
//! - Immutable for the duration of a sampling run; owned by `PlayerPool`
//!
//! Eligible positions are modelled as a *set* (`PositionSet`), never an
//! ordered list. Slot requirements intersect against that set, so position
//! order in the source data can never change an eligibility verdict.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ============================================================================
// Position
// ============================================================================

/// Roster position tag (NBA classic slate).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "UPPERCASE")]
pub enum Position {
    PG,
    SG,
    SF,
    PF,
    C,
}

impl Position {
    /// All positions in canonical (bit) order.
    pub const ALL: [Position; 5] = [
        Position::PG,
        Position::SG,
        Position::SF,
        Position::PF,
        Position::C,
    ];

    #[inline]
    pub(crate) const fn bit(self) -> u8 {
        match self {
            Position::PG => 1 << 0,
            Position::SG => 1 << 1,
            Position::SF => 1 << 2,
            Position::PF => 1 << 3,
            Position::C => 1 << 4,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Position::PG => "PG",
            Position::SG => "SG",
            Position::SF => "SF",
            Position::PF => "PF",
            Position::C => "C",
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Position {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PG" => Ok(Position::PG),
            "SG" => Ok(Position::SG),
            "SF" => Ok(Position::SF),
            "PF" => Ok(Position::PF),
            "C" => Ok(Position::C),
            other => Err(format!("unknown position: {}", other)),
        }
    }
}

// ============================================================================
// PositionSet
// ============================================================================

/// Compact set of positions (bitmask over `Position`).
///
/// Iteration order is the canonical `Position::ALL` order regardless of
/// insertion order, which keeps every downstream consumer deterministic.
/// Serialized as a JSON array of position tags, e.g. `["PG", "SG"]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct PositionSet(u8);

impl PositionSet {
    pub const fn empty() -> Self {
        PositionSet(0)
    }

    pub fn from_slice(positions: &[Position]) -> Self {
        positions.iter().copied().collect()
    }

    pub fn insert(&mut self, pos: Position) {
        self.0 |= pos.bit();
    }

    #[must_use]
    pub fn with(mut self, pos: Position) -> Self {
        self.insert(pos);
        self
    }

    #[inline]
    pub fn contains(self, pos: Position) -> bool {
        self.0 & pos.bit() != 0
    }

    /// True if the two sets share at least one position.
    #[inline]
    pub fn intersects(self, other: PositionSet) -> bool {
        self.0 & other.0 != 0
    }

    pub fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Iterate members in canonical order.
    pub fn iter(self) -> impl Iterator<Item = Position> {
        Position::ALL.into_iter().filter(move |p| self.contains(*p))
    }
}

impl FromIterator<Position> for PositionSet {
    fn from_iter<I: IntoIterator<Item = Position>>(iter: I) -> Self {
        let mut set = PositionSet::empty();
        for pos in iter {
            set.insert(pos);
        }
        set
    }
}

impl Serialize for PositionSet {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.iter())
    }
}

impl<'de> Deserialize<'de> for PositionSet {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let positions = Vec::<Position>::deserialize(deserializer)?;
        Ok(positions.into_iter().collect())
    }
}

// ============================================================================
// Injury status
// ============================================================================

/// Injury report designation. Absent means no designation.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "UPPERCASE")]
pub enum InjuryStatus {
    Out,
    Doubtful,
    Questionable,
    Probable,
}

// ============================================================================
// Player
// ============================================================================

/// One pool entry, keyed by a stable `id` unique within the pool.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Player {
    pub id: String,

    /// Display name; not used by any rule check.
    #[serde(default)]
    pub name: String,

    pub salary: u32,

    /// Eligible positions (non-empty; enforced at pool construction).
    pub positions: PositionSet,

    /// Team short code, e.g. "BOS".
    pub team: String,

    /// Projected fantasy points. Absent in source data → 0.
    #[serde(default)]
    pub projection: f64,

    /// Ownership estimate in [0, 1]. Absent in source data → 0.
    #[serde(default)]
    pub ownership: f64,

    #[serde(default = "default_active")]
    pub active: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub injury_status: Option<InjuryStatus>,
}

fn default_active() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_set_ignores_insertion_order() {
        let a = PositionSet::from_slice(&[Position::SG, Position::PG]);
        let b = PositionSet::from_slice(&[Position::PG, Position::SG]);
        assert_eq!(a, b);
        let order: Vec<Position> = a.iter().collect();
        assert_eq!(order, vec![Position::PG, Position::SG]);
    }

    #[test]
    fn test_position_set_intersects() {
        let guard = PositionSet::from_slice(&[Position::PG, Position::SG]);
        let forward = PositionSet::from_slice(&[Position::SF, Position::PF]);
        let combo = PositionSet::from_slice(&[Position::SG, Position::SF]);
        assert!(!guard.intersects(forward));
        assert!(guard.intersects(combo));
        assert!(forward.intersects(combo));
        assert!(!PositionSet::empty().intersects(guard));
    }

    #[test]
    fn test_player_json_round_trip() {
        let json = r#"{
            "id": "p1",
            "name": "Sample Guard",
            "salary": 8200,
            "positions": ["PG", "SG"],
            "team": "BOS",
            "projection": 41.5,
            "ownership": 0.22,
            "active": true,
            "injury_status": "QUESTIONABLE"
        }"#;
        let player: Player = serde_json::from_str(json).unwrap();
        assert_eq!(player.positions, PositionSet::from_slice(&[Position::PG, Position::SG]));
        assert_eq!(player.injury_status, Some(InjuryStatus::Questionable));

        let back = serde_json::to_string(&player).unwrap();
        let again: Player = serde_json::from_str(&back).unwrap();
        assert_eq!(player, again);
    }

    #[test]
    fn test_player_defaults_for_absent_fields() {
        let json = r#"{"id": "p2", "salary": 4000, "positions": ["C"], "team": "DEN"}"#;
        let player: Player = serde_json::from_str(json).unwrap();
        assert_eq!(player.projection, 0.0);
        assert_eq!(player.ownership, 0.0);
        assert!(player.active);
        assert!(player.injury_status.is_none());
    }
}
