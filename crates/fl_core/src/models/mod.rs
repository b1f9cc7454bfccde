//! Data model: players, pool, rules, lineups.

pub mod lineup;
pub mod player;
pub mod pool;
pub mod rules;

pub use lineup::Lineup;
pub use player::{InjuryStatus, Player, Position, PositionSet};
pub use pool::PlayerPool;
pub use rules::{Rules, SlotRequirement, SlotSpec};
