//! Accepted lineup record.
//!
//! A `Lineup` is created only from a slot assignment that passed the
//! validator; it is immutable once accepted. Rejected candidates are
//! discarded, never repaired.

use std::collections::BTreeMap;
use std::hash::{Hash, Hasher};

use fxhash::FxHasher;
use serde::{Deserialize, Serialize};

use crate::models::pool::PlayerPool;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Lineup {
    /// Player id per roster slot, aligned with `Rules::roster_slots`.
    pub slot_assignment: Vec<String>,
    pub salary_total: u32,
    /// Team short code → player count. BTreeMap keeps serialized output
    /// order deterministic.
    pub team_counts: BTreeMap<String, u8>,
}

impl Lineup {
    /// Build from pool indices (one per slot, in slot order), deriving
    /// salary and team counts.
    pub(crate) fn from_assignment(assignment: &[usize], pool: &PlayerPool) -> Self {
        let mut salary_total: u32 = 0;
        let mut team_counts: BTreeMap<String, u8> = BTreeMap::new();
        let mut slot_assignment = Vec::with_capacity(assignment.len());
        for &idx in assignment {
            let player = pool.by_index(idx);
            salary_total += player.salary;
            *team_counts.entry(player.team.clone()).or_insert(0) += 1;
            slot_assignment.push(player.id.clone());
        }
        Lineup { slot_assignment, salary_total, team_counts }
    }

    pub fn player_ids(&self) -> &[String] {
        &self.slot_assignment
    }

    /// Sorted view of the player set, used for keys and overlap.
    pub fn sorted_ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.slot_assignment.iter().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }

    /// Stable key over the (order-insensitive) player set. FxHasher, not
    /// DefaultHasher: the latter is not stable across rustc versions.
    pub fn key(&self) -> u64 {
        let mut hasher = FxHasher::default();
        for id in self.sorted_ids() {
            id.hash(&mut hasher);
        }
        hasher.finish()
    }

    /// Jaccard similarity of the two player sets: |A ∩ B| / |A ∪ B|.
    pub fn jaccard(&self, other: &Lineup) -> f64 {
        let a = self.sorted_ids();
        let b = other.sorted_ids();
        let mut i = 0;
        let mut j = 0;
        let mut shared = 0usize;
        while i < a.len() && j < b.len() {
            match a[i].cmp(b[j]) {
                std::cmp::Ordering::Equal => {
                    shared += 1;
                    i += 1;
                    j += 1;
                }
                std::cmp::Ordering::Less => i += 1,
                std::cmp::Ordering::Greater => j += 1,
            }
        }
        let union = a.len() + b.len() - shared;
        if union == 0 {
            return 0.0;
        }
        shared as f64 / union as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lineup(ids: &[&str]) -> Lineup {
        Lineup {
            slot_assignment: ids.iter().map(|s| s.to_string()).collect(),
            salary_total: 0,
            team_counts: BTreeMap::new(),
        }
    }

    #[test]
    fn test_key_is_order_insensitive() {
        let a = lineup(&["p1", "p2", "p3"]);
        let b = lineup(&["p3", "p1", "p2"]);
        assert_eq!(a.key(), b.key());
        let c = lineup(&["p1", "p2", "p4"]);
        assert_ne!(a.key(), c.key());
    }

    #[test]
    fn test_jaccard() {
        let a = lineup(&["p1", "p2", "p3", "p4"]);
        let b = lineup(&["p3", "p4", "p5", "p6"]);
        // 2 shared over 6 union
        assert!((a.jaccard(&b) - 2.0 / 6.0).abs() < 1e-12);
        assert_eq!(a.jaccard(&a), 1.0);

        let disjoint = lineup(&["x1", "x2", "x3", "x4"]);
        assert_eq!(a.jaccard(&disjoint), 0.0);
    }
}
