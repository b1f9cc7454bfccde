//! Slot assignment via minimum-cost bipartite matching.
//!
//! A greedy assignment in slot order can wrongly report infeasibility when
//! an early pick blocks a later slot (the classic failure: a multi-position
//! player consumed by a flex slot that a single-position teammate could not
//! fill). Kuhn-Munkres over the full candidate × slot cost matrix finds a
//! complete assignment whenever one exists, so slot order can never cause a
//! false rejection.

use pathfinding::kuhn_munkres::kuhn_munkres_min;
use pathfinding::matrix::Matrix;

use crate::models::pool::PlayerPool;
use crate::models::rules::Rules;

/// Cost assigned to a player/slot pair whose position sets do not
/// intersect. One such edge in the chosen assignment pushes the total past
/// the feasibility threshold.
const COST_INCOMPATIBLE: i64 = 1_000_000;

/// Find a complete slot assignment for `candidates` (pool indices, one per
/// roster slot) or report infeasibility.
///
/// Returns `assignment[slot_idx] = pool index`. Among multiple feasible
/// assignments the result is deterministic: candidate order feeds the
/// tie-break cost, so equal-cost matchings resolve the same way on every
/// run and platform.
pub fn allocate(candidates: &[usize], pool: &PlayerPool, rules: &Rules) -> Option<Vec<usize>> {
    let n = rules.roster_slots.len();
    if candidates.len() != n || n == 0 {
        return None;
    }

    let costs = Matrix::from_fn(n, n, |(row, slot_idx)| {
        let player = pool.by_index(candidates[row]);
        let spec = &rules.roster_slots[slot_idx];
        let base = if spec.accepts(player.positions) { 0 } else { COST_INCOMPATIBLE };
        // Deterministic tie-break: prefer keeping earlier candidates in
        // earlier slots when several assignments are otherwise equal.
        base + row as i64
    });

    let (total, by_row) = kuhn_munkres_min(&costs);
    if total >= COST_INCOMPATIBLE {
        return None;
    }

    // by_row[row] = slot_idx → invert to slot-major order.
    let mut by_slot = vec![0usize; n];
    for (row, &slot_idx) in by_row.iter().enumerate() {
        by_slot[slot_idx] = candidates[row];
    }
    Some(by_slot)
}
