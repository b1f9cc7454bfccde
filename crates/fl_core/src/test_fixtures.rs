//! Shared test fixtures: small pools with known shape.

use crate::models::player::{Player, Position, PositionSet};
use crate::models::pool::PlayerPool;

pub(crate) fn player(id: &str, team: &str, salary: u32, positions: &[Position]) -> Player {
    Player {
        id: id.to_string(),
        name: String::new(),
        salary,
        positions: PositionSet::from_slice(positions),
        team: team.to_string(),
        projection: 0.0,
        ownership: 0.0,
        active: true,
        injury_status: None,
    }
}

fn tuned(
    id: &str,
    team: &str,
    salary: u32,
    positions: &[Position],
    projection: f64,
    ownership: f64,
) -> Player {
    let mut p = player(id, team, salary, positions);
    p.projection = projection;
    p.ownership = ownership;
    p
}

/// Twelve players: two eligible per PG/SG/SF/PF/C plus two multi-position
/// flex players, spread over four teams. Every 8-player subset fits under
/// the 50k cap and the default team limit, so rejections come only from
/// slot feasibility, dedupe, or diversity.
pub(crate) fn classic_pool() -> PlayerPool {
    PlayerPool::new(classic_players(&["BOS", "DEN", "LAL", "MIA"])).expect("fixture pool")
}

/// Same twelve players squeezed onto two teams, for team-limit scenarios.
pub(crate) fn two_team_pool() -> PlayerPool {
    PlayerPool::new(classic_players(&["BOS", "DEN"])).expect("fixture pool")
}

fn classic_players(teams: &[&str]) -> Vec<Player> {
    use Position::*;
    let specs: [(&str, u32, &[Position], f64, f64); 12] = [
        ("pg1", 6200, &[PG], 38.0, 0.32),
        ("pg2", 5200, &[PG], 30.0, 0.12),
        ("sg1", 6000, &[SG], 36.0, 0.28),
        ("sg2", 4800, &[SG], 26.0, 0.08),
        ("sf1", 5900, &[SF], 34.0, 0.25),
        ("sf2", 4600, &[SF], 24.0, 0.06),
        ("pf1", 5800, &[PF], 33.0, 0.22),
        ("pf2", 4700, &[PF], 25.0, 0.07),
        ("c1", 6100, &[C], 37.0, 0.35),
        ("c2", 4500, &[C], 23.0, 0.02),
        ("fx1", 5500, &[PG, SF], 31.0, 0.18),
        ("fx2", 5300, &[SG, PF], 29.0, 0.15),
    ];
    specs
        .iter()
        .enumerate()
        .map(|(i, (id, salary, positions, projection, ownership))| {
            tuned(id, teams[i % teams.len()], *salary, positions, *projection, *ownership)
        })
        .collect()
}
