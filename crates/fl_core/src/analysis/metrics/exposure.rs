//! Per-player and per-team exposure over an accepted batch.

use std::collections::BTreeMap;

use crate::models::lineup::Lineup;

/// Fraction of the batch containing each player id.
pub fn player_exposure(lineups: &[Lineup]) -> BTreeMap<String, f64> {
    let mut counts: BTreeMap<String, u64> = BTreeMap::new();
    for lineup in lineups {
        for id in lineup.player_ids() {
            *counts.entry(id.clone()).or_insert(0) += 1;
        }
    }
    let n = lineups.len() as f64;
    counts.into_iter().map(|(id, c)| (id, if n > 0.0 { c as f64 / n } else { 0.0 })).collect()
}

/// Fraction of the batch containing at least one player from each team.
pub fn team_exposure(lineups: &[Lineup]) -> BTreeMap<String, f64> {
    let mut counts: BTreeMap<String, u64> = BTreeMap::new();
    for lineup in lineups {
        for team in lineup.team_counts.keys() {
            *counts.entry(team.clone()).or_insert(0) += 1;
        }
    }
    let n = lineups.len() as f64;
    counts.into_iter().map(|(team, c)| (team, if n > 0.0 { c as f64 / n } else { 0.0 })).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap as Map;

    fn lineup(ids: &[&str], teams: &[&str]) -> Lineup {
        let mut team_counts: Map<String, u8> = Map::new();
        for team in teams {
            *team_counts.entry(team.to_string()).or_insert(0) += 1;
        }
        Lineup {
            slot_assignment: ids.iter().map(|s| s.to_string()).collect(),
            salary_total: 0,
            team_counts,
        }
    }

    #[test]
    fn test_player_exposure_counts_fraction_of_batch() {
        let batch = vec![
            lineup(&["a", "b"], &["BOS"]),
            lineup(&["a", "c"], &["DEN"]),
        ];
        let exposure = player_exposure(&batch);
        assert_eq!(exposure["a"], 1.0);
        assert_eq!(exposure["b"], 0.5);
        assert_eq!(exposure["c"], 0.5);
    }

    #[test]
    fn test_team_exposure() {
        let batch = vec![
            lineup(&["a", "b"], &["BOS", "BOS"]),
            lineup(&["c", "d"], &["BOS", "DEN"]),
        ];
        let exposure = team_exposure(&batch);
        // BOS appears in both lineups regardless of how many players it has.
        assert_eq!(exposure["BOS"], 1.0);
        assert_eq!(exposure["DEN"], 0.5);
    }

    #[test]
    fn test_empty_batch() {
        assert!(player_exposure(&[]).is_empty());
        assert!(team_exposure(&[]).is_empty());
    }
}
