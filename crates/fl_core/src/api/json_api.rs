//! JSON request/response surface over the core engine.
//!
//! Host processes that do not want to link against the model types drive
//! the engine through these two entry points. Envelopes are schema
//! versioned; a mismatch is rejected before anything else is parsed into
//! domain types.

use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::models::lineup::Lineup;
use crate::models::player::Player;
use crate::models::pool::PlayerPool;
use crate::models::rules::Rules;
use crate::analysis::metrics::Metrics;
use crate::sampler::config::SamplerConfig;
use crate::sampler::engine::{generate, generate_sharded, SampleOutcome};
use crate::validate::{validate, ViolationCode};

pub const SCHEMA_VERSION: u8 = 1;

// ============================================================================
// Generate
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct GenerateRequest {
    pub schema_version: u8,
    pub players: Vec<Player>,
    pub rules: Rules,
    pub sampler: SamplerConfig,
    /// Worker count for sharded generation; absent or 0/1 means the
    /// sequential reference path.
    #[serde(default)]
    pub workers: usize,
}

#[derive(Debug, Serialize)]
pub struct GenerateResponse {
    pub schema_version: u8,
    pub outcome: SampleOutcome,
    pub lineups: Vec<Lineup>,
    pub metrics: Metrics,
}

/// Run a sampling request end to end: parse, pool construction, config
/// validation, generation, response serialization.
pub fn generate_lineups_json(request: &str) -> Result<String, ApiError> {
    let request: GenerateRequest = serde_json::from_str(request)?;
    check_schema(request.schema_version)?;

    let pool = PlayerPool::new(request.players)?;
    let batch = if request.workers > 1 {
        generate_sharded(&pool, &request.rules, request.sampler, request.workers)?
    } else {
        generate(&pool, &request.rules, request.sampler)?
    };

    let response = GenerateResponse {
        schema_version: SCHEMA_VERSION,
        outcome: batch.outcome,
        lineups: batch.lineups,
        metrics: batch.metrics,
    };
    Ok(serde_json::to_string(&response)?)
}

// ============================================================================
// Validate
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct ValidateRequest {
    pub schema_version: u8,
    pub players: Vec<Player>,
    pub rules: Rules,
    /// Candidate player ids, one per roster slot.
    pub lineup: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct ValidateResponse {
    pub schema_version: u8,
    pub valid: bool,
    pub reasons: Vec<ViolationCode>,
    pub slot_assignment: Option<Vec<String>>,
}

/// Validate one candidate lineup against a pool and ruleset.
pub fn validate_lineup_json(request: &str) -> Result<String, ApiError> {
    let request: ValidateRequest = serde_json::from_str(request)?;
    check_schema(request.schema_version)?;

    let pool = PlayerPool::new(request.players)?;
    let result = validate(&request.lineup, &pool, &request.rules);

    let response = ValidateResponse {
        schema_version: SCHEMA_VERSION,
        valid: result.valid,
        reasons: result.reasons,
        slot_assignment: result.slot_assignment,
    };
    Ok(serde_json::to_string(&response)?)
}

fn check_schema(found: u8) -> Result<(), ApiError> {
    if found != SCHEMA_VERSION {
        return Err(ApiError::SchemaVersion { found, expected: SCHEMA_VERSION });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn players_json() -> serde_json::Value {
        let mut players = Vec::new();
        let specs = [
            ("pg1", vec!["PG"], "BOS"),
            ("pg2", vec!["PG"], "DEN"),
            ("sg1", vec!["SG"], "LAL"),
            ("sg2", vec!["SG"], "MIA"),
            ("sf1", vec!["SF"], "BOS"),
            ("sf2", vec!["SF"], "DEN"),
            ("pf1", vec!["PF"], "LAL"),
            ("pf2", vec!["PF"], "MIA"),
            ("c1", vec!["C"], "BOS"),
            ("c2", vec!["C"], "DEN"),
            ("fx1", vec!["PG", "SF"], "LAL"),
            ("fx2", vec!["SG", "PF"], "MIA"),
        ];
        for (id, positions, team) in specs {
            players.push(json!({
                "id": id,
                "salary": 5500,
                "positions": positions,
                "team": team,
                "projection": 25.0,
                "ownership": 0.15
            }));
        }
        serde_json::Value::Array(players)
    }

    fn rules_json() -> serde_json::Value {
        serde_json::to_value(crate::models::rules::Rules::nba_classic()).unwrap()
    }

    #[test]
    fn test_generate_round_trip() {
        let request = json!({
            "schema_version": 1,
            "players": players_json(),
            "rules": rules_json(),
            "sampler": { "n": 2, "seed": 5, "max_attempts_multiplier": 5000 }
        });
        let response = generate_lineups_json(&request.to_string()).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&response).unwrap();
        assert_eq!(parsed["schema_version"], 1);
        assert_eq!(parsed["outcome"]["status"], "complete");
        assert_eq!(parsed["lineups"].as_array().unwrap().len(), 2);
        assert!(parsed["metrics"]["total_attempts"].is_number());
    }

    #[test]
    fn test_generate_rejects_schema_mismatch() {
        let request = json!({
            "schema_version": 9,
            "players": players_json(),
            "rules": rules_json(),
            "sampler": { "n": 1, "seed": 1 }
        });
        let err = generate_lineups_json(&request.to_string()).unwrap_err();
        assert!(matches!(err, ApiError::SchemaVersion { found: 9, expected: 1 }));
    }

    #[test]
    fn test_validate_reports_reason_codes() {
        let request = json!({
            "schema_version": 1,
            "players": players_json(),
            "rules": rules_json(),
            "lineup": ["pg1", "pg1", "sg1", "sf1", "pf1", "c1", "fx1", "ghost"]
        });
        let response = validate_lineup_json(&request.to_string()).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&response).unwrap();
        assert_eq!(parsed["valid"], false);
        let reasons: Vec<String> = parsed["reasons"]
            .as_array()
            .unwrap()
            .iter()
            .map(|v| v.as_str().unwrap().to_string())
            .collect();
        assert!(reasons.contains(&"DUPLICATE_PLAYER".to_string()));
        assert!(reasons.contains(&"MISSING_PLAYER".to_string()));
    }

    #[test]
    fn test_validate_happy_path() {
        let request = json!({
            "schema_version": 1,
            "players": players_json(),
            "rules": rules_json(),
            "lineup": ["pg1", "sg1", "sf1", "pf1", "c1", "pg2", "sf2", "c2"]
        });
        let response = validate_lineup_json(&request.to_string()).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&response).unwrap();
        assert_eq!(parsed["valid"], true);
        assert_eq!(parsed["reasons"].as_array().unwrap().len(), 0);
        assert_eq!(parsed["slot_assignment"].as_array().unwrap().len(), 8);
    }
}
