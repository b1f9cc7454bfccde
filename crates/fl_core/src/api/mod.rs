//! External-facing API surfaces.

pub mod json_api;

pub use json_api::{
    generate_lineups_json, validate_lineup_json, GenerateRequest, GenerateResponse,
    ValidateRequest, ValidateResponse, SCHEMA_VERSION,
};
