//! Shared DTOs for the suitefix workspace.
//!
//! # Design constraints
//! - Reports are printed as JSON and may be kept next to the rewritten suite.
//! - Prefer adding optional fields over changing semantics.

pub mod outcome;
pub mod report;

/// Schema identifiers.
pub mod schema {
    pub const SUITEFIX_RUN_V1: &str = "suitefix.run.v1";
    pub const SUITEFIX_REPLACE_V1: &str = "suitefix.replace.v1";
}

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolInfo {
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}
