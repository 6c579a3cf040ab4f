use crate::ToolInfo;
use crate::outcome::{FileOutcome, FileStatus};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    pub schema: String,
    pub tool: ToolInfo,
    pub run: RunInfo,

    /// True when nothing was written to disk.
    #[serde(default)]
    pub dry_run: bool,

    #[serde(default)]
    pub files: Vec<FileOutcome>,
    pub summary: RunSummary,
}

impl RunReport {
    pub fn new(tool: ToolInfo, dry_run: bool) -> Self {
        Self {
            schema: crate::schema::SUITEFIX_RUN_V1.to_string(),
            tool,
            run: RunInfo {
                started_at: Some(Utc::now()),
                ended_at: None,
            },
            dry_run,
            files: vec![],
            summary: RunSummary::default(),
        }
    }

    /// Record an outcome and keep the summary in step.
    pub fn push(&mut self, outcome: FileOutcome) {
        self.summary.files_total += 1;
        match outcome.status {
            FileStatus::Changed => self.summary.files_changed += 1,
            FileStatus::Unchanged => self.summary.files_unchanged += 1,
            FileStatus::Missing => self.summary.files_missing += 1,
        }
        self.files.push(outcome);
    }

    pub fn finish(&mut self) {
        self.run.ended_at = Some(Utc::now());
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RunInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub started_at: Option<DateTime<Utc>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ended_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    pub files_total: u64,
    pub files_changed: u64,
    pub files_unchanged: u64,
    pub files_missing: u64,
}
