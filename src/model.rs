use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

pub const SCHEMA_VERSION: u32 = 1;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommitInfo {
    pub id: String,
    pub author_name: String,
    pub author_email: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub parent_ids: Vec<String>,
}

/// One calendar day that should receive `count` commits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CommitSpec {
    pub date: NaiveDate,
    pub count: u32,
}

impl CommitSpec {
    pub fn new(date: NaiveDate, count: u32) -> Self {
        Self { date, count }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedCommit {
    pub id: String,
    pub parent_id: Option<String>,
}

/// A journaled commit created by this tool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitLogEntry {
    pub sequence: u64,
    pub written_at: DateTime<Utc>,
    pub target_date: NaiveDate,
    pub commit_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SequenceResult {
    pub attempted: u32,
    pub succeeded: u32,
    pub failed: u32,
    pub first_error: Option<String>,
    pub aborted: bool,
    pub commits: Vec<String>,
}

impl SequenceResult {
    pub fn record_success(&mut self, commit_id: String) {
        self.attempted += 1;
        self.succeeded += 1;
        self.commits.push(commit_id);
    }

    pub fn record_failure(&mut self, detail: String) {
        self.attempted += 1;
        self.failed += 1;
        if self.first_error.is_none() {
            self.first_error = Some(detail);
        }
    }
}

/// Where a reset moves the current branch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "commit")]
pub enum ResetTarget {
    Commit(String),
    /// Branch has no commits left.
    Unborn,
}

impl std::fmt::Display for ResetTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ResetTarget::Commit(id) => write!(f, "{}", short_id(id)),
            ResetTarget::Unborn => f.write_str("(no commits)"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevertPlan {
    pub target: Option<ResetTarget>,
    pub generated_commits: usize,
    pub organic_commits: usize,
    pub stale_entries: usize,
}

impl RevertPlan {
    pub fn dropped_commits(&self) -> usize {
        self.generated_commits + self.organic_commits
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevertResult {
    pub target: Option<ResetTarget>,
    pub removed_commits: usize,
    pub organic_removed: usize,
    pub purged_entries: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaintOutput {
    pub version: u32,
    pub generated_at: DateTime<Utc>,
    pub repository_path: String,
    pub reference_date: NaiveDate,
    pub dry_run: bool,
    pub planned: Vec<CommitSpec>,
    pub result: Option<SequenceResult>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListEntry {
    pub sequence: u64,
    pub commit_id: String,
    pub target_date: NaiveDate,
    pub week: Option<u32>,
    pub day: Option<u32>,
    pub live: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListOutput {
    pub version: u32,
    pub generated_at: DateTime<Utc>,
    pub repository_path: String,
    pub total_commits: usize,
    pub generated_commits: usize,
    pub organic_commits: usize,
    pub entries: Vec<ListEntry>,
}

pub fn short_id(id: &str) -> &str {
    id.get(..8).unwrap_or(id)
}
