pub mod cli;
pub mod repo;

pub use cli::GitCli;
pub use repo::GitRepo;

use crate::error::Result;
use crate::model::{CommitInfo, CreatedCommit, ResetTarget};
use chrono::{DateTime, FixedOffset};

/// The few version control operations the tool needs.
pub trait VersionControl {
    /// Fails with [`crate::error::ArtError::Precondition`] when no commit can
    /// be made at all.
    fn check_ready(&self) -> Result<()>;

    /// Record an empty commit authored and committed at `when`.
    fn create_commit(&mut self, when: DateTime<FixedOffset>, message: &str) -> Result<CreatedCommit>;

    /// Commits reachable from HEAD, newest first.
    fn list_commits(&self) -> Result<Vec<CommitInfo>>;

    /// Move the current branch to `target`, discarding everything after it.
    fn reset_to(&mut self, target: &ResetTarget) -> Result<()>;
}
