use super::{GitRepo, VersionControl};
use crate::error::{ArtError, Result};
use crate::model::{CommitInfo, CreatedCommit, ResetTarget};
use chrono::{DateTime, FixedOffset};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::{debug, info};

/// [`VersionControl`] backed by the `git` executable, with history reads
/// going through gix.
pub struct GitCli {
    workdir: PathBuf,
    git_dir: PathBuf,
    binary: String,
}

impl GitCli {
    pub fn discover<P: AsRef<Path>>(path: Option<P>, binary: &str) -> Result<Self> {
        let repo = GitRepo::open(path)
            .map_err(|e| ArtError::Precondition(format!("no git repository found: {e}")))?;
        if repo.is_bare() {
            return Err(ArtError::Precondition(format!(
                "{} is a bare repository, a working tree is required",
                repo.path().display()
            )));
        }
        Ok(Self {
            workdir: repo.path().to_path_buf(),
            git_dir: repo.git_dir().to_path_buf(),
            binary: binary.to_string(),
        })
    }

    pub fn workdir(&self) -> &Path {
        &self.workdir
    }

    /// Staged or unstaged changes to tracked files.
    pub fn has_uncommitted_changes(&self) -> Result<bool> {
        let status = self.run(&["status", "--porcelain", "--untracked-files=no"], &[])?;
        Ok(!status.is_empty())
    }

    // reopened on every call so refs written by the git binary are seen
    fn repo(&self) -> Result<GitRepo> {
        GitRepo::open(Some(&self.workdir))
    }

    fn run(&self, args: &[&str], envs: &[(&str, &str)]) -> Result<String> {
        debug!(?args, "running {}", self.binary);
        let output = Command::new(&self.binary)
            .args(args)
            .envs(envs.iter().copied())
            .current_dir(&self.workdir)
            .output()
            .map_err(|e| match e.kind() {
                ErrorKind::NotFound => ArtError::Precondition(format!(
                    "git executable `{}` was not found",
                    self.binary
                )),
                _ => ArtError::Io(e),
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            let detail = if stderr.is_empty() {
                String::from_utf8_lossy(&output.stdout).trim().to_string()
            } else {
                stderr
            };
            return Err(ArtError::ExternalTool {
                command: format!("{} {}", self.binary, args.join(" ")),
                code: output.status.code(),
                stderr: detail,
            });
        }
        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }
}

impl VersionControl for GitCli {
    fn check_ready(&self) -> Result<()> {
        self.run(&["--version"], &[])?;

        let metadata = std::fs::metadata(&self.git_dir).map_err(|e| {
            ArtError::Precondition(format!("cannot read {}: {e}", self.git_dir.display()))
        })?;
        if metadata.permissions().readonly() {
            return Err(ArtError::Precondition(format!(
                "{} is read-only",
                self.git_dir.display()
            )));
        }

        let lock = self.git_dir.join("index.lock");
        if lock.exists() {
            return Err(ArtError::Precondition(format!(
                "{} exists, another git process may be running",
                lock.display()
            )));
        }
        Ok(())
    }

    fn create_commit(&mut self, when: DateTime<FixedOffset>, message: &str) -> Result<CreatedCommit> {
        let parent_id = self.repo()?.head_id()?;
        let date = when.to_rfc3339();
        self.run(
            &[
                "-c",
                "commit.gpgsign=false",
                "commit",
                "--allow-empty",
                // no paths: commit HEAD's tree and leave staged changes alone
                "--only",
                "--no-verify",
                "--quiet",
                "-m",
                message,
            ],
            &[("GIT_AUTHOR_DATE", &date), ("GIT_COMMITTER_DATE", &date)],
        )?;

        let id = self.repo()?.head_id()?;
        match id {
            Some(id) if Some(&id) != parent_id.as_ref() => Ok(CreatedCommit { id, parent_id }),
            _ => Err(ArtError::ExternalTool {
                command: format!("{} commit", self.binary),
                code: Some(0),
                stderr: "HEAD did not move after committing".to_string(),
            }),
        }
    }

    fn list_commits(&self) -> Result<Vec<CommitInfo>> {
        self.repo()?.collect_commits()
    }

    fn reset_to(&mut self, target: &ResetTarget) -> Result<()> {
        match target {
            ResetTarget::Commit(id) => {
                self.run(&["reset", "--hard", "--quiet", id], &[])?;
            }
            ResetTarget::Unborn => {
                self.run(&["update-ref", "-d", "HEAD"], &[])?;
                self.run(&["read-tree", "--empty"], &[])?;
            }
        }
        info!(%target, "branch reset");
        Ok(())
    }
}
