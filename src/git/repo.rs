use crate::error::{ArtError, Result};
use crate::model::CommitInfo;
use chrono::DateTime;
use gix::{discover, ObjectId, Repository};
use std::collections::{HashSet, VecDeque};
use std::path::{Path, PathBuf};

pub struct GitRepo {
    repo: Repository,
    path: PathBuf,
}

impl GitRepo {
    /// Open a repository at `path`, or current dir if `None`
    pub fn open<P: AsRef<Path>>(path: Option<P>) -> Result<Self> {
        let repo_path = match path {
            Some(p) => p.as_ref().to_path_buf(),
            None => std::env::current_dir()?,
        };

        let repo = discover(&repo_path)?;
        let path = repo.workdir().unwrap_or_else(|| repo.path()).to_path_buf();

        Ok(Self { repo, path })
    }

    /// Working tree root, or the git dir for bare repositories.
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn git_dir(&self) -> &Path {
        self.repo.path()
    }

    pub fn is_bare(&self) -> bool {
        self.repo.workdir().is_none()
    }

    pub fn head_id(&self) -> Result<Option<String>> {
        let mut head = self.repo.head()?;
        if head.is_unborn() {
            return Ok(None);
        }
        let commit = head.peel_to_commit_in_place()?;
        Ok(Some(commit.id.to_string()))
    }

    /// Every commit reachable from HEAD, newest first.
    pub fn collect_commits(&self) -> Result<Vec<CommitInfo>> {
        let mut head = self.repo.head()?;
        if head.is_unborn() {
            return Ok(Vec::new());
        }
        let head_commit = head.peel_to_commit_in_place()?;

        let mut commits = Vec::new();
        let mut seen: HashSet<ObjectId> = HashSet::new();
        let mut stack: VecDeque<ObjectId> = VecDeque::from([head_commit.id]);

        while let Some(commit_id) = stack.pop_back() {
            if !seen.insert(commit_id) {
                continue;
            }

            let commit = self.repo.find_commit(commit_id)?;
            let secs = commit.time()?.seconds;
            let timestamp = DateTime::from_timestamp(secs, 0)
                .ok_or_else(|| ArtError::InvalidDate(format!("Invalid timestamp: {secs}")))?;

            let parents: Vec<ObjectId> = commit.parent_ids().map(|id| id.into()).collect();
            let author = commit.author()?;
            let message = commit.message()?;

            commits.push(CommitInfo {
                id: commit_id.to_string(),
                author_name: author.name.to_string(),
                author_email: author.email.to_string(),
                message: message.title.to_string(),
                timestamp,
                parent_ids: parents.iter().map(|id| id.to_string()).collect(),
            });

            for pid in parents {
                stack.push_back(pid);
            }
        }

        commits.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        Ok(commits)
    }
}
