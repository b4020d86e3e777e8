#![allow(dead_code)]

use chrono::{DateTime, FixedOffset, Utc};
use commitart::error::{ArtError, Result};
use commitart::git::VersionControl;
use commitart::model::{CommitInfo, CreatedCommit, ResetTarget};
use std::collections::HashSet;

/// In-memory linear history.
#[derive(Default)]
pub struct FakeVcs {
    history: Vec<CommitInfo>,
    next_id: u64,
    calls: usize,
    fail_on: HashSet<usize>,
    not_ready: Option<String>,
    after_commit: Option<Box<dyn FnMut(usize)>>,
    pub stamps: Vec<DateTime<FixedOffset>>,
    pub messages: Vec<String>,
}

impl FakeVcs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with `count` commits nobody journaled.
    pub fn with_organic(mut self, count: usize) -> Self {
        for i in 0..count {
            let when = DateTime::parse_from_rfc3339("2024-01-01T09:00:00+00:00").unwrap();
            self.push(&format!("organic {i}"), when);
        }
        self
    }

    /// Make the given `create_commit` calls (1-based) fail.
    pub fn failing_on(mut self, calls: &[usize]) -> Self {
        self.fail_on.extend(calls.iter().copied());
        self
    }

    /// Run `hook` with the call number after every successful commit.
    pub fn after_commit(mut self, hook: impl FnMut(usize) + 'static) -> Self {
        self.after_commit = Some(Box::new(hook));
        self
    }

    pub fn not_ready(mut self, reason: &str) -> Self {
        self.not_ready = Some(reason.to_string());
        self
    }

    pub fn commit_count(&self) -> usize {
        self.history.len()
    }

    pub fn head(&self) -> Option<String> {
        self.history.last().map(|c| c.id.clone())
    }

    pub fn calls(&self) -> usize {
        self.calls
    }

    /// Commit outside the journal, like a user would.
    pub fn organic_commit(&mut self, message: &str) -> String {
        let when = DateTime::parse_from_rfc3339("2024-06-01T09:00:00+00:00").unwrap();
        self.push(message, when)
    }

    fn push(&mut self, message: &str, when: DateTime<FixedOffset>) -> String {
        self.next_id += 1;
        let id = format!("{:040x}", self.next_id);
        let parent_ids = self.head().into_iter().collect();
        self.history.push(CommitInfo {
            id: id.clone(),
            author_name: "Test".to_string(),
            author_email: "test@example.com".to_string(),
            message: message.to_string(),
            timestamp: when.with_timezone(&Utc),
            parent_ids,
        });
        id
    }
}

impl VersionControl for FakeVcs {
    fn check_ready(&self) -> Result<()> {
        match &self.not_ready {
            Some(reason) => Err(ArtError::Precondition(reason.clone())),
            None => Ok(()),
        }
    }

    fn create_commit(&mut self, when: DateTime<FixedOffset>, message: &str) -> Result<CreatedCommit> {
        self.calls += 1;
        if self.fail_on.contains(&self.calls) {
            return Err(ArtError::ExternalTool {
                command: "git commit".to_string(),
                code: Some(1),
                stderr: format!("simulated failure on call {}", self.calls),
            });
        }
        let parent_id = self.head();
        let id = self.push(message, when);
        self.stamps.push(when);
        self.messages.push(message.to_string());
        if let Some(hook) = self.after_commit.as_mut() {
            hook(self.calls);
        }
        Ok(CreatedCommit { id, parent_id })
    }

    fn list_commits(&self) -> Result<Vec<CommitInfo>> {
        Ok(self.history.iter().rev().cloned().collect())
    }

    fn reset_to(&mut self, target: &ResetTarget) -> Result<()> {
        match target {
            ResetTarget::Commit(id) => {
                let pos = self
                    .history
                    .iter()
                    .position(|c| &c.id == id)
                    .ok_or_else(|| ArtError::Validation(format!("unknown commit {id}")))?;
                self.history.truncate(pos + 1);
            }
            ResetTarget::Unborn => self.history.clear(),
        }
        Ok(())
    }
}
