//! Append-only record of the commits this tool created.
//!
//! One JSON object per line. Every append is flushed and synced before the
//! next commit is attempted, so an interrupted run leaves a usable journal.

use crate::error::{ArtError, Result};
use crate::model::{CommitLogEntry, CreatedCommit};
use chrono::{NaiveDate, Utc};
use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, ErrorKind, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

pub const DEFAULT_JOURNAL_FILE: &str = ".commitart.jsonl";

#[derive(Debug, Clone)]
pub struct CommitJournal {
    path: PathBuf,
}

impl CommitJournal {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn in_repo<P: AsRef<Path>>(repo_root: P, file_name: &str) -> Self {
        Self::new(repo_root.as_ref().join(file_name))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// All readable entries in file order. A missing journal is empty.
    pub fn load(&self) -> Result<Vec<CommitLogEntry>> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let lines = BufReader::new(file)
            .lines()
            .collect::<std::io::Result<Vec<_>>>()?;
        let last = lines.iter().rposition(|line| !line.trim().is_empty());

        let mut entries = Vec::with_capacity(lines.len());
        for (index, line) in lines.iter().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            match serde_json::from_str::<CommitLogEntry>(line) {
                Ok(entry) => entries.push(entry),
                // a run interrupted mid-write leaves at most one partial line at the end
                Err(e) if Some(index) == last => {
                    warn!(line = index + 1, error = %e, "ignoring truncated journal line");
                }
                Err(e) => {
                    return Err(ArtError::Journal(format!(
                        "{} line {}: {e}",
                        self.path.display(),
                        index + 1
                    )))
                }
            }
        }
        Ok(entries)
    }

    pub fn check_writable(&self) -> Result<()> {
        OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map(|_| ())
            .map_err(|e| {
                ArtError::Precondition(format!(
                    "cannot write journal {}: {e}",
                    self.path.display()
                ))
            })
    }

    pub fn writer(&self) -> Result<JournalWriter> {
        let next_sequence = self
            .load()?
            .iter()
            .map(|entry| entry.sequence + 1)
            .max()
            .unwrap_or(1);
        let mut file = OpenOptions::new().create(true).append(true).open(&self.path)?;
        repair_tail(&self.path, &mut file)?;
        Ok(JournalWriter {
            path: self.path.clone(),
            next_sequence,
        })
    }

    /// Rewrite the journal keeping only entries accepted by `keep`.
    ///
    /// Returns how many entries were removed.
    pub fn retain<F>(&self, keep: F) -> Result<usize>
    where
        F: Fn(&CommitLogEntry) -> bool,
    {
        let entries = self.load()?;
        let before = entries.len();
        let kept: Vec<_> = entries.into_iter().filter(|e| keep(e)).collect();
        let removed = before - kept.len();
        if removed == 0 {
            return Ok(0);
        }

        let tmp = self.path.with_extension("jsonl.tmp");
        {
            let mut file = File::create(&tmp)?;
            for entry in &kept {
                writeln!(file, "{}", serde_json::to_string(entry)?)?;
            }
            file.sync_all()?;
        }
        std::fs::rename(&tmp, &self.path)?;
        debug!(removed, kept = kept.len(), "journal rewritten");
        Ok(removed)
    }
}

/// Appends entries, reopening the file for every entry.
pub struct JournalWriter {
    path: PathBuf,
    next_sequence: u64,
}

impl JournalWriter {
    pub fn append(
        &mut self,
        target_date: NaiveDate,
        commit: &CreatedCommit,
        message: &str,
    ) -> Result<CommitLogEntry> {
        let entry = CommitLogEntry {
            sequence: self.next_sequence,
            written_at: Utc::now(),
            target_date,
            commit_id: commit.id.clone(),
            parent_id: commit.parent_id.clone(),
            message: message.to_string(),
        };
        let mut file = OpenOptions::new().create(true).append(true).open(&self.path)?;
        writeln!(file, "{}", serde_json::to_string(&entry)?)?;
        file.flush()?;
        file.sync_data()?;
        self.next_sequence += 1;
        Ok(entry)
    }
}

/// Fix an unterminated trailing line left behind by an interrupted append.
///
/// A complete entry only gets its newline; anything else is cut off.
fn repair_tail(path: &Path, file: &mut File) -> Result<()> {
    let content = std::fs::read(path)?;
    if content.last().map_or(true, |&b| b == b'\n') {
        return Ok(());
    }
    let start = content.iter().rposition(|&b| b == b'\n').map(|i| i + 1).unwrap_or(0);
    if serde_json::from_slice::<CommitLogEntry>(&content[start..]).is_ok() {
        file.write_all(b"\n")?;
    } else {
        warn!(bytes = content.len() - start, "dropping partial journal line");
        file.set_len(start as u64)?;
    }
    Ok(())
}
