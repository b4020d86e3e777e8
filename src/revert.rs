//! Undo generated commits by resetting the branch to just before the first one.
//!
//! This is a hard reset: any commit made after the first generated commit is
//! discarded too, including commits that were not created by this tool.

use crate::cli::CommonArgs;
use crate::error::{ArtError, Result};
use crate::git::VersionControl;
use crate::journal::CommitJournal;
use crate::model::{CommitInfo, CommitLogEntry, ResetTarget, RevertPlan, RevertResult};
use crate::session::Session;
use anyhow::Context;
use console::style;
use std::collections::{HashMap, HashSet};
use std::fmt::Write;
use tracing::info;

pub fn exec(common: CommonArgs, yes: bool, json: bool) -> anyhow::Result<()> {
    let mut session = Session::open(&common)?;
    let journal = session.journal().context("Failed to locate the commit journal")?;
    let vcs = session.require_repo()?;

    let plan = plan_revert(&*vcs, &journal).context("Failed to plan revert")?;

    if plan.target.is_some() && !yes {
        let dirty = vcs
            .has_uncommitted_changes()
            .context("Failed to check the working tree")?;
        print!("{}", describe_plan(&plan, dirty));
        if !console::user_attended() {
            anyhow::bail!("refusing to rewrite history without confirmation, pass --yes");
        }
        let confirmed = dialoguer::Confirm::new()
            .with_prompt("Hard reset the branch and discard these commits?")
            .default(false)
            .interact()
            .context("Failed to read confirmation")?;
        if !confirmed {
            println!("Revert cancelled.");
            return Ok(());
        }
    }

    let result = revert(vcs, &journal).context("Failed to revert generated commits")?;

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }
    match &result.target {
        Some(target) => println!(
            "Reset to {}: removed {} commits ({} organic), purged {} journal entries.",
            style(target).cyan(),
            style(result.removed_commits).green(),
            result.organic_removed,
            result.purged_entries
        ),
        None if result.purged_entries > 0 => println!(
            "No generated commits in history; purged {} stale journal entries.",
            result.purged_entries
        ),
        None => println!("Nothing to revert."),
    }
    Ok(())
}

/// Text shown before asking for confirmation.
pub fn describe_plan(plan: &RevertPlan, dirty: bool) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", style("Revert plan").bold());
    let _ = writeln!(out, "{}", "─".repeat(50));
    if let Some(target) = &plan.target {
        let _ = writeln!(out, "Reset target:        {}", style(target).cyan());
    }
    let _ = writeln!(out, "Generated commits:   {}", plan.generated_commits);
    let _ = writeln!(out, "Stale journal lines: {}", plan.stale_entries);
    if plan.organic_commits > 0 {
        let _ = writeln!(
            out,
            "{}",
            style(format!(
                "WARNING: {} commits not made by commitart will be lost as well.",
                plan.organic_commits
            ))
            .red()
            .bold()
        );
    }
    if dirty {
        let _ = writeln!(
            out,
            "{}",
            style("WARNING: uncommitted changes to tracked files will be discarded.")
                .red()
                .bold()
        );
    }
    out
}

/// Work out what a revert would do without changing anything.
pub fn plan_revert<V: VersionControl>(vcs: &V, journal: &CommitJournal) -> Result<RevertPlan> {
    let entries = journal.load()?;
    let history = vcs.list_commits()?;
    build_plan(&entries, &history)
}

/// Reset to the parent of the oldest generated commit still in history and
/// drop every journal entry whose commit is gone afterwards.
pub fn revert<V: VersionControl>(vcs: &mut V, journal: &CommitJournal) -> Result<RevertResult> {
    let plan = plan_revert(&*vcs, journal)?;

    if let Some(target) = &plan.target {
        vcs.check_ready()?;
        vcs.reset_to(target)?;
        info!(
            %target,
            generated = plan.generated_commits,
            organic = plan.organic_commits,
            "history reset"
        );
    }

    let remaining: HashSet<String> = vcs.list_commits()?.into_iter().map(|c| c.id).collect();
    let purged = journal.retain(|entry| remaining.contains(&entry.commit_id))?;

    let removed_commits = plan.dropped_commits();
    Ok(RevertResult {
        target: plan.target,
        removed_commits,
        organic_removed: plan.organic_commits,
        purged_entries: purged,
    })
}

fn build_plan(entries: &[CommitLogEntry], history: &[CommitInfo]) -> Result<RevertPlan> {
    let by_id: HashMap<&str, &CommitInfo> = history.iter().map(|c| (c.id.as_str(), c)).collect();
    let live: Vec<&CommitLogEntry> = entries
        .iter()
        .filter(|entry| by_id.contains_key(entry.commit_id.as_str()))
        .collect();
    let stale_entries = entries.len() - live.len();

    let Some(earliest) = live.iter().min_by_key(|entry| entry.sequence) else {
        return Ok(RevertPlan {
            target: None,
            generated_commits: 0,
            organic_commits: 0,
            stale_entries,
        });
    };

    let (target, kept) = match &earliest.parent_id {
        Some(parent) => {
            if !by_id.contains_key(parent.as_str()) {
                return Err(ArtError::Journal(format!(
                    "parent {parent} of generated commit {} is not in history",
                    earliest.commit_id
                )));
            }
            (ResetTarget::Commit(parent.clone()), ancestors(parent, &by_id))
        }
        None => (ResetTarget::Unborn, HashSet::new()),
    };

    let logged: HashSet<&str> = live.iter().map(|entry| entry.commit_id.as_str()).collect();
    let dropped: Vec<&str> = history
        .iter()
        .map(|c| c.id.as_str())
        .filter(|id| !kept.contains(id))
        .collect();
    let generated_commits = dropped.iter().filter(|id| logged.contains(*id)).count();

    Ok(RevertPlan {
        target: Some(target),
        generated_commits,
        organic_commits: dropped.len() - generated_commits,
        stale_entries,
    })
}

fn ancestors<'a>(start: &'a str, by_id: &HashMap<&'a str, &'a CommitInfo>) -> HashSet<&'a str> {
    let mut seen = HashSet::new();
    let mut stack = vec![start];
    while let Some(id) = stack.pop() {
        if !seen.insert(id) {
            continue;
        }
        if let Some(commit) = by_id.get(id).copied() {
            stack.extend(commit.parent_ids.iter().map(String::as_str));
        }
    }
    seen
}
