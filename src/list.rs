use crate::cli::CommonArgs;
use crate::git::VersionControl;
use crate::grid::CoordinateMapper;
use crate::model::{short_id, CommitInfo, CommitLogEntry, ListEntry, ListOutput, SCHEMA_VERSION};
use crate::session::Session;
use anyhow::Context;
use chrono::Utc;
use console::style;
use std::collections::HashSet;

pub fn exec(common: CommonArgs, json: bool, ndjson: bool) -> anyhow::Result<()> {
    let mut session = Session::open(&common)?;
    let journal = session.journal().context("Failed to locate the commit journal")?;
    let history = session
        .require_repo()?
        .list_commits()
        .context("Failed to read repository history")?;
    let entries = journal.load().context("Failed to read the commit journal")?;

    let output = summarize(&entries, &history, &session.mapper(), session.repository_path());

    if json {
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else if ndjson {
        for entry in &output.entries {
            println!("{}", serde_json::to_string(entry)?);
        }
    } else {
        output_table(&output);
    }
    Ok(())
}

/// Match journal entries against the commits reachable from HEAD.
///
/// Entries whose commit is gone are kept but marked stale. Organic commits
/// are everything in history the journal does not know about.
pub fn summarize(
    entries: &[CommitLogEntry],
    history: &[CommitInfo],
    mapper: &CoordinateMapper,
    repository_path: String,
) -> ListOutput {
    let reachable: HashSet<&str> = history.iter().map(|c| c.id.as_str()).collect();

    let mut live_ids = HashSet::new();
    let listed: Vec<ListEntry> = entries
        .iter()
        .map(|entry| {
            let live = reachable.contains(entry.commit_id.as_str());
            if live {
                live_ids.insert(entry.commit_id.as_str());
            }
            let coord = mapper.coordinate_of(entry.target_date);
            ListEntry {
                sequence: entry.sequence,
                commit_id: entry.commit_id.clone(),
                target_date: entry.target_date,
                week: coord.map(|c| c.week()),
                day: coord.map(|c| c.day()),
                live,
            }
        })
        .collect();

    let generated_commits = live_ids.len();
    ListOutput {
        version: SCHEMA_VERSION,
        generated_at: Utc::now(),
        repository_path,
        total_commits: history.len(),
        generated_commits,
        organic_commits: history.len() - generated_commits,
        entries: listed,
    }
}

fn output_table(output: &ListOutput) {
    println!("{}", style("Generated commits").bold());
    println!("{}", "─".repeat(50));

    if output.entries.is_empty() {
        println!("No commits in the journal");
    } else {
        println!("{:>5}  {:<8}  {:<10}  {:>4} {:>3}  Status", "Seq", "Commit", "Date", "Week", "Day");
        for entry in &output.entries {
            let week = entry.week.map(|w| w.to_string()).unwrap_or_else(|| "-".to_string());
            let day = entry.day.map(|d| d.to_string()).unwrap_or_else(|| "-".to_string());
            let status = if entry.live {
                style("live").green()
            } else {
                style("gone").dim()
            };
            println!(
                "{:>5}  {:<8}  {:<10}  {:>4} {:>3}  {}",
                entry.sequence,
                short_id(&entry.commit_id),
                entry.target_date.to_string(),
                week,
                day,
                status
            );
        }
    }

    println!();
    println!("Total commits:     {}", output.total_commits);
    println!("Generated commits: {}", style(output.generated_commits).green());
    println!("Organic commits:   {}", output.organic_commits);
}
