use crate::cli::{CommonArgs, PatternArgs, RunArgs};
use crate::error::ArtError;
use crate::grid::GridCoordinate;
use crate::model::{CommitSpec, PaintOutput, SequenceResult, SCHEMA_VERSION};
use crate::pattern::{self, Pattern, PatternSource};
use crate::sequencer::{self, SequenceOptions};
use crate::session::Session;
use anyhow::Context;
use chrono::Utc;
use console::style;
use tracing::info;

pub fn exec(common: CommonArgs, source: PatternSource, args: PatternArgs) -> anyhow::Result<()> {
    let mut session = Session::open(&common)?;

    let built = pattern::build(&source, args.intensity, args.offset).context("Failed to build pattern")?;
    if built.truncated > 0 && !args.run.json {
        eprintln!(
            "{}",
            style(format!(
                "warning: {} characters did not fit and were dropped",
                built.truncated
            ))
            .yellow()
        );
    }

    if let Some(path) = &args.export {
        std::fs::write(path, built.pattern.to_json()?)
            .with_context(|| format!("Failed to export pattern to {}", path.display()))?;
        info!(path = %path.display(), "pattern exported");
    }

    let specs = built
        .pattern
        .plan(&session.mapper())
        .context("Failed to map pattern onto the graph")?;
    run_specs(&mut session, specs, Some(&built.pattern), &args.run)
}

/// Commit `count` times to one cell of the graph.
pub fn exec_cell(common: CommonArgs, week: u32, day: u32, count: u32, run: RunArgs) -> anyhow::Result<()> {
    let mut session = Session::open(&common)?;
    ensure_count(count)?;
    let coord = GridCoordinate::new(week, day)?;
    let date = session
        .mapper()
        .target_date(coord)
        .with_context(|| format!("Cell week {week} day {day} cannot be committed to"))?;
    run_specs(&mut session, vec![CommitSpec::new(date, count)], None, &run)
}

pub fn exec_yesterday(common: CommonArgs, count: u32, run: RunArgs) -> anyhow::Result<()> {
    let mut session = Session::open(&common)?;
    ensure_count(count)?;
    let date = session
        .reference
        .pred_opt()
        .ok_or_else(|| ArtError::InvalidDate(format!("no day before {}", session.reference)))?;
    run_specs(&mut session, vec![CommitSpec::new(date, count)], None, &run)
}

fn ensure_count(count: u32) -> crate::error::Result<()> {
    if count == 0 {
        return Err(ArtError::Validation("count must be at least 1".to_string()));
    }
    Ok(())
}

fn run_specs(
    session: &mut Session,
    specs: Vec<CommitSpec>,
    preview: Option<&Pattern>,
    run: &RunArgs,
) -> anyhow::Result<()> {
    if run.dry_run {
        if run.json {
            return output_json(session, specs, true, None);
        }
        if let Some(pattern) = preview {
            output_preview(pattern);
        }
        output_plan(session, &specs);
        return Ok(());
    }

    let journal = session.journal().context("Failed to locate the commit journal")?;
    let config = session.config.clone();
    let options = SequenceOptions {
        config: &config,
        reference: session.reference,
        show_progress: !run.json && console::user_attended_stderr(),
    };
    let vcs = session.require_repo()?;
    let result = sequencer::execute(vcs, &journal, &specs, &options).context("Failed to create commits")?;

    let failed = result.failed;
    let attempted = result.attempted;
    let aborted = result.aborted;
    if run.json {
        output_json(session, specs, false, Some(result))?;
    } else {
        output_summary(&result);
    }

    if failed > 0 {
        anyhow::bail!("{failed} of {attempted} commits failed");
    }
    if aborted {
        anyhow::bail!("batch aborted");
    }
    Ok(())
}

fn output_json(
    session: &Session,
    planned: Vec<CommitSpec>,
    dry_run: bool,
    result: Option<SequenceResult>,
) -> anyhow::Result<()> {
    let output = PaintOutput {
        version: SCHEMA_VERSION,
        generated_at: Utc::now(),
        repository_path: session.repository_path(),
        reference_date: session.reference,
        dry_run,
        planned,
        result,
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn output_preview(pattern: &Pattern) {
    let max = pattern.rows().iter().flatten().copied().max().unwrap_or(0).max(1);
    for row in pattern.rows() {
        let line: String = row
            .iter()
            .map(|&count| {
                let level = ((count as f64 / max as f64) * 4.0).ceil() as u32;
                match level {
                    0 => '·',
                    1 => '░',
                    2 => '▒',
                    3 => '▓',
                    _ => '█',
                }
            })
            .collect();
        println!("{}", style(line).green());
    }
    println!();
}

fn output_plan(session: &Session, specs: &[CommitSpec]) {
    if specs.is_empty() {
        println!("Nothing to commit");
        return;
    }

    let mapper = session.mapper();
    println!("{}", style("Planned commits").bold());
    println!("{}", "─".repeat(50));
    println!("{:<12} {:>6} {:>5} {:>9}", "Date", "Week", "Day", "Commits");
    for spec in specs {
        let (week, day) = mapper
            .coordinate_of(spec.date)
            .map(|c| (c.week().to_string(), c.day().to_string()))
            .unwrap_or_else(|| ("-".to_string(), "-".to_string()));
        println!(
            "{:<12} {:>6} {:>5} {:>9}",
            spec.date,
            week,
            day,
            style(spec.count).cyan()
        );
    }

    let total: u64 = specs.iter().map(|s| s.count as u64).sum();
    println!();
    println!(
        "{} commits on {} days (reference date {}, dry run)",
        style(total).green().bold(),
        specs.len(),
        session.reference
    );
}

fn output_summary(result: &SequenceResult) {
    if result.attempted == 0 {
        println!("Nothing to commit");
        return;
    }

    println!("{}", style("Commit summary").bold());
    println!("{}", "─".repeat(50));
    println!("Attempted: {}", result.attempted);
    println!("Succeeded: {}", style(result.succeeded).green());
    if result.failed > 0 {
        println!("Failed:    {}", style(result.failed).red());
    } else {
        println!("Failed:    0");
    }
    if let Some(first_error) = &result.first_error {
        println!("First error: {first_error}");
    }
    if result.aborted {
        println!("{}", style("Stopped early, remaining commits were skipped.").red().bold());
    }
}
