use crate::config::Config;
use crate::error::{ArtError, Result};
use crate::git::VersionControl;
use crate::journal::CommitJournal;
use crate::model::{CommitSpec, SequenceResult};
use chrono::{DateTime, FixedOffset, NaiveDate};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, error, info, warn};

pub struct SequenceOptions<'a> {
    pub config: &'a Config,
    /// Latest date a commit may carry.
    pub reference: NaiveDate,
    pub show_progress: bool,
}

struct PlannedDay {
    spec: CommitSpec,
    when: DateTime<FixedOffset>,
    message: String,
}

fn commit_message(prefix: &str, when: &DateTime<FixedOffset>) -> String {
    format!("{prefix} {}", when.format("%Y-%m-%d %H:%M:%S"))
}

/// Check every spec and resolve its timestamp without touching the repository.
fn prepare(specs: &[CommitSpec], options: &SequenceOptions) -> Result<Vec<PlannedDay>> {
    let mut ordered = specs.to_vec();
    ordered.sort_by_key(|spec| spec.date);

    ordered
        .into_iter()
        .map(|spec| {
            if spec.count == 0 {
                return Err(ArtError::Validation(format!(
                    "{} is planned with zero commits",
                    spec.date
                )));
            }
            if spec.date > options.reference {
                return Err(ArtError::FutureDate {
                    date: spec.date,
                    reference: options.reference,
                });
            }
            let when = options.config.commit_timestamp(spec.date)?;
            let message = commit_message(&options.config.message_prefix, &when);
            Ok(PlannedDay { spec, when, message })
        })
        .collect()
}

fn progress_bar(total: u64, visible: bool) -> ProgressBar {
    if !visible {
        return ProgressBar::hidden();
    }
    let pb = ProgressBar::new(total);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.green/white}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );
    pb.set_message("Creating commits...");
    pb
}

/// Create one commit per unit of every spec, oldest date first.
///
/// Validation and precondition failures return `Err` before anything is
/// committed. Once committing has started, failed commits are counted and the
/// batch carries on until `max_consecutive_failures` failures happen in a row.
pub fn execute<V: VersionControl>(
    vcs: &mut V,
    journal: &CommitJournal,
    specs: &[CommitSpec],
    options: &SequenceOptions,
) -> Result<SequenceResult> {
    let planned = prepare(specs, options)?;
    let pause = options.config.pause_duration()?;
    let mut result = SequenceResult::default();
    if planned.is_empty() {
        debug!("nothing to commit");
        return Ok(result);
    }

    vcs.check_ready()?;
    journal.check_writable()?;
    let mut writer = journal.writer()?;

    let total: u64 = planned.iter().map(|day| day.spec.count as u64).sum();
    let pb = progress_bar(total, options.show_progress);
    let mut consecutive_failures = 0;

    'days: for day in &planned {
        for _ in 0..day.spec.count {
            if result.attempted > 0 && !pause.is_zero() {
                std::thread::sleep(pause);
            }

            match vcs.create_commit(day.when, &day.message) {
                Ok(commit) => {
                    consecutive_failures = 0;
                    result.record_success(commit.id.clone());
                    if let Err(e) = writer.append(day.spec.date, &commit, &day.message) {
                        error!(commit = %commit.id, error = %e, "commit created but not journaled");
                        result.first_error.get_or_insert_with(|| {
                            format!("commit {} was created but could not be journaled: {e}", commit.id)
                        });
                        result.aborted = true;
                        break 'days;
                    }
                    debug!(date = %day.spec.date, commit = %commit.id, "commit created");
                }
                Err(e) => {
                    warn!(date = %day.spec.date, error = %e, "commit failed");
                    let fatal = e.is_fatal();
                    result.record_failure(e.to_string());
                    consecutive_failures += 1;
                    if fatal || consecutive_failures >= options.config.max_consecutive_failures {
                        error!(consecutive_failures, "giving up on the remaining commits");
                        result.aborted = true;
                        break 'days;
                    }
                }
            }
            pb.inc(1);
        }
    }
    pb.finish_and_clear();

    info!(
        attempted = result.attempted,
        succeeded = result.succeeded,
        failed = result.failed,
        aborted = result.aborted,
        "batch finished"
    );
    Ok(result)
}
