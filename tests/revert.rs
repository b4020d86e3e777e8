mod common;

use chrono::NaiveDate;
use commitart::config::{Config, Timezone};
use commitart::git::VersionControl;
use commitart::journal::CommitJournal;
use commitart::model::{CommitSpec, ResetTarget};
use commitart::revert::{describe_plan, plan_revert, revert};
use commitart::sequencer::{self, SequenceOptions};
use common::FakeVcs;
use pretty_assertions::assert_eq;
use tempfile::{tempdir, TempDir};

fn setup() -> (TempDir, CommitJournal, Config) {
    let dir = tempdir().unwrap();
    let journal = CommitJournal::in_repo(dir.path(), ".commitart.jsonl");
    let config = Config {
        timezone: Timezone::Utc,
        ..Config::default()
    };
    (dir, journal, config)
}

fn paint(vcs: &mut FakeVcs, journal: &CommitJournal, config: &Config, count: u32) {
    let options = SequenceOptions {
        config,
        reference: NaiveDate::from_ymd_opt(2025, 3, 12).unwrap(),
        show_progress: false,
    };
    let specs = [CommitSpec::new(NaiveDate::from_ymd_opt(2025, 1, 10).unwrap(), count)];
    let result = sequencer::execute(vcs, journal, &specs, &options).unwrap();
    assert_eq!(result.succeeded, count);
}

#[test]
fn revert_restores_the_commit_count() {
    let (_dir, journal, config) = setup();
    let mut vcs = FakeVcs::new().with_organic(4);
    let before = vcs.head();

    paint(&mut vcs, &journal, &config, 5);
    assert_eq!(vcs.commit_count(), 9);

    let plan = plan_revert(&vcs, &journal).unwrap();
    assert_eq!(plan.target, before.clone().map(ResetTarget::Commit));
    assert_eq!(plan.generated_commits, 5);
    assert_eq!(plan.organic_commits, 0);

    let result = revert(&mut vcs, &journal).unwrap();
    assert_eq!(vcs.commit_count(), 4);
    assert_eq!(vcs.head(), before);
    assert_eq!(result.removed_commits, 5);
    assert_eq!(result.purged_entries, 5);
    assert!(journal.load().unwrap().is_empty());
}

#[test]
fn revert_on_a_fresh_repository_empties_the_branch() {
    let (_dir, journal, config) = setup();
    let mut vcs = FakeVcs::new();
    paint(&mut vcs, &journal, &config, 3);

    let result = revert(&mut vcs, &journal).unwrap();

    assert_eq!(result.target, Some(ResetTarget::Unborn));
    assert_eq!(vcs.commit_count(), 0);
    assert_eq!(result.removed_commits, 3);
}

#[test]
fn organic_commits_after_a_batch_are_reported() {
    let (_dir, journal, config) = setup();
    let mut vcs = FakeVcs::new().with_organic(2);
    paint(&mut vcs, &journal, &config, 2);
    vcs.organic_commit("real work");
    vcs.organic_commit("more real work");

    let plan = plan_revert(&vcs, &journal).unwrap();
    assert_eq!(plan.generated_commits, 2);
    assert_eq!(plan.organic_commits, 2);

    let result = revert(&mut vcs, &journal).unwrap();
    assert_eq!(result.organic_removed, 2);
    assert_eq!(result.removed_commits, 4);
    assert_eq!(vcs.commit_count(), 2);
}

#[test]
fn several_batches_revert_to_before_the_first() {
    let (_dir, journal, config) = setup();
    let mut vcs = FakeVcs::new().with_organic(1);
    paint(&mut vcs, &journal, &config, 2);
    paint(&mut vcs, &journal, &config, 3);

    revert(&mut vcs, &journal).unwrap();

    assert_eq!(vcs.commit_count(), 1);
    assert!(journal.load().unwrap().is_empty());
}

#[test]
fn nothing_to_revert_leaves_history_alone() {
    let (_dir, journal, _config) = setup();
    let mut vcs = FakeVcs::new().with_organic(3);

    let result = revert(&mut vcs, &journal).unwrap();

    assert_eq!(result.target, None);
    assert_eq!(result.removed_commits, 0);
    assert_eq!(vcs.commit_count(), 3);
}

#[test]
fn stale_entries_are_purged_without_a_reset() {
    let (_dir, journal, config) = setup();
    let mut vcs = FakeVcs::new().with_organic(1);
    let base = vcs.head().unwrap();
    paint(&mut vcs, &journal, &config, 2);
    // history rewritten behind the tool's back
    vcs.reset_to(&ResetTarget::Commit(base)).unwrap();

    let plan = plan_revert(&vcs, &journal).unwrap();
    assert_eq!(plan.target, None);
    assert_eq!(plan.stale_entries, 2);

    let result = revert(&mut vcs, &journal).unwrap();
    assert_eq!(result.purged_entries, 2);
    assert_eq!(vcs.commit_count(), 1);
}

#[test]
fn plan_warns_about_discarded_work() {
    let (_dir, journal, config) = setup();
    let mut vcs = FakeVcs::new().with_organic(1);
    paint(&mut vcs, &journal, &config, 2);
    vcs.organic_commit("real work");
    let plan = plan_revert(&vcs, &journal).unwrap();

    let clean = describe_plan(&plan, false);
    assert!(clean.contains("1 commits not made by commitart"), "{clean}");
    assert!(!clean.contains("uncommitted changes"), "{clean}");

    let dirty = describe_plan(&plan, true);
    assert!(dirty.contains("uncommitted changes to tracked files will be discarded"), "{dirty}");
}
