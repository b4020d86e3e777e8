use assert_cmd::prelude::*;
use commitart::git::GitCli;
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;
use std::process::Command;
use tempfile::tempdir;

// a Wednesday, safely in the past
const TODAY: &str = "2025-03-12";
const HEART_CELLS: u64 = 27;

fn has_git() -> bool {
    Command::new("git").arg("--version").output().is_ok()
}

fn git(dir: &Path, args: &[&str]) {
    assert!(Command::new("git")
        .args(args)
        .current_dir(dir)
        .status()
        .unwrap()
        .success());
}

fn init_git_repo(dir: &Path) {
    // init and basic identity
    git(dir, &["init"]);
    git(dir, &["config", "core.autocrlf", "false"]);
    git(dir, &["config", "user.email", "you@example.com"]);
    git(dir, &["config", "user.name", "Your Name"]);
}

fn commit_file(dir: &Path, name: &str, content: &str) {
    let path = dir.join(name);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    let mut f = File::create(&path).unwrap();
    f.write_all(content.as_bytes()).unwrap();
    f.sync_all().unwrap();
    git(dir, &["add", name]);
    git(dir, &["commit", "-m", &format!("add {name}")]);
}

fn commit_count(dir: &Path) -> u64 {
    let out = Command::new("git")
        .args(["rev-list", "--count", "HEAD"])
        .current_dir(dir)
        .output()
        .unwrap();
    if !out.status.success() {
        return 0;
    }
    String::from_utf8_lossy(&out.stdout).trim().parse().unwrap()
}

fn commitart(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("commitart").unwrap();
    cmd.current_dir(dir)
        .env_remove("COMMITART_LOG")
        .arg("--repo")
        .arg(dir)
        .args(["--today", TODAY]);
    cmd
}

fn json_of(cmd: &mut Command) -> serde_json::Value {
    let out = cmd.assert().success().get_output().stdout.clone();
    serde_json::from_slice(&out).unwrap()
}

#[test]
fn shape_json_creates_one_commit_per_cell() {
    let dir = tempdir().unwrap();
    if !has_git() {
        return;
    }
    init_git_repo(dir.path());

    let v = json_of(commitart(dir.path()).args(["shape", "heart", "--json"]));

    assert_eq!(v["result"]["succeeded"].as_u64(), Some(HEART_CELLS));
    assert_eq!(v["result"]["failed"].as_u64(), Some(0));
    assert_eq!(v["reference_date"].as_str(), Some(TODAY));
    assert_eq!(commit_count(dir.path()), HEART_CELLS);

    let log = fs::read_to_string(dir.path().join(".commitart.jsonl")).unwrap();
    assert_eq!(log.lines().count() as u64, HEART_CELLS);
}

#[test]
fn dry_run_plans_without_committing() {
    let dir = tempdir().unwrap();
    if !has_git() {
        return;
    }
    init_git_repo(dir.path());
    commit_file(dir.path(), "README.md", "hello\n");

    let v = json_of(commitart(dir.path()).args(["text", "HI", "--dry-run", "--json"]));

    assert_eq!(v["dry_run"].as_bool(), Some(true));
    assert!(v["result"].is_null());
    let planned = v["planned"].as_array().unwrap();
    assert!(!planned.is_empty());
    assert!(planned.iter().all(|p| p["date"].as_str().unwrap() < TODAY));
    assert_eq!(commit_count(dir.path()), 1);
    assert!(!dir.path().join(".commitart.jsonl").exists());
}

#[test]
fn list_then_revert_restores_history() {
    let dir = tempdir().unwrap();
    if !has_git() {
        return;
    }
    init_git_repo(dir.path());
    commit_file(dir.path(), "src/lib.rs", "pub fn hi() {}\n");

    commitart(dir.path())
        .args(["shape", "cross", "--intensity", "2", "--json"])
        .assert()
        .success();
    assert_eq!(commit_count(dir.path()), 1 + 18);

    let listed = json_of(commitart(dir.path()).args(["list", "--json"]));
    assert_eq!(listed["total_commits"].as_u64(), Some(19));
    assert_eq!(listed["generated_commits"].as_u64(), Some(18));
    assert_eq!(listed["organic_commits"].as_u64(), Some(1));

    let reverted = json_of(commitart(dir.path()).args(["revert", "--yes", "--json"]));
    assert_eq!(reverted["removed_commits"].as_u64(), Some(18));
    assert_eq!(reverted["organic_removed"].as_u64(), Some(0));
    assert_eq!(commit_count(dir.path()), 1);
    assert!(dir.path().join("src/lib.rs").exists());
}

#[test]
fn export_writes_the_pattern() {
    let dir = tempdir().unwrap();
    if !has_git() {
        return;
    }
    init_git_repo(dir.path());
    let out = dir.path().join("pattern.json");

    commitart(dir.path())
        .args(["shape", "diamond", "--offset", "0", "--dry-run", "--export"])
        .arg(&out)
        .assert()
        .success();

    let exported: Vec<Vec<u32>> = serde_json::from_str(&fs::read_to_string(&out).unwrap()).unwrap();
    assert_eq!(exported.len(), 7);
    assert_eq!(exported[3], vec![1; 7]);
}

#[test]
fn invalid_upload_fails_without_commits() {
    let dir = tempdir().unwrap();
    if !has_git() {
        return;
    }
    init_git_repo(dir.path());
    let upload = dir.path().join("upload.json");
    fs::write(&upload, "[[1, 2], [3]]").unwrap();

    commitart(dir.path()).arg("import").arg(&upload).assert().failure();
    assert_eq!(commit_count(dir.path()), 0);
}

#[test]
fn future_cell_is_refused() {
    let dir = tempdir().unwrap();
    if !has_git() {
        return;
    }
    init_git_repo(dir.path());

    commitart(dir.path()).args(["commit", "52", "6"]).assert().failure();
    commitart(dir.path()).args(["commit", "52", "3"]).assert().success();
    assert_eq!(commit_count(dir.path()), 1);
}

#[test]
fn yesterday_commits_once() {
    let dir = tempdir().unwrap();
    if !has_git() {
        return;
    }
    init_git_repo(dir.path());

    let v = json_of(commitart(dir.path()).args(["yesterday", "--json"]));

    assert_eq!(v["planned"][0]["date"].as_str(), Some("2025-03-11"));
    assert_eq!(commit_count(dir.path()), 1);
}

fn git_output(dir: &Path, args: &[&str]) -> String {
    let out = Command::new("git").args(args).current_dir(dir).output().unwrap();
    assert!(out.status.success());
    String::from_utf8_lossy(&out.stdout).trim().to_string()
}

#[test]
fn staged_changes_stay_out_of_generated_commits() {
    let dir = tempdir().unwrap();
    if !has_git() {
        return;
    }
    init_git_repo(dir.path());
    commit_file(dir.path(), "work.txt", "v1\n");
    fs::write(dir.path().join("work.txt"), "v2\n").unwrap();
    git(dir.path(), &["add", "work.txt"]);

    commitart(dir.path()).args(["commit", "10", "3"]).assert().success();

    assert_eq!(commit_count(dir.path()), 2);
    assert_eq!(git_output(dir.path(), &["show", "--name-only", "--format=", "HEAD"]), "");
    assert_eq!(git_output(dir.path(), &["diff", "--cached", "--name-only"]), "work.txt");
    assert_eq!(fs::read_to_string(dir.path().join("work.txt")).unwrap(), "v2\n");
}

#[test]
fn uncommitted_changes_are_detected() {
    let dir = tempdir().unwrap();
    if !has_git() {
        return;
    }
    init_git_repo(dir.path());
    commit_file(dir.path(), "work.txt", "v1\n");
    fs::write(dir.path().join("notes.txt"), "untracked\n").unwrap();

    let vcs = GitCli::discover(Some(dir.path()), "git").unwrap();
    assert!(!vcs.has_uncommitted_changes().unwrap());

    fs::write(dir.path().join("work.txt"), "v2\n").unwrap();
    assert!(vcs.has_uncommitted_changes().unwrap());
}
