#![allow(dead_code)]

use chrono::{Duration, Utc};
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;
use std::process::Command;

pub fn has_git() -> bool {
    Command::new("git").arg("--version").output().is_ok()
}

pub fn git(dir: &Path, args: &[&str]) {
    assert!(Command::new("git")
        .args(args)
        .current_dir(dir)
        .status()
        .unwrap()
        .success());
}

fn git_at(dir: &Path, args: &[&str], author: &str, hours_ago: i64) {
    let date = format!("{} +0000", (Utc::now() - Duration::hours(hours_ago)).timestamp());
    assert!(Command::new("git")
        .args(args)
        .current_dir(dir)
        .env("GIT_AUTHOR_NAME", author)
        .env("GIT_AUTHOR_EMAIL", format!("{}@example.com", author.to_lowercase()))
        .env("GIT_AUTHOR_DATE", &date)
        .env("GIT_COMMITTER_DATE", &date)
        .status()
        .unwrap()
        .success());
}

pub fn init_git_repo(dir: &Path) {
    fs::create_dir_all(dir).unwrap();
    git(dir, &["init"]);
    git(dir, &["config", "core.autocrlf", "false"]);
    git(dir, &["config", "core.safecrlf", "false"]);
    git(dir, &["config", "commit.gpgsign", "false"]);
    git(dir, &["config", "user.email", "you@example.com"]);
    git(dir, &["config", "user.name", "Your Name"]);
}

pub fn write_file(dir: &Path, name: &str, content: &str) {
    let path = dir.join(name);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    let mut f = File::create(&path).unwrap();
    f.write_all(content.as_bytes()).unwrap();
    f.sync_all().unwrap();
}

pub fn write_bytes(dir: &Path, name: &str, content: &[u8]) {
    let path = dir.join(name);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(&path, content).unwrap();
}

/// Commit whatever is staged as `author`, `hours_ago` hours in the past.
pub fn commit_staged(dir: &Path, message: &str, author: &str, hours_ago: i64) {
    git_at(dir, &["commit", "-m", message], author, hours_ago);
}

/// Stage everything and commit as `author`, `hours_ago` hours in the past.
pub fn commit_all(dir: &Path, message: &str, author: &str, hours_ago: i64) {
    git(dir, &["add", "."]);
    commit_staged(dir, message, author, hours_ago);
}

pub fn commit_file(dir: &Path, name: &str, content: &str, author: &str, hours_ago: i64) {
    write_file(dir, name, content);
    commit_all(dir, &format!("add {name}"), author, hours_ago);
}

pub fn merge_no_ff(dir: &Path, branch: &str, message: &str, author: &str, hours_ago: i64) {
    git_at(dir, &["merge", "--no-ff", "--no-edit", branch, "-m", message], author, hours_ago);
}

/// A directory holding no-op `git` and `gnuplot` executables, for use as `PATH`.
#[cfg(unix)]
pub fn stub_tools(dir: &Path) -> std::path::PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let bin = dir.join("stub-bin");
    fs::create_dir_all(&bin).unwrap();
    for tool in ["git", "gnuplot"] {
        let path = bin.join(tool);
        fs::write(&path, "#!/bin/sh\nexit 0\n").unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
    }
    bin
}
