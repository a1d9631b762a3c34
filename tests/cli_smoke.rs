mod common;

use assert_cmd::prelude::*;
use common::*;
use std::fs;
use std::process::Command;
use tempfile::tempdir;

#[test]
fn no_arguments_prints_help() {
    let mut cmd = Command::cargo_bin("repostat").unwrap();
    let out = cmd.assert().failure().get_output().clone();
    let text = String::from_utf8_lossy(&out.stderr).to_string() + &String::from_utf8_lossy(&out.stdout);
    assert!(text.contains("--input-json"));
}

#[cfg(unix)]
#[test]
fn missing_input_file_exits_with_one() {
    let dir = tempdir().unwrap();
    let mut cmd = Command::cargo_bin("repostat").unwrap();
    cmd.current_dir(dir.path())
        .env("PATH", stub_tools(dir.path()))
        .args(["-i", "nope.json"]);
    let out = cmd.assert().code(1).get_output().stderr.clone();
    assert!(String::from_utf8_lossy(&out).contains("does not exist"));
}

#[cfg(unix)]
#[test]
fn invalid_json_exits_with_one() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("team.json"), "{ repos: ").unwrap();
    let mut cmd = Command::cargo_bin("repostat").unwrap();
    cmd.current_dir(dir.path())
        .env("PATH", stub_tools(dir.path()))
        .args(["-i", "team.json"]);
    let out = cmd.assert().code(1).get_output().stderr.clone();
    assert!(String::from_utf8_lossy(&out).contains("Not a valid json file"));
}

#[cfg(unix)]
#[test]
fn missing_key_is_named_and_exits_with_one() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("team.json"), r#"{"repos": ["a/b"]}"#).unwrap();
    let mut cmd = Command::cargo_bin("repostat").unwrap();
    cmd.current_dir(dir.path())
        .env("PATH", stub_tools(dir.path()))
        .args(["-i", "team.json"]);
    let out = cmd.assert().code(1).get_output().stderr.clone();
    assert!(String::from_utf8_lossy(&out).contains("Missing json key: 'team'"));
}

#[cfg(unix)]
#[test]
fn kudos_measure_requires_kudos_key() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("team.json"), r#"{"repos": [], "team": []}"#).unwrap();
    let mut cmd = Command::cargo_bin("repostat").unwrap();
    cmd.current_dir(dir.path())
        .env("PATH", stub_tools(dir.path()))
        .args(["-i", "team.json", "--measure", "kudos"]);
    let out = cmd.assert().code(1).get_output().stderr.clone();
    assert!(String::from_utf8_lossy(&out).contains("Missing json key: 'kudos'"));
}

#[test]
fn missing_programs_exit_cleanly_before_reading_config() {
    let dir = tempdir().unwrap();
    let empty_path = dir.path().join("empty-bin");
    fs::create_dir_all(&empty_path).unwrap();
    fs::write(dir.path().join("team.json"), "{ broken").unwrap();

    let mut cmd = Command::cargo_bin("repostat").unwrap();
    cmd.current_dir(dir.path())
        .env("PATH", &empty_path)
        .args(["-i", "team.json"]);
    let out = cmd.assert().code(0).get_output().stdout.clone();
    assert!(String::from_utf8_lossy(&out).contains("gnuplot is not available"));
}

#[test]
fn unknown_measure_is_rejected() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("team.json"), r#"{"repos": [], "team": []}"#).unwrap();
    let mut cmd = Command::cargo_bin("repostat").unwrap();
    cmd.current_dir(dir.path())
        .args(["-i", "team.json", "-m", "stars"]);
    cmd.assert().failure();
}

#[test]
fn run_writes_script_and_dataset() {
    if !has_git() {
        return;
    }
    let dir = tempdir().unwrap();
    let repos = dir.path().join("repos");
    let repo = repos.join("project");
    init_git_repo(&repo);
    commit_file(&repo, "src/a.rs", "fn a(){}\n", "Alice", 3);
    commit_file(&repo, "src/b.rs", "fn b(){}\n", "Bob", 2);
    fs::write(
        dir.path().join("team.json"),
        r#"{"repos": ["someone/project"], "team": ["Alice"]}"#,
    )
    .unwrap();

    let mut cmd = Command::cargo_bin("repostat").unwrap();
    cmd.current_dir(dir.path())
        .args(["-i", "team.json", "-w", "2", "--all", "--no-sync"])
        .arg("--repos-dir")
        .arg(&repos);
    let out = cmd.assert().success().get_output().stdout.clone();

    if which::which("gnuplot").is_err() {
        assert!(String::from_utf8_lossy(&out).contains("gnuplot is not available"));
        return;
    }

    let script = fs::read_to_string(dir.path().join("team-2-weeks.plot")).unwrap();
    assert!(script.contains("set output"));
    assert!(script.contains("using 1:3"));

    let json: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(dir.path().join("team-2-weeks.json")).unwrap())
            .unwrap();
    let (team, all) = json
        .as_object()
        .unwrap()
        .values()
        .fold((0, 0), |(t, a), w| {
            (t + w["team"].as_u64().unwrap(), a + w["all"].as_u64().unwrap())
        });
    assert_eq!((team, all), (1, 2));
}
