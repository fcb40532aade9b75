use serde_json::Value;
use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use std::time::{SystemTime, UNIX_EPOCH};

struct TempDirGuard {
    path: PathBuf,
}

impl TempDirGuard {
    fn new(prefix: &str) -> Self {
        let unique = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("clock should be after unix epoch")
            .as_nanos();
        let path = std::env::temp_dir().join(format!(
            "civiclens-cli-{prefix}-{}-{unique}",
            std::process::id()
        ));
        fs::create_dir_all(&path).expect("temp dir should be created");
        Self { path }
    }

    fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for TempDirGuard {
    fn drop(&mut self) {
        let _ = fs::remove_dir_all(&self.path);
    }
}

fn run_civiclens<I, S>(args: I) -> Output
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    let bin = env!("CARGO_BIN_EXE_civiclens");
    Command::new(bin)
        .args(args)
        .output()
        .expect("civiclens command should execute")
}

fn assert_success(output: &Output) {
    if !output.status.success() {
        panic!(
            "command failed with status {:?}\nstdout:\n{}\nstderr:\n{}",
            output.status.code(),
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr),
        );
    }
}

fn assert_failure(output: &Output) {
    if output.status.success() {
        panic!(
            "command unexpectedly succeeded\nstdout:\n{}\nstderr:\n{}",
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr),
        );
    }
}

fn parse_json_stdout(output: &Output) -> Value {
    serde_json::from_slice::<Value>(&output.stdout).unwrap_or_else(|e| {
        panic!(
            "expected valid JSON stdout, got error: {e}\nstdout:\n{}",
            String::from_utf8_lossy(&output.stdout)
        )
    })
}

fn seed_users(state: &str) {
    for (id, username) in [("u-alice", "alice"), ("u-bob", "bob")] {
        let output = run_civiclens([
            "user", "add", username, "--id", id, "--state", state, "--json",
        ]);
        assert_success(&output);
        let payload = parse_json_stdout(&output);
        assert_eq!(payload["action"], "user.add");
        assert_eq!(payload["user"]["id"], id);
    }
}

fn report_issue(state: &str, title: &str, latitude: &str, longitude: &str) -> Output {
    run_civiclens([
        "issue",
        "report",
        title,
        "--description",
        "The corner has been dark for over a week now.",
        "--category",
        "Infrastructure",
        "--latitude",
        latitude,
        "--longitude",
        longitude,
        "--reporter",
        "u-alice",
        "--state",
        state,
        "--json",
    ])
}

#[test]
fn report_vote_and_inbox_flow_round_trips() {
    let temp = TempDirGuard::new("flow");
    let state_path = temp.path().join("state.jsonl");
    let state = state_path.to_str().expect("utf8 temp path");

    seed_users(state);

    let output = report_issue(state, "Broken Light", "40.7128", "-74.0060");
    assert_success(&output);
    let payload = parse_json_stdout(&output);
    assert_eq!(payload["action"], "issue.report");
    assert_eq!(payload["issue"]["status"], "Reported");
    let issue_id = payload["issue"]["id"]
        .as_str()
        .expect("issue id in payload")
        .to_string();

    let output = run_civiclens([
        "issue",
        "vote",
        issue_id.as_str(),
        "up",
        "--voter",
        "u-bob",
        "--state",
        state,
        "--json",
    ]);
    assert_success(&output);
    let payload = parse_json_stdout(&output);
    assert_eq!(payload["receipt"]["action"], "added");
    assert_eq!(payload["receipt"]["upvotes"], 1);

    let output = run_civiclens([
        "issue",
        "set-status",
        issue_id.as_str(),
        "under review",
        "--actor",
        "u-ops",
        "--state",
        state,
        "--json",
    ]);
    assert_success(&output);
    let payload = parse_json_stdout(&output);
    assert_eq!(payload["issue"]["status"], "Under Review");

    let output = run_civiclens([
        "notifications",
        "list",
        "--recipient",
        "u-alice",
        "--state",
        state,
        "--json",
    ]);
    assert_success(&output);
    let payload = parse_json_stdout(&output);
    assert_eq!(payload["count"], 2);

    let output = run_civiclens(["leaderboard", "--state", state, "--json"]);
    assert_success(&output);
    let payload = parse_json_stdout(&output);
    assert_eq!(payload["items"][0]["username"], "alice");
    assert_eq!(payload["items"][0]["totalUpvotes"], 1);

    let output = run_civiclens(["check", "--state", state]);
    assert_success(&output);
    assert!(String::from_utf8_lossy(&output.stdout).contains("[engagement] OK"));
}

#[test]
fn duplicate_nearby_report_exits_nonzero() {
    let temp = TempDirGuard::new("duplicate");
    let state_path = temp.path().join("state.jsonl");
    let state = state_path.to_str().expect("utf8 temp path");

    seed_users(state);
    assert_success(&report_issue(state, "Broken Light", "40.7128", "-74.0060"));

    let output = report_issue(state, "broken light ", "40.7129", "-74.0061");
    assert_failure(&output);
    assert!(
        String::from_utf8_lossy(&output.stderr).contains("similar issue already exists nearby")
    );
}

#[test]
fn invalid_inputs_exit_nonzero_with_reasons() {
    let temp = TempDirGuard::new("invalid");
    let state_path = temp.path().join("state.jsonl");
    let state = state_path.to_str().expect("utf8 temp path");

    seed_users(state);

    let output = run_civiclens([
        "issue", "vote", "some-id", "sideways", "--voter", "u-bob", "--state", state,
    ]);
    assert_failure(&output);
    assert!(String::from_utf8_lossy(&output.stderr).contains("unknown vote kind"));

    let output = run_civiclens(["user", "add", "alice", "--state", state]);
    assert_failure(&output);
    assert!(String::from_utf8_lossy(&output.stderr).contains("username already taken"));
}

#[test]
fn check_accepts_a_missing_state_file() {
    let temp = TempDirGuard::new("check-empty");
    let state_path = temp.path().join("state.jsonl");
    let state = state_path.to_str().expect("utf8 temp path");

    let output = run_civiclens(["check", "--state", state]);
    assert_success(&output);
    assert!(String::from_utf8_lossy(&output.stdout).contains("[engagement] OK"));
}
