use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const ENV_VARS: [&str; 6] = [
    "YAHOO_CLIENT_ID",
    "YAHOO_CLIENT_SECRET",
    "YAHOO_REFRESH_TOKEN",
    "Y_TEAM_KEY",
    "YFBX_TOKEN_FILE",
    "RUST_LOG",
];

fn yfbx(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("yfbx").unwrap();
    cmd.current_dir(dir.path());
    for var in ENV_VARS {
        cmd.env_remove(var);
    }
    cmd
}

#[test]
fn test_missing_client_credentials_exit_with_config_error() {
    let dir = TempDir::new().unwrap();
    yfbx(&dir)
        .arg("teams")
        .assert()
        .code(3)
        .stderr(predicate::str::contains("\"error\": \"config\""))
        .stderr(predicate::str::contains("YAHOO_CLIENT_ID"));
    assert!(!dir.path().join("all_teams.csv").exists());
}

#[test]
fn test_refresh_token_without_client_is_config_error() {
    let dir = TempDir::new().unwrap();
    yfbx(&dir)
        .args(["roster", "--refresh-token", "abc", "--team-key", "466.l.1.t.2"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("YAHOO_REFRESH_TOKEN"));
}

#[test]
fn test_status_without_token_file() {
    let dir = TempDir::new().unwrap();
    yfbx(&dir)
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("not_authenticated"));
}

#[test]
fn test_status_reports_corrupt_token_file() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("oauth2.json"), "garbage").unwrap();
    yfbx(&dir)
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"status\": \"invalid\""));
}

#[test]
fn test_logout_removes_token_file() {
    let dir = TempDir::new().unwrap();
    let token_file = dir.path().join("custom.json");
    std::fs::write(&token_file, "{\"access_token\": \"abc\"}").unwrap();

    yfbx(&dir)
        .args(["logout", "--token-file"])
        .arg(&token_file)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"removed\": true"));
    assert!(!token_file.exists());
}

#[test]
fn test_zero_max_is_rejected() {
    let dir = TempDir::new().unwrap();
    yfbx(&dir)
        .args(["free-agents", "--max", "0"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("invalid_input"));
}

#[test]
fn test_bad_date_is_rejected_by_parser() {
    let dir = TempDir::new().unwrap();
    yfbx(&dir)
        .args(["roster", "--date", "yesterday"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("YYYY-MM-DD"));
}
