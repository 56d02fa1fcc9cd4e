use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::tempdir;

fn genbi() -> Command {
    Command::cargo_bin("genbi").expect("binary exists")
}

#[test]
fn test_help_lists_commands() {
    genbi()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("chat"))
        .stdout(predicate::str::contains("sessions"))
        .stdout(predicate::str::contains("datasources"))
        .stdout(predicate::str::contains("export"));
}

#[test]
fn test_sessions_list_empty_store() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("sessions.json");

    genbi()
        .env("GENBI_SESSIONS_FILE", &path)
        .args(["sessions", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No sessions found"));
}

#[test]
fn test_sessions_new_then_list() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("sessions.json");

    genbi()
        .env("GENBI_SESSIONS_FILE", &path)
        .args(["sessions", "new"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created session"));

    genbi()
        .env("GENBI_SESSIONS_FILE", &path)
        .args(["sessions", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("New chat"));
}

#[test]
fn test_sessions_delete_by_prefix() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("sessions.json");

    genbi()
        .env("GENBI_SESSIONS_FILE", &path)
        .args(["sessions", "new"])
        .assert()
        .success();

    let id = first_session_id(&path);

    genbi()
        .env("GENBI_SESSIONS_FILE", &path)
        .args(["sessions", "delete", &id[..8]])
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted session"));
}

#[test]
fn test_sessions_list_after_multibyte_rename() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("sessions.json");

    genbi()
        .env("GENBI_SESSIONS_FILE", &path)
        .args(["sessions", "new"])
        .assert()
        .success();

    let id = first_session_id(&path);
    let title = "é".repeat(25);

    genbi()
        .env("GENBI_SESSIONS_FILE", &path)
        .args(["sessions", "rename", &id[..8], &title])
        .assert()
        .success();

    genbi()
        .env("GENBI_SESSIONS_FILE", &path)
        .args(["sessions", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains(title));
}

#[test]
fn test_datasources_list_shows_catalog() {
    genbi()
        .args(["datasources", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("sales"))
        .stdout(predicate::str::contains("Sales Orders"));
}

#[test]
fn test_datasources_show_lists_attributes() {
    genbi()
        .args(["datasources", "show", "sales"])
        .assert()
        .success()
        .stdout(predicate::str::contains("order_id"))
        .stdout(predicate::str::contains("customer.region"));
}

#[test]
fn test_datasources_show_unknown_fails() {
    genbi()
        .args(["datasources", "show", "inventory"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("inventory"));
}

#[test]
fn test_export_transcript_to_stdout() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("sessions.json");

    genbi()
        .env("GENBI_SESSIONS_FILE", &path)
        .args(["sessions", "new"])
        .assert()
        .success();

    let id = first_session_id(&path);

    genbi()
        .env("GENBI_SESSIONS_FILE", &path)
        .args(["export", &id[..8]])
        .assert()
        .success()
        .stdout(predicate::str::contains("# New chat"))
        .stdout(predicate::str::contains("## Assistant"));
}

#[test]
fn test_export_unknown_session_fails() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("sessions.json");

    genbi()
        .env("GENBI_SESSIONS_FILE", &path)
        .args(["export", "nope"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("nope"));
}

/// Read the newest session id straight from the persisted slot
fn first_session_id(path: &std::path::Path) -> String {
    let raw = std::fs::read_to_string(path).expect("session file written");
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    value["sessions"][0]["id"].as_str().unwrap().to_string()
}
