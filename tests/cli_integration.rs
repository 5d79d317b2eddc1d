//! Integration tests for the `agenda` CLI.
//!
//! Each test starts a mock task server, runs `agenda` as a subprocess
//! against it from an empty temp directory, and checks stdout, stderr
//! and the requests the server received.

use std::path::{Path, PathBuf};
use std::process::Command;

use mockito::{Matcher, Server};
use serde_json::json;

/// Get the path to the built `agenda` binary.
fn agenda_bin() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_agenda"))
}

/// Run `agenda` with the given args in `dir`, returning (stdout, stderr, success).
fn run_agenda(dir: &Path, api_url: &str, args: &[&str]) -> (String, String, bool) {
    let output = Command::new(agenda_bin())
        .args(args)
        .args(["--api-url", api_url])
        .current_dir(dir)
        .env_remove("AGENDA_CONFIG")
        .env_remove("AGENDA_LOG")
        .output()
        .expect("failed to run agenda");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    (stdout, stderr, output.status.success())
}

/// Run `agenda` expecting success, return stdout.
fn run_agenda_ok(dir: &Path, api_url: &str, args: &[&str]) -> String {
    let (stdout, stderr, success) = run_agenda(dir, api_url, args);
    if !success {
        panic!(
            "agenda {:?} failed:\nstdout: {}\nstderr: {}",
            args, stdout, stderr
        );
    }
    stdout
}

fn envelope(data: serde_json::Value) -> String {
    json!({"success": true, "data": data, "message": "ok"}).to_string()
}

fn listing() -> serde_json::Value {
    json!([
        {"id": 1, "title": "Pay rent", "status": "completed",
         "created_at": "2024-05-01T08:00:00"},
        {"id": 2, "title": "Write report", "description": "Q2 numbers",
         "status": "pending", "due_date": "2099-06-30T17:00:00",
         "created_at": "2024-05-02T09:30:00"},
    ])
}

fn mock_listing(server: &mut Server) -> mockito::Mock {
    server
        .mock("GET", "/tasks")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(envelope(listing()))
        .create()
}

// ---------------------------------------------------------------------------
// Read command tests
// ---------------------------------------------------------------------------

#[test]
fn test_list_pending_first() {
    let tmp = tempfile::TempDir::new().unwrap();
    let mut server = Server::new();
    let mock = mock_listing(&mut server);

    let out = run_agenda_ok(tmp.path(), &server.url(), &["list"]);
    mock.assert();
    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(lines[0], "   2  pending  Write report  (due 30/06/2099 17:00)");
    assert_eq!(lines[1], "   1  done     Pay rent");
    assert_eq!(lines.last(), Some(&"1 pending, 1 completed"));
}

#[test]
fn test_list_completed_only() {
    let tmp = tempfile::TempDir::new().unwrap();
    let mut server = Server::new();
    let _list = mock_listing(&mut server);

    let out = run_agenda_ok(tmp.path(), &server.url(), &["list", "--completed"]);
    assert!(out.contains("Pay rent"));
    assert!(!out.contains("Write report"));
}

#[test]
fn test_list_json() {
    let tmp = tempfile::TempDir::new().unwrap();
    let mut server = Server::new();
    let _list = mock_listing(&mut server);

    let out = run_agenda_ok(tmp.path(), &server.url(), &["list", "--json"]);
    let parsed: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(parsed["pending"], 1);
    assert_eq!(parsed["completed"], 1);
    let tasks = parsed["tasks"].as_array().unwrap();
    assert_eq!(tasks.len(), 2);
    assert_eq!(tasks[0]["id"], 2);
    assert_eq!(tasks[0]["due_date"], "2099-06-30T17:00:00");
    assert_eq!(tasks[0]["overdue"], false);
}

#[test]
fn test_list_empty() {
    let tmp = tempfile::TempDir::new().unwrap();
    let mut server = Server::new();
    let _mock = server
        .mock("GET", "/tasks")
        .with_status(200)
        .with_body(envelope(json!([])))
        .create();

    let out = run_agenda_ok(tmp.path(), &server.url(), &["list"]);
    assert_eq!(out, "No tasks found\n");
}

#[test]
fn test_show_task() {
    let tmp = tempfile::TempDir::new().unwrap();
    let mut server = Server::new();
    let mock = server
        .mock("GET", "/tasks/2")
        .with_status(200)
        .with_body(envelope(listing()[1].clone()))
        .create();

    let out = run_agenda_ok(tmp.path(), &server.url(), &["show", "2"]);
    mock.assert();
    assert!(out.starts_with("#2 Write report\n"));
    assert!(out.contains("  description: Q2 numbers"));
    assert!(out.contains("  due:         30/06/2099 17:00"));
    assert!(out.contains("  created:     02/05/2024 09:30"));
}

// ---------------------------------------------------------------------------
// Write command tests
// ---------------------------------------------------------------------------

#[test]
fn test_add_posts_fields() {
    let tmp = tempfile::TempDir::new().unwrap();
    let mut server = Server::new();
    let mock = server
        .mock("POST", "/tasks")
        .match_body(Matcher::Json(json!({
            "title": "Buy milk",
            "description": "",
            "due_date": "2099-01-02T08:30:00",
        })))
        .with_status(201)
        .with_body(envelope(json!({
            "id": 3, "title": "Buy milk", "status": "pending",
            "due_date": "2099-01-02T08:30:00",
        })))
        .create();

    let out = run_agenda_ok(
        tmp.path(),
        &server.url(),
        &["add", "  Buy milk ", "--due", "2099-01-02 08:30"],
    );
    mock.assert();
    assert_eq!(
        out,
        "Task created successfully!\n   3  pending  Buy milk  (due 02/01/2099 08:30)\n"
    );
}

#[test]
fn test_add_blank_title_sends_nothing() {
    let tmp = tempfile::TempDir::new().unwrap();
    let mut server = Server::new();
    let mock = server.mock("POST", "/tasks").expect(0).create();

    let (_, stderr, success) = run_agenda(tmp.path(), &server.url(), &["add", "   "]);
    mock.assert();
    assert!(!success);
    assert_eq!(stderr.trim(), "error: Title is required!");
}

#[test]
fn test_done_completes_task() {
    let tmp = tempfile::TempDir::new().unwrap();
    let mut server = Server::new();
    let _list = mock_listing(&mut server);
    let mock = server
        .mock("PATCH", "/tasks/2/complete")
        .with_status(200)
        .with_body(envelope(json!({
            "id": 2, "title": "Write report", "status": "completed",
        })))
        .create();

    let out = run_agenda_ok(tmp.path(), &server.url(), &["done", "2"]);
    mock.assert();
    assert_eq!(out, "Task marked as completed!\n   2  done     Write report\n");
}

#[test]
fn test_edit_sends_merged_fields() {
    let tmp = tempfile::TempDir::new().unwrap();
    let mut server = Server::new();
    let _list = mock_listing(&mut server);
    let mock = server
        .mock("PUT", "/tasks/2")
        .match_body(Matcher::Json(json!({
            "title": "Write final report",
            "description": "Q2 numbers",
            "due_date": null,
        })))
        .with_status(200)
        .with_body(envelope(json!({
            "id": 2, "title": "Write final report", "description": "Q2 numbers",
            "status": "pending",
        })))
        .create();

    let out = run_agenda_ok(
        tmp.path(),
        &server.url(),
        &["edit", "2", "--title", "Write final report", "--clear-due"],
    );
    mock.assert();
    assert!(out.starts_with("Task updated successfully!\n"));
}

#[test]
fn test_delete_with_yes() {
    let tmp = tempfile::TempDir::new().unwrap();
    let mut server = Server::new();
    let _list = mock_listing(&mut server);
    let mock = server
        .mock("DELETE", "/tasks/1")
        .with_status(200)
        .with_body(r#"{"success":true,"data":null,"message":"Task deleted"}"#)
        .create();

    let out = run_agenda_ok(tmp.path(), &server.url(), &["delete", "1", "--yes"]);
    mock.assert();
    assert_eq!(out, "Task deleted successfully!\n");
}

// ---------------------------------------------------------------------------
// Failure tests
// ---------------------------------------------------------------------------

#[test]
fn test_server_rejection_message_is_shown() {
    let tmp = tempfile::TempDir::new().unwrap();
    let mut server = Server::new();
    let _list = mock_listing(&mut server);
    let _mock = server
        .mock("DELETE", "/tasks/1")
        .with_status(404)
        .with_body(r#"{"success":false,"data":null,"message":"Task with ID 1 not found"}"#)
        .create();

    let (_, stderr, success) =
        run_agenda(tmp.path(), &server.url(), &["delete", "1", "--yes"]);
    assert!(!success);
    assert_eq!(stderr.trim(), "error: Task with ID 1 not found");
}

#[test]
fn test_unknown_task_id() {
    let tmp = tempfile::TempDir::new().unwrap();
    let mut server = Server::new();
    let _list = mock_listing(&mut server);

    let (_, stderr, success) = run_agenda(tmp.path(), &server.url(), &["done", "42"]);
    assert!(!success);
    assert_eq!(stderr.trim(), "error: task 42 not found");
}

#[test]
fn test_unreachable_server() {
    let tmp = tempfile::TempDir::new().unwrap();
    // Nothing listens on port 9 (discard) in the test environment
    let (stdout, stderr, success) = run_agenda(tmp.path(), "http://127.0.0.1:9", &["list"]);
    assert!(!success);
    assert!(stdout.is_empty());
    assert!(stderr.contains("error: Could not load tasks. Check that the backend is running."));
}

#[test]
fn test_config_file_sets_api_url() {
    let tmp = tempfile::TempDir::new().unwrap();
    let mut server = Server::new();
    let _list = mock_listing(&mut server);
    std::fs::write(
        tmp.path().join("agenda.toml"),
        format!("[api]\nbase_url = \"{}\"\n", server.url()),
    )
    .unwrap();

    let output = Command::new(agenda_bin())
        .arg("list")
        .current_dir(tmp.path())
        .env_remove("AGENDA_CONFIG")
        .output()
        .expect("failed to run agenda");
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("Write report"));
}

#[test]
fn test_config_log_level_applies_to_cli() {
    let tmp = tempfile::TempDir::new().unwrap();
    let mut server = Server::new();
    let _list = mock_listing(&mut server);

    // Default level keeps stderr quiet on success
    let (_, stderr, success) = run_agenda(tmp.path(), &server.url(), &["list"]);
    assert!(success);
    assert!(stderr.is_empty(), "unexpected stderr: {}", stderr);

    std::fs::write(tmp.path().join("agenda.toml"), "[log]\nlevel = \"info\"\n").unwrap();
    let (_, stderr, success) = run_agenda(tmp.path(), &server.url(), &["list"]);
    assert!(success);
    assert!(stderr.contains("task list loaded"), "stderr: {}", stderr);
}
