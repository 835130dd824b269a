//! End-to-end tests for the user commands.
//!
//! Most tests run against the mock backend on a fixture copied into a temp
//! directory, so deletions can be checked on disk afterwards. The HTTP tests
//! at the bottom use a small local server standing in for the REST API.

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::net::TcpListener;
use std::path::Path;
use std::thread;
use std::time::Duration;
use tempfile::TempDir;

fn fleet_users() -> Value {
    serde_json::json!([
        {"id": 1, "name": "Admin", "email": "admin@example.com", "administrator": true},
        {"id": 2, "name": "Driver", "email": "driver@example.com", "phone": "+15550100"},
        {"id": 3, "name": "Dispatcher", "email": "dispatch@example.com",
         "expiration_time": "2030-01-01T00:00:00Z"},
        {"id": 4, "name": "Visitor", "email": "visitor@example.com", "temporary": true}
    ])
}

fn fixture() -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("users.json"), fleet_users().to_string()).unwrap();
    dir
}

fn with_session(dir: &TempDir, session: Value) {
    std::fs::write(dir.path().join("session.json"), session.to_string()).unwrap();
}

fn with_faults(dir: &TempDir, faults: &str) {
    std::fs::write(dir.path().join("mock.toml"), faults).unwrap();
}

/// Build a useradmin command using the mock backend on `dir`
fn useradmin_mock(dir: &Path) -> Command {
    let mut cmd = cargo_bin_cmd!("useradmin");
    cmd.current_dir(dir)
        .env("XDG_CONFIG_HOME", dir)
        .env("NO_COLOR", "1")
        .env("TZ", "UTC")
        .env("USERADMIN_MOCK_DIR", dir)
        .env_remove("USERADMIN_URL")
        .env_remove("USERADMIN_TOKEN")
        .env_remove("USERADMIN_BACKEND")
        .env_remove("USERADMIN_CONFIG")
        .env_remove("RUST_LOG")
        .timeout(Duration::from_secs(10));
    cmd
}

fn stored_ids(dir: &TempDir) -> Vec<i64> {
    let content = std::fs::read_to_string(dir.path().join("users.json")).unwrap();
    let users: Vec<Value> = serde_json::from_str(&content).unwrap();
    users.iter().map(|u| u["id"].as_i64().unwrap()).collect()
}

fn json_stdout(cmd: &mut Command) -> Value {
    let output = cmd.assert().success().get_output().stdout.clone();
    serde_json::from_slice(&output).unwrap()
}

fn row_ids(table: &Value) -> Vec<i64> {
    table["body"]["rows"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["id"].as_i64().unwrap())
        .collect()
}

// =============================================================================
// list
// =============================================================================

#[test]
fn test_list_hides_temporary_users() {
    let dir = fixture();
    useradmin_mock(dir.path())
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("Driver"))
        .stdout(predicate::str::contains("2030-01-01"))
        .stdout(predicate::str::contains("Visitor").not())
        .stdout(predicate::str::contains("Temporary: off"));
}

#[test]
fn test_list_with_temporary_users() {
    let dir = fixture();
    let table = json_stdout(useradmin_mock(dir.path()).args(["--format", "json", "list", "--temporary"]));

    assert_eq!(row_ids(&table), vec![1, 2, 3, 4]);
    assert_eq!(table["include_temporary"], true);
    assert_eq!(table["body"]["state"], "rows");
}

#[test]
fn test_list_search_matches_phone() {
    let dir = fixture();
    let table = json_stdout(useradmin_mock(dir.path()).args(["-o", "json", "list", "--search", "5550"]));

    assert_eq!(row_ids(&table), vec![2]);
}

#[test]
fn test_list_json_has_headers_and_actions() {
    let dir = fixture();
    let table = json_stdout(useradmin_mock(dir.path()).args(["-o", "json", "list"]));

    assert_eq!(
        table["headers"],
        serde_json::json!(["Name", "Email", "Admin", "Disabled", "Expiration"])
    );
    let actions: Vec<&str> = table["body"]["rows"][0]["actions"]
        .as_array()
        .unwrap()
        .iter()
        .map(|a| a["key"].as_str().unwrap())
        .collect();
    // Fallback operator is the first administrator
    assert_eq!(actions, vec!["login", "connections"]);
    assert_eq!(table["remove_enabled"], false);
}

#[test]
fn test_list_for_plain_operator_offers_connections_only() {
    let dir = fixture();
    with_session(
        &dir,
        serde_json::json!({"id": 2, "name": "Driver", "email": "driver@example.com"}),
    );

    let table = json_stdout(useradmin_mock(dir.path()).args(["-o", "json", "list"]));
    let actions = table["body"]["rows"][0]["actions"].as_array().unwrap();

    assert_eq!(actions.len(), 1);
    assert_eq!(actions[0]["key"], "connections");
}

#[test]
fn test_list_labels_from_config() {
    let dir = fixture();
    std::fs::write(
        dir.path().join("useradmin.toml"),
        "[labels]\nuserEmail = \"E-Mail\"\nsharedYes = \"Ja\"\n",
    )
    .unwrap();

    useradmin_mock(dir.path())
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("E-Mail"))
        .stdout(predicate::str::contains("Ja"));
}

#[test]
fn test_list_failure_reports_error() {
    let dir = fixture();
    with_faults(&dir, "list = true\n");

    useradmin_mock(dir.path())
        .arg("list")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to load users"));
}

// =============================================================================
// remove (bulk)
// =============================================================================

#[test]
fn test_remove_with_yes_deletes_all() {
    let dir = fixture();
    let outcome = json_stdout(useradmin_mock(dir.path()).args(["-o", "json", "remove", "2", "3", "--yes"]));

    assert_eq!(outcome["result"], "removed");
    assert_eq!(outcome["ids"], serde_json::json!([2, 3]));
    assert_eq!(stored_ids(&dir), vec![1, 4]);
}

#[test]
fn test_remove_confirmed_on_stdin() {
    let dir = fixture();
    useradmin_mock(dir.path())
        .args(["remove", "2", "3"])
        .write_stdin("y\n")
        .assert()
        .success()
        .stderr(predicate::str::contains("Remove items? (2, 3)"))
        .stdout(predicate::str::contains("Removed users: 2, 3"));

    assert_eq!(stored_ids(&dir), vec![1, 4]);
}

#[test]
fn test_remove_declined_keeps_users() {
    let dir = fixture();
    useradmin_mock(dir.path())
        .args(["remove", "2"])
        .write_stdin("n\n")
        .assert()
        .success()
        .stderr(predicate::str::contains("Remove item?"))
        .stdout(predicate::str::contains("Cancelled"));

    assert_eq!(stored_ids(&dir), vec![1, 2, 3, 4]);
}

#[test]
fn test_remove_stops_at_first_failure() {
    let dir = fixture();
    with_faults(&dir, "delete = [3]\n");

    useradmin_mock(dir.path())
        .args(["remove", "2", "3", "1", "--yes"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to remove user 3"));

    // 2 went before the failure, 1 was never attempted
    assert_eq!(stored_ids(&dir), vec![1, 3, 4]);
}

#[test]
fn test_remove_unknown_user() {
    let dir = fixture();
    useradmin_mock(dir.path())
        .args(["remove", "99", "--yes"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("User 99 not found"));

    assert_eq!(stored_ids(&dir), vec![1, 2, 3, 4]);
}

#[test]
fn test_remove_logs_calls() {
    let dir = fixture();
    useradmin_mock(dir.path())
        .args(["remove", "2", "--yes"])
        .assert()
        .success();

    let log = std::fs::read_to_string(dir.path().join("call_log.jsonl")).unwrap();
    let methods: Vec<String> = log
        .lines()
        .map(|l| serde_json::from_str::<Value>(l).unwrap()["method"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(
        methods,
        vec!["current_session", "list_users", "delete_item", "list_users"]
    );
}

// =============================================================================
// delete (single item)
// =============================================================================

#[test]
fn test_delete_with_yes() {
    let dir = fixture();
    let outcome = json_stdout(useradmin_mock(dir.path()).args(["-o", "json", "delete", "3", "--yes"]));

    assert_eq!(outcome["success"], true);
    assert_eq!(outcome["id"], 3);
    assert_eq!(stored_ids(&dir), vec![1, 2, 4]);
}

#[test]
fn test_delete_without_answer_is_cancelled() {
    let dir = fixture();
    useradmin_mock(dir.path())
        .args(["delete", "3"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Cancelled"));

    assert_eq!(stored_ids(&dir), vec![1, 2, 3, 4]);
}

// =============================================================================
// row actions
// =============================================================================

#[test]
fn test_login_as_manager() {
    let dir = fixture();
    let outcome = json_stdout(useradmin_mock(dir.path()).args(["-o", "json", "login", "2"]));

    assert_eq!(outcome, serde_json::json!({"type": "reload", "path": "/"}));
    let session: Value =
        serde_json::from_str(&std::fs::read_to_string(dir.path().join("session.json")).unwrap())
            .unwrap();
    assert_eq!(session["id"], 2);
}

#[test]
fn test_login_not_allowed_for_plain_operator() {
    let dir = fixture();
    with_session(
        &dir,
        serde_json::json!({"id": 2, "name": "Driver", "email": "driver@example.com"}),
    );

    useradmin_mock(dir.path())
        .args(["login", "3"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not available"));
}

#[test]
fn test_login_rejected_by_store() {
    let dir = fixture();
    with_faults(&dir, "session = [3]\n");

    useradmin_mock(dir.path())
        .args(["login", "3"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to log in as user 3"));
}

#[test]
fn test_connections_path() {
    let dir = fixture();
    useradmin_mock(dir.path())
        .args(["connections", "3"])
        .assert()
        .success()
        .stdout(predicate::str::contains("/settings/user/3/connections"));
}

#[test]
fn test_edit_path() {
    let dir = fixture();
    useradmin_mock(dir.path())
        .args(["edit", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("/settings/user/2"));
}

#[test]
fn test_create_path() {
    let dir = fixture();
    let outcome = json_stdout(useradmin_mock(dir.path()).args(["-o", "json", "create"]));

    assert_eq!(
        outcome,
        serde_json::json!({"type": "navigate", "path": "/settings/user"})
    );
}

#[test]
fn test_create_open_needs_web_address() {
    let dir = fixture();
    useradmin_mock(dir.path())
        .args(["create", "--open"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no web address"));
}

#[test]
fn test_open_needs_web_address() {
    let dir = fixture();
    useradmin_mock(dir.path())
        .args(["edit", "2", "--open"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no web address"));
}

// =============================================================================
// browse
// =============================================================================

#[test]
fn test_browse_session() {
    let dir = fixture();
    useradmin_mock(dir.path())
        .arg("browse")
        .write_stdin("toggle 2 3\nremove\nyes\nquit\n")
        .assert()
        .success()
        .stderr(predicate::str::contains("Remove items? (2, 3)"))
        .stdout(predicate::str::contains("Removed users: 2, 3"));

    assert_eq!(stored_ids(&dir), vec![1, 4]);
}

#[test]
fn test_browse_reports_bad_command_and_continues() {
    let dir = fixture();
    useradmin_mock(dir.path())
        .arg("browse")
        .write_stdin("frobnicate\nhelp\n")
        .assert()
        .success()
        .stderr(predicate::str::contains("Unknown command"))
        .stdout(predicate::str::contains("Commands:"));
}

// =============================================================================
// HTTP backend
// =============================================================================

/// Serve canned JSON by path prefix for `requests` connections
fn start_api_server(routes: Vec<(&'static str, String)>, requests: usize) -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to bind to port");
    let port = listener.local_addr().unwrap().port();

    thread::spawn(move || {
        use std::io::{Read, Write};

        for stream in listener.incoming().take(requests) {
            let Ok(mut stream) = stream else { continue };
            let mut buffer = [0; 4096];
            let Ok(n) = stream.read(&mut buffer) else { continue };
            let request = String::from_utf8_lossy(&buffer[..n]);
            let target = request.split_whitespace().nth(1).unwrap_or("/");

            let (status, body) = routes
                .iter()
                .find(|(prefix, _)| target.starts_with(prefix))
                .map(|(_, body)| ("200 OK", body.clone()))
                .unwrap_or(("404 Not Found", String::new()));

            let response = format!(
                "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status,
                body.len(),
                body
            );
            let _ = stream.write_all(response.as_bytes());
        }
    });

    port
}

fn useradmin_http(port: u16, dir: &Path) -> Command {
    let mut cmd = cargo_bin_cmd!("useradmin");
    cmd.current_dir(dir)
        .env("XDG_CONFIG_HOME", dir)
        .env("NO_COLOR", "1")
        .env("TZ", "UTC")
        .env("USERADMIN_URL", format!("http://127.0.0.1:{}", port))
        .env("USERADMIN_TOKEN", "test-token")
        .env_remove("USERADMIN_BACKEND")
        .env_remove("USERADMIN_CONFIG")
        .env_remove("USERADMIN_MOCK_DIR")
        .env_remove("RUST_LOG")
        .timeout(Duration::from_secs(10));
    cmd
}

#[test]
fn test_http_list() {
    let session = serde_json::json!({"id": 1, "name": "Admin", "email": "admin@example.com", "administrator": true});
    let users = serde_json::json!([
        {"id": 1, "name": "Admin", "email": "admin@example.com", "administrator": true, "attributes": {}},
        {"id": 5, "name": "Courier", "email": "courier@example.com", "userLimit": 0,
         "expirationTime": "2031-05-06T00:00:00.000+00:00", "attributes": {}},
        {"id": 6, "name": "Guest", "email": "guest@example.com", "temporary": true, "attributes": {}}
    ]);
    let port = start_api_server(
        vec![
            ("/api/session", session.to_string()),
            ("/api/users", users.to_string()),
        ],
        2,
    );
    let dir = tempfile::tempdir().unwrap();

    let table = json_stdout(useradmin_http(port, dir.path()).args(["-o", "json", "list"]));

    assert_eq!(row_ids(&table), vec![1, 5]);
    assert_eq!(table["body"]["rows"][1]["expiration_time"], "2031-05-06");
}

#[test]
fn test_http_session_lookup_failure() {
    // No routes: every request answers 404
    let port = start_api_server(Vec::new(), 1);
    let dir = tempfile::tempdir().unwrap();

    useradmin_http(port, dir.path())
        .arg("list")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to look up the current session"));
}
