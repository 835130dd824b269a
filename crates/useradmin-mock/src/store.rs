//! Mock store implementing the UserStore trait
//!
//! Reads the collection from fixture files and writes deletions back.

use crate::faults::Faults;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};
use tracing::debug;
use useradmin_core::{AdminError, Result, User, UserId, UserStore, USERS_ENDPOINT};

const USERS_FILE: &str = "users.json";
const SESSION_FILE: &str = "session.json";
const FAULTS_FILE: &str = "mock.toml";
const CALL_LOG_FILE: &str = "call_log.jsonl";

/// A user store backed by a fixture directory
pub struct MockStore {
    /// Root directory containing the fixtures
    dir: PathBuf,

    /// Injected failures
    faults: Faults,

    /// Current collection; written back to users.json on change
    users: Mutex<Vec<User>>,

    /// Call log file writer
    log_writer: Mutex<Option<BufWriter<File>>>,

    /// Whether to log calls
    log_enabled: bool,
}

/// A single call log entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CallLogEntry {
    /// Timestamp of the call
    pub timestamp: DateTime<Utc>,

    /// Method name
    pub method: String,

    /// Arguments passed
    pub args: HashMap<String, serde_json::Value>,

    /// Error message (if call failed)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    /// Simulated response status code
    pub status: u16,
}

impl MockStore {
    /// Open a fixture directory
    pub fn new(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref().to_path_buf();

        let faults = Faults::load(&dir.join(FAULTS_FILE))
            .map_err(|e| AdminError::Io(format!("Failed to load mock faults: {}", e)))?;
        let users = read_json::<Vec<User>>(&dir.join(USERS_FILE))?;

        let log_file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(dir.join(CALL_LOG_FILE))
            .ok();

        Ok(Self {
            dir,
            faults,
            users: Mutex::new(users),
            log_writer: Mutex::new(log_file.map(BufWriter::new)),
            log_enabled: true,
        })
    }

    /// Open a fixture directory without writing a call log
    pub fn new_without_logging(dir: impl AsRef<Path>) -> Result<Self> {
        let mut store = Self::new(dir)?;
        store.log_enabled = false;
        Ok(store)
    }

    fn users(&self) -> Result<MutexGuard<'_, Vec<User>>> {
        self.users
            .lock()
            .map_err(|_| AdminError::Io("mock store lock poisoned".to_string()))
    }

    fn simulate_latency(&self) {
        if self.faults.delay_ms > 0 {
            std::thread::sleep(std::time::Duration::from_millis(self.faults.delay_ms));
        }
    }

    fn persist_users(&self, users: &[User]) -> Result<()> {
        let content = serde_json::to_string_pretty(users)
            .map_err(|e| AdminError::Parse(format!("Failed to encode users: {}", e)))?;
        std::fs::write(self.dir.join(USERS_FILE), content)
            .map_err(|e| AdminError::Io(format!("Failed to write users: {}", e)))
    }

    fn persist_session(&self, user: &User) -> Result<()> {
        let content = serde_json::to_string_pretty(user)
            .map_err(|e| AdminError::Parse(format!("Failed to encode session: {}", e)))?;
        std::fs::write(self.dir.join(SESSION_FILE), content)
            .map_err(|e| AdminError::Io(format!("Failed to write session: {}", e)))
    }

    /// Log a call and pass its result through
    fn logged<T>(&self, method: &str, args: &[(&str, serde_json::Value)], result: Result<T>) -> Result<T> {
        if self.log_enabled {
            let (status, error) = match &result {
                Ok(_) => (200, None),
                Err(e) => (status_of(e), Some(e.to_string())),
            };
            let entry = CallLogEntry {
                timestamp: Utc::now(),
                method: method.to_string(),
                args: args
                    .iter()
                    .map(|(k, v)| (k.to_string(), v.clone()))
                    .collect(),
                error,
                status,
            };

            if let Ok(mut writer) = self.log_writer.lock() {
                if let Some(w) = writer.as_mut() {
                    if let Ok(json) = serde_json::to_string(&entry) {
                        let _ = writeln!(w, "{}", json);
                        let _ = w.flush();
                    }
                }
            }
        }
        result
    }

    /// Get the call log entries
    pub fn read_call_log(&self) -> Result<Vec<CallLogEntry>> {
        let content = std::fs::read_to_string(self.dir.join(CALL_LOG_FILE)).unwrap_or_default();

        Ok(content
            .lines()
            .filter_map(|line| serde_json::from_str(line).ok())
            .collect())
    }

    /// Clear the call log
    pub fn clear_call_log(&self) -> Result<()> {
        std::fs::write(self.dir.join(CALL_LOG_FILE), "")
            .map_err(|e| AdminError::Io(format!("Failed to clear call log: {}", e)))
    }

    fn do_list(&self) -> Result<Vec<User>> {
        if self.faults.list {
            return Err(AdminError::Api {
                status: 500,
                message: "injected list failure".to_string(),
            });
        }
        Ok(self.users()?.clone())
    }

    fn do_delete(&self, endpoint: &str, id: UserId) -> Result<()> {
        if endpoint != USERS_ENDPOINT {
            return Err(AdminError::NotFound(format!("endpoint {endpoint}")));
        }
        if self.faults.fails_delete(id) {
            return Err(AdminError::Api {
                status: 500,
                message: format!("injected delete failure for user {id}"),
            });
        }

        let mut users = self.users()?;
        let before = users.len();
        users.retain(|u| u.id != id);
        if users.len() == before {
            return Err(AdminError::NotFound(format!("user {id}")));
        }
        self.persist_users(&users)?;
        debug!(%id, remaining = users.len(), "mock user deleted");
        Ok(())
    }

    fn do_assume(&self, id: UserId) -> Result<User> {
        if self.faults.fails_session(id) {
            return Err(AdminError::Forbidden(format!("session of user {id}")));
        }
        let user = self
            .users()?
            .iter()
            .find(|u| u.id == id)
            .cloned()
            .ok_or_else(|| AdminError::NotFound(format!("user {id}")))?;
        self.persist_session(&user)?;
        Ok(user)
    }

    /// session.json when present, otherwise the first administrator
    fn do_current_session(&self) -> Result<User> {
        let path = self.dir.join(SESSION_FILE);
        if path.exists() {
            return read_json(&path);
        }
        self.users()?
            .iter()
            .find(|u| u.administrator)
            .cloned()
            .ok_or(AdminError::Unauthorized)
    }
}

impl UserStore for MockStore {
    fn list_users(&self, exclude_attributes: bool) -> Result<Vec<User>> {
        self.simulate_latency();
        let result = self.do_list();
        self.logged(
            "list_users",
            &[("exclude_attributes", exclude_attributes.into())],
            result,
        )
    }

    fn delete_item(&self, endpoint: &str, id: UserId) -> Result<()> {
        self.simulate_latency();
        let result = self.do_delete(endpoint, id);
        self.logged(
            "delete_item",
            &[("endpoint", endpoint.into()), ("id", id.get().into())],
            result,
        )
    }

    fn assume_session(&self, id: UserId) -> Result<User> {
        self.simulate_latency();
        let result = self.do_assume(id);
        self.logged("assume_session", &[("id", id.get().into())], result)
    }

    fn current_session(&self) -> Result<User> {
        let result = self.do_current_session();
        self.logged("current_session", &[], result)
    }
}

fn read_json<T: for<'de> Deserialize<'de>>(path: &Path) -> Result<T> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        AdminError::Io(format!("Failed to read mock fixture {}: {}", path.display(), e))
    })?;

    serde_json::from_str(&content).map_err(|e| {
        AdminError::Parse(format!(
            "Failed to parse mock fixture {}: {}",
            path.display(),
            e
        ))
    })
}

fn status_of(err: &AdminError) -> u16 {
    match err {
        AdminError::Unauthorized => 401,
        AdminError::Forbidden(_) => 403,
        AdminError::NotFound(_) => 404,
        AdminError::InvalidInput(_) => 400,
        AdminError::Api { status, .. } => *status,
        AdminError::Http(_) | AdminError::Parse(_) | AdminError::Io(_) => 500,
    }
}
