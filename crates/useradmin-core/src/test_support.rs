//! In-memory store for unit tests.

use std::sync::Mutex;

use crate::error::{AdminError, Result};
use crate::models::{User, UserId};
use crate::traits::UserStore;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    List,
    Delete(String, UserId),
    AssumeSession(UserId),
    CurrentSession,
}

#[derive(Default)]
pub struct StubStore {
    users: Mutex<Vec<User>>,
    calls: Mutex<Vec<Call>>,
    fail_list: Mutex<bool>,
    fail_delete: Vec<UserId>,
    fail_session: Vec<UserId>,
    operator: Option<User>,
}

impl StubStore {
    pub fn with_users(users: Vec<User>) -> Self {
        Self {
            users: Mutex::new(users),
            ..Self::default()
        }
    }

    pub fn failing_delete_for(mut self, id: i64) -> Self {
        self.fail_delete.push(UserId(id));
        self
    }

    pub fn failing_session_for(mut self, id: i64) -> Self {
        self.fail_session.push(UserId(id));
        self
    }

    pub fn with_operator(mut self, operator: User) -> Self {
        self.operator = Some(operator);
        self
    }

    pub fn set_list_failure(&self, fail: bool) {
        *self.fail_list.lock().unwrap() = fail;
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn list_calls(&self) -> usize {
        self.calls().iter().filter(|c| **c == Call::List).count()
    }

    pub fn deleted(&self) -> Vec<UserId> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                Call::Delete(_, id) => Some(id),
                _ => None,
            })
            .collect()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }
}

impl UserStore for StubStore {
    fn list_users(&self, _exclude_attributes: bool) -> Result<Vec<User>> {
        self.record(Call::List);
        if *self.fail_list.lock().unwrap() {
            return Err(AdminError::Http("list failed".to_string()));
        }
        Ok(self.users.lock().unwrap().clone())
    }

    fn delete_item(&self, endpoint: &str, id: UserId) -> Result<()> {
        self.record(Call::Delete(endpoint.to_string(), id));
        if self.fail_delete.contains(&id) {
            return Err(AdminError::Api {
                status: 400,
                message: format!("cannot delete {id}"),
            });
        }
        let mut users = self.users.lock().unwrap();
        let before = users.len();
        users.retain(|u| u.id != id);
        if users.len() == before {
            return Err(AdminError::NotFound(format!("user {id}")));
        }
        Ok(())
    }

    fn assume_session(&self, id: UserId) -> Result<User> {
        self.record(Call::AssumeSession(id));
        if self.fail_session.contains(&id) {
            return Err(AdminError::Forbidden(format!("session {id}")));
        }
        self.users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.id == id)
            .cloned()
            .ok_or_else(|| AdminError::NotFound(format!("user {id}")))
    }

    fn current_session(&self) -> Result<User> {
        self.record(Call::CurrentSession);
        self.operator.clone().ok_or(AdminError::Unauthorized)
    }
}
