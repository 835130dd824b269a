use crate::error::{Result, TraccarError};
use crate::models::ApiUser;
use std::time::Duration;
use tracing::debug;
use ureq::Agent;

pub struct TraccarClient {
    agent: Agent,
    base_url: String,
    token: String,
}

impl TraccarClient {
    pub fn new(base_url: &str, token: &str) -> Self {
        let agent = Agent::config_builder()
            .timeout_global(Some(Duration::from_secs(30)))
            .build()
            .into();

        Self {
            agent,
            base_url: base_url.trim_end_matches('/').to_string(),
            token: token.to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn auth_header(&self) -> String {
        format!("Bearer {}", self.token)
    }

    fn handle_error(&self, err: ureq::Error, resource: &str) -> TraccarError {
        match &err {
            ureq::Error::StatusCode(code) => match *code {
                401 => TraccarError::Unauthorized,
                403 => TraccarError::Forbidden(resource.to_string()),
                404 => TraccarError::UserNotFound(resource.to_string()),
                _ => TraccarError::Api {
                    status: *code,
                    message: err.to_string(),
                },
            },
            _ => TraccarError::Http(err),
        }
    }

    /// List all users visible to the session.
    ///
    /// With `exclude_attributes` the server leaves out each user's attribute map.
    pub fn list_users(&self, exclude_attributes: bool) -> Result<Vec<ApiUser>> {
        let url = format!(
            "{}/api/users?excludeAttributes={}",
            self.base_url, exclude_attributes
        );

        let mut response = self
            .agent
            .get(&url)
            .header("Authorization", &self.auth_header())
            .header("Accept", "application/json")
            .call()
            .map_err(|e| self.handle_error(e, "users"))?;

        let users: Vec<ApiUser> = response.body_mut().read_json()?;
        debug!(count = users.len(), "listed users");
        Ok(users)
    }

    /// Delete one item of a collection endpoint (`/api/{endpoint}/{id}`)
    pub fn delete_item(&self, endpoint: &str, id: i64) -> Result<()> {
        let url = format!("{}/api/{}/{}", self.base_url, endpoint, id);

        self.agent
            .delete(&url)
            .header("Authorization", &self.auth_header())
            .call()
            .map_err(|e| self.handle_error(e, &id.to_string()))?;

        Ok(())
    }

    pub fn delete_user(&self, id: i64) -> Result<()> {
        self.delete_item("users", id)
    }

    /// Switch the session to another user; the server answers with that user
    pub fn assume_session(&self, id: i64) -> Result<ApiUser> {
        let url = format!("{}/api/session/{}", self.base_url, id);

        let mut response = self
            .agent
            .get(&url)
            .header("Authorization", &self.auth_header())
            .header("Accept", "application/json")
            .call()
            .map_err(|e| self.handle_error(e, &id.to_string()))?;

        let user: ApiUser = response.body_mut().read_json()?;
        Ok(user)
    }

    /// The user owning the current session
    pub fn get_session(&self) -> Result<ApiUser> {
        let url = format!("{}/api/session", self.base_url);

        let mut response = self
            .agent
            .get(&url)
            .header("Authorization", &self.auth_header())
            .header("Accept", "application/json")
            .call()
            .map_err(|e| self.handle_error(e, "session"))?;

        let user: ApiUser = response.body_mut().read_json()?;
        Ok(user)
    }
}
