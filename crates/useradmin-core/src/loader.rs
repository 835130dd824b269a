//! Fetches the user collection and tracks whether a fetch is outstanding.
//!
//! A fetch is split into [`CollectionLoader::begin`] and
//! [`CollectionLoader::settle`] so a driver that multiplexes other events can
//! keep several fetches in flight. Only the reply to the most recently issued
//! ticket is applied; older replies are dropped.

use serde::Serialize;
use std::fmt;
use tracing::{debug, warn};

use crate::error::Result;
use crate::models::User;

/// Token whose change means the collection must be fetched again
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Revision(u64);

impl Revision {
    pub fn initial() -> Self {
        Self(1)
    }

    pub fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Display for Revision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "r{}", self.0)
    }
}

/// Receipt for an issued fetch; hand it back to `settle` with the reply
#[derive(Debug, PartialEq, Eq)]
#[must_use = "an issued fetch must be settled or the loader stays in the loading state"]
pub struct LoadTicket {
    generation: u64,
    revision: Revision,
}

impl LoadTicket {
    pub fn revision(&self) -> Revision {
        self.revision
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The reply replaced the collection
    Applied { count: usize },
    /// A newer fetch was issued after this one; the reply was dropped
    Superseded,
}

#[derive(Debug)]
pub struct CollectionLoader {
    users: Vec<User>,
    loading: bool,
    revision: Revision,
    issued: u64,
}

impl Default for CollectionLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl CollectionLoader {
    pub fn new() -> Self {
        Self {
            users: Vec::new(),
            loading: false,
            revision: Revision::initial(),
            issued: 0,
        }
    }

    pub fn users(&self) -> &[User] {
        &self.users
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn revision(&self) -> Revision {
        self.revision
    }

    /// Replace the revision after a mutation
    pub fn bump_revision(&mut self) -> Revision {
        self.revision = self.revision.next();
        debug!(revision = %self.revision, "revision bumped");
        self.revision
    }

    pub fn begin(&mut self) -> LoadTicket {
        self.issued += 1;
        self.loading = true;
        debug!(generation = self.issued, revision = %self.revision, "fetching users");
        LoadTicket {
            generation: self.issued,
            revision: self.revision,
        }
    }

    /// Apply the reply for `ticket`.
    ///
    /// On failure the previous collection is kept. Either way the loading flag
    /// drops once the latest ticket has settled.
    pub fn settle(&mut self, ticket: LoadTicket, reply: Result<Vec<User>>) -> Result<LoadOutcome> {
        if ticket.generation != self.issued {
            debug!(
                generation = ticket.generation,
                latest = self.issued,
                "dropping reply to superseded fetch"
            );
            return Ok(LoadOutcome::Superseded);
        }

        self.loading = false;
        match reply {
            Ok(users) => {
                let count = users.len();
                self.users = users;
                debug!(count, "users loaded");
                Ok(LoadOutcome::Applied { count })
            }
            Err(err) => {
                warn!(error = %err, "failed to load users, keeping previous snapshot");
                Err(err)
            }
        }
    }
}
