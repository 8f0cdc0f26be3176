//! Session registry aggregate.
//!
//! Maps each live connection to its session and keeps the set of online
//! usernames. The set is derived from the sessions and both are only mutated
//! together, so `online == { s.username | s in sessions }` always holds.
//!
//! The registry itself is not synchronized; the owner must serialize access
//! (see `InMemoryChatRepository`).

use std::collections::{HashMap, HashSet};

use super::{
    entity::Session,
    error::LoginError,
    value_object::{ConnectionId, Timestamp, Username},
};

#[derive(Debug, Default)]
pub struct SessionRegistry {
    sessions: HashMap<ConnectionId, Session>,
    online: HashSet<Username>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `username` to `connection_id`.
    ///
    /// # Returns
    ///
    /// * `Ok(usize)` - the online count after the login
    /// * `Err(LoginError::AlreadyOnline)` - another connection holds the username
    /// * `Err(LoginError::AlreadyAuthenticated)` - this connection already has a session
    pub fn login(
        &mut self,
        connection_id: ConnectionId,
        username: Username,
        joined_at: Timestamp,
    ) -> Result<usize, LoginError> {
        if let Some(existing) = self.sessions.get(&connection_id) {
            return Err(LoginError::AlreadyAuthenticated(
                existing.username.as_str().to_string(),
            ));
        }
        if self.online.contains(&username) {
            return Err(LoginError::AlreadyOnline(username.into_string()));
        }

        self.online.insert(username.clone());
        self.sessions
            .insert(connection_id, Session::new(username, joined_at));

        Ok(self.online.len())
    }

    /// Remove the session of `connection_id`. No-op when it never logged in.
    pub fn logout(&mut self, connection_id: ConnectionId) -> Option<Username> {
        let session = self.sessions.remove(&connection_id)?;
        self.online.remove(&session.username);
        Some(session.username)
    }

    pub fn lookup(&self, connection_id: ConnectionId) -> Option<&Session> {
        self.sessions.get(&connection_id)
    }

    pub fn online_count(&self) -> usize {
        self.online.len()
    }

    /// Online usernames sorted for stable output.
    pub fn online_usernames(&self) -> Vec<Username> {
        let mut usernames: Vec<Username> = self.online.iter().cloned().collect();
        usernames.sort();
        usernames
    }
}
