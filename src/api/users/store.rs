// In-memory user store shared by the users, profile and session modules

use std::sync::Arc;

use dashmap::{mapref::entry::Entry, DashMap};
use serde::Serialize;
use uuid::Uuid;

use crate::utils::errors::ApiError;

#[derive(Debug, Clone, Serialize)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub created_at: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
}

#[derive(Debug, Clone, Default)]
pub struct UserStore {
    users: Arc<DashMap<String, User>>,
}

impl UserStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fails with a conflict when the username is taken
    pub fn insert(&self, user: User) -> Result<User, ApiError> {
        match self.users.entry(user.username.clone()) {
            Entry::Occupied(_) => Err(ApiError::Conflict(format!(
                "Username '{}' is already taken",
                user.username
            ))),
            Entry::Vacant(slot) => Ok(slot.insert(user).value().clone()),
        }
    }

    pub fn get(&self, username: &str) -> Option<User> {
        self.users.get(username).map(|user| user.value().clone())
    }

    /// Users ordered by username
    pub fn list(&self, limit: usize) -> Vec<User> {
        let mut users: Vec<User> = self.users.iter().map(|entry| entry.value().clone()).collect();
        users.sort_by(|a, b| a.username.cmp(&b.username));
        users.truncate(limit);
        users
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}
