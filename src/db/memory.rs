use std::collections::HashMap;

use async_trait::async_trait;
use bson::oid::ObjectId;
use parking_lot::RwLock;

use super::{StoreError, UserStore};
use crate::models::user::User;

/// Keeps user aggregates in process memory. Used by the test suite and for
/// running the API locally without a database.
#[derive(Default)]
pub struct MemoryUserStore {
    users: RwLock<HashMap<ObjectId, User>>,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.users.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.read().is_empty()
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn insert(&self, mut user: User) -> Result<User, StoreError> {
        let mut users = self.users.write();

        if users.values().any(|existing| existing.username == user.username) {
            return Err(StoreError::DuplicateUsername(user.username));
        }

        let id = *user.id.get_or_insert_with(ObjectId::new);
        users.insert(id, user.clone());
        Ok(user)
    }

    async fn find_by_id(&self, id: &ObjectId) -> Result<Option<User>, StoreError> {
        Ok(self.users.read().get(id).cloned())
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, StoreError> {
        Ok(self
            .users
            .read()
            .values()
            .find(|user| user.username == username)
            .cloned())
    }

    async fn save(&self, user: &User) -> Result<(), StoreError> {
        let id = user.id.ok_or(StoreError::MissingId)?;
        let mut users = self.users.write();

        match users.get_mut(&id) {
            Some(stored) => {
                *stored = user.clone();
                Ok(())
            }
            None => Err(StoreError::MissingUser(id)),
        }
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
