use async_trait::async_trait;
use bson::oid::ObjectId;
use thiserror::Error;

use crate::models::user::User;

pub mod memory;
pub mod mongo;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("username `{0}` is already taken")]
    DuplicateUsername(String),
    #[error("user {0} does not exist")]
    MissingUser(ObjectId),
    #[error("user document has no identifier")]
    MissingId,
    #[error(transparent)]
    Mongo(#[from] mongodb::error::Error),
}

/// Persistence for the user aggregate. Every write replaces the whole
/// document, trips and nested items included; the last writer wins.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Inserts a new user, assigning an identifier when none is set.
    async fn insert(&self, user: User) -> Result<User, StoreError>;

    async fn find_by_id(&self, id: &ObjectId) -> Result<Option<User>, StoreError>;

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, StoreError>;

    /// Replaces the stored aggregate with `user`.
    async fn save(&self, user: &User) -> Result<(), StoreError>;

    async fn ping(&self) -> Result<(), StoreError>;
}
