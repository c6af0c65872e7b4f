//! Credential store contract and the user domain model.

use std::fmt;

use async_trait::async_trait;
use time::OffsetDateTime;

use crate::errors::domain::DomainError;

/// User domain model
#[derive(Clone, PartialEq)]
pub struct User {
    pub id: i64,
    pub username: String,
    /// Argon2 PHC string; never plaintext.
    pub password_hash: String,
    pub created_at: OffsetDateTime,
}

impl fmt::Debug for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("User")
            .field("id", &self.id)
            .field("username", &self.username)
            .field("password_hash", &"<redacted>")
            .field("created_at", &self.created_at)
            .finish()
    }
}

/// Input for [`UserStore::create`]; the hash is computed by the caller.
#[derive(Clone)]
pub struct NewUser {
    pub username: String,
    pub password_hash: String,
}

impl NewUser {
    pub fn new(username: impl Into<String>, password_hash: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password_hash: password_hash.into(),
        }
    }
}

/// Outcome of a lookup that completed without a storage failure.
#[derive(Debug, Clone, PartialEq)]
pub enum Lookup<T> {
    Found(T),
    NotFound,
}

impl<T> From<Option<T>> for Lookup<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(v) => Lookup::Found(v),
            None => Lookup::NotFound,
        }
    }
}

/// Durable storage for user records.
///
/// Errors:
/// - `create` on a taken username → `DomainError::Conflict(ConflictKind::UniqueUsername, _)`
/// - any other persistence failure → `DomainError::Infra(_, _)`
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn create(&self, user: NewUser) -> Result<User, DomainError>;

    async fn find_by_username(&self, username: &str) -> Result<Lookup<User>, DomainError>;

    /// Every record, oldest first.
    async fn list_all(&self) -> Result<Vec<User>, DomainError>;
}

impl From<crate::entities::users::Model> for User {
    fn from(model: crate::entities::users::Model) -> Self {
        Self {
            id: model.id,
            username: model.username,
            password_hash: model.password_hash,
            created_at: model.created_at,
        }
    }
}
