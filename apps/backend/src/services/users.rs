use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info, warn};

use crate::auth::password::PasswordHashing;
use crate::errors::domain::{ConflictKind, DomainError, InfraErrorKind};
use crate::repos::users::{Lookup, NewUser, User, UserStore};

/// Longest accepted username, in characters.
pub const MAX_USERNAME_LEN: usize = 64;

/// Account operations used by the request handlers.
#[async_trait]
pub trait UserService: Send + Sync {
    /// Create an account. Returns the stored record.
    async fn register(&self, username: &str, password: &str) -> Result<User, DomainError>;

    /// Check credentials. Unknown user and wrong password are indistinguishable.
    async fn login(&self, username: &str, password: &str) -> Result<User, DomainError>;

    /// Every account, oldest first.
    async fn list_all(&self) -> Result<Vec<User>, DomainError>;
}

/// `UserService` backed by a `UserStore` and Argon2id hashing.
///
/// Hashing and verification run on the blocking pool.
pub struct UserAccounts {
    store: Arc<dyn UserStore>,
    hashing: PasswordHashing,
    /// Verified against on unknown usernames so both login failures cost one Argon2 run.
    dummy_hash: String,
}

impl UserAccounts {
    pub fn new(store: Arc<dyn UserStore>, hashing: PasswordHashing) -> Self {
        let dummy_hash = hashing.hash("dummy password").unwrap_or_else(|e| {
            warn!(error = %e, "could not prepare dummy password hash");
            String::new()
        });
        Self {
            store,
            hashing,
            dummy_hash,
        }
    }

    async fn hash_password(&self, password: &str) -> Result<String, DomainError> {
        let hashing = self.hashing.clone();
        let password = password.to_owned();
        tokio::task::spawn_blocking(move || hashing.hash(&password))
            .await
            .map_err(hash_task_failed)?
    }

    async fn verify_password(&self, password: &str, stored_hash: &str) -> Result<bool, DomainError> {
        let hashing = self.hashing.clone();
        let password = password.to_owned();
        let stored_hash = stored_hash.to_owned();
        tokio::task::spawn_blocking(move || hashing.verify(&password, &stored_hash))
            .await
            .map_err(hash_task_failed)
    }
}

fn hash_task_failed(e: tokio::task::JoinError) -> DomainError {
    DomainError::infra(
        InfraErrorKind::PasswordHash,
        format!("password hashing task failed: {e}"),
    )
}

fn validate_registration<'a>(username: &'a str, password: &str) -> Result<&'a str, DomainError> {
    let username = username.trim();
    if username.is_empty() {
        return Err(DomainError::validation("Username is required"));
    }
    if username.chars().count() > MAX_USERNAME_LEN {
        return Err(DomainError::validation(format!(
            "Username must be at most {MAX_USERNAME_LEN} characters"
        )));
    }
    if password.is_empty() {
        return Err(DomainError::validation("Password is required"));
    }
    Ok(username)
}

#[async_trait]
impl UserService for UserAccounts {
    async fn register(&self, username: &str, password: &str) -> Result<User, DomainError> {
        let username = validate_registration(username, password)?;

        if let Lookup::Found(existing) = self.store.find_by_username(username).await? {
            debug!(user_id = existing.id, "registration rejected: username taken");
            return Err(DomainError::conflict(
                ConflictKind::UniqueUsername,
                "user already exists",
            ));
        }

        let password_hash = self.hash_password(password).await?;
        let user = self
            .store
            .create(NewUser::new(username, password_hash))
            .await
            .inspect_err(|e| {
                if e.is_duplicate_user() {
                    warn!(username, "registration lost a race on username");
                }
            })?;

        info!(user_id = user.id, username = %user.username, "user registered");
        Ok(user)
    }

    async fn login(&self, username: &str, password: &str) -> Result<User, DomainError> {
        let user = match self.store.find_by_username(username.trim()).await? {
            Lookup::Found(user) => user,
            Lookup::NotFound => {
                self.verify_password(password, &self.dummy_hash).await?;
                debug!("login failed: unknown username");
                return Err(DomainError::InvalidCredentials);
            }
        };

        if !self.verify_password(password, &user.password_hash).await? {
            debug!(user_id = user.id, "login failed: password mismatch");
            return Err(DomainError::InvalidCredentials);
        }

        info!(user_id = user.id, "user logged in");
        Ok(user)
    }

    async fn list_all(&self) -> Result<Vec<User>, DomainError> {
        self.store.list_all().await
    }
}
