use std::sync::Arc;

use crate::adapters::users_sea::UserStoreSea;
use crate::auth::password::PasswordHashing;
use crate::config::db::DbKind;
use crate::error::AppError;
use crate::infra::db::bootstrap_db;
use crate::repos::users::UserStore;
use crate::services::users::UserAccounts;
use crate::state::app_state::AppState;
use crate::state::security_config::SecurityConfig;

/// Builder for `AppState` (used in both tests and main).
///
/// Either a database kind or a ready-made store must be supplied, and a
/// security config is always required.
#[derive(Default)]
pub struct StateBuilder {
    security_config: Option<SecurityConfig>,
    db_kind: Option<DbKind>,
    store: Option<Arc<dyn UserStore>>,
    hashing: Option<PasswordHashing>,
}

impl StateBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_db(mut self, kind: DbKind) -> Self {
        self.db_kind = Some(kind);
        self
    }

    /// Use this store instead of connecting to a database.
    pub fn with_store(mut self, store: Arc<dyn UserStore>) -> Self {
        self.store = Some(store);
        self
    }

    pub fn with_security(mut self, security_config: SecurityConfig) -> Self {
        self.security_config = Some(security_config);
        self
    }

    pub fn with_password_hashing(mut self, hashing: PasswordHashing) -> Self {
        self.hashing = Some(hashing);
        self
    }

    pub async fn build(self) -> Result<AppState, AppError> {
        let security = self
            .security_config
            .ok_or_else(|| AppError::config("Security configuration is required"))?;

        let store: Arc<dyn UserStore> = match (self.store, self.db_kind) {
            (Some(store), _) => store,
            // single entrypoint: connect + migrate
            (None, Some(kind)) => Arc::new(UserStoreSea::new(bootstrap_db(kind).await?)),
            (None, None) => {
                return Err(AppError::config(
                    "Either a database or a user store must be configured",
                ))
            }
        };

        let accounts = UserAccounts::new(store, self.hashing.unwrap_or_default());
        Ok(AppState::new(Arc::new(accounts), security))
    }
}

pub fn build_state() -> StateBuilder {
    StateBuilder::new()
}
