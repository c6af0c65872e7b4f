use std::sync::Arc;

use super::security_config::SecurityConfig;
use crate::services::users::UserService;

/// Shared, read-only state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    /// Account operations (register, login, listing)
    pub users: Arc<dyn UserService>,
    /// Token signing settings
    pub security: SecurityConfig,
}

impl AppState {
    pub fn new(users: Arc<dyn UserService>, security: SecurityConfig) -> Self {
        Self { users, security }
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("security", &self.security)
            .finish_non_exhaustive()
    }
}
