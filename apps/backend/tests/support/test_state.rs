use std::sync::Arc;

use backend::auth::password::PasswordHashing;
use backend::config::db::DbKind;
use backend::infra::state::build_state;
use backend::state::app_state::AppState;
use backend::state::security_config::SecurityConfig;

use super::memory_store::MemoryUserStore;

pub fn test_security() -> SecurityConfig {
    SecurityConfig::new("test_secret_key_for_testing_purposes_only".as_bytes())
}

/// Minimum Argon2 cost so tests stay fast.
pub fn cheap_hashing() -> PasswordHashing {
    PasswordHashing::new(8, 1, 1).expect("valid argon2 params")
}

/// State over a fresh, migrated in-memory SQLite database.
pub async fn sqlite_state() -> AppState {
    build_state()
        .with_db(DbKind::SqliteMemory)
        .with_security(test_security())
        .with_password_hashing(cheap_hashing())
        .build()
        .await
        .expect("build sqlite state")
}

/// State over an in-memory store double; the store handle is returned for inspection.
pub async fn memory_state() -> (AppState, Arc<MemoryUserStore>) {
    let store = Arc::new(MemoryUserStore::new());
    let state = build_state()
        .with_store(store.clone())
        .with_security(test_security())
        .with_password_hashing(cheap_hashing())
        .build()
        .await
        .expect("build memory state");
    (state, store)
}
