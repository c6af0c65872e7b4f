use std::sync::Arc;
use std::time::{Duration, Instant};

use backend::adapters::users_sea::UserStoreSea;
use backend::auth::password::PasswordHashing;
use backend::config::db::DbKind;
use backend::errors::domain::DomainError;
use backend::infra::db::bootstrap_db;
use backend::services::users::{UserAccounts, UserService};
use backend_test_support::unique_helpers::unique_username;

use crate::support::memory_store::MemoryUserStore;
use crate::support::test_state::cheap_hashing;

async fn accounts() -> UserAccounts {
    let conn = bootstrap_db(DbKind::SqliteMemory)
        .await
        .expect("bootstrap sqlite");
    UserAccounts::new(Arc::new(UserStoreSea::new(conn)), cheap_hashing())
}

#[tokio::test]
async fn stored_hash_is_salted_argon2() {
    let svc = accounts().await;
    let a = svc.register(&unique_username("a"), "same").await.unwrap();
    let b = svc.register(&unique_username("b"), "same").await.unwrap();

    assert!(a.password_hash.starts_with("$argon2id$"));
    assert_ne!(a.password_hash, "same");
    assert_ne!(a.password_hash, b.password_hash);
}

#[tokio::test]
async fn register_then_login() {
    let svc = accounts().await;
    let username = unique_username("alice");
    let created = svc.register(&username, "pw1").await.unwrap();

    let logged_in = svc.login(&username, "pw1").await.unwrap();
    assert_eq!(logged_in.id, created.id);

    assert_eq!(
        svc.login(&username, "pw2").await.unwrap_err(),
        DomainError::InvalidCredentials
    );
}

#[tokio::test]
async fn duplicate_register_leaves_single_row() {
    let svc = accounts().await;
    let username = unique_username("dup");
    svc.register(&username, "pw1").await.unwrap();

    let err = svc.register(&username, "pw2").await.unwrap_err();
    assert!(err.is_duplicate_user());

    let users = svc.list_all().await.unwrap();
    assert_eq!(users.len(), 1);
    // the original password still works
    assert!(svc.login(&username, "pw1").await.is_ok());
}

#[tokio::test]
async fn concurrent_registrations_yield_one_winner() {
    let svc = Arc::new(accounts().await);
    let username = unique_username("race");

    let (a, b) = tokio::join!(svc.register(&username, "pw1"), svc.register(&username, "pw2"));

    let outcomes = [a, b];
    let wins = outcomes.iter().filter(|r| r.is_ok()).count();
    assert_eq!(wins, 1);
    assert!(outcomes
        .iter()
        .filter_map(|r| r.as_ref().err())
        .all(DomainError::is_duplicate_user));
    assert_eq!(svc.list_all().await.unwrap().len(), 1);
}

async fn average_login(svc: &UserAccounts, username: &str, password: &str) -> Duration {
    const RUNS: u32 = 5;
    let started = Instant::now();
    for _ in 0..RUNS {
        assert_eq!(
            svc.login(username, password).await.unwrap_err(),
            DomainError::InvalidCredentials
        );
    }
    started.elapsed() / RUNS
}

#[tokio::test]
async fn unknown_user_login_costs_a_hash_verification() {
    let hashing = PasswordHashing::new(4096, 2, 1).unwrap();
    let svc = UserAccounts::new(Arc::new(MemoryUserStore::new()), hashing);
    svc.register("grace", "right").await.unwrap();

    let wrong_password = average_login(&svc, "grace", "wrong").await;
    let unknown_user = average_login(&svc, "nobody", "wrong").await;

    assert!(
        unknown_user * 4 >= wrong_password,
        "unknown user {unknown_user:?} vs wrong password {wrong_password:?}"
    );
}
