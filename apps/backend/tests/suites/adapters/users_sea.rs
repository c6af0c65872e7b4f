use backend::adapters::users_sea::UserStoreSea;
use backend::config::db::DbKind;
use backend::errors::domain::{ConflictKind, DomainError, InfraErrorKind};
use backend::infra::db::{bootstrap_db, connect_db};
use backend::repos::users::{Lookup, NewUser, UserStore};

async fn store() -> UserStoreSea {
    let conn = bootstrap_db(DbKind::SqliteMemory)
        .await
        .expect("bootstrap sqlite");
    UserStoreSea::new(conn)
}

#[tokio::test]
async fn create_then_find_roundtrip() {
    let store = store().await;

    let created = store
        .create(NewUser::new("alice", "$argon2id$hash"))
        .await
        .unwrap();
    assert!(created.id > 0);
    assert_eq!(created.username, "alice");

    match store.find_by_username("alice").await.unwrap() {
        Lookup::Found(found) => {
            assert_eq!(found.id, created.id);
            assert_eq!(found.password_hash, "$argon2id$hash");
        }
        Lookup::NotFound => panic!("alice should be found"),
    }
}

#[tokio::test]
async fn missing_username_is_not_found_not_error() {
    let store = store().await;
    let lookup = store.find_by_username("ghost").await.unwrap();
    assert_eq!(lookup, Lookup::NotFound);
}

#[tokio::test]
async fn unique_index_maps_to_duplicate_conflict() {
    let store = store().await;
    store.create(NewUser::new("alice", "h1")).await.unwrap();

    let err = store.create(NewUser::new("alice", "h2")).await.unwrap_err();
    assert!(matches!(
        err,
        DomainError::Conflict(ConflictKind::UniqueUsername, _)
    ));
    assert_eq!(store.list_all().await.unwrap().len(), 1);
}

#[tokio::test]
async fn list_all_is_in_creation_order() {
    let store = store().await;
    for name in ["carol", "alice", "bob"] {
        store.create(NewUser::new(name, "h")).await.unwrap();
    }

    let names: Vec<String> = store
        .list_all()
        .await
        .unwrap()
        .into_iter()
        .map(|u| u.username)
        .collect();
    assert_eq!(names, ["carol", "alice", "bob"]);
}

#[tokio::test]
async fn missing_table_surfaces_infra_error() {
    // Connected but never migrated
    let conn = connect_db(DbKind::SqliteMemory).await.unwrap();
    let store = UserStoreSea::new(conn);

    let err = store.list_all().await.unwrap_err();
    assert!(matches!(err, DomainError::Infra(InfraErrorKind::Other(_), _)));
}
