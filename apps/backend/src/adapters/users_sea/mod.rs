//! SeaORM adapter for the user store.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, NotSet,
    QueryFilter, QueryOrder, Set,
};
use tracing::debug;

use crate::entities::users;
use crate::errors::domain::DomainError;
use crate::infra::db_errors::map_db_err;
use crate::repos::users::{Lookup, NewUser, User, UserStore};

pub mod dto;

pub use dto::UserCreate;

// Adapter functions return DbErr; UserStoreSea maps to DomainError via map_db_err.

pub async fn create_user<C: ConnectionTrait>(
    conn: &C,
    dto: UserCreate,
) -> Result<users::Model, sea_orm::DbErr> {
    let user_active = users::ActiveModel {
        id: NotSet,
        username: Set(dto.username),
        password_hash: Set(dto.password_hash),
        created_at: Set(time::OffsetDateTime::now_utc()),
    };

    user_active.insert(conn).await
}

pub async fn find_user_by_username<C: ConnectionTrait>(
    conn: &C,
    username: &str,
) -> Result<Option<users::Model>, sea_orm::DbErr> {
    users::Entity::find()
        .filter(users::Column::Username.eq(username))
        .one(conn)
        .await
}

pub async fn list_users<C: ConnectionTrait>(conn: &C) -> Result<Vec<users::Model>, sea_orm::DbErr> {
    users::Entity::find()
        .order_by_asc(users::Column::CreatedAt)
        .order_by_asc(users::Column::Id)
        .all(conn)
        .await
}

/// SeaORM-backed [`UserStore`]. Owns a handle to the pool it was built with.
#[derive(Debug, Clone)]
pub struct UserStoreSea {
    conn: DatabaseConnection,
}

impl UserStoreSea {
    pub fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }
}

#[async_trait]
impl UserStore for UserStoreSea {
    async fn create(&self, user: NewUser) -> Result<User, DomainError> {
        let model = create_user(&self.conn, UserCreate::from(user))
            .await
            .map_err(map_db_err)?;
        debug!(user_id = model.id, "user row inserted");
        Ok(User::from(model))
    }

    async fn find_by_username(&self, username: &str) -> Result<Lookup<User>, DomainError> {
        let model = find_user_by_username(&self.conn, username)
            .await
            .map_err(map_db_err)?;
        Ok(Lookup::from(model.map(User::from)))
    }

    async fn list_all(&self) -> Result<Vec<User>, DomainError> {
        let models = list_users(&self.conn).await.map_err(map_db_err)?;
        Ok(models.into_iter().map(User::from).collect())
    }
}
