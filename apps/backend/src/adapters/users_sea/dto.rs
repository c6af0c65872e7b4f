//! DTOs for users_sea adapter.

/// DTO for inserting a new user row.
#[derive(Clone)]
pub struct UserCreate {
    pub username: String,
    pub password_hash: String,
}

impl UserCreate {
    pub fn new(username: impl Into<String>, password_hash: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password_hash: password_hash.into(),
        }
    }
}

impl From<crate::repos::users::NewUser> for UserCreate {
    fn from(user: crate::repos::users::NewUser) -> Self {
        Self::new(user.username, user.password_hash)
    }
}
