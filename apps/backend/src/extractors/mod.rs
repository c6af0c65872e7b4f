pub mod current_user;
pub mod session;

pub use current_user::CurrentUser;
pub use session::Session;
