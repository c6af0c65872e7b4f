//! Test helpers for generating unique test data
//!
//! ULID suffixes keep usernames distinct between tests that share a database.

use ulid::Ulid;

/// Generate a unique string with the given prefix
///
/// # Examples
/// ```
/// use backend_test_support::unique_helpers::unique_str;
///
/// let id1 = unique_str("user");
/// let id2 = unique_str("user");
/// assert_ne!(id1, id2);
/// assert!(id1.starts_with("user-"));
/// ```
pub fn unique_str(prefix: &str) -> String {
    format!("{}-{}", prefix, Ulid::new())
}

/// Generate a unique username that still fits the 64-character limit.
///
/// # Examples
/// ```
/// use backend_test_support::unique_helpers::unique_username;
///
/// let name = unique_username("alice");
/// assert!(name.starts_with("alice_"));
/// assert!(name.len() <= 64);
/// ```
pub fn unique_username(prefix: &str) -> String {
    let suffix = Ulid::new().to_string().to_lowercase();
    let mut name = format!("{prefix}_{suffix}");
    name.truncate(64);
    name
}
