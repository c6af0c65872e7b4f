//! Repository contracts for the domain layer.

pub mod users;
