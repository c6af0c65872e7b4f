//! Backend test support utilities
//!
//! Unified logging initialization and unique test data helpers shared by the
//! backend's integration test binaries.

pub mod logging;
pub mod unique_helpers;
