//! Test Utilities and Mocks
//!
//! Shared by the integration and contract tests through
//! `#[path = "../test_utils/mod.rs"] mod test_utils;`.

#![allow(dead_code)]

pub mod fixtures;
pub mod mock_pty;

// Re-exports for convenience
pub use fixtures::{hello_action, library_example_config, poll_log_until, poll_until, wait_until};
pub use mock_pty::MockPtyBackend;
