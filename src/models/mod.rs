//! Core data models for EasyTerm
//!
//! Plain data shared by configuration, dispatch and the session host:
//! the quick-action descriptor and the session lifecycle record.

pub mod action;
pub mod session_state;

// Re-exports for convenience
pub use action::ActionDescriptor;
pub use session_state::{ExitReason, SessionLifecycle, SessionState};
