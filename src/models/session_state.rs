//! Session lifecycle model
//!
//! Tracks one terminal session through
//! `Uninitialized -> Spawning -> Running -> Exited`.
//! Exit is terminal: once a reason is recorded, later exit reports are ignored.

use chrono::{DateTime, Utc};

/// Why a session ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExitReason {
    /// The child process terminated on its own
    ChildExited { exit_code: Option<u32> },
    /// The host was closed (window closed, shutdown requested)
    Closed,
    /// The child could not be started
    SpawnFailed { command: String, reason: String },
}

/// Lifecycle state of a session
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SessionState {
    /// Host exists, nothing requested yet
    #[default]
    Uninitialized,
    /// Spawn requested, waiting for acknowledgement
    Spawning,
    /// Child is alive
    Running { pid: Option<u32> },
    /// Session is over
    Exited(ExitReason),
}

impl SessionState {
    pub fn is_running(&self) -> bool {
        matches!(self, SessionState::Running { .. })
    }

    pub fn is_exited(&self) -> bool {
        matches!(self, SessionState::Exited(_))
    }

    /// Process exit code for a session that ended in this state
    pub fn exit_code(&self) -> u8 {
        match self {
            SessionState::Exited(ExitReason::SpawnFailed { .. }) => 1,
            _ => 0,
        }
    }

    /// Short label used in logs and the header notice
    pub fn label(&self) -> &'static str {
        match self {
            SessionState::Uninitialized => "uninitialized",
            SessionState::Spawning => "spawning",
            SessionState::Running { .. } => "running",
            SessionState::Exited(ExitReason::ChildExited { .. }) => "exited",
            SessionState::Exited(ExitReason::Closed) => "closed",
            SessionState::Exited(ExitReason::SpawnFailed { .. }) => "spawn failed",
        }
    }
}

/// State plus the timestamps of its transitions
#[derive(Debug, Clone, Default)]
pub struct SessionLifecycle {
    state: SessionState,

    /// When the spawn was requested
    pub spawn_requested_at: Option<DateTime<Utc>>,

    /// When the child was acknowledged as running
    pub started_at: Option<DateTime<Utc>>,

    /// When the session ended
    pub ended_at: Option<DateTime<Utc>>,
}

impl SessionLifecycle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Uninitialized -> Spawning. Returns false for any other starting state.
    pub fn mark_spawning(&mut self) -> bool {
        if self.state != SessionState::Uninitialized {
            return false;
        }
        self.state = SessionState::Spawning;
        self.spawn_requested_at = Some(Utc::now());
        true
    }

    /// Spawning -> Running. A late acknowledgement after exit is ignored.
    pub fn mark_running(&mut self, pid: Option<u32>) -> bool {
        if self.state != SessionState::Spawning {
            return false;
        }
        self.state = SessionState::Running { pid };
        self.started_at = Some(Utc::now());
        true
    }

    /// Any non-exited state -> Exited. The first reason recorded wins.
    pub fn mark_exited(&mut self, reason: ExitReason) -> bool {
        if self.state.is_exited() {
            return false;
        }
        self.state = SessionState::Exited(reason);
        self.ended_at = Some(Utc::now());
        true
    }

    /// Time the child has been (or was) running
    pub fn uptime(&self) -> Option<std::time::Duration> {
        let start = self.started_at?;
        let end = self.ended_at.unwrap_or_else(Utc::now);
        end.signed_duration_since(start).to_std().ok()
    }
}
