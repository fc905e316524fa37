//! Pseudoterminal (PTY) Management
//!
//! Spawning the session child, the I/O threads around it and the event
//! channel that reports back to the UI thread.

pub mod events;
pub mod process;
pub mod streams;

// Re-exports for convenience
pub use events::{EventSink, RepaintNotifier, SessionEvent, SessionHandles};
pub use process::{
    spawn_session, ChildProcess, NativePtyBackend, ProcessKiller, PtyBackend, PtyResizer,
    SpawnRequest, SpawnedPty, DEFAULT_COLS, DEFAULT_ROWS,
};
pub use streams::{InputHandle, InputReceiver};
