//! Session event channel
//!
//! Background threads report to the UI thread through one unbounded tokio
//! channel. Every send also pokes the repaint notifier so an idle window
//! wakes up and drains the channel.

use std::fmt;
use std::sync::Arc;

use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};

use super::process::{ProcessKiller, PtyResizer};
use crate::error::Error;

/// Callback that asks the UI to run another frame
pub type RepaintNotifier = Arc<dyn Fn() + Send + Sync>;

/// Handles that outlive the spawn thread and belong to the session host
pub struct SessionHandles {
    /// OS process id of the child, when the platform reports one
    pub pid: Option<u32>,
    /// Terminates the child
    pub killer: Box<dyn ProcessKiller>,
    /// Resizes the PTY
    pub resizer: Box<dyn PtyResizer>,
}

impl fmt::Debug for SessionHandles {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionHandles")
            .field("pid", &self.pid)
            .finish_non_exhaustive()
    }
}

/// Events delivered to the session host
#[derive(Debug)]
pub enum SessionEvent {
    /// The child is running
    Spawned(SessionHandles),
    /// The child could not be started
    SpawnFailed(Error),
    /// Raw bytes read from the PTY
    Output(Vec<u8>),
    /// The child terminated
    ChildExited {
        /// Exit code, if the platform reported one
        exit_code: Option<u32>,
    },
    /// Writing into the session failed; the session keeps going
    WriteFailed {
        /// Human readable cause
        reason: String,
    },
}

/// Sending half of the session channel, paired with the repaint notifier
#[derive(Clone)]
pub struct EventSink {
    tx: UnboundedSender<SessionEvent>,
    notifier: Option<RepaintNotifier>,
}

impl fmt::Debug for EventSink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventSink")
            .field("closed", &self.tx.is_closed())
            .field("notifier", &self.notifier.is_some())
            .finish()
    }
}

impl EventSink {
    /// Create a sink and the receiver the host drains
    pub fn channel(notifier: Option<RepaintNotifier>) -> (Self, UnboundedReceiver<SessionEvent>) {
        let (tx, rx) = unbounded_channel();
        (Self { tx, notifier }, rx)
    }

    /// Publish an event. Returns false once the host has gone away.
    pub fn emit(&self, event: SessionEvent) -> bool {
        self.try_emit(event).is_ok()
    }

    /// Publish an event, handing it back if the host has gone away
    pub fn try_emit(&self, event: SessionEvent) -> std::result::Result<(), SessionEvent> {
        self.tx.send(event).map_err(|e| e.0)?;
        if let Some(notify) = &self.notifier {
            notify();
        }
        Ok(())
    }

    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}
