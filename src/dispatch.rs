//! Quick action dispatch
//!
//! A [`CommandDispatcher`] writes literal command lines into one session.
//! An [`ActionTrigger`] binds one [`ActionDescriptor`] to a dispatcher; the
//! header bar owns one trigger per button.
//!
//! Dispatch never fails from the caller's point of view. A write into an
//! exited session is logged and reported as [`SessionEvent::WriteFailed`].

use crate::models::ActionDescriptor;
use crate::pty::{EventSink, InputHandle, SessionEvent};

/// Writes `command + "\n"` into a session
#[derive(Debug, Clone)]
pub struct CommandDispatcher {
    input: InputHandle,
    observer: Option<EventSink>,
}

impl CommandDispatcher {
    pub fn new(input: InputHandle) -> Self {
        Self {
            input,
            observer: None,
        }
    }

    /// Report failed writes to `observer`
    pub fn with_observer(mut self, observer: EventSink) -> Self {
        self.observer = Some(observer);
        self
    }

    /// Send `command` followed by a newline
    pub fn dispatch(&self, command: &str) {
        let mut payload = Vec::with_capacity(command.len() + 1);
        payload.extend_from_slice(command.as_bytes());
        payload.push(b'\n');
        self.send(&payload);
    }

    /// Send raw bytes (keyboard input, paste)
    pub fn send(&self, bytes: &[u8]) {
        if let Err(e) = self.input.write(bytes) {
            warn!("Dropped {} bytes of session input: {}", bytes.len(), e);
            if let Some(observer) = &self.observer {
                observer.emit(SessionEvent::WriteFailed {
                    reason: e.to_string(),
                });
            }
        }
    }
}

/// One header-bar button bound to its session
#[derive(Debug, Clone)]
pub struct ActionTrigger {
    action: ActionDescriptor,
    dispatcher: CommandDispatcher,
}

impl ActionTrigger {
    pub fn new(action: ActionDescriptor, dispatcher: CommandDispatcher) -> Self {
        Self { action, dispatcher }
    }

    pub fn action(&self) -> &ActionDescriptor {
        &self.action
    }

    /// Fire the bound command once
    pub fn activate(&self) {
        debug!("Action '{}' -> {:?}", self.action.label(), self.action.command);
        self.dispatcher.send(&self.action.payload());
    }
}
