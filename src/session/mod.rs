//! Session host
//!
//! Owns exactly one terminal session: the resolved configuration, the
//! terminal surface, the input handle and, once the child is running, the
//! PTY handles. The spawn happens on a background thread; the host learns
//! about it, and about output and exit, by draining its event channel from
//! the UI thread in [`SessionHost::poll`].

pub mod title;

use std::sync::Arc;

use tokio::sync::mpsc::error::TryRecvError;
use tokio::sync::mpsc::UnboundedReceiver;
use uuid::Uuid;

use crate::config::{SessionConfiguration, DEFAULT_TITLE};
use crate::dispatch::{ActionTrigger, CommandDispatcher};
use crate::error::Result;
use crate::models::{ExitReason, SessionLifecycle, SessionState};
use crate::pty::{
    spawn_session, EventSink, InputHandle, PtyBackend, RepaintNotifier, SessionEvent,
    SessionHandles, SpawnRequest,
};
use crate::terminal::TerminalSurface;
pub use title::{TitleLog, TitleSurface};

/// One terminal session and its lifecycle
pub struct SessionHost {
    id: Uuid,
    config: SessionConfiguration,
    lifecycle: SessionLifecycle,
    surface: TerminalSurface,
    dispatcher: CommandDispatcher,
    input: InputHandle,
    triggers: Vec<ActionTrigger>,
    events: UnboundedReceiver<SessionEvent>,
    handles: Option<SessionHandles>,
    spawn_error: Option<String>,
    close_requested: bool,
}

impl std::fmt::Debug for SessionHost {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionHost")
            .field("id", &self.id)
            .field("state", self.lifecycle.state())
            .field("command", &self.config.command)
            .finish_non_exhaustive()
    }
}

impl SessionHost {
    /// Fill in defaults and start spawning the configured command.
    ///
    /// Returns as soon as the spawn thread is started; the session is in
    /// `Spawning` until [`poll`](Self::poll) sees the acknowledgement. Only
    /// configuration problems are returned as errors; spawn failures end in
    /// `Exited(SpawnFailed)`.
    pub fn new(
        config: SessionConfiguration,
        backend: Arc<dyn PtyBackend>,
        notifier: Option<RepaintNotifier>,
    ) -> Result<Self> {
        let config = config.with_defaults()?;
        let id = Uuid::new_v4();
        let (sink, events) = EventSink::channel(notifier);
        let (input, input_rx) = InputHandle::channel();

        let dispatcher = CommandDispatcher::new(input.clone()).with_observer(sink.clone());
        let triggers = config
            .actions
            .iter()
            .cloned()
            .map(|action| ActionTrigger::new(action, dispatcher.clone()))
            .collect();

        let surface = TerminalSurface::default();
        let (rows, cols) = surface.size();
        let request = SpawnRequest::from_config(&config, rows, cols);

        let mut host = Self {
            id,
            config,
            lifecycle: SessionLifecycle::new(),
            surface,
            dispatcher,
            input: input.clone(),
            triggers,
            events,
            handles: None,
            spawn_error: None,
            close_requested: false,
        };

        host.lifecycle.mark_spawning();
        info!(
            "Session {} spawning '{}' in {}",
            host.id,
            host.config.command_line(),
            host.config.working_directory.display()
        );

        if let Err(e) = spawn_session(backend, request, input, input_rx, sink) {
            error!("Session {} could not start its spawn thread: {}", host.id, e);
            host.fail_spawn(e.to_string());
        }

        Ok(host)
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn config(&self) -> &SessionConfiguration {
        &self.config
    }

    pub fn state(&self) -> &SessionState {
        self.lifecycle.state()
    }

    pub fn lifecycle(&self) -> &SessionLifecycle {
        &self.lifecycle
    }

    pub fn surface(&self) -> &TerminalSurface {
        &self.surface
    }

    /// Error text when the child failed to start
    pub fn spawn_error(&self) -> Option<&str> {
        self.spawn_error.as_deref()
    }

    /// One trigger per configured action, in configuration order
    pub fn triggers(&self) -> &[ActionTrigger] {
        &self.triggers
    }

    pub fn dispatcher(&self) -> &CommandDispatcher {
        &self.dispatcher
    }

    /// Forward raw input (keystrokes, paste) to the child
    pub fn send_input(&self, bytes: &[u8]) {
        self.dispatcher.send(bytes);
    }

    /// Paste text, honoring bracketed paste mode
    pub fn paste(&self, text: &str) {
        if !text.is_empty() {
            self.dispatcher.send(&self.surface.paste_payload(text));
        }
    }

    /// Scroll the view into history
    pub fn scroll(&mut self, delta: isize) {
        self.surface.scroll(delta);
    }

    /// Resize the terminal grid and the PTY behind it
    pub fn resize(&mut self, rows: u16, cols: u16) {
        if !self.surface.resize(rows, cols) {
            return;
        }
        let (rows, cols) = self.surface.size();
        debug!("Session {} resized to {}x{}", self.id, cols, rows);
        if let Some(handles) = &self.handles {
            if let Err(e) = handles.resizer.resize(rows, cols) {
                warn!("Session {} PTY resize failed: {}", self.id, e);
            }
        }
    }

    /// Drain pending events, updating state and the title surface.
    ///
    /// Returns true when anything was processed.
    pub fn poll(&mut self, titles: &mut dyn TitleSurface) -> bool {
        let mut processed = false;
        loop {
            match self.events.try_recv() {
                Ok(event) => {
                    processed = true;
                    self.handle_event(event, titles);
                }
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
            }
        }
        processed
    }

    fn handle_event(&mut self, event: SessionEvent, titles: &mut dyn TitleSurface) {
        match event {
            SessionEvent::Spawned(mut handles) => {
                if self.close_requested || self.lifecycle.state().is_exited() {
                    debug!("Session {} closed while spawning, killing child", self.id);
                    if let Err(e) = handles.killer.kill() {
                        debug!("Session {} kill after close failed: {}", self.id, e);
                    }
                    return;
                }

                self.lifecycle.mark_running(handles.pid);
                let (rows, cols) = self.surface.size();
                if let Err(e) = handles.resizer.resize(rows, cols) {
                    warn!("Session {} initial PTY resize failed: {}", self.id, e);
                }
                self.handles = Some(handles);
                info!("Session {} running", self.id);
                self.propagate_title(titles);
            }
            SessionEvent::SpawnFailed(e) => {
                let reason = e.to_string();
                self.fail_spawn(reason.clone());
                titles.set_title(&format!("{} (failed to start)", DEFAULT_TITLE));
                titles.show_notice(&reason);
            }
            SessionEvent::Output(bytes) => {
                if self.surface.feed(&bytes) {
                    self.propagate_title(titles);
                }
            }
            SessionEvent::ChildExited { exit_code } => {
                self.input.close();
                if self
                    .lifecycle
                    .mark_exited(ExitReason::ChildExited { exit_code })
                {
                    info!("Session {} child exited ({:?})", self.id, exit_code);
                    match exit_code {
                        Some(code) => titles.show_notice(&format!("Process exited with code {}", code)),
                        None => titles.show_notice("Process exited"),
                    }
                }
                self.propagate_title(titles);
            }
            SessionEvent::WriteFailed { reason } => {
                titles.show_notice(&format!("Input not delivered: {}", reason));
            }
        }
    }

    fn fail_spawn(&mut self, reason: String) {
        self.input.close();
        self.lifecycle.mark_exited(ExitReason::SpawnFailed {
            command: self.config.command_line(),
            reason: reason.clone(),
        });
        self.spawn_error = Some(reason);
    }

    fn propagate_title(&self, titles: &mut dyn TitleSurface) {
        titles.set_title(self.surface.display_title());
    }

    /// End the session: refuse input and kill the child.
    ///
    /// A child that is still being spawned is killed as soon as it appears.
    pub fn close(&mut self) {
        if self.close_requested {
            return;
        }
        self.close_requested = true;
        self.input.close();

        if let Some(handles) = self.handles.as_mut() {
            if let Err(e) = handles.killer.kill() {
                // usually the child is already gone
                debug!("Session {} kill failed: {}", self.id, e);
            }
        }
        self.reap_pending_spawn();
        if self.lifecycle.mark_exited(ExitReason::Closed) {
            info!("Session {} closed", self.id);
        }
    }

    /// Kill a child whose acknowledgement is queued but not yet polled
    fn reap_pending_spawn(&mut self) {
        while let Ok(event) = self.events.try_recv() {
            if let SessionEvent::Spawned(mut handles) = event {
                if let Err(e) = handles.killer.kill() {
                    debug!("Session {} kill after close failed: {}", self.id, e);
                }
            }
        }
    }
}

impl Drop for SessionHost {
    fn drop(&mut self) {
        self.close();
        // refuse late acknowledgements so the spawn thread kills its own child
        self.events.close();
        self.reap_pending_spawn();
    }
}
