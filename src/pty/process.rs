//! PTY Process Spawning
//!
//! The session host talks to a [`PtyBackend`] rather than to `portable-pty`
//! directly, so the lifecycle can be driven by an in-memory backend in tests.
//! [`NativePtyBackend`] is the real implementation.

use std::ffi::OsString;
use std::io::{Read, Write};
use std::path::PathBuf;
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use portable_pty::{native_pty_system, ChildKiller, CommandBuilder, MasterPty, PtySize};

use super::events::{EventSink, SessionEvent, SessionHandles};
use super::streams::{start_io_threads, InputHandle, InputReceiver};
use crate::config::SessionConfiguration;
use crate::error::{Error, Result};

/// Initial terminal size before the UI reports the real one
pub const DEFAULT_ROWS: u16 = 24;
pub const DEFAULT_COLS: u16 = 80;

/// Value of `TERM` in the child environment
pub const TERM: &str = "xterm-256color";

/// Everything needed to start one child
#[derive(Debug, Clone, PartialEq)]
pub struct SpawnRequest {
    /// Program followed by its arguments; never empty
    pub command: Vec<String>,
    /// `KEY=VALUE` overrides on top of the inherited environment
    pub environment: Vec<String>,
    pub working_directory: PathBuf,
    pub rows: u16,
    pub cols: u16,
}

impl SpawnRequest {
    pub fn from_config(config: &SessionConfiguration, rows: u16, cols: u16) -> Self {
        Self {
            command: config.command.clone(),
            environment: config.environment.clone(),
            working_directory: config.working_directory.clone(),
            rows,
            cols,
        }
    }

    /// Program name for logs and errors
    pub fn program(&self) -> &str {
        self.command.first().map(String::as_str).unwrap_or_default()
    }

    /// Environment split at the first `=`; entries without one are skipped
    pub fn env_pairs(&self) -> Vec<(String, String)> {
        self.environment
            .iter()
            .filter_map(|entry| match entry.split_once('=') {
                Some((key, value)) if !key.is_empty() => {
                    Some((key.to_string(), value.to_string()))
                }
                _ => {
                    warn!("Skipping malformed environment entry '{}'", entry);
                    None
                }
            })
            .collect()
    }
}

/// A running child as seen by the spawn plumbing
pub trait ChildProcess: Send {
    /// Block until the child exits; returns its exit code when known
    fn wait(&mut self) -> std::io::Result<Option<u32>>;

    /// Handle that can terminate the child from another thread
    fn killer(&self) -> Box<dyn ProcessKiller>;
}

/// Terminates a child
pub trait ProcessKiller: Send {
    fn kill(&mut self) -> std::io::Result<()>;
}

/// Resizes a PTY
pub trait PtyResizer: Send {
    fn resize(&self, rows: u16, cols: u16) -> Result<()>;
}

/// Output of a successful spawn
pub struct SpawnedPty {
    pub pid: Option<u32>,
    pub reader: Box<dyn Read + Send>,
    pub writer: Box<dyn Write + Send>,
    pub child: Box<dyn ChildProcess>,
    pub resizer: Box<dyn PtyResizer>,
}

/// Creates PTY sessions
pub trait PtyBackend: Send + Sync {
    fn spawn(&self, request: &SpawnRequest) -> Result<SpawnedPty>;
}

/// `portable-pty` backed implementation
#[derive(Debug, Default, Clone, Copy)]
pub struct NativePtyBackend;

impl NativePtyBackend {
    pub fn new() -> Self {
        Self
    }
}

impl PtyBackend for NativePtyBackend {
    fn spawn(&self, request: &SpawnRequest) -> Result<SpawnedPty> {
        let command_line = request.command.join(" ");
        if request.command.is_empty() {
            return Err(Error::SpawnFailed {
                command: command_line,
                reason: "empty command".to_string(),
            });
        }

        let pty_system = native_pty_system();
        let pair = pty_system
            .openpty(PtySize {
                rows: request.rows,
                cols: request.cols,
                pixel_width: 0,
                pixel_height: 0,
            })
            .map_err(|e| Error::PtyCreationFailed {
                command: command_line.clone(),
                reason: e.to_string(),
            })?;

        let mut cmd_builder =
            CommandBuilder::from_argv(request.command.iter().map(OsString::from).collect());
        cmd_builder.cwd(&request.working_directory);
        cmd_builder.env("TERM", TERM);
        for (key, value) in request.env_pairs() {
            cmd_builder.env(key, value);
        }

        let child = pair
            .slave
            .spawn_command(cmd_builder)
            .map_err(|e| Error::SpawnFailed {
                command: command_line.clone(),
                reason: e.to_string(),
            })?;
        // the reader only sees EOF once every slave handle is closed
        drop(pair.slave);

        let pid = child.process_id();
        let reader = pair
            .master
            .try_clone_reader()
            .map_err(|e| Error::PtyReaderCloneFailed {
                reason: e.to_string(),
            })?;
        let writer = pair
            .master
            .take_writer()
            .map_err(|e| Error::PtyWriterTakeFailed {
                reason: e.to_string(),
            })?;

        debug!("Spawned '{}' with pid {:?}", command_line, pid);

        Ok(SpawnedPty {
            pid,
            reader,
            writer,
            child: Box::new(NativeChild(child)),
            resizer: Box::new(NativeResizer(pair.master)),
        })
    }
}

struct NativeChild(Box<dyn portable_pty::Child + Send + Sync>);

impl ChildProcess for NativeChild {
    fn wait(&mut self) -> std::io::Result<Option<u32>> {
        self.0.wait().map(|status| Some(status.exit_code()))
    }

    fn killer(&self) -> Box<dyn ProcessKiller> {
        Box::new(NativeKiller(self.0.clone_killer()))
    }
}

struct NativeKiller(Box<dyn ChildKiller + Send + Sync>);

impl ProcessKiller for NativeKiller {
    fn kill(&mut self) -> std::io::Result<()> {
        self.0.kill()
    }
}

struct NativeResizer(Box<dyn MasterPty + Send>);

impl PtyResizer for NativeResizer {
    fn resize(&self, rows: u16, cols: u16) -> Result<()> {
        self.0
            .resize(PtySize {
                rows,
                cols,
                pixel_width: 0,
                pixel_height: 0,
            })
            .map_err(|e| Error::Io(std::io::Error::other(e.to_string())))
    }
}

/// Spawn the session child on a background thread.
///
/// On success `Spawned` is emitted before the reader, writer and waiter
/// threads start, so the host always sees the acknowledgement before any
/// output or exit. On failure the input handle is closed and `SpawnFailed`
/// is emitted.
pub fn spawn_session(
    backend: Arc<dyn PtyBackend>,
    request: SpawnRequest,
    input: InputHandle,
    input_rx: InputReceiver,
    sink: EventSink,
) -> Result<JoinHandle<()>> {
    let handle = thread::Builder::new()
        .name("easyterm-spawn".to_string())
        .spawn(move || match backend.spawn(&request) {
            Ok(spawned) => {
                let SpawnedPty {
                    pid,
                    reader,
                    writer,
                    child,
                    resizer,
                } = spawned;
                let killer = child.killer();
                info!("Session child '{}' running (pid {:?})", request.program(), pid);

                let spawned = SessionEvent::Spawned(SessionHandles {
                    pid,
                    killer,
                    resizer,
                });
                if let Err(SessionEvent::Spawned(mut orphan)) = sink.try_emit(spawned) {
                    debug!("Session host gone before spawn completed, killing child");
                    if let Err(e) = orphan.killer.kill() {
                        debug!("Kill of orphaned child failed: {}", e);
                    }
                }
                start_io_threads(reader, writer, child, input, input_rx, sink);
            }
            Err(e) => {
                error!("Failed to spawn '{}': {}", request.command.join(" "), e);
                input.close();
                sink.emit(SessionEvent::SpawnFailed(e));
            }
        })?;
    Ok(handle)
}
