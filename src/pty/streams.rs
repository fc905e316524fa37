//! PTY Streams
//!
//! Bridges the blocking PTY reader/writer to the UI thread. Input goes
//! through a std channel into a writer thread; output and exit come back as
//! [`SessionEvent`]s.

use std::io::{ErrorKind, Read, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{channel, Receiver, Sender};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use super::events::{EventSink, SessionEvent};
use super::process::ChildProcess;
use crate::error::{Error, Result};

/// Receiving half of the session input channel, consumed by the writer thread
pub type InputReceiver = Receiver<Vec<u8>>;

const READ_BUFFER_SIZE: usize = 4096;
const MAX_CONSECUTIVE_READ_ERRORS: u32 = 5;

/// Cloneable write handle into one session.
///
/// Created before the child exists, so writes issued while the session is
/// still spawning queue up and are delivered once the writer thread starts.
/// Closed when the spawn fails or the child exits.
#[derive(Debug, Clone)]
pub struct InputHandle {
    tx: Sender<Vec<u8>>,
    open: Arc<AtomicBool>,
}

impl InputHandle {
    pub fn channel() -> (Self, InputReceiver) {
        let (tx, rx) = channel();
        (
            Self {
                tx,
                open: Arc::new(AtomicBool::new(true)),
            },
            rx,
        )
    }

    /// Queue bytes for the child
    pub fn write(&self, data: &[u8]) -> Result<()> {
        if !self.is_open() {
            return Err(Error::WriteFailed {
                reason: "session has exited".to_string(),
            });
        }
        self.tx.send(data.to_vec()).map_err(|_| Error::WriteFailed {
            reason: "session input stream is closed".to_string(),
        })
    }

    /// Refuse further writes
    pub fn close(&self) {
        self.open.store(false, Ordering::SeqCst);
    }

    pub fn is_open(&self) -> bool {
        self.open.load(Ordering::SeqCst)
    }
}

/// Start the reader, writer and waiter threads for a spawned child
pub fn start_io_threads(
    reader: Box<dyn Read + Send>,
    writer: Box<dyn Write + Send>,
    child: Box<dyn ChildProcess>,
    input: InputHandle,
    input_rx: InputReceiver,
    sink: EventSink,
) {
    spawn_named("easyterm-pty-reader", {
        let sink = sink.clone();
        move || read_loop(reader, sink)
    });
    spawn_named("easyterm-pty-writer", {
        let sink = sink.clone();
        move || write_loop(writer, input_rx, sink)
    });
    spawn_named("easyterm-child-wait", move || wait_loop(child, input, sink));
}

fn spawn_named<F>(name: &str, body: F)
where
    F: FnOnce() + Send + 'static,
{
    if let Err(e) = thread::Builder::new().name(name.to_string()).spawn(body) {
        error!("Failed to start {} thread: {}", name, e);
    }
}

fn read_loop(mut reader: Box<dyn Read + Send>, sink: EventSink) {
    let mut buf = [0u8; READ_BUFFER_SIZE];
    let mut consecutive_errors = 0;

    loop {
        match reader.read(&mut buf) {
            Ok(0) => {
                debug!("PTY read EOF");
                break;
            }
            Ok(n) => {
                consecutive_errors = 0;
                trace!("PTY read {} bytes", n);
                if !sink.emit(SessionEvent::Output(buf[..n].to_vec())) {
                    debug!("PTY read: host dropped, stopping reader thread");
                    break;
                }
            }
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) if e.kind() == ErrorKind::WouldBlock => {
                thread::sleep(Duration::from_millis(10));
            }
            Err(e) => {
                consecutive_errors += 1;
                // EIO is how Linux reports a closed slave side
                debug!(
                    "PTY read error ({}): {} (attempt {}/{})",
                    e.kind(),
                    e,
                    consecutive_errors,
                    MAX_CONSECUTIVE_READ_ERRORS
                );
                if consecutive_errors >= MAX_CONSECUTIVE_READ_ERRORS {
                    break;
                }
                thread::sleep(Duration::from_millis(50));
            }
        }
    }
    debug!("PTY reader thread exiting");
}

fn write_loop(mut writer: Box<dyn Write + Send>, input_rx: InputReceiver, sink: EventSink) {
    while let Ok(data) = input_rx.recv() {
        let result = writer.write_all(&data).and_then(|_| writer.flush());
        if let Err(e) = result {
            warn!("PTY write error ({}): {}", e.kind(), e);
            sink.emit(SessionEvent::WriteFailed {
                reason: e.to_string(),
            });
            if e.kind() == ErrorKind::BrokenPipe {
                break;
            }
        }
    }
    debug!("PTY writer thread exiting");
}

fn wait_loop(mut child: Box<dyn ChildProcess>, input: InputHandle, sink: EventSink) {
    let exit_code = match child.wait() {
        Ok(code) => code,
        Err(e) => {
            warn!("Failed to wait for session child: {}", e);
            None
        }
    };
    input.close();
    info!("Session child exited with code {:?}", exit_code);
    sink.emit(SessionEvent::ChildExited { exit_code });
}
