//! Mock PTY backend for testing
//!
//! Records every spawn request and every byte the session writes, lets the
//! test push output, end the child and hold the spawn at a gate.

use std::io::{self, Read, Write};
use std::sync::mpsc::{channel, Receiver, Sender};
use std::sync::{Arc, Mutex};

use easyterm::error::{Error, Result};
use easyterm::pty::{ChildProcess, ProcessKiller, PtyBackend, PtyResizer, SpawnRequest, SpawnedPty};

#[derive(Default)]
struct MockInner {
    requests: Mutex<Vec<SpawnRequest>>,
    written: Mutex<Vec<u8>>,
    resizes: Mutex<Vec<(u16, u16)>>,
    kills: Mutex<usize>,
    output_tx: Mutex<Option<Sender<Vec<u8>>>>,
    exit_tx: Mutex<Option<Sender<Option<u32>>>>,
    gate: Mutex<Option<Receiver<()>>>,
    fail_with: Option<String>,
}

impl MockInner {
    /// Close the output stream and let the child's wait return
    fn finish(&self, code: Option<u32>) {
        if let Some(tx) = self.exit_tx.lock().unwrap().take() {
            let _ = tx.send(code);
        }
        self.output_tx.lock().unwrap().take();
    }
}

/// In-memory [`PtyBackend`]
#[derive(Clone, Default)]
pub struct MockPtyBackend {
    inner: Arc<MockInner>,
}

impl MockPtyBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every spawn fails with `reason`
    pub fn failing(reason: &str) -> Self {
        Self {
            inner: Arc::new(MockInner {
                fail_with: Some(reason.to_string()),
                ..Default::default()
            }),
        }
    }

    /// Spawn blocks until the returned sender fires (or is dropped)
    pub fn gated() -> (Self, Sender<()>) {
        let (tx, rx) = channel();
        let backend = Self::new();
        *backend.inner.gate.lock().unwrap() = Some(rx);
        (backend, tx)
    }

    pub fn spawn_count(&self) -> usize {
        self.inner.requests.lock().unwrap().len()
    }

    pub fn requests(&self) -> Vec<SpawnRequest> {
        self.inner.requests.lock().unwrap().clone()
    }

    /// Everything the session wrote into the child
    pub fn written(&self) -> Vec<u8> {
        self.inner.written.lock().unwrap().clone()
    }

    pub fn written_string(&self) -> String {
        String::from_utf8_lossy(&self.written()).into_owned()
    }

    pub fn resizes(&self) -> Vec<(u16, u16)> {
        self.inner.resizes.lock().unwrap().clone()
    }

    pub fn kill_count(&self) -> usize {
        *self.inner.kills.lock().unwrap()
    }

    /// Make the child print `bytes`
    pub fn push_output(&self, bytes: &[u8]) {
        if let Some(tx) = self.inner.output_tx.lock().unwrap().as_ref() {
            let _ = tx.send(bytes.to_vec());
        }
    }

    /// Make the child exit with `code`
    pub fn exit_child(&self, code: u32) {
        self.inner.finish(Some(code));
    }
}

impl PtyBackend for MockPtyBackend {
    fn spawn(&self, request: &SpawnRequest) -> Result<SpawnedPty> {
        self.inner.requests.lock().unwrap().push(request.clone());

        let gate = self.inner.gate.lock().unwrap().take();
        if let Some(gate) = gate {
            let _ = gate.recv();
        }

        if let Some(reason) = &self.inner.fail_with {
            return Err(Error::SpawnFailed {
                command: request.command.join(" "),
                reason: reason.clone(),
            });
        }

        let (output_tx, output_rx) = channel();
        let (exit_tx, exit_rx) = channel();
        *self.inner.output_tx.lock().unwrap() = Some(output_tx);
        *self.inner.exit_tx.lock().unwrap() = Some(exit_tx);

        Ok(SpawnedPty {
            pid: Some(4242),
            reader: Box::new(MockReader {
                rx: output_rx,
                pending: Vec::new(),
            }),
            writer: Box::new(MockWriter {
                inner: self.inner.clone(),
            }),
            child: Box::new(MockChild {
                exit_rx: Mutex::new(exit_rx),
                inner: self.inner.clone(),
            }),
            resizer: Box::new(MockResizer {
                inner: self.inner.clone(),
            }),
        })
    }
}

struct MockReader {
    rx: Receiver<Vec<u8>>,
    pending: Vec<u8>,
}

impl Read for MockReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if self.pending.is_empty() {
            match self.rx.recv() {
                Ok(bytes) => self.pending = bytes,
                Err(_) => return Ok(0),
            }
        }
        let n = buf.len().min(self.pending.len());
        buf[..n].copy_from_slice(&self.pending[..n]);
        self.pending.drain(..n);
        Ok(n)
    }
}

struct MockWriter {
    inner: Arc<MockInner>,
}

impl Write for MockWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.inner.written.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

struct MockChild {
    exit_rx: Mutex<Receiver<Option<u32>>>,
    inner: Arc<MockInner>,
}

impl ChildProcess for MockChild {
    fn wait(&mut self) -> io::Result<Option<u32>> {
        Ok(self.exit_rx.lock().unwrap().recv().unwrap_or(None))
    }

    fn killer(&self) -> Box<dyn ProcessKiller> {
        Box::new(MockKiller {
            inner: self.inner.clone(),
        })
    }
}

struct MockKiller {
    inner: Arc<MockInner>,
}

impl ProcessKiller for MockKiller {
    fn kill(&mut self) -> io::Result<()> {
        *self.inner.kills.lock().unwrap() += 1;
        self.inner.finish(None);
        Ok(())
    }
}

struct MockResizer {
    inner: Arc<MockInner>,
}

impl PtyResizer for MockResizer {
    fn resize(&self, rows: u16, cols: u16) -> Result<()> {
        self.inner.resizes.lock().unwrap().push((rows, cols));
        Ok(())
    }
}
