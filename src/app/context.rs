//! Application context
//!
//! Explicit owner of the one session an EasyTerm window shows. Replaces a
//! process-wide application object: whoever creates the window holds the
//! context and passes it in.

use std::sync::Arc;

use crate::config::SessionConfiguration;
use crate::error::Result;
use crate::models::SessionState;
use crate::pty::{PtyBackend, RepaintNotifier};
use crate::session::SessionHost;

/// How the window was started
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LaunchMode {
    /// `easyterm` binary
    Application,
    /// Embedded through [`crate::run_lib`]; the process ends with the window
    Library,
}

/// Configuration, PTY backend and the host created from them
pub struct ApplicationContext {
    config: SessionConfiguration,
    backend: Arc<dyn PtyBackend>,
    mode: LaunchMode,
    host: Option<SessionHost>,
    final_state: Option<SessionState>,
}

impl std::fmt::Debug for ApplicationContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApplicationContext")
            .field("mode", &self.mode)
            .field("host", &self.host)
            .finish_non_exhaustive()
    }
}

impl ApplicationContext {
    pub fn new(config: SessionConfiguration, backend: Arc<dyn PtyBackend>, mode: LaunchMode) -> Self {
        Self {
            config,
            backend,
            mode,
            host: None,
            final_state: None,
        }
    }

    pub fn mode(&self) -> LaunchMode {
        self.mode
    }

    pub fn config(&self) -> &SessionConfiguration {
        &self.config
    }

    /// Create the session host on first activation, reuse it afterwards
    pub fn activate(&mut self, notifier: Option<RepaintNotifier>) -> Result<&mut SessionHost> {
        let host = match self.host.take() {
            Some(host) => {
                debug!("Re-activation, reusing session {}", host.id());
                host
            }
            None => {
                info!("Activating EasyTerm ({:?} mode)", self.mode);
                SessionHost::new(self.config.clone(), self.backend.clone(), notifier)?
            }
        };
        Ok(self.host.insert(host))
    }

    pub fn host(&self) -> Option<&SessionHost> {
        self.host.as_ref()
    }

    pub fn host_mut(&mut self) -> Option<&mut SessionHost> {
        self.host.as_mut()
    }

    /// Close the session and tear the host down. Returns its final state.
    pub fn shutdown(&mut self) -> Option<SessionState> {
        if let Some(mut host) = self.host.take() {
            host.close();
            let state = host.state().clone();
            info!("Session {} finished: {}", host.id(), state.label());
            self.final_state = Some(state);
        }
        self.final_state.clone()
    }
}
