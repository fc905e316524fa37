//! EasyTerm - a minimal embeddable terminal window
//!
//! One terminal session under a header bar of quick-action buttons. Each
//! button writes a canned command line into the session.
//!
//! ## Module Organization
//!
//! - [`config`] - Raw options, resolution into a [`SessionConfiguration`], palette, config file, CLI
//! - [`models`] - Action descriptors and the session lifecycle
//! - [`pty`] - PTY backend, spawn thread, I/O threads, session events
//! - [`dispatch`] - Command dispatcher and action triggers
//! - [`terminal`] - `vt100` surface, keyboard encoding, screen layout
//! - [`session`] - Session host and title propagation
//! - [`app`] - The `eframe` window and [`ApplicationContext`]
//! - [`mod@error`] - Error types and Result aliases
//!
//! ## Library use
//!
//! ```no_run
//! use easyterm::{ActionDescriptor, SessionConfiguration};
//!
//! let config = SessionConfiguration::new()
//!     .with_working_directory("/")
//!     .with_command(["/bin/bash"])
//!     .with_action(ActionDescriptor::new(
//!         "Hello",
//!         "emblem-favorite",
//!         "Say hello to the world",
//!         "echo Hello World",
//!     ));
//!
//! // Blocks until the window is closed, then exits the process.
//! easyterm::run_lib(config);
//! ```
//!
//! ## Architecture
//!
//! - **UI thread:** the `eframe` loop; owns the session host and the `vt100` parser
//! - **Spawn thread:** starts the child so the window never waits on it
//! - **Reader / writer / waiter threads:** blocking PTY I/O and exit detection
//!
//! Background threads report through one `tokio::mpsc` channel and request a
//! repaint; the UI drains the channel at the start of every frame.

#[macro_use]
extern crate tracing;

pub mod app;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod models;
pub mod pty;
pub mod session;
pub mod terminal;

use std::sync::{Arc, Mutex};

use eframe::egui;
use tracing_subscriber::EnvFilter;

// Re-exports for the library entry points
pub use app::{ApplicationContext, EasyTermApp, LaunchMode};
pub use config::{resolve, Palette, RawActions, RawSessionOptions, SessionConfiguration};
pub use dispatch::{ActionTrigger, CommandDispatcher};
pub use error::{Error, Result};
pub use models::{ActionDescriptor, ExitReason, SessionState};
pub use pty::{NativePtyBackend, PtyBackend};
pub use session::{SessionHost, TitleSurface};

/// Application name, also the default window title
pub const APP_NAME: &str = config::DEFAULT_TITLE;

/// Initial window size in logical pixels
pub const DEFAULT_WINDOW_SIZE: [f32; 2] = [800.0, 450.0];

/// Install the fmt subscriber.
///
/// `RUST_LOG` wins; otherwise `debug` when `verbose` or `EASYTERM_DEBUG` is
/// set, else `info`. Safe to call more than once.
pub fn init_logging(verbose: bool) {
    let debug = verbose
        || std::env::var("EASYTERM_DEBUG").is_ok_and(|v| v == "1" || v.eq_ignore_ascii_case("true"));
    let default_level = if debug { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .try_init();
}

/// Open the window with the native PTY backend and block until it closes.
///
/// Returns the final state of the session.
pub fn run(config: SessionConfiguration, mode: LaunchMode) -> Result<SessionState> {
    run_with_backend(config, mode, Arc::new(NativePtyBackend::new()))
}

/// [`run`] with a caller-supplied PTY backend
pub fn run_with_backend(
    config: SessionConfiguration,
    mode: LaunchMode,
    backend: Arc<dyn PtyBackend>,
) -> Result<SessionState> {
    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(APP_NAME)
            .with_inner_size(DEFAULT_WINDOW_SIZE)
            .with_min_inner_size([320.0, 200.0]),
        ..Default::default()
    };

    let outcome: app::SharedOutcome = Arc::new(Mutex::new(None));
    let app_outcome = outcome.clone();
    let context = ApplicationContext::new(config, backend, mode);

    info!("Starting {} v{}", APP_NAME, env!("CARGO_PKG_VERSION"));
    eframe::run_native(
        APP_NAME,
        native_options,
        Box::new(move |cc| Ok(Box::new(EasyTermApp::new(cc, context, app_outcome)))),
    )?;

    let state = outcome
        .lock()
        .ok()
        .and_then(|mut guard| guard.take())
        .unwrap_or(SessionState::Exited(ExitReason::Closed));
    info!("{} shutdown complete ({})", APP_NAME, state.label());
    Ok(state)
}

/// Library entry point: show one terminal window, then end the process.
///
/// Exits with status 0 once the window is closed, or 1 when the session
/// could not be started or the window failed.
pub fn run_lib(config: SessionConfiguration) -> ! {
    init_logging(false);
    let code = match run(config, LaunchMode::Library) {
        Ok(state) => state.exit_code(),
        Err(e) => {
            error!("{}", e);
            e.exit_code()
        }
    };
    std::process::exit(i32::from(code))
}
