//! Contract Tests for PTY Process Lifecycle
//!
//! Runs real children through `NativePtyBackend`. Sandboxes without a
//! usable pseudoterminal make the spawn fail; those runs are skipped rather
//! than failed.

#[path = "../test_utils/mod.rs"]
mod test_utils;

use std::sync::Arc;

use easyterm::session::TitleLog;
use easyterm::{ExitReason, NativePtyBackend, SessionConfiguration, SessionHost, SessionState};
use test_utils::{hello_action, poll_until};

fn native_host(config: SessionConfiguration) -> SessionHost {
    SessionHost::new(config, Arc::new(NativePtyBackend::new()), None).expect("host should start")
}

/// Poll until the session leaves `Spawning`; false when no PTY is available
fn wait_for_spawn(host: &mut SessionHost, titles: &mut TitleLog) -> bool {
    assert!(poll_until(host, titles, |h| *h.state() != SessionState::Spawning));
    if let SessionState::Exited(ExitReason::SpawnFailed { reason, .. }) = host.state() {
        eprintln!("skipping: no usable PTY ({})", reason);
        return false;
    }
    true
}

#[cfg(unix)]
#[test]
fn test_child_output_and_exit_code() {
    let config = SessionConfiguration::new()
        .with_working_directory("/")
        .with_command(["/bin/sh", "-c", "echo pty-ok; sleep 0.2; exit 7"]);
    let mut host = native_host(config);
    let mut titles = TitleLog::new();

    if !wait_for_spawn(&mut host, &mut titles) {
        return;
    }

    assert!(poll_until(&mut host, &mut titles, |h| h.state().is_exited()));
    assert!(poll_until(&mut host, &mut titles, |h| h.surface().contents().contains("pty-ok")));
    assert_eq!(
        host.state(),
        &SessionState::Exited(ExitReason::ChildExited { exit_code: Some(7) })
    );
}

#[cfg(unix)]
#[test]
fn test_working_directory_and_environment_applied() {
    let config = SessionConfiguration::new()
        .with_working_directory("/")
        .with_command(["/bin/sh", "-c", "echo \"dir=$(pwd) greet=$GREETING term=$TERM\""])
        .with_env("GREETING=hi");
    let mut host = native_host(config);
    let mut titles = TitleLog::new();

    if !wait_for_spawn(&mut host, &mut titles) {
        return;
    }

    assert!(poll_until(&mut host, &mut titles, |h| h
        .surface()
        .contents()
        .contains("dir=/ greet=hi term=xterm-256color")));
}

#[cfg(unix)]
#[test]
fn test_action_reaches_interactive_shell() {
    let config = SessionConfiguration::new()
        .with_working_directory("/")
        .with_command(["/bin/sh"])
        .with_action(hello_action());
    let mut host = native_host(config);
    let mut titles = TitleLog::new();

    if !wait_for_spawn(&mut host, &mut titles) {
        return;
    }

    host.triggers()[0].activate();
    assert!(poll_until(&mut host, &mut titles, |h| h
        .surface()
        .contents()
        .lines()
        .any(|line| line.trim_end() == "Hello World")));

    host.dispatcher().dispatch("exit 0");
    assert!(poll_until(&mut host, &mut titles, |h| h.state().is_exited()));
}

#[cfg(unix)]
#[test]
fn test_close_terminates_long_running_child() {
    let config = SessionConfiguration::new()
        .with_working_directory("/")
        .with_command(["/bin/sh", "-c", "sleep 30"]);
    let mut host = native_host(config);
    let mut titles = TitleLog::new();

    if !wait_for_spawn(&mut host, &mut titles) {
        return;
    }

    assert!(host.state().is_running());
    host.close();
    assert_eq!(host.state(), &SessionState::Exited(ExitReason::Closed));
}

#[test]
fn test_missing_program_is_spawn_failure() {
    let config = SessionConfiguration::new()
        .with_working_directory("/")
        .with_command(["/definitely/not/a/program"]);
    let mut host = native_host(config);
    let mut titles = TitleLog::new();

    assert!(poll_until(&mut host, &mut titles, |h| h.state().is_exited()));
    // exec failures surface either at spawn or as an immediate non-zero exit
    assert!(matches!(
        host.state(),
        SessionState::Exited(ExitReason::SpawnFailed { .. })
            | SessionState::Exited(ExitReason::ChildExited { .. })
    ));
    assert!(!titles.titles.is_empty() || !titles.notices.is_empty());
}
