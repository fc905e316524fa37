//! Test fixtures and polling helpers

use std::time::{Duration, Instant};

use easyterm::session::TitleLog;
use easyterm::{ActionDescriptor, SessionConfiguration, SessionHost, TitleSurface};

/// How long helpers wait for background threads
pub const TEST_TIMEOUT: Duration = Duration::from_secs(5);

/// The quick action used by the library example
pub fn hello_action() -> ActionDescriptor {
    ActionDescriptor::new(
        "Hello",
        "emblem-favorite",
        "Say hello to the world",
        "echo Hello World",
    )
}

/// cwd `/`, `/bin/bash`, one "Hello" action
pub fn library_example_config() -> SessionConfiguration {
    SessionConfiguration::new()
        .with_working_directory("/")
        .with_command(["/bin/bash"])
        .with_action(hello_action())
}

/// Spin until `condition` holds or the timeout passes
pub fn wait_until(mut condition: impl FnMut() -> bool) -> bool {
    let deadline = Instant::now() + TEST_TIMEOUT;
    while Instant::now() < deadline {
        if condition() {
            return true;
        }
        std::thread::sleep(Duration::from_millis(5));
    }
    condition()
}

/// Poll the host until `condition` holds or the timeout passes
pub fn poll_until(
    host: &mut SessionHost,
    titles: &mut dyn TitleSurface,
    mut condition: impl FnMut(&SessionHost) -> bool,
) -> bool {
    let deadline = Instant::now() + TEST_TIMEOUT;
    loop {
        host.poll(titles);
        if condition(host) {
            return true;
        }
        if Instant::now() >= deadline {
            return false;
        }
        std::thread::sleep(Duration::from_millis(5));
    }
}

/// Poll the host until the recorded titles and notices satisfy `condition`
pub fn poll_log_until(
    host: &mut SessionHost,
    log: &mut TitleLog,
    mut condition: impl FnMut(&TitleLog) -> bool,
) -> bool {
    let deadline = Instant::now() + TEST_TIMEOUT;
    loop {
        host.poll(log);
        if condition(log) {
            return true;
        }
        if Instant::now() >= deadline {
            return false;
        }
        std::thread::sleep(Duration::from_millis(5));
    }
}
