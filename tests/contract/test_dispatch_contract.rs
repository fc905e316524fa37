//! Contract Tests for Quick Action Dispatch
//!
//! A quick action writes exactly `command + "\n"` into its session, once per
//! activation, with no quoting or transformation.

#[path = "../test_utils/mod.rs"]
mod test_utils;

use std::sync::Arc;

use easyterm::pty::{EventSink, InputHandle, SessionEvent};
use easyterm::session::TitleLog;
use easyterm::{ActionDescriptor, ActionTrigger, CommandDispatcher, SessionHost};
use test_utils::{hello_action, library_example_config, poll_until, wait_until, MockPtyBackend};

#[test]
fn test_activation_writes_command_and_newline() {
    let (input, rx) = InputHandle::channel();
    let trigger = ActionTrigger::new(
        ActionDescriptor::new("Hi", "", "", "echo hi"),
        CommandDispatcher::new(input),
    );

    trigger.activate();
    assert_eq!(rx.try_recv().unwrap(), b"echo hi\n".to_vec());
    assert!(rx.try_recv().is_err());
}

#[test]
fn test_each_activation_writes_once() {
    let (input, rx) = InputHandle::channel();
    let trigger = ActionTrigger::new(hello_action(), CommandDispatcher::new(input));

    for _ in 0..3 {
        trigger.activate();
    }
    let writes: Vec<Vec<u8>> = rx.try_iter().collect();
    assert_eq!(writes.len(), 3);
    assert!(writes.iter().all(|w| w == b"echo Hello World\n"));
}

#[test]
fn test_command_is_written_verbatim() {
    let (input, rx) = InputHandle::channel();
    let dispatcher = CommandDispatcher::new(input);

    let command = r#"printf '%s\n' "a  b" $HOME; echo "done""#;
    dispatcher.dispatch(command);
    let written = rx.try_recv().unwrap();
    assert_eq!(written, format!("{}\n", command).into_bytes());
}

#[test]
fn test_refused_write_reported_to_observer() {
    let (input, _rx) = InputHandle::channel();
    let (sink, mut events) = EventSink::channel(None);
    let dispatcher = CommandDispatcher::new(input.clone()).with_observer(sink);

    input.close();
    dispatcher.dispatch("echo hi");

    match events.try_recv() {
        Ok(SessionEvent::WriteFailed { reason }) => assert!(reason.contains("exited")),
        other => panic!("unexpected event {:?}", other),
    }
}

#[test]
fn test_refused_write_without_observer_is_silent() {
    let (input, rx) = InputHandle::channel();
    drop(rx);
    // must not panic
    CommandDispatcher::new(input).dispatch("echo hi");
}

#[tokio::test]
async fn test_events_arrive_on_async_receiver() {
    let (input, _rx) = InputHandle::channel();
    let (sink, mut events) = EventSink::channel(None);
    let dispatcher = CommandDispatcher::new(input.clone()).with_observer(sink);

    input.close();
    dispatcher.dispatch("ls");

    let event = tokio::time::timeout(std::time::Duration::from_secs(1), events.recv())
        .await
        .expect("event should arrive");
    assert!(matches!(event, Some(SessionEvent::WriteFailed { .. })));
}

#[test]
fn test_triggers_follow_configuration_order() {
    let backend = MockPtyBackend::new();
    let config = library_example_config()
        .with_action(ActionDescriptor::new("List", "folder", "", "ls"))
        .with_action(ActionDescriptor::new("Top", "", "", "top"));
    let mut host = SessionHost::new(config, Arc::new(backend.clone()), None).unwrap();
    let mut titles = TitleLog::new();

    let names: Vec<&str> = host.triggers().iter().map(|t| t.action().label()).collect();
    assert_eq!(names, vec!["Hello", "List", "Top"]);

    assert!(poll_until(&mut host, &mut titles, |h| h.state().is_running()));
    host.triggers()[2].activate();
    host.triggers()[1].activate();
    assert!(wait_until(|| backend.written_string() == "top\nls\n"));
}
