mod utils;

use capture_console::{
    bind_current_hub, current_hub_accessor, install_global_console, unbind_current_hub,
    uninstall_global_console, CaptureConsole, Console, Event, EventSink, Hub, ReportingHub,
    Severity,
};
use parking_lot::Mutex;
use serde_json::json;
use serial_test::serial;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use utils::helpers::{hub_accessor, setup};
use utils::mock_console::MockConsole;
use utils::mock_event_sink::MockEventSink;

#[test]
fn test_repeated_setup_does_not_double_wrap() {
    let test = setup();

    let patched_again = test
        .capture
        .patch_console(&test.mock_console.console, hub_accessor(&test.hub));
    test.hub.add_integration(test.capture.clone());

    assert_eq!(patched_again, 0);
    assert_eq!(test.capture.intercepted_levels().len(), 6);

    test.mock_console.console.log(&[json!("once")]);

    assert_eq!(test.sink.len(), 1);
    assert_eq!(test.mock_console.calls().len(), 1);
}

#[test]
fn test_restore_puts_originals_back() {
    let test = setup();

    assert_eq!(test.capture.restore(), Ok(6));
    assert!(test.capture.intercepted_levels().is_empty());

    test.mock_console.console.error(&[json!("after restore")]);
    test.mock_console.console.assert(&[json!(false)]);

    assert_eq!(test.sink.len(), 0);
    assert_eq!(test.mock_console.calls().len(), 2);
}

#[test]
fn test_patch_again_after_restore() {
    let test = setup();
    test.capture.restore().unwrap();

    let patched = test
        .capture
        .patch_console(&test.mock_console.console, hub_accessor(&test.hub));
    test.mock_console.console.warn(&[json!("back")]);

    assert_eq!(patched, 6);
    assert_eq!(test.sink.len(), 1);
}

#[test]
fn test_restore_twice_is_noop() {
    let test = setup();

    assert_eq!(test.capture.restore(), Ok(6));
    assert_eq!(test.capture.restore(), Ok(0));
}

#[test]
fn test_dropped_console_records_are_pruned() {
    let test = setup();
    let capture = CaptureConsole::default();

    let first = MockConsole::new();
    assert_eq!(capture.patch_console(&first.console, hub_accessor(&test.hub)), 6);
    drop(first);

    let second = MockConsole::new();
    assert_eq!(capture.patch_console(&second.console, hub_accessor(&test.hub)), 6);
    assert_eq!(capture.intercepted_levels().len(), 6);
    assert_eq!(capture.restore(), Ok(6));
}

#[test]
fn test_only_registered_instance_captures() {
    let test = setup();
    let other = CaptureConsole::default();

    // `other` wraps the already wrapped console but is never registered
    let patched = other.patch_console(&test.mock_console.console, hub_accessor(&test.hub));
    test.mock_console.console.info(&[json!("single event")]);

    assert_eq!(patched, 6);
    assert_eq!(test.sink.len(), 1);
    assert_eq!(test.mock_console.calls().len(), 1);
}

#[test]
#[should_panic(expected = "original failed")]
fn test_original_panic_propagates() {
    let sink = Arc::new(MockEventSink::new());
    let hub = ReportingHub::new(sink);
    let console = Arc::new(Console::new().with_method("error", |_, _| {
        panic!("original failed");
    }));

    hub.add_integration(Arc::new(CaptureConsole::default().with_console(console.clone())));

    console.error(&[json!("x")]);
}

struct ReentrantSink {
    console: Mutex<Option<Arc<Console>>>,
    events: Mutex<Vec<Event>>,
}

impl EventSink for ReentrantSink {
    fn send_event(&self, event: Event) {
        self.events.lock().push(event);

        let console = self.console.lock().clone();
        if let Some(console) = console {
            console.error(&[json!("logged while sending")]);
        }
    }
}

#[test]
fn test_reentrant_logging_is_not_recaptured() {
    let sink = Arc::new(ReentrantSink {
        console: Mutex::new(None),
        events: Mutex::new(Vec::new()),
    });
    let hub = ReportingHub::new(sink.clone());
    let mock_console = MockConsole::new();
    *sink.console.lock() = Some(mock_console.console.clone());

    hub.add_integration(Arc::new(
        CaptureConsole::default().with_console(mock_console.console.clone()),
    ));

    mock_console.console.error(&[json!("outer")]);

    let events = sink.events.lock();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].message.as_deref(), Some("outer"));

    let calls = mock_console.calls_for("error");
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[0].args, vec![json!("logged while sending")]);
    assert_eq!(calls[1].args, vec![json!("outer")]);
}

struct SlowSink {
    events: Mutex<Vec<Event>>,
}

impl EventSink for SlowSink {
    fn send_event(&self, event: Event) {
        thread::sleep(Duration::from_micros(200));
        self.events.lock().push(event);
    }
}

#[test]
fn test_concurrent_captures_keep_their_own_scope() {
    let sink = Arc::new(SlowSink {
        events: Mutex::new(Vec::new()),
    });
    let hub = ReportingHub::new(sink.clone());
    let mock_console = MockConsole::new();
    hub.add_integration(Arc::new(
        CaptureConsole::default().with_console(mock_console.console.clone()),
    ));

    let console = &mock_console.console;
    thread::scope(|s| {
        s.spawn(|| {
            for i in 0..100 {
                console.error(&[json!("E"), json!(i)]);
            }
        });
        s.spawn(|| {
            for i in 0..100 {
                console.info(&[json!("I"), json!(i)]);
            }
        });
    });

    let events = sink.events.lock();
    assert_eq!(events.len(), 200);
    assert_eq!(mock_console.calls().len(), 200);

    for event in events.iter() {
        let message = event.message.clone().unwrap();
        let (prefix, index) = message.split_once(' ').unwrap();
        let index: u64 = index.parse().unwrap();

        let expected_level = if prefix == "E" {
            Severity::Error
        } else {
            Severity::Info
        };
        assert_eq!(event.level, expected_level);
        assert_eq!(event.extra.get("arguments"), Some(&json!([prefix, index])));

        let integrations = &event.sdk.as_ref().unwrap().integrations;
        assert_eq!(integrations.iter().filter(|i| *i == "console").count(), 1);
    }
}

#[test]
#[serial]
fn test_setup_uses_global_console() {
    let sink = Arc::new(MockEventSink::new());
    let hub = ReportingHub::new(sink.clone());
    let mock_console = MockConsole::new();
    install_global_console(mock_console.console.clone());

    let capture = Arc::new(CaptureConsole::default());
    hub.add_integration(capture.clone());
    mock_console.console.debug(&[json!("global")]);

    assert_eq!(sink.len(), 1);
    assert_eq!(capture.intercepted_levels().len(), 6);

    capture.restore().unwrap();
    uninstall_global_console();
}

#[test]
#[serial]
fn test_setup_without_console_is_noop() {
    uninstall_global_console();
    let sink = Arc::new(MockEventSink::new());
    let hub = ReportingHub::new(sink.clone());
    let capture = Arc::new(CaptureConsole::default());

    hub.add_integration(capture.clone());

    assert!(capture.intercepted_levels().is_empty());
    assert!(hub.get_integration("CaptureConsole").is_some());
}

#[test]
#[serial]
fn test_current_hub_accessor() {
    let sink = Arc::new(MockEventSink::new());
    let hub = ReportingHub::new(sink.clone());
    let registered_console = MockConsole::new();
    let capture =
        Arc::new(CaptureConsole::default().with_console(registered_console.console.clone()));
    hub.add_integration(capture.clone());

    let other_console = MockConsole::new();
    capture.patch_console(&other_console.console, current_hub_accessor());

    bind_current_hub(hub.clone());
    other_console.console.warn(&[json!("bound")]);
    unbind_current_hub();
    other_console.console.warn(&[json!("unbound")]);

    assert_eq!(sink.len(), 1);
    assert_eq!(sink.last().message.as_deref(), Some("bound"));
    assert_eq!(other_console.calls().len(), 2);
}
