use capture_console::{CaptureConsole, CaptureConsoleOptions, Hub, HubAccessor, ReportingHub};
use std::sync::Arc;

use super::mock_console::MockConsole;
use super::mock_event_sink::MockEventSink;

pub struct TestSetup {
    pub hub: Arc<ReportingHub>,
    pub sink: Arc<MockEventSink>,
    pub mock_console: MockConsole,
    pub capture: Arc<CaptureConsole>,
}

/// Hub with a `CaptureConsole` installed on a fresh mock console.
pub fn setup_with_options(options: CaptureConsoleOptions) -> TestSetup {
    let sink = Arc::new(MockEventSink::new());
    let hub = ReportingHub::new(sink.clone());
    let mock_console = MockConsole::new();
    let capture =
        Arc::new(CaptureConsole::new(options).with_console(mock_console.console.clone()));

    hub.add_integration(capture.clone());

    TestSetup {
        hub,
        sink,
        mock_console,
        capture,
    }
}

pub fn setup() -> TestSetup {
    setup_with_options(CaptureConsoleOptions::new())
}

pub fn hub_accessor(hub: &Arc<ReportingHub>) -> HubAccessor {
    let hub = hub.clone();
    Arc::new(move || Some(hub.clone() as Arc<dyn Hub>))
}
