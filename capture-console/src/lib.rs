pub use capture_console_err::CaptureConsoleErr;
pub use console::{Console, ConsoleMethod};
pub use console_capture::{
    CaptureConsole, CaptureConsoleOptions, CaptureConsoleOptionsBuilder, ConsoleCaptureEvent,
};
pub use console_global::{get_global_console, install_global_console, uninstall_global_console};
pub use hub::{
    bind_current_hub, current_hub_accessor, get_current_hub, get_integration_as,
    unbind_current_hub, Event, EventProcessor, EventSink, Hub, HubAccessor, Integration,
    IntegrationId, ReportingHub, Scope, SdkInfo, Severity,
};

pub mod console;
pub mod console_capture;
pub mod console_global;
pub mod hub;
pub mod output_logger;
pub mod utils;

mod capture_console_err;
mod macros;
