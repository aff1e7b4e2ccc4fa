pub mod capture_console_integration;
pub mod console_capture_event;
pub mod console_capture_levels;
pub mod console_capture_options;
pub mod in_flight_guard;

pub use capture_console_integration::CaptureConsole;
pub use console_capture_event::ConsoleCaptureEvent;
pub use console_capture_options::{CaptureConsoleOptions, CaptureConsoleOptionsBuilder};
