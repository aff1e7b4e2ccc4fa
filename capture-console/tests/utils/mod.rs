#![allow(dead_code)]

pub mod helpers;
pub mod mock_console;
pub mod mock_event_sink;
pub mod mock_log_provider;
