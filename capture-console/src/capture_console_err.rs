use serde::Serialize;
use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum CaptureConsoleErr {
    // System / Concurrency
    LockFailure(String),

    // Data Format / Parsing
    JsonParseError(String, String),
}

impl Display for CaptureConsoleErr {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            CaptureConsoleErr::LockFailure(msg) => write!(f, "Failed to acquire lock: {msg}"),

            CaptureConsoleErr::JsonParseError(type_name, err_msg) => {
                write!(f, "Failed to parse JSON {type_name} - {err_msg}")
            }
        }
    }
}

impl std::error::Error for CaptureConsoleErr {}

impl CaptureConsoleErr {
    pub fn name(&self) -> &'static str {
        match self {
            CaptureConsoleErr::LockFailure(_) => "LockFailure",

            CaptureConsoleErr::JsonParseError(_, _) => "JsonParseError",
        }
    }
}
