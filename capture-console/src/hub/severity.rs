use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Fatal,
    Error,
    Warning,
    Log,
    Info,
    Debug,
    Critical,
}

impl Severity {
    /// Maps a console level name to a severity. Unknown names, including
    /// `assert`, fall back to [`Severity::Log`].
    pub fn from_level(level: &str) -> Severity {
        match level.to_lowercase().as_str() {
            "debug" => Severity::Debug,
            "info" => Severity::Info,
            "warn" | "warning" => Severity::Warning,
            "error" => Severity::Error,
            "fatal" => Severity::Fatal,
            "critical" => Severity::Critical,
            _ => Severity::Log,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Fatal => "fatal",
            Severity::Error => "error",
            Severity::Warning => "warning",
            Severity::Log => "log",
            Severity::Info => "info",
            Severity::Debug => "debug",
            Severity::Critical => "critical",
        }
    }
}

impl Display for Severity {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_console_levels() {
        assert_eq!(Severity::from_level("log"), Severity::Log);
        assert_eq!(Severity::from_level("info"), Severity::Info);
        assert_eq!(Severity::from_level("warn"), Severity::Warning);
        assert_eq!(Severity::from_level("error"), Severity::Error);
        assert_eq!(Severity::from_level("debug"), Severity::Debug);
        assert_eq!(Severity::from_level("assert"), Severity::Log);
    }

    #[test]
    fn test_case_insensitive() {
        assert_eq!(Severity::from_level("WARNING"), Severity::Warning);
        assert_eq!(Severity::from_level("Fatal"), Severity::Fatal);
    }

    #[test]
    fn test_serializes_lowercase() {
        let json = serde_json::to_string(&Severity::Warning).unwrap();
        assert_eq!(json, "\"warning\"");
    }
}
