use capture_console::Console;
use parking_lot::Mutex;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;

pub const ALL_LEVELS: [&str; 6] = ["log", "info", "warn", "error", "debug", "assert"];

#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCall {
    pub level: String,
    pub args: Vec<Value>,
}

/// Stands in for the host console: every method only records its call.
pub struct MockConsole {
    pub console: Arc<Console>,
    pub calls: Arc<Mutex<Vec<RecordedCall>>>,
}

impl MockConsole {
    pub fn new() -> Self {
        Self::with_levels(&ALL_LEVELS)
    }

    pub fn with_levels(levels: &[&str]) -> Self {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let mut console = Console::new();

        for level in levels {
            let calls_clone = calls.clone();
            let level_name = level.to_string();
            console = console.with_method(level, move |_, args| {
                calls_clone
                    .try_lock_for(Duration::from_secs(5))
                    .unwrap()
                    .push(RecordedCall {
                        level: level_name.clone(),
                        args: args.to_vec(),
                    });
            });
        }

        Self {
            console: Arc::new(console),
            calls,
        }
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls
            .try_lock_for(Duration::from_secs(5))
            .unwrap()
            .clone()
    }

    pub fn calls_for(&self, level: &str) -> Vec<RecordedCall> {
        self.calls()
            .into_iter()
            .filter(|call| call.level == level)
            .collect()
    }
}
