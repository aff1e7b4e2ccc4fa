use parking_lot::RwLock;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;

use crate::{read_lock_or_return, write_lock_or_noop, write_lock_or_return};

const TAG: &str = stringify!(Console);

/// A console method. Receives the console it was invoked on and the call's
/// arguments.
pub type ConsoleMethod = Arc<dyn Fn(&Console, &[Value]) + Send + Sync>;

/// Result of replacing a method in place.
#[derive(Clone)]
pub struct FilledMethod {
    pub original: ConsoleMethod,
    pub replacement: ConsoleMethod,
}

/// A logging object: a mutable table of named methods.
#[derive(Default)]
pub struct Console {
    methods: RwLock<HashMap<String, ConsoleMethod>>,
}

impl Console {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_method<F>(self, level: &str, method: F) -> Self
    where
        F: Fn(&Console, &[Value]) + Send + Sync + 'static,
    {
        self.set_method(level, Arc::new(method));
        self
    }

    pub fn set_method(&self, level: &str, method: ConsoleMethod) {
        let mut methods = write_lock_or_noop!(TAG, self.methods);
        methods.insert(level.to_string(), method);
    }

    pub fn get_method(&self, level: &str) -> Option<ConsoleMethod> {
        let methods = read_lock_or_return!(TAG, self.methods, None);
        methods.get(level).cloned()
    }

    pub fn has_method(&self, level: &str) -> bool {
        self.get_method(level).is_some()
    }

    /// Replaces an existing method with the one built by `make_replacement`
    /// from the current implementation. Returns `None`, leaving the table
    /// untouched, when `level` has no method.
    pub fn fill<F>(&self, level: &str, make_replacement: F) -> Option<FilledMethod>
    where
        F: FnOnce(ConsoleMethod) -> ConsoleMethod,
    {
        let mut methods = write_lock_or_return!(TAG, self.methods, None);
        let original = methods.get(level)?.clone();
        let replacement = make_replacement(original.clone());
        methods.insert(level.to_string(), replacement.clone());

        Some(FilledMethod {
            original,
            replacement,
        })
    }

    /// Invokes the method registered for `level`. Returns `false` when there
    /// is none. The table lock is released before the method runs, so
    /// methods may log through this console themselves.
    pub fn call(&self, level: &str, args: &[Value]) -> bool {
        let method = match self.get_method(level) {
            Some(method) => method,
            None => return false,
        };

        method(self, args);
        true
    }

    pub fn log(&self, args: &[Value]) {
        self.call("log", args);
    }

    pub fn info(&self, args: &[Value]) {
        self.call("info", args);
    }

    pub fn warn(&self, args: &[Value]) {
        self.call("warn", args);
    }

    pub fn error(&self, args: &[Value]) {
        self.call("error", args);
    }

    pub fn debug(&self, args: &[Value]) {
        self.call("debug", args);
    }

    pub fn assert(&self, args: &[Value]) {
        self.call("assert", args);
    }
}
