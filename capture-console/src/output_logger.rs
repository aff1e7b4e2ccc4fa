use log::{debug, error, info, warn, Level};
use parking_lot::RwLock;
use serde::Deserialize;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

const MAX_CHARS: usize = 400;
const TRUNCATED_SUFFIX: &str = "...[TRUNCATED]";
const TARGET_PREFIX: &str = "CaptureConsole::";

const DEFAULT_LOG_LEVEL: LogLevel = LogLevel::Warn;
const LOCK_TIMEOUT: Duration = Duration::from_secs(5);

lazy_static::lazy_static! {
    static ref LOGGER_STATE: RwLock<LoggerState> = RwLock::new(LoggerState {
        level: DEFAULT_LOG_LEVEL,
        provider: None,
    });
}

struct LoggerState {
    level: LogLevel,
    provider: Option<Arc<dyn OutputLogProvider>>,
}

static INITIALIZED: AtomicBool = AtomicBool::new(false);

/// Verbosity of the crate's own diagnostics, from `None` (silent) up to
/// `Debug`.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd, Deserialize)]
#[serde(from = "String")]
#[repr(u8)]
pub enum LogLevel {
    None = 0,
    Error = 1,
    Warn = 2,
    Info = 3,
    Debug = 4,
}

impl From<&str> for LogLevel {
    fn from(level: &str) -> Self {
        match level.to_lowercase().as_str() {
            "debug" => LogLevel::Debug,
            "info" => LogLevel::Info,
            "warn" => LogLevel::Warn,
            "error" => LogLevel::Error,
            "none" => LogLevel::None,
            _ => DEFAULT_LOG_LEVEL,
        }
    }
}

impl From<String> for LogLevel {
    fn from(level: String) -> Self {
        LogLevel::from(level.as_str())
    }
}

impl LogLevel {
    fn to_log_level(self) -> Option<Level> {
        match self {
            LogLevel::Debug => Some(Level::Debug),
            LogLevel::Info => Some(Level::Info),
            LogLevel::Warn => Some(Level::Warn),
            LogLevel::Error => Some(Level::Error),
            LogLevel::None => None,
        }
    }
}

/// Receives the crate's own diagnostics. These never go through an
/// intercepted [`crate::Console`], so they cannot be captured themselves.
pub trait OutputLogProvider: Send + Sync {
    fn initialize(&self);
    fn debug(&self, tag: &str, msg: String);
    fn info(&self, tag: &str, msg: String);
    fn warn(&self, tag: &str, msg: String);
    fn error(&self, tag: &str, msg: String);
    fn shutdown(&self);
}

pub fn initialize_output_logger(
    level: &Option<LogLevel>,
    provider: Option<Arc<dyn OutputLogProvider>>,
) {
    let was_initialized = INITIALIZED.swap(true, Ordering::SeqCst);
    if was_initialized {
        return;
    }

    let Some(mut state) = LOGGER_STATE.try_write_for(LOCK_TIMEOUT) else {
        report_lock_failure("write");
        return;
    };
    let level = level.unwrap_or(DEFAULT_LOG_LEVEL);
    state.level = level;

    if let Some(provider_impl) = provider {
        provider_impl.initialize();
        state.provider = Some(provider_impl);
        return;
    }

    let Some(final_level) = level.to_log_level() else {
        return;
    };

    if simple_logger::init_with_level(final_level).is_err() {
        // another logger is already installed; only lower the global filter
        log::set_max_level(final_level.to_level_filter());
    }
}

pub fn shutdown_output_logger() {
    let Some(mut state) = LOGGER_STATE.try_write_for(LOCK_TIMEOUT) else {
        report_lock_failure("write");
        return;
    };

    if let Some(provider) = state.provider.take() {
        provider.shutdown();
    }
    state.level = DEFAULT_LOG_LEVEL;

    INITIALIZED.store(false, Ordering::SeqCst);
}

pub fn log_message(tag: &str, level: LogLevel, msg: String) {
    let truncated_msg = truncate(msg);

    if let Some(state) = LOGGER_STATE.try_read_for(LOCK_TIMEOUT) {
        if let Some(provider) = &state.provider {
            match level {
                LogLevel::Debug => provider.debug(tag, truncated_msg),
                LogLevel::Info => provider.info(tag, truncated_msg),
                LogLevel::Warn => provider.warn(tag, truncated_msg),
                LogLevel::Error => provider.error(tag, truncated_msg),
                LogLevel::None => {}
            }
            return;
        }
    } else {
        report_lock_failure("read");
    }

    if let Some(level) = level.to_log_level() {
        let target = format!("{TARGET_PREFIX}{tag}");

        match level {
            Level::Debug => debug!(target: target.as_str(), "{}", truncated_msg),
            Level::Info => info!(target: target.as_str(), "{}", truncated_msg),
            Level::Warn => warn!(target: target.as_str(), "{}", truncated_msg),
            Level::Error => error!(target: target.as_str(), "{}", truncated_msg),
            _ => {}
        };
    }
}

pub fn has_valid_log_level(level: &LogLevel) -> bool {
    match LOGGER_STATE.try_read_for(LOCK_TIMEOUT) {
        Some(state) => *level <= state.level,
        None => {
            report_lock_failure("read");
            false
        }
    }
}

fn truncate(msg: String) -> String {
    if msg.chars().count() <= MAX_CHARS {
        return msg;
    }

    let visible_chars = MAX_CHARS - TRUNCATED_SUFFIX.len();
    let mut truncated: String = msg.chars().take(visible_chars).collect();
    truncated.push_str(TRUNCATED_SUFFIX);
    truncated
}

fn report_lock_failure(kind: &str) {
    eprintln!("[CaptureConsole] Failed to acquire {kind} lock for logger state");
}

#[macro_export]
macro_rules! log_d {
  ($tag:expr, $($arg:tt)*) => {
        {
            let level = $crate::output_logger::LogLevel::Debug;
            if $crate::output_logger::has_valid_log_level(&level) {
                $crate::output_logger::log_message($tag, level, format!($($arg)*));
            }
        }
    }
}

#[macro_export]
macro_rules! log_i {
  ($tag:expr, $($arg:tt)*) => {
        {
            let level = $crate::output_logger::LogLevel::Info;
            if $crate::output_logger::has_valid_log_level(&level) {
                $crate::output_logger::log_message($tag, level, format!($($arg)*));
            }
        }
    }
}

#[macro_export]
macro_rules! log_w {
  ($tag:expr, $($arg:tt)*) => {
        {
            let level = $crate::output_logger::LogLevel::Warn;
            if $crate::output_logger::has_valid_log_level(&level) {
                $crate::output_logger::log_message($tag, level, format!($($arg)*));
            }
        }
    }
}

#[macro_export]
macro_rules! log_e {
  ($tag:expr, $($arg:tt)*) => {
        {
            let level = $crate::output_logger::LogLevel::Error;
            if $crate::output_logger::has_valid_log_level(&level) {
                $crate::output_logger::log_message($tag, level, format!($($arg)*));
            }
        }
    }
}
