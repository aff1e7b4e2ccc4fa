use serde::Deserialize;
use std::sync::Arc;

use crate::output_logger::{LogLevel, OutputLogProvider};
use crate::CaptureConsoleErr;

#[derive(Clone, Default, Deserialize)]
#[serde(default)]
pub struct CaptureConsoleOptions {
    /// Console methods to intercept. Replaces the default list when set.
    pub levels: Option<Vec<String>>,

    pub output_log_level: Option<LogLevel>,
    #[serde(skip)]
    pub output_logger_provider: Option<Arc<dyn OutputLogProvider>>,
}

impl CaptureConsoleOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn builder() -> CaptureConsoleOptionsBuilder {
        CaptureConsoleOptionsBuilder::default()
    }

    pub fn from_json(json: &str) -> Result<Self, CaptureConsoleErr> {
        serde_json::from_str(json).map_err(|e| {
            CaptureConsoleErr::JsonParseError(
                stringify!(CaptureConsoleOptions).to_string(),
                e.to_string(),
            )
        })
    }
}

#[derive(Default)]
pub struct CaptureConsoleOptionsBuilder {
    inner: CaptureConsoleOptions,
}

impl CaptureConsoleOptionsBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn levels(mut self, levels: Option<Vec<String>>) -> Self {
        self.inner.levels = levels;
        self
    }

    #[must_use]
    pub fn output_log_level(mut self, output_log_level: Option<LogLevel>) -> Self {
        self.inner.output_log_level = output_log_level;
        self
    }

    #[must_use]
    pub fn output_logger_provider(
        mut self,
        output_logger_provider: Option<Arc<dyn OutputLogProvider>>,
    ) -> Self {
        self.inner.output_logger_provider = output_logger_provider;
        self
    }

    #[must_use]
    pub fn build(self) -> CaptureConsoleOptions {
        self.inner
    }
}
