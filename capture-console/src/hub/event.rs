use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use uuid::Uuid;

use crate::hub::severity::Severity;

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SdkInfo {
    pub name: String,
    pub version: String,
    pub integrations: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Event {
    pub event_id: Uuid,
    pub timestamp: DateTime<Utc>,
    pub level: Severity,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logger: Option<String>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub extra: BTreeMap<String, Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sdk: Option<SdkInfo>,
}

impl Event {
    pub fn new_message(message: &str, level: Severity) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            timestamp: Utc::now(),
            level,
            message: Some(message.to_string()),
            logger: None,
            extra: BTreeMap::new(),
            sdk: None,
        }
    }
}
