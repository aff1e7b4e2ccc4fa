use std::collections::BTreeMap;
use std::sync::Arc;

use serde_json::Value;

use crate::hub::event::Event;
use crate::hub::severity::Severity;

/// Hook allowed to mutate an outgoing event. Returning `None` drops it.
pub type EventProcessor = Arc<dyn Fn(Event) -> Option<Event> + Send + Sync>;

/// Metadata applied to every event captured while this scope is active.
#[derive(Clone, Default)]
pub struct Scope {
    level: Option<Severity>,
    extra: BTreeMap<String, Value>,
    event_processors: Vec<EventProcessor>,
}

impl Scope {
    pub fn set_level(&mut self, level: Severity) {
        self.level = Some(level);
    }

    pub fn set_extra(&mut self, key: &str, value: Value) {
        self.extra.insert(key.to_string(), value);
    }

    pub fn add_event_processor<F>(&mut self, processor: F)
    where
        F: Fn(Event) -> Option<Event> + Send + Sync + 'static,
    {
        self.event_processors.push(Arc::new(processor));
    }

    pub fn level(&self) -> Option<Severity> {
        self.level
    }

    pub fn extra(&self) -> &BTreeMap<String, Value> {
        &self.extra
    }

    pub fn apply_to_event(&self, mut event: Event) -> Option<Event> {
        if let Some(level) = self.level {
            event.level = level;
        }

        for (key, value) in &self.extra {
            event
                .extra
                .entry(key.clone())
                .or_insert_with(|| value.clone());
        }

        self.event_processors
            .iter()
            .try_fold(event, |event, processor| processor(event))
    }
}
