use capture_console::{Event, EventSink};
use parking_lot::Mutex;
use std::time::Duration;

pub struct MockEventSink {
    pub events: Mutex<Vec<Event>>,
}

impl MockEventSink {
    pub fn new() -> Self {
        Self {
            events: Mutex::new(Vec::new()),
        }
    }

    pub fn events(&self) -> Vec<Event> {
        self.events
            .try_lock_for(Duration::from_secs(5))
            .unwrap()
            .clone()
    }

    pub fn len(&self) -> usize {
        self.events.try_lock_for(Duration::from_secs(5)).unwrap().len()
    }

    pub fn last(&self) -> Event {
        self.events()
            .last()
            .cloned()
            .expect("Expected at least one captured event")
    }
}

impl EventSink for MockEventSink {
    fn send_event(&self, event: Event) {
        self.events
            .try_lock_for(Duration::from_secs(5))
            .unwrap()
            .push(event);
    }
}
