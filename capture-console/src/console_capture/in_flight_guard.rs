use std::cell::RefCell;
use std::collections::HashSet;

thread_local! {
    static IN_FLIGHT_LEVELS: RefCell<HashSet<String>> = RefCell::new(HashSet::new());
}

/// Marks a level as being captured on the current thread. While the guard
/// lives, [`InFlightGuard::enter`] for the same level returns `None`, which
/// stops a capture whose dispatch logs through the same console method from
/// recursing.
pub struct InFlightGuard {
    level: String,
}

impl InFlightGuard {
    pub fn enter(level: &str) -> Option<Self> {
        let inserted = IN_FLIGHT_LEVELS.with(|levels| levels.borrow_mut().insert(level.to_string()));
        if !inserted {
            return None;
        }

        Some(Self {
            level: level.to_string(),
        })
    }

    pub fn is_in_flight(level: &str) -> bool {
        IN_FLIGHT_LEVELS.with(|levels| levels.borrow().contains(level))
    }
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        IN_FLIGHT_LEVELS.with(|levels| {
            levels.borrow_mut().remove(&self.level);
        });
    }
}
