use parking_lot::RwLock;
use std::any::Any;
use std::sync::Arc;

use crate::hub::scope::EventProcessor;
use crate::hub::HubAccessor;
use crate::{log_d, log_e, read_lock_or_return, write_lock_or_noop};

const TAG: &str = stringify!(IntegrationRegistry);

/// A named instrumentation unit with a single setup entry point.
pub trait Integration: Send + Sync + 'static {
    fn name(&self) -> &'static str;

    fn setup_once(
        &self,
        add_global_event_processor: &dyn Fn(EventProcessor),
        get_current_hub: HubAccessor,
    );

    // Trait upcasting to `dyn Any` is not available on our MSRV.
    // For implementation, just return self.
    fn as_any(self: Arc<Self>) -> Arc<dyn Any + Send + Sync>;
}

/// Static identity used for typed registry lookups.
pub trait IntegrationId {
    const ID: &'static str;
}

/// Integrations known to a hub, kept in installation order.
#[derive(Default)]
pub struct IntegrationRegistry {
    integrations: RwLock<Vec<Arc<dyn Integration>>>,
}

impl IntegrationRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&self, integration: Arc<dyn Integration>) {
        let mut integrations = write_lock_or_noop!(TAG, self.integrations);

        let name = integration.name();
        if let Some(existing) = integrations.iter_mut().find(|i| i.name() == name) {
            log_d!(TAG, "Replacing registered integration {}", name);
            *existing = integration;
            return;
        }

        integrations.push(integration);
    }

    pub fn get(&self, id: &str) -> Option<Arc<dyn Integration>> {
        let integrations = read_lock_or_return!(TAG, self.integrations, None);
        integrations.iter().find(|i| i.name() == id).cloned()
    }

    pub fn remove(&self, id: &str) {
        let mut integrations = write_lock_or_noop!(TAG, self.integrations);
        integrations.retain(|i| i.name() != id);
    }

    pub fn names(&self) -> Vec<String> {
        let integrations = read_lock_or_return!(TAG, self.integrations, vec![]);
        integrations.iter().map(|i| i.name().to_string()).collect()
    }
}

pub fn downcast_integration<T: Integration + IntegrationId>(
    integration: Arc<dyn Integration>,
) -> Option<Arc<T>> {
    match integration.as_any().downcast::<T>() {
        Ok(typed) => Some(typed),
        Err(_) => {
            log_e!(
                TAG,
                "Failed to downcast integration registered as '{}'",
                T::ID
            );
            None
        }
    }
}
