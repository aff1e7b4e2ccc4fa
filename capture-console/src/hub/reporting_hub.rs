use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::{Arc, Weak};
use std::thread::{self, ThreadId};
use std::time::Duration;
use uuid::Uuid;

use crate::hub::event::{Event, SdkInfo};
use crate::hub::integration::{Integration, IntegrationRegistry};
use crate::hub::scope::{EventProcessor, Scope};
use crate::hub::severity::Severity;
use crate::hub::{Hub, HubAccessor};
use crate::{log_d, log_e, read_lock_or_return, write_lock_or_noop};

const TAG: &str = stringify!(ReportingHub);

pub const SDK_NAME: &str = "capture-console";
pub const SDK_VERSION: &str = env!("CARGO_PKG_VERSION");

const LOCK_TIMEOUT: Duration = Duration::from_secs(5);

/// Final destination of captured events.
pub trait EventSink: Send + Sync {
    fn send_event(&self, event: Event);
}

/// In-process hub: keeps a base scope, a stack of pushed scopes per thread,
/// the installed integrations and the global event processors, and hands
/// finished events to an [`EventSink`].
pub struct ReportingHub {
    sink: Arc<dyn EventSink>,
    integrations: IntegrationRegistry,
    global_processors: RwLock<Vec<EventProcessor>>,
    base_scope: RwLock<Scope>,
    thread_scopes: RwLock<HashMap<ThreadId, Vec<Scope>>>,
}

impl ReportingHub {
    pub fn new(sink: Arc<dyn EventSink>) -> Arc<Self> {
        Arc::new(Self {
            sink,
            integrations: IntegrationRegistry::new(),
            global_processors: RwLock::new(Vec::new()),
            base_scope: RwLock::new(Scope::default()),
            thread_scopes: RwLock::new(HashMap::new()),
        })
    }

    /// Runs the integration's setup against this hub, then registers it so
    /// lookups by id succeed.
    pub fn add_integration(self: &Arc<Self>, integration: Arc<dyn Integration>) {
        let weak_hub: Weak<ReportingHub> = Arc::downgrade(self);
        let get_current_hub: HubAccessor = Arc::new(move || match weak_hub.upgrade() {
            Some(hub) => Some(hub as Arc<dyn Hub>),
            None => None,
        });

        integration.setup_once(
            &|processor: EventProcessor| self.add_global_event_processor(processor),
            get_current_hub,
        );

        log_d!(TAG, "Installed integration {}", integration.name());
        self.integrations.register(integration);
    }

    pub fn remove_integration(&self, id: &str) {
        self.integrations.remove(id);
    }

    pub fn add_global_event_processor(&self, processor: EventProcessor) {
        let mut processors = write_lock_or_noop!(TAG, self.global_processors);
        processors.push(processor);
    }

    /// Mutates the base scope shared by every capture on this hub.
    pub fn configure_scope<F>(&self, configure: F)
    where
        F: FnOnce(&mut Scope),
    {
        let mut scope = write_lock_or_noop!(TAG, self.base_scope);
        configure(&mut *scope);
    }

    /// Innermost scope pushed on the calling thread, or the base scope.
    fn current_scope(&self) -> Scope {
        let pushed = {
            let thread_scopes = read_lock_or_return!(TAG, self.thread_scopes, Scope::default());
            thread_scopes
                .get(&thread::current().id())
                .and_then(|scopes| scopes.last().cloned())
        };

        match pushed {
            Some(scope) => scope,
            None => read_lock_or_return!(TAG, self.base_scope, Scope::default()).clone(),
        }
    }

    fn push_scope(&self, scope: Scope) -> ScopeGuard<'_> {
        let thread_id = thread::current().id();
        let mut guard = ScopeGuard {
            hub: self,
            thread_id,
            pushed: false,
        };

        match self.thread_scopes.try_write_for(LOCK_TIMEOUT) {
            Some(mut thread_scopes) => {
                thread_scopes.entry(thread_id).or_default().push(scope);
                guard.pushed = true;
            }
            None => log_e!(TAG, "Failed to acquire write lock"),
        }

        guard
    }

    fn pop_scope(&self, thread_id: ThreadId) {
        let mut thread_scopes = write_lock_or_noop!(TAG, self.thread_scopes);
        let Some(scopes) = thread_scopes.get_mut(&thread_id) else {
            return;
        };

        scopes.pop();
        if scopes.is_empty() {
            thread_scopes.remove(&thread_id);
        }
    }

    fn sdk_info(&self) -> SdkInfo {
        SdkInfo {
            name: SDK_NAME.to_string(),
            version: SDK_VERSION.to_string(),
            integrations: self.integrations.names(),
        }
    }

    fn apply_global_processors(&self, event: Event) -> Option<Event> {
        let processors = read_lock_or_return!(TAG, self.global_processors, Some(event)).clone();
        processors
            .iter()
            .try_fold(event, |event, processor| processor(event))
    }
}

impl Hub for ReportingHub {
    fn get_integration(&self, id: &str) -> Option<Arc<dyn Integration>> {
        self.integrations.get(id)
    }

    fn with_scope(&self, configure: &mut dyn FnMut(&mut Scope), callback: &mut dyn FnMut()) {
        let mut scope = self.current_scope();
        configure(&mut scope);

        let _guard = self.push_scope(scope);
        callback();
    }

    fn capture_message(&self, message: &str) -> Option<Uuid> {
        let scope = self.current_scope();

        let mut event = Event::new_message(message, Severity::Info);
        event.sdk = Some(self.sdk_info());

        let Some(event) = scope.apply_to_event(event) else {
            log_d!(TAG, "Event dropped by a scope event processor");
            return None;
        };
        let Some(event) = self.apply_global_processors(event) else {
            log_d!(TAG, "Event dropped by a global event processor");
            return None;
        };

        let event_id = event.event_id;
        self.sink.send_event(event);
        Some(event_id)
    }
}

struct ScopeGuard<'a> {
    hub: &'a ReportingHub,
    thread_id: ThreadId,
    pushed: bool,
}

impl Drop for ScopeGuard<'_> {
    fn drop(&mut self) {
        if self.pushed {
            self.hub.pop_scope(self.thread_id);
        }
    }
}
