use std::sync::Arc;

use uuid::Uuid;

use crate::hub::integration::{downcast_integration, Integration, IntegrationId};
use crate::hub::scope::Scope;

/// Handle on the reporting pipeline, as seen by integrations.
pub trait Hub: Send + Sync {
    fn get_integration(&self, id: &str) -> Option<Arc<dyn Integration>>;

    /// Runs `configure` against a fresh scope derived from the current one,
    /// then runs `callback` with that scope active. The scope is discarded
    /// afterwards.
    fn with_scope(&self, configure: &mut dyn FnMut(&mut Scope), callback: &mut dyn FnMut());

    /// Captures `message` under the active scope. Returns the event id when
    /// the event was handed to the sink.
    fn capture_message(&self, message: &str) -> Option<Uuid>;
}

/// Resolves the hub an integration should report to, if any.
pub type HubAccessor = Arc<dyn Fn() -> Option<Arc<dyn Hub>> + Send + Sync>;

pub fn get_integration_as<T: Integration + IntegrationId>(hub: &dyn Hub) -> Option<Arc<T>> {
    downcast_integration(hub.get_integration(T::ID)?)
}
