pub mod current_hub;
pub mod event;
pub mod hub_trait;
pub mod integration;
pub mod reporting_hub;
pub mod scope;
pub mod severity;

pub use current_hub::{bind_current_hub, current_hub_accessor, get_current_hub, unbind_current_hub};
pub use event::{Event, SdkInfo};
pub use hub_trait::{get_integration_as, Hub, HubAccessor};
pub use integration::{Integration, IntegrationId, IntegrationRegistry};
pub use reporting_hub::{EventSink, ReportingHub};
pub use scope::{EventProcessor, Scope};
pub use severity::Severity;
