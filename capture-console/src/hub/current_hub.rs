use lazy_static::lazy_static;
use parking_lot::RwLock;
use std::sync::Arc;

use crate::hub::{Hub, HubAccessor};
use crate::{read_lock_or_return, write_lock_or_noop};

const TAG: &str = stringify!(CurrentHub);

lazy_static! {
    static ref CURRENT_HUB: RwLock<Option<Arc<dyn Hub>>> = RwLock::new(None);
}

pub fn bind_current_hub(hub: Arc<dyn Hub>) {
    let mut current = write_lock_or_noop!(TAG, CURRENT_HUB);
    *current = Some(hub);
}

pub fn unbind_current_hub() {
    let mut current = write_lock_or_noop!(TAG, CURRENT_HUB);
    *current = None;
}

pub fn get_current_hub() -> Option<Arc<dyn Hub>> {
    let current = read_lock_or_return!(TAG, CURRENT_HUB, None);
    current.clone()
}

/// Accessor that resolves the process-wide hub at call time.
pub fn current_hub_accessor() -> HubAccessor {
    Arc::new(get_current_hub)
}
