use arc_swap::ArcSwapOption;
use std::sync::{Arc, OnceLock};

use crate::console::Console;

static GLOBAL_CONSOLE: OnceLock<ArcSwapOption<Console>> = OnceLock::new();

fn slot() -> &'static ArcSwapOption<Console> {
    GLOBAL_CONSOLE.get_or_init(ArcSwapOption::empty)
}

/// Makes `console` the process-wide logging object and returns it.
pub fn install_global_console(console: Arc<Console>) -> Arc<Console> {
    slot().store(Some(console.clone()));
    console
}

pub fn uninstall_global_console() -> Option<Arc<Console>> {
    slot().swap(None)
}

pub fn get_global_console() -> Option<Arc<Console>> {
    slot().load_full()
}
