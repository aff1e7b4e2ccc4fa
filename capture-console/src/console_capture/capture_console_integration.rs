use parking_lot::Mutex;
use serde_json::Value;
use std::any::Any;
use std::sync::{Arc, Weak};
use std::time::Duration;
use uuid::Uuid;

use crate::console::{Console, ConsoleMethod, FilledMethod};
use crate::console_capture::console_capture_event::ConsoleCaptureEvent;
use crate::console_capture::console_capture_levels::resolve_levels;
use crate::console_capture::console_capture_options::CaptureConsoleOptions;
use crate::console_capture::in_flight_guard::InFlightGuard;
use crate::console_global::get_global_console;
use crate::hub::{get_integration_as, EventProcessor, Hub, HubAccessor, Integration, IntegrationId};
use crate::output_logger::initialize_output_logger;
use crate::{log_d, log_e, log_w, CaptureConsoleErr};

const TAG: &str = stringify!(CaptureConsole);

struct InterceptionRecord {
    console: Weak<Console>,
    level: String,
    original: ConsoleMethod,
    wrapper: ConsoleMethod,
}

/// Sends console calls to the current hub as events, then lets the original
/// console method run.
pub struct CaptureConsole {
    instance_id: String,
    levels: Vec<String>,
    console: Option<Arc<Console>>,
    interceptions: Mutex<Vec<InterceptionRecord>>,
}

impl IntegrationId for CaptureConsole {
    const ID: &'static str = "CaptureConsole";
}

impl Default for CaptureConsole {
    fn default() -> Self {
        Self::new(CaptureConsoleOptions::default())
    }
}

impl CaptureConsole {
    pub fn new(options: CaptureConsoleOptions) -> Self {
        if options.output_log_level.is_some() || options.output_logger_provider.is_some() {
            initialize_output_logger(
                &options.output_log_level,
                options.output_logger_provider.clone(),
            );
        }

        Self {
            instance_id: format!("{}_{}", Self::ID, Uuid::new_v4()),
            levels: resolve_levels(options.levels.as_deref()),
            console: None,
            interceptions: Mutex::new(Vec::new()),
        }
    }

    /// Intercepts `console` instead of the global console.
    #[must_use]
    pub fn with_console(mut self, console: Arc<Console>) -> Self {
        self.console = Some(console);
        self
    }

    pub fn levels(&self) -> &[String] {
        &self.levels
    }

    pub fn instance_id(&self) -> &str {
        &self.instance_id
    }

    pub fn intercepted_levels(&self) -> Vec<String> {
        match self.interceptions.try_lock_for(Duration::from_secs(5)) {
            Some(interceptions) => interceptions.iter().map(|r| r.level.clone()).collect(),
            None => {
                log_e!(TAG, "Failed to acquire interceptions lock");
                vec![]
            }
        }
    }

    /// Wraps every configured level that `console` has and that this
    /// instance has not wrapped yet. Returns how many levels were wrapped.
    pub fn patch_console(&self, console: &Arc<Console>, get_current_hub: HubAccessor) -> usize {
        let mut interceptions = match self.interceptions.try_lock_for(Duration::from_secs(5)) {
            Some(interceptions) => interceptions,
            None => {
                log_e!(TAG, "Failed to acquire interceptions lock");
                return 0;
            }
        };

        // a dropped console's address can be reused by a new one
        interceptions.retain(|record| record.console.strong_count() > 0);

        let mut patched = 0;
        for level in &self.levels {
            let already_patched = interceptions.iter().any(|record| {
                record.level == *level && std::ptr::eq(record.console.as_ptr(), Arc::as_ptr(console))
            });
            if already_patched {
                log_d!(TAG, "Console level '{}' is already intercepted", level);
                continue;
            }

            let filled = console.fill(level, |original| {
                make_wrapper(
                    level,
                    original,
                    self.instance_id.clone(),
                    get_current_hub.clone(),
                )
            });

            match filled {
                Some(FilledMethod {
                    original,
                    replacement,
                }) => {
                    interceptions.push(InterceptionRecord {
                        console: Arc::downgrade(console),
                        level: level.clone(),
                        original,
                        wrapper: replacement,
                    });
                    patched += 1;
                }
                None => log_d!(TAG, "Console has no '{}' method, skipping", level),
            }
        }

        patched
    }

    /// Puts every intercepted method back on its console. Returns how many
    /// methods were restored.
    pub fn restore(&self) -> Result<usize, CaptureConsoleErr> {
        let mut interceptions = self
            .interceptions
            .try_lock_for(Duration::from_secs(5))
            .ok_or_else(|| {
                CaptureConsoleErr::LockFailure("Failed to lock interceptions".to_string())
            })?;

        let mut restored = 0;
        for record in interceptions.drain(..) {
            let Some(console) = record.console.upgrade() else {
                continue;
            };

            let still_wrapped = console
                .get_method(&record.level)
                .is_some_and(|current| Arc::ptr_eq(&current, &record.wrapper));
            if !still_wrapped {
                log_w!(
                    TAG,
                    "Console level '{}' was replaced after interception, restoring the original anyway",
                    record.level
                );
            }

            console.set_method(&record.level, record.original);
            restored += 1;
        }

        Ok(restored)
    }
}

impl Integration for CaptureConsole {
    fn name(&self) -> &'static str {
        Self::ID
    }

    fn setup_once(
        &self,
        _add_global_event_processor: &dyn Fn(EventProcessor),
        get_current_hub: HubAccessor,
    ) {
        let console = match self.console.clone().or_else(get_global_console) {
            Some(console) => console,
            None => {
                log_d!(TAG, "No console available, nothing to intercept");
                return;
            }
        };

        let patched = self.patch_console(&console, get_current_hub);
        log_d!(TAG, "Intercepted {} console level(s)", patched);
    }

    fn as_any(self: Arc<Self>) -> Arc<dyn Any + Send + Sync> {
        self
    }
}

fn make_wrapper(
    level: &str,
    original: ConsoleMethod,
    instance_id: String,
    get_current_hub: HubAccessor,
) -> ConsoleMethod {
    let level = level.to_string();

    Arc::new(move |console: &Console, args: &[Value]| {
        capture_console_call(&level, args, &instance_id, &get_current_hub);
        original(console, args);
    })
}

fn capture_console_call(
    level: &str,
    args: &[Value],
    instance_id: &str,
    get_current_hub: &HubAccessor,
) -> Option<Uuid> {
    let _in_flight = InFlightGuard::enter(level)?;

    let hub = get_current_hub()?;
    if !is_active(hub.as_ref(), instance_id) {
        return None;
    }

    ConsoleCaptureEvent::from_call(level, args)?.dispatch(hub.as_ref())
}

/// True when the hub has this exact instance registered.
fn is_active(hub: &dyn Hub, instance_id: &str) -> bool {
    get_integration_as::<CaptureConsole>(hub)
        .map(|integration| integration.instance_id == instance_id)
        .unwrap_or(false)
}
