use serde_json::Value;
use uuid::Uuid;

use crate::console_capture::console_capture_levels::is_assert_level;
use crate::hub::{Event, Hub, Scope, Severity};
use crate::utils::{normalize_args, safe_join};

pub const CONSOLE_LOGGER: &str = "console";
pub const ARGUMENTS_EXTRA_KEY: &str = "arguments";
pub const NORMALIZE_DEPTH: usize = 3;

const ASSERTION_FAILED_PREFIX: &str = "Assertion failed: ";
const ASSERT_FALLBACK_MESSAGE: &str = "console.assert";

/// Everything captured from one console call, ready for dispatch.
#[derive(Clone, Debug, PartialEq)]
pub struct ConsoleCaptureEvent {
    pub level: Severity,
    pub message: String,
    pub arguments: Value,
}

impl ConsoleCaptureEvent {
    /// Builds the capture for a call to `level` with `args`. Returns `None`
    /// for an `assert` call whose condition is not strictly `false`.
    pub fn from_call(level: &str, args: &[Value]) -> Option<Self> {
        let severity = Severity::from_level(level);

        if !is_assert_level(level) {
            return Some(Self {
                level: severity,
                message: safe_join(args, " "),
                arguments: normalize_args(args, NORMALIZE_DEPTH),
            });
        }

        match args.split_first() {
            Some((Value::Bool(false), rest)) => {
                let joined = safe_join(rest, " ");
                let detail = if joined.is_empty() {
                    ASSERT_FALLBACK_MESSAGE
                } else {
                    joined.as_str()
                };

                Some(Self {
                    level: severity,
                    message: format!("{ASSERTION_FAILED_PREFIX}{detail}"),
                    arguments: normalize_args(rest, NORMALIZE_DEPTH),
                })
            }
            _ => None,
        }
    }

    /// Attaches level, arguments and the console tagging processor to a
    /// fresh scope, then captures the message inside it.
    pub fn dispatch(&self, hub: &dyn Hub) -> Option<Uuid> {
        let mut event_id = None;

        hub.with_scope(
            &mut |scope: &mut Scope| {
                scope.set_level(self.level);
                scope.set_extra(ARGUMENTS_EXTRA_KEY, self.arguments.clone());
                scope.add_event_processor(tag_console_event);
            },
            &mut || {
                event_id = hub.capture_message(&self.message);
            },
        );

        event_id
    }
}

/// Marks an event as coming from the console and lists the console among
/// the reported integrations, keeping whatever was already listed.
pub fn tag_console_event(mut event: Event) -> Option<Event> {
    event.logger = Some(CONSOLE_LOGGER.to_string());
    if let Some(sdk) = event.sdk.as_mut() {
        sdk.integrations.push(CONSOLE_LOGGER.to_string());
    }
    Some(event)
}
