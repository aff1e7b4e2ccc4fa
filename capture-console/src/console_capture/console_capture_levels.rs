pub const ASSERT_LEVEL: &str = "assert";

pub const DEFAULT_LEVELS: [&str; 6] = ["log", "info", "warn", "error", "debug", ASSERT_LEVEL];

/// Resolves the levels to intercept. A configured list replaces the
/// defaults entirely, even when empty.
pub fn resolve_levels(configured: Option<&[String]>) -> Vec<String> {
    match configured {
        Some(levels) => levels.to_vec(),
        None => DEFAULT_LEVELS.iter().map(|l| l.to_string()).collect(),
    }
}

pub fn is_assert_level(level: &str) -> bool {
    level == ASSERT_LEVEL
}
