//! Shared utilities for CLI commands.

use std::env;

/// Name recorded when no user variable is set.
const UNKNOWN_USER: &str = "unknown";

/// Returns the current user from `USER`, then `USERNAME`.
pub fn current_user() -> String {
    resolve_user(|key| env::var(key).ok())
}

fn resolve_user(lookup: impl Fn(&str) -> Option<String>) -> String {
    ["USER", "USERNAME"]
        .into_iter()
        .filter_map(lookup)
        .find(|name| !name.is_empty())
        .unwrap_or_else(|| UNKNOWN_USER.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_user_prefers_user() {
        let name = resolve_user(|key| Some(format!("{key}-value")));
        assert_eq!(name, "USER-value");
    }

    #[test]
    fn test_resolve_user_falls_back_to_username() {
        let name = resolve_user(|key| (key == "USERNAME").then(|| "windows-sami".to_string()));
        assert_eq!(name, "windows-sami");
    }

    #[test]
    fn test_resolve_user_skips_empty_values() {
        let name = resolve_user(|key| match key {
            "USER" => Some(String::new()),
            _ => Some("fallback".to_string()),
        });
        assert_eq!(name, "fallback");
    }

    #[test]
    fn test_resolve_user_defaults_to_unknown() {
        assert_eq!(resolve_user(|_| None), "unknown");
    }
}
