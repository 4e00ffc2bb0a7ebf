//! Environment-driven settings shared by the binaries.
//!
//! Flags on the command line win; these variables fill in whatever the
//! caller did not pass explicitly.

use std::env;
use std::path::PathBuf;

/// `tracing` filter directives for the binaries (e.g. `interpret_ext=debug`).
pub const LOG_FILTER_ENV: &str = "INTERPRET_EXT_LOG";
/// Non-empty and not `0`: treat any rejected plugin as a failure.
pub const STRICT_ENV: &str = "INTERPRET_EXT_STRICT";
/// Comma- or whitespace-separated manifest paths used when none are passed.
pub const MANIFESTS_ENV: &str = "INTERPRET_EXT_MANIFESTS";

const DEFAULT_LOG_FILTER: &str = "warn";

/// Filter directives from `INTERPRET_EXT_LOG`, then `RUST_LOG`, then `warn`.
pub fn log_filter() -> String {
    pick_log_filter(env::var(LOG_FILTER_ENV).ok(), env::var("RUST_LOG").ok())
}

pub fn strict_from_env() -> bool {
    parse_flag(env::var(STRICT_ENV).ok().as_deref())
}

pub fn manifests_from_env() -> Vec<PathBuf> {
    env::var(MANIFESTS_ENV)
        .map(|raw| split_list(&raw).into_iter().map(PathBuf::from).collect())
        .unwrap_or_default()
}

/// Split comma- or whitespace-delimited configuration lists into tokens.
pub fn split_list(value: &str) -> Vec<String> {
    value
        .replace(',', " ")
        .split_whitespace()
        .map(str::to_string)
        .collect()
}

fn parse_flag(value: Option<&str>) -> bool {
    value
        .map(|v| !v.trim().is_empty() && v.trim() != "0")
        .unwrap_or(false)
}

fn pick_log_filter(primary: Option<String>, fallback: Option<String>) -> String {
    [primary, fallback]
        .into_iter()
        .flatten()
        .find(|value| !value.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_list_accepts_commas_and_whitespace() {
        assert_eq!(
            split_list("a.json, b.json\n  c.json,,"),
            vec!["a.json", "b.json", "c.json"]
        );
        assert!(split_list(" , ").is_empty());
    }

    #[test]
    fn flags_treat_zero_and_blank_as_off() {
        assert!(!parse_flag(None));
        assert!(!parse_flag(Some("")));
        assert!(!parse_flag(Some(" 0 ")));
        assert!(parse_flag(Some("1")));
        assert!(parse_flag(Some("yes")));
    }

    #[test]
    fn log_filter_prefers_the_crate_variable() {
        assert_eq!(
            pick_log_filter(Some("debug".into()), Some("trace".into())),
            "debug"
        );
        assert_eq!(pick_log_filter(Some(" ".into()), Some("info".into())), "info");
        assert_eq!(pick_log_filter(None, None), "warn");
    }
}
