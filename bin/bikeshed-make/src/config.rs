//! Runtime configuration, loaded from environment variables at startup.

use bikeshed_fetch::DEFAULT_ENDPOINT;

/// Environment-level settings for bikeshed-make.
///
/// Every field has a default so the tool works without any environment
/// variables set. Command-line flags take precedence.
#[derive(Debug, Clone)]
pub struct Config {
    /// `tracing` filter string, e.g. `"warn"` or `"bikeshed_fetch=debug"`.
    pub log_level: String,

    /// When `true`, emit log records as newline-delimited JSON.
    pub log_json: bool,

    /// Bikeshed conversion endpoint.
    pub endpoint: String,
}

impl Config {
    /// Build [`Config`] from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        Self {
            log_level: env_or("BIKESHED_LOG", "warn"),
            log_json: std::env::var("BIKESHED_LOG_JSON")
                .map(|v| parse_flag(&v))
                .unwrap_or(false),
            endpoint: env_or("BIKESHED_ENDPOINT", DEFAULT_ENDPOINT),
        }
    }
}

// ── private helpers ──────────────────────────────────────────────────────────

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_owned())
}

fn parse_flag(value: &str) -> bool {
    value == "1" || value.eq_ignore_ascii_case("true")
}
