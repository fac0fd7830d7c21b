//! Runtime configuration, read from `HOMESHARE_*` environment variables.
//!
//! Every setting has a default; a malformed value is logged and replaced by the
//! default rather than aborting startup.

use std::net::SocketAddr;

use homeshare_chores::calendar::DEFAULT_RECENT_EXPENSES;

pub const ENV_BIND_ADDR: &str = "HOMESHARE_BIND_ADDR";
pub const ENV_CURRENCY_SYMBOL: &str = "HOMESHARE_CURRENCY_SYMBOL";
pub const ENV_CALENDAR_RECENT_EXPENSES: &str = "HOMESHARE_CALENDAR_RECENT_EXPENSES";
pub const ENV_LOG: &str = "HOMESHARE_LOG";

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    /// Prefix used when rendering balances (`$` -> `+$42.00`).
    pub currency_symbol: String,
    /// How many recent expenses the calendar shows.
    pub calendar_recent_expenses: usize,
    /// Default tracing filter when `RUST_LOG` is unset.
    pub log_filter: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 8080)),
            currency_symbol: "$".to_string(),
            calendar_recent_expenses: DEFAULT_RECENT_EXPENSES,
            log_filter: "info".to_string(),
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Like [`AppConfig::from_env`], but hands the fallback warnings back instead of
    /// logging them, for callers that install the subscriber from this config.
    pub fn from_env_deferred() -> (Self, Vec<String>) {
        Self::resolve(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup (tests pass a map instead of the process env).
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let (config, warnings) = Self::resolve(lookup);
        for warning in &warnings {
            tracing::warn!("{warning}");
        }
        config
    }

    /// Resolve every setting, collecting a message for each malformed value.
    pub fn resolve<F>(lookup: F) -> (Self, Vec<String>)
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let value = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let mut warnings = Vec::new();

        let bind_addr = match value(ENV_BIND_ADDR) {
            Some(raw) => raw.parse().unwrap_or_else(|e| {
                warnings.push(format!("invalid {ENV_BIND_ADDR} {raw:?} ({e}); using {DEFAULT_BIND_ADDR}"));
                defaults.bind_addr
            }),
            None => defaults.bind_addr,
        };

        let calendar_recent_expenses = match value(ENV_CALENDAR_RECENT_EXPENSES) {
            Some(raw) => raw.parse().unwrap_or_else(|e| {
                warnings.push(format!("invalid {ENV_CALENDAR_RECENT_EXPENSES} {raw:?} ({e}); using default"));
                defaults.calendar_recent_expenses
            }),
            None => defaults.calendar_recent_expenses,
        };

        let config = Self {
            bind_addr,
            currency_symbol: value(ENV_CURRENCY_SYMBOL).unwrap_or(defaults.currency_symbol),
            calendar_recent_expenses,
            log_filter: value(ENV_LOG).unwrap_or(defaults.log_filter),
        };
        (config, warnings)
    }
}
