//! Runtime configuration for a board session.
//!
//! ```
//! use taskboard::config::{BoardConfig, ReconcilePolicy};
//!
//! let config = BoardConfig::default();
//! assert_eq!(config.reconcile, ReconcilePolicy::faithful());
//!
//! let hardened = BoardConfig::default().with_reconcile(ReconcilePolicy::hardened());
//! assert!(hardened.reconcile.rollback_on_failure);
//! ```

use std::env;
use std::time::Duration;
use thiserror::Error;

/// Environment variable holding the task API base URL.
pub const API_URL_VAR: &str = "TASKBOARD_API_URL";
/// Environment variable holding the request timeout in whole seconds.
pub const REQUEST_TIMEOUT_VAR: &str = "TASKBOARD_REQUEST_TIMEOUT_SECS";
/// Environment variable selecting the reconciliation policy.
pub const RECONCILE_POLICY_VAR: &str = "TASKBOARD_RECONCILE_POLICY";

const DEFAULT_API_URL: &str = "http://localhost:3000";
const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// How authoritative status responses are folded back into the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReconcilePolicy {
    /// Drop a response when a newer status change for the same task has
    /// been issued since.
    pub discard_stale_responses: bool,
    /// Restore the pre-drag task when the status change fails.
    pub rollback_on_failure: bool,
}

impl ReconcilePolicy {
    /// Last response wins and failures leave the optimistic status in place.
    #[must_use]
    pub const fn faithful() -> Self {
        Self {
            discard_stale_responses: false,
            rollback_on_failure: false,
        }
    }

    /// Sequences responses per task and rolls back failed changes.
    #[must_use]
    pub const fn hardened() -> Self {
        Self {
            discard_stale_responses: true,
            rollback_on_failure: true,
        }
    }

    fn parse(value: &str) -> Result<Self, ConfigError> {
        match value.trim().to_ascii_lowercase().as_str() {
            "faithful" => Ok(Self::faithful()),
            "hardened" => Ok(Self::hardened()),
            _ => Err(ConfigError::InvalidValue {
                var: RECONCILE_POLICY_VAR,
                value: value.to_owned(),
            }),
        }
    }
}

impl Default for ReconcilePolicy {
    fn default() -> Self {
        Self::faithful()
    }
}

/// Settings shared by the HTTP gateway and the board session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardConfig {
    /// Base URL of the task API, without the `/api` suffix.
    pub api_base_url: String,
    /// Per-request timeout.
    pub request_timeout: Duration,
    /// Reconciliation behaviour.
    pub reconcile: ReconcilePolicy,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_URL.to_owned(),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            reconcile: ReconcilePolicy::default(),
        }
    }
}

impl BoardConfig {
    /// Reads overrides from the process environment, keeping defaults for
    /// unset variables.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] when a variable is set to a value
    /// that cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds a configuration from an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] when a variable holds an
    /// unparseable value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        if let Some(url) = lookup(API_URL_VAR) {
            let trimmed = url.trim().trim_end_matches('/');
            if trimmed.is_empty() {
                return Err(ConfigError::InvalidValue {
                    var: API_URL_VAR,
                    value: url,
                });
            }
            trimmed.clone_into(&mut config.api_base_url);
        }
        if let Some(raw) = lookup(REQUEST_TIMEOUT_VAR) {
            let seconds = raw
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|value| *value > 0)
                .ok_or_else(|| ConfigError::InvalidValue {
                    var: REQUEST_TIMEOUT_VAR,
                    value: raw.clone(),
                })?;
            config.request_timeout = Duration::from_secs(seconds);
        }
        if let Some(raw) = lookup(RECONCILE_POLICY_VAR) {
            config.reconcile = ReconcilePolicy::parse(&raw)?;
        }
        Ok(config)
    }

    /// Sets the task API base URL.
    #[must_use]
    pub fn with_api_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into();
        self
    }

    /// Sets the reconciliation policy.
    #[must_use]
    pub const fn with_reconcile(mut self, policy: ReconcilePolicy) -> Self {
        self.reconcile = policy;
        self
    }
}

/// Errors raised while loading configuration.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A variable was set to an unusable value.
    #[error("invalid value '{value}' for {var}")]
    InvalidValue {
        /// Variable name.
        var: &'static str,
        /// Rejected value.
        value: String,
    },
}
