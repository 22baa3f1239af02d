use crate::app_system::ConfigError;
use crate::domain::PaginationPolicy;

pub const BUFFER_SIZE_VAR: &str = "USER_STORE_BUFFER";
pub const PAGINATION_POLICY_VAR: &str = "USER_PAGINATION_POLICY";
pub const LOG_FILTER_VAR: &str = "USER_LOG";

/// Runtime settings for [`UserSystem`](crate::app_system::UserSystem).
#[derive(Debug, Clone, PartialEq)]
pub struct SystemConfig {
    /// Capacity of the request channel in front of the user collection.
    pub buffer_size: usize,
    pub pagination: PaginationPolicy,
    /// Default log filter. `RUST_LOG` takes precedence when set.
    pub log_filter: String,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            buffer_size: 32,
            pagination: PaginationPolicy::default(),
            log_filter: "info".to_string(),
        }
    }
}

impl SystemConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary key lookup; unset keys keep their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(raw) = lookup(BUFFER_SIZE_VAR) {
            config.buffer_size = match raw.trim().parse::<usize>() {
                Ok(0) => {
                    return Err(ConfigError::InvalidValue {
                        key: BUFFER_SIZE_VAR,
                        reason: "must be greater than zero".to_string(),
                    })
                }
                Ok(n) => n,
                Err(e) => {
                    return Err(ConfigError::InvalidValue {
                        key: BUFFER_SIZE_VAR,
                        reason: e.to_string(),
                    })
                }
            };
        }

        if let Some(raw) = lookup(PAGINATION_POLICY_VAR) {
            config.pagination = raw.parse().map_err(|reason| ConfigError::InvalidValue {
                key: PAGINATION_POLICY_VAR,
                reason,
            })?;
        }

        if let Some(raw) = lookup(LOG_FILTER_VAR).filter(|v| !v.trim().is_empty()) {
            config.log_filter = raw;
        }

        Ok(config)
    }
}
