use std::env;
use std::str::FromStr;

use chrono::Duration;
use serde::{Deserialize, Serialize};

use crate::shared::{DEFAULT_MAX_PAGE_SIZE, DEFAULT_PAGE_SIZE};

// ============================================================================
// Core Configuration
// ============================================================================
//
// Business policies the aggregates and services depend on. Every value has
// a default; `CoreConfig::from_env` overrides them from COMMERCE_* variables.
//
// ============================================================================

pub const ENV_MAX_FAILED_LOGINS: &str = "COMMERCE_MAX_FAILED_LOGINS";
pub const ENV_LOCKOUT_MINUTES: &str = "COMMERCE_LOCKOUT_MINUTES";
pub const ENV_LOW_STOCK_THRESHOLD: &str = "COMMERCE_LOW_STOCK_THRESHOLD";
pub const ENV_DEFAULT_PAGE_SIZE: &str = "COMMERCE_DEFAULT_PAGE_SIZE";
pub const ENV_MAX_PAGE_SIZE: &str = "COMMERCE_MAX_PAGE_SIZE";

/// Account lockout after repeated failed logins
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LockoutPolicy {
    /// Failed attempts that trigger a lockout
    pub max_failed_attempts: u32,
    /// How long a lockout lasts
    pub lockout_minutes: u32,
}

impl LockoutPolicy {
    pub fn lockout_duration(&self) -> Duration {
        Duration::minutes(i64::from(self.lockout_minutes))
    }
}

impl Default for LockoutPolicy {
    fn default() -> Self {
        Self {
            max_failed_attempts: 5,
            lockout_minutes: 15,
        }
    }
}

/// Stock level policy for new products
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryPolicy {
    /// Quantities strictly below this are reported as low stock
    pub low_stock_threshold: u32,
}

impl Default for InventoryPolicy {
    fn default() -> Self {
        Self { low_stock_threshold: 5 }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginationConfig {
    pub default_page_size: u32,
    pub max_page_size: u32,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            default_page_size: DEFAULT_PAGE_SIZE,
            max_page_size: DEFAULT_MAX_PAGE_SIZE,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoreConfig {
    pub lockout: LockoutPolicy,
    pub inventory: InventoryPolicy,
    pub pagination: PaginationConfig,
}

impl CoreConfig {
    /// Read overrides from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Read overrides through `lookup`, falling back to defaults for
    /// variables it does not know
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let config = Self {
            lockout: LockoutPolicy {
                max_failed_attempts: read(&lookup, ENV_MAX_FAILED_LOGINS, defaults.lockout.max_failed_attempts)?,
                lockout_minutes: read(&lookup, ENV_LOCKOUT_MINUTES, defaults.lockout.lockout_minutes)?,
            },
            inventory: InventoryPolicy {
                low_stock_threshold: read(
                    &lookup,
                    ENV_LOW_STOCK_THRESHOLD,
                    defaults.inventory.low_stock_threshold,
                )?,
            },
            pagination: PaginationConfig {
                default_page_size: read(&lookup, ENV_DEFAULT_PAGE_SIZE, defaults.pagination.default_page_size)?,
                max_page_size: read(&lookup, ENV_MAX_PAGE_SIZE, defaults.pagination.max_page_size)?,
            },
        };

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.lockout.max_failed_attempts == 0 {
            return Err(ConfigError::Invalid {
                key: ENV_MAX_FAILED_LOGINS,
                reason: "must be at least 1".to_string(),
            });
        }
        if self.pagination.default_page_size == 0 {
            return Err(ConfigError::Invalid {
                key: ENV_DEFAULT_PAGE_SIZE,
                reason: "must be at least 1".to_string(),
            });
        }
        if self.pagination.default_page_size > self.pagination.max_page_size {
            return Err(ConfigError::Invalid {
                key: ENV_DEFAULT_PAGE_SIZE,
                reason: format!("must not exceed {ENV_MAX_PAGE_SIZE} ({})", self.pagination.max_page_size),
            });
        }
        Ok(())
    }
}

fn read<F, T>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        None => Ok(default),
        Some(raw) => raw.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
            key,
            reason: format!("'{raw}': {e}"),
        }),
    }
}

/// Errors that can occur during configuration loading
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid {key} value: {reason}")]
    Invalid { key: &'static str, reason: String },
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = CoreConfig::from_lookup(|_| None).unwrap();
        assert_eq!(config, CoreConfig::default());
        assert_eq!(config.lockout.max_failed_attempts, 5);
        assert_eq!(config.lockout.lockout_duration(), Duration::minutes(15));
        assert_eq!(config.inventory.low_stock_threshold, 5);
        assert_eq!(config.pagination.default_page_size, 12);
        assert_eq!(config.pagination.max_page_size, 100);
    }

    #[test]
    fn test_overrides() {
        let config = CoreConfig::from_lookup(lookup_from(&[
            (ENV_MAX_FAILED_LOGINS, "3"),
            (ENV_LOCKOUT_MINUTES, " 60 "),
            (ENV_LOW_STOCK_THRESHOLD, "10"),
            (ENV_DEFAULT_PAGE_SIZE, "20"),
            (ENV_MAX_PAGE_SIZE, "50"),
        ]))
        .unwrap();

        assert_eq!(config.lockout.max_failed_attempts, 3);
        assert_eq!(config.lockout.lockout_minutes, 60);
        assert_eq!(config.inventory.low_stock_threshold, 10);
        assert_eq!(config.pagination.default_page_size, 20);
        assert_eq!(config.pagination.max_page_size, 50);
    }

    #[test]
    fn test_rejects_unparseable_value() {
        let err = CoreConfig::from_lookup(lookup_from(&[(ENV_LOCKOUT_MINUTES, "soon")])).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key, .. } if key == ENV_LOCKOUT_MINUTES));
    }

    #[test]
    fn test_rejects_zero_attempts() {
        assert!(CoreConfig::from_lookup(lookup_from(&[(ENV_MAX_FAILED_LOGINS, "0")])).is_err());
    }

    #[test]
    fn test_rejects_default_page_size_above_max() {
        let err = CoreConfig::from_lookup(lookup_from(&[(ENV_DEFAULT_PAGE_SIZE, "200")])).unwrap_err();
        assert!(err.to_string().contains(ENV_DEFAULT_PAGE_SIZE));
    }
}
