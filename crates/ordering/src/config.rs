//! Ordering configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `PRONTO_DATABASE_URL` - `PostgreSQL` connection string (falls back to
//!   the generic `DATABASE_URL`)
//!
//! ## Optional
//! - `PRONTO_CART_IDLE_MINUTES` - Minutes of inactivity before a cart may
//!   be evicted (default: 30)
//! - `PRONTO_CART_SWEEP_INTERVAL_SECS` - Seconds between eviction sweeps
//!   (default: 60)
//! - `PRONTO_ORDER_MIN_DELIVERY_MINUTES` - Earliest delivery offset from
//!   order time (default: 60)
//! - `PRONTO_ORDER_DELIVERY_STEP_MINUTES` - Delivery slot granularity
//!   (default: 15)
//! - `PRONTO_LUNCH_START_HOUR` / `PRONTO_LUNCH_END_HOUR` - Lunch discount
//!   window, start inclusive, end exclusive (default: 11 / 15)
//! - `PRONTO_BIRTHDAY_WINDOW_DAYS` - Length of the birthday discount
//!   window starting today (default: 3)

use secrecy::SecretString;
use thiserror::Error;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Ordering backend configuration.
#[derive(Debug, Clone)]
pub struct OrderingConfig {
    /// `PostgreSQL` database connection URL (contains password)
    pub database_url: SecretString,
    /// Cart lifetime and eviction cadence
    pub carts: CartsConfig,
    /// Delivery-time validation rules
    pub orders: OrderConfig,
    /// Discount eligibility windows
    pub discounts: DiscountConfig,
}

/// Cart lifetime and eviction cadence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CartsConfig {
    /// Minutes of inactivity after which a cart becomes eligible for
    /// eviction.
    pub idle_after_minutes: i64,
    /// Seconds between eviction sweeps.
    pub sweep_interval_secs: u64,
}

impl Default for CartsConfig {
    fn default() -> Self {
        Self {
            idle_after_minutes: 30,
            sweep_interval_secs: 60,
        }
    }
}

/// Delivery-time validation rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderConfig {
    /// Minimum minutes between placing an order and its delivery time.
    pub min_delivery_minutes: i64,
    /// Delivery times must align to this many minutes past the earliest
    /// allowed time.
    pub delivery_time_step_minutes: i64,
}

impl Default for OrderConfig {
    fn default() -> Self {
        Self {
            min_delivery_minutes: 60,
            delivery_time_step_minutes: 15,
        }
    }
}

/// Discount eligibility windows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiscountConfig {
    /// First hour of the lunch window (inclusive).
    pub lunch_start_hour: u32,
    /// End hour of the lunch window (exclusive).
    pub lunch_end_hour: u32,
    /// Length of the birthday window starting today, in days.
    pub birthday_window_days: i64,
}

impl Default for DiscountConfig {
    fn default() -> Self {
        Self {
            lunch_start_hour: 11,
            lunch_end_hour: 15,
            birthday_window_days: 3,
        }
    }
}

impl OrderingConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or any
    /// variable fails to parse or validate.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let database_url = get_database_url("PRONTO_DATABASE_URL")?;
        let carts = CartsConfig::from_env()?;
        let orders = OrderConfig::from_env()?;
        let discounts = DiscountConfig::from_env()?;

        Ok(Self {
            database_url,
            carts,
            orders,
            discounts,
        })
    }
}

impl CartsConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let config = Self {
            idle_after_minutes: parse_env(
                "PRONTO_CART_IDLE_MINUTES",
                defaults.idle_after_minutes,
            )?,
            sweep_interval_secs: parse_env(
                "PRONTO_CART_SWEEP_INTERVAL_SECS",
                defaults.sweep_interval_secs,
            )?,
        };
        if config.idle_after_minutes < 1 {
            return Err(invalid(
                "PRONTO_CART_IDLE_MINUTES",
                "must be at least 1",
            ));
        }
        if config.sweep_interval_secs == 0 {
            return Err(invalid(
                "PRONTO_CART_SWEEP_INTERVAL_SECS",
                "must be at least 1",
            ));
        }
        Ok(config)
    }
}

impl OrderConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let config = Self {
            min_delivery_minutes: parse_env(
                "PRONTO_ORDER_MIN_DELIVERY_MINUTES",
                defaults.min_delivery_minutes,
            )?,
            delivery_time_step_minutes: parse_env(
                "PRONTO_ORDER_DELIVERY_STEP_MINUTES",
                defaults.delivery_time_step_minutes,
            )?,
        };
        if config.min_delivery_minutes < 0 {
            return Err(invalid(
                "PRONTO_ORDER_MIN_DELIVERY_MINUTES",
                "must not be negative",
            ));
        }
        if config.delivery_time_step_minutes < 1 {
            return Err(invalid(
                "PRONTO_ORDER_DELIVERY_STEP_MINUTES",
                "must be at least 1",
            ));
        }
        Ok(config)
    }
}

impl DiscountConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let config = Self {
            lunch_start_hour: parse_env("PRONTO_LUNCH_START_HOUR", defaults.lunch_start_hour)?,
            lunch_end_hour: parse_env("PRONTO_LUNCH_END_HOUR", defaults.lunch_end_hour)?,
            birthday_window_days: parse_env(
                "PRONTO_BIRTHDAY_WINDOW_DAYS",
                defaults.birthday_window_days,
            )?,
        };
        if config.lunch_end_hour > 24 {
            return Err(invalid("PRONTO_LUNCH_END_HOUR", "must be at most 24"));
        }
        if config.lunch_start_hour >= config.lunch_end_hour {
            return Err(invalid(
                "PRONTO_LUNCH_START_HOUR",
                "must be before PRONTO_LUNCH_END_HOUR",
            ));
        }
        if config.birthday_window_days < 1 {
            return Err(invalid(
                "PRONTO_BIRTHDAY_WINDOW_DAYS",
                "must be at least 1",
            ));
        }
        Ok(config)
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get database URL with fallback to generic `DATABASE_URL`.
fn get_database_url(primary_key: &str) -> Result<SecretString, ConfigError> {
    if let Ok(value) = std::env::var(primary_key) {
        return Ok(SecretString::from(value));
    }
    if let Ok(value) = std::env::var("DATABASE_URL") {
        return Ok(SecretString::from(value));
    }
    Err(ConfigError::MissingEnvVar(primary_key.to_string()))
}

/// Parse an environment variable, falling back to a default when unset.
fn parse_env<T: std::str::FromStr>(key: &str, default: T) -> Result<T, ConfigError>
where
    T::Err: std::fmt::Display,
{
    match std::env::var(key) {
        Ok(value) => value
            .parse()
            .map_err(|e: T::Err| ConfigError::InvalidEnvVar(key.to_string(), e.to_string())),
        Err(_) => Ok(default),
    }
}

fn invalid(key: &str, reason: &str) -> ConfigError {
    ConfigError::InvalidEnvVar(key.to_string(), reason.to_string())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_carts_defaults() {
        let config = CartsConfig::default();
        assert_eq!(config.idle_after_minutes, 30);
        assert_eq!(config.sweep_interval_secs, 60);
    }

    #[test]
    fn test_order_defaults() {
        let config = OrderConfig::default();
        assert_eq!(config.min_delivery_minutes, 60);
        assert_eq!(config.delivery_time_step_minutes, 15);
    }

    #[test]
    fn test_discount_defaults() {
        let config = DiscountConfig::default();
        assert_eq!(config.lunch_start_hour, 11);
        assert_eq!(config.lunch_end_hour, 15);
        assert_eq!(config.birthday_window_days, 3);
    }

    #[test]
    fn test_parse_env_uses_default_when_unset() {
        let value: i64 = parse_env("PRONTO_TEST_UNSET_VARIABLE", 42).unwrap();
        assert_eq!(value, 42);
    }
}
