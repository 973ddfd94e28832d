//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All optional:
//! - `VERDE_HOST` - Bind address (default: 127.0.0.1)
//! - `VERDE_PORT` - Listen port (default: 3000)
//! - `VERDE_CATALOG_PATH` - Product catalog JSON (default: crates/storefront/data/products.json)
//! - `VERDE_STATE_DIR` - Directory for persisted shopper/admin state (default: .verde-state)
//! - `VERDE_ADMIN_PASSWORD` - Admin console password (default: admin123)
//! - `VERDE_SHIPPING_THRESHOLD` - Subtotal for free shipping (default: 999)
//! - `VERDE_SHIPPING_COST` - Flat shipping fee below the threshold (default: 99)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment tag

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use rust_decimal::Decimal;
use secrecy::SecretString;
use thiserror::Error;
use verde_core::PricingPolicy;

const DEFAULT_CATALOG_PATH: &str = "crates/storefront/data/products.json";
const DEFAULT_STATE_DIR: &str = ".verde-state";
const DEFAULT_ADMIN_PASSWORD: &str = "admin123";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Product catalog JSON file
    pub catalog_path: PathBuf,
    /// Directory holding persisted state blobs
    pub state_dir: PathBuf,
    /// Password that unlocks the admin console
    pub admin_password: SecretString,
    /// Shipping and promotion rules
    pub pricing: PricingPolicy,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment tag (e.g. "production")
    pub sentry_environment: Option<String>,
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::from([127, 0, 0, 1]),
            port: 3000,
            catalog_path: PathBuf::from(DEFAULT_CATALOG_PATH),
            state_dir: PathBuf::from(DEFAULT_STATE_DIR),
            admin_password: SecretString::from(DEFAULT_ADMIN_PASSWORD),
            pricing: PricingPolicy::default(),
            sentry_dsn: None,
            sentry_environment: None,
        }
    }
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set but cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidEnvVar` for unparseable values.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let host = parse_or(&lookup, "VERDE_HOST", defaults.host)?;
        let port = parse_or(&lookup, "VERDE_PORT", defaults.port)?;
        let catalog_path = lookup("VERDE_CATALOG_PATH").map_or(defaults.catalog_path, PathBuf::from);
        let state_dir = lookup("VERDE_STATE_DIR").map_or(defaults.state_dir, PathBuf::from);
        let admin_password = match lookup("VERDE_ADMIN_PASSWORD") {
            Some(value) if value.is_empty() => {
                return Err(ConfigError::InvalidEnvVar(
                    "VERDE_ADMIN_PASSWORD".to_string(),
                    "must not be empty".to_string(),
                ));
            }
            Some(value) => SecretString::from(value),
            None => defaults.admin_password,
        };

        let pricing = PricingPolicy {
            shipping_threshold: parse_decimal_or(
                &lookup,
                "VERDE_SHIPPING_THRESHOLD",
                defaults.pricing.shipping_threshold,
            )?,
            shipping_cost: parse_decimal_or(
                &lookup,
                "VERDE_SHIPPING_COST",
                defaults.pricing.shipping_cost,
            )?,
            ..defaults.pricing
        };

        Ok(Self {
            host,
            port,
            catalog_path,
            state_dir,
            admin_password,
            pricing,
            sentry_dsn: lookup("SENTRY_DSN").filter(|dsn| !dsn.is_empty()),
            sentry_environment: lookup("SENTRY_ENVIRONMENT"),
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Parse a variable if set, otherwise use `default`.
fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    lookup(key).map_or(Ok(default), |value| {
        value
            .trim()
            .parse::<T>()
            .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
    })
}

/// Parse a non-negative decimal amount.
fn parse_decimal_or<F>(lookup: &F, key: &str, default: Decimal) -> Result<Decimal, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let value: Decimal = parse_or(lookup, key, default)?;
    if value.is_sign_negative() {
        return Err(ConfigError::InvalidEnvVar(
            key.to_string(),
            "must not be negative".to_string(),
        ));
    }
    Ok(value)
}
