//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All variables are optional; the defaults reproduce the stock shop.
//!
//! - `STOREFRONT_HOST` - Bind address (default: 127.0.0.1)
//! - `STOREFRONT_PORT` - Listen port (default: 3000)
//! - `STOREFRONT_DATA_DIR` - Directory holding the persisted catalog (default: data)
//! - `STOREFRONT_ADMIN_PASSWORD` - Admin mode password (default: plumpadmin)
//! - `STOREFRONT_ORDER_URL` - Instagram profile used for ordering
//! - `STOREFRONT_MAX_UPLOAD_BYTES` - Largest accepted product image (default: 5 MiB)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name
//!
//! The admin password only toggles the upload controls. It is shipped with the
//! storefront and is not an authentication mechanism.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;

use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;
use url::Url;

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_DATA_DIR: &str = "data";
pub const DEFAULT_ADMIN_PASSWORD: &str = "plumpadmin";
pub const DEFAULT_ORDER_URL: &str = "https://www.instagram.com/_plumpalicious/";
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 5 * 1024 * 1024;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront application configuration.
///
/// Implements `Debug` manually to redact the admin password.
#[derive(Clone)]
pub struct StorefrontConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Directory for the key-value store
    pub data_dir: PathBuf,
    /// Admin mode password
    pub admin_password: SecretString,
    /// Outbound ordering link shown on every product card
    pub order_url: String,
    /// Maximum accepted image upload size in bytes
    pub max_upload_bytes: usize,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment name
    pub sentry_environment: Option<String>,
}

impl std::fmt::Debug for StorefrontConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StorefrontConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("data_dir", &self.data_dir)
            .field("admin_password", &"[REDACTED]")
            .field("order_url", &self.order_url)
            .field("max_upload_bytes", &self.max_upload_bytes)
            .field("sentry_dsn", &self.sentry_dsn.as_ref().map(|_| "[REDACTED]"))
            .field("sentry_environment", &self.sentry_environment)
            .finish()
    }
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port: DEFAULT_PORT,
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            admin_password: SecretString::from(DEFAULT_ADMIN_PASSWORD),
            order_url: DEFAULT_ORDER_URL.to_string(),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
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
    /// Returns `ConfigError` if a variable is set but invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let defaults = Self::default();

        let host = get_optional_env("STOREFRONT_HOST")
            .map(|v| {
                v.parse::<IpAddr>().map_err(|e| {
                    ConfigError::InvalidEnvVar("STOREFRONT_HOST".to_string(), e.to_string())
                })
            })
            .transpose()?
            .unwrap_or(defaults.host);
        let port = get_optional_env("STOREFRONT_PORT")
            .map(|v| parse_port(&v))
            .transpose()?
            .unwrap_or(defaults.port);
        let data_dir = get_optional_env("STOREFRONT_DATA_DIR")
            .map_or(defaults.data_dir, PathBuf::from);
        let admin_password = get_optional_env("STOREFRONT_ADMIN_PASSWORD")
            .map(|v| validate_admin_password(SecretString::from(v)))
            .transpose()?
            .unwrap_or(defaults.admin_password);
        let order_url = get_optional_env("STOREFRONT_ORDER_URL")
            .map(|v| parse_order_url(&v))
            .transpose()?
            .unwrap_or(defaults.order_url);
        let max_upload_bytes = get_optional_env("STOREFRONT_MAX_UPLOAD_BYTES")
            .map(|v| parse_max_upload_bytes(&v))
            .transpose()?
            .unwrap_or(defaults.max_upload_bytes);

        Ok(Self {
            host,
            port,
            data_dir,
            admin_password,
            order_url,
            max_upload_bytes,
            sentry_dsn: get_optional_env("SENTRY_DSN"),
            sentry_environment: get_optional_env("SENTRY_ENVIRONMENT"),
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

/// Get an optional, non-empty environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.is_empty())
}

fn parse_port(value: &str) -> Result<u16, ConfigError> {
    value
        .parse::<u16>()
        .map_err(|e| ConfigError::InvalidEnvVar("STOREFRONT_PORT".to_string(), e.to_string()))
}

/// The order link must be an absolute http(s) URL.
fn parse_order_url(value: &str) -> Result<String, ConfigError> {
    let invalid =
        |reason: String| ConfigError::InvalidEnvVar("STOREFRONT_ORDER_URL".to_string(), reason);

    let url = Url::parse(value).map_err(|e| invalid(e.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid(format!("unsupported scheme '{}'", url.scheme())));
    }
    Ok(url.into())
}

fn parse_max_upload_bytes(value: &str) -> Result<usize, ConfigError> {
    let invalid = |reason: String| {
        ConfigError::InvalidEnvVar("STOREFRONT_MAX_UPLOAD_BYTES".to_string(), reason)
    };

    let bytes = value.parse::<usize>().map_err(|e| invalid(e.to_string()))?;
    if bytes == 0 {
        return Err(invalid("must be greater than zero".to_string()));
    }
    Ok(bytes)
}

fn validate_admin_password(secret: SecretString) -> Result<SecretString, ConfigError> {
    if secret.expose_secret().trim().is_empty() {
        return Err(ConfigError::InvalidEnvVar(
            "STOREFRONT_ADMIN_PASSWORD".to_string(),
            "must not be blank".to_string(),
        ));
    }
    Ok(secret)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = StorefrontConfig::default();
        assert_eq!(config.port, 3000);
        assert_eq!(config.admin_password.expose_secret(), "plumpadmin");
        assert_eq!(config.order_url, "https://www.instagram.com/_plumpalicious/");
        assert_eq!(config.max_upload_bytes, 5 * 1024 * 1024);
    }

    #[test]
    fn test_socket_addr() {
        let config = StorefrontConfig {
            host: "0.0.0.0".parse().unwrap(),
            port: 8080,
            ..StorefrontConfig::default()
        };

        let addr = config.socket_addr();
        assert_eq!(addr.ip().to_string(), "0.0.0.0");
        assert_eq!(addr.port(), 8080);
    }

    #[test]
    fn test_parse_port() {
        assert_eq!(parse_port("3001").unwrap(), 3001);
        assert!(parse_port("70000").is_err());
        assert!(parse_port("http").is_err());
    }

    #[test]
    fn test_parse_order_url() {
        assert_eq!(
            parse_order_url("https://www.instagram.com/_plumpalicious/").unwrap(),
            "https://www.instagram.com/_plumpalicious/"
        );
        assert!(parse_order_url("not a url").is_err());
        assert!(parse_order_url("javascript:alert(1)").is_err());
    }

    #[test]
    fn test_parse_max_upload_bytes() {
        assert_eq!(parse_max_upload_bytes("1024").unwrap(), 1024);
        assert!(parse_max_upload_bytes("0").is_err());
        assert!(parse_max_upload_bytes("-5").is_err());
    }

    #[test]
    fn test_blank_admin_password_rejected() {
        assert!(validate_admin_password(SecretString::from("   ")).is_err());
        assert!(validate_admin_password(SecretString::from("plumpadmin")).is_ok());
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let config = StorefrontConfig {
            admin_password: SecretString::from("super_secret_admin_pw"),
            sentry_dsn: Some("https://key@sentry.example/1".to_string()),
            ..StorefrontConfig::default()
        };

        let debug_output = format!("{config:?}");

        assert!(debug_output.contains("instagram.com"));
        assert!(debug_output.contains("[REDACTED]"));
        assert!(!debug_output.contains("super_secret_admin_pw"));
        assert!(!debug_output.contains("key@sentry"));
    }
}
