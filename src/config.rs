// ⚙️ Server Configuration
// Loaded from environment variables with fallback to defaults

use std::env;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use crate::error::ConfigError;

// ============================================================================
// SERVER CONFIG
// ============================================================================

pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_MAX_BODY_BYTES: usize = 64 * 1024;

/// HTTP server configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Interface to bind
    pub host: IpAddr,

    /// TCP port to listen on
    pub port: u16,

    /// Largest accepted request body; bigger receipts are rejected as invalid
    pub max_body_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: DEFAULT_PORT,
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable source
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = ServerConfig::default();

        Ok(ServerConfig {
            host: parse_var(&lookup, "RECEIPT_POINTS_HOST", defaults.host)?,
            port: parse_var(&lookup, "RECEIPT_POINTS_PORT", defaults.port)?,
            max_body_bytes: parse_var(
                &lookup,
                "RECEIPT_POINTS_MAX_BODY_BYTES",
                defaults.max_body_bytes,
            )?,
        })
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

// ============================================================================
// HELPERS
// ============================================================================

fn parse_var<F, T>(lookup: &F, key: &str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(key) {
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue(key.to_string())),
        None => Ok(default),
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = ServerConfig::from_lookup(lookup_from(&[])).unwrap();

        assert_eq!(config, ServerConfig::default());
        assert_eq!(config.socket_addr().to_string(), "0.0.0.0:8080");
    }

    #[test]
    fn test_overrides() {
        let config = ServerConfig::from_lookup(lookup_from(&[
            ("RECEIPT_POINTS_HOST", "127.0.0.1"),
            ("RECEIPT_POINTS_PORT", "3000"),
            ("RECEIPT_POINTS_MAX_BODY_BYTES", "1024"),
        ]))
        .unwrap();

        assert_eq!(config.socket_addr().to_string(), "127.0.0.1:3000");
        assert_eq!(config.max_body_bytes, 1024);
    }

    #[test]
    fn test_invalid_port() {
        let err = ServerConfig::from_lookup(lookup_from(&[("RECEIPT_POINTS_PORT", "http")]))
            .unwrap_err();

        assert!(matches!(err, ConfigError::InvalidValue(ref key) if key == "RECEIPT_POINTS_PORT"));
    }

    #[test]
    fn test_invalid_host() {
        let result =
            ServerConfig::from_lookup(lookup_from(&[("RECEIPT_POINTS_HOST", "localhost")]));

        assert!(result.is_err());
    }
}
