//! Process configuration, read once from the environment at startup.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use thiserror::Error;

pub const DEV_JWT_SECRET: &str = "dev-secret";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{name} is invalid: {reason}")]
    Invalid { name: &'static str, reason: String },
}

impl ConfigError {
    fn invalid(name: &'static str, reason: impl ToString) -> Self {
        Self::Invalid {
            name,
            reason: reason.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    pub bind_addr: IpAddr,
    pub port: u16,
    pub jwt_secret: String,
    /// Bearer-token lifetime.
    pub jwt_expires_in: chrono::Duration,
    pub bcrypt_cost: u32,
    /// AI endpoints answer 503 while this is unset.
    pub gemini_api_key: Option<String>,
    pub gemini_model: Option<String>,
    /// Overrides the Gemini endpoint (proxies, tests).
    pub gemini_base_url: Option<String>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            bind_addr: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: 3000,
            jwt_secret: DEV_JWT_SECRET.to_string(),
            jwt_expires_in: chrono::Duration::days(7),
            bcrypt_cost: winnerlens_auth::PasswordHasher::DEFAULT_COST,
            gemini_api_key: None,
            gemini_model: None,
            gemini_base_url: None,
        }
    }
}

impl ApiConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build from an arbitrary variable source; blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let var = |name: &str| lookup(name).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let defaults = Self::default();

        let bind_addr = match var("BIND_ADDR") {
            Some(v) => v.parse().map_err(|e| ConfigError::invalid("BIND_ADDR", e))?,
            None => defaults.bind_addr,
        };

        let port = match var("PORT") {
            Some(v) => v.parse().map_err(|e| ConfigError::invalid("PORT", e))?,
            None => defaults.port,
        };

        let jwt_secret = var("JWT_SECRET").unwrap_or_else(|| {
            tracing::warn!("JWT_SECRET not set; using insecure dev default");
            defaults.jwt_secret.clone()
        });

        let jwt_expires_in = match var("JWT_EXPIRES_IN") {
            Some(v) => {
                let std = humantime::parse_duration(&v).map_err(|e| ConfigError::invalid("JWT_EXPIRES_IN", e))?;
                let ttl = chrono::Duration::from_std(std).map_err(|e| ConfigError::invalid("JWT_EXPIRES_IN", e))?;
                if ttl <= chrono::Duration::zero() {
                    return Err(ConfigError::invalid("JWT_EXPIRES_IN", "must be positive"));
                }
                ttl
            }
            None => defaults.jwt_expires_in,
        };

        let bcrypt_cost = match var("BCRYPT_COST") {
            Some(v) => {
                let cost: u32 = v.parse().map_err(|e| ConfigError::invalid("BCRYPT_COST", e))?;
                if !(4..=31).contains(&cost) {
                    return Err(ConfigError::invalid("BCRYPT_COST", "must be between 4 and 31"));
                }
                cost
            }
            None => defaults.bcrypt_cost,
        };

        let gemini_api_key = var("GEMINI_API_KEY");
        if gemini_api_key.is_none() {
            tracing::warn!("GEMINI_API_KEY not set; AI features will be disabled");
        }

        Ok(Self {
            bind_addr,
            port,
            jwt_secret,
            jwt_expires_in,
            bcrypt_cost,
            gemini_api_key,
            gemini_model: var("GEMINI_MODEL"),
            gemini_base_url: var("GEMINI_BASE_URL"),
        })
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind_addr, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn from(vars: &[(&str, &str)]) -> Result<ApiConfig, ConfigError> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ApiConfig::from_lookup(|name| map.get(name).cloned())
    }

    #[test]
    fn defaults_when_nothing_is_set() {
        let config = from(&[]).unwrap();
        assert_eq!(config, ApiConfig::default());
        assert_eq!(config.socket_addr().to_string(), "0.0.0.0:3000");
    }

    #[test]
    fn reads_all_variables() {
        let config = from(&[
            ("BIND_ADDR", "127.0.0.1"),
            ("PORT", "8080"),
            ("JWT_SECRET", "s3cret"),
            ("JWT_EXPIRES_IN", "12h"),
            ("BCRYPT_COST", "12"),
            ("GEMINI_API_KEY", "key"),
            ("GEMINI_MODEL", "gemini-pro"),
            ("GEMINI_BASE_URL", "http://localhost:9999/v1beta"),
        ])
        .unwrap();

        assert_eq!(config.socket_addr().to_string(), "127.0.0.1:8080");
        assert_eq!(config.jwt_secret, "s3cret");
        assert_eq!(config.jwt_expires_in, chrono::Duration::hours(12));
        assert_eq!(config.bcrypt_cost, 12);
        assert_eq!(config.gemini_api_key.as_deref(), Some("key"));
        assert_eq!(config.gemini_model.as_deref(), Some("gemini-pro"));
        assert_eq!(config.gemini_base_url.as_deref(), Some("http://localhost:9999/v1beta"));
    }

    #[test]
    fn blank_values_count_as_unset() {
        let config = from(&[("GEMINI_API_KEY", "  "), ("PORT", "")]).unwrap();
        assert_eq!(config.gemini_api_key, None);
        assert_eq!(config.port, 3000);
    }

    #[test]
    fn rejects_malformed_values() {
        assert!(matches!(from(&[("PORT", "http")]), Err(ConfigError::Invalid { name: "PORT", .. })));
        assert!(matches!(
            from(&[("JWT_EXPIRES_IN", "soon")]),
            Err(ConfigError::Invalid { name: "JWT_EXPIRES_IN", .. })
        ));
        assert!(matches!(
            from(&[("BCRYPT_COST", "2")]),
            Err(ConfigError::Invalid { name: "BCRYPT_COST", .. })
        ));
    }
}
