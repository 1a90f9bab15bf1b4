use std::{net::SocketAddr, time::Duration};

use anyhow::Context;

use crate::auth::decode_secret_key;

/// Output format of the tracing subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

pub struct Config {
    pub listen_addr: SocketAddr,
    pub db_path: String,
    pub cors_allow: Vec<String>,
    pub request_timeout: Duration,
    /// Raw HS256 key. `None` means a random key is generated at startup.
    pub jwt_secret: Option<Vec<u8>>,
    pub token_ttl: Duration,
    pub log_format: LogFormat,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listen_addr: SocketAddr::from(([0, 0, 0, 0], 8000)),
            db_path: "./db/finboard.db".to_string(),
            cors_allow: vec!["*".to_string()],
            request_timeout: Duration::from_millis(30_000),
            jwt_secret: None,
            token_ttl: Duration::from_secs(24 * 60 * 60),
            log_format: LogFormat::Text,
        }
    }
}

impl Config {
    /// Reads `FB_*` variables, loading a `.env` file first when present.
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let listen_addr = match lookup("FB_LISTEN_ADDR") {
            Some(raw) => raw
                .parse()
                .with_context(|| format!("Invalid FB_LISTEN_ADDR '{}'", raw))?,
            None => defaults.listen_addr,
        };
        let db_path = lookup("FB_DB_PATH").unwrap_or(defaults.db_path);
        let cors_allow = lookup("FB_CORS_ALLOW_ORIGINS")
            .unwrap_or_else(|| "*".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        let timeout_ms: u64 = match lookup("FB_REQUEST_TIMEOUT_MS") {
            Some(raw) => raw
                .parse()
                .with_context(|| format!("Invalid FB_REQUEST_TIMEOUT_MS '{}'", raw))?,
            None => 30_000,
        };
        let jwt_secret = lookup("FB_JWT_SECRET")
            .map(|raw| decode_secret_key(&raw))
            .transpose()?;
        let ttl_minutes: u64 = match lookup("FB_TOKEN_TTL_MINUTES") {
            Some(raw) => raw
                .parse()
                .with_context(|| format!("Invalid FB_TOKEN_TTL_MINUTES '{}'", raw))?,
            None => 24 * 60,
        };
        let log_format = match lookup("FB_LOG_FORMAT") {
            Some(raw) if raw.eq_ignore_ascii_case("json") => LogFormat::Json,
            _ => LogFormat::Text,
        };

        Ok(Self {
            listen_addr,
            db_path,
            cors_allow,
            request_timeout: Duration::from_millis(timeout_ms),
            jwt_secret,
            token_ttl: Duration::from_secs(ttl_minutes * 60),
            log_format,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use base64::{engine::general_purpose::STANDARD, Engine as _};
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn defaults_apply_when_nothing_is_set() {
        let config = Config::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config.listen_addr.port(), 8000);
        assert_eq!(config.db_path, "./db/finboard.db");
        assert_eq!(config.cors_allow, vec!["*".to_string()]);
        assert_eq!(config.request_timeout, Duration::from_secs(30));
        assert!(config.jwt_secret.is_none());
        assert_eq!(config.token_ttl, Duration::from_secs(86_400));
        assert_eq!(config.log_format, LogFormat::Text);
    }

    #[test]
    fn variables_override_defaults() {
        let secret = STANDARD.encode([7u8; 32]);
        let config = Config::from_lookup(lookup_from(&[
            ("FB_LISTEN_ADDR", "127.0.0.1:9100"),
            ("FB_CORS_ALLOW_ORIGINS", "http://a.test, http://b.test,"),
            ("FB_TOKEN_TTL_MINUTES", "15"),
            ("FB_REQUEST_TIMEOUT_MS", "2500"),
            ("FB_JWT_SECRET", secret.as_str()),
            ("FB_LOG_FORMAT", "JSON"),
        ]))
        .unwrap();
        assert_eq!(config.listen_addr.to_string(), "127.0.0.1:9100");
        assert_eq!(config.cors_allow, vec!["http://a.test", "http://b.test"]);
        assert_eq!(config.token_ttl, Duration::from_secs(900));
        assert_eq!(config.request_timeout, Duration::from_millis(2500));
        assert_eq!(config.jwt_secret.map(|k| k.len()), Some(32));
        assert_eq!(config.log_format, LogFormat::Json);
    }

    #[test]
    fn malformed_values_are_reported() {
        assert!(Config::from_lookup(lookup_from(&[("FB_LISTEN_ADDR", "nope")])).is_err());
        assert!(Config::from_lookup(lookup_from(&[("FB_JWT_SECRET", "short")])).is_err());
    }

    #[test]
    fn malformed_request_timeout_is_reported() {
        for raw in ["30s", "-1", ""] {
            let err = Config::from_lookup(lookup_from(&[("FB_REQUEST_TIMEOUT_MS", raw)]))
                .err()
                .unwrap();
            assert!(err.to_string().contains("FB_REQUEST_TIMEOUT_MS"));
        }
    }
}
