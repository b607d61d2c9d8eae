// src/config.rs

use std::env;
use std::str::FromStr;

use dotenvy::dotenv;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub max_connections: u32,
    pub host: String,
    pub port: u16,
    pub log_dir: String,
    pub rust_log: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_url: "sqlite://mcq_exam.db".to_string(),
            max_connections: 5,
            host: "0.0.0.0".to_string(),
            port: 8000,
            log_dir: "logs".to_string(),
            rust_log: "info".to_string(),
        }
    }
}

/// Parses `raw`, falling back to `default` when unset or unparseable.
/// Unparseable values are reported through `warnings`.
fn parse_or_default<T: FromStr>(
    key: &str,
    raw: Option<String>,
    default: T,
    warnings: &mut Vec<String>,
) -> T {
    match raw {
        Some(raw) => raw.parse().unwrap_or_else(|_| {
            warnings.push(format!("Ignoring invalid {}={:?}", key, raw));
            default
        }),
        None => default,
    }
}

impl Config {
    /// Loads `.env` (if present) and the process environment.
    ///
    /// Returns the config with any ignored values described. Logging is not
    /// set up yet at this point, so the caller reports them.
    pub fn from_env() -> (Self, Vec<String>) {
        dotenv().ok();

        let defaults = Self::default();
        let mut warnings = Vec::new();

        let config = Self {
            database_url: env::var("DATABASE_URL").unwrap_or(defaults.database_url),
            max_connections: parse_or_default(
                "DB_MAX_CONNECTIONS",
                env::var("DB_MAX_CONNECTIONS").ok(),
                defaults.max_connections,
                &mut warnings,
            ),
            host: env::var("HOST").unwrap_or(defaults.host),
            port: parse_or_default("PORT", env::var("PORT").ok(), defaults.port, &mut warnings),
            log_dir: env::var("LOG_DIR").unwrap_or(defaults.log_dir),
            rust_log: env::var("RUST_LOG").unwrap_or(defaults.rust_log),
        };

        (config, warnings)
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.bind_address(), "0.0.0.0:8000");
        assert_eq!(config.max_connections, 5);
        assert!(config.database_url.starts_with("sqlite:"));
    }

    #[test]
    fn test_invalid_value_falls_back_with_warning() {
        let mut warnings = Vec::new();

        let port: u16 = parse_or_default("PORT", Some("eighty".into()), 8000, &mut warnings);
        assert_eq!(port, 8000);
        assert_eq!(warnings, vec![r#"Ignoring invalid PORT="eighty""#.to_string()]);

        let port: u16 = parse_or_default("PORT", Some("9000".into()), 8000, &mut warnings);
        let unset: u32 = parse_or_default("DB_MAX_CONNECTIONS", None, 5, &mut warnings);
        assert_eq!(port, 9000);
        assert_eq!(unset, 5);
        assert_eq!(warnings.len(), 1);
    }
}
