use std::str::FromStr;
use std::time::Duration;

use anyhow::{anyhow, Context, Result};

use crate::layout::Locale;

/// Application configuration loaded from environment variables.
/// Every variable has a default; malformed values fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    pub resize_debounce: Duration,
    pub transparency_threshold: u8,
    pub max_image_bytes: usize,
    pub max_image_pixels: u64,
    pub default_locale: Locale,
    pub image_fetch_timeout: Duration,
    /// View sessions untouched for this long are dropped.
    pub session_idle_ttl: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            port: 8080,
            rust_log: "info".to_string(),
            resize_debounce: Duration::from_millis(150),
            transparency_threshold: 30,
            max_image_bytes: 5 * 1024 * 1024,
            max_image_pixels: 16_000_000,
            default_locale: Locale::Sv,
            image_fetch_timeout: Duration::from_secs(10),
            session_idle_ttl: Duration::from_secs(30 * 60),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let defaults = Config::default();
        let locale = match std::env::var("DEFAULT_LOCALE") {
            Ok(raw) => Locale::parse(&raw)
                .ok_or_else(|| anyhow!("DEFAULT_LOCALE must be 'sv' or 'en', got '{raw}'"))?,
            Err(_) => defaults.default_locale,
        };

        Ok(Config {
            port: parse_env("PORT", defaults.port)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or(defaults.rust_log),
            resize_debounce: Duration::from_millis(parse_env("RESIZE_DEBOUNCE_MS", 150u64)?),
            transparency_threshold: parse_env(
                "TRANSPARENCY_THRESHOLD",
                defaults.transparency_threshold,
            )?,
            max_image_bytes: parse_env("MAX_IMAGE_BYTES", defaults.max_image_bytes)?,
            max_image_pixels: parse_env("MAX_IMAGE_PIXELS", defaults.max_image_pixels)?,
            default_locale: locale,
            image_fetch_timeout: Duration::from_secs(parse_env("IMAGE_FETCH_TIMEOUT_SECS", 10u64)?),
            session_idle_ttl: Duration::from_secs(parse_env("SESSION_IDLE_TTL_SECS", 1800u64)?),
        })
    }
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("Environment variable '{key}' has invalid value '{raw}'")),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.port, 8080);
        assert_eq!(config.transparency_threshold, 30);
        assert_eq!(config.resize_debounce, Duration::from_millis(150));
        assert_eq!(config.max_image_bytes, 5 * 1024 * 1024);
        assert_eq!(config.default_locale, Locale::Sv);
        assert_eq!(config.session_idle_ttl, Duration::from_secs(1800));
    }

    #[test]
    fn test_parse_env_missing_uses_default() {
        let value: u16 = parse_env("CVRENDER_TEST_UNSET_VARIABLE", 42).unwrap();
        assert_eq!(value, 42);
    }
}
