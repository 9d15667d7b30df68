//! Configuration module.
//!
//! Loads configuration from environment variables (and `.env`).

use std::env;
use std::time::Duration;

use anyhow::{Context, Result};

use crate::cache::CacheConfig;

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    // MongoDB
    pub mongodb_uri: String,
    pub mongodb_database: String,

    // Kiosk session
    pub kiosk_id: String,
    pub kiosk_title: String,

    // Caches
    pub raid_cache: CacheConfig,
    pub kiosk_cache: CacheConfig,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// # Errors
    /// Fails if `MONGODB_URI` is missing or a TTL isn't a whole number of seconds.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        Ok(Self {
            mongodb_uri: env::var("MONGODB_URI").context("MONGODB_URI must be set")?,
            mongodb_database: env::var("MONGODB_DATABASE")
                .unwrap_or_else(|_| "wizlib".to_string()),
            kiosk_id: env::var("KIOSK_ID").unwrap_or_else(|_| "local".to_string()),
            kiosk_title: env::var("KIOSK_TITLE").unwrap_or_else(|_| "Kiosk".to_string()),
            raid_cache: ttl_from_env("RAID_CACHE_TTL_SECS", CacheConfig::raids())?,
            kiosk_cache: ttl_from_env("KIOSK_CACHE_TTL_SECS", CacheConfig::kiosk())?,
        })
    }
}

/// Override a cache preset's TTL from `var`, if set.
fn ttl_from_env(var: &str, preset: CacheConfig) -> Result<CacheConfig> {
    match env::var(var) {
        Ok(raw) if !raw.trim().is_empty() => {
            let secs = parse_secs(&raw).with_context(|| format!("{var} must be a number of seconds"))?;
            Ok(preset.ttl(secs))
        }
        _ => Ok(preset),
    }
}

fn parse_secs(raw: &str) -> Result<Duration> {
    let secs: u64 = raw.trim().parse()?;
    Ok(Duration::from_secs(secs))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_secs() {
        assert_eq!(parse_secs("90").unwrap(), Duration::from_secs(90));
        assert_eq!(parse_secs(" 5 ").unwrap(), Duration::from_secs(5));
        assert!(parse_secs("5m").is_err());
        assert!(parse_secs("-1").is_err());
    }

    #[test]
    fn test_ttl_from_env_falls_back_to_preset() {
        let cfg = ttl_from_env("WIZLIB_TEST_UNSET_TTL_VAR", CacheConfig::kiosk()).unwrap();
        assert_eq!(cfg, CacheConfig::kiosk());
    }
}
