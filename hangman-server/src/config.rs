use std::env;
use std::str::FromStr;
use std::time::Duration;

use anyhow::{Context, Result};

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    pub player_profile_path: String,
    /// When set, won rounds are POSTed here instead of written to the database
    pub score_endpoint_url: Option<String>,
    pub tick_interval_ms: u64,
    pub session_idle_timeout_minutes: u64,
}

fn env_or<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(key) {
        Ok(value) => value
            .parse()
            .with_context(|| format!("Invalid {}: {:?}", key, value)),
        Err(_) => Ok(default),
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();

        let config = Self {
            host: env::var("HOST").unwrap_or(defaults.host),
            port: env_or("PORT", defaults.port)?,
            database_url: env::var("DATABASE_URL").unwrap_or(defaults.database_url),
            player_profile_path: env::var("PLAYER_PROFILE_PATH")
                .unwrap_or(defaults.player_profile_path),
            score_endpoint_url: env::var("SCORE_ENDPOINT_URL")
                .ok()
                .filter(|url| !url.trim().is_empty()),
            tick_interval_ms: env_or("TICK_INTERVAL_MS", defaults.tick_interval_ms)?,
            session_idle_timeout_minutes: env_or(
                "SESSION_IDLE_TIMEOUT_MINUTES",
                defaults.session_idle_timeout_minutes,
            )?,
        };

        if config.tick_interval_ms == 0 {
            anyhow::bail!("TICK_INTERVAL_MS must be greater than zero");
        }

        Ok(config)
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    pub fn session_idle_timeout(&self) -> Duration {
        Duration::from_secs(self.session_idle_timeout_minutes * 60)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            database_url: hangman_persistence::connection::DEFAULT_DATABASE_URL.to_string(),
            player_profile_path: hangman_persistence::profile::DEFAULT_PROFILE_PATH.to_string(),
            score_endpoint_url: None,
            tick_interval_ms: 1000,
            session_idle_timeout_minutes: 60,
        }
    }
}
