//! Configuration module
//!
//! Settings are read from the environment (optionally seeded from a `.env` file) with
//! defaults suitable for local development.

use std::env;
use std::path::PathBuf;

use chrono::Duration;

use crate::constants::{DEFAULT_ITEM_TTL_HOURS, MAX_ITEM_TTL_HOURS};

const SERVER_PORT: u16 = 8080;
const UPLOAD_DIR: &str = "./uploads";
const CLEANUP_INTERVAL_SECS: u64 = 300;
const MAX_UPLOAD_SIZE_MB: usize = 100;

/// Application configuration
#[derive(Clone, Debug)]
pub struct Config {
    pub server_port: u16,
    pub upload_dir: PathBuf,
    pub item_ttl_hours: i64,
    /// Interval between background sweeps of expired items. 0 = disabled.
    pub cleanup_interval_secs: u64,
    pub max_upload_size_bytes: usize,
    pub cors_origins: Vec<String>,
    pub environment: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_port: SERVER_PORT,
            upload_dir: PathBuf::from(UPLOAD_DIR),
            item_ttl_hours: DEFAULT_ITEM_TTL_HOURS,
            cleanup_interval_secs: CLEANUP_INTERVAL_SECS,
            max_upload_size_bytes: MAX_UPLOAD_SIZE_MB * 1024 * 1024,
            cors_origins: vec!["*".to_string()],
            environment: "development".to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();

        let environment = env::var("ENVIRONMENT")
            .or_else(|_| env::var("APP_ENV"))
            .unwrap_or_else(|_| "development".to_string());

        let cors_origins_str = env::var("CORS_ORIGINS").unwrap_or_else(|_| "*".to_string());
        let is_production =
            environment.to_lowercase() == "production" || environment.to_lowercase() == "prod";
        if is_production && cors_origins_str.trim() == "*" {
            return Err(anyhow::anyhow!(
                "CORS_ORIGINS cannot be '*' in production. Please specify explicit origins."
            ));
        }

        let cors_origins: Vec<String> = cors_origins_str
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let server_port = env::var("SERVER_PORT")
            .or_else(|_| env::var("PORT"))
            .unwrap_or_else(|_| SERVER_PORT.to_string())
            .parse::<u16>()
            .map_err(|e| anyhow::anyhow!("SERVER_PORT must be a valid port number: {}", e))?;

        let upload_dir = env::var("UPLOAD_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(UPLOAD_DIR));

        let item_ttl_hours = env::var("ITEM_TTL_HOURS")
            .unwrap_or_else(|_| DEFAULT_ITEM_TTL_HOURS.to_string())
            .parse::<i64>()
            .map_err(|e| anyhow::anyhow!("ITEM_TTL_HOURS must be an integer: {}", e))?;

        let cleanup_interval_secs = env::var("CLEANUP_INTERVAL_SECS")
            .unwrap_or_else(|_| CLEANUP_INTERVAL_SECS.to_string())
            .parse::<u64>()
            .unwrap_or(CLEANUP_INTERVAL_SECS);

        let max_upload_size_mb = env::var("MAX_UPLOAD_SIZE_MB")
            .unwrap_or_else(|_| MAX_UPLOAD_SIZE_MB.to_string())
            .parse::<usize>()
            .unwrap_or(MAX_UPLOAD_SIZE_MB);

        let config = Config {
            server_port,
            upload_dir,
            item_ttl_hours,
            cleanup_interval_secs,
            max_upload_size_bytes: megabytes_to_bytes(max_upload_size_mb)?,
            cors_origins,
            environment,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.server_port == 0 {
            return Err(anyhow::anyhow!("SERVER_PORT must be greater than 0"));
        }

        if self.upload_dir.as_os_str().is_empty() {
            return Err(anyhow::anyhow!("UPLOAD_DIR must not be empty"));
        }

        if self.item_ttl_hours < 1 {
            return Err(anyhow::anyhow!("ITEM_TTL_HOURS must be at least 1"));
        }

        if self.item_ttl_hours > MAX_ITEM_TTL_HOURS {
            return Err(anyhow::anyhow!(
                "ITEM_TTL_HOURS must be at most {}",
                MAX_ITEM_TTL_HOURS
            ));
        }

        if self.max_upload_size_bytes == 0 {
            return Err(anyhow::anyhow!("MAX_UPLOAD_SIZE_MB must be greater than 0"));
        }

        Ok(())
    }

    /// Check if the application is running in production mode
    pub fn is_production(&self) -> bool {
        let env = self.environment.to_lowercase();
        env == "production" || env == "prod"
    }

    pub fn item_ttl(&self) -> Result<Duration, anyhow::Error> {
        Duration::try_hours(self.item_ttl_hours).ok_or_else(|| {
            anyhow::anyhow!("ITEM_TTL_HOURS is out of range: {}", self.item_ttl_hours)
        })
    }

    /// Background sweep interval, `None` when the sweep is disabled.
    pub fn cleanup_interval(&self) -> Option<std::time::Duration> {
        (self.cleanup_interval_secs > 0)
            .then(|| std::time::Duration::from_secs(self.cleanup_interval_secs))
    }
}

fn megabytes_to_bytes(mb: usize) -> Result<usize, anyhow::Error> {
    mb.checked_mul(1024 * 1024)
        .ok_or_else(|| anyhow::anyhow!("MAX_UPLOAD_SIZE_MB is too large: {}", mb))
}
