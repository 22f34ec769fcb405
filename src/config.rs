//! Application configuration loaded from environment variables.

use std::env;
use std::path::PathBuf;

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Path of the JSON blob store file
    pub data_file: PathBuf,
    /// Standing zoom level for map view centering
    pub zoom: u8,
    /// Fixed position used by the console position source; unset means the
    /// geolocation-unavailable path is exercised.
    pub home_position: Option<(f64, f64)>,
}

impl Default for Config {
    /// Default config for testing only.
    fn default() -> Self {
        Self {
            data_file: PathBuf::from("waylog.json"),
            zoom: 13,
            home_position: Some((52.5, 13.4)),
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let data_file = env::var("WAYLOG_DATA_FILE")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("waylog.json"));

        let zoom = env::var("WAYLOG_ZOOM")
            .unwrap_or_else(|_| "13".to_string())
            .parse()
            .map_err(|_| ConfigError::Invalid("WAYLOG_ZOOM"))?;

        let home_position = match (env::var("WAYLOG_HOME_LAT"), env::var("WAYLOG_HOME_LNG")) {
            (Ok(lat), Ok(lng)) => {
                let lat = lat
                    .trim()
                    .parse()
                    .map_err(|_| ConfigError::Invalid("WAYLOG_HOME_LAT"))?;
                let lng = lng
                    .trim()
                    .parse()
                    .map_err(|_| ConfigError::Invalid("WAYLOG_HOME_LNG"))?;
                Some((lat, lng))
            }
            _ => None,
        };

        Ok(Self {
            data_file,
            zoom,
            home_position,
        })
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for environment variable: {0}")]
    Invalid(&'static str),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        env::remove_var("WAYLOG_DATA_FILE");
        env::remove_var("WAYLOG_ZOOM");
        env::remove_var("WAYLOG_HOME_LAT");
        env::remove_var("WAYLOG_HOME_LNG");

        let config = Config::from_env().expect("Config should load");
        assert_eq!(config.data_file, PathBuf::from("waylog.json"));
        assert_eq!(config.zoom, 13);
        assert_eq!(config.home_position, None);
    }
}
