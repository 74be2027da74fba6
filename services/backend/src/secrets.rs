// secrets
use std::env;
use std::path::PathBuf;

use thiserror::Error;
use tracing::info;

const DEFAULT_MONGODB_PORT: &str = "27017";
const DEFAULT_PORT: &str = "8000";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Missing MongoDB server in the MONGODB_SERVICE variable")]
    MissingService,
    #[error("Invalid PORT value: {0}")]
    InvalidPort(String),
}

/// Connection and listener settings resolved once at startup.
#[derive(Clone, Debug)]
pub struct Settings {
    pub mongodb_service: String,
    pub mongodb_username: Option<String>,
    pub mongodb_password: Option<String>,
    pub mongodb_port: String,
    pub port: u16,
    pub songs_data: PathBuf,
}

impl Settings {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.is_empty());

        let mongodb_service = var("MONGODB_SERVICE").ok_or(ConfigError::MissingService)?;
        let port_raw = var("PORT").unwrap_or_else(|| DEFAULT_PORT.to_string());
        let port = port_raw
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort(port_raw.clone()))?;

        let settings = Settings {
            mongodb_service,
            mongodb_username: var("MONGODB_USERNAME"),
            mongodb_password: var("MONGODB_PASSWORD"),
            mongodb_port: var("MONGODB_PORT").unwrap_or_else(|| DEFAULT_MONGODB_PORT.to_string()),
            port,
            songs_data: var("SONGS_DATA")
                .map(PathBuf::from)
                .unwrap_or_else(default_songs_data),
        };

        // Names only, never values
        let configured: Vec<&str> = [
            "MONGODB_SERVICE",
            "MONGODB_USERNAME",
            "MONGODB_PASSWORD",
            "MONGODB_PORT",
            "PORT",
            "SONGS_DATA",
        ]
        .into_iter()
        .filter(|key| var(*key).is_some())
        .collect();
        info!("Settings configured from environment: {:?}", configured);

        Ok(settings)
    }

    pub fn mongodb_url(&self) -> String {
        match (&self.mongodb_username, &self.mongodb_password) {
            (Some(username), Some(password)) => format!(
                "mongodb://{}:{}@{}:{}",
                urlencoding::encode(username),
                urlencoding::encode(password),
                self.mongodb_service,
                self.mongodb_port
            ),
            _ => format!("mongodb://{}:{}", self.mongodb_service, self.mongodb_port),
        }
    }
}

fn default_songs_data() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("data")
        .join("songs.json")
}
