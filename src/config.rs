use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;

use crate::error::SearchError;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub preferences_file: Option<PathBuf>,
}

/// Where the Anybox app listens. It only binds the loopback interface.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn base_url(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 6391,
            },
            preferences_file: None,
        }
    }
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenv::dotenv().ok();

        let mut config = Config::default();

        if let Ok(host) = env::var("ANYBOX_HOST") {
            config.server.host = host;
        }
        if let Ok(port) = env::var("ANYBOX_PORT") {
            config.server.port = port.parse()?;
        }
        if let Ok(path) = env::var("ANYBOX_PREFERENCES_FILE") {
            config.preferences_file = Some(PathBuf::from(path));
        }

        Ok(config)
    }
}

/// User preferences as configured for the extension.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preferences {
    #[serde(default)]
    pub api_key: String,
    #[serde(default)]
    pub use_pinyin: bool,
    #[serde(default)]
    pub search_tags: bool,
    #[serde(default)]
    pub search_link_descriptions: bool,
}

/// Source of preferences, consulted once per search.
pub trait PreferencesProvider: Send + Sync {
    fn preferences(&self) -> Result<Preferences, SearchError>;
}

impl PreferencesProvider for Preferences {
    fn preferences(&self) -> Result<Preferences, SearchError> {
        Ok(self.clone())
    }
}

/// Reads preferences from an optional file overlaid with `ANYBOX_*`
/// environment variables. Nothing is cached between calls.
#[derive(Debug, Clone, Default)]
pub struct PreferenceStore {
    file: Option<PathBuf>,
    env_prefix: String,
}

impl PreferenceStore {
    pub fn new(file: Option<PathBuf>) -> Self {
        Self {
            file,
            env_prefix: "ANYBOX".to_string(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.preferences_file.clone())
    }

    pub fn with_env_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.env_prefix = prefix.into();
        self
    }
}

impl PreferencesProvider for PreferenceStore {
    fn preferences(&self) -> Result<Preferences, SearchError> {
        let mut builder = config::Config::builder();
        if let Some(path) = &self.file {
            builder = builder.add_source(config::File::from(path.as_path()).required(false));
        }
        // An empty API key is sent as is; Anybox answers 401 and the user
        // is told where to copy the key from.
        let preferences = builder
            .add_source(config::Environment::with_prefix(&self.env_prefix).try_parsing(true))
            .build()?
            .try_deserialize()?;
        Ok(preferences)
    }
}
