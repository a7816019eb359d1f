//! Application configuration: a RON file, overridden by command-line flags.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::Parser;
use log::LevelFilter;
use rag_logging::{rag_info, LogDestination, DEFAULT_LOG_FILE};
use ragdemo_core::{ChatOptions, ChatSession, DEFAULT_USER_ID};
use ragdemo_engine::ClientSettings;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const DEFAULT_CONFIG_FILE: &str = "ragdemo.ron";

#[derive(Debug, Parser)]
#[command(name = "ragdemo", about = "Terminal front-end for the RAG demo API")]
pub struct Cli {
    /// Path to the RON configuration file. A missing file means defaults.
    #[arg(long, default_value = DEFAULT_CONFIG_FILE)]
    pub config: PathBuf,
    /// Base URL of the RAG API, e.g. http://localhost:8000
    #[arg(long)]
    pub base_url: Option<String>,
    /// User id sent with chat and upload requests.
    #[arg(long)]
    pub user_id: Option<String>,
    /// Log level: off, error, warn, info, debug, trace.
    #[arg(long)]
    pub log_level: Option<String>,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path:?}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse config {path:?}: {source}")]
    Parse {
        path: PathBuf,
        source: ron::error::SpannedError,
    },
    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub base_url: String,
    pub user_id: String,
    /// Fixed session id; a fresh one is generated per run when absent.
    pub session_id: Option<String>,
    pub system_prompt: Option<String>,
    pub temperature: Option<f32>,
    pub connect_timeout_secs: u64,
    pub request_timeout_secs: u64,
    pub health_interval_secs: u64,
    pub contact_recipient: String,
    pub log_level: String,
    pub log_destination: String,
    pub log_file: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        let client = ClientSettings::default();
        Self {
            base_url: client.base_url,
            user_id: DEFAULT_USER_ID.to_string(),
            session_id: None,
            system_prompt: None,
            temperature: None,
            connect_timeout_secs: client.connect_timeout.as_secs(),
            request_timeout_secs: client.request_timeout.as_secs(),
            health_interval_secs: 30,
            contact_recipient: "contact@example.com".to_string(),
            log_level: "info".to_string(),
            log_destination: "file".to_string(),
            log_file: PathBuf::from(DEFAULT_LOG_FILE),
        }
    }
}

impl AppConfig {
    pub fn client_settings(&self) -> ClientSettings {
        ClientSettings {
            base_url: self.base_url.clone(),
            connect_timeout: Duration::from_secs(self.connect_timeout_secs),
            request_timeout: Duration::from_secs(self.request_timeout_secs),
            ..ClientSettings::default()
        }
    }

    pub fn chat_session(&self) -> ChatSession {
        let session_id = self
            .session_id
            .clone()
            .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());
        ChatSession {
            session_id,
            user_id: self.user_id.clone(),
            options: ChatOptions {
                system_prompt: self.system_prompt.clone(),
                temperature: self.temperature,
            },
        }
    }

    pub fn health_interval(&self) -> Duration {
        Duration::from_secs(self.health_interval_secs)
    }

    pub fn level_filter(&self) -> Result<LevelFilter, ConfigError> {
        rag_logging::parse_level(&self.log_level)
            .ok_or_else(|| ConfigError::Invalid(format!("unknown log level {:?}", self.log_level)))
    }

    pub fn destination(&self) -> Result<LogDestination, ConfigError> {
        LogDestination::parse(&self.log_destination).ok_or_else(|| {
            ConfigError::Invalid(format!(
                "unknown log destination {:?}",
                self.log_destination
            ))
        })
    }

    fn apply_overrides(&mut self, cli: &Cli) {
        if let Some(base_url) = &cli.base_url {
            self.base_url = base_url.clone();
        }
        if let Some(user_id) = &cli.user_id {
            self.user_id = user_id.clone();
        }
        if let Some(log_level) = &cli.log_level {
            self.log_level = log_level.clone();
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.base_url.trim().is_empty() {
            return Err(ConfigError::Invalid("base_url is empty".to_string()));
        }
        if self.user_id.trim().is_empty() {
            return Err(ConfigError::Invalid("user_id is empty".to_string()));
        }
        if let Some(temperature) = self.temperature {
            if !(0.0..=1.0).contains(&temperature) {
                return Err(ConfigError::Invalid(format!(
                    "temperature {temperature} outside 0..=1"
                )));
            }
        }
        if self.health_interval_secs == 0 {
            return Err(ConfigError::Invalid(
                "health_interval_secs must be positive".to_string(),
            ));
        }
        self.level_filter()?;
        self.destination()?;
        Ok(())
    }
}

/// Reads the config file named by `cli`, applies flag overrides and validates.
pub fn load(cli: &Cli) -> Result<AppConfig, ConfigError> {
    let mut config = read_file(&cli.config)?;
    config.apply_overrides(cli);
    config.validate()?;
    Ok(config)
}

fn read_file(path: &Path) -> Result<AppConfig, ConfigError> {
    let content = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            return Ok(AppConfig::default());
        }
        Err(source) => {
            return Err(ConfigError::Read {
                path: path.to_path_buf(),
                source,
            })
        }
    };

    let config = ron::from_str(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    rag_info!("Loaded configuration from {:?}", path);
    Ok(config)
}
