// src/environment.rs
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::info;

use crate::image_validator::MAX_PICTURE_BYTES;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnvironmentConfig {
    pub uploads_path: PathBuf,
    #[serde(default = "default_session_ttl")]
    pub session_ttl_minutes: i64,
    #[serde(default = "default_max_picture_bytes")]
    pub max_picture_bytes: u64,
    #[serde(default)]
    pub converter: ConverterConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConverterKind {
    /// Local HTML-to-PDF program reading stdin, writing stdout
    Command,
    /// HTTP conversion service
    Service,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConverterConfig {
    pub kind: ConverterKind,
    #[serde(default = "default_program")]
    pub program: String,
    /// Passed before the standard `--quiet --title <title> - -` arguments
    #[serde(default)]
    pub args: Vec<String>,
    #[serde(default = "default_service_url")]
    pub service_url: String,
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
}

impl Default for ConverterConfig {
    fn default() -> Self {
        Self {
            kind: ConverterKind::Command,
            program: default_program(),
            args: Vec::new(),
            service_url: default_service_url(),
            timeout_seconds: default_timeout(),
        }
    }
}

fn default_session_ttl() -> i64 {
    30
}

fn default_max_picture_bytes() -> u64 {
    MAX_PICTURE_BYTES
}

fn default_program() -> String {
    "wkhtmltopdf".to_string()
}

fn default_service_url() -> String {
    "http://127.0.0.1:3000".to_string()
}

fn default_timeout() -> u64 {
    60
}

#[derive(Debug, Deserialize)]
struct ConfigFile {
    local: EnvironmentConfig,
    production: EnvironmentConfig,
}

impl EnvironmentConfig {
    /// Load configuration based on environment
    pub fn load() -> Result<Self> {
        let environment = Self::get_environment();
        info!("Loading configuration for environment: {}", environment);

        Self::load_from_file(Path::new("config.yaml"), &environment)
    }

    fn get_environment() -> String {
        std::env::var("RESUME_ENV")
            .or_else(|_| std::env::var("ENVIRONMENT"))
            .or_else(|_| std::env::var("ENV"))
            .unwrap_or_else(|_| "local".to_string())
    }

    pub fn load_from_file(config_path: &Path, environment: &str) -> Result<Self> {
        if !config_path.exists() {
            anyhow::bail!(
                "{} not found. Server cannot start without configuration.",
                config_path.display()
            );
        }

        let config_content = std::fs::read_to_string(config_path)
            .with_context(|| format!("Failed to read {}", config_path.display()))?;

        Self::from_yaml(&config_content, environment)
    }

    pub fn from_yaml(content: &str, environment: &str) -> Result<Self> {
        let config_file: ConfigFile =
            serde_yaml::from_str(content).context("Failed to parse config.yaml")?;

        let env_config = match environment {
            "production" => config_file.production,
            _ => config_file.local,
        };

        if env_config.max_picture_bytes == 0 {
            anyhow::bail!("max_picture_bytes must be greater than zero");
        }
        if env_config.session_ttl_minutes <= 0 {
            anyhow::bail!("session_ttl_minutes must be greater than zero");
        }

        Ok(Self {
            uploads_path: Self::resolve_path(&env_config.uploads_path)?,
            ..env_config
        })
    }

    fn resolve_path(path: &Path) -> Result<PathBuf> {
        if path.is_absolute() {
            Ok(path.to_path_buf())
        } else {
            let current_dir = std::env::current_dir().context("Failed to get current directory")?;
            Ok(current_dir.join(path))
        }
    }

    pub fn session_ttl(&self) -> chrono::Duration {
        chrono::Duration::minutes(self.session_ttl_minutes)
    }

    /// Ensure the uploads directory exists
    pub async fn ensure_directories(&self) -> Result<()> {
        crate::core::FsOps::ensure_dir_exists(&self.uploads_path).await?;
        info!("All configured directories ensured to exist");
        Ok(())
    }
}
