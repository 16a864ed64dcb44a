use crate::ports::{AppConfig, ConfigError, ConfigResult, ConfigStore};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tokio::fs;

#[derive(Debug, Serialize, Deserialize)]
struct ConfigFile {
    bind_addr: Option<String>,
    base_url: Option<String>,
}

/// JSON config file under the user config dir. Missing file means
/// defaults; CLI flags and environment variables override whatever is
/// loaded here.
pub struct FileConfigStore {
    config_path: PathBuf,
}

impl FileConfigStore {
    pub fn new() -> ConfigResult<Self> {
        let config_dir = dirs::config_dir().ok_or_else(|| {
            ConfigError::ReadError("Cannot determine config directory".to_string())
        })?;

        Ok(Self {
            config_path: config_dir.join("taskboard").join("config.json"),
        })
    }

    /// Read and write a caller-chosen path instead of the user config dir.
    #[cfg(test)]
    pub fn with_path(config_path: PathBuf) -> Self {
        Self { config_path }
    }

    async fn ensure_config_dir(&self) -> ConfigResult<()> {
        if let Some(parent) = self.config_path.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| ConfigError::WriteError(e.to_string()))?;
        }
        Ok(())
    }
}

#[async_trait]
impl ConfigStore for FileConfigStore {
    async fn load_config(&self) -> ConfigResult<AppConfig> {
        let content = match fs::read_to_string(&self.config_path).await {
            Ok(content) => content,
            Err(_) => return Ok(AppConfig::default()),
        };

        let config_file: ConfigFile = serde_json::from_str(&content)
            .map_err(|e| ConfigError::InvalidFormat(e.to_string()))?;

        let defaults = AppConfig::default();
        Ok(AppConfig {
            bind_addr: config_file.bind_addr.unwrap_or(defaults.bind_addr),
            base_url: config_file.base_url.unwrap_or(defaults.base_url),
        })
    }

    async fn save_config(&self, config: &AppConfig) -> ConfigResult<()> {
        self.ensure_config_dir().await?;

        let config_file = ConfigFile {
            bind_addr: Some(config.bind_addr.clone()),
            base_url: Some(config.base_url.clone()),
        };

        let content = serde_json::to_string_pretty(&config_file)
            .map_err(|e| ConfigError::WriteError(e.to_string()))?;

        fs::write(&self.config_path, content)
            .await
            .map_err(|e| ConfigError::WriteError(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn missing_file_loads_defaults() {
        let dir = std::env::temp_dir().join(format!("taskboard-test-{}", uuid::Uuid::new_v4()));
        let store = FileConfigStore::with_path(dir.join("config.json"));

        assert_eq!(store.load_config().await.unwrap(), AppConfig::default());
    }

    #[tokio::test]
    async fn save_then_load_round_trips() {
        let dir = std::env::temp_dir().join(format!("taskboard-test-{}", uuid::Uuid::new_v4()));
        let store = FileConfigStore::with_path(dir.join("config.json"));

        let config = AppConfig {
            bind_addr: "0.0.0.0:8080".to_string(),
            base_url: "https://tasks.example.com".to_string(),
        };
        store.save_config(&config).await.unwrap();
        assert_eq!(store.load_config().await.unwrap(), config);

        let _ = tokio::fs::remove_dir_all(&dir).await;
    }
}
