use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use anyhow::Result;

pub const DEFAULT_CONTAINER: &str = "conversation-references";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    pub data_directory: PathBuf,
    pub container: String,
    pub page_size_hint: Option<usize>,
    pub auto_create_directories: bool,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            data_directory: PathBuf::from("./data"),
            container: DEFAULT_CONTAINER.to_string(),
            page_size_hint: None,
            auto_create_directories: true,
        }
    }
}

impl StoreConfig {
    pub fn load_or_create(config_path: Option<&str>) -> Result<Self> {
        let config_file = config_path.unwrap_or("refstore.toml");

        if std::path::Path::new(config_file).exists() {
            let content = std::fs::read_to_string(config_file)?;
            let config: StoreConfig = toml::from_str(&content)?;
            Ok(config)
        } else {
            let config = Self::default();
            config.save(config_file)?;
            Ok(config)
        }
    }

    pub fn save(&self, config_path: &str) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    /// Directory holding the container's objects.
    pub fn container_path(&self) -> PathBuf {
        self.data_directory.join(&self.container)
    }

    pub fn ensure_directories(&self) -> Result<()> {
        if self.auto_create_directories && !self.data_directory.exists() {
            std::fs::create_dir_all(&self.data_directory)?;
            tracing::info!("Created data directory: {:?}", self.data_directory);
        }
        Ok(())
    }
}
