use std::path::{Path, PathBuf};

use anyhow::Result;
use serde::{Deserialize, Serialize};
use tokio::fs;
use tracing::{debug, info};

// Default configuration values
const DEFAULT_BASE_URL: &str = "http://localhost:8000/api/v1";
const DEFAULT_DATA_DIR: &str = ".aicourse";
const DEFAULT_PRODUCT_TITLE: &str = "AI Course Platform";
const DEFAULT_CONFIG_FILE: &str = "aicourse.config.json";

/// Main configuration struct for the client
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Backend API configuration
    #[serde(default)]
    pub api: ApiConfig,
    /// Durable storage configuration
    #[serde(default)]
    pub storage: StorageConfig,
    /// Shell configuration
    #[serde(default)]
    pub ui: UiConfig,
}

/// Backend API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL every request path is joined onto
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

/// Durable storage configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Directory holding the persisted session document
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
}

/// Shell configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Product name used as the page title fallback
    #[serde(default = "default_product_title")]
    pub product_title: String,
}

// Default functions
fn default_base_url() -> String {
    std::env::var("AICOURSE_API_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string())
}

fn default_data_dir() -> PathBuf {
    std::env::var("AICOURSE_DATA_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(DEFAULT_DATA_DIR))
}

fn default_product_title() -> String {
    std::env::var("AICOURSE_PRODUCT_TITLE").unwrap_or_else(|_| DEFAULT_PRODUCT_TITLE.to_string())
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api: ApiConfig::default(),
            storage: StorageConfig::default(),
            ui: UiConfig::default(),
        }
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
        }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            product_title: default_product_title(),
        }
    }
}

/// Load the client configuration, creating the default file on first run
pub async fn load_config() -> Result<ClientConfig> {
    let config_path = get_config_path();
    load_or_create_config(&config_path).await
}

/// Get the path to the configuration file
fn get_config_path() -> PathBuf {
    // Check for explicit config path from environment
    if let Ok(path) = std::env::var("AICOURSE_CONFIG_PATH") {
        return PathBuf::from(path);
    }

    // Fallback to current directory
    PathBuf::from(DEFAULT_CONFIG_FILE)
}

/// Load configuration from file or create default
async fn load_or_create_config(path: &Path) -> Result<ClientConfig> {
    // Check if file exists
    if !path.exists() {
        // Create default config
        let default_config = ClientConfig::default();
        save_config(path, &default_config).await?;
        info!("Created default configuration at {}", path.display());
        return Ok(default_config);
    }

    // Load existing config
    let config_str = fs::read_to_string(path).await?;
    let config: ClientConfig = serde_json::from_str(&config_str)?;
    debug!("Loaded configuration from {}", path.display());

    Ok(config)
}

/// Save configuration to file
pub async fn save_config(path: &Path, config: &ClientConfig) -> Result<()> {
    // Ensure parent directory exists
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).await?;
        }
    }

    // Serialize and write
    let config_str = serde_json::to_string_pretty(config)?;
    fs::write(path, config_str).await?;
    debug!("Saved configuration to {}", path.display());

    Ok(())
}
