// Global configuration management

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::engine::hardware::{
    DEFAULT_RENDER_NODE, DeviceNodes, NVIDIA_CONTROL_NODE, NVIDIA_DEVICE_NODE,
};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub devices: DevicesConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Where the detector looks for acceleration devices. The target policy
/// itself is fixed and not configurable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DevicesConfig {
    /// NVIDIA nodes; any one existing selects the NVIDIA tier
    #[serde(default = "default_nvidia_nodes")]
    pub nvidia_nodes: Vec<PathBuf>,

    /// VA-API render node, also passed to ffmpeg as the decode device
    #[serde(default = "default_render_node")]
    pub render_node: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// tracing filter used when RUST_LOG is unset
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Append every plan's trace here when set
    #[serde(default)]
    pub trace_file: Option<PathBuf>,
}

fn default_nvidia_nodes() -> Vec<PathBuf> {
    vec![
        PathBuf::from(NVIDIA_CONTROL_NODE),
        PathBuf::from(NVIDIA_DEVICE_NODE),
    ]
}

fn default_render_node() -> PathBuf {
    PathBuf::from(DEFAULT_RENDER_NODE)
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for DevicesConfig {
    fn default() -> Self {
        Self {
            nvidia_nodes: default_nvidia_nodes(),
            render_node: default_render_node(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            trace_file: None,
        }
    }
}

impl DevicesConfig {
    pub fn device_nodes(&self) -> DeviceNodes {
        DeviceNodes {
            nvidia: self.nvidia_nodes.clone(),
            render: self.render_node.clone(),
        }
    }
}

impl Config {
    /// Get the path to the config file
    pub fn config_path() -> Result<PathBuf> {
        let config_dir = if cfg!(target_os = "macos") {
            dirs::home_dir()
                .context("Could not determine home directory")?
                .join(".config")
                .join("letterbox720")
        } else {
            dirs::config_dir()
                .context("Could not determine config directory")?
                .join("letterbox720")
        };

        Ok(config_dir.join("config.toml"))
    }

    /// Load config from the default location, or built-in defaults if there is none
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;
        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            Ok(Config::default())
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Save config to the default location
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let contents = toml::to_string_pretty(self).context("Failed to serialize config")?;

        fs::write(path, contents)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Check if config file exists
    pub fn exists() -> bool {
        Self::config_path().map(|p| p.exists()).unwrap_or(false)
    }

    /// Create a default config file if it doesn't exist
    pub fn ensure_default() -> Result<()> {
        if !Self::exists() {
            let config = Config::default();
            config.save()?;
        }
        Ok(())
    }
}
