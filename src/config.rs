use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::fs;
use anyhow::{Context, Result};

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub map: MapConfig,
    pub dashboard: DashboardConfig,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ServerConfig {
    pub host: [u8; 4],
    pub port: u16,
    pub static_dir: Option<PathBuf>, // Served as fallback when set
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: [127, 0, 0, 1],
            port: 8050,
            static_dir: None,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct MapConfig {
    pub title: String,
    pub style: String, // Mapbox style name
    pub zoom: f64,
    pub height: u32,
    pub center: CenterConfig, // Used when no point is left after filtering
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            title: "Map of Mexico".to_string(),
            style: "open-street-map".to_string(),
            zoom: 4.0,
            height: 600,
            center: CenterConfig::default(),
        }
    }
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq)]
pub struct CenterConfig {
    pub lat: f64,
    pub lon: f64,
}

impl Default for CenterConfig {
    fn default() -> Self {
        Self { lat: 23.6345, lon: -102.5528 }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct DashboardConfig {
    pub title: String,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self { title: "ExtractivismoMx".to_string() }
    }
}

impl AppConfig {
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;
        let config: AppConfig = toml::from_str(&content)
            .with_context(|| "Failed to parse TOML configuration")?;
        Ok(config)
    }

    /// Like `load_from_file`, but a missing file yields the defaults.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load_from_file(path)
        } else {
            tracing::info!("No config file at {:?}, using defaults", path);
            Ok(Self::default())
        }
    }
}
