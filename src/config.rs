use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// File extensions accepted for uploads, lowercase.
pub const ALLOWED_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif"];

pub fn allowed_file(filename: &str) -> bool {
    filename
        .rsplit_once('.')
        .is_some_and(|(_, ext)| ALLOWED_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub render: RenderConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    /// Address the HTTP service binds to
    #[serde(default = "default_listen")]
    pub listen: String,

    /// Upload size cap in bytes
    #[serde(default = "default_max_upload_bytes")]
    pub max_upload_bytes: usize,

    /// Root for per-request working directories and finished archives
    #[serde(default = "default_temp_dir")]
    pub temp_dir: PathBuf,

    /// How often the stale-artifact sweep runs
    #[serde(default = "default_sweep_interval_secs")]
    pub sweep_interval_secs: u64,

    /// Age at which working directories and archives are swept
    #[serde(default = "default_stale_after_secs")]
    pub stale_after_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen: default_listen(),
            max_upload_bytes: default_max_upload_bytes(),
            temp_dir: default_temp_dir(),
            sweep_interval_secs: default_sweep_interval_secs(),
            stale_after_secs: default_stale_after_secs(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RenderConfig {
    /// Side length of the canonical square every upload is normalized to
    #[serde(default = "default_base_resolution")]
    pub base_resolution: u32,

    /// Application name written into manifest.json
    #[serde(default = "default_app_name")]
    pub app_name: String,

    /// TileColor written into browserconfig.xml
    #[serde(default = "default_tile_color")]
    pub tile_color: String,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            base_resolution: default_base_resolution(),
            app_name: default_app_name(),
            tile_color: default_tile_color(),
        }
    }
}

fn default_listen() -> String {
    "127.0.0.1:8080".to_string()
}

fn default_max_upload_bytes() -> usize {
    10 * 1024 * 1024
}

fn default_temp_dir() -> PathBuf {
    PathBuf::from("temp")
}

fn default_sweep_interval_secs() -> u64 {
    900
}

fn default_stale_after_secs() -> u64 {
    3600
}

fn default_base_resolution() -> u32 {
    1024
}

fn default_app_name() -> String {
    "Generated App".to_string()
}

fn default_tile_color() -> String {
    "#ffffff".to_string()
}

impl Config {
    /// Load config from `path`, falling back to defaults when the file is
    /// missing so the binary runs unconfigured.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        Ok(config)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        Ok(())
    }

    pub fn default_template() -> String {
        r##"# iconsmith configuration

[server]
listen = "127.0.0.1:8080"    # Address the HTTP service binds to
max_upload_bytes = 10485760  # Upload size cap (10 MB)
temp_dir = "temp"            # Per-request working directories and archives
sweep_interval_secs = 900    # How often stale artifacts are swept
stale_after_secs = 3600      # Age at which artifacts are swept

[render]
base_resolution = 1024       # Canonical square size uploads are normalized to
app_name = "Generated App"   # Name written into manifest.json
tile_color = "#ffffff"       # TileColor written into browserconfig.xml
"##
        .to_string()
    }
}
