use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

/// Environment variable that overrides `api_key` from the config file.
pub const API_KEY_ENV: &str = "PEXELS_API_KEY";

/// HTTP timeouts (optional `[http]` section in config.toml).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    /// Connect timeout per candidate attempt, in seconds.
    pub connect_timeout_secs: u64,
    /// Total timeout per API request, in seconds.
    pub timeout_secs: u64,
    /// Total timeout for a media download, in seconds.
    pub download_timeout_secs: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            connect_timeout_secs: 15,
            timeout_secs: 30,
            download_timeout_secs: 600,
        }
    }
}

impl HttpConfig {
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn download_timeout(&self) -> Duration {
        Duration::from_secs(self.download_timeout_secs)
    }
}

/// Global configuration loaded from `~/.config/pixelpro/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PixelProConfig {
    /// Base URL of the stock-media API.
    pub base_url: String,
    /// Value sent in the `Authorization` header. `PEXELS_API_KEY` wins when set.
    #[serde(default)]
    pub api_key: Option<String>,
    /// Origin the client runs on. Local origins call the API directly; others go through relays.
    pub origin: String,
    /// Relay URL templates in priority order; `{url}` is replaced by the encoded target.
    pub relays: Vec<String>,
    /// Results requested per page.
    pub per_page: u32,
    /// Number of related items fetched for the detail view.
    pub related_count: u32,
    /// Search term used when the session starts.
    pub default_query: String,
    /// Where downloads are written (None = current directory).
    #[serde(default)]
    pub download_dir: Option<PathBuf>,
    #[serde(default)]
    pub http: HttpConfig,
}

impl Default for PixelProConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.pexels.com".to_string(),
            api_key: None,
            origin: "http://localhost".to_string(),
            relays: vec![
                "https://corsproxy.io/?url={url}".to_string(),
                "https://api.allorigins.win/raw?url={url}".to_string(),
                "https://api.codetabs.com/v1/proxy?quest={url}".to_string(),
            ],
            per_page: 15,
            related_count: 6,
            default_query: "India".to_string(),
            download_dir: None,
            http: HttpConfig::default(),
        }
    }
}

impl PixelProConfig {
    /// API key from the environment, falling back to the config file.
    pub fn resolved_api_key(&self) -> Option<String> {
        std::env::var(API_KEY_ENV)
            .ok()
            .filter(|k| !k.trim().is_empty())
            .or_else(|| self.api_key.clone().filter(|k| !k.trim().is_empty()))
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("pixelpro")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<PixelProConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = PixelProConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(&path)?;
    let cfg: PixelProConfig = toml::from_str(&data)?;
    Ok(cfg)
}
