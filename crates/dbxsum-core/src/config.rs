use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use crate::content_hash::DEFAULT_READ_CHUNK;

/// Environment variable consulted for the access token before the config file.
pub const TOKEN_ENV: &str = "DBXSUM_ACCESS_TOKEN";

/// Global configuration loaded from `~/.config/dbxsum/config.toml`.
#[derive(Clone, Serialize, Deserialize)]
pub struct DbxsumConfig {
    /// Read size when hashing local files. Affects speed only, never the digest.
    pub read_chunk_size: usize,
    /// Base URL of the content endpoints.
    pub content_url: String,
    /// Bearer token for content endpoints. Prefer the environment variable.
    #[serde(default)]
    pub access_token: Option<String>,
    pub connect_timeout_secs: u64,
    /// Whole-transfer timeout for downloads.
    pub timeout_secs: u64,
}

impl Default for DbxsumConfig {
    fn default() -> Self {
        Self {
            read_chunk_size: DEFAULT_READ_CHUNK,
            content_url: "https://content.dropboxapi.com/".to_string(),
            access_token: None,
            connect_timeout_secs: 15,
            timeout_secs: 3600,
        }
    }
}

/// Prints the token as `<redacted>` so the config can be logged.
impl fmt::Debug for DbxsumConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DbxsumConfig")
            .field("read_chunk_size", &self.read_chunk_size)
            .field("content_url", &self.content_url)
            .field("access_token", &self.access_token.as_ref().map(|_| "<redacted>"))
            .field("connect_timeout_secs", &self.connect_timeout_secs)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl DbxsumConfig {
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Token precedence: explicit flag, then `DBXSUM_ACCESS_TOKEN`, then the config file.
    pub fn resolve_token(&self, flag: Option<&str>) -> Option<String> {
        pick_token(
            flag,
            std::env::var(TOKEN_ENV).ok().as_deref(),
            self.access_token.as_deref(),
        )
    }
}

fn pick_token(flag: Option<&str>, env: Option<&str>, file: Option<&str>) -> Option<String> {
    [flag, env, file]
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|t| !t.is_empty())
        .map(str::to_string)
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("dbxsum")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<DbxsumConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = DbxsumConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(&path)?;
    let cfg: DbxsumConfig = toml::from_str(&data)?;
    Ok(cfg)
}
