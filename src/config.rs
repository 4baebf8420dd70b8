use crate::domain::value_objects::IgnoreSet;
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct Config {
    pub listen_addr: String,
    pub db_path: String,
    /// Trusted header carrying the client address (e.g. X-Real-Ip)
    pub ip_header: Option<String>,
    pub ignore_headers: Vec<String>,
    /// Maximum cached records; 0 or less disables the cache
    pub cache_size: i64,
    pub debug: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listen_addr: "0.0.0.0:8082".to_string(),
            db_path: "GeoLite2-City.mmdb".to_string(),
            ip_header: None,
            ignore_headers: Vec::new(),
            cache_size: 1024,
            debug: false,
        }
    }
}

impl Config {
    /// Ignore set built from `ignore_headers`.
    pub fn ignore_set(&self) -> IgnoreSet {
        IgnoreSet::new(&self.ignore_headers)
    }

    /// Read a JSON configuration file.
    ///
    /// Keys missing from the file keep their defaults.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let data = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Read(path.to_path_buf(), e.to_string()))?;
        let file: FileConfig = serde_json::from_str(&data)
            .map_err(|e| ConfigError::Parse(path.to_path_buf(), e.to_string()))?;
        Ok(file.into_config(Self::default()))
    }
}

/// On-disk configuration layout.
#[derive(Debug, Default, Deserialize)]
struct FileConfig {
    host: Option<String>,
    port: Option<u16>,
    #[serde(default)]
    db: DbFile,
    ignore_headers: Option<Vec<String>>,
    ip_header: Option<String>,
    cache: Option<i64>,
    debug: Option<bool>,
}

#[derive(Debug, Default, Deserialize)]
struct DbFile {
    file: Option<String>,
}

impl FileConfig {
    fn into_config(self, mut cfg: Config) -> Config {
        if self.host.is_some() || self.port.is_some() {
            let host = self.host.unwrap_or_else(|| "0.0.0.0".to_string());
            let port = self.port.unwrap_or(8082);
            cfg.listen_addr = if host.contains(':') {
                format!("[{}]:{}", host, port)
            } else {
                format!("{}:{}", host, port)
            };
        }
        if let Some(file) = self.db.file {
            cfg.db_path = file;
        }
        if let Some(ignore) = self.ignore_headers {
            cfg.ignore_headers = ignore;
        }
        if let Some(header) = self.ip_header.filter(|h| !h.trim().is_empty()) {
            cfg.ip_header = Some(header);
        }
        if let Some(cache) = self.cache {
            cfg.cache_size = cache;
        }
        if let Some(debug) = self.debug {
            cfg.debug = debug;
        }
        cfg
    }
}

/// Configuration loading errors.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("cannot read config {0:?}: {1}")]
    Read(PathBuf, String),
    #[error("invalid config {0:?}: {1}")]
    Parse(PathBuf, String),
}

/// Load configuration from the process environment.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(|key| std::env::var(key).ok())
}

/// Load configuration using `var` to look up environment variables.
///
/// `IPINFO_CONFIG` names an optional JSON file read first; the other
/// variables override it. Unparsable numbers keep the previous value.
pub fn load_config_from<F>(var: F) -> Result<Config, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let mut cfg = match var("IPINFO_CONFIG") {
        Some(path) if !path.trim().is_empty() => Config::from_file(path.trim())?,
        _ => Config::default(),
    };

    if let Some(addr) = var("IPINFO_LISTEN_ADDR") {
        cfg.listen_addr = addr;
    }

    if let Some(path) = var("IPINFO_DB_PATH") {
        cfg.db_path = path;
    }

    if let Some(header) = var("IPINFO_IP_HEADER") {
        cfg.ip_header = Some(header).filter(|h| !h.trim().is_empty());
    }

    if let Some(list) = var("IPINFO_IGNORE_HEADERS") {
        cfg.ignore_headers = list
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
    }

    cfg.cache_size = var("IPINFO_CACHE_SIZE")
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(cfg.cache_size);

    if var("DEBUG").is_some() {
        cfg.debug = true;
    }

    Ok(cfg)
}
