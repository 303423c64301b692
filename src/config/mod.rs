use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::error;

const DEFAULT_PORT: u16 = 5000;

fn default_bind_address() -> String {
    "127.0.0.1".to_string()
}

/// Which store backend to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// SQLite file under the data directory (default).
    Sqlite,
    /// In-memory maps; data is lost on restart.
    Memory,
}

impl std::str::FromStr for StorageBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "sqlite" => Ok(Self::Sqlite),
            "memory" => Ok(Self::Memory),
            other => Err(format!("unknown storage backend: {other}")),
        }
    }
}

/// `{data_dir}/config.toml` — all fields are optional overrides.
/// Priority: CLI / env var  >  TOML  >  built-in default.
#[derive(Deserialize, Default)]
struct TomlConfig {
    /// HTTP server port (default: 5000).
    port: Option<u16>,
    /// Bind address (default: "127.0.0.1"; use "0.0.0.0" for LAN access).
    bind_address: Option<String>,
    /// Log level filter string, e.g. "debug", "info,storefront=trace".
    log: Option<String>,
    /// Log output format: "pretty" (default) | "json".
    log_format: Option<String>,
    /// Store backend: "sqlite" (default) | "memory".
    storage: Option<StorageBackend>,
    /// Environment label reported by /api/health (default: "development").
    environment: Option<String>,
}

fn load_toml(data_dir: &Path) -> Option<TomlConfig> {
    let path = data_dir.join("config.toml");
    let contents = std::fs::read_to_string(&path).ok()?;
    match toml::from_str::<TomlConfig>(&contents) {
        Ok(cfg) => Some(cfg),
        Err(e) => {
            error!(path = %path.display(), err = %e, "failed to parse config.toml — using defaults");
            None
        }
    }
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub port: u16,
    pub bind_address: String,
    pub data_dir: PathBuf,
    pub log: String,
    /// "pretty" (default) | "json".
    pub log_format: String,
    pub storage: StorageBackend,
    pub environment: String,
}

impl ServerConfig {
    /// Build config from CLI/env args + optional TOML file.
    ///
    /// Priority (highest to lowest):
    ///   1. CLI / env — passed as `Some(value)` from clap
    ///   2. TOML file at `{data_dir}/config.toml`
    ///   3. Built-in defaults
    pub fn new(
        port: Option<u16>,
        data_dir: Option<PathBuf>,
        log: Option<String>,
        bind_address: Option<String>,
        storage: Option<StorageBackend>,
    ) -> Self {
        let data_dir = data_dir.unwrap_or_else(default_data_dir);
        let toml = load_toml(&data_dir).unwrap_or_default();

        let port = port.or(toml.port).unwrap_or(DEFAULT_PORT);
        let log = log.or(toml.log).unwrap_or_else(|| "info".to_string());
        let bind_address = bind_address
            .or(toml.bind_address)
            .unwrap_or_else(default_bind_address);
        let storage = storage.or(toml.storage).unwrap_or(StorageBackend::Sqlite);

        let log_format = std::env::var("STOREFRONT_LOG_FORMAT")
            .ok()
            .filter(|s| !s.is_empty())
            .or(toml.log_format)
            .unwrap_or_else(|| "pretty".to_string());

        let environment = std::env::var("STOREFRONT_ENV")
            .ok()
            .filter(|s| !s.is_empty())
            .or(toml.environment)
            .unwrap_or_else(|| "development".to_string());

        Self {
            port,
            bind_address,
            data_dir,
            log,
            log_format,
            storage,
            environment,
        }
    }
}

fn default_data_dir() -> PathBuf {
    #[cfg(target_os = "linux")]
    {
        // $XDG_DATA_HOME/storefront or ~/.local/share/storefront
        if let Ok(xdg) = std::env::var("XDG_DATA_HOME") {
            return PathBuf::from(xdg).join("storefront");
        }
        if let Ok(home) = std::env::var("HOME") {
            return PathBuf::from(home)
                .join(".local")
                .join("share")
                .join("storefront");
        }
    }
    #[cfg(target_os = "macos")]
    {
        if let Ok(home) = std::env::var("HOME") {
            return PathBuf::from(home)
                .join("Library")
                .join("Application Support")
                .join("storefront");
        }
    }
    // Fallback
    PathBuf::from(".storefront")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_without_cli_or_toml() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = ServerConfig::new(None, Some(dir.path().to_path_buf()), None, None, None);
        assert_eq!(cfg.port, 5000);
        assert_eq!(cfg.bind_address, "127.0.0.1");
        assert_eq!(cfg.storage, StorageBackend::Sqlite);
        assert_eq!(cfg.log, "info");
    }

    #[test]
    fn cli_beats_toml() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("config.toml"),
            "port = 6000\nstorage = \"memory\"\n",
        )
        .unwrap();
        let cfg = ServerConfig::new(
            Some(7000),
            Some(dir.path().to_path_buf()),
            None,
            None,
            None,
        );
        assert_eq!(cfg.port, 7000);
        assert_eq!(cfg.storage, StorageBackend::Memory);
    }
}
