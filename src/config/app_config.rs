use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("environment variable {var} has an invalid value {value:?}")]
    InvalidEnv { var: &'static str, value: String },
}

/// Contents of `<config_dir>/passkeep/config.toml`. Every key is optional.
#[derive(Debug, Serialize, Deserialize, Default)]
pub struct FileConfig {
    pub data_dir: Option<String>,
    pub backups: Option<usize>,
    pub clipboard_ttl: Option<u64>,
    // Generator defaults
    pub generator_length: Option<u32>,
    pub generator_symbols: Option<bool>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    pub data_dir: PathBuf,
    pub backups: Option<usize>,
    pub clipboard_ttl: Option<u64>,
    pub generator_length: Option<u32>,
    pub generator_symbols: Option<bool>,
}

impl Config {
    /// Resolve settings with precedence: CLI > environment > config file > default.
    pub fn create(data_dir: Option<PathBuf>) -> Result<Self, ConfigError> {
        let file_cfg = load_file_config();

        let data_dir = match data_dir {
            Some(p) => p,
            None => env::var("PASSKEEP_DATA_DIR")
                .ok()
                .map(PathBuf::from)
                .or_else(|| file_cfg.data_dir.as_ref().map(PathBuf::from))
                .unwrap_or_else(default_data_dir),
        };

        Ok(Config {
            data_dir,
            backups: env_or("PASSKEEP_BACKUPS", file_cfg.backups)?,
            clipboard_ttl: env_or("PASSKEEP_CLIP_TTL", file_cfg.clipboard_ttl)?,
            generator_length: env_or("PASSKEEP_GEN_LENGTH", file_cfg.generator_length)?,
            generator_symbols: env_or("PASSKEEP_GEN_SYMBOLS", file_cfg.generator_symbols)?,
        })
    }
}

fn env_or<T: FromStr>(var: &'static str, fallback: Option<T>) -> Result<Option<T>, ConfigError> {
    match env::var(var) {
        Ok(value) => value
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|_| ConfigError::InvalidEnv { var, value }),
        Err(_) => Ok(fallback),
    }
}

fn load_file_config() -> FileConfig {
    let (_, cfg) = load_file_config_with_path();
    cfg
}

pub fn config_file_path() -> PathBuf {
    // PASSKEEP_CONFIG_DIR isolates tests and portable installs from the platform default
    let cfg_dir = if let Ok(p) = env::var("PASSKEEP_CONFIG_DIR") {
        PathBuf::from(p)
    } else {
        dirs::config_dir().unwrap_or_else(|| PathBuf::from("."))
    };
    cfg_dir.join("passkeep").join("config.toml")
}

/// An unreadable or malformed file yields the defaults.
pub fn load_file_config_with_path() -> (PathBuf, FileConfig) {
    let path = config_file_path();
    let cfg = match std::fs::read_to_string(&path) {
        Ok(s) => toml::from_str::<FileConfig>(&s).unwrap_or_else(|e| {
            tracing::warn!(path = %path.display(), error = %e, "Ignoring malformed config file");
            FileConfig::default()
        }),
        Err(_) => FileConfig::default(),
    };
    (path, cfg)
}

pub fn save_file_config(path: &Path, cfg: &FileConfig) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let s = toml::to_string_pretty(cfg).map_err(std::io::Error::other)?;
    std::fs::write(path, s)
}

fn default_data_dir() -> PathBuf {
    if let Some(mut p) = dirs::data_dir() {
        p.push("passkeep");
        return p;
    }
    let home = env::var("HOME").unwrap_or_else(|_| ".".to_string());
    PathBuf::from(&home).join(".passkeep")
}
