//! Server config loader (strict parsing).

pub mod schema;

use std::{fs, io::ErrorKind};

use crate::error::{Result, ServerError};

pub use schema::{AppSection, BucketSection, LoadSection, ServerConfig, ServerSection, SyntheticSection};

pub fn load_from_file(path: &str) -> Result<ServerConfig> {
    let s = fs::read_to_string(path)
        .map_err(|e| ServerError::Config(format!("read config failed: {e}")))?;
    load_from_str(&s)
}

pub fn load_from_str(s: &str) -> Result<ServerConfig> {
    let cfg: ServerConfig = serde_yaml::from_str(s)
        .map_err(|e| ServerError::Config(format!("invalid yaml: {e}")))?;
    cfg.validate()?;
    Ok(cfg)
}

/// Load `path`, falling back to built-in defaults when the file does not
/// exist, then apply environment overrides.
pub fn load(path: &str) -> Result<ServerConfig> {
    let mut cfg = match fs::read_to_string(path) {
        Ok(s) => load_from_str(&s)?,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            tracing::warn!(%path, "config file not found, using defaults");
            ServerConfig::default()
        }
        Err(e) => return Err(ServerError::Config(format!("read config failed: {e}"))),
    };
    cfg.apply_env_from(|k| std::env::var(k).ok())?;
    cfg.validate()?;
    Ok(cfg)
}
