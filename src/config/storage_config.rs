//! Storage configuration parsing from environment variables.

use crate::application::daily_cache::DEFAULT_KEY_PREFIX;
use anyhow::Result;
use std::env;
use std::path::PathBuf;
use std::str::FromStr;

/// Which `KeyValueStore` backs the day cache
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreKind {
    File,
    Memory,
}

impl FromStr for StoreKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "file" => Ok(StoreKind::File),
            "memory" => Ok(StoreKind::Memory),
            _ => anyhow::bail!("Invalid TRACKFY_STORE: {}. Must be 'file' or 'memory'", s),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct StorageEnvConfig {
    pub kind: StoreKind,
    /// `None` means the default `~/.trackfy/sales`
    pub dir: Option<PathBuf>,
    pub key_prefix: String,
}

impl StorageEnvConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let kind = lookup("TRACKFY_STORE")
            .unwrap_or_else(|| "file".to_string())
            .parse::<StoreKind>()?;

        let dir = lookup("TRACKFY_STORE_DIR")
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from);

        let key_prefix = lookup("TRACKFY_KEY_PREFIX")
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_KEY_PREFIX.to_string());

        Ok(Self {
            kind,
            dir,
            key_prefix,
        })
    }
}
