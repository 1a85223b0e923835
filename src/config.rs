use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: Server,
    #[serde(default)]
    pub files: Files,
}

#[derive(Debug, Deserialize, Clone)]
pub struct Server {
    pub bind_addr: String,
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Files {
    /// Boundary applied to requests that name no base of their own.
    /// Defaults to the home directory when unset.
    pub fallback_boundary: Option<PathBuf>,
}

impl Config {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = fs::read_to_string(path)?;
        if path.extension().map(|e| e == "json").unwrap_or(false) {
            Ok(serde_json::from_str(&raw)?)
        } else {
            Ok(toml::from_str(&raw)?)
        }
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.server.bind_addr.trim().is_empty() {
            anyhow::bail!("bind_addr must not be empty");
        }
        if let Some(dir) = &self.files.fallback_boundary {
            if !dir.is_dir() {
                anyhow::bail!(
                    "fallback_boundary does not exist or is not a directory: {}",
                    dir.display()
                );
            }
        }
        Ok(())
    }
}
