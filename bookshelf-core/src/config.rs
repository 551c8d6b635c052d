//! Configuration file at `~/.bookshelf/config.toml`
//!
//! Missing files fall back to defaults; `DATABASE_URL` and `BOOKSHELF_BIND`
//! override whatever the file says.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

/// Default SQLite database, created next to the working directory if missing
pub const DEFAULT_DATABASE_URL: &str = "sqlite://bookshelf.db";

/// Configuration for the bookshelf server
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BookshelfConfig {
    #[serde(default)]
    pub server: ServerSection,
    #[serde(default)]
    pub database: DatabaseSection,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerSection {
    pub bind: SocketAddr,
    #[serde(default)]
    pub cors_permissive: bool,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            bind: SocketAddr::from(([127, 0, 0, 1], 3030)),
            cors_permissive: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatabaseSection {
    pub url: String,
    pub max_connections: u32,
}

impl Default for DatabaseSection {
    fn default() -> Self {
        Self {
            url: DEFAULT_DATABASE_URL.to_string(),
            max_connections: 5,
        }
    }
}

impl BookshelfConfig {
    /// Load config from ~/.bookshelf/config.toml, then apply env overrides.
    ///
    /// A missing file is not an error: defaults are used.
    pub fn load() -> Result<Self> {
        let mut config = Self::load_from(&Self::config_path())?;
        config.apply_env_overrides()?;
        Ok(config)
    }

    /// Load from an explicit path without looking at the environment.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .context(format!("Failed to read config file: {:?}", path))?;

        toml::from_str(&content).context("Failed to parse config file (invalid TOML)")
    }

    /// Get config file path: ~/.bookshelf/config.toml
    pub fn config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".bookshelf/config.toml")
    }

    /// `DATABASE_URL` and `BOOKSHELF_BIND` win over the file.
    fn apply_env_overrides(&mut self) -> Result<()> {
        if let Ok(url) = env::var("DATABASE_URL") {
            self.database.url = url;
        }

        if let Ok(bind) = env::var("BOOKSHELF_BIND") {
            self.server.bind = bind
                .parse()
                .context(format!("BOOKSHELF_BIND is not a socket address: {}", bind))?;
        }

        Ok(())
    }

    /// Render as TOML (used by `bookshelf config init/show`).
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize config")
    }
}
