// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use directories::ProjectDirs;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

static APP: Lazy<(&str, &str, &str)> =
    Lazy::new(|| ("com.alphavelocity", "Moneylens", "moneylens"));

pub const DEFAULT_API_URL: &str = "http://localhost:8888";

/// Fixed key the bearer token is persisted under.
pub const TOKEN_FILE: &str = "access_token";
const CONFIG_FILE: &str = "config.json";

pub fn data_dir() -> Result<PathBuf> {
    let proj = ProjectDirs::from(APP.0, APP.1, APP.2)
        .context("Could not determine platform-specific data dir")?;
    let data_dir = proj.data_dir();
    fs::create_dir_all(data_dir).context("Failed to create data dir")?;
    Ok(data_dir.to_path_buf())
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub api_url: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
        }
    }
}

impl Config {
    /// Load the config from the data dir, falling back to defaults when no
    /// file exists. `MONEYLENS_API_URL` overrides the stored base URL.
    pub fn load() -> Result<Self> {
        let mut cfg = Self::load_from(&data_dir()?.join(CONFIG_FILE))?;
        if let Ok(url) = std::env::var("MONEYLENS_API_URL") {
            if !url.trim().is_empty() {
                cfg.api_url = url;
            }
        }
        Ok(cfg)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let raw = fs::read_to_string(path)
            .with_context(|| format!("Read config at {}", path.display()))?;
        let cfg = serde_json::from_str(&raw)
            .with_context(|| format!("Invalid config at {}", path.display()))?;
        Ok(cfg)
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&data_dir()?.join(CONFIG_FILE))
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        fs::write(path, serde_json::to_string_pretty(self)?)
            .with_context(|| format!("Write config at {}", path.display()))?;
        Ok(())
    }
}

/// Persisted bearer token, the client-local analogue of browser local
/// storage: one fixed file, present iff a sign-in succeeded and was not
/// cleared since.
#[derive(Debug, Clone)]
pub struct TokenStore {
    path: PathBuf,
}

impl TokenStore {
    pub fn open() -> Result<Self> {
        Ok(Self::at(data_dir()?.join(TOKEN_FILE)))
    }

    pub fn at(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn load(&self) -> Option<String> {
        let raw = fs::read_to_string(&self.path).ok()?;
        let token = raw.trim();
        if token.is_empty() {
            return None;
        }
        Some(token.to_string())
    }

    pub fn save(&self, token: &str) -> Result<()> {
        fs::write(&self.path, token)
            .with_context(|| format!("Write token at {}", self.path.display()))?;
        Ok(())
    }

    pub fn clear(&self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => {
                Err(e).with_context(|| format!("Remove token at {}", self.path.display()))
            }
        }
    }
}
