// config.rs - Optional TOML settings for hosts of the simulation

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{LifeError, Result};
use crate::store::DirSource;

pub const CONFIG_FILE: &str = "conway.toml";

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LifeConfig {
    pub patterns: PatternConfig,
    pub view: ViewConfig,
}

/// Where the pattern store looks for files.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PatternConfig {
    /// Defaults to the working directory.
    pub root: Option<PathBuf>,
    pub fallback: PathBuf,
}

impl Default for PatternConfig {
    fn default() -> Self {
        Self {
            root: None,
            fallback: PathBuf::from(DirSource::DEFAULT_FALLBACK),
        }
    }
}

impl PatternConfig {
    pub fn source(&self) -> Result<DirSource> {
        let root = match &self.root {
            Some(root) => root.clone(),
            None => std::env::current_dir().map_err(|source| LifeError::Io {
                path: PathBuf::from("."),
                source,
            })?,
        };
        Ok(DirSource::new(root, &self.fallback))
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ViewConfig {
    pub update_interval_ms: u64,
    pub cell_size: f32,
    pub live_color: [u8; 3],
    pub dead_color: [u8; 3],
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            update_interval_ms: 200,
            cell_size: 15.0,
            live_color: [0, 200, 0],
            dead_color: [40, 40, 40],
        }
    }
}

impl LifeConfig {
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text).map_err(|e| LifeError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| LifeError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// Reads `conway.toml` from `dir` when present, defaults otherwise.
    pub fn load_or_default(dir: &Path) -> Result<Self> {
        let path = dir.join(CONFIG_FILE);
        if path.is_file() {
            tracing::info!(path = %path.display(), "loading config");
            Self::load(&path)
        } else {
            Ok(Self::default())
        }
    }

    fn validate(&self) -> Result<()> {
        if self.view.update_interval_ms == 0 {
            return Err(LifeError::Config("view.update_interval_ms must be positive".into()));
        }
        if !(self.view.cell_size.is_finite() && self.view.cell_size > 0.0) {
            return Err(LifeError::Config("view.cell_size must be positive".into()));
        }
        Ok(())
    }
}
