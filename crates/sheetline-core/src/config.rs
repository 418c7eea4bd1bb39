//! Runtime configuration: built-in defaults, then a TOML file, then environment.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::export::ExportOptions;

pub const CONFIG_PATH_ENV: &str = "SHEETLINE_CONFIG";
pub const DEFAULT_CONFIG_FILE: &str = "sheetline.toml";

pub const DEFAULT_TITLE_HEADLINE: &str = "Timeline";
pub const DEFAULT_TITLE_TEXT: &str = "Generated from Excel";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config file: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Text of the placeholder title slide used when no row is typed `title`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TitleConfig {
    pub headline: String,
    pub text: String,
}

impl Default for TitleConfig {
    fn default() -> Self {
        Self {
            headline: DEFAULT_TITLE_HEADLINE.to_string(),
            text: DEFAULT_TITLE_TEXT.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SheetlineConfig {
    pub title: TitleConfig,
    pub export: ExportOptions,
}

impl SheetlineConfig {
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// Resolves the config file (`explicit`, then `$SHEETLINE_CONFIG`, then
    /// `./sheetline.toml` if it exists) and applies environment overrides.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        let path = explicit
            .map(Path::to_path_buf)
            .or_else(|| std::env::var_os(CONFIG_PATH_ENV).map(PathBuf::from))
            .or_else(|| {
                let local = PathBuf::from(DEFAULT_CONFIG_FILE);
                local.is_file().then_some(local)
            });

        let mut config = match path {
            Some(path) => {
                debug!(path = %path.display(), "loading config file");
                Self::from_file(&path)?
            }
            None => Self::default(),
        };
        config.apply_env_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Applies `SHEETLINE_*` overrides read through `lookup`. Empty values are ignored.
    pub fn apply_env_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let targets: [(&str, &mut String); 6] = [
            ("SHEETLINE_TITLE_HEADLINE", &mut self.title.headline),
            ("SHEETLINE_TITLE_TEXT", &mut self.title.text),
            ("SHEETLINE_EXPORT_CSS_URL", &mut self.export.css_url),
            ("SHEETLINE_EXPORT_JS_URL", &mut self.export.js_url),
            ("SHEETLINE_EXPORT_HEIGHT", &mut self.export.height),
            ("SHEETLINE_EXPORT_WIDTH", &mut self.export.width),
        ];
        for (key, target) in targets {
            if let Some(value) = lookup(key).filter(|value| !value.trim().is_empty()) {
                debug!(key, "config value overridden from environment");
                *target = value;
            }
        }
    }
}
