use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::backend::BackendKind;

#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub backend: BackendKind,
    pub anthropic: BackendSettings,
    pub gemini: BackendSettings,
}

#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct BackendSettings {
    pub model: String,
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    pub base_url: String,
}

fn default_max_tokens() -> u32 {
    4_096
}

impl Default for Config {
    fn default() -> Self {
        Self {
            backend: BackendKind::Anthropic,
            anthropic: BackendSettings {
                model: "claude-sonnet-4-20250514".to_owned(),
                max_tokens: default_max_tokens(),
                base_url: "https://api.anthropic.com".to_owned(),
            },
            gemini: BackendSettings {
                model: "gemini-1.5-pro".to_owned(),
                max_tokens: default_max_tokens(),
                base_url: "https://generativelanguage.googleapis.com".to_owned(),
            },
        }
    }
}

impl Config {
    pub fn settings(&self, kind: BackendKind) -> &BackendSettings {
        match kind {
            BackendKind::Anthropic => &self.anthropic,
            BackendKind::Gemini => &self.gemini,
        }
    }

    /// Loads `explicit` if given, else the per-user config file if one exists,
    /// else the built-in defaults.
    pub async fn load(explicit: Option<&Path>) -> Result<Self> {
        let path = match explicit {
            Some(path) => path.to_owned(),
            None => match default_config_path() {
                Some(path) if tokio::fs::try_exists(&path).await.unwrap_or(false) => path,
                _ => {
                    tracing::debug!("No config file, using defaults");
                    return Ok(Self::default());
                }
            },
        };

        tracing::debug!(path = %path.display(), "Loading config");
        let contents = tokio::fs::read_to_string(&path)
            .await
            .with_context(|| format!("Failed to read config file {}", path.display()))?;

        Self::from_toml(&contents)
            .with_context(|| format!("Failed to parse config TOML {}", path.display()))
    }

    fn from_toml(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }
}

fn default_config_path() -> Option<PathBuf> {
    Some(
        dirs::config_dir()?
            .join(env!("CARGO_PKG_NAME"))
            .join("config.toml"),
    )
}
