use serde::Deserialize;
use std::path::{Path, PathBuf};

use morsalink_llm_api::{Identity, ImageParameters};

use crate::config::{ConfigError, ResponseMode};

/// Config file looked up in the working directory when `--config` is absent
pub const DEFAULT_CONFIG_FILE: &str = "morsalink.toml";

/// On-disk configuration. Every field is optional.
///
/// ```toml
/// [server]
/// port = 3000
///
/// [chat]
/// mode = "typing"
/// providers = ["gemini", "duckduckgo", "wikipedia"]
///
/// [identity]
/// assistant_name = "Morsalink AI"
/// creator = "Morsalin"
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub server: ServerSection,
    pub chat: ChatSection,
    pub identity: Option<Identity>,
    pub providers: ProvidersSection,
    pub image: ImageSection,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServerSection {
    pub bind: Option<String>,
    pub port: Option<u16>,
    pub web_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ChatSection {
    pub mode: Option<ResponseMode>,
    pub typing_delay_ms: Option<u64>,
    pub apology: Option<String>,
    pub providers: Option<Vec<String>>,
    pub system_prompt: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProvidersSection {
    pub gemini_model: Option<String>,
    pub gemini_url: Option<String>,
    pub groq_model: Option<String>,
    pub groq_url: Option<String>,
    pub duckduckgo_url: Option<String>,
    pub wikipedia_url: Option<String>,
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ImageSection {
    pub model: Option<String>,
    pub url: Option<String>,
    pub parameters: Option<ImageParameters>,
}

impl FileConfig {
    pub fn parse(text: &str, path: &Path) -> Result<Self, ConfigError> {
        toml::from_str(text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&text, path)
    }

    /// Load `explicit` if given, else `morsalink.toml` in `dir` if it exists,
    /// else an empty config.
    pub fn discover(explicit: Option<&Path>, dir: &Path) -> Result<(Self, Option<PathBuf>), ConfigError> {
        if let Some(path) = explicit {
            return Ok((Self::load(path)?, Some(path.to_path_buf())));
        }

        let candidate = dir.join(DEFAULT_CONFIG_FILE);
        if candidate.is_file() {
            return Ok((Self::load(&candidate)?, Some(candidate)));
        }

        Ok((Self::default(), None))
    }
}
