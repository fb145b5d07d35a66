use serde::Deserialize;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use morsalink_llm_api::config::{DEFAULT_PROVIDER_CHAIN, DEFAULT_GEMINI_MODEL, DEFAULT_GROQ_MODEL, DEFAULT_IMAGE_MODEL};
use morsalink_llm_api::{
    parse_provider_chain, Identity, ImageSettings, ProviderKind, ProviderSettings, DUCKDUCKGO_API_URL,
    GEMINI_API_URL, GROQ_API_URL, HF_ROUTER_URL, WIKIPEDIA_URL,
};
use morsalink_logging::RequestLogger;
use morsalink_types::DEFAULT_APOLOGY;

use crate::cli::Cli;

pub mod file;
pub use file::FileConfig;

pub const DEFAULT_BIND: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_TYPING_DELAY_MS: u64 = 10;

/// How the chat endpoint hands the answer to the browser
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ResponseMode {
    /// Plain text, one character per tick
    #[default]
    Typing,
    /// A single `{"reply": ...}` JSON payload
    Json,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid bind address '{0}'")]
    InvalidBind(String),

    #[error("{0}")]
    Providers(String),
}

/// Chat endpoint behaviour
#[derive(Debug, Clone, PartialEq)]
pub struct ChatSettings {
    pub mode: ResponseMode,
    pub typing_delay: Duration,
    pub apology: String,
}

impl Default for ChatSettings {
    fn default() -> Self {
        Self {
            mode: ResponseMode::Typing,
            typing_delay: Duration::from_millis(DEFAULT_TYPING_DELAY_MS),
            apology: DEFAULT_APOLOGY.to_string(),
        }
    }
}

/// Fully resolved configuration: defaults < config file < env < flags
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    pub web_dir: Option<PathBuf>,
    pub chain: Vec<ProviderKind>,
    pub chat: ChatSettings,
    pub identity: Identity,
    pub providers: ProviderSettings,
    pub image: ImageSettings,
}

impl AppConfig {
    pub fn resolve(cli: &Cli, file: FileConfig, logger: RequestLogger) -> Result<Self, ConfigError> {
        let bind = cli
            .bind
            .clone()
            .or(file.server.bind)
            .unwrap_or_else(|| DEFAULT_BIND.to_string());
        let port = cli.port.or(file.server.port).unwrap_or(DEFAULT_PORT);
        let bind_addr: SocketAddr = format!("{}:{}", bind, port)
            .parse()
            .map_err(|_| ConfigError::InvalidBind(bind.clone()))?;

        let chain_list = cli
            .providers
            .clone()
            .or_else(|| file.chat.providers.map(|p| p.join(",")))
            .unwrap_or_else(|| DEFAULT_PROVIDER_CHAIN.to_string());
        let chain = parse_provider_chain(&chain_list).map_err(ConfigError::Providers)?;

        let chat = ChatSettings {
            mode: cli.mode.or(file.chat.mode).unwrap_or_default(),
            typing_delay: Duration::from_millis(
                cli.typing_delay_ms
                    .or(file.chat.typing_delay_ms)
                    .unwrap_or(DEFAULT_TYPING_DELAY_MS),
            ),
            apology: file.chat.apology.unwrap_or_else(|| DEFAULT_APOLOGY.to_string()),
        };

        let timeout = cli
            .timeout_secs
            .or(file.providers.timeout_secs)
            .filter(|s| *s > 0)
            .map(Duration::from_secs);

        let p = file.providers;
        let providers = ProviderSettings {
            gemini_api_key: cli.gemini_key.clone(),
            gemini_model: cli
                .gemini_model
                .clone()
                .or(p.gemini_model)
                .unwrap_or_else(|| DEFAULT_GEMINI_MODEL.to_string()),
            gemini_url: p.gemini_url.unwrap_or_else(|| GEMINI_API_URL.to_string()),
            groq_api_key: cli.groq_key.clone(),
            groq_model: cli
                .groq_model
                .clone()
                .or(p.groq_model)
                .unwrap_or_else(|| DEFAULT_GROQ_MODEL.to_string()),
            groq_url: p.groq_url.unwrap_or_else(|| GROQ_API_URL.to_string()),
            system_prompt: file.chat.system_prompt,
            duckduckgo_url: p.duckduckgo_url.unwrap_or_else(|| DUCKDUCKGO_API_URL.to_string()),
            wikipedia_url: p.wikipedia_url.unwrap_or_else(|| WIKIPEDIA_URL.to_string()),
            timeout,
            logger: logger.clone(),
        };

        let image = ImageSettings {
            token: cli.hf_token.clone(),
            model: cli
                .image_model
                .clone()
                .or(file.image.model)
                .unwrap_or_else(|| DEFAULT_IMAGE_MODEL.to_string()),
            url: file.image.url.unwrap_or_else(|| HF_ROUTER_URL.to_string()),
            parameters: file.image.parameters.unwrap_or_default(),
            timeout,
            logger,
        };

        Ok(Self {
            bind_addr,
            web_dir: cli.web_dir.clone().or(file.server.web_dir),
            chain,
            chat,
            identity: file.identity.unwrap_or_default(),
            providers,
            image,
        })
    }
}
