use std::time::Duration;

use morsalink_logging::RequestLogger;

use crate::image::ImageParameters;

pub mod factory;
pub use factory::ClientFactory;

/// Default Gemini API base URL
pub const GEMINI_API_URL: &str = "https://generativelanguage.googleapis.com";

/// Default Groq API URL
pub const GROQ_API_URL: &str = "https://api.groq.com/openai/v1/chat/completions";

/// Default DuckDuckGo Instant Answer API URL
pub const DUCKDUCKGO_API_URL: &str = "https://api.duckduckgo.com";

/// Default Wikipedia base URL
pub const WIKIPEDIA_URL: &str = "https://en.wikipedia.org";

/// Default Hugging Face inference router URL
pub const HF_ROUTER_URL: &str = "https://router.huggingface.co";

pub const DEFAULT_GEMINI_MODEL: &str = "gemini-1.5-flash";
pub const DEFAULT_GROQ_MODEL: &str = "llama-3.1-8b-instant";
pub const DEFAULT_IMAGE_MODEL: &str = "black-forest-labs/FLUX.1-schnell";

/// Provider order used when nothing else is configured
pub const DEFAULT_PROVIDER_CHAIN: &str = "gemini,wikipedia";

/// Upstream text providers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProviderKind {
    Gemini,
    Groq,
    DuckDuckGo,
    Wikipedia,
}

impl ProviderKind {
    /// Parse provider kind from string
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "gemini" | "google" => Some(Self::Gemini),
            "groq" => Some(Self::Groq),
            "duckduckgo" | "ddg" => Some(Self::DuckDuckGo),
            "wikipedia" | "wiki" => Some(Self::Wikipedia),
            _ => None,
        }
    }

    /// Get string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Gemini => "gemini",
            Self::Groq => "groq",
            Self::DuckDuckGo => "duckduckgo",
            Self::Wikipedia => "wikipedia",
        }
    }

    /// Whether the provider refuses to work without an API key
    pub fn needs_api_key(&self) -> bool {
        matches!(self, Self::Gemini | Self::Groq)
    }
}

impl std::fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parse a comma separated provider list such as `"gemini,duckduckgo,wikipedia"`.
///
/// Duplicates are dropped, keeping the first occurrence.
pub fn parse_provider_chain(list: &str) -> Result<Vec<ProviderKind>, String> {
    let mut chain = Vec::new();

    for name in list.split(',').map(str::trim).filter(|s| !s.is_empty()) {
        let kind = ProviderKind::from_str(name).ok_or_else(|| {
            format!("unknown provider '{}' (expected gemini, groq, duckduckgo or wikipedia)", name)
        })?;
        if !chain.contains(&kind) {
            chain.push(kind);
        }
    }

    if chain.is_empty() {
        return Err("provider chain is empty".to_string());
    }

    Ok(chain)
}

/// Everything needed to build the text provider clients
#[derive(Debug, Clone)]
pub struct ProviderSettings {
    pub gemini_api_key: Option<String>,
    pub gemini_model: String,
    pub gemini_url: String,
    pub groq_api_key: Option<String>,
    pub groq_model: String,
    pub groq_url: String,
    pub system_prompt: Option<String>,
    pub duckduckgo_url: String,
    pub wikipedia_url: String,
    pub timeout: Option<Duration>,
    pub logger: RequestLogger,
}

impl Default for ProviderSettings {
    fn default() -> Self {
        Self {
            gemini_api_key: None,
            gemini_model: DEFAULT_GEMINI_MODEL.to_string(),
            gemini_url: GEMINI_API_URL.to_string(),
            groq_api_key: None,
            groq_model: DEFAULT_GROQ_MODEL.to_string(),
            groq_url: GROQ_API_URL.to_string(),
            system_prompt: None,
            duckduckgo_url: DUCKDUCKGO_API_URL.to_string(),
            wikipedia_url: WIKIPEDIA_URL.to_string(),
            timeout: None,
            logger: RequestLogger::disabled(),
        }
    }
}

impl ProviderSettings {
    /// Defaults plus the `GEMINI_API_KEY` / `GROQ_API_KEY` environment variables
    pub fn from_env() -> Self {
        Self {
            gemini_api_key: std::env::var("GEMINI_API_KEY").ok(),
            groq_api_key: std::env::var("GROQ_API_KEY").ok(),
            ..Self::default()
        }
    }
}

/// Everything needed to build the image client
#[derive(Debug, Clone)]
pub struct ImageSettings {
    pub token: Option<String>,
    pub model: String,
    pub url: String,
    pub parameters: ImageParameters,
    pub timeout: Option<Duration>,
    pub logger: RequestLogger,
}

impl Default for ImageSettings {
    fn default() -> Self {
        Self {
            token: None,
            model: DEFAULT_IMAGE_MODEL.to_string(),
            url: HF_ROUTER_URL.to_string(),
            parameters: ImageParameters::default(),
            timeout: None,
            logger: RequestLogger::disabled(),
        }
    }
}
