use std::sync::Arc;
use std::time::Duration;

use crate::chain::FallbackChain;
use crate::client::{
    duckduckgo::DuckDuckGoClient, gemini::GeminiClient, groq::GroqClient, wikipedia::WikipediaClient, LlmClient,
};
use crate::config::{ImageSettings, ProviderKind, ProviderSettings};
use crate::error::ProviderError;
use crate::image::HuggingFaceImageClient;

const USER_AGENT: &str = concat!("morsalink/", env!("CARGO_PKG_VERSION"));

/// Client factory for the provider clients
pub struct ClientFactory;

impl ClientFactory {
    /// Shared HTTP client; `timeout` of `None` keeps reqwest's default (no timeout)
    pub fn http_client(timeout: Option<Duration>) -> Result<reqwest::Client, ProviderError> {
        let mut builder = reqwest::Client::builder().user_agent(USER_AGENT);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        builder.build().map_err(ProviderError::request("http"))
    }

    /// Create one text provider client
    pub fn create(kind: ProviderKind, settings: &ProviderSettings, http: reqwest::Client) -> Arc<dyn LlmClient> {
        let logger = settings.logger.clone();

        match kind {
            ProviderKind::Gemini => Arc::new(
                GeminiClient::new(
                    settings.gemini_api_key.clone(),
                    settings.gemini_model.clone(),
                    settings.gemini_url.clone(),
                )
                .with_http_client(http)
                .with_logger(logger),
            ),
            ProviderKind::Groq => Arc::new(
                GroqClient::new(
                    settings.groq_api_key.clone(),
                    settings.groq_model.clone(),
                    settings.groq_url.clone(),
                )
                .with_system_prompt(settings.system_prompt.clone())
                .with_http_client(http)
                .with_logger(logger),
            ),
            ProviderKind::DuckDuckGo => Arc::new(
                DuckDuckGoClient::new(settings.duckduckgo_url.clone())
                    .with_http_client(http)
                    .with_logger(logger),
            ),
            ProviderKind::Wikipedia => Arc::new(
                WikipediaClient::new(settings.wikipedia_url.clone())
                    .with_http_client(http)
                    .with_logger(logger),
            ),
        }
    }

    /// Create the fallback chain in the given order
    pub fn create_chain(kinds: &[ProviderKind], settings: &ProviderSettings) -> Result<FallbackChain, ProviderError> {
        let http = Self::http_client(settings.timeout)?;
        let mut chain = FallbackChain::default();

        for kind in kinds {
            if kind.needs_api_key() && Self::api_key_for(*kind, settings).is_none() {
                log::warn!("{} is in the provider chain but has no API key; it will always be skipped", kind);
            }
            chain.push(Self::create(*kind, settings, http.clone()));
        }

        Ok(chain)
    }

    /// Create the image generation client
    pub fn create_image_client(settings: &ImageSettings) -> Result<HuggingFaceImageClient, ProviderError> {
        let http = Self::http_client(settings.timeout)?;

        Ok(HuggingFaceImageClient::new(settings.token.clone(), settings.model.clone(), settings.url.clone())
            .with_parameters(settings.parameters.clone())
            .with_http_client(http)
            .with_logger(settings.logger.clone()))
    }

    fn api_key_for(kind: ProviderKind, settings: &ProviderSettings) -> Option<&str> {
        let key = match kind {
            ProviderKind::Gemini => settings.gemini_api_key.as_deref(),
            ProviderKind::Groq => settings.groq_api_key.as_deref(),
            ProviderKind::DuckDuckGo | ProviderKind::Wikipedia => None,
        };
        key.filter(|k| !k.trim().is_empty())
    }
}
