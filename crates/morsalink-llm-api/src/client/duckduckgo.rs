use async_trait::async_trait;
use morsalink_logging::RequestLogger;
use morsalink_types::{last_question, Message};

use crate::client::{pointer_text, send_logged, LlmClient};
use crate::error::ProviderError;

const PROVIDER: &str = "duckduckgo";

/// DuckDuckGo Instant Answer API. No key needed.
pub struct DuckDuckGoClient {
    base_url: String,
    client: reqwest::Client,
    logger: RequestLogger,
}

impl DuckDuckGoClient {
    pub fn new(base_url: String) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
            logger: RequestLogger::disabled(),
        }
    }

    pub fn with_http_client(mut self, client: reqwest::Client) -> Self {
        self.client = client;
        self
    }

    pub fn with_logger(mut self, logger: RequestLogger) -> Self {
        self.logger = logger;
        self
    }

    /// Pick the most useful field of an instant-answer payload
    pub fn extract_answer(data: &serde_json::Value) -> String {
        ["/AbstractText", "/Answer", "/Definition", "/RelatedTopics/0/Text"]
            .iter()
            .find_map(|p| pointer_text(data, p))
            .unwrap_or_default()
            .to_string()
    }
}

#[async_trait]
impl LlmClient for DuckDuckGoClient {
    fn name(&self) -> &'static str {
        PROVIDER
    }

    async fn answer(&self, messages: &[Message]) -> Result<String, ProviderError> {
        let Some(question) = last_question(messages) else {
            return Ok(String::new());
        };

        let request = self.client.get(format!("{}/", self.base_url)).query(&[
            ("q", question),
            ("format", "json"),
            ("no_html", "1"),
            ("skip_disambig", "1"),
        ]);

        let text = send_logged(&self.logger, PROVIDER, request, None, None).await?;
        // Served as application/x-javascript, so decode by hand
        let data: serde_json::Value = serde_json::from_str(&text).map_err(ProviderError::decode(PROVIDER))?;

        Ok(Self::extract_answer(&data))
    }
}
