use async_trait::async_trait;
use morsalink_logging::RequestLogger;
use morsalink_types::{last_question, Message};

use crate::client::{pointer_text, send_logged, LlmClient};
use crate::error::ProviderError;

const PROVIDER: &str = "wikipedia";

/// Wikipedia lookup: full-text search, then the summary of the top hit.
pub struct WikipediaClient {
    base_url: String,
    client: reqwest::Client,
    logger: RequestLogger,
}

impl WikipediaClient {
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

    /// Title of the best search hit, if any
    pub async fn search_title(&self, query: &str) -> Result<Option<String>, ProviderError> {
        let request = self.client.get(format!("{}/w/api.php", self.base_url)).query(&[
            ("action", "query"),
            ("list", "search"),
            ("srsearch", query),
            ("format", "json"),
            ("origin", "*"),
        ]);

        let text = send_logged(&self.logger, PROVIDER, request, None, None).await?;
        let data: serde_json::Value = serde_json::from_str(&text).map_err(ProviderError::decode(PROVIDER))?;

        Ok(pointer_text(&data, "/query/search/0/title").map(str::to_string))
    }

    /// Plain-text extract of a page; a missing page yields an empty string
    pub async fn summary(&self, title: &str) -> Result<String, ProviderError> {
        let mut url = reqwest::Url::parse(&self.base_url)
            .map_err(|_| ProviderError::InvalidUrl(self.base_url.clone()))?;
        url.path_segments_mut()
            .map_err(|_| ProviderError::InvalidUrl(self.base_url.clone()))?
            .pop_if_empty()
            .extend(["api", "rest_v1", "page", "summary", title]);

        match send_logged(&self.logger, PROVIDER, self.client.get(url), None, None).await {
            Ok(text) => {
                let data: serde_json::Value =
                    serde_json::from_str(&text).map_err(ProviderError::decode(PROVIDER))?;
                Ok(pointer_text(&data, "/extract").unwrap_or_default().to_string())
            }
            Err(ProviderError::Status { status: 404, .. }) => Ok(String::new()),
            Err(e) => Err(e),
        }
    }
}

#[async_trait]
impl LlmClient for WikipediaClient {
    fn name(&self) -> &'static str {
        PROVIDER
    }

    async fn answer(&self, messages: &[Message]) -> Result<String, ProviderError> {
        let Some(question) = last_question(messages) else {
            return Ok(String::new());
        };

        match self.search_title(question).await? {
            Some(title) => {
                log::debug!("wikipedia: best match for {:?} is {:?}", question, title);
                self.summary(&title).await
            }
            None => Ok(String::new()),
        }
    }
}
