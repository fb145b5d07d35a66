use async_trait::async_trait;
use morsalink_logging::RequestLogger;
use morsalink_types::{strip_leading_assistant, Message, Role};
use serde_json::json;

use crate::client::{pointer_text, send_logged, LlmClient};
use crate::error::ProviderError;

const PROVIDER: &str = "gemini";

/// Returned when Gemini answers 200 but without any candidate text
pub const GEMINI_EMPTY_REPLY: &str = "I couldn't generate a response.";

/// Google Gemini `generateContent` client
pub struct GeminiClient {
    api_key: Option<String>,
    model: String,
    base_url: String,
    client: reqwest::Client,
    logger: RequestLogger,
}

impl GeminiClient {
    pub fn new(api_key: Option<String>, model: String, base_url: String) -> Self {
        Self {
            api_key: api_key.filter(|k| !k.trim().is_empty()),
            model,
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

    fn generate_url(&self) -> String {
        format!("{}/v1beta/models/{}:generateContent", self.base_url, self.model)
    }

    /// Gemini only knows `user` and `model` turns; system text goes into
    /// `systemInstruction` and the UI greeting is dropped.
    pub fn build_request(messages: &[Message]) -> serde_json::Value {
        let mut system = Vec::new();
        let mut contents = Vec::new();

        for msg in strip_leading_assistant(messages) {
            match msg.role {
                Role::System => system.push(json!({ "text": msg.content })),
                Role::User | Role::Assistant => {
                    let role = if msg.role == Role::User { "user" } else { "model" };
                    contents.push(json!({
                        "role": role,
                        "parts": [{ "text": msg.content }],
                    }));
                }
            }
        }

        let mut request = json!({ "contents": contents });
        if !system.is_empty() {
            request["systemInstruction"] = json!({ "parts": system });
        }
        request
    }
}

#[async_trait]
impl LlmClient for GeminiClient {
    fn name(&self) -> &'static str {
        PROVIDER
    }

    async fn answer(&self, messages: &[Message]) -> Result<String, ProviderError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(ProviderError::MissingApiKey { provider: PROVIDER })?;

        let body = Self::build_request(messages);
        let request = self
            .client
            .post(self.generate_url())
            .query(&[("key", api_key)])
            .json(&body);

        let text = send_logged(&self.logger, PROVIDER, request, Some(&body), None).await?;
        let data: serde_json::Value = serde_json::from_str(&text).map_err(ProviderError::decode(PROVIDER))?;

        Ok(pointer_text(&data, "/candidates/0/content/parts/0/text")
            .unwrap_or(GEMINI_EMPTY_REPLY)
            .to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_build_request_maps_roles() {
        let messages = vec![
            Message::assistant("Hi! How can I help you today?"),
            Message::system("Be brief."),
            Message::user("hello"),
            Message::assistant("hey"),
            Message::user("what is rust?"),
        ];

        let request = GeminiClient::build_request(&messages);
        assert_eq!(
            request,
            json!({
                "contents": [
                    { "role": "user", "parts": [{ "text": "hello" }] },
                    { "role": "model", "parts": [{ "text": "hey" }] },
                    { "role": "user", "parts": [{ "text": "what is rust?" }] },
                ],
                "systemInstruction": { "parts": [{ "text": "Be brief." }] },
            })
        );
    }

    #[test]
    fn test_build_request_system_before_greeting() {
        let messages = vec![
            Message::system("Be brief."),
            Message::assistant("Hi! How can I help you today?"),
            Message::user("what is rust?"),
        ];

        let request = GeminiClient::build_request(&messages);
        assert_eq!(request["contents"][0]["role"], "user");
        assert_eq!(request["contents"].as_array().map(Vec::len), Some(1));
        assert_eq!(request["systemInstruction"], json!({ "parts": [{ "text": "Be brief." }] }));
    }

    #[tokio::test]
    async fn test_transport_error_hides_api_key() {
        let client = GeminiClient::new(
            Some("SUPERSECRETKEY123".into()),
            "gemini-1.5-flash".into(),
            "http://127.0.0.1:9".into(),
        );
        let err = client.answer(&[Message::user("hi")]).await.unwrap_err();
        assert!(matches!(err, ProviderError::Request { .. }));
        assert!(!err.to_string().contains("SUPERSECRETKEY123"));
    }

    #[tokio::test]
    async fn test_missing_key_fails_without_request() {
        let client = GeminiClient::new(Some("  ".into()), "gemini-1.5-flash".into(), "http://127.0.0.1:9".into());
        let err = client.answer(&[Message::user("hi")]).await.unwrap_err();
        assert!(err.is_missing_key());
    }
}
