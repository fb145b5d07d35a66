use async_trait::async_trait;
use morsalink_logging::RequestLogger;
use morsalink_types::Message;

use crate::client::{pointer_text, send_logged, LlmClient};
use crate::error::ProviderError;

const PROVIDER: &str = "groq";

/// Groq client speaking the OpenAI-compatible chat completions API.
///
/// Any other OpenAI-compatible endpoint works too, point `api_url` at it.
pub struct GroqClient {
    api_key: Option<String>,
    model: String,
    api_url: String,
    system_prompt: Option<String>,
    temperature: f64,
    client: reqwest::Client,
    logger: RequestLogger,
}

impl GroqClient {
    pub fn new(api_key: Option<String>, model: String, api_url: String) -> Self {
        Self {
            api_key: api_key.filter(|k| !k.trim().is_empty()),
            model,
            api_url,
            system_prompt: None,
            temperature: 0.7,
            client: reqwest::Client::new(),
            logger: RequestLogger::disabled(),
        }
    }

    pub fn with_system_prompt(mut self, prompt: Option<String>) -> Self {
        self.system_prompt = prompt.filter(|p| !p.trim().is_empty());
        self
    }

    pub fn with_temperature(mut self, temperature: f64) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn with_http_client(mut self, client: reqwest::Client) -> Self {
        self.client = client;
        self
    }

    pub fn with_logger(mut self, logger: RequestLogger) -> Self {
        self.logger = logger;
        self
    }

    fn build_request(&self, messages: &[Message]) -> serde_json::Value {
        let mut chat_messages = Vec::with_capacity(messages.len() + 1);
        if let Some(prompt) = &self.system_prompt {
            chat_messages.push(Message::system(prompt.clone()));
        }
        chat_messages.extend(messages.iter().cloned());

        serde_json::json!({
            "model": self.model,
            "messages": chat_messages,
            "temperature": self.temperature,
        })
    }
}

#[async_trait]
impl LlmClient for GroqClient {
    fn name(&self) -> &'static str {
        PROVIDER
    }

    async fn answer(&self, messages: &[Message]) -> Result<String, ProviderError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(ProviderError::MissingApiKey { provider: PROVIDER })?;

        let body = self.build_request(messages);
        let request = self
            .client
            .post(&self.api_url)
            .bearer_auth(api_key)
            .json(&body);

        let text = send_logged(&self.logger, PROVIDER, request, Some(&body), Some(api_key)).await?;
        let chat_response: serde_json::Value =
            serde_json::from_str(&text).map_err(ProviderError::decode(PROVIDER))?;

        pointer_text(&chat_response, "/choices/0/message/content")
            .map(str::to_string)
            .ok_or(ProviderError::EmptyResponse { provider: PROVIDER })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_build_request_prepends_system_prompt() {
        let client = GroqClient::new(Some("k".into()), "llama-3.1-8b-instant".into(), "http://x".into())
            .with_system_prompt(Some("You are Morsalink AI.".into()));

        let request = client.build_request(&[Message::user("hi")]);
        assert_eq!(
            request["messages"],
            serde_json::json!([
                { "role": "system", "content": "You are Morsalink AI." },
                { "role": "user", "content": "hi" },
            ])
        );
        assert_eq!(request["model"], "llama-3.1-8b-instant");
    }

    #[test]
    fn test_blank_system_prompt_ignored() {
        let client = GroqClient::new(None, "m".into(), "http://x".into()).with_system_prompt(Some(" ".into()));
        let request = client.build_request(&[Message::user("hi")]);
        assert_eq!(request["messages"].as_array().map(|a| a.len()), Some(1));
    }
}
