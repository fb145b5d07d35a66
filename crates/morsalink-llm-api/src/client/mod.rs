use async_trait::async_trait;
use morsalink_logging::RequestLogger;
use morsalink_types::Message;

use crate::error::ProviderError;

pub mod duckduckgo;
pub mod gemini;
pub mod groq;
pub mod wikipedia;

/// One upstream text provider.
///
/// An `Ok` with a blank string means "nothing to say" and lets the fallback
/// chain move on, same as an error.
#[async_trait]
pub trait LlmClient: Send + Sync {
    /// Short lowercase provider name, used in logs and JSON replies
    fn name(&self) -> &'static str;

    /// Answer the conversation; the question is the last message
    async fn answer(&self, messages: &[Message]) -> Result<String, ProviderError>;
}

/// Send a request, log both directions and return the body of a 2xx reply.
pub(crate) async fn send_logged(
    logger: &RequestLogger,
    provider: &'static str,
    request: reqwest::RequestBuilder,
    body: Option<&serde_json::Value>,
    secret: Option<&str>,
) -> Result<String, ProviderError> {
    let (client, request) = request.build_split();
    let request = request.map_err(ProviderError::request(provider))?;
    let exchange = RequestLogger::exchange_id(provider);
    logger.log_request(&exchange, request.method().as_str(), request.url().as_str(), body, secret);

    let response = client
        .execute(request)
        .await
        .map_err(ProviderError::request(provider))?;

    let status = response.status();
    let headers = response.headers().clone();
    let text = response.text().await.map_err(ProviderError::request(provider))?;
    logger.log_response(&exchange, status, &headers, &text);

    if !status.is_success() {
        return Err(ProviderError::Status {
            provider,
            status: status.as_u16(),
            body: text,
        });
    }

    Ok(text)
}

/// Follow a JSON pointer to a non-blank string
pub(crate) fn pointer_text<'a>(value: &'a serde_json::Value, pointer: &str) -> Option<&'a str> {
    value
        .pointer(pointer)
        .and_then(|v| v.as_str())
        .map(str::trim)
        .filter(|s| !s.is_empty())
}
