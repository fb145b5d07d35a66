use thiserror::Error;

/// Failure of a single upstream call.
///
/// The fallback chain treats every variant the same way: log it and move on
/// to the next provider.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("{provider} API key is not configured")]
    MissingApiKey { provider: &'static str },

    #[error("{provider} error {status}: {body}")]
    Status {
        provider: &'static str,
        status: u16,
        body: String,
    },

    #[error("{provider} returned no usable content")]
    EmptyResponse { provider: &'static str },

    #[error("{provider} request failed: {source}")]
    Request {
        provider: &'static str,
        #[source]
        source: reqwest::Error,
    },

    #[error("{provider} returned malformed JSON: {source}")]
    Decode {
        provider: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid URL: {0}")]
    InvalidUrl(String),
}

impl ProviderError {
    /// The URL is stripped from the source: Gemini carries its key in the query string.
    pub(crate) fn request(provider: &'static str) -> impl FnOnce(reqwest::Error) -> Self {
        move |source| ProviderError::Request {
            provider,
            source: source.without_url(),
        }
    }

    pub(crate) fn decode(provider: &'static str) -> impl FnOnce(serde_json::Error) -> Self {
        move |source| ProviderError::Decode { provider, source }
    }

    pub fn is_missing_key(&self) -> bool {
        matches!(self, ProviderError::MissingApiKey { .. })
    }
}
