use base64::Engine;
use morsalink_logging::RequestLogger;
use serde::{Deserialize, Serialize};

use crate::error::ProviderError;

const PROVIDER: &str = "HF";

/// Diffusion parameters sent along with every prompt
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImageParameters {
    pub guidance_scale: f64,
    pub num_inference_steps: u32,
    pub width: u32,
    pub height: u32,
}

impl Default for ImageParameters {
    fn default() -> Self {
        Self {
            guidance_scale: 7.0,
            num_inference_steps: 30,
            width: 768,
            height: 768,
        }
    }
}

/// Raw image bytes as returned by the inference endpoint
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedImage {
    pub mime: String,
    pub bytes: Vec<u8>,
}

impl GeneratedImage {
    /// Inline `data:` URL the browser can put straight into an `<img>`
    pub fn data_url(&self) -> String {
        format!(
            "data:{};base64,{}",
            self.mime,
            base64::engine::general_purpose::STANDARD.encode(&self.bytes)
        )
    }
}

/// Text-to-image through the Hugging Face inference router
pub struct HuggingFaceImageClient {
    token: Option<String>,
    model: String,
    base_url: String,
    parameters: ImageParameters,
    client: reqwest::Client,
    logger: RequestLogger,
}

impl HuggingFaceImageClient {
    pub fn new(token: Option<String>, model: String, base_url: String) -> Self {
        Self {
            token: token.filter(|t| !t.trim().is_empty()),
            model,
            base_url: base_url.trim_end_matches('/').to_string(),
            parameters: ImageParameters::default(),
            client: reqwest::Client::new(),
            logger: RequestLogger::disabled(),
        }
    }

    pub fn with_parameters(mut self, parameters: ImageParameters) -> Self {
        self.parameters = parameters;
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

    pub fn has_token(&self) -> bool {
        self.token.is_some()
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn model_url(&self) -> String {
        format!("{}/hf-inference/models/{}", self.base_url, self.model)
    }

    pub async fn generate(&self, prompt: &str) -> Result<GeneratedImage, ProviderError> {
        let token = self
            .token
            .as_deref()
            .ok_or(ProviderError::MissingApiKey { provider: PROVIDER })?;

        let body = serde_json::json!({
            "inputs": prompt,
            "parameters": self.parameters,
        });

        let url = self.model_url();
        let exchange = RequestLogger::exchange_id("hf-image");
        self.logger.log_request(&exchange, "POST", &url, Some(&body), Some(token));

        let response = self
            .client
            .post(&url)
            .bearer_auth(token)
            .json(&body)
            .send()
            .await
            .map_err(ProviderError::request(PROVIDER))?;

        let status = response.status();
        let headers = response.headers().clone();

        if !status.is_success() {
            let err = response.text().await.map_err(ProviderError::request(PROVIDER))?;
            self.logger.log_response(&exchange, status, &headers, &err);
            return Err(ProviderError::Status {
                provider: PROVIDER,
                status: status.as_u16(),
                body: err,
            });
        }

        let bytes = response.bytes().await.map_err(ProviderError::request(PROVIDER))?;
        self.logger
            .log_response(&exchange, status, &headers, &format!("<{} bytes of image data>", bytes.len()));

        let mime = headers
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|v| v.split(';').next().unwrap_or_default().trim().to_string())
            .filter(|v| v.starts_with("image/"))
            .unwrap_or_else(|| "image/png".to_string());

        Ok(GeneratedImage {
            mime,
            bytes: bytes.to_vec(),
        })
    }
}
