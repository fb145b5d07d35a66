#![allow(dead_code)]

use serde_json::json;
use wiremock::matchers::*;
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const TEST_KEY: &str = "test-api-key";
pub const GEMINI_MODEL: &str = "gemini-1.5-flash";

/// Mock server utilities for testing the provider clients
pub struct ProviderMockServer {
    server: MockServer,
}

impl ProviderMockServer {
    pub async fn new() -> Self {
        Self {
            server: MockServer::start().await,
        }
    }

    pub fn uri(&self) -> String {
        self.server.uri()
    }

    pub fn groq_url(&self) -> String {
        format!("{}/openai/v1/chat/completions", self.server.uri())
    }

    pub async fn received_count(&self) -> usize {
        self.server.received_requests().await.map(|r| r.len()).unwrap_or(0)
    }

    /// Mock successful Gemini generateContent response
    pub async fn mock_gemini_success(&self, response_content: &str) {
        Mock::given(method("POST"))
            .and(path(format!("/v1beta/models/{}:generateContent", GEMINI_MODEL)))
            .and(query_param("key", TEST_KEY))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "candidates": [{
                    "content": {
                        "role": "model",
                        "parts": [{ "text": response_content }]
                    },
                    "finishReason": "STOP"
                }]
            })))
            .mount(&self.server)
            .await;
    }

    /// Mock Gemini 200 reply carrying no candidates (e.g. blocked prompt)
    pub async fn mock_gemini_no_candidates(&self) {
        Mock::given(method("POST"))
            .and(path(format!("/v1beta/models/{}:generateContent", GEMINI_MODEL)))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "promptFeedback": { "blockReason": "SAFETY" }
            })))
            .mount(&self.server)
            .await;
    }

    /// Mock Gemini API error response
    pub async fn mock_gemini_error(&self, status: u16) {
        Mock::given(method("POST"))
            .and(path(format!("/v1beta/models/{}:generateContent", GEMINI_MODEL)))
            .respond_with(ResponseTemplate::new(status).set_body_json(json!({
                "error": { "code": status, "message": "quota exceeded", "status": "RESOURCE_EXHAUSTED" }
            })))
            .mount(&self.server)
            .await;
    }

    /// Mock successful Groq API response
    pub async fn mock_groq_success(&self, request_content: &str, response_content: &str) {
        Mock::given(method("POST"))
            .and(path("/openai/v1/chat/completions"))
            .and(header("authorization", format!("Bearer {}", TEST_KEY).as_str()))
            .and(body_partial_json(json!({
                "model": "llama-3.1-8b-instant",
                "messages": [{ "role": "user", "content": request_content }]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": "chatcmpl_test123",
                "object": "chat.completion",
                "created": 1700000000,
                "model": "llama-3.1-8b-instant",
                "choices": [{
                    "index": 0,
                    "message": { "role": "assistant", "content": response_content },
                    "finish_reason": "stop"
                }],
                "usage": { "prompt_tokens": 10, "completion_tokens": 20, "total_tokens": 30 }
            })))
            .mount(&self.server)
            .await;
    }

    /// Mock Groq rate limit error
    pub async fn mock_groq_rate_limit(&self) {
        Mock::given(method("POST"))
            .and(path("/openai/v1/chat/completions"))
            .respond_with(
                ResponseTemplate::new(429)
                    .set_body_json(json!({
                        "error": { "message": "Rate limit reached", "type": "tokens" }
                    }))
                    .insert_header("Retry-After", "60"),
            )
            .mount(&self.server)
            .await;
    }

    /// Mock DuckDuckGo instant answer
    pub async fn mock_duckduckgo(&self, query: &str, abstract_text: &str) {
        Mock::given(method("GET"))
            .and(path("/"))
            .and(query_param("q", query))
            .and(query_param("format", "json"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string(json!({ "AbstractText": abstract_text, "RelatedTopics": [] }).to_string())
                    .insert_header("content-type", "application/x-javascript"),
            )
            .mount(&self.server)
            .await;
    }

    /// Mock Wikipedia full-text search; `title` of `None` means no hits
    pub async fn mock_wikipedia_search(&self, query: &str, title: Option<&str>) {
        let search = match title {
            Some(t) => json!([{ "ns": 0, "title": t, "pageid": 1 }]),
            None => json!([]),
        };

        Mock::given(method("GET"))
            .and(path("/w/api.php"))
            .and(query_param("list", "search"))
            .and(query_param("srsearch", query))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "batchcomplete": "",
                "query": { "searchinfo": { "totalhits": 1 }, "search": search }
            })))
            .mount(&self.server)
            .await;
    }

    /// Mock Wikipedia page summary
    pub async fn mock_wikipedia_summary(&self, title: &str, extract: &str) {
        Mock::given(method("GET"))
            .and(path(format!("/api/rest_v1/page/summary/{}", title)))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "type": "standard",
                "title": title,
                "extract": extract
            })))
            .mount(&self.server)
            .await;
    }

    /// Mock successful Hugging Face image generation
    pub async fn mock_hf_image(&self, model: &str, bytes: &[u8], content_type: &str) {
        Mock::given(method("POST"))
            .and(path(format!("/hf-inference/models/{}", model)))
            .and(header("authorization", format!("Bearer {}", TEST_KEY).as_str()))
            .and(body_partial_json(json!({
                "parameters": { "num_inference_steps": 30, "width": 768, "height": 768 }
            })))
            .respond_with(ResponseTemplate::new(200).set_body_raw(bytes.to_vec(), content_type))
            .mount(&self.server)
            .await;
    }

    /// Mock Hugging Face error (model loading, bad token, ...)
    pub async fn mock_hf_error(&self, model: &str, status: u16, message: &str) {
        Mock::given(method("POST"))
            .and(path(format!("/hf-inference/models/{}", model)))
            .respond_with(ResponseTemplate::new(status).set_body_string(message))
            .mount(&self.server)
            .await;
    }
}
