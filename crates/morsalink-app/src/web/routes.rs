use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Query, State,
    },
    http::{header, HeaderValue, StatusCode},
    response::{Html, IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use std::sync::Arc;
use uuid::Uuid;

use morsalink_llm_api::{
    ChainOutcome, ClientFactory, FallbackChain, HuggingFaceImageClient, Identity, ProviderError,
};
use morsalink_types::{
    last_question, ChatReply, ChatRequest, ImageRequest, ImageResponse, EMPTY_QUESTION_REPLY,
};

use crate::config::{AppConfig, ChatSettings, ResponseMode};
use crate::web::typing::typing_response;

const INDEX_HTML: &str = include_str!("../../web/index.html");

/// Application state shared across routes
#[derive(Clone)]
pub struct AppState {
    pub chain: Arc<FallbackChain>,
    pub identity: Arc<Identity>,
    pub image: Arc<HuggingFaceImageClient>,
    pub chat: Arc<ChatSettings>,
}

impl AppState {
    pub fn from_config(config: &AppConfig) -> Result<Self, ProviderError> {
        let chain = ClientFactory::create_chain(&config.chain, &config.providers)?;
        let image = ClientFactory::create_image_client(&config.image)?;

        Ok(Self {
            chain: Arc::new(chain),
            identity: Arc::new(config.identity.clone()),
            image: Arc::new(image),
            chat: Arc::new(config.chat.clone()),
        })
    }
}

/// Create router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // API routes
        .route("/api/chat", post(chat))
        .route("/api/image", post(generate_image))
        .route("/api/health", get(health))
        // Single page UI
        .route("/", get(serve_index))
        .with_state(state)
}

/// Per-request override of the configured response mode
#[derive(Debug, Default, Deserialize)]
pub struct ChatQuery {
    pub mode: Option<ResponseMode>,
}

/// POST /api/chat - Answer the last message of the conversation
async fn chat(
    State(state): State<AppState>,
    query: Result<Query<ChatQuery>, QueryRejection>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Response, AppError> {
    let Query(query) = query.map_err(|e| AppError::BadRequest(e.body_text()))?;
    let Json(request) = payload.map_err(|e| AppError::BadRequest(e.body_text()))?;
    let request_id = Uuid::new_v4();

    let Some(question) = last_question(&request.messages) else {
        log::info!("[{}] rejected chat request without a question", request_id);
        return Ok((StatusCode::BAD_REQUEST, EMPTY_QUESTION_REPLY).into_response());
    };

    log::info!(
        "[{}] chat: {} message(s), question {:?}",
        request_id,
        request.messages.len(),
        morsalink_logging::safe_truncate(question, 80)
    );

    let (text, provider) = match state.identity.answer(question) {
        Some(intro) => (intro, Some("identity".to_string())),
        None => match state.chain.answer(&request.messages).await {
            ChainOutcome::Answered { provider, text } => (text, Some(provider)),
            ChainOutcome::Exhausted { failures } => {
                log::warn!("[{}] all providers failed: {:?}", request_id, failures);
                (state.chat.apology.clone(), None)
            }
        },
    };

    let mut response = match query.mode.unwrap_or(state.chat.mode) {
        ResponseMode::Typing => typing_response(text, state.chat.typing_delay),
        ResponseMode::Json => Json(ChatReply { reply: text, provider }).into_response(),
    };

    if let Ok(value) = HeaderValue::from_str(&request_id.to_string()) {
        response.headers_mut().insert("x-request-id", value);
    }

    Ok(response)
}

/// POST /api/image - Generate an image from a prompt
async fn generate_image(
    State(state): State<AppState>,
    payload: Result<Json<ImageRequest>, JsonRejection>,
) -> Result<Json<ImageResponse>, AppError> {
    if !state.image.has_token() {
        return Err(AppError::Internal("HF_TOKEN missing".to_string()));
    }

    let Json(request) = payload.map_err(|e| AppError::BadRequest(e.body_text()))?;
    let prompt = request.prompt.trim();
    if prompt.is_empty() {
        return Err(AppError::BadRequest("Prompt is required".to_string()));
    }

    log::info!("image: model {}, prompt {:?}", state.image.model(), morsalink_logging::safe_truncate(prompt, 80));

    let image = state.image.generate(prompt).await?;
    Ok(Json(ImageResponse { url: image.data_url() }))
}

/// GET /api/health - Liveness plus the configured providers
async fn health(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "providers": state.chain.names(),
        "image": state.image.has_token(),
    }))
}

/// GET / - Serve index page
async fn serve_index(State(state): State<AppState>) -> impl IntoResponse {
    let page = INDEX_HTML
        .replace("{{assistant_name}}", &escape_html(&state.identity.assistant_name))
        .replace("{{greeting}}", &escape_html(&state.identity.greeting()));

    ([(header::CACHE_CONTROL, "no-cache")], Html(page))
}

fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Error handling
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    Internal(String),
    #[error(transparent)]
    Provider(#[from] ProviderError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Internal(_) | AppError::Provider(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        if status.is_server_error() {
            log::error!("{}", self);
        }

        let body = Json(serde_json::json!({
            "error": self.to_string(),
            "status": status.as_u16(),
        }));

        (status, body).into_response()
    }
}
