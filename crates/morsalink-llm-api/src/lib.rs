//! # morsalink-llm-api
//!
//! Clients for the upstream services morsalink relays questions to:
//! - Google Gemini
//! - Groq (OpenAI-compatible chat completions)
//! - DuckDuckGo instant answers
//! - Wikipedia search + page summaries
//! - Hugging Face hosted diffusion models (image mode)
//!
//! Text providers implement [`LlmClient`] and are tried in order by a
//! [`FallbackChain`]: the first provider producing a non-blank answer wins.
//!
//! ## Example
//!
//! ```rust,no_run
//! use morsalink_llm_api::{ClientFactory, ProviderKind, ProviderSettings, ChainOutcome};
//! use morsalink_types::Message;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let settings = ProviderSettings::from_env();
//!     let chain = ClientFactory::create_chain(
//!         &[ProviderKind::Gemini, ProviderKind::Wikipedia],
//!         &settings,
//!     )?;
//!
//!     let messages = vec![Message::user("What is the Rust borrow checker?")];
//!     match chain.answer(&messages).await {
//!         ChainOutcome::Answered { provider, text } => println!("{}: {}", provider, text),
//!         ChainOutcome::Exhausted { .. } => println!("nobody knew"),
//!     }
//!     Ok(())
//! }
//! ```

pub mod chain;
pub mod client;
pub mod config;
pub mod error;
pub mod identity;
pub mod image;

pub use chain::{ChainOutcome, FallbackChain};
pub use client::{
    LlmClient,
    duckduckgo::DuckDuckGoClient,
    gemini::GeminiClient,
    groq::GroqClient,
    wikipedia::WikipediaClient,
};
pub use config::{
    ClientFactory,
    ImageSettings,
    ProviderKind,
    ProviderSettings,
    DUCKDUCKGO_API_URL,
    GEMINI_API_URL,
    GROQ_API_URL,
    HF_ROUTER_URL,
    WIKIPEDIA_URL,
    parse_provider_chain,
};
pub use error::ProviderError;
pub use identity::Identity;
pub use image::{GeneratedImage, HuggingFaceImageClient, ImageParameters};
