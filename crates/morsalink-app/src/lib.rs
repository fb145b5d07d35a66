//! Morsalink AI: a small chat front-end that relays questions to hosted
//! LLM APIs with fallbacks, plus an optional image mode.

pub mod app;
pub mod cli;
pub mod config;
pub mod web;

pub use cli::Cli;
pub use config::{AppConfig, ChatSettings, ConfigError, FileConfig, ResponseMode};
pub use web::{create_router, AppState, WebServer};
