use anyhow::Result;
use axum::Router;
use colored::Colorize;
use std::net::SocketAddr;
use std::path::PathBuf;
use tower_http::{
    cors::{Any, CorsLayer},
    services::ServeDir,
};

use crate::web::routes::{self, AppState};

/// Web server configuration
pub struct WebServerConfig {
    pub bind_addr: SocketAddr,
    pub web_dir: Option<PathBuf>,
}

/// Web server instance
pub struct WebServer {
    config: WebServerConfig,
    state: AppState,
}

impl WebServer {
    /// Create a new web server
    pub fn new(config: WebServerConfig, state: AppState) -> Self {
        Self { config, state }
    }

    /// Router with every layer applied
    pub fn router(&self) -> Router {
        let mut app = routes::create_router(self.state.clone());

        // The UI may be hosted elsewhere during development
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);

        app = app.layer(cors);

        // Serve static files if web_dir is provided
        if let Some(web_dir) = &self.config.web_dir {
            if web_dir.exists() {
                log::info!("Serving static files from: {}", web_dir.display());
                app = app.nest_service("/static", ServeDir::new(web_dir));
            } else {
                log::warn!("Static directory {} does not exist, /static disabled", web_dir.display());
            }
        }

        app
    }

    /// Start the web server and run until Ctrl-C
    pub async fn start(self) -> Result<()> {
        let app = self.router();

        println!("{} http://{}", "🌐 Morsalink listening on".bright_green().bold(), self.config.bind_addr);
        println!("   Providers: {}", self.state.chain.names().join(" → "));
        println!(
            "   Image generation: {}",
            if self.state.image.has_token() { "enabled".green() } else { "disabled (HF_TOKEN missing)".yellow() }
        );

        let listener = tokio::net::TcpListener::bind(&self.config.bind_addr).await?;
        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        log::info!("server stopped");
        Ok(())
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        log::error!("failed to listen for Ctrl-C: {}", e);
        std::future::pending::<()>().await;
    }
    log::info!("shutdown requested");
}
