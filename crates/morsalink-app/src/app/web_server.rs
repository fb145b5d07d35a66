use anyhow::{Context, Result};

use crate::config::AppConfig;
use crate::web::{AppState, WebServer, WebServerConfig};

/// Run the web server
pub async fn run_web_server(config: AppConfig) -> Result<()> {
    let state = AppState::from_config(&config).context("Failed to create provider clients")?;

    let server_config = WebServerConfig {
        bind_addr: config.bind_addr,
        web_dir: config.web_dir.clone(),
    };

    WebServer::new(server_config, state).start().await
}
