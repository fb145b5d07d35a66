use anyhow::Result;
use clap::Parser;

use morsalink::app::{run_web_server, setup_from_cli};
use morsalink::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables; .env.local wins over .env, real env wins over both
    dotenvy::from_filename(".env.local").ok();
    dotenvy::dotenv().ok();

    // Parse CLI arguments
    let cli = Cli::parse();

    morsalink_logging::init_logging(cli.verbose);

    let config = setup_from_cli(&cli)?;
    run_web_server(config).await
}
