use clap::Parser;
use std::path::PathBuf;

use crate::config::ResponseMode;

/// CLI arguments for morsalink
///
/// Every option can also come from the TOML config file; flags and
/// environment variables take precedence over the file.
#[derive(Parser, Debug, Default)]
#[command(name = "morsalink")]
#[command(about = "Morsalink AI - chat front-end relaying questions to Gemini, Groq, DuckDuckGo and Wikipedia")]
#[command(version)]
pub struct Cli {
    /// Path to a TOML config file (default: ./morsalink.toml when present)
    #[arg(long, short = 'c', value_name = "PATH", env = "MORSALINK_CONFIG")]
    pub config: Option<PathBuf>,

    /// Web server bind address
    #[arg(long, value_name = "ADDR", env = "MORSALINK_BIND")]
    pub bind: Option<String>,

    /// Web server port
    #[arg(long, short = 'p', env = "MORSALINK_PORT")]
    pub port: Option<u16>,

    /// Providers to try in order, comma separated (gemini, groq, duckduckgo, wikipedia)
    #[arg(long, value_name = "LIST", env = "MORSALINK_PROVIDERS")]
    pub providers: Option<String>,

    /// How chat replies are sent to the browser
    #[arg(long, value_enum, env = "MORSALINK_MODE")]
    pub mode: Option<ResponseMode>,

    /// Delay between characters in typing mode (0 disables throttling)
    #[arg(long, value_name = "MS")]
    pub typing_delay_ms: Option<u64>,

    /// Gemini API key
    #[arg(long, value_name = "KEY", env = "GEMINI_API_KEY", hide_env_values = true)]
    pub gemini_key: Option<String>,

    /// Gemini model name
    #[arg(long, value_name = "MODEL", env = "GEMINI_MODEL")]
    pub gemini_model: Option<String>,

    /// Groq API key
    #[arg(long, value_name = "KEY", env = "GROQ_API_KEY", hide_env_values = true)]
    pub groq_key: Option<String>,

    /// Groq model name
    #[arg(long, value_name = "MODEL", env = "GROQ_MODEL")]
    pub groq_model: Option<String>,

    /// Hugging Face token for image generation
    #[arg(long, value_name = "TOKEN", env = "HF_TOKEN", hide_env_values = true)]
    pub hf_token: Option<String>,

    /// Hugging Face text-to-image model
    #[arg(long, value_name = "MODEL", env = "HF_IMAGE_MODEL")]
    pub image_model: Option<String>,

    /// Upstream request timeout in seconds (default: no timeout)
    #[arg(long, value_name = "SECS")]
    pub timeout_secs: Option<u64>,

    /// Directory served under /static
    #[arg(long, value_name = "DIR")]
    pub web_dir: Option<PathBuf>,

    /// Enable verbose debug output (dumps upstream HTTP requests and responses)
    #[arg(long, short = 'v')]
    pub verbose: bool,

    /// Write every upstream request and response to ~/.morsalink/logs
    #[arg(long)]
    pub log_requests: bool,
}
