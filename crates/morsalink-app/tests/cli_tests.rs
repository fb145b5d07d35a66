use clap::Parser;
use serial_test::serial;
use std::time::Duration;

use morsalink::config::{AppConfig, FileConfig, ResponseMode};
use morsalink::Cli;
use morsalink_llm_api::ProviderKind;
use morsalink_logging::RequestLogger;

const ENV_VARS: &[&str] = &[
    "MORSALINK_CONFIG",
    "MORSALINK_BIND",
    "MORSALINK_PORT",
    "MORSALINK_PROVIDERS",
    "MORSALINK_MODE",
    "GEMINI_API_KEY",
    "GEMINI_MODEL",
    "GROQ_API_KEY",
    "GROQ_MODEL",
    "HF_TOKEN",
    "HF_IMAGE_MODEL",
];

fn clear_env() {
    for var in ENV_VARS {
        std::env::remove_var(var);
    }
}

#[test]
#[serial]
fn test_flags_parse() {
    clear_env();
    let cli = Cli::try_parse_from([
        "morsalink",
        "--port",
        "8080",
        "--providers",
        "groq,duckduckgo",
        "--mode",
        "json",
        "--typing-delay-ms",
        "0",
        "-v",
    ])
    .unwrap();

    assert_eq!(cli.port, Some(8080));
    assert_eq!(cli.mode, Some(ResponseMode::Json));
    assert!(cli.verbose);

    let cfg = AppConfig::resolve(&cli, FileConfig::default(), RequestLogger::disabled()).unwrap();
    assert_eq!(cfg.chain, vec![ProviderKind::Groq, ProviderKind::DuckDuckGo]);
    assert_eq!(cfg.chat.typing_delay, Duration::ZERO);
}

#[test]
#[serial]
fn test_keys_come_from_environment() {
    clear_env();
    std::env::set_var("GEMINI_API_KEY", "env-gemini");
    std::env::set_var("HF_TOKEN", "env-hf");
    std::env::set_var("MORSALINK_PROVIDERS", "gemini,ddg");

    let cli = Cli::try_parse_from(["morsalink"]).unwrap();
    let cfg = AppConfig::resolve(&cli, FileConfig::default(), RequestLogger::disabled()).unwrap();

    assert_eq!(cfg.providers.gemini_api_key.as_deref(), Some("env-gemini"));
    assert_eq!(cfg.providers.groq_api_key, None);
    assert_eq!(cfg.image.token.as_deref(), Some("env-hf"));
    assert_eq!(cfg.chain, vec![ProviderKind::Gemini, ProviderKind::DuckDuckGo]);

    clear_env();
}

#[test]
#[serial]
fn test_flag_beats_environment() {
    clear_env();
    std::env::set_var("MORSALINK_PORT", "5000");

    let cli = Cli::try_parse_from(["morsalink", "--port", "6000"]).unwrap();
    assert_eq!(cli.port, Some(6000));

    clear_env();
}

#[test]
#[serial]
fn test_invalid_mode_rejected() {
    clear_env();
    assert!(Cli::try_parse_from(["morsalink", "--mode", "sse"]).is_err());
}
