// Logging module - process logger setup and upstream request logging
pub mod request_logger;

use std::path::PathBuf;
use anyhow::{Result, Context};

pub use request_logger::{RequestLogger, mask_secret, redact_url};

/// Initialise the `log` facade.
///
/// `RUST_LOG` wins when set; otherwise `info`, or `debug` for our own
/// crates when `verbose` is on.
pub fn init_logging(verbose: bool) {
    let default_filter = if verbose {
        "info,morsalink=debug,morsalink_llm_api=debug,morsalink_logging=debug"
    } else {
        "info"
    };

    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp_millis()
        .try_init();
}

/// Safely truncate a string to a maximum number of characters
pub fn safe_truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else {
        // Reserve space for "..." suffix
        let trunc_chars = max_chars.saturating_sub(3);
        format!("{}...", s.chars().take(trunc_chars).collect::<String>())
    }
}

/// Get or create the base morsalink directory (~/.morsalink)
pub fn get_morsalink_dir() -> Result<PathBuf> {
    let home_dir = std::env::var("HOME")
        .or_else(|_| std::env::var("USERPROFILE"))
        .context("Failed to get home directory")?;

    let dir = PathBuf::from(home_dir).join(".morsalink");

    if !dir.exists() {
        std::fs::create_dir_all(&dir)
            .context("Failed to create morsalink directory")?;
    }

    Ok(dir)
}

/// Get or create the logs directory (~/.morsalink/logs)
pub fn get_logs_dir() -> Result<PathBuf> {
    let logs_dir = get_morsalink_dir()?.join("logs");

    if !logs_dir.exists() {
        std::fs::create_dir_all(&logs_dir)
            .context("Failed to create logs directory")?;
    }

    Ok(logs_dir)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_safe_truncate_short_string_untouched() {
        assert_eq!(safe_truncate("hello", 10), "hello");
    }

    #[test]
    fn test_safe_truncate_counts_chars_not_bytes() {
        assert_eq!(safe_truncate("ééééééé", 5), "éé...");
        assert_eq!(safe_truncate("abcdef", 2), "...");
    }
}
