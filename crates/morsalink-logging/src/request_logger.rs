use anyhow::{Context, Result};
use colored::Colorize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::safe_truncate;

const CONSOLE_BODY_LIMIT: usize = 5000;

/// Logs every upstream exchange made by the provider clients.
///
/// A disabled logger still emits one `debug!` line per request so that
/// `RUST_LOG=debug` is enough to follow the fallback chain.
#[derive(Debug, Clone, Default)]
pub struct RequestLogger {
    verbose: bool,
    logs_dir: Option<PathBuf>,
}

impl RequestLogger {
    /// `verbose` dumps requests and responses to the console, `logs_dir`
    /// additionally writes one file per request and response.
    pub fn new(verbose: bool, logs_dir: Option<PathBuf>) -> Self {
        Self { verbose, logs_dir }
    }

    pub fn disabled() -> Self {
        Self::default()
    }

    pub fn is_verbose(&self) -> bool {
        self.verbose
    }

    pub fn logs_dir(&self) -> Option<&Path> {
        self.logs_dir.as_deref()
    }

    /// Identifier pairing a request log with its response log
    pub fn exchange_id(provider: &str) -> String {
        format!(
            "{}-{}",
            chrono::Utc::now().format("%Y%m%d-%H%M%S%3f"),
            provider.replace('/', "-")
        )
    }

    /// Log an outgoing HTTP request
    pub fn log_request(
        &self,
        exchange_id: &str,
        method: &str,
        url: &str,
        body: Option<&serde_json::Value>,
        secret: Option<&str>,
    ) {
        let url = redact_url(url);
        log::debug!("[{}] {} {}", exchange_id, method, url);

        if self.verbose {
            print_request(method, &url, body, secret);
        }

        if let Some(dir) = &self.logs_dir {
            let content = render_request(exchange_id, method, &url, body, secret);
            let file = dir.join(format!("req-{}.txt", exchange_id));
            if let Err(e) = write_log_file(&file, &content) {
                log::warn!("{:#}", e);
            }
        }
    }

    /// Log the response to a request previously passed to `log_request`
    pub fn log_response(
        &self,
        exchange_id: &str,
        status: reqwest::StatusCode,
        headers: &reqwest::header::HeaderMap,
        body: &str,
    ) {
        log::debug!("[{}] -> {} ({} bytes)", exchange_id, status.as_u16(), body.len());

        if self.verbose {
            print_response(status, headers, body);
        }

        if let Some(dir) = &self.logs_dir {
            let content = render_response(exchange_id, status, headers, body);
            let file = dir.join(format!("resp-{}.txt", exchange_id));
            if let Err(e) = write_log_file(&file, &content) {
                log::warn!("{:#}", e);
            }
        }
    }
}

/// Keep only a short prefix of a credential
pub fn mask_secret(secret: &str) -> String {
    let visible = (secret.chars().count() / 4).min(6);
    format!("{}***", secret.chars().take(visible).collect::<String>())
}

/// Hide credentials passed in the query string (Gemini's `key=`)
pub fn redact_url(url: &str) -> String {
    let Ok(mut parsed) = reqwest::Url::parse(url) else {
        return url.to_string();
    };

    if parsed.query().is_none() {
        return url.to_string();
    }

    let pairs: Vec<(String, String)> = parsed
        .query_pairs()
        .map(|(k, v)| {
            let v = if k == "key" || k == "api_key" { mask_secret(&v) } else { v.into_owned() };
            (k.into_owned(), v)
        })
        .collect();

    parsed.query_pairs_mut().clear().extend_pairs(pairs);
    parsed.to_string()
}

fn write_log_file(path: &Path, content: &str) -> Result<()> {
    fs::write(path, content)
        .with_context(|| format!("Failed to write request log to {}", path.display()))
}

fn render_request(
    exchange_id: &str,
    method: &str,
    url: &str,
    body: Option<&serde_json::Value>,
    secret: Option<&str>,
) -> String {
    let mut log_content = String::new();
    log_content.push_str("HTTP REQUEST LOG\n");
    log_content.push_str("================\n\n");
    log_content.push_str(&format!("Exchange: {}\n", exchange_id));
    log_content.push_str(&format!("Method: {}\n", method));
    log_content.push_str(&format!("URL: {}\n", url));

    if let Ok(parsed_url) = reqwest::Url::parse(url) {
        log_content.push_str(&format!("Host: {}\n", parsed_url.host_str().unwrap_or("unknown")));
    }

    log_content.push_str("\nHeaders:\n");
    if body.is_some() {
        log_content.push_str("  Content-Type: application/json\n");
    }
    if let Some(secret) = secret {
        log_content.push_str(&format!("  Authorization: Bearer {}\n", mask_secret(secret)));
    }

    if let Some(body) = body {
        log_content.push_str("\nRequest Body:\n");
        match serde_json::to_string_pretty(body) {
            Ok(json) => {
                log_content.push_str(&json);
                log_content.push('\n');
            }
            Err(e) => log_content.push_str(&format!("Error serializing request: {}\n", e)),
        }
    }

    log_content
}

fn render_response(
    exchange_id: &str,
    status: reqwest::StatusCode,
    headers: &reqwest::header::HeaderMap,
    body: &str,
) -> String {
    let mut log_content = String::new();
    log_content.push_str("HTTP RESPONSE LOG\n");
    log_content.push_str("=================\n\n");
    log_content.push_str(&format!("Exchange: {}\n", exchange_id));
    log_content.push_str(&format!(
        "Status: {} {}\n\n",
        status.as_u16(),
        status.canonical_reason().unwrap_or("Unknown")
    ));

    log_content.push_str("Headers:\n");
    for (name, value) in headers.iter() {
        if let Ok(val_str) = value.to_str() {
            log_content.push_str(&format!("  {}: {}\n", name.as_str(), val_str));
        }
    }

    log_content.push_str("\nResponse Body:\n");
    log_content.push_str(&pretty_body(body));
    log_content.push('\n');
    log_content.push_str(&format!("\n---\nResponse Size: {} bytes\n", body.len()));

    log_content
}

fn pretty_body(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| serde_json::to_string_pretty(&v).ok())
        .unwrap_or_else(|| body.to_string())
}

fn print_truncated(text: &str) {
    if text.chars().count() > CONSOLE_BODY_LIMIT {
        println!("{}", safe_truncate(text, CONSOLE_BODY_LIMIT));
        println!("\n{}", format!("... (truncated, total {} bytes)", text.len()).bright_black());
    } else {
        println!("{}", text);
    }
}

fn print_request(method: &str, url: &str, body: Option<&serde_json::Value>, secret: Option<&str>) {
    println!("\n{}", "═".repeat(80).bright_cyan());
    println!("{}", "🔍 HTTP REQUEST DEBUG".bright_cyan().bold());
    println!("{}", "═".repeat(80).bright_cyan());

    println!("{}: {} {}", "Request".bright_yellow(), method, url);
    if let Some(secret) = secret {
        println!("{}: Bearer {}", "Authorization".bright_yellow(), mask_secret(secret));
    }

    if let Some(body) = body {
        println!("\n{}", "Request Body:".bright_yellow());
        match serde_json::to_string_pretty(body) {
            Ok(json) => print_truncated(&json),
            Err(e) => println!("{}", format!("Error serializing request: {}", e).red()),
        }
    }

    println!("{}", "═".repeat(80).bright_cyan());
    println!();
}

fn print_response(status: reqwest::StatusCode, headers: &reqwest::header::HeaderMap, body: &str) {
    println!("\n{}", "═".repeat(80).bright_green());
    println!("{}", "📥 HTTP RESPONSE DEBUG".bright_green().bold());
    println!("{}", "═".repeat(80).bright_green());

    println!(
        "{}: {} {}",
        "Status".bright_yellow(),
        status.as_u16(),
        status.canonical_reason().unwrap_or("Unknown")
    );

    println!("\n{}", "Headers:".bright_yellow());
    for (name, value) in headers.iter() {
        if let Ok(val_str) = value.to_str() {
            println!("  {}: {}", name.as_str().bright_white(), val_str);
        }
    }

    println!("\n{}", "Response Body:".bright_yellow());
    print_truncated(&pretty_body(body));

    println!("{}", "═".repeat(80).bright_green());
    println!();
}
