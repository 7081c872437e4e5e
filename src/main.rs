//! request-client: send one HTTP request with full request/response logging.
//!
//! ```text
//! request-client [--config client.toml] [--base-url URL] [-H K:V]... [--body TEXT] METHOD PATH
//! ```

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;

use request_client::config::validation::validate_config;
use request_client::config::{load_config, ClientConfig, ConfigError};
use request_client::observability::logging::init_logging;
use request_client::{Client, Request};

#[derive(Parser)]
#[command(name = "request-client")]
#[command(about = "Send an HTTP request and log it with a correlation ID", long_about = None)]
struct Cli {
    /// TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Base URL, overrides the configuration file
    #[arg(short, long)]
    base_url: Option<String>,

    /// Extra header as `Name: value` (repeatable)
    #[arg(short = 'H', long = "header", value_parser = parse_header)]
    headers: Vec<(String, String)>,

    /// Body sent verbatim
    #[arg(short = 'd', long)]
    body: Option<String>,

    /// Correlation ID to send instead of a generated one
    #[arg(long)]
    request_id: Option<String>,

    /// Log request and response bodies without truncation
    #[arg(long)]
    full_bodies: bool,

    /// HTTP method
    method: String,

    /// Path appended to the base URL
    path: String,
}

fn parse_header(s: &str) -> Result<(String, String), String> {
    let (name, value) = s
        .split_once(':')
        .ok_or_else(|| format!("expected `Name: value`, got '{}'", s))?;
    Ok((name.trim().to_string(), value.trim().to_string()))
}

/// Load the configuration file (or defaults) and apply the `--base-url` override.
fn resolve_config(path: Option<&Path>, base_url: Option<String>) -> Result<ClientConfig, ConfigError> {
    let mut config = match path {
        Some(path) => load_config(path)?,
        None => ClientConfig::default(),
    };
    if let Some(base_url) = base_url {
        config.base_url = base_url;
        validate_config(&config).map_err(ConfigError::Validation)?;
    }
    Ok(config)
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match resolve_config(cli.config.as_deref(), cli.base_url) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = init_logging(&config.logging) {
        eprintln!("Error: failed to initialize logging: {}", e);
        return ExitCode::FAILURE;
    }

    let client = match Client::from_config(&config) {
        Ok(client) => client,
        Err(e) => {
            tracing::error!(error = %e, "Failed to build HTTP client");
            return ExitCode::FAILURE;
        }
    };

    let mut request: Request = Request::new(cli.method.to_uppercase(), cli.path);
    for (name, value) in cli.headers {
        request.header.insert(name, value);
    }
    if let Some(body) = cli.body {
        request = request.with_body(body);
    }
    if let Some(request_id) = cli.request_id {
        request.request_id = request_id;
    }
    request.unlimit_log_request_body = cli.full_bodies;
    request.unlimit_log_response_body = cli.full_bodies;

    match client.execute(&mut request).await {
        Ok(res) => {
            println!("{}", res.status_line());
            println!("{}", res.body_string());
            if res.status.is_success() {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            }
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
