//! Fetch one Alexa Top Sites ranking and print the decoded response as JSON.
//!
//! # Usage
//!
//! ```text
//! AWS_ACCESS_KEY_ID=... AWS_SECRET_ACCESS_KEY=... TOPSITES_COUNTRY=US topsites
//! ```
//!
//! Ctrl-C cancels the request in flight.
//!
//! # Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `AWS_ACCESS_KEY_ID` / `ACCESS_KEY` | *(required)* | Access key |
//! | `AWS_SECRET_ACCESS_KEY` / `SECRET_KEY` | *(required)* | Secret key |
//! | `TOPSITES_COUNTRY` | *(unset)* | Country code; global ranking when unset |
//! | `TOPSITES_CITY` | *(unset)* | City code |
//! | `TOPSITES_START` | *(unset)* | First rank to return |
//! | `TOPSITES_COUNT` | *(unset)* | Number of sites to return |
//! | `TOPSITES_RESPONSE_GROUP` | `Country` | `Country`, `City`, `ListCountries` or `ListCities` |
//! | `TOPSITES_HOST` | `ats.amazonaws.com` | Service host |
//! | `TOPSITES_TIMEOUT_SECS` | `30` | Request timeout |
//! | `LOG_LEVEL` | `info` | Log level filter |
//! | `RUST_LOG` | *(unset)* | Fine-grained tracing filter (overrides `LOG_LEVEL`) |

use anyhow::{Context, Result, bail};
use topsites_auth::{Credentials, ResponseGroup, TopSitesRequest, zeroize};
use topsites_client::{RequestState, TopSitesClient, TopSitesConfig};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Initialize the tracing subscriber.
///
/// Uses `RUST_LOG` if set, otherwise falls back to the `LOG_LEVEL` config value.
/// Logs go to stderr so stdout carries only the JSON document.
fn init_tracing(log_level: &str) -> Result<()> {
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else {
        EnvFilter::try_new(log_level)
            .with_context(|| format!("invalid log level filter: {log_level}"))?
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    Ok(())
}

/// Read the first of `names` that is set.
fn env_any(names: &[&str]) -> Option<String> {
    names.iter().find_map(|name| std::env::var(name).ok())
}

/// Parse an optional numeric environment variable.
fn env_number(name: &str) -> Result<Option<u32>> {
    std::env::var(name)
        .ok()
        .map(|v| {
            v.parse::<u32>()
                .with_context(|| format!("{name} must be a non-negative integer, got {v:?}"))
        })
        .transpose()
}

/// Build the request descriptor from `TOPSITES_*` environment variables.
fn request_from_env() -> Result<TopSitesRequest> {
    let response_group = match std::env::var("TOPSITES_RESPONSE_GROUP") {
        Ok(v) => v.parse::<ResponseGroup>()?,
        Err(_) => ResponseGroup::default(),
    };

    Ok(TopSitesRequest {
        country_code: std::env::var("TOPSITES_COUNTRY").ok(),
        city_code: std::env::var("TOPSITES_CITY").ok(),
        start: env_number("TOPSITES_START")?,
        count: env_number("TOPSITES_COUNT")?,
        response_group,
    })
}

#[tokio::main]
async fn main() -> Result<()> {
    let config = TopSitesConfig::from_env();
    init_tracing(&config.log_level)?;

    let request = request_from_env()?;
    let access_key = env_any(&["AWS_ACCESS_KEY_ID", "ACCESS_KEY"])
        .context("AWS_ACCESS_KEY_ID or ACCESS_KEY must be set")?;
    let mut secret_key = env_any(&["AWS_SECRET_ACCESS_KEY", "SECRET_KEY"])
        .context("AWS_SECRET_ACCESS_KEY or SECRET_KEY must be set")?
        .into_bytes();

    info!(
        host = %config.host,
        response_group = %request.response_group.display_name(),
        "Fetching top sites"
    );

    let client = TopSitesClient::new(&config).context("failed to build client")?;
    let begun = client.begin(&Credentials::new(&access_key, &secret_key), &request);
    zeroize(&mut secret_key);
    let handle = begun.context("failed to start request")?;

    let state = tokio::select! {
        state = handle.finished() => state,
        _ = tokio::signal::ctrl_c() => {
            warn!("received interrupt, cancelling request");
            handle.cancel();
            handle.state()
        }
    };
    if state == RequestState::Cancelled {
        bail!("request cancelled");
    }

    let response = handle.end().await.context("top sites request failed")?;
    let json = serde_json::to_string_pretty(&response).context("failed to encode response")?;
    println!("{json}");

    Ok(())
}
