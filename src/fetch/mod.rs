// src/fetch/mod.rs

use anyhow::{Context, Result};
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, info, instrument};
use url::Url;

use crate::config::Config;

/// Async client with the configured timeout.
pub fn client(cfg: &Config) -> Result<Client> {
    Client::builder()
        .timeout(cfg.timeout())
        .gzip(true)
        .build()
        .context("building HTTP client")
}

/// GET the CSV body. Any transport error or non-success status is returned as-is.
#[instrument(level = "info", skip(client), fields(url = %url))]
pub async fn fetch_csv(client: &Client, url: &Url) -> Result<String> {
    debug!("fetching");
    let text = client
        .get(url.clone())
        .send()
        .await
        .with_context(|| format!("GET {} failed", url))?
        .error_for_status()
        .with_context(|| format!("Non-success status {}", url))?
        .text()
        .await
        .with_context(|| format!("Reading text from {}", url))?;
    info!(bytes = text.len(), "fetched");
    Ok(text)
}

/// Blocking variant for callers without a runtime.
pub mod blocking {
    use super::*;
    use reqwest::blocking::Client;

    pub fn client(timeout: Duration) -> Result<Client> {
        Client::builder()
            .timeout(timeout)
            .gzip(true)
            .build()
            .context("building blocking HTTP client")
    }

    #[instrument(level = "info", skip(client), fields(url = %url))]
    pub fn fetch_csv(client: &Client, url: &Url) -> Result<String> {
        let text = client
            .get(url.clone())
            .send()
            .with_context(|| format!("GET {} failed", url))?
            .error_for_status()
            .with_context(|| format!("Non-success status {}", url))?
            .text()
            .with_context(|| format!("Reading text from {}", url))?;
        info!(bytes = text.len(), "fetched");
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // nothing listens on port 1
    const CLOSED: &str = "http://127.0.0.1:1/";

    #[test]
    fn blocking_fetch_reports_refused_connection() -> Result<()> {
        let client = blocking::client(Duration::from_secs(5))?;
        let url = Url::parse(CLOSED)?;
        let err = blocking::fetch_csv(&client, &url).unwrap_err();
        assert!(format!("{:#}", err).contains("GET http://127.0.0.1:1/ failed"));
        Ok(())
    }

    #[tokio::test]
    async fn async_fetch_reports_refused_connection() -> Result<()> {
        let client = client(&Config::default())?;
        let url = Url::parse(CLOSED)?;
        assert!(fetch_csv(&client, &url).await.is_err());
        Ok(())
    }
}
