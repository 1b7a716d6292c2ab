//! Job description resolution: a URL is fetched and reduced to its visible text,
//! anything else is taken as the job description itself.

use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use reqwest::{header::CONTENT_TYPE, Client, Url};
use tracing::{debug, info};

use crate::errors::AppError;

pub mod html;

const USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

#[async_trait]
pub trait JobSource: Send + Sync {
    async fn fetch(&self, source: &str) -> Result<String, AppError>;
}

/// Scheme-prefix heuristic: `http://` or `https://` (any case) with no inner whitespace.
/// Everything else, including bare domains like `example.com/job`, is literal text.
pub fn looks_like_url(source: &str) -> bool {
    let trimmed = source.trim();
    let lower = trimmed
        .get(..8)
        .map(|prefix| prefix.to_ascii_lowercase())
        .unwrap_or_else(|| trimmed.to_ascii_lowercase());

    (lower.starts_with("http://") || lower.starts_with("https://"))
        && !trimmed.contains(char::is_whitespace)
}

pub struct JobDescriptionFetcher {
    client: Client,
}

impl JobDescriptionFetcher {
    pub fn new(timeout: Duration) -> Result<Self, AppError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self { client })
    }

    pub fn with_client(client: Client) -> Self {
        Self { client }
    }

    async fn fetch_url(&self, raw: &str) -> Result<String, AppError> {
        let url = Url::parse(raw).map_err(|e| AppError::Fetch(format!("invalid URL '{raw}': {e}")))?;

        info!("Fetching job description from {url}");

        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| AppError::Fetch(format!("request to {url} failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::Fetch(format!("{url} returned HTTP {status}")));
        }

        let is_plain_text = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|ct| ct.starts_with("text/plain"))
            .unwrap_or(false);

        let body = response
            .text()
            .await
            .map_err(|e| AppError::Fetch(format!("failed to read body from {url}: {e}")))?;

        let text = if is_plain_text {
            body.trim().to_string()
        } else {
            html::visible_text(&body)
        };

        if text.is_empty() {
            return Err(AppError::Fetch(format!("{url} contained no visible text")));
        }

        debug!("Job page yielded {} characters", text.chars().count());
        Ok(text)
    }
}

#[async_trait]
impl JobSource for JobDescriptionFetcher {
    async fn fetch(&self, source: &str) -> Result<String, AppError> {
        if looks_like_url(source) {
            self.fetch_url(source.trim()).await
        } else {
            debug!("Using job description as literal text");
            Ok(source.to_string())
        }
    }
}
