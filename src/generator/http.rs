use std::time::Duration;

use anyhow::{Result, bail};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::consts::GENERATE_PATH;

use super::{GeneratedVideo, Generator};

/// A generator that talks to the real video-generation service over HTTP.
pub struct HttpGenerator {
    base_url: String,
    client: reqwest::Client,
}

impl HttpGenerator {
    /// `base_url` is the service root, e.g. `http://localhost:5000`.
    /// `timeout` bounds the whole request when set; the service itself
    /// imposes none, so the default is unbounded.
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: builder.build()?,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Resolve a service-relative path (as stored in a request's result)
    /// into a full URL for display or for handing to a player.
    pub fn absolute_url(&self, path: &str) -> String {
        join_url(&self.base_url, path)
    }

    fn parse_response(body: &str) -> Result<GeneratedVideo> {
        let response: GenerateResponse = serde_json::from_str(body)
            .map_err(|e| anyhow::anyhow!("malformed service response: {}\nraw: {}", e, body))?;
        if response.video_url.is_empty() {
            bail!("service response has an empty video_url");
        }
        Ok(GeneratedVideo {
            video_url: response.video_url,
        })
    }
}

#[async_trait]
impl Generator for HttpGenerator {
    async fn generate(&self, topic: &str) -> Result<GeneratedVideo> {
        let body = GenerateRequest { topic };

        let resp = self
            .client
            .post(join_url(&self.base_url, GENERATE_PATH))
            .json(&body)
            .send()
            .await?;

        if !resp.status().is_success() {
            let status = resp.status();
            let text = resp.text().await.unwrap_or_default();
            bail!("generation service error ({}): {}", status, text);
        }

        let text = resp.text().await?;
        Self::parse_response(&text)
    }
}

/// Join a base URL and a path without doubling or dropping the slash.
fn join_url(base: &str, path: &str) -> String {
    let base = base.trim_end_matches('/');
    if path.starts_with('/') {
        format!("{base}{path}")
    } else {
        format!("{base}/{path}")
    }
}

// --- Wire types ---

#[derive(Serialize)]
struct GenerateRequest<'a> {
    topic: &'a str,
}

#[derive(Deserialize)]
struct GenerateResponse {
    video_url: String,
}
