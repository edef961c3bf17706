//! Upstream player-response fetching and video-id validation.

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde_json::{json, Value};

use crate::config::YoutubeConfig;

const PLAYER_ENDPOINT: &str = "https://www.youtube.com/youtubei/v1/player?prettyPrint=false";

/// Video ids are exactly 11 characters of the URL-safe base64 alphabet.
pub fn validate_video_id(id: &str) -> bool {
    id.len() == 11
        && id
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'_' || b == b'-')
}

#[async_trait]
pub trait PlayerClient: Send + Sync {
    async fn player_response(&self, video_id: &str) -> Result<Value>;
}

pub struct InnertubeClient {
    client: reqwest::Client,
    client_version: String,
}

impl InnertubeClient {
    pub fn new(config: &YoutubeConfig) -> Self {
        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(std::time::Duration::from_secs(config.timeout))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            client_version: config.client_version.clone(),
        }
    }
}

#[async_trait]
impl PlayerClient for InnertubeClient {
    async fn player_response(&self, video_id: &str) -> Result<Value> {
        let body = json!({
            "videoId": video_id,
            "context": {
                "client": {
                    "clientName": "WEB",
                    "clientVersion": self.client_version,
                    "hl": "en",
                    "gl": "US",
                }
            },
            "contentCheckOk": true,
            "racyCheckOk": true,
        });

        tracing::debug!("Requesting player response for {}", video_id);

        let response = self
            .client
            .post(PLAYER_ENDPOINT)
            .header("Origin", "https://www.youtube.com")
            .header("Referer", "https://www.youtube.com/")
            .json(&body)
            .send()
            .await
            .context("sending player request")?;

        if !response.status().is_success() {
            anyhow::bail!("Player request failed: HTTP {}", response.status());
        }

        let parsed = response
            .json::<Value>()
            .await
            .context("decoding player response")?;

        tracing::debug!(
            "Player response keys: {:?}",
            parsed.as_object().map(|o| o.keys().collect::<Vec<_>>())
        );

        Ok(parsed)
    }
}
