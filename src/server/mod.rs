//! HTTP surface: a single player-metadata route.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::{header, HeaderMap, HeaderValue},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use chrono::Utc;
use serde::Deserialize;

use crate::config::Config;
use crate::crypto::QueryEncryptor;
use crate::error::{ApiError, ApiResult};
use crate::player::{assemble_video, AssembleOptions, RawPlayerResponse};
use crate::upstream::{validate_video_id, PlayerClient};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub client: Arc<dyn PlayerClient>,
    pub encryptor: Arc<dyn QueryEncryptor>,
    minter_ready: Arc<AtomicBool>,
}

impl AppState {
    pub fn new(
        config: Arc<Config>,
        client: Arc<dyn PlayerClient>,
        encryptor: Arc<dyn QueryEncryptor>,
    ) -> Self {
        Self {
            config,
            client,
            encryptor,
            minter_ready: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Flipped once the token-minting dependency has produced its first
    /// token. Only consulted when `po_token_enabled` is set.
    pub fn mark_minter_ready(&self) {
        self.minter_ready.store(true, Ordering::SeqCst);
    }

    pub fn minter_ready(&self) -> bool {
        self.minter_ready.load(Ordering::SeqCst)
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/{video_id}", get(get_video))
        .with_state(state)
}

#[derive(Debug, Deserialize)]
struct VideoQuery {
    local: Option<String>,
}

async fn get_video(
    State(state): State<AppState>,
    Path(video_id): Path<String>,
    Query(query): Query<VideoQuery>,
    headers: HeaderMap,
) -> ApiResult<Response> {
    if video_id.is_empty() {
        return Err(ApiError::MissingVideoId);
    }
    if !validate_video_id(&video_id) {
        return Err(ApiError::InvalidVideoId);
    }

    if state.config.youtube.po_token_enabled && !state.minter_ready() {
        return Err(ApiError::TokenMinterNotReady);
    }

    let raw = state.client.player_response(&video_id).await?;
    let raw = RawPlayerResponse::new(raw);

    let base_url = request_origin(&headers, &state.config);
    let local = query.local.as_deref().is_some_and(|value| !value.is_empty());

    let opts = AssembleOptions {
        video_id: &video_id,
        base_url: &base_url,
        local,
        config: &state.config,
        encryptor: state.encryptor.as_ref(),
        now: Utc::now(),
    };
    let assembled = assemble_video(&raw, &opts)?;

    tracing::debug!(
        "Assembled {}: {} formats, {} adaptive formats",
        video_id,
        assembled.document.formats.len(),
        assembled.document.adaptive_formats.len()
    );

    let mut response = Json(assembled.document).into_response();
    response.headers_mut().insert(
        header::ACCESS_CONTROL_ALLOW_ORIGIN,
        HeaderValue::from_static("*"),
    );
    Ok(response)
}

fn request_origin(headers: &HeaderMap, config: &Config) -> String {
    let host = headers
        .get(header::HOST)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string)
        .unwrap_or_else(|| format!("{}:{}", config.server.host, config.server.port));
    format!("http://{host}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn origin_falls_back_to_configured_bind() {
        let config = Config::default();
        let origin = request_origin(&HeaderMap::new(), &config);
        assert_eq!(origin, "http://0.0.0.0:8282");
    }

    #[test]
    fn origin_prefers_host_header() {
        let config = Config::default();
        let mut headers = HeaderMap::new();
        headers.insert(header::HOST, HeaderValue::from_static("tube.example.com"));
        assert_eq!(
            request_origin(&headers, &config),
            "http://tube.example.com"
        );
    }
}
