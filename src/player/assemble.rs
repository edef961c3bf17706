//! Response assembly: the linear pipeline that turns a raw player response
//! into the public playback-metadata document.

use chrono::{DateTime, Utc};
use serde_json::{Map, Value};

use crate::config::Config;
use crate::crypto::QueryEncryptor;
use crate::error::ApiError;

use super::response::RawPlayerResponse;
use super::types::{
    AdaptiveFormat, AudioTrack, AuthorThumbnail, Caption, CaptionsSection, FormatStream,
    Storyboard, Thumbnail, VideoResponse,
};
use super::{captions, description, formats, localize, reltime, storyboards, thumbnails};

/// Fallback validity window when upstream omits `expiresInSeconds`.
const DEFAULT_EXPIRES_IN_SECONDS: &str = "21540";

pub struct AssembleOptions<'a> {
    pub video_id: &'a str,
    /// Request origin used for synthesized thumbnail URLs.
    pub base_url: &'a str,
    /// Route media URLs through the local origin.
    pub local: bool,
    pub config: &'a Config,
    pub encryptor: &'a dyn QueryEncryptor,
    /// Injected so callers can fix the clock; only the two timestamp
    /// fields depend on it.
    pub now: DateTime<Utc>,
}

/// Everything the engine derives from one raw response. `document` is the
/// public contract; the remaining fields are the cleaned representations
/// kept for programmatic consumers.
#[derive(Debug)]
pub struct AssembledVideo {
    pub document: VideoResponse,
    pub format_streams: Vec<FormatStream>,
    pub adaptive_formats: Vec<AdaptiveFormat>,
    pub captions: Vec<Caption>,
    pub thumbnails: Vec<Thumbnail>,
    pub author_thumbnails: Vec<AuthorThumbnail>,
    pub storyboards: Vec<Storyboard>,
    pub description_html: String,
    pub published_ts: i64,
    pub published_text: String,
}

/// Runs the conversion components against a playable response and merges
/// their outputs. Every document field gets a default; only the playability
/// gate can fail.
pub fn assemble_video(
    raw: &RawPlayerResponse,
    opts: &AssembleOptions<'_>,
) -> Result<AssembledVideo, ApiError> {
    let playability = raw.playability_status();
    if playability.status.as_deref() != Some("OK") {
        return Err(ApiError::Unplayable {
            reason: playability.reason,
        });
    }

    let details = raw.video_details();
    let microformat = raw.microformat();

    let mut format_streams = Vec::new();
    if let Some(entries) = raw.formats() {
        for entry in entries {
            let mut converted = formats::convert_format_stream(entry);
            if opts.local {
                converted.url = localize_stream_url(opts, &converted.url);
            }
            format_streams.push(converted);
        }
    }

    let mut adaptive_streams = Vec::new();
    if let Some(entries) = raw.adaptive_formats() {
        for entry in entries {
            let mut converted = formats::convert_adaptive_format(entry);
            if opts.local {
                converted.url = localize_stream_url(opts, &converted.url);
            }
            adaptive_streams.push(converted);
        }
    }

    let raw_formats: Vec<Value> = raw
        .formats()
        .map(|entries| entries.iter().map(formats::raw_format).collect())
        .unwrap_or_default();
    let raw_adaptive_formats: Vec<Value> = raw
        .adaptive_formats()
        .map(|entries| entries.iter().map(formats::raw_adaptive_format).collect())
        .unwrap_or_default();

    let caption_tracks = captions::caption_tracks(raw);
    let caption_list = captions::caption_list(raw, opts.video_id);
    let audio_tracks: Vec<AudioTrack> = captions::audio_tracks(raw);

    let storyboard_levels = storyboards::storyboard_levels(raw);
    let structured_storyboards = storyboards::structured_storyboards(raw, opts.video_id);

    let synthesized_thumbnails = thumbnails::generate_thumbnails(opts.video_id, opts.base_url);
    let author_thumbnails = details
        .channel_id
        .as_deref()
        .map(thumbnails::author_thumbnails)
        .unwrap_or_default();

    let description_raw = details.short_description.clone().unwrap_or_default();
    let description_html = description::description_to_html(&description_raw);

    let (published_ts, published_text) = match raw
        .publish_date()
        .and_then(reltime::parse_publish_date)
    {
        Some(date) => (date.timestamp(), reltime::relative_time(date, opts.now)),
        None => (0, String::new()),
    };

    let fetched = opts.now.timestamp();
    let default_language = microformat.default_language;

    let document = VideoResponse {
        status: playability.status.unwrap_or_else(|| "OK".to_string()),
        id: details
            .video_id
            .unwrap_or_else(|| opts.video_id.to_string()),
        title: details.title.unwrap_or_default(),
        length_seconds: details
            .length_seconds
            .unwrap_or_else(|| "0".to_string()),
        keywords: details.keywords.unwrap_or_default(),
        channel_title: details.author.unwrap_or_default(),
        channel_id: details.channel_id.unwrap_or_default(),
        description: description_raw,
        thumbnail: passthrough_thumbnails(raw),
        allow_ratings: details.allow_ratings.unwrap_or(true),
        view_count: details.view_count.unwrap_or_else(|| "0".to_string()),
        is_private: details.is_private.unwrap_or(false),
        is_unplugged_corpus: details.is_unplugged_corpus.unwrap_or(false),
        is_live_content: details.is_live_content.unwrap_or(false),
        storyboards: storyboard_levels,
        captions: CaptionsSection { caption_tracks },
        audio_tracks,
        default_video_language: default_language
            .clone()
            .unwrap_or_else(|| "English".to_string()),
        default_video_language_code: default_language.unwrap_or_else(|| "en".to_string()),
        fetched_ts: fetched,
        expires_in_seconds: raw
            .expires_in_seconds()
            .unwrap_or(DEFAULT_EXPIRES_IN_SECONDS)
            .to_string(),
        formats: raw_formats,
        is_gcr: false,
        adaptive_formats: raw_adaptive_formats,
        available_at: fetched,
    };

    Ok(AssembledVideo {
        document,
        format_streams,
        adaptive_formats: adaptive_streams,
        captions: caption_list,
        thumbnails: synthesized_thumbnails,
        author_thumbnails,
        storyboards: structured_storyboards,
        description_html,
        published_ts,
        published_text,
    })
}

fn localize_stream_url(opts: &AssembleOptions<'_>, url: &str) -> String {
    localize::localize_url(
        url,
        &opts.config.server.base_path,
        opts.config.server.encrypt_query_params,
        opts.encryptor,
    )
}

/// Copies the upstream thumbnail descriptors, keeping only url/width/height.
fn passthrough_thumbnails(raw: &RawPlayerResponse) -> Vec<Value> {
    let Some(thumbs) = raw.video_thumbnails() else {
        return Vec::new();
    };

    thumbs
        .iter()
        .map(|thumb| {
            let mut copied = Map::new();
            for key in ["url", "width", "height"] {
                if let Some(value) = thumb.get(key) {
                    copied.insert(key.to_string(), value.clone());
                }
            }
            Value::Object(copied)
        })
        .collect()
}
