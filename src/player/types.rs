use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Synthesized thumbnail descriptor, one per well-known quality tag.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Thumbnail {
    pub quality: String,
    pub url: String,
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthorThumbnail {
    pub url: String,
    pub width: u32,
    pub height: u32,
}

/// Structured storyboard descriptor, built from the board-list upstream shape.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Storyboard {
    pub url: String,
    pub template_url: String,
    pub width: u32,
    pub height: u32,
    pub count: u32,
    pub interval: u32,
    pub storyboard_width: u32,
    pub storyboard_height: u32,
    pub storyboard_count: u32,
}

/// One zoom level decoded from the compact storyboard spec string.
///
/// The per-level subfields are carried verbatim as the strings they were
/// split from; only the derived segment count is numeric.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoryboardLevel {
    pub width: String,
    pub height: String,
    pub thumbs_count: String,
    pub columns: String,
    pub rows: String,
    pub interval: String,
    pub storyboard_count: u32,
    pub url: Vec<String>,
}

/// Cleaned combined (video+audio) stream record.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormatStream {
    pub url: String,
    pub itag: String,
    #[serde(rename = "type")]
    pub mime_type: String,
    pub quality: String,
    pub bitrate: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fps: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resolution: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quality_label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub container: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub encoding: Option<String>,
}

/// Cleaned adaptive (video-only or audio-only) stream record.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdaptiveFormat {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub init: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub index: Option<String>,
    pub bitrate: String,
    pub url: String,
    pub itag: String,
    #[serde(rename = "type")]
    pub mime_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub clen: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lmt: Option<String>,
    pub projection_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fps: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resolution: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quality_label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub container: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub encoding: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audio_quality: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audio_sample_rate: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audio_channels: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color_info: Option<Value>,
}

/// Cleaned caption descriptor with a locally-routed fetch URL.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Caption {
    pub label: String,
    pub language_code: String,
    pub url: String,
}

/// Upstream-fidelity caption track descriptor.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaptionTrack {
    pub base_url: String,
    pub name: String,
    pub vss_id: String,
    pub language_code: String,
    pub is_translatable: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AudioTrack {
    pub language_name: String,
    pub language_code: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaptionsSection {
    pub caption_tracks: Vec<CaptionTrack>,
}

/// The public playback-metadata document. Every field is always present;
/// precision-sensitive numeric fields are decimal strings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoResponse {
    pub status: String,
    pub id: String,
    pub title: String,
    pub length_seconds: String,
    pub keywords: Vec<String>,
    pub channel_title: String,
    pub channel_id: String,
    pub description: String,
    pub thumbnail: Vec<Value>,
    pub allow_ratings: bool,
    pub view_count: String,
    pub is_private: bool,
    pub is_unplugged_corpus: bool,
    pub is_live_content: bool,
    pub storyboards: Vec<StoryboardLevel>,
    pub captions: CaptionsSection,
    pub audio_tracks: Vec<AudioTrack>,
    pub default_video_language: String,
    pub default_video_language_code: String,
    #[serde(rename = "fetchedTS")]
    pub fetched_ts: i64,
    pub expires_in_seconds: String,
    pub formats: Vec<Value>,
    #[serde(rename = "isGCR")]
    pub is_gcr: bool,
    pub adaptive_formats: Vec<Value>,
    pub available_at: i64,
}
