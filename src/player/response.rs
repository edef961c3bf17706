//! Safe accessors over the raw player response document.
//!
//! Upstream field presence is never guaranteed, so every accessor tolerates
//! missing or mistyped subtrees and degrades to a default instead of failing.

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Clone)]
pub struct RawPlayerResponse {
    raw: Value,
}

impl RawPlayerResponse {
    pub fn new(raw: Value) -> Self {
        Self { raw }
    }

    pub fn raw(&self) -> &Value {
        &self.raw
    }

    pub fn video_details(&self) -> VideoDetails {
        self.partial(self.raw.get("videoDetails"))
    }

    pub fn microformat(&self) -> Microformat {
        self.partial(self.raw.pointer("/microformat/playerMicroformatRenderer"))
    }

    pub fn playability_status(&self) -> PlayabilityStatus {
        self.partial(self.raw.get("playabilityStatus"))
    }

    pub fn formats(&self) -> Option<&Vec<Value>> {
        self.raw.pointer("/streamingData/formats")?.as_array()
    }

    pub fn adaptive_formats(&self) -> Option<&Vec<Value>> {
        self.raw.pointer("/streamingData/adaptiveFormats")?.as_array()
    }

    pub fn expires_in_seconds(&self) -> Option<&str> {
        self.raw
            .pointer("/streamingData/expiresInSeconds")?
            .as_str()
    }

    pub fn caption_tracks(&self) -> Option<&Vec<Value>> {
        self.raw
            .pointer("/captions/playerCaptionsTracklistRenderer/captionTracks")?
            .as_array()
    }

    pub fn audio_tracks(&self) -> Option<&Vec<Value>> {
        self.raw
            .pointer("/captions/playerCaptionsTracklistRenderer/audioTracks")?
            .as_array()
    }

    pub fn storyboard_spec(&self) -> Option<&str> {
        self.raw
            .pointer("/storyboards/playerStoryboardSpecRenderer/spec")?
            .as_str()
    }

    /// The structured board-list storyboard shape, when upstream sends it
    /// instead of the spec string.
    pub fn storyboard_boards(&self) -> Option<&Vec<Value>> {
        let storyboards = self.raw.get("storyboards")?;
        if storyboards.get("type").and_then(Value::as_str) != Some("PlayerStoryboardSpec") {
            return None;
        }
        storyboards.get("boards")?.as_array()
    }

    pub fn video_thumbnails(&self) -> Option<&Vec<Value>> {
        self.raw
            .pointer("/videoDetails/thumbnail/thumbnails")?
            .as_array()
    }

    pub fn publish_date(&self) -> Option<&str> {
        self.raw
            .pointer("/microformat/playerMicroformatRenderer/publishDate")?
            .as_str()
    }

    fn partial<T: DeserializeOwned + Default>(&self, subtree: Option<&Value>) -> T {
        subtree
            .cloned()
            .and_then(|value| serde_json::from_value(value).ok())
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct VideoDetails {
    pub video_id: Option<String>,
    pub title: Option<String>,
    pub length_seconds: Option<String>,
    pub keywords: Option<Vec<String>>,
    pub author: Option<String>,
    pub channel_id: Option<String>,
    pub short_description: Option<String>,
    pub allow_ratings: Option<bool>,
    pub view_count: Option<String>,
    pub is_private: Option<bool>,
    pub is_unplugged_corpus: Option<bool>,
    pub is_live_content: Option<bool>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Microformat {
    pub default_language: Option<String>,
    pub publish_date: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PlayabilityStatus {
    pub status: Option<String>,
    pub reason: Option<String>,
}

/// Extracts the display text of an upstream name object, which comes in
/// several shapes: `{"simpleText": ..}`, `{"runs": [{"text": ..}]}` or
/// `{"text": ..}`.
pub fn text_of(name: &Value) -> Option<&str> {
    if let Some(text) = name.get("simpleText").and_then(Value::as_str) {
        return Some(text);
    }
    if let Some(text) = name.pointer("/runs/0/text").and_then(Value::as_str) {
        return Some(text);
    }
    name.get("text").and_then(Value::as_str)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn accessors_tolerate_empty_document() {
        let raw = RawPlayerResponse::new(json!({}));
        assert!(raw.video_details().title.is_none());
        assert!(raw.playability_status().status.is_none());
        assert!(raw.formats().is_none());
        assert!(raw.storyboard_spec().is_none());
        assert!(raw.caption_tracks().is_none());
    }

    #[test]
    fn video_details_partial_fields() {
        let raw = RawPlayerResponse::new(json!({
            "videoDetails": { "title": "A video", "viewCount": "42" }
        }));
        let details = raw.video_details();
        assert_eq!(details.title.as_deref(), Some("A video"));
        assert_eq!(details.view_count.as_deref(), Some("42"));
        assert!(details.channel_id.is_none());
    }

    #[test]
    fn storyboard_boards_requires_matching_kind() {
        let raw = RawPlayerResponse::new(json!({
            "storyboards": { "type": "SomethingElse", "boards": [{}] }
        }));
        assert!(raw.storyboard_boards().is_none());

        let raw = RawPlayerResponse::new(json!({
            "storyboards": { "type": "PlayerStoryboardSpec", "boards": [{}] }
        }));
        assert_eq!(raw.storyboard_boards().map(|b| b.len()), Some(1));
    }

    #[test]
    fn text_of_handles_all_name_shapes() {
        assert_eq!(text_of(&json!({"simpleText": "English"})), Some("English"));
        assert_eq!(
            text_of(&json!({"runs": [{"text": "French"}]})),
            Some("French")
        );
        assert_eq!(text_of(&json!({"text": "German"})), Some("German"));
        assert_eq!(text_of(&json!({})), None);
    }
}
