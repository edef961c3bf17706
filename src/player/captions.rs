//! Caption and audio track extraction.

use std::collections::HashSet;

use serde_json::Value;

use super::response::{text_of, RawPlayerResponse};
use super::types::{AudioTrack, Caption, CaptionTrack};

/// Cleaned caption list with locally-routed fetch URLs. The label prefers
/// the human display name, then the language code, then "Unknown".
pub fn caption_list(raw: &RawPlayerResponse, video_id: &str) -> Vec<Caption> {
    let Some(tracks) = raw.caption_tracks() else {
        return Vec::new();
    };

    tracks
        .iter()
        .map(|track| {
            let name = track.get("name").and_then(text_of);
            let language_code = track.get("languageCode").and_then(Value::as_str);
            let label_source = name.or(language_code).unwrap_or_default();

            Caption {
                label: name
                    .or(language_code)
                    .unwrap_or("Unknown")
                    .to_string(),
                language_code: language_code.unwrap_or("en").to_string(),
                url: format!(
                    "/api/v1/captions/{}?label={}",
                    video_id,
                    urlencoding::encode(label_source)
                ),
            }
        })
        .collect()
}

/// Upstream-fidelity caption track list.
pub fn caption_tracks(raw: &RawPlayerResponse) -> Vec<CaptionTrack> {
    let Some(tracks) = raw.caption_tracks() else {
        return Vec::new();
    };

    tracks
        .iter()
        .map(|track| {
            let language_code = track
                .get("languageCode")
                .and_then(Value::as_str)
                .unwrap_or_default();

            CaptionTrack {
                base_url: track
                    .get("baseUrl")
                    .and_then(Value::as_str)
                    .unwrap_or_default()
                    .to_string(),
                name: track
                    .pointer("/name/simpleText")
                    .and_then(Value::as_str)
                    .unwrap_or(language_code)
                    .to_string(),
                vss_id: track
                    .get("vssId")
                    .and_then(Value::as_str)
                    .unwrap_or_default()
                    .to_string(),
                language_code: language_code.to_string(),
                is_translatable: track
                    .get("isTranslatable")
                    .and_then(Value::as_bool)
                    .unwrap_or(true),
            }
        })
        .collect()
}

/// Distinct dubbed-audio languages. The explicit upstream list wins; when
/// it is absent the caption tracks are deduplicated by language code in
/// first-seen order.
pub fn audio_tracks(raw: &RawPlayerResponse) -> Vec<AudioTrack> {
    if let Some(tracks) = raw.audio_tracks() {
        return tracks
            .iter()
            .map(|track| {
                let id = track.get("id").and_then(Value::as_str).unwrap_or_default();
                AudioTrack {
                    language_name: track
                        .get("displayName")
                        .and_then(Value::as_str)
                        .unwrap_or(id)
                        .to_string(),
                    language_code: id.to_string(),
                }
            })
            .collect();
    }

    let Some(tracks) = raw.caption_tracks() else {
        return Vec::new();
    };

    let mut seen = HashSet::new();
    let mut derived = Vec::new();
    for track in tracks {
        let Some(language_code) = track.get("languageCode").and_then(Value::as_str) else {
            continue;
        };
        if !seen.insert(language_code.to_string()) {
            continue;
        }
        derived.push(AudioTrack {
            language_name: track
                .pointer("/name/simpleText")
                .and_then(Value::as_str)
                .unwrap_or(language_code)
                .to_string(),
            language_code: language_code.to_string(),
        });
    }

    derived
}
