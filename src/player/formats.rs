//! Stream format conversion.
//!
//! Two independent output shapes are produced from the same upstream
//! descriptors: a cleaned, language-neutral record (`FormatStream` /
//! `AdaptiveFormat`) and a raw-passthrough object that keeps upstream field
//! names and value types verbatim. They share only the mime decomposition.

use regex::Regex;
use serde_json::{Map, Value};

use super::types::{AdaptiveFormat, FormatStream};

/// Upstream fields copied verbatim into every raw-passthrough record when
/// present.
const RAW_COPY_FIELDS: [&str; 11] = [
    "itag",
    "url",
    "mimeType",
    "bitrate",
    "lastModified",
    "contentLength",
    "quality",
    "fps",
    "qualityLabel",
    "averageBitrate",
    "approxDurationMs",
];

pub struct MimeParts {
    pub container: Option<String>,
    pub encoding: Option<String>,
}

/// Decomposes a raw mime string into container and first codec. Combined
/// formats only ever carry a `video/` container; adaptive formats may be
/// either `video/` or `audio/`.
pub fn parse_mime(mime: &str, include_audio: bool) -> MimeParts {
    MimeParts {
        container: container_of(mime, include_audio),
        encoding: encoding_of(mime),
    }
}

fn container_of(mime: &str, include_audio: bool) -> Option<String> {
    let pattern = if include_audio {
        r"^(?:video|audio)/(\w+)"
    } else {
        r"^video/(\w+)"
    };
    let re = Regex::new(pattern).ok()?;
    re.captures(mime)?.get(1).map(|m| m.as_str().to_string())
}

fn encoding_of(mime: &str) -> Option<String> {
    let re = Regex::new(r#"codecs="([^"]+)""#).ok()?;
    re.captures(mime)?
        .get(1)
        .and_then(|m| m.as_str().split(',').next())
        .map(|codec| codec.trim().to_string())
}

/// Mirrors upstream's loose notion of a usable value: absent, null, zero
/// and empty string all count as unset.
fn truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(true),
        Value::String(s) => !s.is_empty(),
        _ => true,
    }
}

fn scalar_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Stringifies a numeric-or-string field, falling back when unset. Keeps
/// precision by never routing through floating point.
fn stringify_or(value: Option<&Value>, default: &str) -> String {
    match value {
        Some(v) if truthy(v) => scalar_string(v),
        _ => default.to_string(),
    }
}

fn str_field(format: &Value, key: &str) -> Option<String> {
    format
        .get(key)
        .filter(|v| truthy(v))
        .and_then(Value::as_str)
        .map(str::to_string)
}

fn u32_field(format: &Value, key: &str) -> Option<u32> {
    format
        .get(key)
        .filter(|v| truthy(v))
        .and_then(Value::as_u64)
        .map(|v| v as u32)
}

fn size_of(format: &Value) -> Option<String> {
    let width = u32_field(format, "width")?;
    let height = u32_field(format, "height")?;
    Some(format!("{}x{}", width, height))
}

fn range_string(format: &Value, key: &str) -> Option<String> {
    let range = format.get(key).filter(|v| truthy(v))?;
    let start = range.get("start")?;
    let end = range.get("end")?;
    Some(format!("{}-{}", scalar_string(start), scalar_string(end)))
}

/// Cleaned conversion for a combined (video+audio) descriptor.
pub fn convert_format_stream(format: &Value) -> FormatStream {
    let mime = format
        .get("mimeType")
        .and_then(Value::as_str)
        .unwrap_or_default();
    let MimeParts {
        container,
        encoding,
    } = parse_mime(mime, false);
    let quality_label = str_field(format, "qualityLabel");

    FormatStream {
        url: str_field(format, "url").unwrap_or_default(),
        itag: stringify_or(format.get("itag"), "0"),
        mime_type: mime.to_string(),
        quality: str_field(format, "quality").unwrap_or_else(|| "medium".to_string()),
        bitrate: stringify_or(format.get("bitrate"), "0"),
        fps: u32_field(format, "fps"),
        size: size_of(format),
        resolution: quality_label.clone(),
        quality_label,
        container,
        encoding,
    }
}

/// Cleaned conversion for an adaptive (video-only or audio-only) descriptor.
pub fn convert_adaptive_format(format: &Value) -> AdaptiveFormat {
    let mime = format
        .get("mimeType")
        .and_then(Value::as_str)
        .unwrap_or_default();
    let MimeParts {
        container,
        encoding,
    } = parse_mime(mime, true);
    let quality_label = str_field(format, "qualityLabel");

    AdaptiveFormat {
        init: range_string(format, "initRange"),
        index: range_string(format, "indexRange"),
        bitrate: stringify_or(format.get("bitrate"), "0"),
        url: str_field(format, "url").unwrap_or_default(),
        itag: stringify_or(format.get("itag"), "0"),
        mime_type: mime.to_string(),
        clen: format
            .get("contentLength")
            .filter(|v| truthy(v))
            .map(scalar_string),
        lmt: format
            .get("lastModified")
            .filter(|v| truthy(v))
            .map(scalar_string),
        projection_type: str_field(format, "projectionType")
            .unwrap_or_else(|| "RECTANGULAR".to_string()),
        fps: u32_field(format, "fps"),
        size: size_of(format),
        resolution: quality_label.clone(),
        quality_label,
        container,
        encoding,
        audio_quality: str_field(format, "audioQuality"),
        audio_sample_rate: format
            .get("audioSampleRate")
            .filter(|v| truthy(v))
            .and_then(parse_u32),
        audio_channels: u32_field(format, "audioChannels"),
        color_info: format.get("colorInfo").filter(|v| truthy(v)).cloned(),
    }
}

fn parse_u32(value: &Value) -> Option<u32> {
    match value {
        Value::String(s) => s.parse().ok(),
        Value::Number(n) => n.as_u64().map(|v| v as u32),
        _ => None,
    }
}

/// Derives the coarse quality category token from a quality label: the
/// first run of digits is dropped and the first `p` upper-cased, e.g.
/// "720p60" becomes "QUALITY_ORDINAL_P60".
pub fn quality_ordinal(label: &str) -> String {
    format!(
        "QUALITY_ORDINAL_{}",
        strip_first_digit_run(label).replacen('p', "P", 1)
    )
}

fn strip_first_digit_run(label: &str) -> String {
    let Some(start) = label.find(|c: char| c.is_ascii_digit()) else {
        return label.to_string();
    };
    let end = label[start..]
        .find(|c: char| !c.is_ascii_digit())
        .map(|offset| start + offset)
        .unwrap_or(label.len());

    let mut stripped = String::with_capacity(label.len());
    stripped.push_str(&label[..start]);
    stripped.push_str(&label[end..]);
    stripped
}

fn copy_raw_fields(src: &Map<String, Value>, dst: &mut Map<String, Value>) {
    for key in RAW_COPY_FIELDS {
        if let Some(value) = src.get(key) {
            if !value.is_null() {
                dst.insert(key.to_string(), value.clone());
            }
        }
    }

    dst.insert(
        "width".to_string(),
        src.get("width").filter(|v| truthy(v)).cloned().unwrap_or(Value::from(0)),
    );
    dst.insert(
        "height".to_string(),
        src.get("height").filter(|v| truthy(v)).cloned().unwrap_or(Value::from(0)),
    );
    dst.insert(
        "projectionType".to_string(),
        src.get("projectionType")
            .filter(|v| truthy(v))
            .cloned()
            .unwrap_or_else(|| Value::from("RECTANGULAR")),
    );

    for key in ["audioQuality", "audioSampleRate", "audioChannels"] {
        if let Some(value) = src.get(key).filter(|v| truthy(v)) {
            dst.insert(key.to_string(), value.clone());
        }
    }
}

fn copy_range(src: &Map<String, Value>, dst: &mut Map<String, Value>, key: &str) {
    let Some(range) = src.get(key).filter(|v| truthy(v)) else {
        return;
    };
    let mut copied = Map::new();
    for bound in ["start", "end"] {
        if let Some(value) = range.get(bound) {
            copied.insert(bound.to_string(), value.clone());
        }
    }
    dst.insert(key.to_string(), Value::Object(copied));
}

/// Raw-passthrough record for a combined descriptor. Upstream field names
/// and value types are preserved verbatim; only the documented defaults and
/// the derived quality ordinal are added.
pub fn raw_format(format: &Value) -> Value {
    let Some(src) = format.as_object() else {
        return Value::Object(Map::new());
    };

    let mut out = Map::new();
    copy_raw_fields(src, &mut out);

    if let Some(label) = src.get("qualityLabel").filter(|v| truthy(v)).and_then(Value::as_str) {
        out.insert("qualityOrdinal".to_string(), Value::from(quality_ordinal(label)));
    }

    Value::Object(out)
}

/// Raw-passthrough record for an adaptive descriptor. Unlike the combined
/// variant, an absent quality label still yields an ordinal.
pub fn raw_adaptive_format(format: &Value) -> Value {
    let Some(src) = format.as_object() else {
        return Value::Object(Map::new());
    };

    let mut out = Map::new();
    copy_raw_fields(src, &mut out);
    copy_range(src, &mut out, "initRange");
    copy_range(src, &mut out, "indexRange");

    if let Some(color_info) = src.get("colorInfo").filter(|v| truthy(v)) {
        out.insert("colorInfo".to_string(), color_info.clone());
    }
    if let Some(high_replication) = src.get("highReplication").filter(|v| truthy(v)) {
        out.insert("highReplication".to_string(), high_replication.clone());
    }
    if let Some(loudness) = src.get("loudnessDb") {
        out.insert("loudnessDb".to_string(), loudness.clone());
    }

    let ordinal = match src.get("qualityLabel").filter(|v| truthy(v)).and_then(Value::as_str) {
        Some(label) => quality_ordinal(label),
        None => "QUALITY_ORDINAL_UNKNOWN".to_string(),
    };
    out.insert("qualityOrdinal".to_string(), Value::from(ordinal));

    Value::Object(out)
}
