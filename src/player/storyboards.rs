//! Storyboard decoding.
//!
//! Upstream sends scrub-preview grids in one of two shapes: a compact
//! `|`/`#`-delimited spec string, or a structured board list. The two
//! representations are decoded independently.

use serde::Deserialize;
use serde_json::Value;

use super::response::RawPlayerResponse;
use super::types::{Storyboard, StoryboardLevel};

/// Placeholder for the level index inside the spec's URL template.
const LEVEL_PLACEHOLDER: &str = "$L";
/// Placeholder for the level name inside the spec's URL template.
const NAME_PLACEHOLDER: &str = "$N";
/// Spec fields before this index describe the template, not a level.
const FIRST_LEVEL_FIELD: usize = 3;
/// Subfields per level: width#height#count#columns#rows#interval#name#sigh.
const LEVEL_SUBFIELDS: usize = 8;

pub fn storyboard_levels(raw: &RawPlayerResponse) -> Vec<StoryboardLevel> {
    match raw.storyboard_spec() {
        Some(spec) => decode_spec(spec),
        None => Vec::new(),
    }
}

/// Parses the compact spec string into one level per trailing field.
/// Malformed levels (fewer than 8 subfields) are skipped, not fatal.
pub fn decode_spec(spec: &str) -> Vec<StoryboardLevel> {
    let fields: Vec<&str> = spec.split('|').collect();
    let Some(template) = fields.first() else {
        return Vec::new();
    };

    let mut levels = Vec::new();
    for (field_index, level_field) in fields.iter().enumerate().skip(FIRST_LEVEL_FIELD) {
        let parts: Vec<&str> = level_field.split('#').collect();
        if parts.len() < LEVEL_SUBFIELDS {
            continue;
        }

        let count: u32 = parts[2].parse().unwrap_or(0);
        let columns: u32 = parts[3].parse().unwrap_or(0);
        let rows: u32 = parts[4].parse().unwrap_or(0);
        let name = parts[6];
        let sigh = parts[7];

        let tiles_per_board = columns * rows;
        let storyboard_count = if tiles_per_board == 0 {
            0
        } else {
            count.div_ceil(tiles_per_board)
        };

        let level_index = field_index - FIRST_LEVEL_FIELD;
        let mut urls = Vec::with_capacity(storyboard_count as usize);
        for segment in 0..storyboard_count {
            let mut url = template
                .replacen(LEVEL_PLACEHOLDER, &level_index.to_string(), 1)
                .replacen(NAME_PLACEHOLDER, name, 1);
            url.push_str(&segment.to_string());
            if !sigh.is_empty() {
                url.push_str("&sigh=");
                url.push_str(sigh);
            }
            urls.push(url);
        }

        levels.push(StoryboardLevel {
            width: parts[0].to_string(),
            height: parts[1].to_string(),
            thumbs_count: parts[2].to_string(),
            columns: parts[3].to_string(),
            rows: parts[4].to_string(),
            interval: parts[5].to_string(),
            storyboard_count,
            url: urls,
        });
    }

    levels
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct StoryboardBoard {
    template_url: Option<String>,
    thumbnail_width: Option<u32>,
    thumbnail_height: Option<u32>,
    thumbnail_count: Option<u32>,
    interval: Option<u32>,
    columns: Option<u32>,
    rows: Option<u32>,
    storyboard_count: Option<u32>,
}

/// Builds the structured representation from the board-list shape. Boards
/// without a template URL are skipped.
pub fn structured_storyboards(raw: &RawPlayerResponse, video_id: &str) -> Vec<Storyboard> {
    let Some(boards) = raw.storyboard_boards() else {
        return Vec::new();
    };

    boards
        .iter()
        .filter_map(|value| {
            let board: StoryboardBoard = serde_json::from_value(value.clone()).ok()?;
            let template_url = board.template_url.filter(|url| !url.is_empty())?;
            let width = board.thumbnail_width.unwrap_or(0);
            let height = board.thumbnail_height.unwrap_or(0);
            Some(Storyboard {
                url: format!("/api/v1/storyboards/{video_id}?width={width}&height={height}"),
                template_url,
                width,
                height,
                count: board.thumbnail_count.unwrap_or(0),
                interval: board.interval.unwrap_or(0),
                storyboard_width: board.columns.unwrap_or(0),
                storyboard_height: board.rows.unwrap_or(0),
                storyboard_count: board.storyboard_count.unwrap_or(1),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn decodes_single_level_with_signature() {
        let spec = "https://i.ytimg.com/sb/xyz/storyboard3_L$L/$N.jpg?sqp=abc|48#27#100#10#10#0#default#rs$AB|80#45#95#10#10#10000#M$M#rs$CD|160#90#95#5#5#10000#M$M#sig0";
        let levels = decode_spec(spec);
        assert_eq!(levels.len(), 1);

        let level = &levels[0];
        assert_eq!(level.width, "160");
        assert_eq!(level.height, "90");
        assert_eq!(level.thumbs_count, "95");
        // ceil(95 / (5 * 5)) = 4
        assert_eq!(level.storyboard_count, 4);
        assert_eq!(level.url.len(), 4);
        assert!(level.url[0].contains("storyboard3_L0"));
        assert!(level.url[0].contains("M$M"));
        assert!(level.url[0].ends_with("&sigh=sig0"));
        assert!(level.url[3].contains("?sqp=abc3&sigh=sig0"));
    }

    #[test]
    fn skips_levels_with_too_few_subfields() {
        let spec = "tpl$L/$N|a|b|48#27#100#10#10#0#name|broken#level";
        let levels = decode_spec(spec);
        // field 3 is well-formed only when it carries all 8 subfields
        assert!(levels.is_empty());
    }

    #[test]
    fn level_index_counts_from_first_level_field() {
        let spec = "base$L/$N?q=1|x|y|10#10#4#2#2#0#lvl0#|20#20#4#2#2#0#lvl1#";
        let levels = decode_spec(spec);
        assert_eq!(levels.len(), 2);
        assert_eq!(levels[0].url[0], "base0/lvl0?q=10");
        assert_eq!(levels[1].url[0], "base1/lvl1?q=10");
        // empty signature subfield appends nothing
        assert!(!levels[0].url[0].contains("sigh"));
    }

    #[test]
    fn absent_spec_yields_empty_list() {
        let raw = RawPlayerResponse::new(json!({}));
        assert!(storyboard_levels(&raw).is_empty());
    }

    #[test]
    fn structured_boards_skip_missing_template() {
        let raw = RawPlayerResponse::new(json!({
            "storyboards": {
                "type": "PlayerStoryboardSpec",
                "boards": [
                    { "thumbnail_width": 48 },
                    {
                        "template_url": "https://example.com/sb/$M.jpg",
                        "thumbnail_width": 80,
                        "thumbnail_height": 45,
                        "thumbnail_count": 95,
                        "interval": 10000,
                        "columns": 10,
                        "rows": 10,
                        "storyboard_count": 1
                    }
                ]
            }
        }));

        let boards = structured_storyboards(&raw, "dQw4w9WgXcQ");
        assert_eq!(boards.len(), 1);
        assert_eq!(
            boards[0].url,
            "/api/v1/storyboards/dQw4w9WgXcQ?width=80&height=45"
        );
        assert_eq!(boards[0].template_url, "https://example.com/sb/$M.jpg");
        assert_eq!(boards[0].storyboard_width, 10);
    }
}
