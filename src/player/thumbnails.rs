//! Thumbnail URL synthesis from a video id and request origin.

use super::types::{AuthorThumbnail, Thumbnail};

const AUTHOR_THUMBNAIL_SIZES: [u32; 6] = [32, 48, 76, 100, 176, 512];

/// The fixed set of thumbnail descriptors every video exposes. Purely
/// derived from the id; no upstream data involved.
pub fn generate_thumbnails(video_id: &str, base_url: &str) -> Vec<Thumbnail> {
    let entries: [(&str, &str, u32, u32); 9] = [
        ("maxres", "maxres.jpg", 1280, 720),
        ("maxresdefault", "maxresdefault.jpg", 1280, 720),
        ("sddefault", "sddefault.jpg", 640, 480),
        ("high", "hqdefault.jpg", 480, 360),
        ("medium", "mqdefault.jpg", 320, 180),
        ("default", "default.jpg", 120, 90),
        ("start", "1.jpg", 120, 90),
        ("middle", "2.jpg", 120, 90),
        ("end", "3.jpg", 120, 90),
    ];

    entries
        .iter()
        .map(|(quality, file, width, height)| Thumbnail {
            quality: quality.to_string(),
            url: format!("{}/vi/{}/{}", base_url, video_id, file),
            width: *width,
            height: *height,
        })
        .collect()
}

/// Standard channel-avatar size ladder, emitted when the channel id is known.
pub fn author_thumbnails(channel_id: &str) -> Vec<AuthorThumbnail> {
    if channel_id.is_empty() {
        return Vec::new();
    }

    AUTHOR_THUMBNAIL_SIZES
        .iter()
        .map(|size| AuthorThumbnail {
            url: format!("https://yt3.ggpht.com/a/default-user=s{size}-c-k-c0x00ffffff-no-rj"),
            width: *size,
            height: *size,
        })
        .collect()
}
