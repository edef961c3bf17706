//! Description rendering: HTML escaping followed by linkification.

use regex::{Captures, Regex};

/// Escapes the raw description and converts bare URLs and hashtags into
/// anchors. Escaping must happen first so the inserted markup survives.
pub fn description_to_html(description: &str) -> String {
    if description.is_empty() {
        return String::new();
    }

    let escaped = description
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;");

    let url_re = Regex::new(r"(https?://[^\s]+)").expect("hard-coded regex");
    let linked = url_re.replace_all(&escaped, |caps: &Captures| {
        let url = &caps[1];
        let display = url
            .strip_prefix("https://")
            .or_else(|| url.strip_prefix("http://"))
            .unwrap_or(url);
        format!(r#"<a href="{url}">{display}</a>"#)
    });

    let hashtag_re = Regex::new(r"#(\w+)").expect("hard-coded regex");
    hashtag_re
        .replace_all(&linked, r##"<a href="/hashtag/$1">#$1</a>"##)
        .into_owned()
}
