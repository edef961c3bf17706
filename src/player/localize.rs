//! Media URL localization.
//!
//! Rewrites absolute upstream media URLs so clients fetch them through this
//! server, carrying the original host as a query parameter. Sensitive
//! parameters can be folded into a single encrypted blob so they never
//! appear in clear text.

use url::Url;

use crate::crypto::QueryEncryptor;

/// Query parameters that must never reach a client in clear text.
pub const PRIVATE_QUERY_KEYS: [&str; 2] = ["pot", "ip"];

/// Rewrites `raw` to route through the local origin. Fail-open: any parse
/// or encryption failure returns the input unchanged.
pub fn localize_url(
    raw: &str,
    base_path: &str,
    encrypt_query_params: bool,
    encryptor: &dyn QueryEncryptor,
) -> String {
    if raw.is_empty() {
        return raw.to_string();
    }
    rewrite(raw, base_path, encrypt_query_params, encryptor).unwrap_or_else(|| raw.to_string())
}

fn rewrite(
    raw: &str,
    base_path: &str,
    encrypt_query_params: bool,
    encryptor: &dyn QueryEncryptor,
) -> Option<String> {
    let parsed = Url::parse(raw).ok()?;
    let host = host_with_port(&parsed)?;

    let mut pairs: Vec<(String, String)> = parsed
        .query_pairs()
        .map(|(key, value)| (key.into_owned(), value.into_owned()))
        .collect();
    pairs.retain(|(key, _)| key != "host");
    pairs.push(("host".to_string(), host));

    if encrypt_query_params {
        let (private, public): (Vec<_>, Vec<_>) = pairs
            .into_iter()
            .partition(|(key, _)| PRIVATE_QUERY_KEYS.contains(&key.as_str()));
        let payload = serde_json::to_string(&private).ok()?;
        let ciphertext = encryptor.encrypt(&payload).ok()?;

        pairs = public;
        pairs.push(("enc".to_string(), "true".to_string()));
        pairs.push(("data".to_string(), ciphertext));
    }

    let query = url::form_urlencoded::Serializer::new(String::new())
        .extend_pairs(pairs.iter().map(|(key, value)| (key.as_str(), value.as_str())))
        .finish();

    Some(format!("{base_path}{}?{query}", parsed.path()))
}

fn host_with_port(url: &Url) -> Option<String> {
    let host = url.host_str()?;
    Some(match url.port() {
        Some(port) => format!("{host}:{port}"),
        None => host.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::AesQueryEncryptor;

    fn encryptor() -> AesQueryEncryptor {
        AesQueryEncryptor::new("0123456789abcdef")
    }

    #[test]
    fn plain_rewrite_carries_host() {
        let localized = localize_url(
            "https://r4---sn-example.googlevideo.com/videoplayback?expire=1700000000&itag=22",
            "",
            false,
            &encryptor(),
        );
        assert_eq!(
            localized,
            "/videoplayback?expire=1700000000&itag=22&host=r4---sn-example.googlevideo.com"
        );
        assert!(!localized.contains("enc"));
        assert!(!localized.contains("data"));
    }

    #[test]
    fn base_path_is_prepended() {
        let localized = localize_url(
            "https://media.example.com:8443/videoplayback?itag=18",
            "/companion",
            false,
            &encryptor(),
        );
        assert_eq!(
            localized,
            "/companion/videoplayback?itag=18&host=media.example.com%3A8443"
        );
    }

    #[test]
    fn unparseable_input_is_returned_unchanged() {
        let input = "not a url at all";
        assert_eq!(localize_url(input, "", false, &encryptor()), input);
        assert_eq!(localize_url("", "", true, &encryptor()), "");
    }

    #[test]
    fn encryption_hides_private_parameters() {
        let localized = localize_url(
            "https://media.example.com/videoplayback?itag=22&pot=SECRET_TOKEN&ip=203.0.113.9",
            "",
            true,
            &encryptor(),
        );
        assert!(!localized.contains("SECRET_TOKEN"));
        assert!(!localized.contains("203.0.113.9"));
        assert!(localized.contains("enc=true"));
        assert!(localized.contains("data="));
        assert!(localized.contains("itag=22"));
        assert!(localized.contains("host=media.example.com"));
    }

    #[test]
    fn encrypted_payload_round_trips() {
        let encryptor = encryptor();
        let localized = localize_url(
            "https://media.example.com/videoplayback?pot=tok123",
            "",
            true,
            &encryptor,
        );

        let data = localized
            .split("data=")
            .nth(1)
            .expect("data parameter present");
        let payload = encryptor.decrypt(data).unwrap();
        let pairs: Vec<(String, String)> = serde_json::from_str(&payload).unwrap();
        assert_eq!(pairs, vec![("pot".to_string(), "tok123".to_string())]);
    }
}
