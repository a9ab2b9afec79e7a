//! Client identification from proxy headers.

use axum::http::HeaderMap;

/// Bucket shared by every request that carries no usable address header.
pub const UNKNOWN_CLIENT: &str = "unknown";

/// Headers consulted in order. The first non-empty value wins; for
/// `x-forwarded-for` only the left-most (originating) address is used.
const CLIENT_IP_HEADERS: [&str; 3] = ["cf-connecting-ip", "x-real-ip", "x-forwarded-for"];

/// Derives the key used for per-client rate limiting.
///
/// Header values are trusted as-is: the service is expected to sit behind a
/// proxy that overwrites them.
pub fn client_identifier(headers: &HeaderMap) -> String {
    CLIENT_IP_HEADERS
        .iter()
        .find_map(|name| {
            let value = headers.get(*name)?.to_str().ok()?;
            let first = value.split(',').next()?.trim();
            (!first.is_empty()).then(|| first.to_string())
        })
        .unwrap_or_else(|| UNKNOWN_CLIENT.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(pairs: &[(&'static str, &'static str)]) -> HeaderMap {
        let mut map = HeaderMap::new();
        for (name, value) in pairs {
            map.insert(*name, HeaderValue::from_static(value));
        }
        map
    }

    #[test]
    fn test_cloudflare_header_wins() {
        let map = headers(&[
            ("x-forwarded-for", "10.0.0.1"),
            ("x-real-ip", "10.0.0.2"),
            ("cf-connecting-ip", "203.0.113.7"),
        ]);
        assert_eq!(client_identifier(&map), "203.0.113.7");
    }

    #[test]
    fn test_real_ip_before_forwarded_for() {
        let map = headers(&[("x-forwarded-for", "10.0.0.1"), ("x-real-ip", "10.0.0.2")]);
        assert_eq!(client_identifier(&map), "10.0.0.2");
    }

    #[test]
    fn test_first_forwarded_for_entry() {
        let map = headers(&[("x-forwarded-for", " 192.168.1.1 , 10.0.0.1")]);
        assert_eq!(client_identifier(&map), "192.168.1.1");
    }

    #[test]
    fn test_blank_headers_are_skipped() {
        let map = headers(&[("cf-connecting-ip", "  "), ("x-real-ip", "10.0.0.2")]);
        assert_eq!(client_identifier(&map), "10.0.0.2");
    }

    #[test]
    fn test_unknown_when_no_headers() {
        assert_eq!(client_identifier(&HeaderMap::new()), UNKNOWN_CLIENT);
    }
}
