//! Session cookie helpers.

use axum::http::{HeaderMap, HeaderValue, header};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SameSite {
    Strict,
    #[default]
    Lax,
    None,
}

impl SameSite {
    pub fn as_str(&self) -> &'static str {
        match self {
            SameSite::Strict => "Strict",
            SameSite::Lax => "Lax",
            SameSite::None => "None",
        }
    }
}

/// Attributes of one named cookie. Always `HttpOnly`.
#[derive(Debug, Clone)]
pub struct CookieConfig {
    pub name: String,
    pub secure: bool,
    pub same_site: SameSite,
    pub path: String,
}

impl CookieConfig {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            secure: true,
            same_site: SameSite::Lax,
            path: "/".to_string(),
        }
    }

    pub fn secure(mut self, secure: bool) -> Self {
        self.secure = secure;
        self
    }

    pub fn same_site(mut self, same_site: SameSite) -> Self {
        self.same_site = same_site;
        self
    }

    /// `Set-Cookie` value. `max_age_secs = None` makes a browser-session cookie.
    pub fn build_set_cookie(&self, value: &str, max_age_secs: Option<i64>) -> String {
        let mut cookie = format!(
            "{}={}; HttpOnly; SameSite={}; Path={}",
            self.name,
            value,
            self.same_site.as_str(),
            self.path
        );
        if self.secure {
            cookie.push_str("; Secure");
        }
        if let Some(max_age) = max_age_secs {
            cookie.push_str(&format!("; Max-Age={max_age}"));
        }
        cookie
    }

    pub fn build_delete_cookie(&self) -> String {
        self.build_set_cookie("", Some(0))
    }

    /// Header-ready variant of [`build_set_cookie`](Self::build_set_cookie).
    /// `None` if the value contains bytes not allowed in a header.
    pub fn set_cookie_header(&self, value: &str, max_age_secs: Option<i64>) -> Option<HeaderValue> {
        HeaderValue::from_str(&self.build_set_cookie(value, max_age_secs)).ok()
    }

    pub fn delete_cookie_header(&self) -> Option<HeaderValue> {
        HeaderValue::from_str(&self.build_delete_cookie()).ok()
    }

    /// Reads this cookie from the request headers.
    pub fn extract(&self, headers: &HeaderMap) -> Option<String> {
        extract_cookie(headers, &self.name)
    }
}

/// Value of cookie `name` across all `Cookie` headers, if present and non-empty.
pub fn extract_cookie(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .find_map(|pair| {
            let (key, value) = pair.trim().split_once('=')?;
            (key == name && !value.is_empty()).then(|| value.to_string())
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_set_cookie() {
        let config = CookieConfig::new("learnx_session").same_site(SameSite::Strict);
        let cookie = config.build_set_cookie("abc", Some(3600));

        assert!(cookie.starts_with("learnx_session=abc"));
        assert!(cookie.contains("HttpOnly"));
        assert!(cookie.contains("Secure"));
        assert!(cookie.contains("SameSite=Strict"));
        assert!(cookie.contains("Path=/"));
        assert!(cookie.contains("Max-Age=3600"));
    }

    #[test]
    fn test_insecure_session_cookie() {
        let cookie = CookieConfig::new("s").secure(false).build_set_cookie("v", None);
        assert!(!cookie.contains("Secure"));
        assert!(!cookie.contains("Max-Age"));
    }

    #[test]
    fn test_delete_cookie_expires_immediately() {
        let cookie = CookieConfig::new("s").build_delete_cookie();
        assert!(cookie.starts_with("s=;"));
        assert!(cookie.contains("Max-Age=0"));
    }

    #[test]
    fn test_extract_cookie() {
        let mut headers = HeaderMap::new();
        headers.append(header::COOKIE, HeaderValue::from_static("foo=bar; theme=dark"));
        headers.append(header::COOKIE, HeaderValue::from_static("learnx_session=tok.sig"));

        assert_eq!(extract_cookie(&headers, "foo").as_deref(), Some("bar"));
        assert_eq!(
            extract_cookie(&headers, "learnx_session").as_deref(),
            Some("tok.sig")
        );
        assert_eq!(extract_cookie(&headers, "missing"), None);
    }

    #[test]
    fn test_empty_cookie_is_absent() {
        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, HeaderValue::from_static("learnx_session="));
        assert_eq!(extract_cookie(&headers, "learnx_session"), None);
    }
}
