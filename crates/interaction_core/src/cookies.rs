//! Anti-forgery token sourcing from the ambient cookie string.

use std::sync::Arc;

use tracing::warn;

use crate::{TokenProvider, CSRF_COOKIE};

/// Scans a semicolon-delimited cookie string for `name=value`, trimming
/// each entry and percent-decoding the first exact match.
pub fn cookie_value(cookies: &str, name: &str) -> Option<String> {
    for entry in cookies.split(';') {
        let entry = entry.trim();
        let Some(raw) = entry
            .strip_prefix(name)
            .and_then(|rest| rest.strip_prefix('='))
        else {
            continue;
        };
        return match urlencoding::decode(raw) {
            Ok(value) => Some(value.into_owned()),
            Err(err) => {
                warn!(name, "cookie value is not percent-decodable: {err}");
                None
            }
        };
    }
    None
}

/// Source of the ambient cookie string; `None` when no cookie store
/// exists at all.
pub trait CookieStore: Send + Sync {
    fn cookie_header(&self) -> Option<String>;
}

pub struct StaticCookies(pub String);

impl CookieStore for StaticCookies {
    fn cookie_header(&self) -> Option<String> {
        Some(self.0.clone())
    }
}

pub struct MissingCookieStore;

impl CookieStore for MissingCookieStore {
    fn cookie_header(&self) -> Option<String> {
        None
    }
}

/// Token provider backed by a cookie store. The store is consulted on
/// every request for a token; nothing is cached.
pub struct CookieTokens {
    store: Arc<dyn CookieStore>,
    cookie_name: String,
}

impl CookieTokens {
    pub fn new(store: Arc<dyn CookieStore>) -> Self {
        Self::with_cookie_name(store, CSRF_COOKIE)
    }

    pub fn with_cookie_name(store: Arc<dyn CookieStore>, cookie_name: impl Into<String>) -> Self {
        Self {
            store,
            cookie_name: cookie_name.into(),
        }
    }
}

impl TokenProvider for CookieTokens {
    fn csrf_token(&self) -> Option<String> {
        let header = self.store.cookie_header()?;
        cookie_value(&header, &self.cookie_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_the_named_cookie_among_others() {
        assert_eq!(
            cookie_value("csrftoken=abc123; sessionid=xyz", "csrftoken"),
            Some("abc123".to_string())
        );
        assert_eq!(
            cookie_value("sessionid=xyz;  csrftoken=abc123", "csrftoken"),
            Some("abc123".to_string())
        );
    }

    #[test]
    fn requires_an_exact_name_prefix() {
        assert_eq!(cookie_value("xcsrftoken=abc", "csrftoken"), None);
        assert_eq!(cookie_value("csrftokenx=abc", "csrftoken"), None);
        assert_eq!(cookie_value("csrftoken=abc", "token"), None);
    }

    #[test]
    fn first_match_wins() {
        assert_eq!(
            cookie_value("csrftoken=first; csrftoken=second", "csrftoken"),
            Some("first".to_string())
        );
    }

    #[test]
    fn values_are_percent_decoded() {
        assert_eq!(
            cookie_value("csrftoken=a%3Db%2Fc", "csrftoken"),
            Some("a=b/c".to_string())
        );
    }

    #[test]
    fn empty_store_and_missing_entry_yield_nothing() {
        assert_eq!(cookie_value("", "csrftoken"), None);
        assert_eq!(cookie_value("sessionid=xyz", "csrftoken"), None);
    }

    #[test]
    fn cookie_tokens_reads_through_the_store() {
        let tokens = CookieTokens::new(Arc::new(StaticCookies(
            "sessionid=xyz; csrftoken=tok-1".to_string(),
        )));
        assert_eq!(tokens.csrf_token(), Some("tok-1".to_string()));

        let missing = CookieTokens::new(Arc::new(MissingCookieStore));
        assert_eq!(missing.csrf_token(), None);
    }
}
