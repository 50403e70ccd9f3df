//! Cookie persistence for the client session.
//!
//! [`CookieStore`] is the only place session data is persisted. The browser
//! implementation talks to `document.cookie`; [`MemoryCookieStore`] backs
//! unit tests and non-browser builds.

use cookie::{Cookie, SameSite};
use std::{cell::RefCell, collections::HashMap, fmt};
use thiserror::Error;
use time::{Duration, OffsetDateTime};
use wasm_bindgen::JsCast;
use web_sys::HtmlDocument;

/// Failure writing a cookie.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CookieError {
    #[error("document cookies are not available")]
    Unavailable,
    #[error("browser rejected cookie `{name}`: {reason}")]
    Rejected { name: String, reason: String },
}

/// String key-value storage with per-entry expiry.
pub trait CookieStore: fmt::Debug {
    /// Current value of `name`, if present and unexpired.
    fn get(&self, name: &str) -> Option<String>;

    /// Store `value` under `name` for `max_age`.
    ///
    /// # Errors
    /// Returns [`CookieError`] when the backing store refuses the write.
    fn set(&self, name: &str, value: &str, max_age: Duration) -> Result<(), CookieError>;

    /// Delete `name`. Removing an absent cookie is not an error.
    fn remove(&self, name: &str);
}

/// Cookie jar of the current document.
#[derive(Debug, Default, Clone, Copy)]
pub struct DocumentCookieStore;

impl DocumentCookieStore {
    fn document() -> Option<HtmlDocument> {
        web_sys::window()?.document()?.dyn_into().ok()
    }

    fn build(name: &str, value: &str) -> Cookie<'static> {
        Cookie::build((name.to_owned(), value.to_owned()))
            .path("/")
            .same_site(SameSite::Lax)
            .build()
    }

    /// Expired cookie for `name`. Built without reading the clock, which is
    /// unavailable to `time` on `wasm32-unknown-unknown`.
    fn removal(name: &str) -> Cookie<'static> {
        let mut cookie = Self::build(name, "");
        cookie.set_max_age(Duration::ZERO);
        cookie.set_expires(OffsetDateTime::UNIX_EPOCH);
        cookie
    }

    fn write(cookie: &Cookie<'_>) -> Result<(), CookieError> {
        let document = Self::document().ok_or(CookieError::Unavailable)?;
        document
            .set_cookie(&cookie.encoded().to_string())
            .map_err(|err| CookieError::Rejected {
                name: cookie.name().to_string(),
                reason: format!("{err:?}"),
            })
    }
}

impl CookieStore for DocumentCookieStore {
    fn get(&self, name: &str) -> Option<String> {
        let raw = Self::document()?.cookie().ok()?;
        find_cookie(&raw, name)
    }

    fn set(&self, name: &str, value: &str, max_age: Duration) -> Result<(), CookieError> {
        let mut cookie = Self::build(name, value);
        cookie.set_max_age(max_age);
        Self::write(&cookie)
    }

    fn remove(&self, name: &str) {
        if let Err(err) = Self::write(&Self::removal(name)) {
            tracing::warn!(cookie = name, error = %err, "failed to remove cookie");
        }
    }
}

/// Look up `name` in a `document.cookie` style string.
pub fn find_cookie(raw: &str, name: &str) -> Option<String> {
    Cookie::split_parse_encoded(raw.to_owned())
        .filter_map(Result::ok)
        .find(|cookie| cookie.name() == name)
        .map(|cookie| cookie.value().to_string())
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct StoredCookie {
    value: String,
    max_age: Duration,
}

/// In-memory store. A non-positive max age deletes the entry, matching how
/// browsers treat `Max-Age=0`.
#[derive(Debug, Default)]
pub struct MemoryCookieStore {
    entries: RefCell<HashMap<String, StoredCookie>>,
    reject_writes: bool,
}

impl MemoryCookieStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store whose writes always fail, for exercising error paths.
    pub fn read_only() -> Self {
        Self {
            reject_writes: true,
            ..Self::default()
        }
    }

    /// Seed an entry directly, bypassing `reject_writes`.
    pub fn insert(&self, name: &str, value: &str) {
        self.entries.borrow_mut().insert(
            name.to_string(),
            StoredCookie {
                value: value.to_string(),
                max_age: Duration::days(7),
            },
        );
    }

    pub fn max_age(&self, name: &str) -> Option<Duration> {
        self.entries.borrow().get(name).map(|entry| entry.max_age)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

impl CookieStore for MemoryCookieStore {
    fn get(&self, name: &str) -> Option<String> {
        self.entries
            .borrow()
            .get(name)
            .map(|entry| entry.value.clone())
    }

    fn set(&self, name: &str, value: &str, max_age: Duration) -> Result<(), CookieError> {
        if self.reject_writes {
            return Err(CookieError::Rejected {
                name: name.to_string(),
                reason: "store is read-only".to_string(),
            });
        }
        let mut entries = self.entries.borrow_mut();
        if max_age <= Duration::ZERO {
            entries.remove(name);
        } else {
            entries.insert(
                name.to_string(),
                StoredCookie {
                    value: value.to_string(),
                    max_age,
                },
            );
        }
        Ok(())
    }

    fn remove(&self, name: &str) {
        self.entries.borrow_mut().remove(name);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_cookie_among_many() {
        let raw = "theme=dark; auth_token=abc.def; lang=en";
        assert_eq!(find_cookie(raw, "auth_token").as_deref(), Some("abc.def"));
        assert_eq!(find_cookie(raw, "missing"), None);
    }

    #[test]
    fn decodes_percent_encoded_values() {
        let raw = "user=%7B%22name%22%3A%22Dana%22%7D";
        assert_eq!(find_cookie(raw, "user").as_deref(), Some(r#"{"name":"Dana"}"#));
    }

    #[test]
    fn encoded_cookie_round_trips_through_parser() {
        let json = r#"{"name":"Dana; Co","email":"d@example.com"}"#;
        let cookie = DocumentCookieStore::build("user", json);
        let header = cookie.encoded().to_string();
        assert!(header.starts_with("user="));
        assert!(header.contains("Path=/"));

        let pair = header.split(';').next().unwrap();
        assert_eq!(find_cookie(pair, "user").as_deref(), Some(json));
    }

    #[test]
    fn removal_cookie_expires_in_the_past() {
        let header = DocumentCookieStore::removal("auth_token").encoded().to_string();
        assert!(header.starts_with("auth_token=;"));
        assert!(header.contains("Path=/"));
        assert!(header.contains("Max-Age=0"));
        assert!(header.contains("Expires=Thu, 01 Jan 1970 00:00:00 GMT"));
    }

    #[test]
    fn memory_store_set_get_remove() {
        let store = MemoryCookieStore::new();
        store.set("auth_token", "t1", Duration::days(7)).unwrap();
        assert_eq!(store.get("auth_token").as_deref(), Some("t1"));
        assert_eq!(store.max_age("auth_token"), Some(Duration::days(7)));

        store.remove("auth_token");
        assert_eq!(store.get("auth_token"), None);
        store.remove("auth_token");
        assert!(store.is_empty());
    }

    #[test]
    fn zero_max_age_deletes() {
        let store = MemoryCookieStore::new();
        store.set("user", "{}", Duration::days(1)).unwrap();
        store.set("user", "", Duration::ZERO).unwrap();
        assert_eq!(store.get("user"), None);
    }

    #[test]
    fn read_only_store_rejects_writes() {
        let store = MemoryCookieStore::read_only();
        let err = store.set("user", "{}", Duration::days(7)).unwrap_err();
        assert!(matches!(err, CookieError::Rejected { ref name, .. } if name == "user"));
        store.insert("user", "{}");
        assert_eq!(store.get("user").as_deref(), Some("{}"));
    }
}
