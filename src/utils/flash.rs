// src/utils/flash.rs

//! One-shot status messages carried to the next page in a cookie.
//! Set before a redirect, consumed (and cleared) by the page that renders it.

use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use url::form_urlencoded;

pub const FLASH_COOKIE: &str = "flash";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlashLevel {
    Success,
    Error,
    Info,
}

impl FlashLevel {
    fn as_str(&self) -> &'static str {
        match self {
            FlashLevel::Success => "success",
            FlashLevel::Error => "error",
            FlashLevel::Info => "info",
        }
    }

    fn parse(s: &str) -> Option<Self> {
        match s {
            "success" => Some(FlashLevel::Success),
            "error" => Some(FlashLevel::Error),
            "info" => Some(FlashLevel::Info),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Flash {
    pub level: FlashLevel,
    pub message: String,
}

impl Flash {
    /// CSS class used by the base layout.
    pub fn css_class(&self) -> &'static str {
        match self.level {
            FlashLevel::Success => "flash flash-success",
            FlashLevel::Error => "flash flash-error",
            FlashLevel::Info => "flash flash-info",
        }
    }

    fn encode(&self) -> String {
        let raw = format!("{}:{}", self.level.as_str(), self.message);
        form_urlencoded::byte_serialize(raw.as_bytes()).collect()
    }

    fn decode(value: &str) -> Option<Self> {
        // The whole payload is one escaped "key"; raw '&' and '=' never occur in it.
        let (raw, _) = form_urlencoded::parse(value.as_bytes()).next()?;
        let (level, message) = raw.split_once(':')?;
        Some(Self {
            level: FlashLevel::parse(level)?,
            message: message.to_string(),
        })
    }
}

/// Queues a message for the next rendered page.
pub fn set_flash(jar: CookieJar, level: FlashLevel, message: impl Into<String>) -> CookieJar {
    let flash = Flash {
        level,
        message: message.into(),
    };
    jar.add(
        Cookie::build((FLASH_COOKIE, flash.encode()))
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax),
    )
}

/// Reads the pending message, if any, and clears it.
pub fn take_flash(jar: CookieJar) -> (CookieJar, Option<Flash>) {
    let Some(value) = jar.get(FLASH_COOKIE).map(|c| c.value().to_owned()) else {
        return (jar, None);
    };
    (
        jar.remove(Cookie::build((FLASH_COOKIE, "")).path("/")),
        Flash::decode(&value),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_then_take() {
        let jar = set_flash(
            CookieJar::new(),
            FlashLevel::Error,
            "Score must be between 0 and 100 & not blank; really=yes",
        );
        let (_jar, flash) = take_flash(jar);
        let flash = flash.unwrap();
        assert_eq!(flash.level, FlashLevel::Error);
        assert_eq!(
            flash.message,
            "Score must be between 0 and 100 & not blank; really=yes"
        );
    }

    #[test]
    fn encoded_value_is_cookie_safe() {
        let value = Flash {
            level: FlashLevel::Info,
            message: "Logged out; bye, \"friend\"".to_string(),
        }
        .encode();
        assert!(!value.contains([' ', ';', ',', '"']));
    }

    #[test]
    fn garbage_is_ignored() {
        assert_eq!(Flash::decode("nonsense"), None);
        assert_eq!(Flash::decode("panic%3Aboom"), None);
    }

    #[test]
    fn take_without_cookie_is_noop() {
        let (_jar, flash) = take_flash(CookieJar::new());
        assert!(flash.is_none());
    }
}
