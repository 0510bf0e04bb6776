//! Request locale for bilingual display fields.
//!
//! Storage always keeps both language variants; the locale is an explicit
//! per-request parameter threaded into display projections. There is no
//! global "current language" state.

use axum::http::HeaderMap;

/// Display language for localized fields. Uzbek is the default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Locale {
    #[default]
    Uz,
    Ru,
}

impl Locale {
    /// Parse the locale from an `Accept-Language` header value.
    ///
    /// Anything that is not recognizably Russian falls back to Uzbek.
    pub fn from_accept_language(value: &str) -> Self {
        for part in value.split(',') {
            let tag = part.split(';').next().unwrap_or("").trim();
            let primary = tag.split('-').next().unwrap_or("");
            match primary.to_ascii_lowercase().as_str() {
                "ru" => return Locale::Ru,
                "uz" => return Locale::Uz,
                _ => continue,
            }
        }
        Locale::Uz
    }

    /// Extract the locale from request headers.
    pub fn from_headers(headers: &HeaderMap) -> Self {
        headers
            .get("accept-language")
            .and_then(|v| v.to_str().ok())
            .map(Self::from_accept_language)
            .unwrap_or_default()
    }

    /// Pick the matching variant of a bilingual pair.
    pub fn pick<'a>(&self, uz: &'a str, ru: &'a str) -> &'a str {
        match self {
            Locale::Uz => uz,
            Locale::Ru => ru,
        }
    }
}
