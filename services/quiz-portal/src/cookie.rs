//! Cookie-backed credential store
//!
//! The browser's cookie jar is the durable storage for the session token.
//! A `CookieStore` is built per request from the `Cookie` header; writes are
//! buffered as a single pending `Set-Cookie` value and flushed onto the
//! response by `CookieStore::apply`.

use std::sync::Arc;

use axum::http::header::{COOKIE, SET_COOKIE};
use axum::http::{HeaderMap, HeaderValue};
use axum::response::{IntoResponse, Response};
use portal_session::{Credential, CredentialStore, Error, Result};
use tracing::warn;

use crate::config::SessionConfig;

/// Per-cookie size limit browsers enforce on `name=value`.
pub const MAX_COOKIE_BYTES: usize = 4096;

/// How the credential cookie is named and scoped.
#[derive(Debug, Clone)]
pub struct CookieSettings {
    pub name: String,
    pub max_age_secs: u64,
    pub secure: bool,
}

impl From<&SessionConfig> for CookieSettings {
    fn from(config: &SessionConfig) -> Self {
        Self {
            name: config.cookie_name.clone(),
            max_age_secs: config.max_age_days * 24 * 60 * 60,
            secure: config.secure,
        }
    }
}

impl CookieSettings {
    fn attributes(&self, max_age_secs: u64) -> String {
        let secure = if self.secure { "; Secure" } else { "" };
        format!("Path=/; Max-Age={max_age_secs}; SameSite=Lax; HttpOnly{secure}")
    }
}

pub struct CookieStore {
    settings: Arc<CookieSettings>,
    /// Decoded token as the browser currently holds it (or will, once the
    /// pending header lands)
    current: Option<String>,
    pending: Option<HeaderValue>,
}

impl CookieStore {
    pub fn from_headers(headers: &HeaderMap, settings: Arc<CookieSettings>) -> Self {
        let current = find_cookie(headers, &settings.name).and_then(|raw| {
            match urlencoding::decode(raw) {
                Ok(decoded) => Some(decoded.into_owned()),
                Err(e) => {
                    warn!(
                        cookie = %settings.name,
                        error = %e,
                        "ignoring undecodable credential cookie"
                    );
                    None
                }
            }
        });

        Self {
            settings,
            current,
            pending: None,
        }
    }

    /// The `Set-Cookie` value this request will emit, if any.
    #[cfg(test)]
    pub fn pending(&self) -> Option<&HeaderValue> {
        self.pending.as_ref()
    }

    /// Attach the pending `Set-Cookie` header to a response.
    pub fn apply(self, response: impl IntoResponse) -> Response {
        let mut response = response.into_response();
        if let Some(value) = self.pending {
            response.headers_mut().append(SET_COOKIE, value);
        }
        response
    }
}

impl CredentialStore for CookieStore {
    fn read(&self) -> Result<Option<Credential>> {
        Ok(self.current.clone().and_then(Credential::new))
    }

    fn write(&mut self, credential: &Credential) -> Result<()> {
        let pair = format!(
            "{}={}",
            self.settings.name,
            urlencoding::encode(credential.token())
        );
        if pair.len() > MAX_COOKIE_BYTES {
            return Err(Error::QuotaExceeded {
                size: pair.len(),
                limit: MAX_COOKIE_BYTES,
            });
        }

        let header = format!("{pair}; {}", self.settings.attributes(self.settings.max_age_secs));
        let value = HeaderValue::from_str(&header)
            .map_err(|e| Error::Unavailable(format!("building Set-Cookie header: {e}")))?;

        self.pending = Some(value);
        self.current = Some(credential.token().to_owned());
        Ok(())
    }

    fn clear(&mut self) -> Result<()> {
        let header = format!("{}=; {}", self.settings.name, self.settings.attributes(0));
        let value = HeaderValue::from_str(&header)
            .map_err(|e| Error::Unavailable(format!("building Set-Cookie header: {e}")))?;

        self.pending = Some(value);
        self.current = None;
        Ok(())
    }
}

/// First `name=value` pair for `name` across all `Cookie` headers.
fn find_cookie<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value)
}
