//! The session credential

use std::fmt;

use common::Secret;

/// Opaque session token handed out by the identity provider.
///
/// Always non-empty. Nothing about its format is checked: presence alone
/// grants access.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(Secret<String>);

impl Credential {
    /// Wrap a raw token. Returns `None` for the empty string.
    pub fn new(token: impl Into<String>) -> Option<Self> {
        let token = token.into();
        if token.is_empty() {
            return None;
        }
        Some(Self(Secret::new(token)))
    }

    /// The raw token, verbatim as received.
    pub fn token(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Credential").field(&self.0).finish()
    }
}

impl fmt::Display for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_token_is_not_a_credential() {
        assert!(Credential::new("").is_none());
    }

    #[test]
    fn token_is_kept_verbatim() {
        let credential = Credential::new(" spaced; odd=chars ").unwrap();
        assert_eq!(credential.token(), " spaced; odd=chars ");
    }

    #[test]
    fn debug_redacts_token() {
        let credential = Credential::new("abc123").unwrap();
        let debug = format!("{credential:?}");
        assert!(!debug.contains("abc123"), "token leaked into Debug: {debug}");
        assert_eq!(credential.to_string(), "[REDACTED]");
    }
}
