//! Session credential handling
//!
//! The dashboard never issues credentials itself; it carries whatever the
//! auth provider handed the active session. That is either a provider
//! bearer token used verbatim, or a fallback claims blob sent
//! base64-encoded. Requests without a session go out unauthenticated and
//! the backend answers with 401.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use serde_json::Value;

/// The active user's credential for backend requests.
#[derive(Debug, Clone)]
pub enum Session {
    /// A provider-issued bearer token, attached verbatim.
    Token(String),

    /// Fallback claims blob, attached as base64-encoded JSON.
    Claims(Value),
}

impl Session {
    /// Session from a provider-issued token.
    #[must_use]
    pub fn from_token(token: impl Into<String>) -> Self {
        Self::Token(token.into())
    }

    /// Session from a fallback claims object.
    #[must_use]
    pub const fn from_claims(claims: Value) -> Self {
        Self::Claims(claims)
    }

    /// The bearer credential to place after `Bearer ` in the
    /// `Authorization` header.
    #[must_use]
    pub fn bearer(&self) -> String {
        match self {
            Self::Token(token) => token.clone(),
            Self::Claims(claims) => BASE64.encode(claims.to_string()),
        }
    }
}
