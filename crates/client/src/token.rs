//! Bearer credential and its expiry claim.
//!
//! The backend issues JWTs. The client only peeks at the payload's `exp`
//! claim to skip restoring a session that is already dead; the signature is
//! NOT verified, so nothing here establishes trust. The server remains the
//! authority and answers 401 for any credential it rejects.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chrono::{DateTime, Utc};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

/// Opaque bearer credential issued on login or signup.
///
/// `Debug` is redacted by [`SecretString`].
#[derive(Debug, Clone)]
pub struct Credential(SecretString);

#[derive(Deserialize)]
struct ExpiryClaim {
    #[serde(default)]
    exp: Option<i64>,
}

impl Credential {
    /// Wrap a credential string.
    #[must_use]
    pub fn new(token: impl Into<String>) -> Self {
        Self(SecretString::from(token.into()))
    }

    /// The raw credential, for the `Authorization` header and persistence.
    #[must_use]
    pub fn expose(&self) -> &str {
        self.0.expose_secret()
    }

    /// Expiry embedded in the credential, if it is a JWT carrying `exp`.
    ///
    /// Returns `None` for opaque tokens, malformed payloads and payloads
    /// without the claim.
    #[must_use]
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        let payload = self.expose().split('.').nth(1)?;
        let bytes = URL_SAFE_NO_PAD
            .decode(payload.trim_end_matches('='))
            .ok()?;
        let claim: ExpiryClaim = serde_json::from_slice(&bytes).ok()?;
        DateTime::from_timestamp(claim.exp?, 0)
    }

    /// Whether the embedded expiry is at or before `now`.
    ///
    /// Credentials without a readable expiry are never considered expired.
    #[must_use]
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at().is_some_and(|exp| exp <= now)
    }

    /// [`Self::is_expired_at`] against the current time.
    #[must_use]
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }
}

impl PartialEq for Credential {
    fn eq(&self, other: &Self) -> bool {
        self.expose() == other.expose()
    }
}

impl Eq for Credential {}

/// Build an unsigned JWT-shaped credential carrying `exp`. Test helper.
#[cfg(test)]
pub(crate) fn jwt_expiring_at(exp: i64) -> Credential {
    let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#);
    let payload = URL_SAFE_NO_PAD.encode(format!(r#"{{"sub":"u1","exp":{exp}}}"#));
    Credential::new(format!("{header}.{payload}.signature"))
}
