//! Authentication endpoints.
//!
//! Exchanges email/password for a bearer credential. These calls are made
//! without a credential and never trigger the forced-logout path.

use serde::{Deserialize, Serialize};
use tracing::instrument;
use url::Url;

use queuemate_core::{Email, Password, ShopId, UserId};

use crate::error::AuthError;
use crate::token::Credential;

/// Which authentication endpoint to call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthKind {
    Login,
    Signup,
}

impl AuthKind {
    /// Message shown when the server gives no reason.
    #[must_use]
    pub const fn fallback_message(self) -> &'static str {
        match self {
            Self::Login => "Login failed",
            Self::Signup => "Signup failed",
        }
    }
}

/// What a successful login or signup returns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthGrant {
    pub token: Credential,
    pub user_id: UserId,
    /// Only login reports an existing shop.
    pub shop_id: Option<ShopId>,
}

/// Request body for both endpoints.
#[derive(Serialize)]
struct AuthRequest<'a> {
    email: &'a str,
    password: &'a str,
}

/// Success body: `{token, userId, shopId?}`.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct AuthResponse {
    token: String,
    user_id: UserId,
    #[serde(default)]
    shop_id: Option<ShopId>,
}

/// Error body: `{message}`.
#[derive(Deserialize)]
struct AuthErrorResponse {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

/// Authenticate against `url` with email and password.
///
/// # Errors
///
/// Returns [`AuthError::Rejected`] with the server's message (or the
/// fallback text) for any non-success response, and
/// [`AuthError::Network`] when no usable response arrives.
#[instrument(skip(client, password), fields(email = %email, kind = ?kind))]
pub async fn authenticate(
    client: &reqwest::Client,
    url: Url,
    kind: AuthKind,
    email: &Email,
    password: &Password,
) -> Result<AuthGrant, AuthError> {
    let fallback = kind.fallback_message();

    let response = client
        .post(url)
        .json(&AuthRequest {
            email: email.as_str(),
            password: password.expose(),
        })
        .send()
        .await
        .map_err(|source| AuthError::Network { fallback, source })?;

    let status = response.status();

    if status.is_success() {
        let body: AuthResponse = response
            .json()
            .await
            .map_err(|source| AuthError::Network { fallback, source })?;

        if body.token.is_empty() || body.user_id.is_blank() {
            return Err(AuthError::Rejected {
                message: fallback.to_string(),
            });
        }

        Ok(AuthGrant {
            token: Credential::new(body.token),
            user_id: body.user_id,
            shop_id: body.shop_id.filter(|id| !id.is_blank()),
        })
    } else {
        let error_response: AuthErrorResponse =
            response.json().await.unwrap_or(AuthErrorResponse {
                message: None,
                error: None,
            });

        let message = error_response
            .message
            .or(error_response.error)
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| fallback.to_string());

        tracing::debug!(status = %status, message = %message, "Authentication rejected");

        Err(AuthError::Rejected { message })
    }
}
