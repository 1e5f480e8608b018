//! Client error types.

use thiserror::Error;

use crate::storage::StorageError;

/// Errors from authenticated API calls and the flows built on them.
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP request failed before a response arrived.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Response body did not match the expected shape.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// The server rejected the credential (401). The session has already
    /// been cleared when this is returned.
    #[error("Session expired, please log in again")]
    Unauthorized,

    /// The server refused the operation for this principal (403).
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// Resource not found (404).
    #[error("Not found: {0}")]
    NotFound(String),

    /// Any other non-success response.
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Server-provided `message`, or the raw body.
        message: String,
    },

    /// No credential in the session.
    #[error("Not logged in")]
    NotAuthenticated,

    /// The session has no linked shop.
    #[error("No shop is linked to this account")]
    NoShop,

    /// The session ended while a shop-setup step was running.
    #[error("Your session has expired. Please sign up again.")]
    SessionExpired,

    /// Persisting session state failed.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Input rejected before any request was sent.
    #[error("{0}")]
    Validation(String),
}

impl ClientError {
    /// The server-provided message, or `fallback` for everything else.
    #[must_use]
    pub fn message_or<'a>(&'a self, fallback: &'a str) -> &'a str {
        match self {
            Self::Api { message, .. } | Self::Forbidden(message) | Self::NotFound(message)
                if !message.is_empty() =>
            {
                message
            }
            _ => fallback,
        }
    }

    /// Whether the error ended (or reflects an already ended) session.
    #[must_use]
    pub const fn is_session_error(&self) -> bool {
        matches!(
            self,
            Self::Unauthorized | Self::NotAuthenticated | Self::SessionExpired
        )
    }
}

impl From<queuemate_core::ShopFormError> for ClientError {
    fn from(err: queuemate_core::ShopFormError) -> Self {
        Self::Validation(err.to_string())
    }
}

impl From<queuemate_core::BarberFormError> for ClientError {
    fn from(err: queuemate_core::BarberFormError) -> Self {
        Self::Validation(err.to_string())
    }
}

/// Typed failure result of login and signup.
#[derive(Debug, Error)]
pub enum AuthError {
    /// The server refused the credentials. Carries its message, or
    /// "Login failed" / "Signup failed" when it sent none.
    #[error("{message}")]
    Rejected {
        /// Message to show the user.
        message: String,
    },

    /// The request never got a usable answer.
    #[error("{fallback}: {source}")]
    Network {
        /// "Login failed" / "Signup failed".
        fallback: &'static str,
        /// Underlying transport or decode error.
        source: reqwest::Error,
    },

    /// The credential arrived but could not be persisted.
    #[error("Could not save session: {0}")]
    Storage(#[from] StorageError),

    /// Another login or signup is still running.
    #[error("Another sign-in is already in progress")]
    InProgress,
}

impl AuthError {
    /// Text to show the user on the sign-in form.
    #[must_use]
    pub fn message(&self) -> String {
        match self {
            Self::Rejected { message } => message.clone(),
            Self::Network { fallback, .. } => (*fallback).to_owned(),
            Self::Storage(_) | Self::InProgress => self.to_string(),
        }
    }
}
