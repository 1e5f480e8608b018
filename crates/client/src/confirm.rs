//! Confirmation protocol for destructive actions.
//!
//! Operations that need the user's consent return a [`ConfirmationRequest`]
//! instead of prompting. The caller shows it however it likes and hands the
//! answer back to [`resolve`], which performs the follow-up only when
//! confirmed.

use tracing::{info, instrument};

use queuemate_core::BarberId;

use crate::api::ApiClient;
use crate::error::ClientError;

/// What a confirmed request will do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PendingAction {
    Logout,
    DeleteBarber(BarberId),
}

/// A prompt the caller must answer before the action runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmationRequest {
    pub title: &'static str,
    pub message: &'static str,
    pub confirm_label: &'static str,
    pub cancel_label: &'static str,
    /// Whether the confirm button should be styled as destructive.
    pub destructive: bool,
    pub action: PendingAction,
}

impl ConfirmationRequest {
    #[must_use]
    pub const fn logout() -> Self {
        Self {
            title: "Logout",
            message: "Are you sure you want to logout?",
            confirm_label: "Logout",
            cancel_label: "Cancel",
            destructive: true,
            action: PendingAction::Logout,
        }
    }

    #[must_use]
    pub const fn delete_barber(id: BarberId) -> Self {
        Self {
            title: "Confirm Delete",
            message: "Are you sure you want to delete this team member?",
            confirm_label: "Delete",
            cancel_label: "Cancel",
            destructive: true,
            action: PendingAction::DeleteBarber(id),
        }
    }
}

/// The user's answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Confirm,
    Cancel,
}

impl From<bool> for Decision {
    fn from(confirmed: bool) -> Self {
        if confirmed { Self::Confirm } else { Self::Cancel }
    }
}

/// Outcome of a resolved request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Cancelled,
    LoggedOut,
    BarberDeleted(BarberId),
}

/// Run the request's action if `decision` confirms it.
///
/// # Errors
///
/// Returns `ClientError` if the follow-up request fails. Logging out never
/// fails.
#[instrument(skip(api, request), fields(action = ?request.action))]
pub async fn resolve(
    request: ConfirmationRequest,
    decision: Decision,
    api: &ApiClient,
) -> Result<Resolution, ClientError> {
    if decision == Decision::Cancel {
        return Ok(Resolution::Cancelled);
    }

    match request.action {
        PendingAction::Logout => {
            api.session().logout().await;
            Ok(Resolution::LoggedOut)
        }
        PendingAction::DeleteBarber(id) => {
            api.delete_barber(&id).await?;
            info!(barber_id = %id, "Barber deleted");
            Ok(Resolution::BarberDeleted(id))
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::api::Endpoints;
    use crate::session::SessionStore;
    use crate::storage::MemoryStore;

    fn api() -> ApiClient {
        let endpoints = Endpoints::new(url::Url::parse("http://127.0.0.1:9/").unwrap());
        ApiClient::new(SessionStore::new(
            Arc::new(MemoryStore::new()),
            reqwest::Client::new(),
            endpoints,
        ))
    }

    #[tokio::test]
    async fn test_cancel_does_nothing() {
        let api = api();
        let request = ConfirmationRequest::delete_barber(BarberId::new("b1"));
        let resolution = resolve(request, Decision::Cancel, &api).await.unwrap();
        assert_eq!(resolution, Resolution::Cancelled);
        assert!(api.session().current().is_loading());
    }

    #[tokio::test]
    async fn test_confirmed_logout() {
        let api = api();
        let resolution = resolve(ConfirmationRequest::logout(), Decision::Confirm, &api)
            .await
            .unwrap();
        assert_eq!(resolution, Resolution::LoggedOut);
        assert!(!api.session().current().is_authenticated());
        assert!(!api.session().current().is_loading());
    }

    #[tokio::test]
    async fn test_delete_needs_a_session() {
        let request = ConfirmationRequest::delete_barber(BarberId::new("b1"));
        let err = resolve(request, Decision::Confirm, &api()).await.unwrap_err();
        assert!(matches!(err, ClientError::NotAuthenticated));
    }

    #[test]
    fn test_decision_from_bool() {
        assert_eq!(Decision::from(true), Decision::Confirm);
        assert_eq!(Decision::from(false), Decision::Cancel);
    }
}
