//! Command implementations, one module per screen tree.

pub mod auth;
pub mod barbers;
pub mod queue;
pub mod shop;

use queuemate_client::{QueueMate, Route, Screen, Session};

use crate::error::CliError;

/// Restore the session and make sure `screen` belongs to the active tree.
pub async fn require(app: &QueueMate, screen: Screen) -> Result<Session, CliError> {
    let session = app.session().restore().await;
    let route = Route::for_session(&session);

    if !route.allows(screen) {
        return Err(CliError::Unavailable { screen, route });
    }

    tracing::debug!(%route, %screen, "Screen available");
    Ok(session)
}
