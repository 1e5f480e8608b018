//! Sign-in and session commands.
//!
//! # Usage
//!
//! ```bash
//! queuemate signup -e owner@example.com
//! QUEUEMATE_PASSWORD=... queuemate login -e owner@example.com
//! queuemate status
//! queuemate logout --yes
//! ```

use queuemate_client::{
    ConfirmationRequest, QueueMate, Resolution, Route, Screen, ShopVerification, resolve,
    verify_existing_shop,
};
use queuemate_core::{Email, Password};

use super::require;
use crate::error::CliError;
use crate::{prompt, render};

/// Which credential exchange to run.
#[derive(Debug, Clone, Copy)]
pub enum Mode {
    Login,
    Signup,
}

/// Validate the form, then log in or sign up.
pub async fn sign_in(
    app: &QueueMate,
    mode: Mode,
    email: &str,
    password: Option<String>,
) -> Result<(), CliError> {
    require(app, Screen::Auth).await?;

    let email = Email::parse(email)?;
    let password = match password {
        Some(password) => password,
        None => prompt::password()?,
    };
    let password = Password::parse(&password)?;

    let session = match mode {
        Mode::Login => app.session().login(&email, &password).await?,
        Mode::Signup => app.session().signup(&email, &password).await?,
    };

    tracing::info!(email = %email, "Signed in");

    match Route::for_session(&session) {
        Route::Authenticated => render::line("Signed in. Run `queuemate shop show` for your dashboard."),
        _ => match verify_existing_shop(app.api()).await {
            ShopVerification::Linked(shop_id) => {
                render::line(&format!("Signed in. Linked to your shop {shop_id}."));
            }
            ShopVerification::SessionExpired => {
                return Err(CliError::Invalid(
                    "Your session has expired. Please sign up again.".to_string(),
                ));
            }
            ShopVerification::NeedsSetup | ShopVerification::Pending => {
                render::line("Signed in. Run `queuemate shop setup` to create your shop.");
            }
        },
    }

    Ok(())
}

/// Ask for confirmation, then clear the session.
pub async fn logout(app: &QueueMate, yes: bool) -> Result<(), CliError> {
    let session = app.session().restore().await;
    if !session.is_authenticated() {
        render::line("Already signed out.");
        return Ok(());
    }

    let request = ConfirmationRequest::logout();
    let decision = prompt::confirm(&request, yes)?;

    match resolve(request, decision, app.api()).await? {
        Resolution::LoggedOut => render::line("Signed out."),
        _ => render::line("Cancelled."),
    }
    Ok(())
}

/// Print the session and the active route.
pub async fn status(app: &QueueMate) -> Result<(), CliError> {
    let session = app.session().restore().await;
    render::session(&session, Route::for_session(&session));
    Ok(())
}
