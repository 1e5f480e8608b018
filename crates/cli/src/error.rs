//! CLI error type.

use thiserror::Error;

use queuemate_client::{AuthError, ClientError, ConfigError, Route, Screen};

/// Errors that end a command.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("{}", .0.message())]
    Auth(#[from] AuthError),

    #[error("{0}")]
    Client(#[from] ClientError),

    #[error("{0}")]
    Invalid(String),

    /// The command's screen is not part of the active tree.
    #[error("{screen} is not available while {route}{}", hint(.route))]
    Unavailable { screen: Screen, route: Route },

    #[error("Prompt failed: {0}")]
    Prompt(#[from] dialoguer::Error),
}

impl From<queuemate_core::EmailError> for CliError {
    fn from(err: queuemate_core::EmailError) -> Self {
        Self::Invalid(err.to_string())
    }
}

impl From<queuemate_core::PasswordError> for CliError {
    fn from(err: queuemate_core::PasswordError) -> Self {
        Self::Invalid(err.to_string())
    }
}

impl From<queuemate_core::ShopFormError> for CliError {
    fn from(err: queuemate_core::ShopFormError) -> Self {
        Self::Invalid(err.to_string())
    }
}

impl From<queuemate_core::HoursError> for CliError {
    fn from(err: queuemate_core::HoursError) -> Self {
        Self::Invalid(err.to_string())
    }
}

const fn hint(route: &Route) -> &'static str {
    match route {
        Route::Unauthenticated => "; run `queuemate login` or `queuemate signup`",
        Route::AwaitingShopSetup => "; run `queuemate shop setup`",
        Route::Authenticated => "; run `queuemate logout` first",
        Route::Initializing => "",
    }
}
