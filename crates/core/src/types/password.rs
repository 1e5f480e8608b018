//! Password type.

use core::fmt;

use secrecy::{ExposeSecret, SecretString};

/// Errors that can occur when parsing a [`Password`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PasswordError {
    /// The input is empty or only whitespace.
    #[error("Please enter your password")]
    Empty,
    /// The input is shorter than [`Password::MIN_LENGTH`].
    #[error("Password must be at least {min} characters")]
    TooShort {
        /// Minimum allowed length.
        min: usize,
    },
}

/// A sign-in password.
///
/// Held in a [`SecretString`] so it never shows up in `Debug` output or logs.
/// Unlike [`crate::Email`], the input is not trimmed.
#[derive(Clone)]
pub struct Password(SecretString);

impl Password {
    /// Minimum password length accepted by the sign-in form.
    pub const MIN_LENGTH: usize = 6;

    /// Parse a `Password` from user input.
    ///
    /// # Errors
    ///
    /// Returns [`PasswordError::Empty`] for blank input and
    /// [`PasswordError::TooShort`] below six characters.
    pub fn parse(s: &str) -> Result<Self, PasswordError> {
        if s.trim().is_empty() {
            return Err(PasswordError::Empty);
        }

        if s.chars().count() < Self::MIN_LENGTH {
            return Err(PasswordError::TooShort {
                min: Self::MIN_LENGTH,
            });
        }

        Ok(Self(SecretString::from(s.to_owned())))
    }

    /// Expose the plaintext for sending to the authentication endpoint.
    #[must_use]
    pub fn expose(&self) -> &str {
        self.0.expose_secret()
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password([REDACTED])")
    }
}
