//! Authentication error types.

use thiserror::Error;

/// Errors returned by the auth collaborator.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Invalid email format.
    #[error("invalid email: {0}")]
    InvalidEmail(#[from] vinea_core::EmailError),

    /// Display name missing.
    #[error("name is required")]
    MissingName,

    /// Password too weak or invalid.
    #[error("password validation failed: {0}")]
    WeakPassword(String),

    /// An account already uses this email.
    #[error("user already exists")]
    UserAlreadyExists,

    /// Wrong password or unknown email.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// Operation needs a signed-in user.
    #[error("not signed in")]
    NotSignedIn,

    /// Password hashing error.
    #[error("password hashing error")]
    PasswordHash,

    /// The hosted backend could not be reached.
    #[error("auth backend unavailable: {0}")]
    Backend(String),
}
