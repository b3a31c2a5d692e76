//! Authentication service.
//!
//! Accounts live in a hosted backend. The storefront only consumes four calls
//! (sign up, sign in, sign out, user lookup), captured by [`AuthService`].
//! [`InMemoryAuthService`] implements them locally with Argon2id hashes for
//! development and tests.
//!
//! The service does not track who is signed in. Each browser session records
//! its own user ID and hands it back for [`AuthService::sign_out`] and
//! [`AuthService::user`].

mod error;

pub use error::AuthError;

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use uuid::Uuid;

use vinea_core::{AuthUser, Email, UserId, UserRole};

/// Minimum password length.
const MIN_PASSWORD_LENGTH: usize = 8;

/// Avatar generator used for new profiles.
const AVATAR_BASE_URL: &str = "https://api.dicebear.com/7.x/avataaars/svg";

/// The account operations the storefront needs from the auth backend.
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Create an account.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidEmail`, `AuthError::MissingName` or
    /// `AuthError::WeakPassword` for bad input and
    /// `AuthError::UserAlreadyExists` if the email is taken.
    async fn sign_up(
        &self,
        email: &str,
        password: &SecretString,
        name: &str,
        role: UserRole,
    ) -> Result<AuthUser, AuthError>;

    /// Sign in with email and password.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidCredentials` if the email/password is wrong.
    async fn sign_in(&self, email: &str, password: &SecretString) -> Result<AuthUser, AuthError>;

    /// End `user`'s session with the backend.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::NotSignedIn` if `user` has no account.
    async fn sign_out(&self, user: &UserId) -> Result<(), AuthError>;

    /// Look up a user by ID. `None` if the account no longer exists.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Backend` if the backend cannot be queried.
    async fn user(&self, id: &UserId) -> Result<Option<AuthUser>, AuthError>;
}

struct Account {
    user: AuthUser,
    password_hash: String,
}

#[derive(Default)]
struct Directory {
    accounts: HashMap<Email, Account>,
}

impl Directory {
    fn find(&self, id: &UserId) -> Option<&AuthUser> {
        self.accounts
            .values()
            .map(|account| &account.user)
            .find(|user| &user.id == id)
    }
}

/// Process-local accounts with Argon2id password hashes.
#[derive(Default)]
pub struct InMemoryAuthService {
    directory: Mutex<Directory>,
}

impl std::fmt::Debug for InMemoryAuthService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryAuthService").finish_non_exhaustive()
    }
}

impl InMemoryAuthService {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Directory> {
        self.directory.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl AuthService for InMemoryAuthService {
    async fn sign_up(
        &self,
        email: &str,
        password: &SecretString,
        name: &str,
        role: UserRole,
    ) -> Result<AuthUser, AuthError> {
        let email = Email::parse(email)?;
        let name = name.trim();
        if name.is_empty() {
            return Err(AuthError::MissingName);
        }
        validate_password(password.expose_secret())?;

        if self.lock().accounts.contains_key(&email) {
            return Err(AuthError::UserAlreadyExists);
        }
        let password_hash = hash_password(password.expose_secret())?;

        let user = AuthUser {
            id: UserId::new(Uuid::new_v4().to_string()),
            email: email.clone(),
            name: name.to_string(),
            role,
            avatar_url: Some(avatar_url(name)),
        };

        let mut directory = self.lock();
        if directory.accounts.contains_key(&email) {
            return Err(AuthError::UserAlreadyExists);
        }
        directory.accounts.insert(
            email,
            Account {
                user: user.clone(),
                password_hash,
            },
        );

        tracing::info!(user_id = %user.id, role = %user.role, "account created");
        Ok(user)
    }

    async fn sign_in(&self, email: &str, password: &SecretString) -> Result<AuthUser, AuthError> {
        let email = Email::parse(email).map_err(|_| AuthError::InvalidCredentials)?;

        let (user, password_hash) = {
            let directory = self.lock();
            let account = directory
                .accounts
                .get(&email)
                .ok_or(AuthError::InvalidCredentials)?;
            (account.user.clone(), account.password_hash.clone())
        };
        verify_password(password.expose_secret(), &password_hash)?;

        tracing::info!(user_id = %user.id, "signed in");
        Ok(user)
    }

    async fn sign_out(&self, user: &UserId) -> Result<(), AuthError> {
        if self.lock().find(user).is_none() {
            return Err(AuthError::NotSignedIn);
        }
        tracing::info!(user_id = %user, "signed out");
        Ok(())
    }

    async fn user(&self, id: &UserId) -> Result<Option<AuthUser>, AuthError> {
        Ok(self.lock().find(id).cloned())
    }
}

/// Avatar URL seeded by the display name with whitespace removed.
fn avatar_url(name: &str) -> String {
    let seed: String = name.split_whitespace().collect();
    format!("{AVATAR_BASE_URL}?seed={seed}")
}

fn validate_password(password: &str) -> Result<(), AuthError> {
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(AuthError::WeakPassword(format!(
            "password must be at least {MIN_PASSWORD_LENGTH} characters"
        )));
    }
    Ok(())
}

/// Hash a password using Argon2id.
fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|_| AuthError::PasswordHash)
}

/// Verify a password against a stored hash.
fn verify_password(password: &str, hash: &str) -> Result<(), AuthError> {
    let parsed_hash = PasswordHash::new(hash).map_err(|_| AuthError::InvalidCredentials)?;
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .map_err(|_| AuthError::InvalidCredentials)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn secret(s: &str) -> SecretString {
        SecretString::from(s.to_string())
    }

    #[tokio::test]
    async fn test_sign_up_creates_account() {
        let auth = InMemoryAuthService::new();
        let user = auth
            .sign_up(
                "Marie@Example.com",
                &secret("vendanges2024"),
                "Marie Dubois",
                UserRole::Vineyard,
            )
            .await
            .unwrap();

        assert_eq!(user.email.as_str(), "marie@example.com");
        assert_eq!(user.role, UserRole::Vineyard);
        assert_eq!(
            user.avatar_url.as_deref(),
            Some("https://api.dicebear.com/7.x/avataaars/svg?seed=MarieDubois")
        );
        assert_eq!(auth.user(&user.id).await.unwrap(), Some(user));
    }

    #[tokio::test]
    async fn test_sign_up_validation() {
        let auth = InMemoryAuthService::new();
        assert!(matches!(
            auth.sign_up("bad", &secret("longenough"), "A", UserRole::Investor)
                .await,
            Err(AuthError::InvalidEmail(_))
        ));
        assert!(matches!(
            auth.sign_up("a@b.fr", &secret("short"), "A", UserRole::Investor)
                .await,
            Err(AuthError::WeakPassword(_))
        ));
        assert!(matches!(
            auth.sign_up("a@b.fr", &secret("longenough"), "  ", UserRole::Investor)
                .await,
            Err(AuthError::MissingName)
        ));
    }

    #[tokio::test]
    async fn test_duplicate_email_rejected() {
        let auth = InMemoryAuthService::new();
        auth.sign_up("a@b.fr", &secret("longenough"), "A", UserRole::Investor)
            .await
            .unwrap();
        assert!(matches!(
            auth.sign_up("A@B.FR", &secret("different1"), "B", UserRole::Investor)
                .await,
            Err(AuthError::UserAlreadyExists)
        ));
    }

    #[tokio::test]
    async fn test_sign_in_and_out() {
        let auth = InMemoryAuthService::new();
        let alice = auth
            .sign_up("a@b.fr", &secret("longenough"), "Alice", UserRole::Investor)
            .await
            .unwrap();
        auth.sign_out(&alice.id).await.unwrap();
        assert!(matches!(
            auth.sign_out(&UserId::new("ghost")).await,
            Err(AuthError::NotSignedIn)
        ));
        assert!(auth.user(&UserId::new("ghost")).await.unwrap().is_none());

        assert!(matches!(
            auth.sign_in("a@b.fr", &secret("wrongpass")).await,
            Err(AuthError::InvalidCredentials)
        ));
        assert!(matches!(
            auth.sign_in("nobody@b.fr", &secret("longenough")).await,
            Err(AuthError::InvalidCredentials)
        ));

        let user = auth.sign_in("a@b.fr", &secret("longenough")).await.unwrap();
        assert_eq!(user.name, "Alice");
        assert_eq!(user.id, alice.id);
    }
}
