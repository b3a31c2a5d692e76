//! Authentication route handlers.
//!
//! Thin JSON wrappers over the [`AuthService`](crate::services::auth::AuthService)
//! collaborator. The signed-in user is kept in the caller's session, so each
//! browser signs in on its own. The cart does not depend on who is signed in,
//! and signing out keeps the session's cart.

use axum::{
    Json,
    extract::State,
    http::StatusCode,
};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use tower_sessions::Session;
use tracing::instrument;

use vinea_core::{AuthUser, UserId, UserRole};

use crate::error::{Result, clear_sentry_user, set_sentry_user};
use crate::middleware::session_keys;
use crate::services::auth::AuthError;
use crate::state::AppState;

// =============================================================================
// Request Types
// =============================================================================

/// Registration request.
#[derive(Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub name: String,
    #[serde(default)]
    pub role: UserRole,
}

/// Login request.
#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

// Passwords stay out of logs and spans.
impl std::fmt::Debug for RegisterRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegisterRequest")
            .field("email", &self.email)
            .field("name", &self.name)
            .field("role", &self.role)
            .finish_non_exhaustive()
    }
}

impl std::fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginRequest")
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Serialize)]
pub struct MeResponse {
    pub user: Option<AuthUser>,
}

// =============================================================================
// Session Helpers
// =============================================================================

async fn sign_in_session(session: &Session, user: &AuthUser) -> Result<()> {
    session.cycle_id().await?;
    session.insert(session_keys::CURRENT_USER, &user.id).await?;
    set_sentry_user(&user.id, Some(user.email.as_str()));
    Ok(())
}

async fn current_user_id(session: &Session) -> Result<Option<UserId>> {
    Ok(session.get::<UserId>(session_keys::CURRENT_USER).await?)
}

// =============================================================================
// Handlers
// =============================================================================

/// Create an account and sign this session in.
#[instrument(skip(state, session))]
pub async fn register(
    State(state): State<AppState>,
    session: Session,
    Json(request): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<AuthUser>)> {
    let password = SecretString::from(request.password);
    let user = state
        .auth()
        .sign_up(&request.email, &password, &request.name, request.role)
        .await?;
    sign_in_session(&session, &user).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

#[instrument(skip(state, session))]
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Json(request): Json<LoginRequest>,
) -> Result<Json<AuthUser>> {
    let password = SecretString::from(request.password);
    let user = state.auth().sign_in(&request.email, &password).await?;
    sign_in_session(&session, &user).await?;
    Ok(Json(user))
}

#[instrument(skip(state, session))]
pub async fn logout(State(state): State<AppState>, session: Session) -> Result<StatusCode> {
    let user_id = session
        .remove::<UserId>(session_keys::CURRENT_USER)
        .await?
        .ok_or(AuthError::NotSignedIn)?;
    state.auth().sign_out(&user_id).await?;
    clear_sentry_user();
    Ok(StatusCode::NO_CONTENT)
}

/// The user signed in on this session, or `null`.
#[instrument(skip(state, session))]
pub async fn me(State(state): State<AppState>, session: Session) -> Result<Json<MeResponse>> {
    let user = match current_user_id(&session).await? {
        Some(id) => state.auth().user(&id).await?,
        None => None,
    };
    Ok(Json(MeResponse { user }))
}
