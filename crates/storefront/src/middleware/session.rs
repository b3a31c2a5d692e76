//! Session middleware configuration.
//!
//! Sets up in-memory sessions using tower-sessions. A session is what ties a
//! browser or device to its own cart slot and signed-in user.

use tower_sessions::{Expiry, MemoryStore, SessionManagerLayer};

use crate::config::StorefrontConfig;

/// Session cookie name.
pub const SESSION_COOKIE_NAME: &str = "vinea_session";

/// Session expiry time in seconds (7 days).
pub const SESSION_EXPIRY_SECONDS: i64 = 7 * 24 * 60 * 60;

/// Keys for values stored in the session.
pub mod session_keys {
    /// Slot name of this browser's cart.
    pub const CART_SLOT: &str = "cart_slot";
    /// ID of the signed-in user.
    pub const CURRENT_USER: &str = "current_user";
}

/// Create the session layer over `store`.
#[must_use]
pub fn create_session_layer(
    store: MemoryStore,
    config: &StorefrontConfig,
) -> SessionManagerLayer<MemoryStore> {
    SessionManagerLayer::new(store)
        .with_name(SESSION_COOKIE_NAME)
        .with_expiry(Expiry::OnInactivity(
            tower_sessions::cookie::time::Duration::seconds(SESSION_EXPIRY_SECONDS),
        ))
        .with_secure(config.secure_cookies)
        .with_same_site(tower_sessions::cookie::SameSite::Lax)
        .with_http_only(true)
        .with_path("/")
}
