//! Application state shared across handlers.

use std::sync::Arc;
use std::time::Duration;

use tower_sessions::MemoryStore;

use crate::cart::{CartSessions, CheckoutProcessor, FileStorage, InstantCheckout, SlotStorage};
use crate::catalog::Catalog;
use crate::config::StorefrontConfig;
use crate::middleware::session::SESSION_EXPIRY_SECONDS;
use crate::notice::Locale;
use crate::services::auth::{AuthService, InMemoryAuthService};

/// Application state shared across all handlers.
///
/// Cheaply cloneable via `Arc`. Carts are per session: handlers look theirs
/// up through [`AppState::carts`].
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    carts: CartSessions,
    sessions: MemoryStore,
    catalog: Catalog,
    auth: Arc<dyn AuthService>,
    checkout: Arc<dyn CheckoutProcessor>,
}

impl AppState {
    /// Assemble state from explicit collaborators.
    #[must_use]
    pub fn new(
        config: StorefrontConfig,
        storage: Arc<dyn SlotStorage>,
        catalog: Catalog,
        auth: Arc<dyn AuthService>,
        checkout: Arc<dyn CheckoutProcessor>,
    ) -> Self {
        let carts = CartSessions::new(
            storage,
            config.cart_slot.clone(),
            Duration::from_secs(SESSION_EXPIRY_SECONDS.unsigned_abs()),
        );
        Self {
            inner: Arc::new(AppStateInner {
                config,
                carts,
                sessions: MemoryStore::default(),
                catalog,
                auth,
                checkout,
            }),
        }
    }

    /// Production wiring: file-backed slots under `data_dir`, the sample
    /// catalog, local accounts and instant checkout.
    #[must_use]
    pub fn from_config(config: StorefrontConfig) -> Self {
        let storage = Arc::new(FileStorage::new(config.data_dir.clone()));
        Self::new(
            config,
            storage,
            Catalog::sample(),
            Arc::new(InMemoryAuthService::new()),
            Arc::new(InstantCheckout),
        )
    }

    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    #[must_use]
    pub fn carts(&self) -> &CartSessions {
        &self.inner.carts
    }

    /// Server-side session records.
    #[must_use]
    pub fn sessions(&self) -> &MemoryStore {
        &self.inner.sessions
    }

    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.inner.catalog
    }

    #[must_use]
    pub fn auth(&self) -> &dyn AuthService {
        self.inner.auth.as_ref()
    }

    #[must_use]
    pub fn checkout(&self) -> &dyn CheckoutProcessor {
        self.inner.checkout.as_ref()
    }

    /// Language for notices and the cart panel.
    #[must_use]
    pub fn locale(&self) -> Locale {
        self.inner.config.locale
    }
}
