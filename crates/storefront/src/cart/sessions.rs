//! One cart per browser session.
//!
//! The first cart request from a session picks a fresh slot name,
//! `<prefix>-<uuid>`, and records it in the session. Later requests from the
//! same session reuse that slot and the same [`CartStore`], so mutations
//! from one browser stay serialized while browsers never see each other's
//! carts.

use std::sync::Arc;
use std::time::Duration;

use moka::sync::Cache;
use tower_sessions::Session;
use uuid::Uuid;

use super::{CartStore, SlotStorage};
use crate::middleware::session_keys;

/// Upper bound on open stores kept in memory.
const MAX_OPEN_CARTS: u64 = 10_000;

/// Open cart stores keyed by slot name.
///
/// A store idle longer than the session lifetime is dropped. Its slot stays
/// on disk; the next request for it opens a new store and reloads it.
pub struct CartSessions {
    storage: Arc<dyn SlotStorage>,
    prefix: String,
    stores: Cache<String, Arc<CartStore>>,
}

impl std::fmt::Debug for CartSessions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CartSessions")
            .field("prefix", &self.prefix)
            .field("open", &self.stores.entry_count())
            .finish_non_exhaustive()
    }
}

impl CartSessions {
    /// Carts in `storage`, with slot names starting with `prefix`.
    #[must_use]
    pub fn new(storage: Arc<dyn SlotStorage>, prefix: impl Into<String>, idle: Duration) -> Self {
        Self {
            storage,
            prefix: prefix.into(),
            stores: Cache::builder()
                .max_capacity(MAX_OPEN_CARTS)
                .time_to_idle(idle)
                .build(),
        }
    }

    #[must_use]
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// The store for `slot`, opening it on first use.
    #[must_use]
    pub fn store(&self, slot: &str) -> Arc<CartStore> {
        self.stores.get_with(slot.to_owned(), || {
            Arc::new(CartStore::open(Arc::clone(&self.storage), slot))
        })
    }

    /// The cart belonging to `session`, assigning a slot if it has none yet.
    ///
    /// # Errors
    ///
    /// Returns the session error if the session store cannot be read or
    /// written.
    pub async fn for_session(
        &self,
        session: &Session,
    ) -> Result<Arc<CartStore>, tower_sessions::session::Error> {
        if let Some(slot) = session.get::<String>(session_keys::CART_SLOT).await? {
            return Ok(self.store(&slot));
        }

        let slot = format!("{}-{}", self.prefix, Uuid::new_v4().simple());
        session.insert(session_keys::CART_SLOT, &slot).await?;
        tracing::debug!(%slot, "assigned cart slot to session");
        Ok(self.store(&slot))
    }
}
