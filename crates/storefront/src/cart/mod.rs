//! The cart store.
//!
//! [`CartStore`] owns the canonical cart for one slot and is the only writer
//! of that slot in this process. Every surface that reads or changes the cart
//! goes through it: the marketplace grid, the vineyard detail grid and the
//! cart panel. The web and mobile surfaces get one store per browser session
//! from [`CartSessions`]; the CLI opens a single store on its configured slot.
//!
//! # Persistence
//!
//! Every mutation is applied in memory first and then written through to the
//! slot as one whole value. A failed write does not roll anything back: the
//! in-memory cart stays authoritative, the error is handed to the caller as a
//! warning, and the next mutation writes the full cart again. Writes are not
//! retried.
//!
//! Reads are forgiving. A missing slot, an unreadable slot or a slot that is
//! not a JSON array all load as an empty cart. Invalid records inside a valid
//! array are dropped one by one.

pub mod checkout;
pub mod panel;
pub mod sessions;
pub mod storage;

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::instrument;

use vinea_core::cart::{decode_cart, encode_cart};
use vinea_core::{Cart, CartTotals, CatalogItem, CatalogItemId};

pub use checkout::{
    CheckoutFailure, CheckoutProcessor, CheckoutResult, InstantCheckout, OrderConfirmation,
};
pub use panel::CartPanel;
pub use sessions::CartSessions;
pub use storage::{
    FileStorage, MemoryStorage, SlotStorage, StorageError, is_valid_slot_name,
};

/// Default slot name, the same key the web front end keeps its cart under.
/// Session carts use it as a prefix.
pub const DEFAULT_CART_SLOT: &str = "wineCart";

/// Result of a cart mutation.
#[derive(Debug)]
#[must_use]
pub struct CartUpdate {
    /// The cart after the mutation.
    pub cart: Cart,
    /// Whether the mutation changed anything.
    pub changed: bool,
    /// Set if the cart could not be persisted. Non-fatal.
    pub write_error: Option<StorageError>,
}

struct State {
    cart: Cart,
    /// The last write failed, so the slot is older than `cart`.
    unsynced: bool,
}

/// One slot's cart with write-through persistence.
pub struct CartStore {
    storage: Arc<dyn SlotStorage>,
    slot: String,
    state: Mutex<State>,
}

impl std::fmt::Debug for CartStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CartStore")
            .field("slot", &self.slot)
            .finish_non_exhaustive()
    }
}

impl CartStore {
    /// Open the store on `slot` and load whatever is persisted there.
    #[must_use]
    pub fn open(storage: Arc<dyn SlotStorage>, slot: impl Into<String>) -> Self {
        let store = Self {
            storage,
            slot: slot.into(),
            state: Mutex::new(State {
                cart: Cart::new(),
                unsynced: false,
            }),
        };
        let _ = store.load();
        store
    }

    #[must_use]
    pub fn slot(&self) -> &str {
        &self.slot
    }

    /// Re-read the persisted slot and return the cart.
    ///
    /// Surfaces call this when they open so they pick up changes made by a
    /// different entry point. If the last write failed the slot is stale and
    /// the in-memory cart is returned instead.
    #[instrument(skip(self), fields(slot = %self.slot))]
    pub fn load(&self) -> Cart {
        let mut state = self.lock();
        if state.unsynced {
            tracing::debug!("slot behind memory after failed write, keeping in-memory cart");
            return state.cart.clone();
        }

        state.cart = self.read_slot();
        state.cart.clone()
    }

    /// The in-memory cart, without touching storage.
    #[must_use]
    pub fn snapshot(&self) -> Cart {
        self.lock().cart.clone()
    }

    /// Add `quantity` of `item`, merging into an existing line for its ID.
    ///
    /// Name, vintage, price and image are captured now. Showing a
    /// confirmation is up to the caller.
    #[instrument(skip(self, item), fields(wine_id = %item.id))]
    pub fn add_item(&self, item: &CatalogItem, quantity: u32) -> CartUpdate {
        self.mutate(|cart| {
            cart.add_item(item, quantity);
            true
        })
    }

    /// Change the quantity of line `id` by `delta`, clamped to at least one.
    /// Unknown IDs are ignored.
    #[instrument(skip(self))]
    pub fn update_quantity(&self, id: &CatalogItemId, delta: i64) -> CartUpdate {
        self.mutate(|cart| cart.update_quantity(id, delta))
    }

    /// Remove line `id`. Unknown IDs are ignored.
    #[instrument(skip(self))]
    pub fn remove_item(&self, id: &CatalogItemId) -> CartUpdate {
        self.mutate(|cart| cart.remove_item(id).is_some())
    }

    /// Empty the cart.
    ///
    /// Always writes the empty cart, even when memory was already empty, so
    /// lines another writer put in the slot do not come back on the next
    /// load. `changed` reports whether this store had lines to drop.
    #[instrument(skip(self))]
    pub fn clear(&self) -> CartUpdate {
        let mut state = self.lock();
        let changed = !state.cart.is_empty();
        state.cart.clear();
        let write_error = self.persist(&mut state);
        CartUpdate {
            cart: state.cart.clone(),
            changed,
            write_error,
        }
    }

    /// Subtotal, shipping, total and bottle count for `cart`.
    #[must_use]
    pub fn totals(cart: &Cart) -> CartTotals {
        cart.totals()
    }

    /// Place an order for the current cart.
    ///
    /// An empty cart fails without reaching `processor`. On success the cart
    /// is cleared and persisted; on failure it is left as it was.
    #[instrument(skip(self, processor))]
    pub fn checkout(&self, processor: &dyn CheckoutProcessor) -> CheckoutResult {
        let mut state = self.lock();
        if state.cart.is_empty() {
            return CheckoutResult::Failed(CheckoutFailure::EmptyCart);
        }

        let totals = state.cart.totals();
        match processor.process(&state.cart, &totals) {
            Ok(confirmation) => {
                tracing::info!(
                    order_id = %confirmation.order_id,
                    items = confirmation.item_count,
                    "order placed"
                );
                state.cart.clear();
                let write_error = self.persist(&mut state);
                CheckoutResult::Placed {
                    confirmation,
                    write_error,
                }
            }
            Err(failure) => {
                tracing::warn!(error = %failure, "checkout failed");
                CheckoutResult::Failed(failure)
            }
        }
    }

    fn mutate(&self, apply: impl FnOnce(&mut Cart) -> bool) -> CartUpdate {
        let mut state = self.lock();
        let changed = apply(&mut state.cart);
        let write_error = if changed {
            self.persist(&mut state)
        } else {
            None
        };
        CartUpdate {
            cart: state.cart.clone(),
            changed,
            write_error,
        }
    }

    /// Write the whole cart to the slot. Runs under the state lock so writes
    /// land in the order mutations were applied.
    fn persist(&self, state: &mut State) -> Option<StorageError> {
        let result = encode_cart(&state.cart)
            .map_err(StorageError::from)
            .and_then(|payload| self.storage.set(&self.slot, &payload));

        match result {
            Ok(()) => {
                state.unsynced = false;
                None
            }
            Err(e) => {
                tracing::warn!(error = %e, slot = %self.slot, "failed to persist cart");
                state.unsynced = true;
                Some(e)
            }
        }
    }

    fn read_slot(&self) -> Cart {
        let raw = match self.storage.get(&self.slot) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Cart::new(),
            Err(e) => {
                tracing::warn!(error = %e, "failed to read cart slot, starting empty");
                return Cart::new();
            }
        };

        match decode_cart(&raw) {
            Ok(decoded) => {
                if decoded.discarded > 0 {
                    tracing::warn!(
                        discarded = decoded.discarded,
                        "dropped invalid records from cart slot"
                    );
                }
                decoded.cart
            }
            Err(e) => {
                tracing::warn!(error = %e, "discarding unparsable cart slot");
                Cart::new()
            }
        }
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use vinea_core::{Price, VineyardId};

    fn wine(id: &str, price: Price) -> CatalogItem {
        CatalogItem {
            id: CatalogItemId::new(id),
            name: format!("Cuvée {id}"),
            year: 2015,
            price,
            image_url: format!("https://images.example/{id}.jpg"),
            stock: 10,
            wine_type: "Rouge".to_string(),
            region: "Bordeaux".to_string(),
            rating: 4.7,
            description: String::new(),
            vineyard_id: VineyardId::new("1"),
        }
    }

    fn store_with(storage: Arc<MemoryStorage>) -> CartStore {
        CartStore::open(storage, DEFAULT_CART_SLOT)
    }

    struct Declining;

    impl CheckoutProcessor for Declining {
        fn process(
            &self,
            _cart: &Cart,
            _totals: &CartTotals,
        ) -> Result<OrderConfirmation, CheckoutFailure> {
            Err(CheckoutFailure::Declined("card expired".to_string()))
        }
    }

    #[test]
    fn test_open_on_empty_slot() {
        let store = store_with(Arc::new(MemoryStorage::new()));
        assert!(store.snapshot().is_empty());
        assert!(store.load().is_empty());
    }

    #[test]
    fn test_add_persists_and_reloads_exact_line() {
        let storage = Arc::new(MemoryStorage::new());
        let store = store_with(Arc::clone(&storage));
        let update = store.add_item(&wine("1", Price::from_cents(2550)), 2);
        assert!(update.changed);
        assert!(update.write_error.is_none());

        let reopened = store_with(storage);
        let cart = reopened.load();
        let line = cart.find(&CatalogItemId::new("1")).unwrap();
        assert_eq!(line.name, "Cuvée 1");
        assert_eq!(line.year, 2015);
        assert_eq!(line.price, Price::from_cents(2550));
        assert_eq!(line.image_url, "https://images.example/1.jpg");
        assert_eq!(line.quantity(), 2);
        assert_eq!(cart, update.cart);
    }

    #[test]
    fn test_load_picks_up_other_writers() {
        let storage = Arc::new(MemoryStorage::new());
        let panel = store_with(Arc::clone(&storage));
        let marketplace = store_with(Arc::clone(&storage));

        let _ = marketplace.add_item(&wine("1", Price::from_units(120)), 1);
        assert!(panel.snapshot().is_empty());
        assert_eq!(panel.load().len(), 1);
    }

    #[test]
    fn test_unknown_ids_are_noops_without_writes() {
        let storage = Arc::new(MemoryStorage::new());
        let store = store_with(Arc::clone(&storage));
        let _ = store.add_item(&wine("1", Price::from_units(10)), 1);
        let before = storage.get(DEFAULT_CART_SLOT).unwrap();

        storage.set_fail_writes(true);
        let update = store.update_quantity(&CatalogItemId::new("nope"), 3);
        assert!(!update.changed);
        assert!(update.write_error.is_none());

        let update = store.remove_item(&CatalogItemId::new("nope"));
        assert!(!update.changed);
        assert!(update.write_error.is_none());
        assert_eq!(storage.get(DEFAULT_CART_SLOT).unwrap(), before);
    }

    #[test]
    fn test_write_failure_keeps_memory_authoritative() {
        let storage = Arc::new(MemoryStorage::new());
        let store = store_with(Arc::clone(&storage));
        let _ = store.add_item(&wine("1", Price::from_units(10)), 1);

        storage.set_fail_writes(true);
        let update = store.add_item(&wine("2", Price::from_units(20)), 1);
        assert!(update.write_error.is_some());
        assert_eq!(update.cart.len(), 2);

        // The slot is stale, so a reload must not roll memory back.
        assert_eq!(store.load().len(), 2);

        storage.set_fail_writes(false);
        let update = store.update_quantity(&CatalogItemId::new("2"), 1);
        assert!(update.write_error.is_none());

        let reopened = store_with(storage);
        assert_eq!(reopened.snapshot().len(), 2);
    }

    #[test]
    fn test_quota_error_is_reported() {
        let store = store_with(Arc::new(MemoryStorage::with_quota(8)));
        let update = store.add_item(&wine("1", Price::from_units(10)), 1);
        assert!(matches!(
            update.write_error,
            Some(StorageError::QuotaExceeded { .. })
        ));
        assert_eq!(update.cart.len(), 1);
    }

    #[test]
    fn test_corrupt_slot_loads_empty() {
        let storage = Arc::new(MemoryStorage::new());
        storage.set(DEFAULT_CART_SLOT, "{{{ not json").unwrap();

        let store = store_with(storage);
        assert!(store.load().is_empty());
        assert_eq!(CartStore::totals(&store.snapshot()), CartTotals::EMPTY);
    }

    #[test]
    fn test_clear_overwrites_lines_written_elsewhere() {
        let storage = Arc::new(MemoryStorage::new());
        let panel = store_with(Arc::clone(&storage));
        let cli = store_with(Arc::clone(&storage));
        let _ = cli.add_item(&wine("1", Price::from_units(120)), 2);
        assert!(panel.snapshot().is_empty());

        let update = panel.clear();
        assert!(!update.changed);
        assert!(update.write_error.is_none());
        assert_eq!(storage.get(DEFAULT_CART_SLOT).unwrap().as_deref(), Some("[]"));
        assert!(panel.load().is_empty());
    }

    #[test]
    fn test_clear_reports_write_failure_on_empty_cart() {
        let storage = Arc::new(MemoryStorage::new());
        let store = store_with(Arc::clone(&storage));
        storage.set_fail_writes(true);

        let update = store.clear();
        assert!(!update.changed);
        assert!(update.write_error.is_some());
    }

    #[test]
    fn test_clear_reports_change_only_when_non_empty() {
        let store = store_with(Arc::new(MemoryStorage::new()));
        assert!(!store.clear().changed);

        let _ = store.add_item(&wine("1", Price::from_units(10)), 1);
        let update = store.clear();
        assert!(update.changed);
        assert!(update.cart.is_empty());
    }

    #[test]
    fn test_checkout_clears_and_persists() {
        let storage = Arc::new(MemoryStorage::new());
        let store = store_with(Arc::clone(&storage));
        let _ = store.add_item(&wine("1", Price::from_units(10)), 2);
        let _ = store.add_item(&wine("2", Price::from_cents(2550)), 1);

        match store.checkout(&InstantCheckout) {
            CheckoutResult::Placed {
                confirmation,
                write_error,
            } => {
                assert!(write_error.is_none());
                assert_eq!(confirmation.item_count, 3);
                assert_eq!(confirmation.totals.total, Price::from_cents(5550));
            }
            CheckoutResult::Failed(f) => panic!("checkout failed: {f}"),
        }

        assert!(store.snapshot().is_empty());
        assert!(store_with(storage).load().is_empty());
    }

    #[test]
    fn test_checkout_empty_cart_fails() {
        let store = store_with(Arc::new(MemoryStorage::new()));
        assert!(matches!(
            store.checkout(&InstantCheckout),
            CheckoutResult::Failed(CheckoutFailure::EmptyCart)
        ));
    }

    #[test]
    fn test_declined_checkout_keeps_cart() {
        let store = store_with(Arc::new(MemoryStorage::new()));
        let _ = store.add_item(&wine("1", Price::from_units(10)), 1);

        let result = store.checkout(&Declining);
        assert!(!result.is_placed());
        assert!(matches!(
            result,
            CheckoutResult::Failed(CheckoutFailure::Declined(_))
        ));
        assert_eq!(store.load().len(), 1);
    }
}
