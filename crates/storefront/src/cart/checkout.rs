//! Checkout seam.
//!
//! There is no payment backend yet. [`InstantCheckout`] accepts every order;
//! a real integration implements [`CheckoutProcessor`] and may fail, which is
//! why callers always branch on [`CheckoutResult`].

use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

use vinea_core::{Cart, CartTotals};

use super::storage::StorageError;

/// Why an order was not placed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CheckoutFailure {
    /// Nothing to order.
    #[error("cart is empty")]
    EmptyCart,

    /// The payment provider refused the charge.
    #[error("payment declined: {0}")]
    Declined(String),

    /// The payment provider could not be reached.
    #[error("payment provider unavailable: {0}")]
    Unavailable(String),
}

/// Receipt for a placed order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderConfirmation {
    pub order_id: Uuid,
    pub placed_at: DateTime<Utc>,
    pub item_count: u64,
    pub totals: CartTotals,
}

/// Outcome of [`CartStore::checkout`](super::CartStore::checkout).
#[derive(Debug)]
#[must_use]
pub enum CheckoutResult {
    /// The order went through and the cart was cleared. `write_error` is set
    /// if persisting the now-empty cart failed.
    Placed {
        confirmation: OrderConfirmation,
        write_error: Option<StorageError>,
    },
    /// The order was not placed; the cart is untouched.
    Failed(CheckoutFailure),
}

impl CheckoutResult {
    #[must_use]
    pub const fn is_placed(&self) -> bool {
        matches!(self, Self::Placed { .. })
    }
}

/// Takes payment for a cart.
pub trait CheckoutProcessor: Send + Sync {
    /// Charge for `cart`.
    ///
    /// # Errors
    ///
    /// Returns a [`CheckoutFailure`] if the order could not be placed.
    fn process(
        &self,
        cart: &Cart,
        totals: &CartTotals,
    ) -> Result<OrderConfirmation, CheckoutFailure>;
}

/// Accepts every order immediately.
#[derive(Debug, Clone, Copy, Default)]
pub struct InstantCheckout;

impl CheckoutProcessor for InstantCheckout {
    fn process(
        &self,
        _cart: &Cart,
        totals: &CartTotals,
    ) -> Result<OrderConfirmation, CheckoutFailure> {
        Ok(OrderConfirmation {
            order_id: Uuid::new_v4(),
            placed_at: Utc::now(),
            item_count: totals.total_item_count,
            totals: *totals,
        })
    }
}
