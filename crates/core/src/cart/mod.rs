//! Shopping cart state and its pure transitions.
//!
//! A [`Cart`] is an ordered list of [`CartLineItem`]s with at most one line per
//! catalog ID. Every line has a quantity of at least one: decrementing below
//! that clamps, and only [`Cart::remove_item`] takes a line out.
//!
//! Nothing in this module performs I/O. Persistence and notifications belong
//! to the caller.

pub mod record;

use serde::{Deserialize, Serialize};

use crate::types::{CatalogItem, CatalogItemId, Price};

pub use record::{CartDecodeError, DecodedCart, decode_cart, encode_cart};

/// Flat shipping fee charged on any non-empty order.
pub const SHIPPING_FEE: Price = Price::from_units(10);

/// One wine in the cart.
///
/// Name, vintage, price and image are copied from the catalog when the line is
/// first created. Later catalog changes do not reach an existing line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLineItem {
    pub id: CatalogItemId,
    pub name: String,
    pub year: i32,
    pub price: Price,
    pub image_url: String,
    quantity: u32,
}

impl CartLineItem {
    /// Snapshot a catalog item into a new line.
    ///
    /// A requested quantity of zero is raised to one.
    #[must_use]
    pub fn from_catalog(item: &CatalogItem, quantity: u32) -> Self {
        Self {
            id: item.id.clone(),
            name: item.name.clone(),
            year: item.year,
            price: item.price,
            image_url: item.image_url.clone(),
            quantity: quantity.max(1),
        }
    }

    #[must_use]
    pub const fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Unit price times quantity.
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.price.times(self.quantity)
    }

    fn increase(&mut self, by: u32) {
        self.quantity = self.quantity.saturating_add(by);
    }

    fn adjust(&mut self, delta: i64) {
        let next = i64::from(self.quantity).saturating_add(delta).max(1);
        self.quantity = u32::try_from(next).unwrap_or(u32::MAX);
    }
}

/// Totals derived from the cart contents. Never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartTotals {
    pub subtotal: Price,
    pub shipping_fee: Price,
    pub total: Price,
    pub total_item_count: u64,
}

impl CartTotals {
    /// Totals for an empty cart: everything zero, no shipping.
    pub const EMPTY: Self = Self {
        subtotal: Price::ZERO,
        shipping_fee: Price::ZERO,
        total: Price::ZERO,
        total_item_count: 0,
    };
}

/// The ordered collection of line items.
///
/// Serializes as a bare JSON array of lines, which is exactly the layout of
/// the persisted cart slot.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(transparent)]
pub struct Cart {
    lines: Vec<CartLineItem>,
}

impl Cart {
    #[must_use]
    pub const fn new() -> Self {
        Self { lines: Vec::new() }
    }

    #[must_use]
    pub fn lines(&self) -> &[CartLineItem] {
        &self.lines
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    #[must_use]
    pub fn find(&self, id: &CatalogItemId) -> Option<&CartLineItem> {
        self.lines.iter().find(|line| &line.id == id)
    }

    /// Add `quantity` bottles of `item`.
    ///
    /// An existing line for the same ID has its quantity increased and keeps
    /// its position and its originally captured price. Otherwise a new line
    /// is appended.
    pub fn add_item(&mut self, item: &CatalogItem, quantity: u32) {
        let quantity = quantity.max(1);
        match self.lines.iter_mut().find(|line| line.id == item.id) {
            Some(line) => line.increase(quantity),
            None => self.lines.push(CartLineItem::from_catalog(item, quantity)),
        }
    }

    /// Change a line's quantity by `delta`, never going below one.
    ///
    /// Returns `false` if no line has this ID.
    pub fn update_quantity(&mut self, id: &CatalogItemId, delta: i64) -> bool {
        self.lines
            .iter_mut()
            .find(|line| &line.id == id)
            .map(|line| line.adjust(delta))
            .is_some()
    }

    /// Remove the line with this ID, returning it if it was present.
    pub fn remove_item(&mut self, id: &CatalogItemId) -> Option<CartLineItem> {
        let index = self.lines.iter().position(|line| &line.id == id)?;
        Some(self.lines.remove(index))
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Subtotal, shipping, total and bottle count.
    #[must_use]
    pub fn totals(&self) -> CartTotals {
        let subtotal: Price = self.lines.iter().map(CartLineItem::line_total).sum();
        let shipping_fee = if subtotal.is_zero() {
            Price::ZERO
        } else {
            SHIPPING_FEE
        };
        CartTotals {
            subtotal,
            shipping_fee,
            total: subtotal + shipping_fee,
            total_item_count: self
                .lines
                .iter()
                .map(|line| u64::from(line.quantity))
                .sum(),
        }
    }

    /// Append a decoded line, merging it into an existing line with the same ID.
    pub(crate) fn merge_line(&mut self, incoming: CartLineItem) {
        match self.lines.iter_mut().find(|line| line.id == incoming.id) {
            Some(line) => line.increase(incoming.quantity),
            None => self.lines.push(incoming),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::types::VineyardId;

    fn wine(id: &str, name: &str, year: i32, price: Price) -> CatalogItem {
        CatalogItem {
            id: CatalogItemId::new(id),
            name: name.to_string(),
            year,
            price,
            image_url: format!("https://img.example/{id}.jpg"),
            stock: 10,
            wine_type: "Rouge".to_string(),
            region: "Bordeaux".to_string(),
            rating: 4.5,
            description: String::new(),
            vineyard_id: VineyardId::new("1"),
        }
    }

    fn ids(cart: &Cart) -> Vec<&str> {
        cart.lines().iter().map(|l| l.id.as_str()).collect()
    }

    #[test]
    fn test_add_same_id_merges() {
        let margaux = wine("1", "Château Margaux Grand Cru", 2015, Price::from_units(120));
        let mut cart = Cart::new();
        cart.add_item(&margaux, 1);
        cart.add_item(&margaux, 1);

        assert_eq!(cart.len(), 1);
        assert_eq!(cart.lines()[0].quantity(), 2);
    }

    #[test]
    fn test_add_zero_quantity_still_adds_one() {
        let mut cart = Cart::new();
        cart.add_item(&wine("1", "A", 2015, Price::from_units(5)), 0);
        assert_eq!(cart.lines()[0].quantity(), 1);
    }

    #[test]
    fn test_add_keeps_captured_price() {
        let mut item = wine("1", "A", 2015, Price::from_units(120));
        let mut cart = Cart::new();
        cart.add_item(&item, 1);

        item.price = Price::from_units(999);
        item.name = "Renamed".to_string();
        cart.add_item(&item, 1);

        let line = &cart.lines()[0];
        assert_eq!(line.price, Price::from_units(120));
        assert_eq!(line.name, "A");
        assert_eq!(line.quantity(), 2);
    }

    #[test]
    fn test_decrement_floors_at_one() {
        let mut cart = Cart::new();
        cart.add_item(&wine("1", "A", 2015, Price::from_units(5)), 1);

        assert!(cart.update_quantity(&CatalogItemId::new("1"), -1));
        assert_eq!(cart.lines()[0].quantity(), 1);

        assert!(cart.update_quantity(&CatalogItemId::new("1"), -50));
        assert_eq!(cart.len(), 1);
        assert_eq!(cart.lines()[0].quantity(), 1);
    }

    #[test]
    fn test_update_unknown_id_is_noop() {
        let mut cart = Cart::new();
        cart.add_item(&wine("1", "A", 2015, Price::from_units(5)), 3);
        let before = cart.clone();

        assert!(!cart.update_quantity(&CatalogItemId::new("9"), 1));
        assert_eq!(cart, before);
    }

    #[test]
    fn test_update_saturates() {
        let mut cart = Cart::new();
        cart.add_item(&wine("1", "A", 2015, Price::from_units(5)), u32::MAX);
        cart.update_quantity(&CatalogItemId::new("1"), i64::MAX);
        assert_eq!(cart.lines()[0].quantity(), u32::MAX);
    }

    #[test]
    fn test_order_preserved_across_updates() {
        let mut cart = Cart::new();
        for id in ["A", "B", "C"] {
            cart.add_item(&wine(id, id, 2020, Price::from_units(1)), 1);
        }
        cart.update_quantity(&CatalogItemId::new("B"), 4);
        cart.add_item(&wine("A", "A", 2020, Price::from_units(1)), 1);

        assert_eq!(ids(&cart), ["A", "B", "C"]);
    }

    #[test]
    fn test_remove_unknown_id_leaves_cart_unchanged() {
        let mut cart = Cart::new();
        cart.add_item(&wine("A", "A", 2020, Price::from_units(1)), 2);
        cart.add_item(&wine("B", "B", 2020, Price::from_units(1)), 1);
        let before = cart.clone();

        assert!(cart.remove_item(&CatalogItemId::new("Z")).is_none());
        assert_eq!(cart, before);
    }

    #[test]
    fn test_remove_returns_line() {
        let mut cart = Cart::new();
        cart.add_item(&wine("A", "Alpha", 2020, Price::from_units(1)), 2);
        let removed = cart.remove_item(&CatalogItemId::new("A")).unwrap();
        assert_eq!(removed.name, "Alpha");
        assert!(cart.is_empty());
    }

    #[test]
    fn test_totals_with_shipping() {
        let mut cart = Cart::new();
        cart.add_item(&wine("A", "A", 2020, Price::from_units(10)), 2);
        cart.add_item(&wine("B", "B", 2020, Price::from_cents(2550)), 1);

        let totals = cart.totals();
        assert_eq!(totals.subtotal, Price::from_cents(4550));
        assert_eq!(totals.shipping_fee, Price::from_units(10));
        assert_eq!(totals.total, Price::from_cents(5550));
        assert_eq!(totals.total_item_count, 3);
    }

    #[test]
    fn test_empty_cart_totals_are_zero() {
        assert_eq!(Cart::new().totals(), CartTotals::EMPTY);
    }

    #[test]
    fn test_free_wine_does_not_trigger_shipping() {
        let mut cart = Cart::new();
        cart.add_item(&wine("A", "Sample", 2020, Price::ZERO), 1);
        let totals = cart.totals();
        assert_eq!(totals.shipping_fee, Price::ZERO);
        assert_eq!(totals.total_item_count, 1);
    }

    #[test]
    fn test_margaux_scenario() {
        let margaux = wine("1", "Château Margaux Grand Cru", 2015, Price::from_units(120));
        let mut cart = Cart::new();

        cart.add_item(&margaux, 1);
        assert_eq!(cart.totals().subtotal, Price::from_units(120));
        assert_eq!(cart.totals().total, Price::from_units(130));

        cart.add_item(&margaux, 1);
        assert_eq!(cart.lines()[0].quantity(), 2);
        assert_eq!(cart.totals().subtotal, Price::from_units(240));
        assert_eq!(cart.totals().total, Price::from_units(250));

        cart.remove_item(&CatalogItemId::new("1"));
        assert!(cart.is_empty());
        assert_eq!(cart.totals(), CartTotals::EMPTY);
    }
}
