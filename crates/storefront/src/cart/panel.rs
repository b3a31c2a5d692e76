//! Cart panel view model.
//!
//! The panel owns no cart state. It is rebuilt from a freshly loaded
//! [`Cart`] every time it is shown, as HTML for the web drawer or JSON for the
//! mobile app.

use serde::Serialize;

use vinea_core::{Cart, CartLineItem, CartTotals};

use crate::notice::Locale;

/// One row in the panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PanelLine {
    pub id: String,
    pub name: String,
    pub year: i32,
    pub image_url: String,
    pub quantity: u32,
    pub unit_price: String,
    pub line_price: String,
    /// Decrement is a no-op at quantity one; the control is shown disabled.
    pub can_decrement: bool,
}

impl From<&CartLineItem> for PanelLine {
    fn from(line: &CartLineItem) -> Self {
        Self {
            id: line.id.to_string(),
            name: line.name.clone(),
            year: line.year,
            image_url: line.image_url.clone(),
            quantity: line.quantity(),
            unit_price: line.price.to_string(),
            line_price: line.line_total().to_string(),
            can_decrement: line.quantity() > 1,
        }
    }
}

/// Everything the cart drawer renders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartPanel {
    pub title: &'static str,
    pub description: String,
    pub lines: Vec<PanelLine>,
    pub item_count: u64,
    pub subtotal: String,
    pub shipping_fee: String,
    pub total: String,
    pub totals: CartTotals,
    pub is_empty: bool,
    pub checkout_enabled: bool,
    pub labels: PanelLabels,
}

/// Static copy for the panel in the active locale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PanelLabels {
    pub clear: &'static str,
    pub subtotal: &'static str,
    pub shipping: &'static str,
    pub total: &'static str,
    pub checkout: &'static str,
    pub continue_shopping: &'static str,
}

impl PanelLabels {
    const fn for_locale(locale: Locale) -> Self {
        match locale {
            Locale::Fr => Self {
                clear: "Vider le panier",
                subtotal: "Sous-total",
                shipping: "Frais de livraison",
                total: "Total",
                checkout: "Passer la commande",
                continue_shopping: "Continuer vos achats",
            },
            Locale::En => Self {
                clear: "Clear cart",
                subtotal: "Subtotal",
                shipping: "Shipping",
                total: "Total",
                checkout: "Place order",
                continue_shopping: "Continue shopping",
            },
        }
    }
}

impl CartPanel {
    /// Build the panel for `cart`.
    #[must_use]
    pub fn new(cart: &Cart, locale: Locale) -> Self {
        let totals = cart.totals();
        let is_empty = cart.is_empty();
        Self {
            title: match locale {
                Locale::Fr => "Votre Panier",
                Locale::En => "Your Cart",
            },
            description: describe(totals.total_item_count, locale),
            lines: cart.lines().iter().map(PanelLine::from).collect(),
            item_count: totals.total_item_count,
            subtotal: totals.subtotal.to_string(),
            shipping_fee: totals.shipping_fee.to_string(),
            total: totals.total.to_string(),
            totals,
            is_empty,
            checkout_enabled: !is_empty,
            labels: PanelLabels::for_locale(locale),
        }
    }
}

fn describe(count: u64, locale: Locale) -> String {
    match (count, locale) {
        (0, Locale::Fr) => "Votre panier est vide".to_string(),
        (0, Locale::En) => "Your cart is empty".to_string(),
        (1, Locale::Fr) => "1 article dans votre panier".to_string(),
        (1, Locale::En) => "1 item in your cart".to_string(),
        (n, Locale::Fr) => format!("{n} articles dans votre panier"),
        (n, Locale::En) => format!("{n} items in your cart"),
    }
}
