//! Persisted cart slot codec.
//!
//! The slot holds a JSON array of line records:
//!
//! ```json
//! [{"id":"1","name":"Château Margaux Grand Cru","year":2015,"price":120,
//!   "imageUrl":"https://...","quantity":2}]
//! ```
//!
//! There is no version field. Unknown fields are ignored. A record missing a
//! required field, carrying the wrong type, a negative price or a quantity
//! below one is dropped on its own; only a slot whose top level is not an
//! array is rejected as a whole.

use serde::Deserialize;
use thiserror::Error;

use super::{Cart, CartLineItem};
use crate::types::{CatalogItemId, Price};

/// The slot contents could not be read as a list of records at all.
#[derive(Debug, Error)]
pub enum CartDecodeError {
    #[error("cart slot is not a JSON array: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Result of decoding a slot: the recovered cart plus how many records were
/// discarded as invalid.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DecodedCart {
    pub cart: Cart,
    pub discarded: usize,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredLineItem {
    id: CatalogItemId,
    name: String,
    year: i32,
    price: Price,
    image_url: String,
    quantity: u32,
}

impl StoredLineItem {
    fn into_line(self) -> Option<CartLineItem> {
        (self.quantity >= 1).then(|| CartLineItem {
            id: self.id,
            name: self.name,
            year: self.year,
            price: self.price,
            image_url: self.image_url,
            quantity: self.quantity,
        })
    }
}

/// Serialize a cart into the slot format.
///
/// # Errors
///
/// Returns the underlying `serde_json` error if serialization fails.
pub fn encode_cart(cart: &Cart) -> Result<String, serde_json::Error> {
    serde_json::to_string(cart)
}

/// Parse the slot contents, keeping every valid record in stored order.
///
/// Records that repeat an ID already seen are folded into the first one so
/// the one-line-per-ID rule holds after a load.
///
/// # Errors
///
/// Returns [`CartDecodeError::Malformed`] if the top level is not a JSON array.
pub fn decode_cart(raw: &str) -> Result<DecodedCart, CartDecodeError> {
    let records: Vec<serde_json::Value> = serde_json::from_str(raw)?;

    let mut decoded = DecodedCart::default();
    for record in records {
        match serde_json::from_value::<StoredLineItem>(record)
            .ok()
            .and_then(StoredLineItem::into_line)
        {
            Some(line) => decoded.cart.merge_line(line),
            None => decoded.discarded += 1,
        }
    }
    Ok(decoded)
}
