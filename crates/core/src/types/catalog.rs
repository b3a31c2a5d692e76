//! Catalog records supplied by the marketplace data source.
//!
//! These are read-only from the cart's point of view. A cart line copies the
//! fields it needs at the moment an item is added and never looks back.

use serde::{Deserialize, Serialize};

use super::{CatalogItemId, Price, VineyardId};

/// A wine offered for sale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogItem {
    pub id: CatalogItemId,
    pub name: String,
    /// Vintage year.
    pub year: i32,
    pub price: Price,
    pub image_url: String,
    /// Bottles left in stock.
    pub stock: u32,
    /// Colour or style ("Rouge", "Blanc", "Champagne", ...).
    #[serde(rename = "type")]
    pub wine_type: String,
    pub region: String,
    pub rating: f32,
    pub description: String,
    pub vineyard_id: VineyardId,
}

/// A producing estate and the grid of wines it shows on its detail page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vineyard {
    pub id: VineyardId,
    pub name: String,
    pub region: String,
    pub description: String,
    pub wine_count: u32,
}
