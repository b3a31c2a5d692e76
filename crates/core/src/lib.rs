//! Vinea Core - Shared domain types and cart logic.
//!
//! This crate provides the types used by every Vinea front end:
//! - `storefront` - Web and mobile HTTP surfaces for the wine marketplace
//! - `cli` - Device-side command line access to the same cart
//!
//! # Architecture
//!
//! The core crate contains only types and pure state transitions - no I/O,
//! no storage, no HTTP. Persistence of the cart lives in the storefront crate
//! behind an injectable storage trait.
//!
//! # Modules
//!
//! - [`types`] - Newtype IDs, prices, emails, roles and catalog records
//! - [`cart`] - Cart line items, totals and the persisted slot codec

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod types;

pub use cart::{Cart, CartLineItem, CartTotals, SHIPPING_FEE};
pub use types::*;
