//! Core types for Vinea.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod catalog;
pub mod email;
pub mod id;
pub mod price;
pub mod project;
pub mod role;
pub mod user;

pub use catalog::{CatalogItem, Vineyard};
pub use email::{Email, EmailError};
pub use id::*;
pub use price::{Price, PriceError};
pub use project::{Project, Reward};
pub use role::UserRole;
pub use user::AuthUser;
