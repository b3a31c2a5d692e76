//! Vinea Storefront library.
//!
//! The wine cart, the catalog grids that feed it, the auth collaborator and
//! the HTTP surfaces (HTMX web drawer and mobile JSON API). Exposed as a
//! library so the CLI and the integration tests drive the same code.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod catalog;
pub mod config;
pub mod error;
pub mod middleware;
pub mod notice;
pub mod routes;
pub mod services;
pub mod state;
