//! Services for the storefront.
//!
//! # Services
//!
//! - `auth` - Sign-up, sign-in and current-user lookup against the hosted
//!   auth backend, with an in-memory stand-in for development and tests

pub mod auth;
