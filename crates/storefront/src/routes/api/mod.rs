//! JSON API for the mobile app.

pub mod cart;
