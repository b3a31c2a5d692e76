//! Subcommand implementations.
//!
//! Each command returns the text to print so it can be tested without a
//! terminal.

pub mod cart;
pub mod catalog;

use thiserror::Error;

use vinea_storefront::cart::CheckoutFailure;
use vinea_storefront::config::ConfigError;

/// Errors that end a command with a non-zero exit code.
#[derive(Debug, Error)]
pub enum CliError {
    /// Environment configuration is invalid.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// No wine with this ID in the grid the add came from.
    #[error("Unknown wine: {0}")]
    UnknownWine(String),

    /// No vineyard with this ID.
    #[error("Unknown vineyard: {0}")]
    UnknownVineyard(String),

    /// The order was not placed.
    #[error("Checkout failed: {0}")]
    Checkout(CheckoutFailure),
}
