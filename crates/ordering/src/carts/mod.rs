//! Carts: in-memory store, catalog-aware operations, idle eviction.
//!
//! [`CartStore`] owns every live cart and is the only shared mutable state
//! in this crate. [`CartsService`] layers catalog lookups on top of it for
//! the cart endpoints; [`CartsSweeper`] evicts carts idle past the
//! configured threshold.

pub mod service;
pub mod store;
pub mod sweeper;

pub use service::{CartItemView, CartView, CartsService};
pub use store::{Cart, CartStore};
pub use sweeper::CartsSweeper;

use pronto_core::MenuItemId;
use thiserror::Error;

use crate::db::RepositoryError;

/// Cart operation failures.
#[derive(Debug, Error)]
pub enum CartError {
    /// Item amount must be positive.
    #[error("item amount must be positive (got {amount})")]
    InvalidAmount { amount: u32 },

    /// The referenced item is not in the menu catalog.
    #[error("menu item not found: {0}")]
    ItemNotFound(MenuItemId),

    /// Catalog lookup failed.
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
