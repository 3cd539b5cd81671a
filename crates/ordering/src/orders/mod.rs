//! Order creation: models, pricing, persistence seam, and the pipeline.

pub mod model;
pub mod pricing;
pub mod repository;
pub mod service;

pub use model::{Order, OrderItem};
pub use repository::OrderRepository;
pub use service::{CreateOrder, OrdersService};

use chrono::NaiveDateTime;
use thiserror::Error;

use pronto_core::MenuItemId;

use crate::db::RepositoryError;

/// Why a requested delivery time was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DeliveryTimeError {
    /// Requested time is earlier than the minimum delivery offset allows.
    #[error("delivery must be at or after {earliest}")]
    TooSoon { earliest: NaiveDateTime },

    /// Requested time does not align to the delivery slot granularity.
    #[error("delivery time must be a multiple of {step_minutes} minutes past the earliest slot")]
    Misaligned { step_minutes: i64 },
}

/// Checkout failures, surfaced to the caller so it can report which
/// condition failed.
#[derive(Debug, Error)]
pub enum OrderError {
    /// Checkout with no items in the cart.
    #[error("cart is empty")]
    EmptyCart,

    /// The cart references an item no longer in the catalog.
    #[error("menu item not found: {0}")]
    ItemNotFound(MenuItemId),

    /// Requested delivery time is too soon or misaligned.
    #[error("invalid delivery time: {0}")]
    InvalidDeliveryTime(DeliveryTimeError),

    /// A collaborator lookup or the order write failed. The cart is left
    /// untouched.
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
