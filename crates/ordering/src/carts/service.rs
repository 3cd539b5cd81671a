//! Catalog-aware cart operations.
//!
//! [`CartsService`] sits between the cart endpoints and the raw
//! [`CartStore`]: additions are validated against the menu catalog, and
//! cart contents are resolved into a display model with current names and
//! prices.

use std::sync::Arc;

use tracing::{instrument, warn};

use pronto_core::{MenuItemId, Price, UserId};

use super::CartError;
use super::store::CartStore;
use crate::catalog::MenuCatalog;

/// One cart line resolved for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartItemView {
    pub id: MenuItemId,
    pub name: String,
    pub amount: u32,
    pub unit_price: Price,
    pub line_total: Price,
}

/// Cart contents with catalog data resolved.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CartView {
    pub items: Vec<CartItemView>,
    pub subtotal: Price,
    pub item_count: u32,
}

/// Cart operations offered to the cart endpoints.
pub struct CartsService {
    store: Arc<CartStore>,
    catalog: Arc<dyn MenuCatalog>,
}

impl CartsService {
    /// Create a new carts service.
    #[must_use]
    pub fn new(store: Arc<CartStore>, catalog: Arc<dyn MenuCatalog>) -> Self {
        Self { store, catalog }
    }

    /// Add an item to the user's cart after checking it is on the menu.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::ItemNotFound`] for an item missing from the
    /// catalog, [`CartError::InvalidAmount`] for a zero amount, and
    /// [`CartError::Repository`] if the catalog lookup fails.
    #[instrument(skip(self), fields(user_id = %user_id, item_id = %item_id))]
    pub async fn add_item(
        &self,
        user_id: UserId,
        item_id: MenuItemId,
        amount: u32,
    ) -> Result<(), CartError> {
        if self.catalog.resolve(item_id).await?.is_none() {
            return Err(CartError::ItemNotFound(item_id));
        }
        self.store.add_item(user_id, item_id, amount)
    }

    /// Remove an item from the user's cart. No-op when absent.
    pub fn remove_item(&self, user_id: UserId, item_id: MenuItemId) {
        self.store.remove_item(user_id, item_id);
    }

    /// Empty the user's cart.
    pub fn clear(&self, user_id: UserId) {
        self.store.clear(user_id);
    }

    /// Total number of items in the user's cart (badge count).
    #[must_use]
    pub fn item_count(&self, user_id: UserId) -> u32 {
        self.store.item_count(user_id)
    }

    /// The user's cart resolved for display.
    ///
    /// Items no longer on the menu are omitted from the view; checkout is
    /// the authority and still rejects them.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::Repository`] if a catalog lookup fails.
    #[instrument(skip(self), fields(user_id = %user_id))]
    pub async fn cart_view(&self, user_id: UserId) -> Result<CartView, CartError> {
        let cart = self.store.get_or_create(user_id);

        let mut items = Vec::with_capacity(cart.items().len());
        for (&item_id, &amount) in cart.items() {
            match self.catalog.resolve(item_id).await? {
                Some(listed) => items.push(CartItemView {
                    id: item_id,
                    name: listed.name,
                    amount,
                    unit_price: listed.price,
                    line_total: listed.price.line_total(amount),
                }),
                None => {
                    warn!(%item_id, "cart references an item missing from the catalog");
                }
            }
        }
        items.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));

        let subtotal = items.iter().map(|item| item.line_total).sum();
        let item_count = items.iter().map(|item| item.amount).sum();
        Ok(CartView {
            items,
            subtotal,
            item_count,
        })
    }
}
