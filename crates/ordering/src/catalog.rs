//! Menu catalog collaborator.
//!
//! The catalog is owned by the menu-management side of the application;
//! this crate only resolves item identifiers to their current listing.

use async_trait::async_trait;

use pronto_core::{MenuItemId, Price};

use crate::db::RepositoryError;

/// A menu item as currently listed in the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogItem {
    pub id: MenuItemId,
    pub name: String,
    pub price: Price,
}

/// Resolves menu item identifiers to their current name and price.
#[async_trait]
pub trait MenuCatalog: Send + Sync {
    /// Look up an item. `Ok(None)` means the item is not (or no longer)
    /// in the catalog.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the lookup itself fails.
    async fn resolve(&self, id: MenuItemId) -> Result<Option<CatalogItem>, RepositoryError>;
}
