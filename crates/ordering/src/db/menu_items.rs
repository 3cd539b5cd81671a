//! Menu catalog backed by `PostgreSQL`.

use async_trait::async_trait;
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use pronto_core::{MenuItemId, Price};

use super::RepositoryError;
use crate::catalog::{CatalogItem, MenuCatalog};

/// [`MenuCatalog`] over the `menu_items` table.
pub struct PgMenuCatalog {
    pool: PgPool,
}

impl PgMenuCatalog {
    /// Create a new catalog over the given pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct MenuItemRow {
    id: Uuid,
    name: String,
    price: Decimal,
}

#[async_trait]
impl MenuCatalog for PgMenuCatalog {
    async fn resolve(&self, id: MenuItemId) -> Result<Option<CatalogItem>, RepositoryError> {
        let row: Option<MenuItemRow> =
            sqlx::query_as("SELECT id, name, price FROM menu_items WHERE id = $1")
                .bind(id.as_uuid())
                .fetch_optional(&self.pool)
                .await?;

        row.map(|r| {
            let price = Price::new(r.price).map_err(|e| {
                RepositoryError::DataCorruption(format!("invalid price in database: {e}"))
            })?;
            Ok(CatalogItem {
                id: MenuItemId::new(r.id),
                name: r.name,
                price,
            })
        })
        .transpose()
    }
}
