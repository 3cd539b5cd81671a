//! Order persistence backed by `PostgreSQL`.

use async_trait::async_trait;
use sqlx::PgPool;

use super::RepositoryError;
use crate::orders::model::Order;
use crate::orders::repository::OrderRepository;

/// [`OrderRepository`] over the `orders` and `order_items` tables.
///
/// The order header and its items are written in one transaction; a failed
/// write leaves nothing behind.
pub struct PgOrderRepository {
    pool: PgPool,
}

impl PgOrderRepository {
    /// Create a new repository over the given pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl OrderRepository for PgOrderRepository {
    async fn save(&self, order: &Order) -> Result<(), RepositoryError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            "INSERT INTO orders \
                 (id, user_id, address, delivery_time, cost, discount_percent, status, created_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)",
        )
        .bind(order.id.as_uuid())
        .bind(order.user_id.as_uuid())
        .bind(&order.address)
        .bind(order.delivery_time)
        .bind(order.cost.amount())
        .bind(i16::from(order.discount_percent))
        .bind(order.status.to_string())
        .bind(order.created_at)
        .execute(&mut *tx)
        .await?;

        for item in &order.items {
            sqlx::query(
                "INSERT INTO order_items (order_id, item_id, amount, price_at_order_time) \
                 VALUES ($1, $2, $3, $4)",
            )
            .bind(order.id.as_uuid())
            .bind(item.item_id.as_uuid())
            .bind(i64::from(item.amount))
            .bind(item.price_at_order_time.amount())
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(())
    }
}
