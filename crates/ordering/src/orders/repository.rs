//! Durable order storage seam.

use async_trait::async_trait;

use super::model::Order;
use crate::db::RepositoryError;

/// Persists orders. Durability and atomicity are the implementation's
/// responsibility; [`save`](OrderRepository::save) must write the order and
/// its items as one unit or not at all.
#[async_trait]
pub trait OrderRepository: Send + Sync {
    /// Persist a new order.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the write fails; in that case nothing
    /// of the order may remain visible.
    async fn save(&self, order: &Order) -> Result<(), RepositoryError>;
}
