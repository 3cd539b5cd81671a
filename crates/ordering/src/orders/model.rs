//! Order domain model.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use pronto_core::{MenuItemId, OrderId, OrderStatus, Price, UserId};

/// One order line, frozen at order-creation time.
///
/// `price_at_order_time` is a snapshot of the catalog price when the order
/// was placed; later catalog changes never affect it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderItem {
    pub item_id: MenuItemId,
    pub amount: u32,
    pub price_at_order_time: Price,
}

/// A persisted order.
///
/// Immutable once created: cost, discount, and items are fixed at creation;
/// only `status` advances, one step at a time, via [`OrderStatus::next`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub user_id: UserId,
    pub address: String,
    pub delivery_time: NaiveDateTime,
    /// Total cost before discount.
    pub cost: Price,
    /// Discount percentage, 0-100.
    pub discount_percent: u8,
    pub status: OrderStatus,
    pub items: Vec<OrderItem>,
    pub created_at: NaiveDateTime,
}
