//! Order-creation pipeline.
//!
//! [`OrdersService::create_order`] turns a user's cart into a persisted
//! order: snapshot the cart, freeze catalog prices, validate the delivery
//! time, price with discounts, persist, and only then clear the cart.

use std::sync::Arc;

use chrono::{Duration, NaiveDateTime};
use tracing::{info, instrument};

use pronto_core::{OrderId, OrderStatus, UserId};

use super::model::{Order, OrderItem};
use super::pricing::{self, DiscountPolicy, PricedLine};
use super::repository::OrderRepository;
use super::{DeliveryTimeError, OrderError};
use crate::carts::store::CartStore;
use crate::catalog::MenuCatalog;
use crate::clock::Clock;
use crate::config::OrderConfig;
use crate::users::UserDirectory;

/// Checkout request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateOrder {
    pub address: String,
    pub delivery_time: NaiveDateTime,
}

/// Orchestrates order creation over the cart store and collaborators.
pub struct OrdersService {
    store: Arc<CartStore>,
    catalog: Arc<dyn MenuCatalog>,
    users: Arc<dyn UserDirectory>,
    repository: Arc<dyn OrderRepository>,
    clock: Arc<dyn Clock>,
    config: OrderConfig,
    policy: DiscountPolicy,
}

impl OrdersService {
    /// Create a new orders service.
    #[must_use]
    pub fn new(
        store: Arc<CartStore>,
        catalog: Arc<dyn MenuCatalog>,
        users: Arc<dyn UserDirectory>,
        repository: Arc<dyn OrderRepository>,
        clock: Arc<dyn Clock>,
        config: OrderConfig,
        policy: DiscountPolicy,
    ) -> Self {
        Self {
            store,
            catalog,
            users,
            repository,
            clock,
            config,
            policy,
        }
    }

    /// Create an order from the user's cart.
    ///
    /// The cart is cleared only after the order write is confirmed; any
    /// failure leaves the cart untouched.
    ///
    /// # Errors
    ///
    /// - [`OrderError::EmptyCart`] - the cart has no items
    /// - [`OrderError::ItemNotFound`] - a cart item is no longer in the
    ///   catalog
    /// - [`OrderError::InvalidDeliveryTime`] - requested delivery time is
    ///   too soon or off the slot grid
    /// - [`OrderError::Repository`] - a collaborator lookup or the order
    ///   write failed
    #[instrument(skip(self, request), fields(user_id = %user_id))]
    pub async fn create_order(
        &self,
        user_id: UserId,
        request: CreateOrder,
    ) -> Result<Order, OrderError> {
        let cart = self.store.get_or_create(user_id);
        if cart.is_empty() {
            return Err(OrderError::EmptyCart);
        }

        let mut items = Vec::with_capacity(cart.items().len());
        for (&item_id, &amount) in cart.items() {
            let listed = self
                .catalog
                .resolve(item_id)
                .await?
                .ok_or(OrderError::ItemNotFound(item_id))?;
            items.push(OrderItem {
                item_id,
                amount,
                price_at_order_time: listed.price,
            });
        }
        items.sort_by_key(|item| item.item_id);

        let now = self.clock.now();
        self.validate_delivery_time(request.delivery_time, now)?;

        let birth_date = self.users.birth_date(user_id).await?;
        let lines: Vec<PricedLine> = items
            .iter()
            .map(|item| PricedLine {
                item_id: item.item_id,
                amount: item.amount,
                unit_price: item.price_at_order_time,
            })
            .collect();
        let quote = pricing::quote(&lines, birth_date, now, &self.policy);

        let order = Order {
            id: OrderId::generate(),
            user_id,
            address: request.address,
            delivery_time: request.delivery_time,
            cost: quote.cost,
            discount_percent: quote.discount_percent,
            status: OrderStatus::New,
            items,
            created_at: now,
        };

        self.repository.save(&order).await?;
        self.store.clear(user_id);

        info!(
            order_id = %order.id,
            cost = %order.cost,
            discount_percent = order.discount_percent,
            "order created"
        );
        Ok(order)
    }

    /// Requested delivery must be at least the minimum offset away and
    /// align to the slot grid anchored at the earliest allowed time.
    fn validate_delivery_time(
        &self,
        requested: NaiveDateTime,
        now: NaiveDateTime,
    ) -> Result<(), OrderError> {
        let earliest = now + Duration::minutes(self.config.min_delivery_minutes);
        if requested < earliest {
            return Err(OrderError::InvalidDeliveryTime(DeliveryTimeError::TooSoon {
                earliest,
            }));
        }
        let step_seconds = self.config.delivery_time_step_minutes * 60;
        if (requested - earliest).num_seconds() % step_seconds != 0 {
            return Err(OrderError::InvalidDeliveryTime(
                DeliveryTimeError::Misaligned {
                    step_minutes: self.config.delivery_time_step_minutes,
                },
            ));
        }
        Ok(())
    }
}
