//! Shared test support for Pronto integration tests.
//!
//! In-memory doubles for the ordering collaborators, mirroring what the
//! embedding application wires in production: a settable clock, a static
//! menu catalog, a user directory, and order repositories that record or
//! fail on demand.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;
use chrono::{Duration, NaiveDate, NaiveDateTime};

use pronto_core::{MenuItemId, UserId};
use pronto_ordering::catalog::{CatalogItem, MenuCatalog};
use pronto_ordering::clock::Clock;
use pronto_ordering::db::RepositoryError;
use pronto_ordering::orders::{Order, OrderRepository};
use pronto_ordering::users::UserDirectory;

/// Install a test tracing subscriber once per process.
///
/// Respects `RUST_LOG`; defaults to warnings only so test output stays
/// readable.
pub fn init_tracing() {
    use std::sync::Once;
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        let filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| "warn".into());
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .try_init();
    });
}

/// Clock pinned to a settable instant.
pub struct FakeClock {
    now: Mutex<NaiveDateTime>,
}

impl FakeClock {
    #[must_use]
    pub fn at(now: NaiveDateTime) -> Self {
        Self {
            now: Mutex::new(now),
        }
    }

    pub fn set(&self, now: NaiveDateTime) {
        *self.now.lock().unwrap_or_else(PoisonError::into_inner) = now;
    }

    pub fn advance(&self, by: Duration) {
        let mut now = self.now.lock().unwrap_or_else(PoisonError::into_inner);
        *now += by;
    }
}

impl Clock for FakeClock {
    fn now(&self) -> NaiveDateTime {
        *self.now.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Catalog over a fixed set of items.
#[derive(Default)]
pub struct InMemoryCatalog {
    items: HashMap<MenuItemId, CatalogItem>,
}

impl InMemoryCatalog {
    #[must_use]
    pub fn with(items: Vec<CatalogItem>) -> Self {
        Self {
            items: items.into_iter().map(|item| (item.id, item)).collect(),
        }
    }
}

#[async_trait]
impl MenuCatalog for InMemoryCatalog {
    async fn resolve(&self, id: MenuItemId) -> Result<Option<CatalogItem>, RepositoryError> {
        Ok(self.items.get(&id).cloned())
    }
}

/// User directory over a fixed set of birth dates.
#[derive(Default)]
pub struct InMemoryUsers {
    birth_dates: HashMap<UserId, NaiveDate>,
}

impl InMemoryUsers {
    #[must_use]
    pub fn with_birth_date(user_id: UserId, birth_date: NaiveDate) -> Self {
        Self {
            birth_dates: HashMap::from([(user_id, birth_date)]),
        }
    }
}

#[async_trait]
impl UserDirectory for InMemoryUsers {
    async fn birth_date(&self, id: UserId) -> Result<Option<NaiveDate>, RepositoryError> {
        Ok(self.birth_dates.get(&id).copied())
    }
}

/// Order repository that records every saved order.
#[derive(Default)]
pub struct RecordingOrderRepository {
    saved: Mutex<Vec<Order>>,
}

impl RecordingOrderRepository {
    /// All orders saved so far.
    #[must_use]
    pub fn saved(&self) -> Vec<Order> {
        self.saved
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[async_trait]
impl OrderRepository for RecordingOrderRepository {
    async fn save(&self, order: &Order) -> Result<(), RepositoryError> {
        self.saved
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(order.clone());
        Ok(())
    }
}

/// Order repository whose writes always fail.
#[derive(Default)]
pub struct FailingOrderRepository;

#[async_trait]
impl OrderRepository for FailingOrderRepository {
    async fn save(&self, _order: &Order) -> Result<(), RepositoryError> {
        Err(RepositoryError::Database(sqlx::Error::PoolClosed))
    }
}
