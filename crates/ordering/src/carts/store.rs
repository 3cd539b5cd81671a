//! Concurrency-safe home for all live carts.
//!
//! One mutable cart per user, created lazily on first access. All access
//! goes through [`CartStore`]; callers receive value snapshots, never
//! references into the map, so no caller can mutate a cart behind the
//! store's back.
//!
//! # Locking
//!
//! A single `RwLock` over the cart table with short critical sections.
//! No operation performs I/O or blocks while holding the lock, and every
//! mutation updates the cart's items, `last_updated`, and `version`
//! together, so readers never observe a cart mid-mutation.
//!
//! # Versions and eviction
//!
//! Every cart carries a `version` stamp drawn from a store-wide monotonic
//! counter, refreshed on creation and on every mutation.
//! [`CartStore::remove_carts`] only removes a cart whose current version
//! still matches the snapshot taken by the sweep, so a cart that was
//! touched or re-created between the sweep's read and its removal
//! survives.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::{Duration, NaiveDateTime};

use pronto_core::{MenuItemId, UserId};

use super::CartError;
use crate::clock::Clock;

/// Snapshot of one user's cart.
///
/// Amounts are always at least 1; an item whose amount would drop to 0 is
/// removed entirely.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cart {
    user_id: UserId,
    items: HashMap<MenuItemId, u32>,
    last_updated: NaiveDateTime,
    created_at: NaiveDateTime,
    version: u64,
}

impl Cart {
    fn new(user_id: UserId, now: NaiveDateTime, version: u64) -> Self {
        Self {
            user_id,
            items: HashMap::new(),
            last_updated: now,
            created_at: now,
            version,
        }
    }

    fn touch(&mut self, now: NaiveDateTime, version: u64) {
        self.last_updated = now;
        self.version = version;
    }

    /// Owner of this cart.
    #[must_use]
    pub const fn user_id(&self) -> UserId {
        self.user_id
    }

    /// Item amounts keyed by menu item.
    #[must_use]
    pub const fn items(&self) -> &HashMap<MenuItemId, u32> {
        &self.items
    }

    /// Amount of a single item; 0 when the item is not in the cart.
    #[must_use]
    pub fn amount_of(&self, item_id: MenuItemId) -> u32 {
        self.items.get(&item_id).copied().unwrap_or(0)
    }

    /// Sum of all item amounts.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.items.values().sum()
    }

    /// Whether the cart holds no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Time of the most recent mutation (or creation).
    #[must_use]
    pub const fn last_updated(&self) -> NaiveDateTime {
        self.last_updated
    }

    /// Time the cart was created. Survives [`CartStore::clear`]; reset only
    /// when a cart is evicted and later re-created.
    #[must_use]
    pub const fn created_at(&self) -> NaiveDateTime {
        self.created_at
    }

    /// Mutation stamp used by [`CartStore::remove_carts`].
    #[must_use]
    pub const fn version(&self) -> u64 {
        self.version
    }
}

/// Thread-safe store mapping each user to their cart.
pub struct CartStore {
    clock: Arc<dyn Clock>,
    next_version: AtomicU64,
    carts: RwLock<HashMap<UserId, Cart>>,
}

impl CartStore {
    /// Create an empty store.
    #[must_use]
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            clock,
            next_version: AtomicU64::new(0),
            carts: RwLock::new(HashMap::new()),
        }
    }

    fn stamp(&self) -> u64 {
        self.next_version.fetch_add(1, Ordering::Relaxed)
    }

    fn read(&self) -> RwLockReadGuard<'_, HashMap<UserId, Cart>> {
        self.carts.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<UserId, Cart>> {
        self.carts.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Return the user's cart, creating an empty one on first access.
    pub fn get_or_create(&self, user_id: UserId) -> Cart {
        let now = self.clock.now();
        let stamp = self.stamp();
        self.write()
            .entry(user_id)
            .or_insert_with(|| Cart::new(user_id, now, stamp))
            .clone()
    }

    /// Add `amount` units of an item to the user's cart.
    ///
    /// An existing entry is incremented; `last_updated` refreshes on every
    /// call, whether or not the entry is new.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::InvalidAmount`] when `amount` is 0.
    pub fn add_item(
        &self,
        user_id: UserId,
        item_id: MenuItemId,
        amount: u32,
    ) -> Result<(), CartError> {
        if amount == 0 {
            return Err(CartError::InvalidAmount { amount });
        }
        let now = self.clock.now();
        let stamp = self.stamp();
        let mut carts = self.write();
        let cart = carts
            .entry(user_id)
            .or_insert_with(|| Cart::new(user_id, now, stamp));
        *cart.items.entry(item_id).or_insert(0) += amount;
        cart.touch(now, stamp);
        Ok(())
    }

    /// Remove an item from the user's cart. No-op when the item is absent;
    /// still counts as a cart mutation.
    pub fn remove_item(&self, user_id: UserId, item_id: MenuItemId) {
        let now = self.clock.now();
        let stamp = self.stamp();
        let mut carts = self.write();
        let cart = carts
            .entry(user_id)
            .or_insert_with(|| Cart::new(user_id, now, stamp));
        cart.items.remove(&item_id);
        cart.touch(now, stamp);
    }

    /// Empty the user's cart while keeping the cart itself alive.
    pub fn clear(&self, user_id: UserId) {
        let now = self.clock.now();
        let stamp = self.stamp();
        let mut carts = self.write();
        let cart = carts
            .entry(user_id)
            .or_insert_with(|| Cart::new(user_id, now, stamp));
        cart.items.clear();
        cart.touch(now, stamp);
    }

    /// Sum of all item amounts in the user's cart; 0 for a missing cart.
    /// Does not create a cart.
    #[must_use]
    pub fn item_count(&self, user_id: UserId) -> u32 {
        self.read().get(&user_id).map_or(0, Cart::item_count)
    }

    /// Snapshots of every cart idle for at least `idle_after`.
    ///
    /// The boundary is inclusive: a cart whose `last_updated` is exactly
    /// `now - idle_after` is idle.
    #[must_use]
    pub fn idle_carts(&self, idle_after: Duration) -> Vec<Cart> {
        let cutoff = self.clock.now() - idle_after;
        self.read()
            .values()
            .filter(|cart| cart.last_updated <= cutoff)
            .cloned()
            .collect()
    }

    /// Remove the given cart snapshots from the store; returns how many
    /// were removed.
    ///
    /// A cart is only removed if its current version still matches the
    /// snapshot. A cart mutated or re-created since the snapshot was taken
    /// is left alone.
    pub fn remove_carts(&self, carts: &[Cart]) -> usize {
        let mut table = self.write();
        let mut removed = 0;
        for snapshot in carts {
            let matches = table
                .get(&snapshot.user_id)
                .is_some_and(|current| current.version == snapshot.version);
            if matches {
                table.remove(&snapshot.user_id);
                removed += 1;
            }
        }
        removed
    }
}
