//! Background eviction of idle carts.
//!
//! The tick logic ([`CartsSweeper::sweep_once`]) is public and separate
//! from the scheduling loop ([`CartsSweeper::run`]), so both are testable
//! on their own. Request handlers never call the sweeper.

use std::sync::Arc;

use chrono::Duration;
use tokio::sync::watch;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info};

use super::store::CartStore;
use crate::config::CartsConfig;

/// Periodically evicts carts idle past the configured threshold.
pub struct CartsSweeper {
    store: Arc<CartStore>,
    config: CartsConfig,
}

impl CartsSweeper {
    /// Create a sweeper over the given store.
    #[must_use]
    pub const fn new(store: Arc<CartStore>, config: CartsConfig) -> Self {
        Self { store, config }
    }

    /// Run a single eviction pass; returns how many carts were evicted.
    ///
    /// Removal uses the snapshot taken at the start of the pass, so carts
    /// touched between the snapshot and the removal survive.
    pub fn sweep_once(&self) -> usize {
        let idle = self
            .store
            .idle_carts(Duration::minutes(self.config.idle_after_minutes));
        if idle.is_empty() {
            debug!("no idle carts");
            return 0;
        }
        let removed = self.store.remove_carts(&idle);
        info!(
            candidates = idle.len(),
            removed, "evicted idle carts"
        );
        removed
    }

    /// Sweep on a fixed interval until `shutdown` is signalled.
    ///
    /// Each tick is independently complete; shutdown interrupts the loop
    /// between ticks, never mid-tick. The first tick fires immediately.
    pub async fn run(self, mut shutdown: watch::Receiver<bool>) {
        let mut ticker =
            tokio::time::interval(std::time::Duration::from_secs(self.config.sweep_interval_secs));
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    self.sweep_once();
                }
                changed = shutdown.changed() => {
                    // Stop on signal or when the sender is gone
                    if changed.is_err() || *shutdown.borrow() {
                        info!("cart sweeper shutting down");
                        break;
                    }
                }
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::NaiveDate;
    use pronto_core::{MenuItemId, UserId};

    use super::*;
    use crate::clock::Clock;
    use crate::test_support::ManualClock;

    fn nine_am() -> chrono::NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 12, 17)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap()
    }

    fn config() -> CartsConfig {
        CartsConfig {
            idle_after_minutes: 10,
            sweep_interval_secs: 60,
        }
    }

    #[test]
    fn test_sweep_once_removes_only_idle_carts() {
        let clock = ManualClock::at(nine_am());
        let store = Arc::new(CartStore::new(Arc::clone(&clock) as Arc<dyn Clock>));
        let sweeper = CartsSweeper::new(Arc::clone(&store), config());

        let idle_user = UserId::generate();
        let active_user = UserId::generate();
        store.get_or_create(idle_user);
        clock.advance(Duration::minutes(30));
        store
            .add_item(active_user, MenuItemId::generate(), 1)
            .unwrap();

        assert_eq!(sweeper.sweep_once(), 1);
        assert_eq!(store.item_count(active_user), 1);
        assert_eq!(store.idle_carts(Duration::zero()).len(), 1);
    }

    #[test]
    fn test_sweep_once_with_nothing_idle_is_a_noop() {
        let clock = ManualClock::at(nine_am());
        let store = Arc::new(CartStore::new(Arc::clone(&clock) as Arc<dyn Clock>));
        let sweeper = CartsSweeper::new(Arc::clone(&store), config());

        store.get_or_create(UserId::generate());

        assert_eq!(sweeper.sweep_once(), 0);
        assert_eq!(store.idle_carts(Duration::zero()).len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_run_sweeps_on_interval_and_stops_on_shutdown() {
        let clock = ManualClock::at(nine_am());
        let store = Arc::new(CartStore::new(Arc::clone(&clock) as Arc<dyn Clock>));
        let sweeper = CartsSweeper::new(Arc::clone(&store), config());

        let user = UserId::generate();
        store.get_or_create(user);
        clock.advance(Duration::minutes(30));

        let (tx, rx) = watch::channel(false);
        let handle = tokio::spawn(sweeper.run(rx));

        // First tick fires immediately and evicts the idle cart
        tokio::time::sleep(std::time::Duration::from_millis(10)).await;
        assert!(store.idle_carts(Duration::zero()).is_empty());

        tx.send(true).unwrap();
        handle.await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn test_run_stops_when_sender_dropped() {
        let clock = ManualClock::at(nine_am());
        let store = Arc::new(CartStore::new(Arc::clone(&clock) as Arc<dyn Clock>));
        let sweeper = CartsSweeper::new(store, config());

        let (tx, rx) = watch::channel(false);
        let handle = tokio::spawn(sweeper.run(rx));
        tokio::time::sleep(std::time::Duration::from_millis(10)).await;

        drop(tx);
        handle.await.unwrap();
    }
}
