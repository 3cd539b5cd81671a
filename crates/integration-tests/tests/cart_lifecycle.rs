//! Integration tests for cart lifetime: store semantics under the
//! sweeper's read-then-remove cycle and under concurrent mutation.

use std::sync::Arc;

use chrono::{Duration, NaiveDate, NaiveDateTime};

use pronto_core::{MenuItemId, UserId};
use pronto_integration_tests::{FakeClock, init_tracing};
use pronto_ordering::carts::{CartStore, CartsSweeper};
use pronto_ordering::clock::Clock;
use pronto_ordering::config::CartsConfig;

fn nine_am() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 12, 17)
        .expect("valid date")
        .and_hms_opt(9, 0, 0)
        .expect("valid time")
}

fn carts_config() -> CartsConfig {
    CartsConfig {
        idle_after_minutes: 10,
        sweep_interval_secs: 60,
    }
}

#[test]
fn sweeper_evicts_idle_cart_and_spares_active_one() {
    init_tracing();
    let clock = Arc::new(FakeClock::at(nine_am()));
    let store = Arc::new(CartStore::new(Arc::clone(&clock) as Arc<dyn Clock>));
    let sweeper = CartsSweeper::new(Arc::clone(&store), carts_config());

    let idle_user = UserId::generate();
    let active_user = UserId::generate();
    store
        .add_item(idle_user, MenuItemId::generate(), 1)
        .expect("add");
    clock.advance(Duration::minutes(30));
    store
        .add_item(active_user, MenuItemId::generate(), 2)
        .expect("add");

    assert_eq!(sweeper.sweep_once(), 1);

    assert_eq!(store.item_count(idle_user), 0);
    assert_eq!(store.item_count(active_user), 2);
}

#[test]
fn cart_exactly_at_threshold_is_evicted() {
    init_tracing();
    let clock = Arc::new(FakeClock::at(nine_am()));
    let store = Arc::new(CartStore::new(Arc::clone(&clock) as Arc<dyn Clock>));
    let sweeper = CartsSweeper::new(Arc::clone(&store), carts_config());

    store.get_or_create(UserId::generate());
    clock.advance(Duration::minutes(10));

    assert_eq!(sweeper.sweep_once(), 1);
}

#[test]
fn cart_touched_after_sweep_snapshot_survives_with_the_touch_applied() {
    init_tracing();
    let clock = Arc::new(FakeClock::at(nine_am()));
    let store = Arc::new(CartStore::new(Arc::clone(&clock) as Arc<dyn Clock>));

    let user = UserId::generate();
    let item = MenuItemId::generate();
    store.get_or_create(user);
    clock.advance(Duration::minutes(30));

    // The sweep takes its snapshot, then a request touches the cart before
    // the removal runs.
    let snapshot = store.idle_carts(Duration::minutes(10));
    assert_eq!(snapshot.len(), 1);
    store.add_item(user, item, 1).expect("add");

    assert_eq!(store.remove_carts(&snapshot), 0);
    assert_eq!(store.get_or_create(user).amount_of(item), 1);
}

#[test]
fn cleared_cart_keeps_its_identity_until_evicted() {
    init_tracing();
    let clock = Arc::new(FakeClock::at(nine_am()));
    let store = Arc::new(CartStore::new(Arc::clone(&clock) as Arc<dyn Clock>));

    let user = UserId::generate();
    store.add_item(user, MenuItemId::generate(), 2).expect("add");
    let before = store.get_or_create(user);

    clock.advance(Duration::minutes(1));
    store.clear(user);
    let after_clear = store.get_or_create(user);
    assert!(after_clear.is_empty());
    assert_eq!(after_clear.created_at(), before.created_at());

    // Eviction is the only thing that replaces the cart
    clock.advance(Duration::minutes(30));
    let sweeper = CartsSweeper::new(Arc::clone(&store), carts_config());
    assert_eq!(sweeper.sweep_once(), 1);
    clock.advance(Duration::minutes(1));
    let recreated = store.get_or_create(user);
    assert!(recreated.created_at() > before.created_at());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_adds_from_many_tasks_are_all_applied() {
    init_tracing();
    let clock = Arc::new(FakeClock::at(nine_am()));
    let store = Arc::new(CartStore::new(clock as Arc<dyn Clock>));

    let user = UserId::generate();
    let item = MenuItemId::generate();

    let tasks: Vec<_> = (0..16)
        .map(|_| {
            let store = Arc::clone(&store);
            tokio::spawn(async move {
                for _ in 0..50 {
                    store.add_item(user, item, 1).expect("add");
                }
            })
        })
        .collect();
    for task in tasks {
        task.await.expect("task");
    }

    assert_eq!(store.item_count(user), 800);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn sweeping_concurrently_with_adds_never_loses_an_update() {
    init_tracing();
    let clock = Arc::new(FakeClock::at(nine_am()));
    let store = Arc::new(CartStore::new(Arc::clone(&clock) as Arc<dyn Clock>));
    let sweeper = Arc::new(CartsSweeper::new(
        Arc::clone(&store),
        CartsConfig {
            idle_after_minutes: 1,
            sweep_interval_secs: 60,
        },
    ));

    let user = UserId::generate();
    let item = MenuItemId::generate();

    // The cart starts out idle; the clock then stands still, so the first
    // add makes it permanently fresh. Sweeps may race the first add with a
    // stale snapshot, but once touched the cart can never be evicted, so
    // every single add must survive.
    store.get_or_create(user);
    clock.advance(Duration::minutes(30));

    let writer = {
        let store = Arc::clone(&store);
        tokio::spawn(async move {
            for _ in 0..200 {
                store.add_item(user, item, 1).expect("add");
                tokio::task::yield_now().await;
            }
        })
    };
    let evictor = {
        let sweeper = Arc::clone(&sweeper);
        tokio::spawn(async move {
            for _ in 0..200 {
                sweeper.sweep_once();
                tokio::task::yield_now().await;
            }
        })
    };

    writer.await.expect("writer");
    evictor.await.expect("evictor");

    assert_eq!(store.item_count(user), 200);
}
