//! GC Sweep Task
//!
//! Background task that periodically reclaims expired cache items.

use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::cache::Store;

/// Runs `store.gc()` once per `interval` until `cancel` fires.
///
/// The first pass happens one full interval after the call. A zero interval
/// returns immediately; expired items then stay in memory until someone
/// calls `gc` by hand.
pub async fn run_gc_sweep(store: Store, cancel: CancellationToken, interval: Duration) {
    if interval.is_zero() {
        debug!("GC sweep not started: interval is zero");
        return;
    }

    info!("Starting GC sweep with interval of {:?}", interval);

    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    // The first tick completes immediately
    ticker.tick().await;

    loop {
        tokio::select! {
            biased;

            () = cancel.cancelled() => break,
            _ = ticker.tick() => {
                let removed = store.gc();
                if removed > 0 {
                    info!("GC sweep: removed {} expired items", removed);
                } else {
                    debug!("GC sweep: no expired items found");
                }
            }
        }
    }

    info!("GC sweep stopped");
}

/// Spawns `run_gc_sweep` on the current Tokio runtime.
///
/// Returns None, spawning nothing, when `interval` is zero.
///
/// # Example
/// ```ignore
/// let store = Store::new();
/// let cancel = CancellationToken::new();
/// let handle = spawn_gc_sweep(store.clone(), cancel.clone(), Duration::from_secs(60));
/// // Later, during shutdown:
/// cancel.cancel();
/// ```
pub fn spawn_gc_sweep(
    store: Store,
    cancel: CancellationToken,
    interval: Duration,
) -> Option<JoinHandle<()>> {
    if interval.is_zero() {
        return None;
    }
    Some(tokio::spawn(run_gc_sweep(store, cancel, interval)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::SetOptions;

    #[tokio::test]
    async fn test_sweep_removes_expired_items() {
        let store = Store::new();
        store.set(
            "expire_soon",
            "value",
            Some(SetOptions::expiring(Duration::from_millis(10))),
        );

        let cancel = CancellationToken::new();
        let handle = spawn_gc_sweep(store.clone(), cancel.clone(), Duration::from_millis(20))
            .expect("non-zero interval spawns");

        tokio::time::sleep(Duration::from_millis(150)).await;

        assert!(store.is_empty(), "Expired item should have been reclaimed");
        assert!(store.get_stale::<&str>("expire_soon").is_err());

        cancel.cancel();
        handle.await.unwrap();
    }

    #[tokio::test]
    async fn test_sweep_preserves_valid_items() {
        let store = Store::new();
        store.set(
            "long_lived",
            "value",
            Some(SetOptions::expiring(Duration::from_secs(3600))),
        );
        store.set("forever", "value", None);

        let cancel = CancellationToken::new();
        let handle = spawn_gc_sweep(store.clone(), cancel.clone(), Duration::from_millis(10))
            .expect("non-zero interval spawns");

        tokio::time::sleep(Duration::from_millis(60)).await;

        assert_eq!(store.len(), 2);
        assert_eq!(*store.get::<&str>("long_lived").unwrap(), "value");

        cancel.cancel();
        handle.await.unwrap();
    }

    #[tokio::test]
    async fn test_sweep_stops_on_cancel() {
        let store = Store::new();
        let cancel = CancellationToken::new();
        let handle = spawn_gc_sweep(store, cancel.clone(), Duration::from_secs(3600))
            .expect("non-zero interval spawns");

        cancel.cancel();

        tokio::time::timeout(Duration::from_secs(1), handle)
            .await
            .expect("sweep should stop promptly after cancellation")
            .unwrap();
    }

    #[tokio::test]
    async fn test_zero_interval_is_noop() {
        let store = Store::new();
        store.set("k", 1u8, Some(SetOptions::expiring(Duration::from_millis(1))));

        assert!(spawn_gc_sweep(store.clone(), CancellationToken::new(), Duration::ZERO).is_none());

        // Returns without waiting for cancellation
        tokio::time::timeout(
            Duration::from_secs(1),
            store.run_gc_sweep(CancellationToken::new(), Duration::ZERO),
        )
        .await
        .expect("zero interval should return immediately");

        tokio::time::sleep(Duration::from_millis(5)).await;
        assert_eq!(store.len(), 1, "Nothing reclaims without a sweep");
    }
}
