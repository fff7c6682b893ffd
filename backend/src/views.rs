//! View invalidation events
//!
//! After a successful mutation each service marks the read views it
//! affects as stale, synchronously, before reporting success; a read that
//! follows the write is therefore guaranteed to observe it. Consumers
//! (page caches, live dashboards) subscribe to the broadcast channel or
//! poll the stale set, and read handlers clear the mark once a view has
//! been re-served.

use std::collections::HashSet;
use std::sync::{Arc, Mutex};
use tokio::sync::broadcast;

/// A named read view that a mutation can make stale
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StaleView {
    Suppliers,
    Ingredients,
    Orders,
    Order(i64),
    OrderForm,
    Templates,
    Dashboard,
}

/// Shared registry of stale views with change notification
#[derive(Clone)]
pub struct ViewCache {
    stale: Arc<Mutex<HashSet<StaleView>>>,
    events: broadcast::Sender<StaleView>,
}

impl ViewCache {
    pub fn new() -> Self {
        let (events, _) = broadcast::channel(64);
        Self {
            stale: Arc::new(Mutex::new(HashSet::new())),
            events,
        }
    }

    /// Mark views stale and publish one event per view. Lagging or absent
    /// subscribers never block the writing service.
    pub fn invalidate(&self, views: &[StaleView]) {
        let mut stale = self.stale.lock().unwrap_or_else(|e| e.into_inner());
        for &view in views {
            stale.insert(view);
            let _ = self.events.send(view);
        }
    }

    /// Clear the stale mark after a view has been re-served
    pub fn refresh(&self, view: StaleView) {
        self.stale
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .remove(&view);
    }

    pub fn is_stale(&self, view: StaleView) -> bool {
        self.stale
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .contains(&view)
    }

    pub fn subscribe(&self) -> broadcast::Receiver<StaleView> {
        self.events.subscribe()
    }
}

impl Default for ViewCache {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalidate_marks_views_stale() {
        let cache = ViewCache::new();
        assert!(!cache.is_stale(StaleView::Suppliers));

        cache.invalidate(&[StaleView::Suppliers, StaleView::Ingredients]);
        assert!(cache.is_stale(StaleView::Suppliers));
        assert!(cache.is_stale(StaleView::Ingredients));
        assert!(!cache.is_stale(StaleView::Orders));
    }

    #[test]
    fn refresh_clears_the_mark() {
        let cache = ViewCache::new();
        cache.invalidate(&[StaleView::Orders, StaleView::Order(3)]);
        cache.refresh(StaleView::Orders);

        assert!(!cache.is_stale(StaleView::Orders));
        assert!(cache.is_stale(StaleView::Order(3)));
    }

    #[test]
    fn subscribers_receive_invalidation_events() {
        let cache = ViewCache::new();
        let mut rx = cache.subscribe();

        cache.invalidate(&[StaleView::Dashboard]);
        assert_eq!(rx.try_recv(), Ok(StaleView::Dashboard));
    }

    #[test]
    fn invalidation_does_not_block_without_subscribers() {
        let cache = ViewCache::new();
        cache.invalidate(&[StaleView::OrderForm]);
        assert!(cache.is_stale(StaleView::OrderForm));
    }

    #[test]
    fn concurrent_writers_leave_a_consistent_stale_set() {
        let cache = ViewCache::new();
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let cache = cache.clone();
                std::thread::spawn(move || {
                    cache.invalidate(&[StaleView::Orders, StaleView::Order(i)]);
                    cache.refresh(StaleView::Order(i));
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        assert!(cache.is_stale(StaleView::Orders));
        for i in 0..8 {
            assert!(!cache.is_stale(StaleView::Order(i)));
        }
    }
}
