//! Size observation for the content subtree.
//!
//! `ContentSize` is the shared measured height of a content node. The
//! producer (whatever performs layout/measurement) writes into it; the
//! collapsible primitive observes it through a scoped [`Subscription`].
//! Intermediate writes may be coalesced by the producer; every delivered
//! measurement is handled independently.

use std::sync::{Arc, Mutex, Weak};

/// Callback invoked with the new content-box height in pixels.
pub type ResizeCallback = Box<dyn FnMut(f32) + Send>;

#[derive(Default)]
struct Slot {
    callback: Option<ResizeCallback>,
    /// Incremented on every attach. A stale subscription's release must not
    /// detach a newer observer.
    generation: u64,
}

/// Observable measured height of a content node.
///
/// Cheap to clone; all clones share the same measurement and observer slot.
#[derive(Clone, Default)]
pub struct ContentSize {
    height: Arc<Mutex<f32>>,
    slot: Arc<Mutex<Slot>>,
}

impl ContentSize {
    pub fn new(height: f32) -> Self {
        Self {
            height: Arc::new(Mutex::new(height)),
            slot: Arc::new(Mutex::new(Slot::default())),
        }
    }

    /// The most recent measurement.
    pub fn get(&self) -> f32 {
        self.height
            .lock()
            .map(|guard| *guard)
            .unwrap_or_else(|poisoned| *poisoned.into_inner())
    }

    /// Record a new measurement, notifying the observer when it changed.
    pub fn set(&self, height: f32) {
        {
            let mut guard = match self.height.lock() {
                Ok(guard) => guard,
                Err(poisoned) => poisoned.into_inner(),
            };
            if *guard == height {
                return;
            }
            *guard = height;
        }
        self.notify(height);
    }

    /// Whether an observer is currently attached.
    pub fn is_observed(&self) -> bool {
        self.slot
            .lock()
            .map(|guard| guard.callback.is_some())
            .unwrap_or(false)
    }

    /// Attach an observer. The callback fires once immediately with the
    /// current measurement, then on every subsequent change.
    ///
    /// A newer `observe` supersedes any previous one. The returned guard
    /// releases the observation when dropped.
    pub fn observe(&self, mut callback: ResizeCallback) -> Subscription {
        let initial = self.get();
        callback(initial);

        let generation = {
            let mut guard = match self.slot.lock() {
                Ok(guard) => guard,
                Err(poisoned) => poisoned.into_inner(),
            };
            guard.generation += 1;
            guard.callback = Some(callback);
            guard.generation
        };
        log::trace!("[observer] attached (generation {generation})");

        Subscription {
            slot: Arc::downgrade(&self.slot),
            generation,
        }
    }

    fn notify(&self, height: f32) {
        let mut guard = match self.slot.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        if let Some(callback) = guard.callback.as_mut() {
            callback(height);
        }
    }
}

impl std::fmt::Debug for ContentSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContentSize")
            .field("height", &self.get())
            .field("observed", &self.is_observed())
            .finish()
    }
}

/// Scoped observation of a [`ContentSize`].
///
/// Dropping the subscription releases the observer exactly once, even when
/// torn down mid-transition.
#[derive(Debug)]
pub struct Subscription {
    slot: Weak<Mutex<Slot>>,
    generation: u64,
}

impl Drop for Subscription {
    fn drop(&mut self) {
        let Some(slot) = self.slot.upgrade() else {
            return;
        };
        let mut guard = match slot.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        // Only detach if a newer observe hasn't replaced us.
        if guard.generation == self.generation {
            guard.callback = None;
            log::trace!("[observer] released (generation {})", self.generation);
        }
    }
}
