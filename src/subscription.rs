// Copyright (c) 2025 - Cowboy AI, Inc.
//! Observer registration with scoped unsubscription
//!
//! `subscribe` hands back a [`Subscription`]. The observer stays registered
//! exactly as long as that handle lives: dropping it (or calling
//! [`Subscription::unsubscribe`]) removes the observer.
//!
//! ```rust,ignore
//! let registry = ObserverRegistry::<Settlement>::new();
//! {
//!     let _sub = registry.subscribe(|s| println!("{}", s.term));
//!     registry.notify(&settlement); // printed
//! }
//! registry.notify(&settlement); // nobody listening
//! ```

use parking_lot::Mutex;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::{Arc, Weak};
use tracing::debug;

type Observer<T> = Arc<dyn Fn(&T) + Send + Sync>;

struct Registry<T> {
    next_id: u64,
    observers: BTreeMap<u64, Observer<T>>,
    closed: bool,
}

/// Multi-listener observer list
pub struct ObserverRegistry<T> {
    inner: Arc<Mutex<Registry<T>>>,
}

impl<T> Clone for ObserverRegistry<T> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<T> fmt::Debug for ObserverRegistry<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let registry = self.inner.lock();
        f.debug_struct("ObserverRegistry")
            .field("observers", &registry.observers.len())
            .field("closed", &registry.closed)
            .finish()
    }
}

impl<T: 'static> Default for ObserverRegistry<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: 'static> ObserverRegistry<T> {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(Registry {
                next_id: 0,
                observers: BTreeMap::new(),
                closed: false,
            })),
        }
    }

    /// Register an observer
    ///
    /// After [`close`](Self::close) the returned handle is inert and the
    /// observer is never called.
    pub fn subscribe<F>(&self, observer: F) -> Subscription
    where
        F: Fn(&T) + Send + Sync + 'static,
    {
        let mut registry = self.inner.lock();
        if registry.closed {
            return Subscription::inert();
        }

        let id = registry.next_id;
        registry.next_id += 1;
        registry.observers.insert(id, Arc::new(observer));
        debug!(id, observers = registry.observers.len(), "Observer subscribed");

        let weak: Weak<Mutex<Registry<T>>> = Arc::downgrade(&self.inner);
        Subscription {
            disposer: Some(Box::new(move || {
                if let Some(inner) = weak.upgrade() {
                    let mut registry = inner.lock();
                    if registry.observers.remove(&id).is_some() {
                        debug!(id, "Observer unsubscribed");
                    }
                }
            })),
        }
    }

    /// Deliver `value` to every observer in subscription order
    ///
    /// Returns the number of observers called. The lock is not held while
    /// observers run, so an observer may unsubscribe itself or others.
    pub fn notify(&self, value: &T) -> usize {
        let observers: Vec<Observer<T>> = {
            let registry = self.inner.lock();
            if registry.closed {
                return 0;
            }
            registry.observers.values().cloned().collect()
        };

        for observer in &observers {
            observer(value);
        }
        observers.len()
    }

    /// Drop every observer and refuse new ones
    pub fn close(&self) {
        let mut registry = self.inner.lock();
        registry.closed = true;
        registry.observers.clear();
    }

    pub fn len(&self) -> usize {
        self.inner.lock().observers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_closed(&self) -> bool {
        self.inner.lock().closed
    }
}

/// Handle keeping an observer registered
///
/// Dropping the handle unsubscribes.
#[must_use = "dropping a Subscription immediately unsubscribes the observer"]
pub struct Subscription {
    disposer: Option<Box<dyn FnOnce() + Send + Sync>>,
}

impl Subscription {
    fn inert() -> Self {
        Self { disposer: None }
    }

    /// Remove the observer now
    pub fn unsubscribe(mut self) {
        self.dispose();
    }

    /// Whether this handle still has something to unsubscribe
    pub fn is_active(&self) -> bool {
        self.disposer.is_some()
    }

    fn dispose(&mut self) {
        if let Some(disposer) = self.disposer.take() {
            disposer();
        }
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.is_active())
            .finish()
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.dispose();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn counter() -> (Arc<AtomicUsize>, impl Fn(&u32) + Send + Sync + 'static) {
        let count = Arc::new(AtomicUsize::new(0));
        let inner = count.clone();
        (count, move |_: &u32| {
            inner.fetch_add(1, Ordering::SeqCst);
        })
    }

    #[test]
    fn test_notify_reaches_all_observers() {
        let registry = ObserverRegistry::new();
        let (a, fa) = counter();
        let (b, fb) = counter();
        let _sa = registry.subscribe(fa);
        let _sb = registry.subscribe(fb);

        assert_eq!(registry.notify(&1), 2);
        assert_eq!(a.load(Ordering::SeqCst), 1);
        assert_eq!(b.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_drop_unsubscribes() {
        let registry = ObserverRegistry::new();
        let (count, f) = counter();
        {
            let _sub = registry.subscribe(f);
            registry.notify(&1);
        }
        registry.notify(&2);

        assert_eq!(count.load(Ordering::SeqCst), 1);
        assert!(registry.is_empty());
    }

    #[test]
    fn test_explicit_unsubscribe() {
        let registry = ObserverRegistry::new();
        let (count, f) = counter();
        let sub = registry.subscribe(f);
        assert!(sub.is_active());

        sub.unsubscribe();
        registry.notify(&1);
        assert_eq!(count.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_close_rejects_new_observers() {
        let registry = ObserverRegistry::new();
        let (count, f) = counter();
        registry.close();

        let sub = registry.subscribe(f);
        assert!(!sub.is_active());
        assert_eq!(registry.notify(&1), 0);
        assert_eq!(count.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_subscription_outlives_registry() {
        let registry = ObserverRegistry::<u32>::new();
        let sub = registry.subscribe(|_| {});
        drop(registry);
        // Dropping after the registry is gone must not panic
        drop(sub);
    }

    #[test]
    fn test_observer_can_unsubscribe_during_notify() {
        let registry = ObserverRegistry::<u32>::new();
        let slot: Arc<Mutex<Option<Subscription>>> = Arc::new(Mutex::new(None));
        let inner = slot.clone();
        let sub = registry.subscribe(move |_| {
            inner.lock().take();
        });
        *slot.lock() = Some(sub);

        assert_eq!(registry.notify(&1), 1);
        assert!(registry.is_empty());
    }
}
