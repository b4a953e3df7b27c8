// Copyright (c) 2025 - Cowboy AI, Inc.
//! Behavior - Continuous-Time Signals
//!
//! A `Behavior<T>` always has a value and can be sampled at any moment:
//!
//! ```text
//! Behavior<T> ≅ Time → T
//! ```
//!
//! A running search exposes its latest result set and its keystroke log as
//! behaviors, so a rendering layer can pull the current state whenever it
//! redraws instead of being pushed every change.
//!
//! ```rust,ignore
//! let results: Behavior<Option<ResultSet>> = search.results_behavior();
//! let count = results.map(|r| r.map_or(0, |r| r.len()));
//! println!("{} matches", count.sample());
//! ```

use super::signal::{Samplable, Signal};
use std::fmt::Debug;
use std::sync::Arc;

/// Continuous-time signal that always has a value
///
/// Implemented as a shared sampling closure, so clones are cheap and all
/// observe the same source.
#[derive(Clone)]
pub struct Behavior<T> {
    sampler: Arc<dyn Fn() -> T + Send + Sync>,
}

impl<T: Debug> Debug for Behavior<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Behavior<{}>", std::any::type_name::<T>())
    }
}

impl<T: Clone + Debug + Send + Sync + 'static> Behavior<T> {
    /// A behavior that always samples to `value`
    pub fn constant(value: T) -> Self {
        Self {
            sampler: Arc::new(move || value.clone()),
        }
    }

    /// A behavior backed by an arbitrary sampling function
    ///
    /// Typically reads from shared state such as a `watch::Receiver`.
    pub fn from_fn<F>(f: F) -> Self
    where
        F: Fn() -> T + Send + Sync + 'static,
    {
        Self {
            sampler: Arc::new(f),
        }
    }

    /// Combine two behaviors; both are sampled whenever the result is
    pub fn apply2<U, V, F>(self, other: Behavior<U>, f: F) -> Behavior<V>
    where
        U: Clone + Debug + 'static,
        V: Clone + Debug + 'static,
        F: Fn(T, U) -> V + Send + Sync + 'static,
    {
        let sampler1 = self.sampler;
        let sampler2 = other.sampler;

        Behavior {
            sampler: Arc::new(move || f(sampler1(), sampler2())),
        }
    }
}

impl<T: Clone + Debug + Send + Sync + 'static> Signal<T> for Behavior<T> {
    type Mapped<U: Clone + Debug + Send + Sync + 'static> = Behavior<U>;

    fn map<U, F>(self, f: F) -> Self::Mapped<U>
    where
        F: Fn(T) -> U + Clone + Send + Sync + 'static,
        U: Clone + Debug + Send + Sync + 'static,
    {
        let sampler = self.sampler;
        Behavior {
            sampler: Arc::new(move || f(sampler())),
        }
    }
}

impl<T: Clone + Debug + Send + Sync + 'static> Samplable<T> for Behavior<T> {
    fn sample(&self) -> T {
        (self.sampler)()
    }
}
