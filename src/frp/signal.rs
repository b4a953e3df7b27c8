// Copyright (c) 2025 - Cowboy AI, Inc.
//! Signal Trait - Base abstraction for time-varying values
//!
//! ```text
//! Signal<T>
//!   ├── Behavior<T>       (continuous-time: latest result set)
//!   └── DiscreteEvent<T>  (discrete-time: keystrokes, settlements)
//! ```
//!
//! All implementations are functors:
//!
//! 1. **Identity**: `signal.map(|x| x) == signal`
//! 2. **Composition**: `signal.map(f).map(g) == signal.map(|x| g(f(x)))`

use std::fmt::Debug;

/// Base trait for time-varying values
pub trait Signal<T: Send + Sync>: Clone + Debug + Send + Sync {
    /// The type of signal produced by map
    type Mapped<U: Clone + Debug + Send + Sync + 'static>: Signal<U>;

    /// Apply a function to the signal's values
    ///
    /// For a keystroke stream this is where a settled term becomes a result
    /// set:
    ///
    /// ```rust,ignore
    /// let results = settled.map(move |term| catalog.filter(&term));
    /// ```
    fn map<U, F>(self, f: F) -> Self::Mapped<U>
    where
        F: Fn(T) -> U + Clone + Send + Sync + 'static,
        U: Clone + Debug + Send + Sync + 'static;
}

/// Signals that can be sampled at any time
///
/// Only continuous-time signals (Behaviors) implement this trait.
pub trait Samplable<T: Send + Sync>: Signal<T> {
    /// Get the value of the signal right now
    fn sample(&self) -> T;
}

/// Signals with discrete occurrences
///
/// Only discrete-time signals (Events) implement this trait.
pub trait Discrete<T: Send + Sync>: Signal<T> {
    /// All (time, value) occurrences, sorted by time
    fn occurrences(&self) -> Vec<crate::frp::Occurrence<T>>;
}
