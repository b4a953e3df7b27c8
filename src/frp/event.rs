// Copyright (c) 2025 - Cowboy AI, Inc.
//! DiscreteEvent - Discrete-Time Signals
//!
//! A `DiscreteEvent<T>` is a finite, time-sorted list of occurrences:
//!
//! ```text
//! DiscreteEvent<T> ≅ [(Time, T)]
//! ```
//!
//! Raw keystrokes are a `DiscreteEvent<String>`. The debounced search is
//! then a pure composition of combinators over that list:
//!
//! ```text
//! keystrokes:  r(0) re(40) rea(80) ............... reac(900)
//! debounce:                        rea(380) ................ reac(1200)
//! distinct:                        rea(380) ................ reac(1200)
//! ```
//!
//! ```rust,ignore
//! let settled = keystrokes
//!     .debounce(300)
//!     .distinct_until_changed()
//!     .take_until(teardown_at);
//! let results = settled.map(move |term| catalog.filter(&term));
//! ```
//!
//! These combinators operate on complete histories. `SearchPipeline` does the
//! same thing incrementally; the two must agree.

use super::signal::{Discrete, Signal};
use super::{Occurrence, Time};
use std::fmt::Debug;

/// Discrete-time signal with values at specific moments
#[derive(Clone, Debug)]
pub struct DiscreteEvent<T> {
    /// Occurrences sorted by time
    occurrences: Vec<Occurrence<T>>,
}

impl<T: Clone + Debug + Send + Sync + 'static> DiscreteEvent<T> {
    /// Create an event stream from a vector of occurrences
    ///
    /// Occurrences are stably sorted by time, so values sharing a timestamp
    /// keep their arrival order.
    pub fn from_vec(mut occurrences: Vec<Occurrence<T>>) -> Self {
        occurrences.sort_by_key(|(time, _)| *time);
        Self { occurrences }
    }

    /// Create an empty event stream
    pub fn empty() -> Self {
        Self {
            occurrences: Vec::new(),
        }
    }

    /// Number of occurrences
    pub fn len(&self) -> usize {
        self.occurrences.len()
    }

    /// Whether there are no occurrences
    pub fn is_empty(&self) -> bool {
        self.occurrences.is_empty()
    }

    /// Emit a value only after `quiet` ms pass with no newer occurrence
    ///
    /// Each surviving occurrence is re-timed to `time + quiet`, the moment its
    /// quiet period elapsed. An occurrence followed by another one strictly
    /// less than `quiet` ms later is dropped. The last occurrence always
    /// survives since nothing follows it.
    ///
    /// ```rust,ignore
    /// let keys = DiscreteEvent::from_vec(vec![(0, "r"), (40, "re"), (80, "rea")]);
    /// assert_eq!(keys.debounce(300).occurrences(), vec![(380, "rea")]);
    /// ```
    pub fn debounce(self, quiet: Time) -> Self {
        let mut settled = Vec::new();
        let mut iter = self.occurrences.into_iter().peekable();

        while let Some((time, value)) = iter.next() {
            let deadline = time.saturating_add(quiet);
            let superseded = iter
                .peek()
                .is_some_and(|(next_time, _)| *next_time < deadline);
            if !superseded {
                settled.push((deadline, value));
            }
        }

        Self {
            occurrences: settled,
        }
    }

    /// Drop occurrences equal to the last occurrence that was kept
    pub fn distinct_until_changed(self) -> Self
    where
        T: PartialEq,
    {
        let mut distinct: Vec<Occurrence<T>> = Vec::with_capacity(self.occurrences.len());
        for (time, value) in self.occurrences {
            if distinct.last().map_or(true, |(_, last)| *last != value) {
                distinct.push((time, value));
            }
        }

        Self {
            occurrences: distinct,
        }
    }

    /// Keep only occurrences strictly before `cutoff`
    ///
    /// Models teardown: nothing at or after the disposal instant is observed.
    pub fn take_until(self, cutoff: Time) -> Self {
        let occurrences = self
            .occurrences
            .into_iter()
            .take_while(|(time, _)| *time < cutoff)
            .collect();
        Self { occurrences }
    }

    /// Values without their timestamps
    pub fn values(&self) -> Vec<T> {
        self.occurrences
            .iter()
            .map(|(_, value)| value.clone())
            .collect()
    }
}

impl<T: Clone + Debug + Send + Sync + 'static> Signal<T> for DiscreteEvent<T> {
    type Mapped<U: Clone + Debug + Send + Sync + 'static> = DiscreteEvent<U>;

    fn map<U, F>(self, f: F) -> Self::Mapped<U>
    where
        F: Fn(T) -> U + Clone + Send + Sync + 'static,
        U: Clone + Debug + Send + Sync + 'static,
    {
        let mapped = self
            .occurrences
            .into_iter()
            .map(|(time, value)| (time, f(value)))
            .collect();

        DiscreteEvent {
            occurrences: mapped,
        }
    }
}

impl<T: Clone + Debug + Send + Sync + 'static> Discrete<T> for DiscreteEvent<T> {
    fn occurrences(&self) -> Vec<Occurrence<T>> {
        self.occurrences.clone()
    }
}
