// Copyright (c) 2025 - Cowboy AI, Inc.
//! Functional Reactive Programming (FRP) Abstractions
//!
//! Time-varying values for modeling the live search.
//!
//! ## Behavior<T> (Continuous-Time)
//!
//! A value that exists at all points in time, sampled on demand: the latest
//! result set, the keystroke log.
//!
//! ```text
//! Time: ────────────────────────────→
//! Value:  ≈≈≈≈≈≈≈≈≈≈≈≈≈≈≈≈≈≈≈≈≈≈≈≈≈
//! ```
//!
//! ## DiscreteEvent<T> (Discrete-Time)
//!
//! A value that occurs at specific moments: keystrokes, settlements.
//!
//! ```text
//! Time: ────────────────────────────→
//! Value:      ●       ●   ●       ●
//! ```
//!
//! The discrete combinators (`debounce`, `distinct_until_changed`,
//! `take_until`) describe the search pipeline over a complete history, which
//! makes them the oracle the incremental `SearchPipeline` is tested against.

pub mod signal;
pub mod behavior;
pub mod event;
pub mod combinators;

pub use signal::{Discrete, Samplable, Signal};
pub use behavior::Behavior;
pub use event::DiscreteEvent;
pub use combinators::*;

/// Time representation (milliseconds on the pipeline clock)
pub type Time = i64;

/// A value paired with the moment it occurred
pub type Occurrence<T> = (Time, T);
