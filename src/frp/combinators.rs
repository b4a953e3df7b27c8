// Copyright (c) 2025 - Cowboy AI, Inc.
//! Signal Combinators
//!
//! Whole-history compositions used as the reference model of the live
//! search. Given every timed keystroke (and optionally a teardown instant)
//! they compute exactly which settlements a `SearchPipeline` fed the same
//! input must forward.
//!
//! ```text
//! keystrokes ──debounce(q)──> distinct_until_changed ──take_until(t)──> map(filter)
//! ```

use super::event::DiscreteEvent;
use super::signal::Signal;
use super::Time;
use crate::catalog::{Catalog, ResultSet};

/// Settled terms of a keystroke stream
///
/// Debounces by `quiet`, drops repeats of the previously forwarded term and
/// discards anything that would settle at or after `teardown_at`.
pub fn settled_terms(
    keystrokes: DiscreteEvent<String>,
    quiet: Time,
    teardown_at: Option<Time>,
) -> DiscreteEvent<String> {
    let settled = keystrokes.debounce(quiet).distinct_until_changed();
    match teardown_at {
        Some(cutoff) => settled.take_until(cutoff),
        None => settled,
    }
}

/// Result sets a live search would forward for the given keystrokes
pub fn search_results(
    catalog: Catalog,
    keystrokes: DiscreteEvent<String>,
    quiet: Time,
    teardown_at: Option<Time>,
) -> DiscreteEvent<(String, ResultSet)> {
    settled_terms(keystrokes, quiet, teardown_at).map(move |term| {
        let results = catalog.filter(&term);
        (term, results)
    })
}
