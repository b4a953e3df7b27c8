// Copyright (c) 2025 - Cowboy AI, Inc.
//! Property-Based Tests for the Debounced Search Pipeline
//!
//! The incremental `SearchPipeline` is checked against the whole-history
//! FRP model (`debounce` → `distinct_until_changed` → `take_until`), plus
//! the ordering and boundedness guarantees of result sets and the keystroke
//! log.

use live_search::frp::{settled_terms, Discrete, DiscreteEvent, Time};
use live_search::{Catalog, SearchConfig, SearchPipeline, Settlement};
use proptest::prelude::*;

const QUIET: Time = 300;

// ============================================================================
// Strategies
// ============================================================================

fn term() -> impl Strategy<Value = String> {
    prop::sample::select(vec![
        "", " ", "a", "an", "Angular", "r", "re", "rea", "React", "vue", "xyz",
    ])
    .prop_map(str::to_string)
}

/// Keystrokes with gaps straddling the quiet period, as absolute times
fn timed_keystrokes() -> impl Strategy<Value = Vec<(Time, String)>> {
    prop::collection::vec((0i64..600, term()), 0..25).prop_map(|gaps| {
        let mut now = 0;
        gaps.into_iter()
            .map(|(gap, value)| {
                now += gap;
                (now, value)
            })
            .collect()
    })
}

/// A single burst: every gap shorter than the quiet period
fn burst() -> impl Strategy<Value = Vec<(Time, String)>> {
    prop::collection::vec((0i64..QUIET, term()), 1..15).prop_map(|gaps| {
        let mut now = 0;
        gaps.into_iter()
            .map(|(gap, value)| {
                now += gap;
                (now, value)
            })
            .collect()
    })
}

// ============================================================================
// Helpers
// ============================================================================

fn pipeline() -> SearchPipeline {
    SearchPipeline::new(Catalog::technologies(), &SearchConfig::default())
}

/// Drive the pipeline millisecond by millisecond, tearing down at `teardown_at`
fn drive(
    p: &mut SearchPipeline,
    keys: &[(Time, String)],
    teardown_at: Option<Time>,
) -> Vec<Settlement> {
    let last_key = keys.last().map_or(0, |(t, _)| *t);
    let end = teardown_at.unwrap_or(last_key + QUIET + 1);

    let mut out = Vec::new();
    let mut pending = keys.iter().peekable();
    for now in 0..end {
        while let Some((_, value)) = pending.next_if(|(t, _)| *t == now) {
            out.extend(p.on_input(Some(value.as_str()), now));
        }
        out.extend(p.poll(now));
    }
    if teardown_at.is_some() {
        p.teardown();
    }
    out
}

fn model(keys: &[(Time, String)], teardown_at: Option<Time>) -> Vec<(Time, String)> {
    let keystrokes = DiscreteEvent::from_vec(keys.to_vec());
    settled_terms(keystrokes, QUIET, teardown_at).occurrences()
}

// ============================================================================
// Property Tests
// ============================================================================

proptest! {
    /// Property: the incremental pipeline forwards exactly what the FRP model
    /// says it should, at the same times
    #[test]
    fn prop_pipeline_matches_frp_model(keys in timed_keystrokes()) {
        let mut p = pipeline();
        let forwarded: Vec<(Time, String)> = drive(&mut p, &keys, None)
            .into_iter()
            .map(|s| (s.settled_at, s.term))
            .collect();

        prop_assert_eq!(forwarded, model(&keys, None));
    }

    /// Property: teardown cuts the forwarded sequence at the teardown instant
    #[test]
    fn prop_teardown_matches_frp_model(
        keys in timed_keystrokes(),
        teardown_at in 0i64..8000,
    ) {
        let mut p = pipeline();
        let forwarded: Vec<(Time, String)> = drive(&mut p, &keys, Some(teardown_at))
            .into_iter()
            .map(|s| (s.settled_at, s.term))
            .collect();

        prop_assert_eq!(forwarded, model(&keys, Some(teardown_at)));

        // nothing ever comes out afterwards
        for now in teardown_at..teardown_at + 2 * QUIET {
            prop_assert!(p.poll(now).is_none());
        }
    }

    /// Property: a burst faster than the quiet period settles only its last value
    #[test]
    fn prop_burst_settles_last_value(keys in burst()) {
        let mut p = pipeline();
        let out = drive(&mut p, &keys, None);

        prop_assert_eq!(out.len(), 1);
        let last = keys.last().map(|(_, v)| v.clone());
        prop_assert_eq!(Some(out[0].term.clone()), last);
    }

    /// Property: one result-set computation per forwarded settlement, and
    /// consecutive forwarded terms always differ
    #[test]
    fn prop_no_redundant_recomputation(keys in timed_keystrokes()) {
        let mut p = pipeline();
        let out = drive(&mut p, &keys, None);

        prop_assert_eq!(p.computations(), out.len() as u64);
        for pair in out.windows(2) {
            prop_assert_ne!(&pair[0].term, &pair[1].term);
        }
    }

    /// Property: every result set is an order-preserving subsequence of the
    /// catalog, and blank terms return the catalog unchanged
    #[test]
    fn prop_results_are_catalog_subsequence(term in ".{0,12}") {
        let catalog = Catalog::technologies();
        let results = catalog.filter(&term);

        prop_assert!(results.is_subsequence_of(&catalog));
        if term.trim().is_empty() {
            prop_assert_eq!(results.as_slice(), catalog.entries());
        }
        let needle = term.to_lowercase();
        for entry in &results {
            prop_assert!(term.trim().is_empty() || entry.to_lowercase().contains(&needle));
        }
    }

    /// Property: the keystroke log keeps the newest 8 raw values, oldest first
    #[test]
    fn prop_keystroke_log_is_fifo_bounded(keys in timed_keystrokes()) {
        let mut p = pipeline();
        drive(&mut p, &keys, None);

        let expected: Vec<String> = keys
            .iter()
            .skip(keys.len().saturating_sub(8))
            .map(|(_, v)| v.clone())
            .collect();
        prop_assert!(p.keystrokes().len() <= 8);
        prop_assert_eq!(p.keystrokes().to_vec(), expected);
    }
}
