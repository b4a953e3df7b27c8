// Copyright (c) 2025 - Cowboy AI, Inc.
//! Scenario tests for the debounced search pipeline
//!
//! These drive `SearchPipeline` in virtual time: every call carries the
//! current millisecond, so each scenario is exact and deterministic.

use live_search::state_machine::DebounceState;
use live_search::{Catalog, SearchConfig, SearchPipeline, Settlement};
use pretty_assertions::assert_eq;
use test_case::test_case;

fn pipeline() -> SearchPipeline {
    SearchPipeline::new(Catalog::technologies(), &SearchConfig::default())
}

/// Feed timed keystrokes, polling every millisecond up to `until`
fn drive(p: &mut SearchPipeline, keys: &[(i64, &str)], until: i64) -> Vec<Settlement> {
    let mut out = Vec::new();
    let mut keys = keys.iter().peekable();
    for now in 0..=until {
        while let Some((_, value)) = keys.next_if(|(t, _)| *t == now) {
            out.extend(p.on_input(Some(*value), now));
        }
        out.extend(p.poll(now));
    }
    out
}

fn terms(settlements: &[Settlement]) -> Vec<&str> {
    settlements.iter().map(|s| s.term.as_str()).collect()
}

#[test]
fn test_burst_settles_once_with_react_results() {
    let mut p = pipeline();
    let out = drive(&mut p, &[(0, "r"), (50, "re"), (100, "rea")], 1000);

    assert_eq!(terms(&out), vec!["rea"]);
    assert_eq!(out[0].settled_at, 400);
    assert_eq!(
        out[0].results.as_slice(),
        &["React".to_string(), "React Native".to_string()]
    );
    assert_eq!(p.computations(), 1);
}

#[test]
fn test_superseded_terms_are_never_computed() {
    let mut p = pipeline();
    drive(&mut p, &[(0, "a"), (299, "an"), (598, "ang")], 2000);

    // each keystroke arrives 1 ms before the previous one would settle
    assert_eq!(p.last_forwarded(), Some("ang"));
    assert_eq!(p.computations(), 1);
}

#[test]
fn test_intra_burst_duplicate_emits_once() {
    let mut p = pipeline();
    let out = drive(&mut p, &[(0, "Angular"), (100, "Angular")], 1000);

    assert_eq!(terms(&out), vec!["Angular"]);
    assert_eq!(out[0].settled_at, 400);
}

#[test]
fn test_duplicate_across_bursts_is_suppressed() {
    let mut p = pipeline();
    let out = drive(&mut p, &[(0, "Angular"), (500, "Angular")], 1500);

    assert_eq!(terms(&out), vec!["Angular"]);
    assert_eq!(p.computations(), 1);
    // both raw values were still logged
    assert_eq!(p.keystrokes().len(), 2);
}

#[test]
fn test_returning_to_earlier_term_recomputes() {
    let mut p = pipeline();
    let out = drive(
        &mut p,
        &[(0, "vue"), (400, "svelte"), (800, "vue")],
        1500,
    );

    assert_eq!(terms(&out), vec!["vue", "svelte", "vue"]);
    assert_eq!(p.computations(), 3);
}

#[test]
fn test_edit_back_to_forwarded_term_within_burst() {
    // "rea" settles, then the user types "reac" and deletes back to "rea"
    let mut p = pipeline();
    let out = drive(&mut p, &[(0, "rea"), (400, "reac"), (450, "rea")], 2000);

    assert_eq!(terms(&out), vec!["rea"]);
}

#[test]
fn test_teardown_mid_quiet_period_prevents_emission() {
    let mut p = pipeline();
    p.on_input(Some("an"), 0);
    assert!(p.poll(100).is_none());

    assert_eq!(p.teardown(), Some("an".to_string()));
    for now in 100..=5000 {
        assert!(p.poll(now).is_none());
    }
    assert!(p.on_input(Some("ang"), 5000).is_none());
    assert_eq!(p.state(), &DebounceState::Disposed);
    assert_eq!(p.computations(), 0);
    assert!(p.results().is_none());
}

#[test_case("" ; "empty")]
#[test_case("   " ; "whitespace")]
fn test_blank_term_settles_to_full_catalog(term: &str) {
    let mut p = pipeline();
    let out = drive(&mut p, &[(0, term)], 400);

    assert_eq!(out[0].results.as_slice(), p.catalog().entries());
}

#[test]
fn test_empty_catalog_is_valid() {
    let mut p = SearchPipeline::new(Catalog::new(Vec::<String>::new()), &SearchConfig::default());
    let out = drive(&mut p, &[(0, "react")], 400);

    assert_eq!(terms(&out), vec!["react"]);
    assert!(out[0].results.is_empty());
}

#[test]
fn test_results_reflect_last_settled_not_latest_raw() {
    let mut p = pipeline();
    drive(&mut p, &[(0, "vue")], 400);
    p.on_input(Some("angular"), 401);

    // "angular" is still pending
    let results = p.results().unwrap();
    assert_eq!(results.as_slice(), &["Vue".to_string()]);
}

#[test]
fn test_keystroke_log_bounded() {
    let mut p = pipeline();
    for (i, now) in (0..12).zip((0..).step_by(10)) {
        let key = format!("k{i}");
        p.on_input(Some(key.as_str()), now);
    }

    let log = p.keystrokes().to_vec();
    assert_eq!(log.len(), 8);
    assert_eq!(log.first().map(String::as_str), Some("k4"));
    assert_eq!(log.last().map(String::as_str), Some("k11"));
}

#[test]
fn test_custom_quiet_period() {
    let config = SearchConfig::default().with_quiet_period(std::time::Duration::from_millis(50));
    let mut p = SearchPipeline::new(Catalog::technologies(), &config);
    let out = drive(&mut p, &[(0, "pipe"), (60, "router")], 200);

    assert_eq!(terms(&out), vec!["pipe", "router"]);
    assert_eq!(out[1].settled_at, 110);
}
