// Copyright (c) 2025 - Cowboy AI, Inc.
//! Debounced Search Pipeline
//!
//! The incremental, clock-free core of the live search. Callers supply the
//! current time with every call, which keeps the pipeline deterministic and
//! lets tests drive it in virtual time.
//!
//! ```text
//! on_input(raw, now) ──> KeystrokeLog
//!        │
//!        ▼
//!   DebounceState ──poll(now ≥ deadline)──> settled term
//!                                                │
//!                     same as last forwarded? ───┤── yes: suppressed
//!                                                ▼
//!                                     Catalog::filter ──> Settlement
//! ```
//!
//! A `SearchPipeline` is single-threaded by construction (`&mut self`
//! everywhere). `LiveSearch` wraps one in a tokio task for real-time use and
//! shares its keystroke log so keystrokes are readable before the task runs.

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::catalog::{Catalog, ResultSet};
use crate::config::SearchConfig;
use crate::errors::SearchResult;
use crate::frp::Time;
use crate::keystroke_log::KeystrokeLog;
use crate::state_machine::{DebounceInput, DebounceOutput, DebounceState, StateMachine};

/// A settled term forwarded downstream together with its result set
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settlement {
    /// The term that survived its quiet period
    pub term: String,

    /// Catalog entries matching `term`, in catalog order
    pub results: ResultSet,

    /// Pipeline time at which the quiet period elapsed
    pub settled_at: Time,
}

impl Settlement {
    /// One-line JSON rendering
    pub fn to_json(&self) -> SearchResult<String> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Debounce + distinct + filter over a static catalog
#[derive(Debug)]
pub struct SearchPipeline {
    catalog: Catalog,
    quiet: Time,
    state: DebounceState,
    keystrokes: Arc<Mutex<KeystrokeLog>>,
    last_forwarded: Option<String>,
    results: Option<ResultSet>,
    computations: u64,
}

impl SearchPipeline {
    /// Create an idle pipeline with no results yet
    pub fn new(catalog: Catalog, config: &SearchConfig) -> Self {
        Self {
            catalog,
            quiet: config.quiet_ms(),
            state: DebounceState::Idle,
            keystrokes: Arc::new(Mutex::new(KeystrokeLog::new(
                config.keystroke_log_capacity,
            ))),
            last_forwarded: None,
            results: None,
            computations: 0,
        }
    }

    /// Create a pipeline already holding an empty pending term
    ///
    /// Once the first quiet period elapses the full catalog is forwarded,
    /// which is what a freshly opened search screen shows. The seed does not
    /// appear in the keystroke log.
    pub fn seeded(catalog: Catalog, config: &SearchConfig, now: Time) -> Self {
        let mut pipeline = Self::new(catalog, config);
        pipeline.state = DebounceState::Pending {
            value: String::new(),
            deadline: now.saturating_add(pipeline.quiet),
        };
        pipeline
    }

    /// Accept a raw keystroke value
    ///
    /// `None` is treated as the empty string. If a previously pending value
    /// had already reached its deadline by `now`, it settles first and its
    /// settlement (if not suppressed) is returned.
    pub fn on_input(&mut self, raw: Option<&str>, now: Time) -> Option<Settlement> {
        if self.state.is_terminal() {
            debug!(raw = ?raw, "Ignoring keystroke after teardown");
            return None;
        }

        let value = raw.unwrap_or_default().to_string();
        self.keystrokes.lock().record(value.clone());
        self.on_logged_input(value, now)
    }

    /// Debounce a keystroke that is already in the keystroke log
    pub(crate) fn on_logged_input(&mut self, value: String, now: Time) -> Option<Settlement> {
        if self.state.is_terminal() {
            debug!(raw = %value, "Ignoring keystroke after teardown");
            return None;
        }

        let settlement = self.poll(now);

        let input = DebounceInput::Keystroke {
            value,
            deadline: now.saturating_add(self.quiet),
        };
        if let Some(DebounceOutput::Superseded(old)) = self.step(&input) {
            debug!(superseded = %old, "Pending term superseded");
        }

        settlement
    }

    /// Advance the clock to `now`
    ///
    /// Returns a settlement when the pending term's quiet period has elapsed
    /// and the term differs from the last one forwarded.
    pub fn poll(&mut self, now: Time) -> Option<Settlement> {
        let term = match self.step(&DebounceInput::Tick { now })? {
            DebounceOutput::Settled(term) => term,
            _ => return None,
        };
        self.step(&DebounceInput::Forwarded);

        if self.last_forwarded.as_deref() == Some(term.as_str()) {
            debug!(term = %term, "Settled term unchanged, not recomputing");
            return None;
        }

        let results = self.catalog.filter(&term);
        self.computations += 1;
        info!(
            term = %term,
            matches = results.len(),
            settled_at = now,
            "Search term settled"
        );

        self.last_forwarded = Some(term.clone());
        self.results = Some(results.clone());

        Some(Settlement {
            term,
            results,
            settled_at: now,
        })
    }

    /// When the pending term will settle, if any
    pub fn deadline(&self) -> Option<Time> {
        self.state.deadline()
    }

    /// Tear the pipeline down
    ///
    /// Cancels the pending term, if any, and returns it. Later input and
    /// polls are ignored. Calling this twice is harmless.
    pub fn teardown(&mut self) -> Option<String> {
        match self.step(&DebounceInput::Teardown) {
            Some(DebounceOutput::Cancelled(dropped)) => {
                if let Some(term) = &dropped {
                    debug!(term = %term, "Pending term cancelled by teardown");
                }
                dropped
            }
            _ => None,
        }
    }

    /// Raw keystrokes, oldest first
    pub fn keystrokes(&self) -> Vec<String> {
        self.keystrokes.lock().to_vec()
    }

    /// Shared handle to the keystroke log
    pub fn keystroke_log(&self) -> Arc<Mutex<KeystrokeLog>> {
        self.keystrokes.clone()
    }

    /// The latest forwarded result set
    pub fn results(&self) -> Option<&ResultSet> {
        self.results.as_ref()
    }

    /// The latest forwarded term
    pub fn last_forwarded(&self) -> Option<&str> {
        self.last_forwarded.as_deref()
    }

    /// Number of result sets computed so far
    pub fn computations(&self) -> u64 {
        self.computations
    }

    pub fn state(&self) -> &DebounceState {
        &self.state
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn is_disposed(&self) -> bool {
        self.state.is_terminal()
    }

    fn step(&mut self, input: &DebounceInput) -> Option<DebounceOutput> {
        match self.state.transition(input) {
            Ok((next, output)) => {
                self.state = next;
                Some(output)
            }
            Err(e) if self.state.is_terminal() => {
                debug!(error = %e, "Pipeline disposed");
                None
            }
            Err(e) => {
                warn!(state = self.state.name(), error = %e, "Rejected debounce transition");
                None
            }
        }
    }
}
