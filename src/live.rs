// Copyright (c) 2025 - Cowboy AI, Inc.
//! Real-time live search
//!
//! [`LiveSearch`] runs a [`SearchPipeline`] inside one tokio task.
//! Keystrokes and teardown travel over a single channel and are serialized
//! with the debounce timer in one `select!` loop, so the pipeline never sees
//! concurrent access. The one exception is the pipeline's keystroke log,
//! which `input` writes through a shared handle so it is readable as soon as
//! the call returns.
//!
//! ```text
//! input() ──┐                       ┌──> watch (latest settlement, pull)
//!           ├─ mpsc ─> task loop ───┤
//! teardown()┘     ▲                 └──> ObserverRegistry (push)
//!                 └── sleep_until(deadline)
//! ```
//!
//! ```rust,ignore
//! let mut search = LiveSearch::start(Catalog::technologies(), SearchConfig::default())?;
//! let _sub = search.subscribe(|s| println!("{} -> {:?}", s.term, s.results));
//! search.input(Some("rea"))?;
//! // ... 300 ms later the observer prints "rea -> [React, React Native]"
//! search.teardown().await;
//! ```

use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tracing::{debug, info, warn};

use crate::catalog::{Catalog, ResultSet};
use crate::config::SearchConfig;
use crate::errors::{SearchError, SearchResult};
use crate::frp::{Behavior, Time};
use crate::keystroke_log::KeystrokeLog;
use crate::pipeline::{SearchPipeline, Settlement};
use crate::subscription::{ObserverRegistry, Subscription};

enum Command {
    Keystroke { value: String, at: Instant },
    Teardown,
}

/// What a rendering layer needs to draw the search screen
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchView {
    /// Raw keystrokes, oldest first
    pub keystrokes: Vec<String>,

    /// Latest forwarded result set, `None` until the first settlement
    pub results: Option<ResultSet>,
}

/// A debounced search running on the tokio runtime
pub struct LiveSearch {
    commands: Option<mpsc::UnboundedSender<Command>>,
    latest: watch::Receiver<Option<Settlement>>,
    keystrokes: Arc<Mutex<KeystrokeLog>>,
    observers: ObserverRegistry<Settlement>,
    task: Option<JoinHandle<()>>,
    config: SearchConfig,
}

impl LiveSearch {
    /// Start a live search over `catalog`
    ///
    /// The pipeline starts with an empty pending term, so the full catalog is
    /// forwarded after one quiet period unless the user types first. Must be
    /// called from within a tokio runtime.
    pub fn start(catalog: Catalog, config: SearchConfig) -> SearchResult<Self> {
        config.validate()?;
        let runtime = tokio::runtime::Handle::try_current()
            .map_err(|e| SearchError::Configuration(format!("no tokio runtime: {e}")))?;

        let epoch = Instant::now();
        let pipeline = SearchPipeline::seeded(catalog.clone(), &config, 0);
        let keystrokes = pipeline.keystroke_log();
        let (commands_tx, commands_rx) = mpsc::unbounded_channel();
        let (latest_tx, latest_rx) = watch::channel(None);
        let observers = ObserverRegistry::new();

        let task = runtime.spawn(run(
            pipeline,
            epoch,
            commands_rx,
            latest_tx,
            observers.clone(),
        ));

        info!(
            catalog = catalog.len(),
            quiet_ms = config.quiet_ms(),
            "Live search started"
        );

        Ok(Self {
            commands: Some(commands_tx),
            latest: latest_rx,
            keystrokes,
            observers,
            task: Some(task),
            config,
        })
    }

    /// Feed one raw keystroke value (`None` counts as empty)
    ///
    /// The keystroke log is updated before this returns; the debounce timer
    /// restarts from the moment of the call.
    pub fn input<S: Into<String>>(&self, raw: Option<S>) -> SearchResult<()> {
        let commands = self
            .commands
            .as_ref()
            .ok_or_else(|| SearchError::Disposed("input after teardown".to_string()))?;

        let value: String = raw.map(Into::into).unwrap_or_default();
        let at = Instant::now();
        self.keystrokes.lock().record(value.clone());

        commands
            .send(Command::Keystroke { value, at })
            .map_err(|_| SearchError::Disposed("search task has stopped".to_string()))
    }

    /// Register an observer for settlements
    pub fn subscribe<F>(&self, observer: F) -> Subscription
    where
        F: Fn(&Settlement) + Send + Sync + 'static,
    {
        self.observers.subscribe(observer)
    }

    /// A pull-style stream of settlements
    pub fn settlements(&self) -> Settlements {
        let mut rx = self.latest.clone();
        rx.mark_unchanged();
        Settlements { rx }
    }

    /// The latest settlement, if any
    pub fn latest(&self) -> Option<Settlement> {
        self.latest.borrow().clone()
    }

    /// The latest result set, if any
    pub fn results(&self) -> Option<ResultSet> {
        self.latest.borrow().as_ref().map(|s| s.results.clone())
    }

    /// Raw keystrokes, oldest first
    pub fn keystrokes(&self) -> Vec<String> {
        self.keystrokes.lock().to_vec()
    }

    /// Samplable view of the latest result set
    pub fn results_behavior(&self) -> Behavior<Option<ResultSet>> {
        let rx = self.latest.clone();
        Behavior::from_fn(move || rx.borrow().as_ref().map(|s| s.results.clone()))
    }

    /// Samplable view of the keystroke log
    pub fn keystrokes_behavior(&self) -> Behavior<Vec<String>> {
        let log = self.keystrokes.clone();
        Behavior::from_fn(move || log.lock().to_vec())
    }

    /// Samplable view of everything the screen renders
    pub fn view(&self) -> Behavior<SearchView> {
        self.keystrokes_behavior()
            .apply2(self.results_behavior(), |keystrokes, results| SearchView {
                keystrokes,
                results,
            })
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    pub fn is_disposed(&self) -> bool {
        self.commands.is_none()
    }

    /// Stop the search
    ///
    /// Cancels the debounce timer, drops any pending term and waits for the
    /// task to exit. No observer is called after this returns. Idempotent.
    pub async fn teardown(&mut self) {
        if let Some(commands) = self.commands.take() {
            // A send error only means the task is already gone
            let _ = commands.send(Command::Teardown);
        }
        if let Some(task) = self.task.take() {
            if let Err(e) = task.await {
                warn!(error = %e, "Live search task ended abnormally");
            }
        }
        self.observers.close();
    }
}

impl Drop for LiveSearch {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            debug!("Live search dropped without teardown, aborting task");
            task.abort();
        }
        self.observers.close();
    }
}

impl std::fmt::Debug for LiveSearch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LiveSearch")
            .field("disposed", &self.is_disposed())
            .field("observers", &self.observers)
            .field("config", &self.config)
            .finish()
    }
}

/// Pull-style access to settlements as they happen
#[derive(Debug, Clone)]
pub struct Settlements {
    rx: watch::Receiver<Option<Settlement>>,
}

impl Settlements {
    /// Wait for the next settlement
    ///
    /// Returns `None` once the search has been torn down. Settlements that
    /// arrive faster than they are read collapse into the newest one.
    pub async fn next(&mut self) -> Option<Settlement> {
        loop {
            self.rx.changed().await.ok()?;
            if let Some(settlement) = self.rx.borrow_and_update().clone() {
                return Some(settlement);
            }
        }
    }
}

async fn run(
    mut pipeline: SearchPipeline,
    epoch: Instant,
    mut commands: mpsc::UnboundedReceiver<Command>,
    latest: watch::Sender<Option<Settlement>>,
    observers: ObserverRegistry<Settlement>,
) {
    loop {
        let deadline = pipeline.deadline().map(|ms| instant_at(epoch, ms));

        let settlement = tokio::select! {
            biased;

            command = commands.recv() => match command {
                Some(Command::Keystroke { value, at }) => {
                    pipeline.on_logged_input(value, clock(epoch, at))
                }
                Some(Command::Teardown) | None => {
                    pipeline.teardown();
                    break;
                }
            },

            _ = sleep_until(deadline) => pipeline.poll(clock(epoch, Instant::now())),
        };

        if let Some(settlement) = settlement {
            latest.send_replace(Some(settlement.clone()));
            let notified = observers.notify(&settlement);
            debug!(term = %settlement.term, notified, "Settlement published");
        }
    }

    observers.close();
    info!(
        computations = pipeline.computations(),
        "Live search torn down"
    );
}

async fn sleep_until(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => tokio::time::sleep_until(deadline).await,
        None => std::future::pending().await,
    }
}

fn clock(epoch: Instant, at: Instant) -> Time {
    Time::try_from(at.saturating_duration_since(epoch).as_millis()).unwrap_or(Time::MAX)
}

fn instant_at(epoch: Instant, ms: Time) -> Instant {
    epoch + Duration::from_millis(u64::try_from(ms).unwrap_or(0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clock_conversions() {
        let epoch = Instant::now();
        let later = instant_at(epoch, 380);

        assert_eq!(clock(epoch, later), 380);
        assert_eq!(clock(later, epoch), 0);
    }

    #[test]
    fn test_start_outside_runtime_fails() {
        let err = LiveSearch::start(Catalog::technologies(), SearchConfig::default()).unwrap_err();
        assert!(matches!(err, SearchError::Configuration(_)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_input_after_teardown_is_rejected() {
        let mut search =
            LiveSearch::start(Catalog::technologies(), SearchConfig::default()).unwrap();
        search.teardown().await;

        assert!(search.is_disposed());
        assert!(matches!(
            search.input(Some("late")),
            Err(SearchError::Disposed(_))
        ));
        // second teardown is a no-op
        search.teardown().await;
    }
}
