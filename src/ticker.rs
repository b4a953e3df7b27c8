// Copyright (c) 2025 - Cowboy AI, Inc.
//! Interval ticker
//!
//! Emits `0, 1, 2, …`, one value per period, starting one period after
//! `start`. The interval keeps running until [`Ticker::stop`] is awaited or
//! the ticker is dropped; there is no way to leak it past its owner.

use tokio::sync::{oneshot, watch};
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tracing::{debug, info};

use crate::config::TickerConfig;
use crate::errors::{SearchError, SearchResult};
use crate::frp::Behavior;
use crate::subscription::{ObserverRegistry, Subscription};

/// A running interval counter
pub struct Ticker {
    value: watch::Receiver<Option<u64>>,
    observers: ObserverRegistry<u64>,
    stop: Option<oneshot::Sender<()>>,
    task: Option<JoinHandle<()>>,
}

impl Ticker {
    /// Start ticking; must be called from within a tokio runtime
    pub fn start(config: TickerConfig) -> SearchResult<Self> {
        config.validate()?;
        let runtime = tokio::runtime::Handle::try_current()
            .map_err(|e| SearchError::Configuration(format!("no tokio runtime: {e}")))?;

        let (value_tx, value_rx) = watch::channel(None);
        let (stop_tx, mut stop_rx) = oneshot::channel::<()>();
        let observers = ObserverRegistry::new();
        let notify = observers.clone();
        let period = config.period;

        let task = runtime.spawn(async move {
            let mut interval = tokio::time::interval_at(Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            let mut count: u64 = 0;

            loop {
                tokio::select! {
                    biased;
                    _ = &mut stop_rx => break,
                    _ = interval.tick() => {
                        value_tx.send_replace(Some(count));
                        notify.notify(&count);
                        count += 1;
                    }
                }
            }

            notify.close();
            debug!(ticks = count, "Ticker stopped");
        });

        info!(
            period_ms = u64::try_from(period.as_millis()).unwrap_or(u64::MAX),
            "Ticker started"
        );

        Ok(Self {
            value: value_rx,
            observers,
            stop: Some(stop_tx),
            task: Some(task),
        })
    }

    /// The latest count, `None` before the first tick
    pub fn value(&self) -> Option<u64> {
        *self.value.borrow()
    }

    /// Samplable view of the count
    pub fn behavior(&self) -> Behavior<Option<u64>> {
        let rx = self.value.clone();
        Behavior::from_fn(move || *rx.borrow())
    }

    /// Register an observer called on every tick
    pub fn subscribe<F>(&self, observer: F) -> Subscription
    where
        F: Fn(&u64) + Send + Sync + 'static,
    {
        self.observers.subscribe(observer)
    }

    pub fn is_running(&self) -> bool {
        self.stop.is_some()
    }

    /// Cancel the interval and wait for the task to finish
    pub async fn stop(&mut self) {
        if let Some(stop) = self.stop.take() {
            let _ = stop.send(());
        }
        if let Some(task) = self.task.take() {
            if let Err(e) = task.await {
                debug!(error = %e, "Ticker task ended abnormally");
            }
        }
        self.observers.close();
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
        self.observers.close();
    }
}

impl std::fmt::Debug for Ticker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Ticker")
            .field("value", &self.value())
            .field("running", &self.is_running())
            .finish()
    }
}
