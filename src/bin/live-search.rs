// Copyright (c) 2025 - Cowboy AI, Inc.
//! Live Search Demo
//!
//! Reads stdin line by line; each line is the full content of the search box
//! at that moment (an empty line clears it). Settled terms are printed with
//! their matches once input has been quiet for the debounce window.
//!
//! Run with: cargo run --bin live-search [-- --json] [-- --ticker]
//!
//! Environment:
//! - LIVE_SEARCH_QUIET_MS      debounce window (default 300)
//! - LIVE_SEARCH_LOG_CAPACITY  keystrokes kept for display (default 8)
//! - LIVE_SEARCH_TICK_MS       ticker period with --ticker (default 1000)
//! - RUST_LOG                  tracing filter (logs go to stderr)

use anyhow::{Context, Result};
use live_search::{
    Catalog, LiveSearch, SearchConfig, SearchResult, Settlement, Ticker, TickerConfig,
};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::{debug, info};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let json = std::env::args().any(|arg| arg == "--json");
    let with_ticker = std::env::args().any(|arg| arg == "--ticker");

    let config = SearchConfig::from_env().context("Invalid search configuration")?;
    let quiet_period = config.quiet_period;
    let mut search =
        LiveSearch::start(Catalog::technologies(), config).context("Failed to start search")?;
    let mut settlements = search.settlements();

    let mut ticker = if with_ticker {
        let ticker = Ticker::start(TickerConfig::from_env().context("Invalid ticker configuration")?)
            .context("Failed to start ticker")?;
        Some(ticker)
    } else {
        None
    };
    let _tick_log = ticker
        .as_ref()
        .map(|t| t.subscribe(|n| info!(elapsed = n + 1, "tick")));

    let mut stdout = tokio::io::stdout();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        tokio::select! {
            line = lines.next_line() => {
                match line.context("Failed to read stdin")? {
                    Some(line) => {
                        search.input(Some(line))?;
                        debug!(keystrokes = ?search.keystrokes(), "Keystroke recorded");
                    }
                    None => break,
                }
            }
            Some(settlement) = settlements.next() => {
                print_settlement(&mut stdout, &settlement, json)
                    .await
                    .context("Failed to print settlement")?;
            }
        }
    }

    // Input closed: let the last term settle before leaving
    if let Ok(Some(settlement)) =
        tokio::time::timeout(quiet_period * 2, settlements.next()).await
    {
        print_settlement(&mut stdout, &settlement, json)
            .await
            .context("Failed to print settlement")?;
    }

    search.teardown().await;
    if let Some(ticker) = ticker.as_mut() {
        ticker.stop().await;
    }

    Ok(())
}

async fn print_settlement(
    stdout: &mut tokio::io::Stdout,
    settlement: &Settlement,
    json: bool,
) -> SearchResult<()> {
    let line = if json {
        settlement.to_json()?
    } else {
        format!(
            "{:?} -> {} match(es): {}",
            settlement.term,
            settlement.results.len(),
            settlement.results.as_slice().join(", ")
        )
    };

    stdout.write_all(line.as_bytes()).await?;
    stdout.write_all(b"\n").await?;
    stdout.flush().await?;
    Ok(())
}
