//! Watchlist runs: every entry checked with bounded concurrency.

use futures::stream::{self, StreamExt};
use sizewatch_core::{AppConfig, StockCheck, Verdict, WatchEntry};

use crate::check::{build_notifier, build_page_client, check_page, extract_options, report};
use crate::WatchArgs;

/// Verdict counts for one watchlist run.
#[derive(Debug, Default, PartialEq, Eq)]
pub(crate) struct WatchTotals {
    pub in_stock: usize,
    pub out_of_stock: usize,
    pub unknown: usize,
}

impl WatchTotals {
    fn record(&mut self, verdict: Verdict) {
        match verdict {
            Verdict::InStock => self.in_stock += 1,
            Verdict::OutOfStock => self.out_of_stock += 1,
            Verdict::Unknown => self.unknown += 1,
        }
    }
}

/// Runs the `watch` command.
///
/// # Errors
///
/// Returns an error if the watchlist cannot be loaded or an HTTP client
/// cannot be built. Per-entry failures become unknown verdicts.
pub(crate) async fn run_watch(config: &AppConfig, args: &WatchArgs) -> anyhow::Result<()> {
    let path = args
        .watchlist
        .clone()
        .unwrap_or_else(|| config.watchlist_path.clone());
    let watchlist = sizewatch_core::load_watchlist(&path)?;
    tracing::info!(
        path = %path.display(),
        entries = watchlist.watches.len(),
        "watchlist loaded"
    );

    let client = build_page_client(config)?;
    let notifier = build_notifier(config.webhook_url.as_deref(), config)?;
    let options = extract_options(config, false);
    let max_concurrent = config.max_concurrent_checks.max(1);

    let results: Vec<(&WatchEntry, StockCheck)> = stream::iter(&watchlist.watches)
        .map(|entry| {
            let client = &client;
            let options = &options;
            async move {
                let check = check_page(client, &entry.url, &entry.size, options).await;
                (entry, check)
            }
        })
        .buffer_unordered(max_concurrent)
        .collect()
        .await;

    let mut totals = WatchTotals::default();
    for (entry, check) in &results {
        tracing::info!(
            watch = entry.label(),
            size = %entry.size,
            verdict = %check.verdict,
            detail = %check.detail,
            "check complete"
        );
        if !check.is_decided() {
            tracing::warn!(
                watch = entry.label(),
                url = %entry.url,
                detail = %check.detail,
                "stock could not be determined"
            );
        }
        totals.record(check.verdict);
        report(check, &entry.url, &entry.size, args.output, notifier.as_ref()).await;
    }

    tracing::info!(
        in_stock = totals.in_stock,
        out_of_stock = totals.out_of_stock,
        unknown = totals.unknown,
        "watchlist run complete"
    );
    Ok(())
}
