//! Single-page check: fetch, decide, print, notify.

use sizewatch_core::{AppConfig, StockCheck};
use sizewatch_notify::{format_message, should_notify, should_print, WebhookNotifier};
use sizewatch_scraper::{determine_availability_with, ExtractOptions, PageClient};

use crate::{CheckArgs, OutputArgs};

/// Detail reported when the page could not be fetched.
pub(crate) const FETCH_FAILED: &str = "fetch failed";

pub(crate) fn build_page_client(config: &AppConfig) -> anyhow::Result<PageClient> {
    PageClient::new(
        config.request_timeout_secs,
        &config.user_agent,
        &config.accept_language,
        config.max_retries,
        config.retry_backoff_base_secs,
    )
    .map_err(|e| anyhow::anyhow!("failed to build page client: {e}"))
}

/// Builds a notifier for `webhook_url`, if there is one. Blank URLs count as
/// unset.
pub(crate) fn build_notifier(
    webhook_url: Option<&str>,
    config: &AppConfig,
) -> anyhow::Result<Option<WebhookNotifier>> {
    let Some(url) = webhook_url.map(str::trim).filter(|u| !u.is_empty()) else {
        return Ok(None);
    };
    let notifier = WebhookNotifier::new(url, &config.webhook_username, config.webhook_timeout_secs)
        .map_err(|e| anyhow::anyhow!("failed to build webhook notifier: {e}"))?;
    Ok(Some(notifier))
}

/// The `--webhook` flag (or its env var) wins over the configured webhook,
/// which also picks up `.env` values.
pub(crate) fn resolve_webhook<'a>(
    flag: Option<&'a str>,
    config: &'a AppConfig,
) -> Option<&'a str> {
    flag.or(config.webhook_url.as_deref())
}

pub(crate) fn extract_options(config: &AppConfig, no_embedded_scan: bool) -> ExtractOptions {
    ExtractOptions {
        enable_embedded_blob_scan: config.enable_embedded_blob_scan && !no_embedded_scan,
        max_script_bytes: config.max_script_bytes,
    }
}

/// Fetches `url` and decides availability of `size` on it.
///
/// Never fails: an unreachable page is an unknown verdict.
pub(crate) async fn check_page(
    client: &PageClient,
    url: &str,
    size: &str,
    options: &ExtractOptions,
) -> StockCheck {
    let markup = client.fetch_or_empty(url).await;
    if markup.is_empty() {
        return StockCheck::unknown(FETCH_FAILED);
    }
    determine_availability_with(&markup, size, options)
}

/// Prints and sends the verdict according to the output flags.
pub(crate) async fn report(
    check: &StockCheck,
    url: &str,
    size: &str,
    output: OutputArgs,
    notifier: Option<&WebhookNotifier>,
) {
    let message = format_message(check, url, size);

    if should_print(check.verdict, output.quiet, output.always_notify) {
        println!("{message}");
    }

    if let Some(notifier) = notifier {
        if should_notify(check.verdict, output.always_notify) {
            notifier.notify_best_effort(&message).await;
        }
    }
}

/// Runs the `check` command.
///
/// # Errors
///
/// Only setup failures (HTTP client construction) are returned; fetch,
/// parse, and webhook failures end up in the verdict or the log.
pub(crate) async fn run_check(config: &AppConfig, args: &CheckArgs) -> anyhow::Result<()> {
    let client = build_page_client(config)?;
    let notifier = build_notifier(resolve_webhook(args.webhook.as_deref(), config), config)?;
    let options = extract_options(config, args.no_embedded_scan);

    let check = check_page(&client, &args.url, &args.size, &options).await;
    tracing::info!(
        url = %args.url,
        size = %args.size,
        verdict = %check.verdict,
        detail = %check.detail,
        "check complete"
    );

    report(&check, &args.url, &args.size, args.output, notifier.as_ref()).await;
    Ok(())
}

#[cfg(test)]
#[path = "check_test.rs"]
mod tests;
