//! Availability pipeline: decides whether one size on a product page can be
//! bought.
//!
//! Structured data is tried first (ld+json and embedded script blobs,
//! flattened and grouped into per-variant records), then phrase heuristics
//! over the visible text. Every step is a pure function of the markup and
//! the size label; malformed input can only ever produce
//! [`Verdict::Unknown`](sizewatch_core::Verdict::Unknown).

pub mod blocks;
pub mod correlate;
pub mod flatten;
pub mod interpret;
pub mod text;

use sizewatch_core::StockCheck;

pub use blocks::{extract_blocks, RawBlock};
pub use correlate::{collect_size_records, find_size_records, CandidateRecord};
pub use flatten::{flatten, FlatRecord, Scalar};
pub use interpret::interpret_availability;
pub use text::{fallback_text, render_text, text_hints};

/// Detail reported when neither strategy reaches a decision.
pub const UNDETERMINED: &str = "could not determine";

/// Knobs for structured-data extraction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractOptions {
    /// Scan ordinary `<script>` bodies for embedded `{...}` blobs in addition
    /// to ld+json blocks.
    pub enable_embedded_blob_scan: bool,
    /// Scripts longer than this are not blob-scanned.
    pub max_script_bytes: usize,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            enable_embedded_blob_scan: true,
            max_script_bytes: 5 * 1024 * 1024,
        }
    }
}

enum Stage {
    TryStructured,
    TryText,
    Done(StockCheck),
}

/// Decides stock status for `target_size` on the page `markup`, using
/// default extraction options.
#[must_use]
pub fn determine_availability(markup: &str, target_size: &str) -> StockCheck {
    determine_availability_with(markup, target_size, &ExtractOptions::default())
}

/// Decides stock status for `target_size` on the page `markup`.
///
/// Structured data first, then the text fallback. Returns
/// [`UNDETERMINED`] as an unknown verdict when neither decides.
#[must_use]
pub fn determine_availability_with(
    markup: &str,
    target_size: &str,
    options: &ExtractOptions,
) -> StockCheck {
    let mut stage = Stage::TryStructured;
    loop {
        stage = match stage {
            Stage::TryStructured => {
                match structured_availability(markup, target_size, options) {
                    Some(check) => {
                        tracing::debug!(
                            size = target_size,
                            detail = %check.detail,
                            "structured data decided"
                        );
                        Stage::Done(check)
                    }
                    None => Stage::TryText,
                }
            }
            Stage::TryText => {
                let text = render_text(markup);
                match fallback_text(&text, target_size) {
                    Some(check) => {
                        tracing::debug!(
                            size = target_size,
                            detail = %check.detail,
                            "text fallback decided"
                        );
                        Stage::Done(check)
                    }
                    None => {
                        if tracing::enabled!(tracing::Level::DEBUG) {
                            tracing::debug!(
                                size = target_size,
                                candidates = ?text_hints(markup),
                                "no stock signal found"
                            );
                        }
                        Stage::Done(StockCheck::unknown(UNDETERMINED))
                    }
                }
            }
            Stage::Done(check) => return check,
        };
    }
}

/// Structured-data path only: extract, flatten, correlate, interpret.
///
/// Fragments that fail to decode are logged and dropped here. Candidate
/// records are de-duplicated across all fragments of the page.
#[must_use]
pub fn structured_availability(
    markup: &str,
    target_size: &str,
    options: &ExtractOptions,
) -> Option<StockCheck> {
    let mut records = Vec::new();
    let mut decoded = 0usize;
    let mut discarded = 0usize;

    for block in extract_blocks(markup, options) {
        match block {
            Ok(value) => {
                decoded += 1;
                collect_size_records(&flatten(&value), &mut records);
            }
            Err(e) => {
                discarded += 1;
                tracing::debug!(error = %e, "discarding structured-data fragment");
            }
        }
    }

    tracing::debug!(
        decoded,
        discarded,
        candidate_records = records.len(),
        "structured extraction finished"
    );

    interpret_availability(&records, target_size)
}

#[cfg(test)]
mod tests {
    use sizewatch_core::Verdict;

    use super::*;

    fn ld(json: &str) -> String {
        format!(r#"<script type="application/ld+json">{json}</script>"#)
    }

    #[test]
    fn structured_decision_short_circuits_text() {
        let html = format!(
            "{}<p>Large sold out</p>",
            ld(r#"{"offers":[{"size":"Large","availability":"InStock"}]}"#)
        );
        assert_eq!(
            determine_availability(&html, "Large"),
            StockCheck::in_stock("InStock")
        );
    }

    #[test]
    fn falls_through_to_text_when_size_absent_from_records() {
        let html = format!(
            "{}<p>Size Large Sold Out</p>",
            ld(r#"{"offers":[{"size":"Small","availability":"InStock"}]}"#)
        );
        assert_eq!(
            determine_availability(&html, "Large"),
            StockCheck::out_of_stock("text: out of stock")
        );
    }

    #[test]
    fn unknown_when_nothing_decides() {
        let check = determine_availability("<p>Hello</p>", "Medium");
        assert_eq!(check.verdict, Verdict::Unknown);
        assert_eq!(check.detail, UNDETERMINED);
    }

    #[test]
    fn empty_markup_is_unknown() {
        assert_eq!(determine_availability("", "M").verdict, Verdict::Unknown);
    }

    #[test]
    fn garbage_markup_never_panics() {
        let inputs = [
            "<script type=\"application/ld+json\">{{{{</script>",
            "<script>{'size': }}}{{</script>",
            "<script",
            "}}}}{{{{\"\\",
            "<script>var x = {\"size\": \"\u{1F455}\", \"stock\": \"é\"}</script>",
        ];
        for input in inputs {
            let _ = determine_availability(input, "L");
        }
    }

    #[test]
    fn embedded_blob_decides_when_enabled() {
        let html =
            r#"<script>window.product = {"variants":[{"size":"M","inStock":true}]};</script>"#;
        assert_eq!(
            determine_availability(html, "M"),
            StockCheck::in_stock("true")
        );

        let disabled = ExtractOptions {
            enable_embedded_blob_scan: false,
            ..ExtractOptions::default()
        };
        assert_eq!(
            determine_availability_with(html, "M", &disabled).verdict,
            Verdict::Unknown
        );
    }

    #[test]
    fn records_are_shared_across_fragments() {
        // The same offer appears in ld+json and, through the blob scan, again
        // from the ld+json script body; the duplicate must not matter.
        let html = ld(r#"{"offers":[{"size":"S","availability":"SoldOut"}]}"#);
        assert_eq!(
            structured_availability(&html, "S", &ExtractOptions::default()),
            Some(StockCheck::out_of_stock("SoldOut"))
        );
    }
}
