use sizewatch_core::{StockCheck, Verdict};

/// Renders the one-message summary of a check: a verdict line followed by
/// the page URL.
#[must_use]
pub fn format_message(check: &StockCheck, url: &str, size: &str) -> String {
    let detail = &check.detail;
    match check.verdict {
        Verdict::InStock => format!("✅ Size {size} appears IN STOCK ({detail})\n{url}"),
        Verdict::OutOfStock => format!("❌ Size {size} appears OUT OF STOCK ({detail})\n{url}"),
        Verdict::Unknown => format!("⚠️ Could not determine stock for {size} ({detail})\n{url}"),
    }
}
