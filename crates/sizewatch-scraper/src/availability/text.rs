//! Last-resort phrase heuristics over the page's visible text.

use std::sync::LazyLock;

use regex::Regex;
use sizewatch_core::StockCheck;

static HIDDEN_ELEMENT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?is)<script\b[^>]*>.*?</script\s*>|<style\b[^>]*>.*?</style\s*>|<template\b[^>]*>.*?</template\s*>|<!--.*?-->",
    )
    .expect("valid regex")
});
static TAG_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]*>").expect("valid regex"));

static ADD_TO_CART_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)add to bag|add to cart").expect("valid regex"));
static SOLD_OUT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)out of stock|sold out|unavailable").expect("valid regex"));
static HINT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)in stock|out of stock|add to bag|size").expect("valid regex")
});

const MAX_HINTS: usize = 15;
const HINT_CHARS: usize = 80;

/// Visible text of `markup`, lower-cased, with whitespace collapsed.
///
/// Script, style and template bodies and comments are dropped; tags become
/// word breaks so `<li>S</li><li>M</li>` reads as `s m`.
#[must_use]
pub fn render_text(markup: &str) -> String {
    let visible = HIDDEN_ELEMENT_RE.replace_all(markup, " ");
    let text = TAG_RE.replace_all(&visible, " ");
    decode_entities(&text)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Phrase checks against rendered page text, most specific first:
///
/// 1. size then a sold-out phrase right after it
/// 2. size then an add-to-cart or availability phrase anywhere later
/// 3. an add-to-cart phrase anywhere
/// 4. a sold-out phrase anywhere
///
/// Returns `None` when nothing matches. The size-specific rules are skipped
/// for a blank size label.
#[must_use]
pub fn fallback_text(text: &str, target_size: &str) -> Option<StockCheck> {
    let target = target_size.trim().to_lowercase();

    if !target.is_empty() {
        let size = regex::escape(&target);
        let size_sold_out = Regex::new(&format!(
            r"(?i)\b{size}\b\s*[-–—:]?\s*(?:out of stock|sold out|unavailable)"
        ));
        let size_then_buyable = Regex::new(&format!(
            r"(?is)\b{size}\b.*(?:add to bag|add to cart|in stock|available)"
        ));

        match (size_sold_out, size_then_buyable) {
            (Ok(sold_out), Ok(buyable)) => {
                if sold_out.is_match(text) {
                    return Some(StockCheck::out_of_stock("text: out of stock"));
                }
                if buyable.is_match(text) {
                    return Some(StockCheck::in_stock("text: likely in stock"));
                }
            }
            (Err(e), _) | (_, Err(e)) => {
                tracing::debug!(size = target_size, error = %e, "skipping size phrase checks");
            }
        }
    }

    if ADD_TO_CART_RE.is_match(text) {
        return Some(StockCheck::in_stock("text: add to bag found"));
    }
    if SOLD_OUT_RE.is_match(text) {
        return Some(StockCheck::out_of_stock("text: global out of stock"));
    }
    None
}

/// Short visible-text snippets that mention stock or size, for debugging
/// pages where nothing could be decided.
#[must_use]
pub fn text_hints(markup: &str) -> Vec<String> {
    let visible = HIDDEN_ELEMENT_RE.replace_all(markup, "<>");
    TAG_RE
        .split(&visible)
        .map(|node| decode_entities(node.trim()))
        .filter(|node| !node.is_empty() && HINT_RE.is_match(node))
        .take(MAX_HINTS)
        .map(|node| node.chars().take(HINT_CHARS).collect())
        .collect()
}

/// Decodes the handful of entities common in storefront copy. `&amp;` goes
/// last so `&amp;lt;` stays `&lt;`.
fn decode_entities(value: &str) -> String {
    value
        .replace("&nbsp;", " ")
        .replace("&#160;", " ")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&#x27;", "'")
        .replace("&ndash;", "–")
        .replace("&mdash;", "—")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&amp;", "&")
}
