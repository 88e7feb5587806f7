//! Structured-data extraction from raw page markup.
//!
//! Two sources, in this order:
//! 1. `<script type="application/ld+json">` blocks.
//! 2. Balanced `{...}` regions inside any `<script>` whose text mentions an
//!    offer/availability keyword (inline state blobs, analytics payloads).
//!
//! Every decode attempt yields its own `Result` so a broken fragment never
//! hides the others.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

use super::ExtractOptions;
use crate::error::DecodeError;

/// One decoded structured-data fragment. No shape is guaranteed.
pub type RawBlock = Value;

static SCRIPT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)<script\b([^>]*)>(.*?)</script\s*>").expect("valid regex")
});
static LD_JSON_TYPE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)\btype\s*=\s*["']?application/ld\+json"#).expect("valid regex")
});
static OFFER_KEYWORD_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)availability|inStock|availabilityStatus|offers|variants|sku|size|inventory")
        .expect("valid regex")
});

/// Extracts every structured-data fragment from `markup`: ld+json blocks
/// first, then embedded script blobs (when enabled), each in document order.
#[must_use]
pub fn extract_blocks(
    markup: &str,
    options: &ExtractOptions,
) -> Vec<Result<RawBlock, DecodeError>> {
    let mut blocks = extract_ld_json_blocks(markup);
    if options.enable_embedded_blob_scan {
        blocks.extend(extract_embedded_blobs(markup, options.max_script_bytes));
    }
    blocks
}

/// Decodes every `application/ld+json` script. A top-level array contributes
/// each of its objects; a top-level object contributes itself.
pub(crate) fn extract_ld_json_blocks(markup: &str) -> Vec<Result<RawBlock, DecodeError>> {
    let mut blocks = Vec::new();

    let ld_scripts = SCRIPT_RE
        .captures_iter(markup)
        .filter(|cap| cap.get(1).is_some_and(|m| LD_JSON_TYPE_RE.is_match(m.as_str())))
        .filter_map(|cap| cap.get(2));

    for (n, body) in ld_scripts.enumerate() {
        match serde_json::from_str::<Value>(body.as_str().trim()) {
            Ok(Value::Array(items)) => {
                blocks.extend(items.into_iter().filter(Value::is_object).map(Ok));
            }
            Ok(obj @ Value::Object(_)) => blocks.push(Ok(obj)),
            Ok(_) => {}
            Err(source) => blocks.push(Err(DecodeError {
                origin: format!("ld+json block {n}"),
                source,
            })),
        }
    }

    blocks
}

/// Decodes keyword-bearing `{...}` regions from script bodies.
///
/// Scripts larger than `max_script_bytes` are skipped.
pub(crate) fn extract_embedded_blobs(
    markup: &str,
    max_script_bytes: usize,
) -> Vec<Result<RawBlock, DecodeError>> {
    let mut blocks = Vec::new();

    for (n, cap) in SCRIPT_RE.captures_iter(markup).enumerate() {
        let Some(body) = cap.get(2).map(|m| m.as_str()) else {
            continue;
        };
        if !body.contains('{') || !OFFER_KEYWORD_RE.is_match(body) {
            continue;
        }
        if body.len() > max_script_bytes {
            tracing::debug!(
                script = n,
                bytes = body.len(),
                max_script_bytes,
                "script too large for blob scan; skipping"
            );
            continue;
        }

        for (r, region) in balanced_brace_regions(body).into_iter().enumerate() {
            if !OFFER_KEYWORD_RE.is_match(region) {
                continue;
            }
            blocks.push(decode_blob(region, || format!("script {n} blob {r}")));
        }
    }

    blocks
}

/// Strict JSON first; then one repair pass swapping single quotes for double
/// quotes, which covers JS object literals written with `'...'` strings.
fn decode_blob(text: &str, origin: impl Fn() -> String) -> Result<RawBlock, DecodeError> {
    serde_json::from_str(text)
        .or_else(|_| serde_json::from_str(&text.replace('\'', "\"")))
        .map_err(|source| DecodeError {
            origin: origin(),
            source,
        })
}

/// Returns every maximal balanced `{...}` region of `text` in document order.
///
/// Single pass with a stack of open braces, so cost is linear in the input
/// regardless of nesting. Braces inside double-quoted strings of an open
/// region are ignored. When an outer `{` never closes, the regions that did
/// close inside it are returned instead. Stray `}` at depth zero are skipped.
pub(crate) fn balanced_brace_regions(text: &str) -> Vec<&str> {
    struct Open {
        start: usize,
        closed_inside: Vec<(usize, usize)>,
    }

    let mut stack: Vec<Open> = Vec::new();
    let mut regions: Vec<(usize, usize)> = Vec::new();
    let mut in_string = false;
    let mut escape = false;

    // Byte scan is safe: `{`, `}`, `"` and `\` never occur inside a
    // multi-byte UTF-8 sequence.
    for (i, b) in text.bytes().enumerate() {
        if in_string {
            if escape {
                escape = false;
            } else if b == b'\\' {
                escape = true;
            } else if b == b'"' {
                in_string = false;
            }
            continue;
        }
        match b {
            b'"' if !stack.is_empty() => in_string = true,
            b'{' => stack.push(Open {
                start: i,
                closed_inside: Vec::new(),
            }),
            b'}' => {
                if let Some(open) = stack.pop() {
                    let region = (open.start, i + 1);
                    match stack.last_mut() {
                        Some(parent) => parent.closed_inside.push(region),
                        None => regions.push(region),
                    }
                }
            }
            _ => {}
        }
    }

    for open in stack {
        regions.extend(open.closed_inside);
    }
    regions.sort_unstable_by_key(|&(start, _)| start);

    regions.into_iter().map(|(s, e)| &text[s..e]).collect()
}
