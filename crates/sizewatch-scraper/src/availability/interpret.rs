//! Decides stock status for one size from candidate records.

use std::sync::LazyLock;

use regex::Regex;
use sizewatch_core::StockCheck;

use super::correlate::CandidateRecord;

const SIZE_FIELD_TOKENS: [&str; 4] = ["size", "label", "variant", "name"];
const QUANTITY_FIELD_TOKENS: [&str; 2] = ["qty", "quantity"];
const AVAILABILITY_FIELD_TOKENS: [&str; 8] = [
    "avail",
    "in_stock",
    "instock",
    "stock",
    "isavailable",
    "inventory",
    "availabilitystatus",
    "status",
];

const TRUTHY: [&str; 9] = [
    "true",
    "in stock",
    "instock",
    "available",
    "yes",
    "in_stock",
    "in-stock",
    "availableforpurchase",
    "ok",
];
const FALSY: [&str; 8] = [
    "false",
    "out of stock",
    "outofstock",
    "unavailable",
    "no",
    "soldout",
    "sold out",
    "notavailable",
];

static TRUTHY_PHRASE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)in\s*stock|available|ok|true").expect("valid regex"));
static FALSY_PHRASE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)out\s*of\s*stock|sold\s*out|unavailable|false").expect("valid regex")
});

/// Walks `records` in order and returns the first decision for
/// `target_size`, or `None` when no record both matches the size and carries
/// a usable stock signal.
///
/// Within a matching record a positive quantity beats any status text.
#[must_use]
pub fn interpret_availability(
    records: &[CandidateRecord],
    target_size: &str,
) -> Option<StockCheck> {
    let target = target_size.trim().to_lowercase();
    if target.is_empty() {
        return None;
    }
    let word_re = whole_word_regex(&target)?;

    for record in records {
        // Keys are matched on the full lower-cased path; values are trimmed
        // text.
        let fields: Vec<(String, String)> = record
            .iter()
            .map(|(k, v)| (k.to_lowercase(), v.as_text().trim().to_owned()))
            .collect();

        let size_match = values_for(&fields, &SIZE_FIELD_TOKENS)
            .any(|sv| sv.to_lowercase() == target || word_re.is_match(sv));
        if !size_match {
            continue;
        }

        if let Some(qty) =
            values_for(&fields, &QUANTITY_FIELD_TOKENS).find(|q| is_positive_count(q))
        {
            tracing::debug!(
                size = target_size,
                quantity = qty,
                "positive quantity for size"
            );
            return Some(StockCheck::in_stock(format!("quantity={qty}")));
        }

        for value in values_for(&fields, &AVAILABILITY_FIELD_TOKENS) {
            if let Some(in_stock) = classify_status(value) {
                tracing::debug!(
                    size = target_size,
                    status = value,
                    in_stock,
                    "status value for size"
                );
                return Some(StockCheck::from_signal(in_stock, value));
            }
        }
    }

    None
}

/// Case-insensitive whole-word matcher for `target`, so `"l"` matches
/// `"Size: L"` but not `"XL"`.
pub(crate) fn whole_word_regex(target: &str) -> Option<Regex> {
    match Regex::new(&format!(r"(?i)\b{}\b", regex::escape(target))) {
        Ok(re) => Some(re),
        Err(e) => {
            tracing::debug!(target, error = %e, "size label does not form a valid pattern");
            None
        }
    }
}

fn values_for<'a>(
    fields: &'a [(String, String)],
    tokens: &'a [&'a str],
) -> impl Iterator<Item = &'a str> {
    fields
        .iter()
        .filter(|(k, _)| tokens.iter().any(|tok| k.contains(tok)))
        .map(|(_, v)| v.as_str())
}

/// A digit-only string with a non-zero value. Signs and decimals are not
/// counts.
fn is_positive_count(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit()) && s.bytes().any(|b| b != b'0')
}

/// Maps a status value to in-stock (`true`) or out-of-stock (`false`).
///
/// The positive vocabulary and phrases are tried before the negative ones,
/// so a value such as `unavailable` reads as in stock through its
/// `available` substring.
fn classify_status(value: &str) -> Option<bool> {
    let lower = value.to_lowercase();
    if TRUTHY.contains(&lower.as_str()) || TRUTHY_PHRASE_RE.is_match(&lower) {
        return Some(true);
    }
    if FALSY.contains(&lower.as_str()) || FALSY_PHRASE_RE.is_match(&lower) {
        return Some(false);
    }
    None
}
