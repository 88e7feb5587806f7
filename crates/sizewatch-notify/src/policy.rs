//! When a verdict is printed and when it is pushed to the webhook.
//!
//! Out-of-stock is the quiet, expected state; in-stock and unknown always
//! surface, since both need a human to look.

use sizewatch_core::Verdict;

/// Whether the verdict message goes to stdout.
#[must_use]
pub fn should_print(verdict: Verdict, quiet: bool, always_notify: bool) -> bool {
    always_notify || !quiet || verdict != Verdict::OutOfStock
}

/// Whether the verdict message goes to a configured webhook.
#[must_use]
pub fn should_notify(verdict: Verdict, always_notify: bool) -> bool {
    always_notify || verdict != Verdict::OutOfStock
}
