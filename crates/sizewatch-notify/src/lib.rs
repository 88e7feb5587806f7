//! Verdict reporting: message text, print/notify policy, and the webhook
//! sender.

pub mod error;
pub mod message;
pub mod policy;
pub mod webhook;

pub use error::NotifyError;
pub use message::format_message;
pub use policy::{should_notify, should_print};
pub use webhook::WebhookNotifier;
