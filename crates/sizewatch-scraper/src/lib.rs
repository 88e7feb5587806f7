pub mod availability;
pub mod client;
pub mod error;
mod rate_limit;

pub use availability::{
    determine_availability, determine_availability_with, ExtractOptions, UNDETERMINED,
};
pub use client::PageClient;
pub use error::{DecodeError, ScraperError};
