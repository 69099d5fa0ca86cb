//! Data models for Quip

mod quote;

pub use quote::{default_quotes, Quote, QuoteId};
