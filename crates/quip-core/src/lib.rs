//! quip-core - Core library for Quip
//!
//! This crate contains the quote models, storage layer, reconciler, and sync
//! engine shared by all Quip interfaces.

pub mod db;
pub mod error;
pub mod export;
pub mod models;
pub mod reconcile;
pub mod remote;
pub mod sync;
pub mod vault;

pub use error::{Error, Result};
pub use models::{Quote, QuoteId};
pub use vault::QuoteVault;
