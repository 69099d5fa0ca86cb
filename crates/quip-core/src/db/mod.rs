//! Storage layer for Quip

mod connection;
mod migrations;
mod repository;
mod settings_repository;

pub use connection::Database;
pub use repository::{LibSqlQuoteRepository, QuoteRepository};
pub use settings_repository::{LibSqlSettingsRepository, SettingsRepository};
