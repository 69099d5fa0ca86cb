use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] quip_core::Error),
    #[error(transparent)]
    Remote(#[from] quip_core::remote::RemoteError),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),
    #[error("No quote text provided")]
    EmptyQuoteText,
    #[error("Quote category cannot be empty")]
    EmptyCategory,
    #[error("Sync interval must be at least 1 second")]
    InvalidInterval,
}
