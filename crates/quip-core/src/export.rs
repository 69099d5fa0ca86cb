//! Shared quote import/export helpers.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::models::Quote;

/// Suggested file name for exported collections.
pub const EXPORT_FILE_NAME: &str = "quotes.json";

/// Wire representation of a quote in import/export documents.
///
/// `synced` is optional on import so any plain `{text, category}` array is
/// accepted; ids are regenerated on import.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportQuote {
    pub text: String,
    pub category: String,
    #[serde(default)]
    pub synced: bool,
}

/// Convert a quote into its wire representation.
#[must_use]
pub fn quote_to_export_item(quote: &Quote) -> ExportQuote {
    ExportQuote {
        text: quote.text.clone(),
        category: quote.category.clone(),
        synced: quote.synced,
    }
}

/// Materialize an imported wire record as a fresh quote.
#[must_use]
pub fn quote_from_import_item(item: ExportQuote) -> Quote {
    Quote {
        synced: item.synced,
        ..Quote::new(item.text, item.category)
    }
}

/// Render the collection as pretty-printed JSON.
pub fn render_json_export(quotes: &[Quote]) -> serde_json::Result<String> {
    let items = quotes
        .iter()
        .map(quote_to_export_item)
        .collect::<Vec<ExportQuote>>();
    serde_json::to_string_pretty(&items)
}

/// Parse and validate an import document.
///
/// The payload must be a JSON array where every element is a non-null object
/// with at least `text` and `category` keys; anything else is rejected whole,
/// with no partial result.
pub fn parse_import(payload: &str) -> Result<Vec<ExportQuote>> {
    serde_json::from_str::<Vec<ExportQuote>>(payload)
        .map_err(|error| Error::InvalidImport(format!("invalid quotes JSON: {error}")))
}
