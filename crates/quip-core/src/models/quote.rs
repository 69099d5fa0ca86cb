//! Quote model

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::error::{Error, Result};

/// A unique identifier for a quote, using UUID v7 (time-sortable)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct QuoteId(Uuid);

impl QuoteId {
    /// Create a new unique quote ID using UUID v7
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    /// Get the string representation of this ID
    #[must_use]
    pub fn as_str(&self) -> String {
        self.0.to_string()
    }
}

impl Default for QuoteId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for QuoteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for QuoteId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// A quote in the collection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quote {
    /// Unique identifier
    pub id: QuoteId,
    /// The quotable content
    pub text: String,
    /// Free-text category label
    pub category: String,
    /// True once the remote feed has acknowledged this quote
    pub synced: bool,
    /// Creation timestamp (Unix ms)
    pub created_at: i64,
}

impl Quote {
    /// Create a new locally-authored quote, pending upload
    #[must_use]
    pub fn new(text: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            id: QuoteId::new(),
            text: text.into(),
            category: category.into(),
            synced: false,
            created_at: chrono::Utc::now().timestamp_millis(),
        }
    }

    /// Create a quote from user input, rejecting empty text or category
    pub fn validated(text: &str, category: &str) -> Result<Self> {
        let text = text.trim();
        let category = category.trim();

        if text.is_empty() {
            return Err(Error::InvalidInput("quote text cannot be empty".into()));
        }
        if category.is_empty() {
            return Err(Error::InvalidInput(
                "quote category cannot be empty".into(),
            ));
        }

        Ok(Self::new(text, category))
    }

    /// Create a quote from a remote feed record, already acknowledged
    #[must_use]
    pub fn from_remote(text: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            synced: true,
            ..Self::new(text, category)
        }
    }

    /// The `(text, category)` pair the reconciler matches records on.
    ///
    /// Two distinct real-world quotes with identical text and category
    /// collapse into one record during reconciliation.
    #[must_use]
    pub fn merge_key(&self) -> (&str, &str) {
        (&self.text, &self.category)
    }

    /// True when this quote has not yet been acknowledged by the remote feed
    #[must_use]
    pub const fn is_pending(&self) -> bool {
        !self.synced
    }
}

/// Seed collection installed on first open of an empty store
#[must_use]
pub fn default_quotes() -> Vec<Quote> {
    [
        (
            "The only way to do great work is to love what you do.",
            "Inspiration",
        ),
        (
            "Innovation distinguishes between a leader and a follower.",
            "Business",
        ),
        ("Strive not to be a success, but rather to be of value.", "Life"),
        (
            "The future belongs to those who believe in the beauty of their dreams.",
            "Dreams",
        ),
        ("The mind is everything. What you think you become.", "Philosophy"),
    ]
    .into_iter()
    .map(|(text, category)| Quote::new(text, category))
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quote_id_unique() {
        let id1 = QuoteId::new();
        let id2 = QuoteId::new();
        assert_ne!(id1, id2);
    }

    #[test]
    fn test_quote_id_parse() {
        let id = QuoteId::new();
        let parsed: QuoteId = id.as_str().parse().unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn test_quote_new_is_pending() {
        let quote = Quote::new("Stay hungry", "Inspiration");
        assert_eq!(quote.text, "Stay hungry");
        assert_eq!(quote.category, "Inspiration");
        assert!(quote.is_pending());
        assert!(quote.created_at > 0);
    }

    #[test]
    fn test_from_remote_is_synced() {
        let quote = Quote::from_remote("Fetched", "remote-1");
        assert!(quote.synced);
        assert!(!quote.is_pending());
    }

    #[test]
    fn test_validated_trims_input() {
        let quote = Quote::validated("  Stay hungry  ", " Inspiration ").unwrap();
        assert_eq!(quote.text, "Stay hungry");
        assert_eq!(quote.category, "Inspiration");
    }

    #[test]
    fn test_validated_rejects_empty_text() {
        assert!(Quote::validated("  ", "Life").is_err());
        assert!(Quote::validated("Text", " \t ").is_err());
    }

    #[test]
    fn test_merge_key() {
        let a = Quote::new("Same", "Key");
        let b = Quote::from_remote("Same", "Key");
        assert_eq!(a.merge_key(), b.merge_key());
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_default_quotes_seed() {
        let defaults = default_quotes();
        assert_eq!(defaults.len(), 5);
        assert!(defaults.iter().all(Quote::is_pending));
        assert_eq!(defaults[0].category, "Inspiration");
    }
}
