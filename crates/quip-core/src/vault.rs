//! Shared quote vault service used across clients.
//!
//! `QuoteVault` is the single owner of collection access: every mutation goes
//! through it and is persisted immediately. It also holds the ephemeral
//! session state (the last-displayed position within the filtered view),
//! which lives for the process lifetime only.

use std::path::PathBuf;
use std::sync::Arc;

use rand::Rng;
use tokio::sync::Mutex;

use crate::db::{
    Database, LibSqlQuoteRepository, LibSqlSettingsRepository, QuoteRepository,
    SettingsRepository,
};
use crate::error::Result;
use crate::export::{
    parse_import, quote_from_import_item, render_json_export,
};
use crate::models::{default_quotes, Quote, QuoteId};
use crate::reconcile::{collect_pending, dedup_quotes};

/// Result of a successful import.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImportOutcome {
    /// Records accepted from the document.
    pub imported: usize,
    /// Collection size after append and dedup.
    pub collection_len: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct LastShown {
    filter: Option<String>,
    index: usize,
}

#[derive(Debug, Default)]
struct SessionState {
    last_shown: Option<LastShown>,
}

/// Thread-safe service owning the quote collection.
#[derive(Clone)]
pub struct QuoteVault {
    db: Arc<Mutex<Database>>,
    session: Arc<Mutex<SessionState>>,
}

impl QuoteVault {
    /// Open a vault at the given filesystem path, seeding defaults when empty.
    pub async fn open(db_path: impl Into<PathBuf>) -> Result<Self> {
        let db_path = db_path.into();
        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let db = Database::open(&db_path).await?;
        let vault = Self {
            db: Arc::new(Mutex::new(db)),
            session: Arc::new(Mutex::new(SessionState::default())),
        };
        vault.seed_defaults().await?;
        Ok(vault)
    }

    /// Open an in-memory vault (primarily for tests).
    pub async fn open_in_memory() -> Result<Self> {
        let db = Database::open_in_memory().await?;
        let vault = Self {
            db: Arc::new(Mutex::new(db)),
            session: Arc::new(Mutex::new(SessionState::default())),
        };
        vault.seed_defaults().await?;
        Ok(vault)
    }

    async fn seed_defaults(&self) -> Result<()> {
        let db = self.db.lock().await;
        let repo = LibSqlQuoteRepository::new(db.connection());

        if repo.count().await? == 0 {
            for quote in default_quotes() {
                repo.insert(&quote).await?;
            }
            tracing::info!("Seeded default quote collection");
        }
        Ok(())
    }

    /// Validate and append a user-authored quote, pending upload.
    pub async fn add_quote(&self, text: &str, category: &str) -> Result<Quote> {
        let quote = Quote::validated(text, category)?;

        let db = self.db.lock().await;
        let repo = LibSqlQuoteRepository::new(db.connection());
        repo.insert(&quote).await?;

        Ok(quote)
    }

    /// Full collection in insertion order.
    pub async fn quotes(&self) -> Result<Vec<Quote>> {
        let db = self.db.lock().await;
        let repo = LibSqlQuoteRepository::new(db.connection());
        repo.list_all().await
    }

    /// Quotes in one category.
    pub async fn quotes_in_category(&self, category: &str) -> Result<Vec<Quote>> {
        let db = self.db.lock().await;
        let repo = LibSqlQuoteRepository::new(db.connection());
        repo.list_by_category(category).await
    }

    /// Distinct categories with counts.
    pub async fn categories(&self) -> Result<Vec<(String, usize)>> {
        let db = self.db.lock().await;
        let repo = LibSqlQuoteRepository::new(db.connection());
        repo.list_categories().await
    }

    /// The persisted category filter, if any.
    pub async fn category_filter(&self) -> Result<Option<String>> {
        let db = self.db.lock().await;
        let repo = LibSqlSettingsRepository::new(db.connection());
        repo.category_filter().await
    }

    /// Persist or clear the category filter; resets the session memory.
    pub async fn set_category_filter(&self, category: Option<&str>) -> Result<()> {
        {
            let db = self.db.lock().await;
            let repo = LibSqlSettingsRepository::new(db.connection());
            repo.set_category_filter(category).await?;
        }

        let mut session = self.session.lock().await;
        session.last_shown = None;
        Ok(())
    }

    /// The view the active filter selects: one category, or everything.
    pub async fn filtered_quotes(&self) -> Result<Vec<Quote>> {
        match self.category_filter().await? {
            Some(category) => self.quotes_in_category(&category).await,
            None => self.quotes().await,
        }
    }

    /// Pick a random quote from the filtered view and remember its position.
    pub async fn random_quote(&self) -> Result<Option<Quote>> {
        let filter = self.category_filter().await?;
        let view = self.filtered_quotes().await?;

        let mut session = self.session.lock().await;
        if view.is_empty() {
            session.last_shown = None;
            return Ok(None);
        }

        let index = {
            let mut rng = rand::thread_rng();
            rng.gen_range(0..view.len())
        };
        session.last_shown = Some(LastShown {
            filter,
            index,
        });

        Ok(view.get(index).cloned())
    }

    /// The last-displayed quote, if it is still within the current view.
    pub async fn last_shown(&self) -> Result<Option<Quote>> {
        let remembered = {
            let session = self.session.lock().await;
            session.last_shown.clone()
        };

        let Some(last) = remembered else {
            return Ok(None);
        };

        if last.filter != self.category_filter().await? {
            return Ok(None);
        }

        let view = self.filtered_quotes().await?;
        Ok(view.get(last.index).cloned())
    }

    /// Import a JSON document, appending its records and deduplicating.
    ///
    /// An invalid payload is rejected whole and leaves the collection
    /// untouched.
    pub async fn import_json(&self, payload: &str) -> Result<ImportOutcome> {
        let items = parse_import(payload)?;
        let imported = items.len();

        let db = self.db.lock().await;
        let repo = LibSqlQuoteRepository::new(db.connection());

        let mut collection = repo.list_all().await?;
        collection.extend(items.into_iter().map(quote_from_import_item));
        let merged = dedup_quotes(collection);
        repo.replace_all(&merged).await?;

        tracing::info!(imported, total = merged.len(), "Imported quotes");
        Ok(ImportOutcome {
            imported,
            collection_len: merged.len(),
        })
    }

    /// Render the full collection as a pretty-printed JSON document.
    pub async fn export_json(&self) -> Result<String> {
        let quotes = self.quotes().await?;
        Ok(render_json_export(&quotes)?)
    }

    /// Rewrite the collection with a reconciler result.
    pub async fn store_merged(&self, merged: &[Quote]) -> Result<()> {
        let db = self.db.lock().await;
        let repo = LibSqlQuoteRepository::new(db.connection());
        repo.replace_all(merged).await
    }

    /// Records awaiting upload.
    pub async fn pending(&self) -> Result<Vec<Quote>> {
        let quotes = self.quotes().await?;
        Ok(collect_pending(&quotes).into_iter().cloned().collect())
    }

    /// Mark one record as acknowledged by the remote feed.
    pub async fn mark_synced(&self, id: &QuoteId) -> Result<()> {
        let db = self.db.lock().await;
        let repo = LibSqlQuoteRepository::new(db.connection());
        repo.mark_synced(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[tokio::test(flavor = "multi_thread")]
    async fn open_seeds_default_collection_once() {
        let vault = QuoteVault::open_in_memory().await.unwrap();

        let quotes = vault.quotes().await.unwrap();
        assert_eq!(quotes.len(), 5);
        assert!(quotes.iter().all(Quote::is_pending));
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn add_quote_validates_input() {
        let vault = QuoteVault::open_in_memory().await.unwrap();

        let error = vault.add_quote("  ", "Life").await.unwrap_err();
        assert!(matches!(error, Error::InvalidInput(_)));
        assert_eq!(vault.quotes().await.unwrap().len(), 5);

        let quote = vault.add_quote("Fresh", "Life").await.unwrap();
        assert!(quote.is_pending());
        assert_eq!(vault.quotes().await.unwrap().len(), 6);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn random_quote_honors_filter_and_remembers() {
        let vault = QuoteVault::open_in_memory().await.unwrap();
        vault.add_quote("Only one here", "Solo").await.unwrap();
        vault.set_category_filter(Some("Solo")).await.unwrap();

        let shown = vault.random_quote().await.unwrap().unwrap();
        assert_eq!(shown.text, "Only one here");

        let remembered = vault.last_shown().await.unwrap().unwrap();
        assert_eq!(remembered.id, shown.id);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn filter_change_clears_session_memory() {
        let vault = QuoteVault::open_in_memory().await.unwrap();

        vault.random_quote().await.unwrap().unwrap();
        assert!(vault.last_shown().await.unwrap().is_some());

        vault.set_category_filter(Some("Life")).await.unwrap();
        assert!(vault.last_shown().await.unwrap().is_none());
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn random_quote_on_empty_view_is_none() {
        let vault = QuoteVault::open_in_memory().await.unwrap();
        vault.set_category_filter(Some("NoSuchCategory")).await.unwrap();

        assert!(vault.random_quote().await.unwrap().is_none());
        assert!(vault.last_shown().await.unwrap().is_none());
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn import_appends_and_dedups() {
        let vault = QuoteVault::open_in_memory().await.unwrap();

        let outcome = vault
            .import_json(r#"[{"text":"Imported","category":"Books"}]"#)
            .await
            .unwrap();
        assert_eq!(outcome.imported, 1);
        assert_eq!(outcome.collection_len, 6);

        // Importing the same document again collapses the duplicate
        let outcome = vault
            .import_json(r#"[{"text":"Imported","category":"Books"}]"#)
            .await
            .unwrap();
        assert_eq!(outcome.collection_len, 6);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn invalid_import_leaves_collection_untouched() {
        let vault = QuoteVault::open_in_memory().await.unwrap();

        let error = vault.import_json(r#"[{"text":"Q"}]"#).await.unwrap_err();
        assert!(matches!(error, Error::InvalidImport(_)));
        assert_eq!(vault.quotes().await.unwrap().len(), 5);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn export_import_round_trip() {
        let vault = QuoteVault::open_in_memory().await.unwrap();
        vault.add_quote("Round trip", "Testing").await.unwrap();

        let document = vault.export_json().await.unwrap();
        let before = vault.quotes().await.unwrap().len();

        let outcome = vault.import_json(&document).await.unwrap();
        // Every (text, category) key already existed, so dedup collapses all
        assert_eq!(outcome.collection_len, before);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn pending_and_mark_synced_round_trip() {
        let vault = QuoteVault::open_in_memory().await.unwrap();
        let quote = vault.add_quote("Pending one", "Life").await.unwrap();

        let pending = vault.pending().await.unwrap();
        assert!(pending.iter().any(|entry| entry.id == quote.id));

        vault.mark_synced(&quote.id).await.unwrap();
        let pending = vault.pending().await.unwrap();
        assert!(pending.iter().all(|entry| entry.id != quote.id));
    }
}
