//! Quote repository implementation

#![allow(clippy::cast_possible_wrap)] // SQLite stores positions as i64

use crate::error::{Error, Result};
use crate::models::{Quote, QuoteId};
use libsql::{params, Connection, Row};

/// Trait for quote storage operations (async)
#[allow(async_fn_in_trait)]
pub trait QuoteRepository {
    /// Append a quote at the end of the collection order
    async fn insert(&self, quote: &Quote) -> Result<()>;

    /// Full collection in position order
    async fn list_all(&self) -> Result<Vec<Quote>>;

    /// Quotes in one category, position order
    async fn list_by_category(&self, category: &str) -> Result<Vec<Quote>>;

    /// Distinct categories with quote counts, alphabetical
    async fn list_categories(&self) -> Result<Vec<(String, usize)>>;

    /// Mark one quote as acknowledged by the remote feed
    async fn mark_synced(&self, id: &QuoteId) -> Result<()>;

    /// Rewrite the whole collection in the given order
    async fn replace_all(&self, quotes: &[Quote]) -> Result<()>;

    /// Number of quotes in the collection
    async fn count(&self) -> Result<usize>;
}

/// libSQL implementation of `QuoteRepository`
pub struct LibSqlQuoteRepository<'a> {
    conn: &'a Connection,
}

impl<'a> LibSqlQuoteRepository<'a> {
    /// Create a new repository with the given connection
    pub const fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// Parse a quote from a database row
    fn parse_quote(row: &Row) -> Result<Quote> {
        let id: String = row.get(0)?;
        Ok(Quote {
            id: id
                .parse()
                .map_err(|_| Error::Database(format!("invalid quote id in store: {id}")))?,
            text: row.get(1)?,
            category: row.get(2)?,
            synced: row.get::<i32>(3)? != 0,
            created_at: row.get(4)?,
        })
    }

    async fn collect_quotes(&self, mut rows: libsql::Rows) -> Result<Vec<Quote>> {
        let mut quotes = Vec::new();
        while let Some(row) = rows.next().await? {
            quotes.push(Self::parse_quote(&row)?);
        }
        Ok(quotes)
    }

    async fn next_position(&self) -> Result<i64> {
        let mut rows = self
            .conn
            .query("SELECT COALESCE(MAX(position) + 1, 0) FROM quotes", ())
            .await?;

        if let Some(row) = rows.next().await? {
            Ok(row.get(0)?)
        } else {
            Ok(0)
        }
    }
}

impl QuoteRepository for LibSqlQuoteRepository<'_> {
    async fn insert(&self, quote: &Quote) -> Result<()> {
        let position = self.next_position().await?;

        self.conn
            .execute(
                "INSERT INTO quotes (id, text, category, synced, created_at, position)
                 VALUES (?, ?, ?, ?, ?, ?)",
                params![
                    quote.id.as_str(),
                    quote.text.as_str(),
                    quote.category.as_str(),
                    i64::from(quote.synced),
                    quote.created_at,
                    position
                ],
            )
            .await?;

        Ok(())
    }

    async fn list_all(&self) -> Result<Vec<Quote>> {
        let rows = self
            .conn
            .query(
                "SELECT id, text, category, synced, created_at
                 FROM quotes
                 ORDER BY position ASC",
                (),
            )
            .await?;

        self.collect_quotes(rows).await
    }

    async fn list_by_category(&self, category: &str) -> Result<Vec<Quote>> {
        let rows = self
            .conn
            .query(
                "SELECT id, text, category, synced, created_at
                 FROM quotes
                 WHERE category = ?
                 ORDER BY position ASC",
                params![category],
            )
            .await?;

        self.collect_quotes(rows).await
    }

    async fn list_categories(&self) -> Result<Vec<(String, usize)>> {
        let mut rows = self
            .conn
            .query(
                "SELECT category, COUNT(*) AS count
                 FROM quotes
                 GROUP BY category
                 ORDER BY category COLLATE NOCASE ASC",
                (),
            )
            .await?;

        let mut categories = Vec::new();
        while let Some(row) = rows.next().await? {
            let name: String = row.get(0)?;
            let count: i64 = row.get(1)?;
            categories.push((name, usize::try_from(count).unwrap_or(0)));
        }

        Ok(categories)
    }

    async fn mark_synced(&self, id: &QuoteId) -> Result<()> {
        let rows = self
            .conn
            .execute(
                "UPDATE quotes SET synced = 1 WHERE id = ?",
                params![id.as_str()],
            )
            .await?;

        if rows == 0 {
            return Err(Error::NotFound(id.to_string()));
        }

        Ok(())
    }

    async fn replace_all(&self, quotes: &[Quote]) -> Result<()> {
        self.conn.execute("BEGIN TRANSACTION", ()).await?;

        if let Err(e) = self.conn.execute("DELETE FROM quotes", ()).await {
            self.conn.execute("ROLLBACK", ()).await.ok();
            return Err(e.into());
        }

        for (position, quote) in quotes.iter().enumerate() {
            let result = self
                .conn
                .execute(
                    "INSERT INTO quotes (id, text, category, synced, created_at, position)
                     VALUES (?, ?, ?, ?, ?, ?)",
                    params![
                        quote.id.as_str(),
                        quote.text.as_str(),
                        quote.category.as_str(),
                        i64::from(quote.synced),
                        quote.created_at,
                        position as i64
                    ],
                )
                .await;

            if let Err(e) = result {
                self.conn.execute("ROLLBACK", ()).await.ok();
                return Err(e.into());
            }
        }

        if let Err(e) = self.conn.execute("COMMIT", ()).await {
            self.conn.execute("ROLLBACK", ()).await.ok();
            return Err(e.into());
        }

        Ok(())
    }

    async fn count(&self) -> Result<usize> {
        let mut rows = self.conn.query("SELECT COUNT(*) FROM quotes", ()).await?;

        if let Some(row) = rows.next().await? {
            let count: i64 = row.get(0)?;
            Ok(usize::try_from(count).unwrap_or(0))
        } else {
            Ok(0)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::Database;

    async fn setup() -> Database {
        Database::open_in_memory().await.unwrap()
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_insert_and_list() {
        let db = setup().await;
        let repo = LibSqlQuoteRepository::new(db.connection());

        repo.insert(&Quote::new("First", "Life")).await.unwrap();
        repo.insert(&Quote::new("Second", "Work")).await.unwrap();
        repo.insert(&Quote::new("Third", "Life")).await.unwrap();

        let quotes = repo.list_all().await.unwrap();
        assert_eq!(quotes.len(), 3);

        // Insertion order is preserved
        assert_eq!(quotes[0].text, "First");
        assert_eq!(quotes[2].text, "Third");
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_list_by_category() {
        let db = setup().await;
        let repo = LibSqlQuoteRepository::new(db.connection());

        repo.insert(&Quote::new("One", "Life")).await.unwrap();
        repo.insert(&Quote::new("Two", "Work")).await.unwrap();
        repo.insert(&Quote::new("Three", "Life")).await.unwrap();

        let life = repo.list_by_category("Life").await.unwrap();
        assert_eq!(life.len(), 2);
        assert!(life.iter().all(|quote| quote.category == "Life"));

        let missing = repo.list_by_category("Nope").await.unwrap();
        assert!(missing.is_empty());
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_list_categories_with_counts() {
        let db = setup().await;
        let repo = LibSqlQuoteRepository::new(db.connection());

        repo.insert(&Quote::new("One", "Life")).await.unwrap();
        repo.insert(&Quote::new("Two", "Business")).await.unwrap();
        repo.insert(&Quote::new("Three", "Life")).await.unwrap();

        let categories = repo.list_categories().await.unwrap();
        assert_eq!(
            categories,
            vec![("Business".to_string(), 1), ("Life".to_string(), 2)]
        );
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_mark_synced_persists_flag() {
        let db = setup().await;
        let repo = LibSqlQuoteRepository::new(db.connection());

        let local = Quote::new("Local", "Life");
        repo.insert(&local).await.unwrap();

        repo.mark_synced(&local.id).await.unwrap();

        let quotes = repo.list_all().await.unwrap();
        assert_eq!(quotes.len(), 1);
        assert!(quotes[0].synced);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_mark_synced_missing_quote() {
        let db = setup().await;
        let repo = LibSqlQuoteRepository::new(db.connection());

        let error = repo.mark_synced(&QuoteId::new()).await.unwrap_err();
        assert!(matches!(error, Error::NotFound(_)));
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_replace_all_rewrites_order() {
        let db = setup().await;
        let repo = LibSqlQuoteRepository::new(db.connection());

        repo.insert(&Quote::new("Old", "Life")).await.unwrap();

        let replacement = vec![
            Quote::from_remote("New first", "remote-1"),
            Quote::new("New second", "Life"),
        ];
        repo.replace_all(&replacement).await.unwrap();

        let quotes = repo.list_all().await.unwrap();
        assert_eq!(quotes.len(), 2);
        assert_eq!(quotes[0].text, "New first");
        assert_eq!(quotes[1].text, "New second");
        assert_eq!(repo.count().await.unwrap(), 2);
    }
}
