//! Settings repository implementation

use crate::error::Result;
use libsql::Connection;

const CATEGORY_FILTER_KEY: &str = "category_filter";

/// Trait for settings storage operations (async)
#[allow(async_fn_in_trait)]
pub trait SettingsRepository {
    /// Load the persisted category filter, if any
    async fn category_filter(&self) -> Result<Option<String>>;

    /// Persist or clear the category filter
    async fn set_category_filter(&self, category: Option<&str>) -> Result<()>;
}

/// libSQL implementation of `SettingsRepository`
pub struct LibSqlSettingsRepository<'a> {
    conn: &'a Connection,
}

impl<'a> LibSqlSettingsRepository<'a> {
    /// Create a new repository with the given connection
    pub const fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    async fn get_setting(&self, key: &str) -> Result<Option<String>> {
        let mut rows = self
            .conn
            .query("SELECT value FROM settings WHERE key = ?", [key])
            .await?;

        if let Some(row) = rows.next().await? {
            let value: String = row.get(0)?;
            Ok(Some(value))
        } else {
            Ok(None)
        }
    }

    async fn set_setting(&self, key: &str, value: &str) -> Result<()> {
        self.conn
            .execute(
                "INSERT OR REPLACE INTO settings (key, value) VALUES (?, ?)",
                [key, value],
            )
            .await?;
        Ok(())
    }

    async fn delete_setting(&self, key: &str) -> Result<()> {
        self.conn
            .execute("DELETE FROM settings WHERE key = ?", [key])
            .await?;
        Ok(())
    }
}

impl SettingsRepository for LibSqlSettingsRepository<'_> {
    async fn category_filter(&self) -> Result<Option<String>> {
        let value = self.get_setting(CATEGORY_FILTER_KEY).await?;
        Ok(value.filter(|category| !category.trim().is_empty()))
    }

    async fn set_category_filter(&self, category: Option<&str>) -> Result<()> {
        match category.map(str::trim).filter(|category| !category.is_empty()) {
            Some(category) => self.set_setting(CATEGORY_FILTER_KEY, category).await,
            None => self.delete_setting(CATEGORY_FILTER_KEY).await,
        }
    }
}
