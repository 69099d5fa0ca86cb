use std::env;
use std::path::{Path, PathBuf};

use chrono::Utc;
use quip_core::remote::{HttpRemote, DEFAULT_REMOTE_URL};
use quip_core::sync::SyncEngine;
use quip_core::{Quote, QuoteVault};
use serde::Serialize;

use crate::error::CliError;

#[derive(Debug, Serialize)]
pub struct QuoteListItem {
    pub id: String,
    pub text: String,
    pub category: String,
    pub synced: bool,
    pub created_at: i64,
    pub relative_time: String,
}

pub async fn open_vault(db_path: &Path) -> Result<QuoteVault, CliError> {
    Ok(QuoteVault::open(db_path).await?)
}

pub fn build_engine(vault: QuoteVault) -> Result<SyncEngine<HttpRemote>, CliError> {
    let remote = HttpRemote::new(remote_endpoint())?;
    Ok(SyncEngine::new(vault, remote))
}

pub fn remote_endpoint() -> String {
    match env::var("QUIP_REMOTE_URL")
        .ok()
        .filter(|url| !url.trim().is_empty())
    {
        Some(url) => {
            tracing::info!("Using remote endpoint override from QUIP_REMOTE_URL");
            url
        }
        None => DEFAULT_REMOTE_URL.to_string(),
    }
}

pub fn resolve_db_path(cli_db_path: Option<PathBuf>) -> PathBuf {
    cli_db_path
        .or_else(|| env::var_os("QUIP_DB_PATH").map(PathBuf::from))
        .unwrap_or_else(default_db_path)
}

fn default_db_path() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("quip")
        .join("quip.db")
}

pub fn quote_to_list_item(quote: &Quote) -> QuoteListItem {
    let now_ms = Utc::now().timestamp_millis();

    QuoteListItem {
        id: quote.id.to_string(),
        text: quote.text.clone(),
        category: quote.category.clone(),
        synced: quote.synced,
        created_at: quote.created_at,
        relative_time: format_relative_time(quote.created_at, now_ms),
    }
}

pub fn format_quote_lines(quotes: &[Quote]) -> Vec<String> {
    let now_ms = Utc::now().timestamp_millis();
    quotes
        .iter()
        .map(|quote| {
            let id = quote.id.to_string();
            let short_id = id.chars().take(13).collect::<String>();
            let preview = quote_preview(quote, 48);
            let relative_time = format_relative_time(quote.created_at, now_ms);

            if quote.is_pending() {
                format!(
                    "{short_id:<13}  {preview:<48}  {:<16}  {relative_time:<10}  [pending]",
                    quote.category
                )
            } else {
                format!(
                    "{short_id:<13}  {preview:<48}  {:<16}  {relative_time}",
                    quote.category
                )
            }
        })
        .collect()
}

pub fn quote_preview(quote: &Quote, max_chars: usize) -> String {
    let collapsed = quote.text.split_whitespace().collect::<Vec<_>>().join(" ");

    if collapsed.chars().count() <= max_chars {
        collapsed
    } else {
        let take_len = max_chars.saturating_sub(3);
        let mut truncated = collapsed.chars().take(take_len).collect::<String>();
        truncated.push_str("...");
        truncated
    }
}

pub fn format_relative_time(timestamp_ms: i64, now_ms: i64) -> String {
    let diff = now_ms.saturating_sub(timestamp_ms);
    let minute = 60_000;
    let hour = 60 * minute;
    let day = 24 * hour;
    let week = 7 * day;
    let month = 30 * day;
    let year = 365 * day;

    if diff < minute {
        "just now".to_string()
    } else if diff < hour {
        format!("{}m ago", diff / minute)
    } else if diff < day {
        format!("{}h ago", diff / hour)
    } else if diff < week {
        format!("{}d ago", diff / day)
    } else if diff < month {
        format!("{}w ago", diff / week)
    } else if diff < year {
        format!("{}mo ago", diff / month)
    } else {
        format!("{}y ago", diff / year)
    }
}
