use std::path::Path;

use crate::commands::common::{format_quote_lines, open_vault, quote_to_list_item, QuoteListItem};
use crate::error::CliError;

pub async fn run_list(
    category: Option<&str>,
    limit: usize,
    as_json: bool,
    db_path: &Path,
) -> Result<(), CliError> {
    let vault = open_vault(db_path).await?;

    let mut quotes = match category {
        Some(category) => vault.quotes_in_category(category).await?,
        None => vault.quotes().await?,
    };

    if limit > 0 {
        quotes.truncate(limit);
    }

    if as_json {
        let json_items = quotes
            .iter()
            .map(quote_to_list_item)
            .collect::<Vec<QuoteListItem>>();
        println!("{}", serde_json::to_string_pretty(&json_items)?);
    } else {
        for line in format_quote_lines(&quotes) {
            println!("{line}");
        }
    }

    Ok(())
}
