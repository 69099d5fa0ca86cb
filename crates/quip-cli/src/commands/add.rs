use std::path::Path;

use crate::commands::common::{build_engine, open_vault};
use crate::commands::sync::print_report;
use crate::error::CliError;

pub async fn run_add(
    text_parts: &[String],
    category: &str,
    sync_after: bool,
    db_path: &Path,
) -> Result<(), CliError> {
    let text = text_parts.join(" ");
    if text.trim().is_empty() {
        return Err(CliError::EmptyQuoteText);
    }
    if category.trim().is_empty() {
        return Err(CliError::EmptyCategory);
    }

    let vault = open_vault(db_path).await?;
    let quote = vault.add_quote(&text, category).await?;
    println!("{}", quote.id);

    if sync_after {
        let engine = build_engine(vault)?;
        let report = engine.run_cycle().await?;
        print_report(&report);
    }

    Ok(())
}
