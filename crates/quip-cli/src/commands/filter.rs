use std::path::Path;

use crate::commands::common::open_vault;
use crate::error::CliError;

pub async fn run_filter(
    category: Option<&str>,
    clear: bool,
    db_path: &Path,
) -> Result<(), CliError> {
    let vault = open_vault(db_path).await?;

    if clear {
        vault.set_category_filter(None).await?;
        println!("Filter cleared; showing all categories");
        return Ok(());
    }

    match category {
        Some(category) => {
            let category = category.trim();
            if category.is_empty() {
                return Err(CliError::EmptyCategory);
            }

            vault.set_category_filter(Some(category)).await?;
            println!("Filter set to '{category}'");

            if vault.quotes_in_category(category).await?.is_empty() {
                println!("note: no quotes in '{category}' yet");
            }
        }
        None => match vault.category_filter().await? {
            Some(current) => println!("Filtering by '{current}'"),
            None => println!("No filter set; showing all categories"),
        },
    }

    Ok(())
}
