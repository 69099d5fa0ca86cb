use std::path::Path;

use serde::Serialize;

use crate::commands::common::open_vault;
use crate::error::CliError;

#[derive(Debug, Serialize)]
struct CategoryItem {
    name: String,
    quotes: usize,
}

pub async fn run_categories(as_json: bool, db_path: &Path) -> Result<(), CliError> {
    let vault = open_vault(db_path).await?;
    let categories = vault.categories().await?;

    if as_json {
        let items = categories
            .into_iter()
            .map(|(name, quotes)| CategoryItem { name, quotes })
            .collect::<Vec<CategoryItem>>();
        println!("{}", serde_json::to_string_pretty(&items)?);
        return Ok(());
    }

    if categories.is_empty() {
        println!("No categories yet.");
        return Ok(());
    }

    for (name, count) in categories {
        println!("{name:<24}  {count}");
    }

    Ok(())
}
