use std::path::Path;

use rand::seq::SliceRandom;

use crate::commands::common::open_vault;
use crate::error::CliError;

pub async fn run_show(any: bool, db_path: &Path) -> Result<(), CliError> {
    let vault = open_vault(db_path).await?;

    let quote = if any {
        let quotes = vault.quotes().await?;
        quotes.choose(&mut rand::thread_rng()).cloned()
    } else {
        vault.random_quote().await?
    };

    match quote {
        Some(quote) => {
            println!("\"{}\"", quote.text);
            println!("- {}", quote.category);
        }
        None => {
            let filter = vault.category_filter().await?;
            match filter {
                Some(category) if !any => {
                    println!("No quotes in category '{category}'. Try `quip filter --clear`.");
                }
                _ => println!("No quotes available yet. Add some!"),
            }
        }
    }

    Ok(())
}
