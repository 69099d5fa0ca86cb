use std::path::Path;

use crate::commands::common::{build_engine, open_vault};
use crate::commands::sync::print_report;
use crate::error::CliError;

pub async fn run_import(path: &Path, sync_after: bool, db_path: &Path) -> Result<(), CliError> {
    let payload = std::fs::read_to_string(path)?;

    let vault = open_vault(db_path).await?;
    let outcome = vault.import_json(&payload).await?;
    println!(
        "Imported {} quote(s); collection now holds {}",
        outcome.imported, outcome.collection_len
    );

    if sync_after {
        let engine = build_engine(vault)?;
        let report = engine.run_cycle().await?;
        print_report(&report);
    }

    Ok(())
}
