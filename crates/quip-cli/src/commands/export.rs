use std::path::{Path, PathBuf};

use quip_core::export::EXPORT_FILE_NAME;

use crate::commands::common::open_vault;
use crate::error::CliError;

pub async fn run_export(output_path: Option<&Path>, db_path: &Path) -> Result<(), CliError> {
    let vault = open_vault(db_path).await?;
    let rendered = vault.export_json().await?;

    if let Some(path) = output_path {
        let path: PathBuf = if path.is_dir() {
            path.join(EXPORT_FILE_NAME)
        } else {
            path.to_path_buf()
        };
        std::fs::write(&path, rendered)?;
        println!("{}", path.display());
    } else {
        println!("{rendered}");
    }

    Ok(())
}
