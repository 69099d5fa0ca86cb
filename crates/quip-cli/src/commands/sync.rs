use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use quip_core::sync::CycleReport;

use crate::commands::common::{build_engine, open_vault, remote_endpoint};
use crate::error::CliError;

pub async fn run_sync(as_json: bool, db_path: &Path) -> Result<(), CliError> {
    let vault = open_vault(db_path).await?;
    let engine = build_engine(vault)?;
    let report = engine.run_cycle().await?;

    if as_json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
    }

    Ok(())
}

pub async fn run_watch(interval_secs: u64, db_path: &Path) -> Result<(), CliError> {
    if interval_secs == 0 {
        return Err(CliError::InvalidInterval);
    }

    let vault = open_vault(db_path).await?;
    let engine = Arc::new(build_engine(vault)?);

    // Startup cycle first, then the timer
    let report = engine.run_cycle().await?;
    print_report(&report);

    let task = Arc::clone(&engine).spawn_periodic(Duration::from_secs(interval_secs));
    println!(
        "Syncing with {} every {interval_secs}s; press Ctrl-C to stop",
        remote_endpoint()
    );

    tokio::signal::ctrl_c().await?;
    task.stop().await;
    println!("Stopped");

    Ok(())
}

pub fn print_report(report: &CycleReport) {
    if report.skipped {
        println!("Sync skipped: another cycle is in progress");
        return;
    }

    println!(
        "Sync completed: {} added, {} updated, {} uploaded ({} failed)",
        report.added, report.updated, report.uploaded, report.upload_failures
    );
}
