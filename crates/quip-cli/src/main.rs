//! Quip CLI - Capture, filter, and sync memorable quotes
//!
//! Quick capture from the terminal with minimal friction.

use clap::{CommandFactory, Parser};

mod cli;
mod commands;
mod error;

use cli::{Cli, Commands};
use commands::add::run_add;
use commands::categories::run_categories;
use commands::common::resolve_db_path;
use commands::completions::run_completions;
use commands::export::run_export;
use commands::filter::run_filter;
use commands::import::run_import;
use commands::list::run_list;
use commands::show::run_show;
use commands::sync::{run_sync, run_watch};
use error::CliError;

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        eprintln!("Error: {error}");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), CliError> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("quip=info".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();
    let db_path = resolve_db_path(cli.db_path);

    match cli.command {
        Some(Commands::Add {
            text,
            category,
            sync,
        }) => run_add(&text, &category, sync, &db_path).await?,
        Some(Commands::Show { any }) => run_show(any, &db_path).await?,
        Some(Commands::List {
            category,
            limit,
            json,
        }) => run_list(category.as_deref(), limit, json, &db_path).await?,
        Some(Commands::Categories { json }) => run_categories(json, &db_path).await?,
        Some(Commands::Filter { category, clear }) => {
            run_filter(category.as_deref(), clear, &db_path).await?;
        }
        Some(Commands::Import { path, sync }) => run_import(&path, sync, &db_path).await?,
        Some(Commands::Export { output }) => run_export(output.as_deref(), &db_path).await?,
        Some(Commands::Sync { json }) => run_sync(json, &db_path).await?,
        Some(Commands::Watch { interval }) => run_watch(interval, &db_path).await?,
        Some(Commands::Completions { shell, output }) => {
            run_completions(shell, output.as_deref())?;
        }
        None => {
            // Quick capture mode: quip "my quote" -c Category
            if cli.quote.is_empty() {
                Cli::command().print_help().map_err(CliError::Io)?;
                println!();
            } else {
                let category = cli.category.ok_or(CliError::EmptyCategory)?;
                run_add(&cli.quote, &category, false, &db_path).await?;
            }
        }
    }

    Ok(())
}
