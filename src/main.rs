// src/main.rs
mod api;
mod auth;
mod cli;
mod commands;
mod config;
mod constants;
mod csv_transfer;
mod error;
mod logging;
mod models;
mod roster;

use clap::Parser;
use cli::Args;
use error::AppError;

#[tokio::main]
async fn main() -> Result<(), AppError> {
    let args = Args::parse();

    let (log_file_path, _guard) =
        logging::setup_logging(args.log_file.as_ref(), args.verbose).await?;
    tracing::info!("Logs are being written to: {log_file_path}");

    match commands::run(args.command).await {
        Ok(()) => Ok(()),
        Err(e) => {
            eprintln!("Error: {e}");
            if e.requires_login() {
                eprintln!("Run `ttrank login --username <name>` to authenticate.");
            }
            std::process::exit(1);
        }
    }
}
