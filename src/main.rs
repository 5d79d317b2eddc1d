use std::sync::Arc;
use std::time::Duration;

use agenda::cli::commands::Cli;
use agenda::cli::handlers;
use agenda::io::api_client::HttpTaskApi;
use agenda::io::{config_io, logging};
use clap::Parser;

fn main() {
    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = config_io::load_process_config(cli.config.as_deref())?;
    let base_url = cli
        .api_url
        .clone()
        .unwrap_or_else(|| config.api.base_url.clone());
    let timeout = config.api.request_timeout_secs.map(Duration::from_secs);
    let api = HttpTaskApi::new(&base_url, timeout)?;

    match cli.command {
        None => {
            // The TUI owns the terminal, so it only logs when a file is configured
            if let Some(path) = &config.log.file {
                logging::init_file_logging(path, config.log.file_level())?;
            }
            tracing::info!(api = %base_url, "starting terminal UI");
            agenda::tui::run(&config, Arc::new(api), &base_url)
        }
        Some(command) => {
            logging::init_stderr_logging(config.log.stderr_level());
            handlers::dispatch(command, cli.json, &api)
        }
    }
}
