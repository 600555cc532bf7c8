//! jopleet — import tweets as notes into a Joplin notebook.
//!
//! For each tweet URL: fetch the status (full text, author, location,
//! images), upload the images as Joplin resources, create a note in the
//! configured folder and optionally tag it.

use clap::Parser;
use dotenv::dotenv;
use std::process::ExitCode;

mod cli;
mod config;
mod http;
mod import;
mod joplin;
mod render;
mod twitter;

use cli::Cli;
use config::Config;
use import::Importer;

#[tokio::main]
async fn main() -> ExitCode {
    dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // Usage errors exit with status 2
    let cli = Cli::parse();

    let config = match Config::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            log::error!("[CONFIG] {}", e);
            return ExitCode::FAILURE;
        }
    };

    let client = match http::build_client() {
        Ok(client) => client,
        Err(e) => {
            log::error!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    let importer = Importer::new(&config, &client);
    let failed = importer
        .import_all(&cli.urls, &cli.tag_names(), cli.fail_fast)
        .await;

    if failed > 0 {
        log::warn!("[IMPORT] {} of {} URL(s) failed", failed, cli.urls.len());
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
