mod api;
mod cli;
mod config;
mod import;

use clap::Parser;
use colored::*;

use cli::Cli;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // .env may carry HUNTFLOW_TOKEN and friends
    dotenvy::dotenv().ok();
    init_logging(cli.verbose);

    if let Err(err) = cli::handle_import(cli).await {
        eprintln!("{} {:#}", "Error:".bright_red().bold(), err);
        std::process::exit(1);
    }
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp(None)
        .format_target(false)
        .init();
}
