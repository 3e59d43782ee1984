use anyhow::Result;
use clap::Parser;
use colored::*;
use dialoguer::Password;
use snp_bridge::config::{self, Cli, Config};
use snp_bridge::server;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = match config::load(cli, prompt_secret) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{} {:#}", "error:".red().bold(), e);
            std::process::exit(2);
        }
    };

    init_tracing(&config);
    config.print_summary();

    server::run(config).await
}

fn prompt_secret(dashboard: &str) -> Result<String> {
    println!(
        "{} {}",
        "Client secret not set; find it on your developer dashboard:".yellow(),
        dashboard.bright_white().bold()
    );
    let secret = Password::new()
        .with_prompt("Client secret")
        .interact()?;
    Ok(secret)
}

fn init_tracing(config: &Config) {
    let default_level = if config.debug { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    if config.log_format == "json" {
        builder.json().init();
    } else {
        builder.init();
    }
}
