use clap::Parser;
use studio_forms::cli::Cli;
use studio_forms::commands;
use studio_forms::config::Settings;
use tracing::{error, info};

fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let settings = Settings::new_with_cli(&cli)?;
    info!("Loaded configuration from {}", cli.config.display());

    let outcome = commands::run(&cli.command, &settings)?;
    println!("{}", outcome.output.trim_end());

    if !outcome.success {
        error!("Validation failed");
        std::process::exit(1);
    }
    Ok(())
}
