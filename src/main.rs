mod app;
mod cli;

use anyhow::Result;
use letterbox720::config::Config;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let cli = cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load().unwrap_or_else(|e| {
            eprintln!("Warning: {:#}. Using built-in defaults.", e);
            Config::default()
        }),
    };

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("letterbox720=debug")
        } else {
            EnvFilter::new(format!("letterbox720={}", config.logging.level))
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    app::run(cli.command, &config)
}
