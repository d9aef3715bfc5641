//! Scrollback CLI binary.
//!
//! Fetches message history from Discord and prints it:
//! - Channels, in the order given
//! - Whole guilds, or every guild the bot is in
//! - Threads of a guild or channel, or specific threads

use clap::Parser;
use scrollback::{ScrollbackConfig, report::ReportTarget};

mod cli;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    use cli::{Cli, run_command};

    // Pick up DISCORD_TOKEN from .env before clap reads the environment
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => ScrollbackConfig::from_file(path)?,
        None => ScrollbackConfig::load()?,
    };

    // Checked before any request goes out
    let target = ReportTarget::select(
        cli.output.clone(),
        cli.format.is_machine_readable(),
        cfg!(feature = "observability"),
    )?;

    #[cfg(feature = "observability")]
    let provider = {
        use scrollback::observability::{ObservabilityConfig, init_observability};
        let mut otel = ObservabilityConfig::default().with_logging(&config.logging);
        if cli.verbose {
            otel = otel.with_log_level("debug");
        }
        init_observability(otel)?
    };
    #[cfg(not(feature = "observability"))]
    scrollback::init_logging(&config.logging, cli.verbose)?;

    let result = run_command(cli.command, &cli.token, config.fetch, cli.format, target).await;

    #[cfg(feature = "observability")]
    scrollback::observability::shutdown_observability(provider);

    result
}
