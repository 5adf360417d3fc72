//! Profile Capture CLI entry point.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use profile_capture_cli::commands::{self, PageArgs};
use profile_capture_cli::config::Config;
use profile_capture_cli::output;
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Extract profile pages into structured records and send them on.
#[derive(Parser)]
#[command(name = "profile-capture")]
#[command(version)]
struct Cli {
    /// Print machine-readable JSON on stdout
    #[arg(long, global = true)]
    json: bool,

    /// Only print failures
    #[arg(long, global = true)]
    quiet: bool,

    /// Show skipped items and debug logging
    #[arg(long, global = true)]
    verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    /// Emit logs as JSON lines on stderr
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract a saved page and show the record that would be sent
    Preview(PageArgs),
    /// Extract a saved page and deliver the record to the webhook
    Send(PageArgs),
    /// Show the effective configuration
    Config,
}

fn init_tracing(debug_mode: bool, log_json: bool) -> Result<()> {
    let level = if debug_mode { "debug" } else { "info" };
    let filter = EnvFilter::from_default_env().add_directive(
        format!("profile_capture={level}")
            .parse()
            .context("invalid log directive")?,
    );
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    if log_json {
        builder.json().init();
    } else {
        builder.init();
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.json {
        std::env::set_var(output::ENV_JSON, "1");
    }
    if cli.quiet {
        std::env::set_var(output::ENV_QUIET, "1");
    }
    if cli.verbose {
        std::env::set_var(output::ENV_VERBOSE, "1");
    }
    if cli.no_color {
        std::env::set_var(output::ENV_NO_COLOR, "1");
    }

    let config = Config::load().context("failed to load configuration")?;
    init_tracing(config.debug_mode || cli.verbose, cli.log_json)?;
    debug!(
        timeout_secs = config.timeout_secs,
        debug_mode = config.debug_mode,
        webhook = config.redacted_webhook().as_deref().unwrap_or("none"),
        "configuration loaded"
    );

    let success = match &cli.command {
        Commands::Preview(args) => commands::preview::run(args, &config)?,
        Commands::Send(args) => commands::send::run(args, &config).await?,
        Commands::Config => commands::config_cmd::run(&config)?,
    };

    if !success {
        std::process::exit(1);
    }
    Ok(())
}
