mod check;
mod watch;

use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "sizewatch-cli")]
#[command(about = "Checks whether a size is in stock on a product page")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Check one product page for one size
    Check(CheckArgs),
    /// Check every entry in a watchlist file
    Watch(WatchArgs),
}

/// Flags shared by both commands that control where verdicts go.
#[derive(Debug, Clone, Copy, Default, Args)]
struct OutputArgs {
    /// Print nothing for an out-of-stock verdict
    #[arg(long)]
    quiet: bool,
    /// Print and send every verdict, including out of stock
    #[arg(long)]
    always_notify: bool,
    /// Log at debug level, including text hints for undecided pages
    #[arg(long)]
    debug: bool,
}

#[derive(Debug, Args)]
struct CheckArgs {
    /// Product page URL
    #[arg(long)]
    url: String,
    /// Size label as shown on the page, e.g. "L" or "Large"
    #[arg(long)]
    size: String,
    /// Webhook to notify (Discord or Slack incoming webhook)
    #[arg(long, env = "SIZEWATCH_WEBHOOK_URL", hide_env_values = true)]
    webhook: Option<String>,
    /// Only look at ld+json blocks, not other script bodies
    #[arg(long)]
    no_embedded_scan: bool,
    #[command(flatten)]
    output: OutputArgs,
}

#[derive(Debug, Args)]
struct WatchArgs {
    /// Watchlist YAML file (defaults to SIZEWATCH_WATCHLIST_PATH)
    #[arg(long)]
    watchlist: Option<std::path::PathBuf>,
    #[command(flatten)]
    output: OutputArgs,
}

impl Commands {
    fn output(&self) -> OutputArgs {
        match self {
            Commands::Check(args) => args.output,
            Commands::Watch(args) => args.output,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = sizewatch_core::load_app_config()?;

    // Verdict messages own stdout; logs go to stderr.
    let env_filter = if cli.command.output().debug {
        EnvFilter::try_new("debug")?
    } else {
        EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(&config.log_level))?
    };
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!(?config, "configuration loaded");

    match cli.command {
        Commands::Check(args) => check::run_check(&config, &args).await,
        Commands::Watch(args) => watch::run_watch(&config, &args).await,
    }
}
