use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use satgate_config::Config;
use tracing::debug;
use tracing_subscriber::EnvFilter;

mod commands;
mod ui;

use commands::configure::ConfigureCommand;
use commands::mint::MintCommand;
use commands::mode::ModeCommand;
use commands::ping::PingCommand;
use commands::report::ReportCommand;
use commands::revoke::RevokeCommand;
use commands::spend::SpendCommand;
use commands::status::StatusCommand;
use commands::tokens::{TokenCommand, TokensCommand};
use commands::Ctx;

/// SatGate CLI - Manage your API's economic firewall
#[derive(Parser)]
#[command(
    name = "satgate",
    version,
    about = "SatGate CLI - manage your API's economic firewall",
    long_about = "SatGate CLI wraps the SatGate Admin API for server-side API operators.\n\n\
                  Mint tokens, track spend, revoke agents, and view security reports\n\
                  from the terminal. The server-side counterpart to lnget.\n\n\
                  They're the wallet. We're the register."
)]
#[command(propagate_version = true)]
struct Cli {
    /// Config file (default ~/.satgate/config.yaml)
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Output in JSON format
    #[arg(long, global = true)]
    json: bool,

    /// Skip confirmation prompts
    #[arg(long, global = true)]
    yes: bool,

    /// Show what would happen without executing
    #[arg(long, global = true)]
    dry_run: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Mint a new capability token for an agent
    Mint(MintCommand),

    /// Immediately revoke a capability token
    Revoke(RevokeCommand),

    /// List all tokens with status, spend, and budget remaining
    Tokens(TokensCommand),

    /// Show token detail: caveats, delegation chain, spend history
    Token(TokenCommand),

    /// Show spend summary (org-wide or per-agent)
    Spend(SpendCommand),

    /// Show current policy mode per route
    Mode(ModeCommand),

    /// Show gateway health, version, and uptime
    Status(StatusCommand),

    /// Quick liveness check (exit code 0 = healthy, 1 = unreachable)
    Ping(PingCommand),

    /// Generate reports (threats, spend, compliance)
    Report(ReportCommand),

    /// Interactively write the config file
    Configure(ConfigureCommand),
}

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr so tables and --json output stay clean on stdout
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let ctx = Ctx {
        config: Config::load(cli.config.as_deref()),
        config_path: cli.config,
        json: cli.json,
        yes: cli.yes,
        dry_run: cli.dry_run,
    };
    debug!(
        surface = %ctx.config.surface,
        gateway = %ctx.config.gateway,
        "Resolved target"
    );

    match cli.command {
        Commands::Mint(cmd) => cmd.run(&ctx).await,
        Commands::Revoke(cmd) => cmd.run(&ctx).await,
        Commands::Tokens(cmd) => cmd.run(&ctx).await,
        Commands::Token(cmd) => cmd.run(&ctx).await,
        Commands::Spend(cmd) => cmd.run(&ctx).await,
        Commands::Mode(cmd) => cmd.run(&ctx).await,
        Commands::Status(cmd) => cmd.run(&ctx).await,
        Commands::Ping(cmd) => cmd.run(&ctx).await,
        Commands::Report(cmd) => cmd.run(&ctx).await,
        Commands::Configure(cmd) => cmd.run(&ctx),
    }
}
