//! `satgate ping` - liveness check suitable for scripts and cron.

use anyhow::Result;
use clap::Args;
use colored::Colorize;

use crate::commands::Ctx;

#[derive(Args)]
pub struct PingCommand {}

impl PingCommand {
    pub async fn run(&self, ctx: &Ctx) -> Result<()> {
        let client = ctx.client()?;

        match client.health().await {
            Ok((200, _)) => {
                println!("{} {} is healthy", "✓".green(), ctx.config.gateway);
                Ok(())
            }
            Ok((status, _)) => {
                println!(
                    "{} {} responded with HTTP {status}",
                    "✗".red(),
                    ctx.config.gateway
                );
                std::process::exit(1);
            }
            Err(err) => {
                println!("{} {}", "✗".red(), err);
                std::process::exit(1);
            }
        }
    }
}
