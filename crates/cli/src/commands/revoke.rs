//! `satgate revoke` - immediately revoke a capability token.

use anyhow::Result;
use clap::Args;
use colored::Colorize;

use crate::commands::Ctx;
use crate::ui;

#[derive(Args)]
pub struct RevokeCommand {
    /// Token id to revoke
    token_id: String,
}

impl RevokeCommand {
    pub async fn run(&self, ctx: &Ctx) -> Result<()> {
        let client = ctx.client()?;
        ui::print_target(&ctx.config);

        if ctx.dry_run {
            eprintln!(
                "{} Would revoke token {}",
                "[DRY RUN]".yellow(),
                self.token_id
            );
            return Ok(());
        }

        // Best-effort name lookup to make the confirmation readable; a
        // failed lookup degrades to the raw id and never blocks the revoke.
        let name = client.display_name(&self.token_id).await;
        let prompt = format!("⚠️  Revoke {name}? This cannot be undone");
        if !ui::confirm(&prompt, ctx.yes)? {
            eprintln!("Aborted.");
            return Ok(());
        }

        let raw = client.revoke(&self.token_id).await?;
        if ctx.json && !raw.is_empty() {
            println!("{raw}");
        }
        eprintln!("{} Token {name} revoked.", "✓".green());
        Ok(())
    }
}
