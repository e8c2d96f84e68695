//! `satgate mint` - mint a new capability token.

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use dialoguer::theme::ColorfulTheme;
use dialoguer::Input;
use satgate_client::money::Money;
use satgate_client::normalize::Normalized;
use satgate_client::request::{MintRequest, RouteAllowlist};

use crate::commands::Ctx;
use crate::ui;

#[derive(Args)]
pub struct MintCommand {
    /// Agent name the token is minted for
    #[arg(long)]
    agent: Option<String>,

    /// Budget in dollars (0 = unlimited)
    #[arg(long)]
    budget: Option<f64>,

    /// Budget currency
    #[arg(long, default_value = "USD")]
    currency: String,

    /// Expiry (e.g. 30d, 24h; empty = no expiry)
    #[arg(long, default_value = "")]
    expiry: String,

    /// Comma-separated route allowlist ("*" or empty = all routes)
    #[arg(long, default_value = "")]
    routes: String,

    /// Parent token id, to delegate under an existing token
    #[arg(long)]
    parent: Option<String>,
}

impl MintCommand {
    pub async fn run(&self, ctx: &Ctx) -> Result<()> {
        let req = self.build_request(ctx)?;
        let client = ctx.client()?;
        ui::print_target(&ctx.config);

        if ctx.dry_run {
            let wire = client.mint_preview(&req)?;
            eprintln!("{}", "[DRY RUN] Would send:".yellow());
            println!("{} {}", wire.method, wire.path);
            if let Some(body) = &wire.body {
                println!("{}", satgate_client::normalize::pretty(body));
            }
            return Ok(());
        }

        let budget_label = if req.budget.is_zero() {
            "unlimited".to_string()
        } else {
            req.budget.to_string()
        };
        let prompt = format!(
            "⚠️  Mint token for '{}' with budget {}. Proceed?",
            req.agent, budget_label
        );
        if !ui::confirm(&prompt, ctx.yes)? {
            eprintln!("Aborted.");
            return Ok(());
        }

        let fetched = client.mint(&req).await?;
        if ctx.json {
            println!("{}", fetched.raw);
            return Ok(());
        }

        match fetched.result {
            Normalized::Known(receipt) => {
                println!("{}", "✓ Token minted".green().bold());
                ui::rule();
                if let Some(id) = &receipt.id {
                    println!("ID:      {id}");
                }
                println!("Agent:   {}", req.agent);
                if let Some(status) = &receipt.status {
                    println!("Status:  {status}");
                }
                println!("Budget:  {budget_label}");
                if !receipt.routes.is_empty() {
                    println!("Routes:  {}", receipt.routes.join(", "));
                }
                if let Some(expires) = &receipt.expires_at {
                    println!("Expires: {expires}");
                }
                if let Some(macaroon) = &receipt.macaroon {
                    ui::rule();
                    println!("{macaroon}");
                    eprintln!(
                        "{}",
                        "⚠️  Save this token now. It will not be shown again.".yellow()
                    );
                }
            }
            Normalized::Unrecognized(value) => {
                println!("{}", satgate_client::normalize::pretty(&value));
            }
        }
        Ok(())
    }

    /// Assemble the mint request, prompting interactively for anything
    /// the flags left out (only when `--agent` was not given; flag-driven
    /// invocations must stay non-interactive for scripting).
    fn build_request(&self, ctx: &Ctx) -> Result<MintRequest> {
        let theme = ColorfulTheme::default();

        let (agent, budget, expiry, routes) = match &self.agent {
            Some(agent) => (
                agent.clone(),
                self.budget.unwrap_or(0.0),
                self.expiry.clone(),
                self.routes.clone(),
            ),
            None if ctx.yes => {
                anyhow::bail!("--agent is required with --yes");
            }
            None => {
                let agent: String = Input::with_theme(&theme)
                    .with_prompt("Agent name")
                    .interact_text()?;
                let budget: f64 = Input::with_theme(&theme)
                    .with_prompt("Budget in USD (0 = unlimited)")
                    .default(0.0)
                    .interact_text()?;
                let expiry: String = Input::with_theme(&theme)
                    .with_prompt("Expiry (e.g. 30d, empty = none)")
                    .allow_empty(true)
                    .default(String::new())
                    .interact_text()?;
                let routes: String = Input::with_theme(&theme)
                    .with_prompt("Routes (comma-separated, empty = all)")
                    .allow_empty(true)
                    .default(String::new())
                    .interact_text()?;
                (agent, budget, expiry, routes)
            }
        };

        Ok(MintRequest {
            agent,
            budget: Money::from_dollars(budget),
            currency: self.currency.clone(),
            expiry,
            routes: RouteAllowlist::parse(&routes),
            parent_id: self.parent.clone(),
        })
    }
}
