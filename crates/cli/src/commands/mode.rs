//! `satgate mode` - show the policy mode configured per route.

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use satgate_client::model::Route;
use satgate_client::normalize::{self, Normalized};

use crate::commands::Ctx;
use crate::ui;

#[derive(Args)]
pub struct ModeCommand {}

impl ModeCommand {
    pub async fn run(&self, ctx: &Ctx) -> Result<()> {
        let client = ctx.client()?;
        ui::print_target(&ctx.config);

        let fetched = client.routes().await?;
        if ctx.json {
            println!("{}", fetched.raw);
            return Ok(());
        }

        match fetched.result {
            Normalized::Known(routes) => render_routes(&routes),
            Normalized::Unrecognized(value) if normalize::is_empty_listing(&value, "routes") => {
                println!("No routes configured.");
            }
            Normalized::Unrecognized(value) => {
                println!("{}", normalize::pretty(&value));
            }
        }
        Ok(())
    }
}

fn render_routes(routes: &[Route]) {
    if routes.is_empty() {
        println!("No routes configured.");
        return;
    }
    println!("{}", "Route policy".bold());
    ui::rule();
    for route in routes {
        let mut line = format!("{:<40} {}", route.path, policy_icon(&route.policy));
        if !route.name.is_empty() {
            line.push_str(&format!("  {}", route.name.dimmed()));
        }
        println!("{line}");
    }
}

/// Icon plus label for a policy mode. Legacy policy names map onto the
/// current trio (chargeback -> observe, fiat402 -> control, l402 -> charge).
fn policy_icon(policy: &str) -> String {
    match policy {
        "observe" | "chargeback" => "👁  Observe".to_string(),
        "control" | "fiat402" => "🎛  Control".to_string(),
        "charge" | "l402" => "💲 Charge".to_string(),
        "public" => "🔓 Public".to_string(),
        other => other.to_string(),
    }
}
