//! `satgate status` - gateway health plus the resolved configuration.

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use serde_json::{json, Value};

use crate::commands::Ctx;
use crate::ui;

#[derive(Args)]
pub struct StatusCommand {}

impl StatusCommand {
    pub async fn run(&self, ctx: &Ctx) -> Result<()> {
        let client = ctx.client()?;
        ui::print_target(&ctx.config);

        let (status, payload) = client.health().await?;

        if ctx.json {
            let mut merged = match payload {
                Value::Object(map) => Value::Object(map),
                other => json!({ "health": other }),
            };
            if let Some(map) = merged.as_object_mut() {
                map.insert("cli_version".into(), json!(env!("CARGO_PKG_VERSION")));
                map.insert("surface".into(), json!(ctx.config.surface.to_string()));
                map.insert("gateway".into(), json!(ctx.config.gateway));
                map.insert("http_status".into(), json!(status));
            }
            println!("{}", serde_json::to_string_pretty(&merged)?);
            return Ok(());
        }

        println!("{}", "SatGate status".bold());
        ui::rule();
        if status == 200 {
            println!("Health:  {} healthy", "✓".green());
        } else {
            println!("Health:  {} HTTP {status}", "✗".red());
        }
        for (key, label) in [("version", "Version"), ("uptime", "Uptime"), ("mode", "Mode")] {
            if let Some(value) = payload.get(key) {
                match value {
                    Value::String(s) if !s.is_empty() => println!("{label}: {s}"),
                    Value::Number(n) => println!("{label}: {n}"),
                    _ => {}
                }
            }
        }
        println!("Surface: {}", ctx.config.surface);
        println!("Gateway: {}", ctx.config.gateway);
        println!("CLI:     v{}", env!("CARGO_PKG_VERSION"));
        Ok(())
    }
}
