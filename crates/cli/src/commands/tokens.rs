//! `satgate tokens` and `satgate token <id>` - token listing and detail.

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use satgate_client::model::{Token, TokenStatus};
use satgate_client::normalize::{self, Normalized};
use serde_json::Value;

use crate::commands::Ctx;
use crate::ui;

#[derive(Args)]
pub struct TokensCommand {}

impl TokensCommand {
    pub async fn run(&self, ctx: &Ctx) -> Result<()> {
        let client = ctx.client()?;
        ui::print_target(&ctx.config);

        let fetched = client.list_tokens().await?;
        if ctx.json {
            println!("{}", fetched.raw);
            return Ok(());
        }

        match fetched.result {
            Normalized::Known(tokens) => render_token_table(&tokens),
            Normalized::Unrecognized(value) if normalize::is_empty_token_listing(&value) => {
                render_token_table(&[]);
            }
            Normalized::Unrecognized(value) => {
                println!("{}", normalize::pretty(&value));
            }
        }
        Ok(())
    }
}

fn render_token_table(tokens: &[Token]) {
    let rows: Vec<Vec<String>> = tokens
        .iter()
        .map(|token| {
            // Indent delegated tokens under their parent
            let indent = "  ".repeat(token.depth);
            vec![
                ui::truncate(&token.id, 12),
                format!("{indent}{}", token.name),
                status_cell(token.status),
                token.spent.to_string(),
                budget_cell(token),
                ui::truncate(&token.expires_at, 10),
            ]
        })
        .collect();

    ui::print_table(
        &["ID", "NAME", "STATUS", "SPENT", "BUDGET", "EXPIRES"],
        &rows,
    );
    eprintln!("\n{} tokens total", tokens.len());
}

fn status_cell(status: TokenStatus) -> String {
    match status {
        TokenStatus::Active => format!("{} active", "✓".green()),
        TokenStatus::Revoked => format!("{} revoked", "⛔".red()),
        TokenStatus::Unknown => "unknown".to_string(),
    }
}

fn budget_cell(token: &Token) -> String {
    if token.is_unlimited() {
        "unlimited".to_string()
    } else {
        token.budget.to_string()
    }
}

#[derive(Args)]
pub struct TokenCommand {
    /// Token id to inspect
    token_id: String,
}

impl TokenCommand {
    pub async fn run(&self, ctx: &Ctx) -> Result<()> {
        let client = ctx.client()?;
        ui::print_target(&ctx.config);

        let fetched = client.token_detail(&self.token_id).await?;
        if ctx.json {
            println!("{}", fetched.raw);
            return Ok(());
        }

        match fetched.result {
            Normalized::Known(token) => {
                // The canonical token carries the common fields; the raw
                // payload may carry extras (caveats, delegation chain)
                // worth showing verbatim.
                let extras: Value = serde_json::from_str(&fetched.raw).unwrap_or(Value::Null);
                render_detail(&token, &extras);
            }
            Normalized::Unrecognized(value) => {
                println!("{}", normalize::pretty(&value));
            }
        }
        Ok(())
    }
}

fn render_detail(token: &Token, extras: &Value) {
    println!("{}", "Token".bold());
    ui::rule();
    println!("ID:      {}", token.id);
    if !token.name.is_empty() {
        println!("Name:    {}", token.name);
    }
    println!("Status:  {}", token.status);
    println!("Spent:   {}", token.spent);
    println!("Budget:  {}", budget_cell(token));
    if !token.expires_at.is_empty() {
        println!("Expires: {}", token.expires_at);
    }
    if let Some(parent) = &token.parent_id {
        println!("Parent:  {parent}");
    }

    for (key, label) in [
        ("created_at", "Created"),
        ("caveats", "Caveats"),
        ("routes", "Routes"),
        ("delegation_chain", "Chain"),
    ] {
        if let Some(extra) = extras.get(key) {
            match extra {
                Value::String(s) if !s.is_empty() => println!("{label}: {s}"),
                Value::Array(items) if !items.is_empty() => {
                    println!("{label}:");
                    for item in items {
                        match item {
                            Value::String(s) => println!("  - {s}"),
                            other => println!("  - {}", normalize::pretty(other)),
                        }
                    }
                }
                _ => {}
            }
        }
    }
}
