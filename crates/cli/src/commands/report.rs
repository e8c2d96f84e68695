//! `satgate report` - operator reports.

use anyhow::Result;
use clap::{Args, Subcommand};
use colored::Colorize;
use satgate_client::model::ThreatReport;
use satgate_client::normalize::{self, Normalized};

use crate::commands::Ctx;
use crate::ui;

#[derive(Args)]
pub struct ReportCommand {
    #[command(subcommand)]
    kind: ReportKind,
}

#[derive(Subcommand)]
enum ReportKind {
    /// Blocked-request summary: totals, categories, recent events
    Threats,
}

impl ReportCommand {
    pub async fn run(&self, ctx: &Ctx) -> Result<()> {
        match self.kind {
            ReportKind::Threats => self.threats(ctx).await,
        }
    }

    async fn threats(&self, ctx: &Ctx) -> Result<()> {
        let client = ctx.client()?;
        ui::print_target(&ctx.config);

        let fetched = client.threat_report().await?;
        if ctx.json {
            println!("{}", fetched.raw);
            return Ok(());
        }

        match fetched.result {
            Normalized::Known(report) => render_threats(&report),
            Normalized::Unrecognized(value) => {
                println!("{}", normalize::pretty(&value));
            }
        }
        Ok(())
    }
}

fn render_threats(report: &ThreatReport) {
    println!("{}", "Threat report".bold());
    ui::rule();
    println!("Blocked requests: {}", report.total_blocked);

    if !report.categories.is_empty() {
        println!();
        let rows: Vec<Vec<String>> = report
            .categories
            .iter()
            .map(|cat| vec![cat.name.clone(), cat.count.to_string()])
            .collect();
        ui::print_table(&["CATEGORY", "COUNT"], &rows);
    }

    if !report.recent.is_empty() {
        println!();
        println!("{}", "Recent events".bold());
        let rows: Vec<Vec<String>> = report
            .recent
            .iter()
            .map(|event| {
                vec![
                    ui::truncate(&event.time, 19),
                    event.kind.clone(),
                    event.agent.clone(),
                    ui::truncate(&event.route, 30),
                    event.action.clone(),
                ]
            })
            .collect();
        ui::print_table(&["TIME", "TYPE", "AGENT", "ROUTE", "ACTION"], &rows);
    }
}
