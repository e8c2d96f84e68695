//! `satgate spend` - org-wide or per-agent spend summary.

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use satgate_client::model::{CostCenterRollup, OrgSpend, SpendReport};
use satgate_client::normalize::{self, Normalized};

use crate::commands::Ctx;
use crate::ui;

#[derive(Args)]
pub struct SpendCommand {
    /// Filter to one agent
    #[arg(long)]
    agent: Option<String>,

    /// Reporting period (e.g. 7d, 30d)
    #[arg(long)]
    period: Option<String>,
}

impl SpendCommand {
    pub async fn run(&self, ctx: &Ctx) -> Result<()> {
        let client = ctx.client()?;
        ui::print_target(&ctx.config);

        let fetched = client
            .spend(self.agent.as_deref(), self.period.as_deref())
            .await?;
        if ctx.json {
            println!("{}", fetched.raw);
            return Ok(());
        }

        match fetched.result {
            Normalized::Known(SpendReport::Org(org)) => render_org(&org),
            Normalized::Known(SpendReport::CostCenters(rollups)) => render_rollups(&rollups),
            Normalized::Unrecognized(value) => {
                println!("{}", normalize::pretty(&value));
            }
        }
        Ok(())
    }
}

fn render_org(org: &OrgSpend) {
    println!("{}", "Spend summary".bold());
    ui::rule();
    println!("Allocated: {}", org.total_allocated);
    match org.utilization() {
        Some(pct) => println!("Consumed:  {} ({pct:.1}%)", org.total_consumed),
        None => println!("Consumed:  {}", org.total_consumed),
    }

    if org.agents.is_empty() {
        return;
    }
    println!();
    let rows: Vec<Vec<String>> = org
        .agents
        .iter()
        .map(|agent| {
            let (budget, utilization) = if agent.budget.is_zero() {
                ("unlimited".to_string(), "—".to_string())
            } else {
                let pct = agent.spent.as_dollars() / agent.budget.as_dollars() * 100.0;
                (agent.budget.to_string(), format!("{pct:.1}%"))
            };
            vec![
                agent.name.clone(),
                agent.spent.to_string(),
                budget,
                utilization,
            ]
        })
        .collect();
    ui::print_table(&["AGENT", "SPENT", "BUDGET", "UTILIZATION"], &rows);
}

fn render_rollups(rollups: &[CostCenterRollup]) {
    println!("{}", "Cost-center rollup".bold());
    ui::rule();
    let rows: Vec<Vec<String>> = rollups
        .iter()
        .map(|rollup| {
            vec![
                rollup.cost_center.clone(),
                rollup.department.clone(),
                rollup.consumed.to_string(),
                rollup.allocated.to_string(),
                format!("{:.1}%", rollup.percent_used),
            ]
        })
        .collect();
    ui::print_table(
        &["COST CENTER", "DEPARTMENT", "CONSUMED", "ALLOCATED", "USED"],
        &rows,
    );
}
