//! `satgate configure` - interactively write the config file.

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use dialoguer::theme::ColorfulTheme;
use dialoguer::{Input, Select};
use satgate_config::{Config, FileConfig, DEFAULT_GATEWAY};

use crate::commands::Ctx;

#[derive(Args)]
pub struct ConfigureCommand {}

impl ConfigureCommand {
    pub fn run(&self, ctx: &Ctx) -> Result<()> {
        let theme = ColorfulTheme::default();

        let surfaces = ["gateway (self-hosted)", "cloud (cloud.satgate.io)"];
        let surface_idx = Select::with_theme(&theme)
            .with_prompt("Surface")
            .items(&surfaces)
            .default(0)
            .interact()?;

        let gateway: String = Input::with_theme(&theme)
            .with_prompt("Gateway URL")
            .default(if surface_idx == 1 {
                "https://cloud.satgate.io".to_string()
            } else {
                DEFAULT_GATEWAY.to_string()
            })
            .interact_text()?;

        let mut file = FileConfig {
            gateway: Some(gateway),
            ..FileConfig::default()
        };

        if surface_idx == 1 {
            file.surface = Some("cloud".to_string());
            let bearer: String = Input::with_theme(&theme)
                .with_prompt("Bearer token")
                .interact_text()?;
            let tenant: String = Input::with_theme(&theme)
                .with_prompt("Tenant slug (empty = default)")
                .allow_empty(true)
                .default(String::new())
                .interact_text()?;
            file.bearer_token = Some(bearer);
            if !tenant.is_empty() {
                file.tenant = Some(tenant);
            }
        } else {
            file.surface = Some("gateway".to_string());
            let admin: String = Input::with_theme(&theme)
                .with_prompt("Admin token")
                .interact_text()?;
            file.admin_token = Some(admin);
        }

        let formats = ["table", "json"];
        let format_idx = Select::with_theme(&theme)
            .with_prompt("Default output format")
            .items(&formats)
            .default(0)
            .interact()?;
        file.format = Some(formats[format_idx].to_string());

        let path = ctx
            .config_path
            .clone()
            .or_else(Config::default_path)
            .context("cannot determine config path; pass --config")?;
        file.save(&path)?;

        println!("{} Config saved to {}", "✓".green(), path.display());
        Ok(())
    }
}
