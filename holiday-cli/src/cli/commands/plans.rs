//! `plans` subcommands, backed by the Holiday Plan Editor view

use std::path::PathBuf;

use anyhow::{Result, bail};
use clap::Subcommand;
use colored::*;
use log::debug;

use super::{print_header, print_loading};
use crate::api::PlanOption;
use crate::cli::AppContext;
use crate::cli::prompt::resolve_option;
use crate::cli::shell::Route;
use crate::import::{ImportStrategy, write_template};
use crate::views::PlanEditorApp;
use crate::views::plan_editor::Msg;

#[derive(Subcommand)]
pub enum PlansCommands {
    /// Show the plans of one option
    List {
        /// Plan option (option1..option6); prompted for when omitted
        #[arg(long)]
        option: Option<PlanOption>,
    },
    /// Add a single plan entry
    Add {
        #[arg(long)]
        option: Option<PlanOption>,
        /// Any common date format; sent as YYYY-MM-DD
        #[arg(long)]
        date: String,
        #[arg(long)]
        day: String,
        #[arg(long)]
        name: String,
        #[arg(long)]
        details: String,
    },
    /// Bulk-import plan entries from the first sheet of a workbook
    Import {
        /// .xlsx, .xls, .xlsm or .xlsb file
        file: PathBuf,
        #[arg(long)]
        option: Option<PlanOption>,
        /// validate-first or concurrent (defaults to the configured strategy)
        #[arg(long)]
        strategy: Option<ImportStrategy>,
    },
    /// Write a starter workbook with the expected columns
    Template {
        /// Output path
        output: PathBuf,
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

pub async fn handle_plans_command(ctx: &AppContext, command: PlansCommands) -> Result<()> {
    match command {
        PlansCommands::List { option } => {
            let mut app = PlanEditorApp::new(ctx.repo(), ctx.config.import.strategy);
            app.update(Msg::SelectOption(resolve_option(option)?)).await;
            app.update(Msg::Mount).await;
            print_loading(&app.render());
            let loaded = app.load_plans().await;
            app.update(loaded).await;
            if let Some(message) = app.state.plans.failure() {
                bail!("{}", message);
            }

            print_header(Route::AddHoliday);
            println!("{}", app.render());
        }

        PlansCommands::Add {
            option,
            date,
            day,
            name,
            details,
        } => {
            let option = require_option(option)?;
            let mut app = PlanEditorApp::new(ctx.repo(), ctx.config.import.strategy);
            app.update(Msg::SelectOption(Some(option))).await;
            app.update(Msg::SetDate(date)).await;
            app.update(Msg::SetDay(day)).await;
            app.update(Msg::SetName(name)).await;
            app.update(Msg::SetDetails(details)).await;
            app.update(Msg::Submit).await;

            if let Some(error) = &app.state.error {
                bail!("{}", error);
            }
            // The form resets after a write; show the option just written
            app.update(Msg::SelectOption(Some(option))).await;
            print_header(Route::AddHoliday);
            println!("{}", app.render());
        }

        PlansCommands::Import {
            file,
            option,
            strategy,
        } => {
            let option = require_option(option)?;
            let strategy = strategy.unwrap_or(ctx.config.import.strategy);
            let mut app = PlanEditorApp::new(ctx.repo(), strategy);
            app.update(Msg::SelectOption(Some(option))).await;
            app.update(Msg::SelectFile(file)).await;
            app.update(Msg::UploadFile).await;

            let stats = ctx.api.limiter_stats();
            if stats.enabled {
                debug!(
                    "Import used {} permits ({} waited, {} of {} still in use)",
                    stats.requests_acquired,
                    stats.requests_waited,
                    stats.in_use(),
                    stats.max_concurrent_requests
                );
            }

            if let Some(error) = &app.state.error {
                bail!("{}", error);
            }
            app.update(Msg::SelectOption(Some(option))).await;
            print_header(Route::AddHoliday);
            println!("{}", app.render());
        }

        PlansCommands::Template { output, force } => {
            if output.exists() && !force {
                bail!(
                    "File already exists: {} (use --force to overwrite)",
                    output.display()
                );
            }
            write_template(&output)?;
            println!(
                "{} Wrote import template to {}",
                "✓".green(),
                output.display().to_string().cyan()
            );
        }
    }
    Ok(())
}

fn require_option(option: Option<PlanOption>) -> Result<PlanOption> {
    match resolve_option(option)? {
        Some(option) => Ok(option),
        None => bail!("Please select an option. Pass --option option1..option6"),
    }
}
