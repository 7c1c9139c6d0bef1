//! `holidays` subcommands, backed by the Holiday List view

use anyhow::{Result, bail};
use clap::Subcommand;
use colored::*;
use log::debug;

use super::{print_header, print_loading};
use crate::api::{HolidayRepository, NewHoliday, PlanOption};
use crate::cli::AppContext;
use crate::cli::prompt::resolve_option;
use crate::cli::shell::Route;
use crate::views::HolidayListApp;
use crate::views::holiday_list::{Modal, Msg};

#[derive(Subcommand)]
pub enum HolidaysCommands {
    /// Show every holiday and the plan assigned to it
    List,
    /// Assign a plan option to a holiday
    Assign {
        /// Holiday ID
        id: i64,
        /// Plan option (option1..option6); prompted for when omitted
        #[arg(long)]
        option: Option<PlanOption>,
    },
    /// Remove the locally recorded assignment for a holiday
    Clear {
        /// Holiday ID
        id: i64,
    },
    /// Show the assignment for a holiday and the plans of its option
    Details {
        /// Holiday ID
        id: i64,
    },
    /// Create a holiday record
    Add {
        #[arg(long)]
        organisation_id: String,
        #[arg(long)]
        location: String,
        #[arg(long)]
        sublocation: Option<String>,
        #[arg(long)]
        subsublocation: Option<String>,
    },
    /// List every option the server has recorded for a holiday
    Assigned {
        /// Holiday ID
        id: i64,
    },
}

pub async fn handle_holidays_command(ctx: &AppContext, command: HolidaysCommands) -> Result<()> {
    match command {
        HolidaysCommands::List => {
            let app = mounted(ctx).await?;
            print_header(Route::Home);
            println!("{}", app.render());
        }

        HolidaysCommands::Assign { id, option } => {
            let mut app = mounted(ctx).await?;
            if app.state.holiday(id).is_none() {
                bail!("Holiday {} not found", id);
            }

            app.update(Msg::LeavePolicy(id)).await;
            let Some(option) = resolve_option(option)? else {
                app.update(Msg::CloseModal).await;
                bail!("No option selected. Pass --option option1..option6");
            };
            app.update(Msg::SelectOption(option)).await;
            app.update(Msg::SubmitAssignment).await;

            if app.state.notice.is_none() {
                bail!(
                    "{}",
                    app.state.error.as_deref().unwrap_or("Assignment was not submitted")
                );
            }
            print_header(Route::Home);
            println!("{}", app.render());
        }

        HolidaysCommands::Clear { id } => {
            let mut app = HolidayListApp::new(ctx.repo(), ctx.store.clone());
            app.update(Msg::Mount).await;
            let had_assignment = app.state.assigned.contains_key(&id);
            app.update(Msg::ClearPlans(id)).await;

            if had_assignment {
                println!("{} Cleared plans for holiday {}", "✓".green(), id);
            } else {
                println!("No plans assigned to holiday {}", id);
            }
        }

        HolidaysCommands::Details { id } => {
            let mut app = mounted(ctx).await?;
            app.update(Msg::ViewDetails(id)).await;
            if app.state.modal != Modal::Details(id) {
                bail!("No plans assigned to holiday {}", id);
            }
            print_header(Route::Home);
            println!("{}", app.render());
        }

        HolidaysCommands::Add {
            organisation_id,
            location,
            sublocation,
            subsublocation,
        } => {
            let holiday = NewHoliday {
                organisation_id,
                location,
                sublocation,
                subsublocation,
            };
            let created = ctx.api.create_holiday(&holiday).await?;
            println!(
                "{} Created holiday {} ({}, {})",
                "✓".green(),
                created.id.to_string().bold(),
                created.organisation_id,
                created.location
            );
        }

        HolidaysCommands::Assigned { id } => {
            let options = ctx.api.assigned_options(id).await?;
            debug!("Server returned {} assignments for {}", options.len(), id);
            if options.is_empty() {
                println!("No assignments recorded for holiday {}", id);
            }
            for option in options {
                println!("{}", option.label());
            }
        }
    }
    Ok(())
}

/// Mounted view, or the blocking fetch error
async fn mounted(ctx: &AppContext) -> Result<HolidayListApp> {
    let mut app = HolidayListApp::new(ctx.repo(), ctx.store.clone());
    app.update(Msg::Mount).await;
    print_loading(&app.render());
    let loaded = app.load_holidays().await;
    app.update(loaded).await;
    if let Some(message) = app.state.holidays.failure() {
        bail!("{}", message);
    }
    Ok(app)
}
