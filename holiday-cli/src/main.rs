mod api;
mod cli;
mod config;
mod dates;
mod import;
mod views;

use std::path::{Path, PathBuf};

use anyhow::{Result, bail};
use clap::{Parser, Subcommand};
use log::debug;

use cli::AppContext;
use cli::commands::cache::{CacheCommands, handle_cache_command};
use cli::commands::config::{ConfigCommands, handle_config_command};
use cli::commands::holidays::{HolidaysCommands, handle_holidays_command};
use cli::commands::plans::{PlansCommands, handle_plans_command};
use cli::shell::{Route, render_routes};
use config::Config;

#[derive(Parser)]
#[command(
    name = "holiday-cli",
    version,
    about = "Manage holiday plans and assign them to locations"
)]
struct Cli {
    /// Base URL of the holiday plans API (overrides HOLIDAY_API_URL)
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Config file to use instead of the default location
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// State database path (overrides HOLIDAY_STATE_DB)
    #[arg(long, global = true)]
    state_db: Option<PathBuf>,

    /// Keep assignments and cached plans in memory only
    #[arg(long, global = true)]
    no_persist: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    /// Log debug output to stderr
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Holiday list: view holidays and assign plans (route "/")
    Holidays {
        #[command(subcommand)]
        command: HolidaysCommands,
    },
    /// Plan editor: list, add and import plan entries (route "/add-holiday")
    Plans {
        #[command(subcommand)]
        command: PlansCommands,
    },
    /// Show the route table
    Routes,
    /// Open the view behind a route path
    Open {
        /// "/" or "/add-holiday"
        path: String,
    },
    /// Config file management
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
    /// Local state management
    Cache {
        #[command(subcommand)]
        command: CacheCommands,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let default_level = if cli.verbose > 0 { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    if cli.no_color {
        colored::control::set_override(false);
    }

    let command = match cli.command {
        Commands::Routes => {
            println!("{}", render_routes());
            return Ok(());
        }
        Commands::Config { command } => {
            let config_file = cli.config.clone();
            return handle_config_command(config_file, command, || {
                resolve_config(cli.config.as_deref(), cli.api_url, cli.state_db)
            });
        }
        Commands::Open { path } => match Route::from_path(&path) {
            Some(Route::Home) => Commands::Holidays {
                command: HolidaysCommands::List,
            },
            Some(Route::AddHoliday) => Commands::Plans {
                command: PlansCommands::List { option: None },
            },
            None => bail!(
                "No route for '{}'. Run 'holiday-cli routes' to list routes.",
                path
            ),
        },
        other => other,
    };

    let config = resolve_config(cli.config.as_deref(), cli.api_url, cli.state_db)?;
    let ctx = AppContext::new(config, !cli.no_persist).await?;
    match command {
        Commands::Holidays { command } => handle_holidays_command(&ctx, command).await,
        Commands::Plans { command } => handle_plans_command(&ctx, command).await,
        Commands::Cache { command } => handle_cache_command(&ctx, command).await,
        Commands::Routes | Commands::Config { .. } | Commands::Open { .. } => Ok(()),
    }
}

/// Config file, then `HOLIDAY_*` env vars, then command-line flags
fn resolve_config(
    config_file: Option<&Path>,
    api_url: Option<String>,
    state_db: Option<PathBuf>,
) -> Result<Config> {
    let mut config = Config::load(config_file)?;
    config.apply_env()?;
    if let Some(url) = api_url {
        config.api.base_url = url;
    }
    if let Some(path) = state_db {
        config.state.database = Some(path);
    }
    debug!("Effective config: {:?}", config);
    Ok(config)
}
