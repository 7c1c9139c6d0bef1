//! `cache` subcommands

use anyhow::Result;
use clap::Subcommand;
use colored::*;

use crate::cli::AppContext;
use crate::config::repository::cache::clear_all;

#[derive(Subcommand)]
pub enum CacheCommands {
    /// Forget local plan assignments and cached plan lists
    Clear,
}

pub async fn handle_cache_command(ctx: &AppContext, command: CacheCommands) -> Result<()> {
    match command {
        CacheCommands::Clear => {
            clear_all(ctx.store.as_ref()).await?;
            println!("{} Cleared local holiday plan state", "✓".green());
        }
    }
    Ok(())
}
