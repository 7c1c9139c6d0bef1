//! Interactive fallbacks for omitted arguments

use anyhow::Result;
use dialoguer::Select;
use dialoguer::theme::ColorfulTheme;
use is_terminal::IsTerminal;

use crate::api::PlanOption;

/// Use `option` when given; otherwise ask on an interactive terminal.
/// Returns `None` when nothing was chosen or stdin is not a terminal.
pub fn resolve_option(option: Option<PlanOption>) -> Result<Option<PlanOption>> {
    if option.is_some() {
        return Ok(option);
    }
    if !std::io::stdin().is_terminal() || !std::io::stdout().is_terminal() {
        return Ok(None);
    }

    let labels: Vec<String> = PlanOption::ALL.iter().map(|o| o.label()).collect();
    let choice = Select::with_theme(&ColorfulTheme::default())
        .with_prompt("Select an option")
        .items(&labels)
        .default(0)
        .interact_opt()?;

    Ok(choice.map(|index| PlanOption::ALL[index]))
}
