use super::state::{SELECT_OPTION_PROMPT, State};
use crate::dates::WIRE_FORMAT;
use crate::views::Resource;
use crate::views::table::Table;

pub fn render(state: &State) -> String {
    let mut out = String::from("Add Holiday Plan\n");
    if let Some(notice) = &state.notice {
        out.push_str(&format!("{}\n", notice));
    }
    if let Some(error) = &state.error {
        out.push_str(&format!("Error: {}\n", error));
    }

    let Some(option) = state.form.option else {
        out.push_str(SELECT_OPTION_PROMPT);
        return out;
    };
    out.push_str(&format!("Option: {}\n", option.label()));
    if let Some(file) = &state.file {
        out.push_str(&format!("Selected file: {}\n", file.display()));
    }

    match &state.plans {
        Resource::NotAsked | Resource::Loading => out.push_str("Loading..."),
        Resource::Failure(message) => out.push_str(message),
        Resource::Success(_) => {
            let mut table = Table::new(["Sr. No", "Date", "Day", "Holiday", "Details"]);
            table.empty_message(format!("No holiday plans for {}.", option.label()));
            for (index, plan) in state.visible_plans().into_iter().enumerate() {
                table.row([
                    (index + 1).to_string(),
                    plan.date.format(WIRE_FORMAT).to_string(),
                    plan.day.clone(),
                    plan.name.clone(),
                    plan.details.clone().unwrap_or_default(),
                ]);
            }
            out.push_str(&table.render());
        }
    }
    out
}
