use super::state::{Modal, State};
use crate::api::{Assignment, HolidayPlanEntry};
use crate::dates::WIRE_FORMAT;
use crate::views::Resource;
use crate::views::table::Table;

const NOT_AVAILABLE: &str = "N/A";

pub fn render(state: &State) -> String {
    let holidays = match &state.holidays {
        Resource::Success(holidays) => holidays,
        Resource::Failure(message) => return message.clone(),
        Resource::NotAsked | Resource::Loading => return "Loading...".to_string(),
    };

    let mut out = String::from("Holiday Plans\n");
    if let Some(notice) = &state.notice {
        out.push_str(&format!("{}\n", notice));
    }
    if let Some(error) = &state.error {
        out.push_str(&format!("Error: {}\n", error));
    }

    let mut table = Table::new([
        "ID",
        "Organisation ID",
        "Location",
        "Sublocation",
        "SubSublocation",
        "See Plans",
    ]);
    table.empty_message("No holidays found.");
    for holiday in holidays {
        let plans = state
            .assigned
            .get(&holiday.id)
            .map(|a| a.option.label())
            .unwrap_or_else(|| "No plans assigned".to_string());
        table.row([
            holiday.id.to_string(),
            holiday.organisation_id.clone(),
            holiday.location.clone(),
            or_na(holiday.sublocation.as_deref()),
            or_na(holiday.subsublocation.as_deref()),
            plans,
        ]);
    }
    out.push_str(&table.render());

    match state.modal {
        Modal::None => {}
        Modal::Assign => {
            out.push_str("\n\n");
            out.push_str(&render_assign(state));
        }
        Modal::Details(id) => {
            if let Some(assignment) = state.assigned.get(&id) {
                out.push_str("\n\n");
                out.push_str(&render_details(state, id, assignment));
            }
        }
    }
    out
}

fn render_assign(state: &State) -> String {
    let holiday = state
        .assign_form
        .holiday_id
        .map(|id| id.to_string())
        .unwrap_or_default();
    let option = state
        .assign_form
        .option
        .map(|o| o.label())
        .unwrap_or_else(|| "Select an option...".to_string());
    format!("Assign Holiday Plan\nHoliday: {}\nOption: {}", holiday, option)
}

/// Read-only view of one assignment and the cached plans for its option
fn render_details(state: &State, holiday_id: i64, assignment: &Assignment) -> String {
    let details = &assignment.details;
    let fallback = state.holiday(holiday_id);

    let organisation = details
        .organisation_id
        .as_deref()
        .or(fallback.map(|h| h.organisation_id.as_str()));
    let location = details
        .location
        .as_deref()
        .or(fallback.map(|h| h.location.as_str()));

    let mut out = format!("Holiday Plan Details ({})\n", assignment.option.label());
    out.push_str(&format!("Organisation ID: {}\n", or_na(organisation)));
    out.push_str(&format!("Location: {}\n", or_na(location)));
    out.push_str(&format!("Sublocation: {}\n", or_na(details.sublocation.as_deref())));
    out.push_str(&format!(
        "SubSublocation: {}\n",
        or_na(details.subsublocation.as_deref())
    ));

    let plans = state
        .plan_cache
        .get(&assignment.option)
        .map(Vec::as_slice)
        .unwrap_or_default();
    out.push_str(&plan_table(plans).render());
    out
}

fn plan_table(plans: &[HolidayPlanEntry]) -> Table {
    let mut table = Table::new(["Sr. No", "Date", "Day", "Holiday", "Details"]);
    table.empty_message("No plans available for this option.");
    for plan in plans {
        table.row([
            plan.sr_no.to_string(),
            plan.date.format(WIRE_FORMAT).to_string(),
            plan.day.clone(),
            plan.name.clone(),
            plan.details.clone().unwrap_or_default(),
        ]);
    }
    table
}

fn or_na(value: Option<&str>) -> String {
    match value {
        Some(v) if !v.trim().is_empty() => v.to_string(),
        _ => NOT_AVAILABLE.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::memory::{holiday, plan_entry};
    use crate::api::PlanOption;
    use crate::api::models::AssignmentDetails;

    fn loaded_state() -> State {
        let mut pune = holiday(1, "ORG1", "Pune");
        pune.sublocation = Some("Hinjewadi".to_string());
        State {
            holidays: Resource::Success(vec![pune, holiday(2, "ORG2", "Mumbai")]),
            ..Default::default()
        }
    }

    #[test]
    fn test_table_fills_missing_locations() {
        let mut state = loaded_state();
        state.assigned.insert(
            1,
            Assignment {
                option: PlanOption::Option3,
                details: AssignmentDetails::default(),
            },
        );

        let rendered = render(&state);
        assert!(rendered.starts_with("Holiday Plans\n"));
        assert!(rendered.contains("Hinjewadi"));
        assert!(rendered.contains("N/A"));
        assert!(rendered.contains("Option 3"));
        assert!(rendered.contains("No plans assigned"));
    }

    #[test]
    fn test_loading_and_failure() {
        let mut state = State::default();
        assert_eq!(render(&state), "Loading...");
        state.holidays = Resource::Failure("Failed to fetch holidays.".to_string());
        assert_eq!(render(&state), "Failed to fetch holidays.");
    }

    #[test]
    fn test_details_without_cached_plans() {
        let mut state = loaded_state();
        let assignment = Assignment {
            option: PlanOption::Option2,
            details: AssignmentDetails {
                location: Some("Pune HQ".to_string()),
                ..Default::default()
            },
        };
        state.assigned.insert(1, assignment.clone());
        state.modal = Modal::Details(1);

        let rendered = render(&state);
        assert!(rendered.contains("Holiday Plan Details (Option 2)"));
        assert!(rendered.contains("Organisation ID: ORG1"));
        assert!(rendered.contains("Location: Pune HQ"));
        assert!(rendered.contains("SubSublocation: N/A"));
        assert!(rendered.contains("No plans available for this option."));
    }

    #[test]
    fn test_details_list_cached_plans() {
        let mut state = loaded_state();
        state.plan_cache.insert(
            PlanOption::Option1,
            vec![plan_entry(7, "2024-01-26", "Republic Day", PlanOption::Option1)],
        );
        let assignment = Assignment {
            option: PlanOption::Option1,
            details: AssignmentDetails::default(),
        };

        let rendered = render_details(&state, 2, &assignment);
        assert!(rendered.contains("| 7      | 2024-01-26 |"));
        assert!(rendered.contains("Republic Day"));
        assert!(!rendered.contains("No plans available"));
    }
}
