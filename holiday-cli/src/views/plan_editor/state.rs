use std::path::PathBuf;

use crate::api::{HolidayPlanEntry, PlanOption};
use crate::views::Resource;

pub const SELECT_OPTION_PROMPT: &str = "Please select an option to view holiday plans.";
pub const FETCH_PLANS_FAILED: &str = "Failed to fetch holiday plans.";
pub const ADD_SUCCEEDED: &str = "Holiday added successfully!";
pub const ADD_FAILED: &str = "Failed to add holiday plan.";
pub const NO_FILE_SELECTED: &str = "Please select a file to upload.";
pub const UPLOAD_SUCCEEDED: &str = "Holidays added successfully!";
pub const UPLOAD_FAILED: &str = "Failed to upload holiday plans:";

#[derive(Debug, Default)]
pub struct State {
    /// Every plan on the server, unfiltered
    pub plans: Resource<Vec<HolidayPlanEntry>>,
    pub form: PlanForm,
    pub file: Option<PathBuf>,
    pub error: Option<String>,
    pub notice: Option<String>,
}

impl State {
    /// Plans for the selected option in server order; empty with no option
    pub fn visible_plans(&self) -> Vec<&HolidayPlanEntry> {
        match (self.form.option, self.plans.success()) {
            (Some(option), Some(plans)) => plans.iter().filter(|p| p.option == option).collect(),
            _ => Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlanForm {
    pub option: Option<PlanOption>,
    pub date: String,
    pub day: String,
    pub name: String,
    pub details: String,
}

impl PlanForm {
    /// First required field left blank, if any
    pub fn missing_field(&self) -> Option<&'static str> {
        if self.option.is_none() {
            return Some("option");
        }
        [
            ("date", &self.date),
            ("day", &self.day),
            ("name", &self.name),
            ("details", &self.details),
        ]
        .into_iter()
        .find(|(_, value)| value.trim().is_empty())
        .map(|(field, _)| field)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    /// Mark the plan list as loading
    Mount,
    PlansLoaded(Result<Vec<HolidayPlanEntry>, String>),
    SelectOption(Option<PlanOption>),
    SetDate(String),
    SetDay(String),
    SetName(String),
    SetDetails(String),
    Submit,
    SelectFile(PathBuf),
    UploadFile,
}
