use crate::api::{AssignmentMap, Holiday, PlanCache, PlanOption};
use crate::views::Resource;

pub const FETCH_HOLIDAYS_FAILED: &str = "Failed to fetch holidays.";
pub const FETCH_PLANS_FAILED: &str = "Failed to fetch holiday plans.";
pub const ASSIGN_FAILED: &str = "Failed to assign holiday plan.";
pub const ASSIGN_SUCCEEDED: &str = "Holiday plan assigned successfully!";

#[derive(Debug, Default)]
pub struct State {
    pub holidays: Resource<Vec<Holiday>>,
    pub assigned: AssignmentMap,
    pub plan_cache: PlanCache,
    pub assign_form: AssignForm,
    pub modal: Modal,
    /// Inline error; never hides the table
    pub error: Option<String>,
    pub notice: Option<String>,
}

impl State {
    pub fn holiday(&self, id: i64) -> Option<&Holiday> {
        self.holidays.success()?.iter().find(|h| h.id == id)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AssignForm {
    pub holiday_id: Option<i64>,
    pub option: Option<PlanOption>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Modal {
    #[default]
    None,
    Assign,
    Details(i64),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    /// Restore local state and mark the holiday list as loading
    Mount,
    HolidaysLoaded(Result<Vec<Holiday>, String>),
    LeavePolicy(i64),
    SelectOption(PlanOption),
    SubmitAssignment,
    ClearPlans(i64),
    ViewDetails(i64),
    CloseModal,
}
