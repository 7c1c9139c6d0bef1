//! Repository interface the views talk to
//!
//! Views never issue HTTP calls directly. They hold an
//! `Arc<dyn HolidayRepository>`, which is the HTTP client in production and
//! an in-memory fake in tests.

use anyhow::Result;
use async_trait::async_trait;

use super::models::{
    AssignmentDetails, AssignmentRequest, Holiday, HolidayPlanEntry, NewHoliday, NewHolidayPlan,
    PlanOption,
};

#[async_trait]
pub trait HolidayRepository: Send + Sync {
    /// `GET /api/holidays`
    async fn list_holidays(&self) -> Result<Vec<Holiday>>;

    /// `POST /api/holidays`
    async fn create_holiday(&self, holiday: &NewHoliday) -> Result<Holiday>;

    /// `GET /api/holidayplans`, optionally narrowed server-side by option
    async fn list_plans(&self, option: Option<PlanOption>) -> Result<Vec<HolidayPlanEntry>>;

    /// `POST /api/holidayplans`
    async fn create_plan(&self, plan: &NewHolidayPlan) -> Result<HolidayPlanEntry>;

    /// `POST /api/holidayplan`. The response body is returned verbatim.
    async fn assign_plan(&self, request: &AssignmentRequest) -> Result<AssignmentDetails>;

    /// `GET /api/assigned_plans?holiday_id=`: every option the server has
    /// recorded for a holiday, oldest first
    async fn assigned_options(&self, holiday_id: i64) -> Result<Vec<PlanOption>>;
}
