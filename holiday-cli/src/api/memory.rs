//! In-memory repository used by view and import tests

use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use anyhow::{Result, anyhow, bail};
use async_trait::async_trait;
use chrono::NaiveDate;

use super::models::{
    AssignmentDetails, AssignmentRequest, Holiday, HolidayPlanEntry, NewHoliday, NewHolidayPlan,
    PlanOption,
};
use super::repository::HolidayRepository;

#[derive(Default)]
struct Inner {
    holidays: Vec<Holiday>,
    plans: Vec<HolidayPlanEntry>,
    assignments: Vec<(i64, PlanOption)>,
    plan_requests: Vec<NewHolidayPlan>,
    list_plan_calls: Vec<Option<PlanOption>>,
    fail_holidays: bool,
    fail_list_plans: bool,
    fail_assign: bool,
    fail_create_names: Vec<String>,
}

/// Behaves like the API server, with switches for injecting failures
#[derive(Default)]
pub struct InMemoryRepository {
    inner: Mutex<Inner>,
    create_delay: Option<Duration>,
    in_flight: AtomicUsize,
    peak_in_flight: AtomicUsize,
}

impl InMemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_holidays(self, holidays: Vec<Holiday>) -> Self {
        self.inner.lock().unwrap().holidays = holidays;
        self
    }

    pub fn with_plans(self, plans: Vec<HolidayPlanEntry>) -> Self {
        self.inner.lock().unwrap().plans = plans;
        self
    }

    pub fn with_create_delay(mut self, delay: Duration) -> Self {
        self.create_delay = Some(delay);
        self
    }

    pub fn fail_holidays(&self, fail: bool) {
        self.inner.lock().unwrap().fail_holidays = fail;
    }

    pub fn fail_list_plans(&self, fail: bool) {
        self.inner.lock().unwrap().fail_list_plans = fail;
    }

    pub fn fail_assign(&self, fail: bool) {
        self.inner.lock().unwrap().fail_assign = fail;
    }

    /// Reject `create_plan` for entries with this name
    pub fn fail_create_named(&self, name: &str) {
        self.inner.lock().unwrap().fail_create_names.push(name.to_string());
    }

    /// Every create payload received, in arrival order
    pub fn plan_requests(&self) -> Vec<NewHolidayPlan> {
        self.inner.lock().unwrap().plan_requests.clone()
    }

    pub fn stored_plans(&self) -> Vec<HolidayPlanEntry> {
        self.inner.lock().unwrap().plans.clone()
    }

    pub fn list_plan_calls(&self) -> Vec<Option<PlanOption>> {
        self.inner.lock().unwrap().list_plan_calls.clone()
    }

    pub fn peak_in_flight(&self) -> usize {
        self.peak_in_flight.load(Ordering::SeqCst)
    }
}

pub fn holiday(id: i64, organisation_id: &str, location: &str) -> Holiday {
    Holiday {
        id,
        organisation_id: organisation_id.to_string(),
        location: location.to_string(),
        sublocation: None,
        subsublocation: None,
    }
}

pub fn plan_entry(sr_no: i64, date: &str, name: &str, option: PlanOption) -> HolidayPlanEntry {
    HolidayPlanEntry {
        sr_no,
        date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
        day: "Monday".to_string(),
        name: name.to_string(),
        details: Some(format!("{} details", name)),
        option,
    }
}

#[async_trait]
impl HolidayRepository for InMemoryRepository {
    async fn list_holidays(&self) -> Result<Vec<Holiday>> {
        let inner = self.inner.lock().unwrap();
        if inner.fail_holidays {
            bail!("List holidays failed (500 Internal Server Error): boom");
        }
        Ok(inner.holidays.clone())
    }

    async fn create_holiday(&self, holiday: &NewHoliday) -> Result<Holiday> {
        let mut inner = self.inner.lock().unwrap();
        let created = Holiday {
            id: inner.holidays.iter().map(|h| h.id).max().unwrap_or(0) + 1,
            organisation_id: holiday.organisation_id.clone(),
            location: holiday.location.clone(),
            sublocation: holiday.sublocation.clone(),
            subsublocation: holiday.subsublocation.clone(),
        };
        inner.holidays.push(created.clone());
        Ok(created)
    }

    async fn list_plans(&self, option: Option<PlanOption>) -> Result<Vec<HolidayPlanEntry>> {
        let mut inner = self.inner.lock().unwrap();
        inner.list_plan_calls.push(option);
        if inner.fail_list_plans {
            bail!("List holiday plans failed (500 Internal Server Error): boom");
        }
        Ok(inner
            .plans
            .iter()
            .filter(|p| option.is_none_or(|o| p.option == o))
            .cloned()
            .collect())
    }

    async fn create_plan(&self, plan: &NewHolidayPlan) -> Result<HolidayPlanEntry> {
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak_in_flight.fetch_max(now, Ordering::SeqCst);
        if let Some(delay) = self.create_delay {
            tokio::time::sleep(delay).await;
        }
        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        let mut inner = self.inner.lock().unwrap();
        inner.plan_requests.push(plan.clone());
        if inner.fail_create_names.contains(&plan.name) {
            bail!("Create holiday plan failed (500 Internal Server Error): rejected");
        }
        let date = NaiveDate::parse_from_str(&plan.date, "%Y-%m-%d").map_err(|_| {
            anyhow!("Create holiday plan failed (400 Bad Request): Invalid date format")
        })?;

        let entry = HolidayPlanEntry {
            sr_no: inner.plans.iter().map(|p| p.sr_no).max().unwrap_or(0) + 1,
            date,
            day: plan.day.clone(),
            name: plan.name.clone(),
            details: Some(plan.details.clone()),
            option: plan.option,
        };
        inner.plans.push(entry.clone());
        Ok(entry)
    }

    async fn assign_plan(&self, request: &AssignmentRequest) -> Result<AssignmentDetails> {
        let mut inner = self.inner.lock().unwrap();
        if inner.fail_assign {
            bail!("Assign holiday plan failed (500 Internal Server Error): boom");
        }
        inner.assignments.push((request.holiday_id, request.options));
        let holiday = inner
            .holidays
            .iter()
            .find(|h| h.id == request.holiday_id)
            .cloned()
            .ok_or_else(|| {
                anyhow!("Assign holiday plan failed (404 Not Found): Holiday not found")
            })?;

        Ok(AssignmentDetails {
            organisation_id: Some(holiday.organisation_id),
            location: Some(holiday.location),
            sublocation: holiday.sublocation,
            subsublocation: holiday.subsublocation,
            ..Default::default()
        })
    }

    async fn assigned_options(&self, holiday_id: i64) -> Result<Vec<PlanOption>> {
        let inner = self.inner.lock().unwrap();
        Ok(inner
            .assignments
            .iter()
            .filter(|(id, _)| *id == holiday_id)
            .map(|(_, option)| *option)
            .collect())
    }
}
