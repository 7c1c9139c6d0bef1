use std::sync::Arc;

use log::{debug, info, warn};

use super::state::{
    ASSIGN_FAILED, ASSIGN_SUCCEEDED, AssignForm, FETCH_HOLIDAYS_FAILED, FETCH_PLANS_FAILED, Modal,
    Msg, State,
};
use super::view;
use crate::api::{Assignment, AssignmentRequest, HolidayRepository, PlanOption};
use crate::config::repository::StateStore;
use crate::config::repository::cache::{
    load_assignments, load_plan_cache, save_assignments, save_plan_cache,
};
use crate::views::Resource;

pub struct HolidayListApp {
    repo: Arc<dyn HolidayRepository>,
    store: Arc<dyn StateStore>,
    pub state: State,
}

impl HolidayListApp {
    pub fn new(repo: Arc<dyn HolidayRepository>, store: Arc<dyn StateStore>) -> Self {
        Self {
            repo,
            store,
            state: State::default(),
        }
    }

    pub async fn update(&mut self, msg: Msg) {
        match msg {
            Msg::Mount => {
                self.state.assigned = load_assignments(self.store.as_ref()).await;
                self.state.plan_cache = load_plan_cache(self.store.as_ref()).await;

                self.state.holidays = Resource::Loading;
            }

            Msg::HolidaysLoaded(result) => {
                self.state.holidays = match result {
                    Ok(holidays) => {
                        debug!("Loaded {} holidays", holidays.len());
                        Resource::Success(holidays)
                    }
                    Err(e) => {
                        warn!("Failed to fetch holidays: {}", e);
                        Resource::Failure(FETCH_HOLIDAYS_FAILED.to_string())
                    }
                };
            }

            Msg::LeavePolicy(holiday_id) => {
                self.state.assign_form = AssignForm {
                    holiday_id: Some(holiday_id),
                    option: None,
                };
                self.state.modal = Modal::Assign;
            }

            Msg::SelectOption(option) => {
                self.state.assign_form.option = Some(option);
                self.fetch_plans(option).await;
            }

            Msg::SubmitAssignment => self.submit_assignment().await,

            Msg::ClearPlans(holiday_id) => {
                if self.state.assigned.remove(&holiday_id).is_some() {
                    info!("Cleared plan assignment for holiday {}", holiday_id);
                }
                self.persist_assignments().await;
            }

            Msg::ViewDetails(holiday_id) => {
                if self.state.assigned.contains_key(&holiday_id) {
                    self.state.modal = Modal::Details(holiday_id);
                } else {
                    debug!("No assignment to show for holiday {}", holiday_id);
                }
            }

            Msg::CloseModal => {
                self.state.modal = Modal::None;
            }
        }
    }

    pub fn render(&self) -> String {
        view::render(&self.state)
    }

    /// Fetch every holiday, answering with the message that completes `Mount`
    pub async fn load_holidays(&self) -> Msg {
        Msg::HolidaysLoaded(
            self.repo
                .list_holidays()
                .await
                .map_err(|e| format!("{:#}", e)),
        )
    }

    async fn fetch_plans(&mut self, option: PlanOption) {
        match self.repo.list_plans(Some(option)).await {
            Ok(plans) => {
                debug!("Cached {} plans for {}", plans.len(), option);
                self.state.plan_cache.insert(option, plans);
                if let Err(e) = save_plan_cache(self.store.as_ref(), &self.state.plan_cache).await {
                    warn!("Failed to persist plan cache: {:#}", e);
                }
            }
            Err(e) => {
                warn!("Failed to fetch plans for {}: {:#}", option, e);
                self.state.error = Some(FETCH_PLANS_FAILED.to_string());
            }
        }
    }

    async fn submit_assignment(&mut self) {
        let (Modal::Assign, Some(holiday_id)) =
            (self.state.modal, self.state.assign_form.holiday_id)
        else {
            debug!("Ignoring assignment submit without an open form");
            return;
        };
        let Some(option) = self.state.assign_form.option else {
            self.state.error = Some("Please select an option.".to_string());
            return;
        };

        let request = AssignmentRequest {
            options: option,
            holiday_id,
        };
        match self.repo.assign_plan(&request).await {
            Ok(details) => {
                info!("Assigned {} to holiday {}", option, holiday_id);
                self.state
                    .assigned
                    .insert(holiday_id, Assignment { option, details });
                self.persist_assignments().await;

                self.state.assign_form = AssignForm::default();
                self.state.modal = Modal::None;
                self.state.error = None;
                self.state.notice = Some(ASSIGN_SUCCEEDED.to_string());
            }
            Err(e) => {
                warn!("Failed to assign {} to holiday {}: {:#}", option, holiday_id, e);
                self.state.error = Some(ASSIGN_FAILED.to_string());
            }
        }
    }

    async fn persist_assignments(&self) {
        if let Err(e) = save_assignments(self.store.as_ref(), &self.state.assigned).await {
            warn!("Failed to persist plan assignments: {:#}", e);
        }
    }
}
