use std::sync::Arc;

use anyhow::{Result, anyhow};
use log::{debug, info, warn};

use super::state::{
    ADD_FAILED, ADD_SUCCEEDED, FETCH_PLANS_FAILED, Msg, NO_FILE_SELECTED, PlanForm, State,
    UPLOAD_FAILED, UPLOAD_SUCCEEDED,
};
use super::view;
use crate::api::{HolidayPlanEntry, HolidayRepository, NewHolidayPlan};
use crate::dates::normalize_date;
use crate::import::{ImportStrategy, import_file};
use crate::views::Resource;

pub struct PlanEditorApp {
    repo: Arc<dyn HolidayRepository>,
    strategy: ImportStrategy,
    pub state: State,
}

impl PlanEditorApp {
    pub fn new(repo: Arc<dyn HolidayRepository>, strategy: ImportStrategy) -> Self {
        Self {
            repo,
            strategy,
            state: State::default(),
        }
    }

    pub async fn update(&mut self, msg: Msg) {
        match msg {
            Msg::Mount => self.state.plans = Resource::Loading,

            Msg::PlansLoaded(result) => self.set_plans(result),

            Msg::SelectOption(option) => self.state.form.option = option,
            Msg::SetDate(value) => self.state.form.date = value,
            Msg::SetDay(value) => self.state.form.day = value,
            Msg::SetName(value) => self.state.form.name = value,
            Msg::SetDetails(value) => self.state.form.details = value,

            Msg::Submit => match self.submit().await {
                Ok(()) => {
                    self.state.error = None;
                    self.state.notice = Some(ADD_SUCCEEDED.to_string());
                    self.state.form = PlanForm::default();
                    self.refresh().await;
                }
                Err(e) => {
                    warn!("Failed to add holiday plan: {:#}", e);
                    self.state.error = Some(format!("{} ({})", ADD_FAILED, e));
                }
            },

            Msg::SelectFile(path) => {
                debug!("Selected import file {}", path.display());
                self.state.file = Some(path);
            }

            Msg::UploadFile => self.upload().await,
        }
    }

    pub fn render(&self) -> String {
        view::render(&self.state)
    }

    /// Fetch every plan, answering with the message that completes `Mount`
    pub async fn load_plans(&self) -> Msg {
        Msg::PlansLoaded(
            self.repo
                .list_plans(None)
                .await
                .map_err(|e| format!("{:#}", e)),
        )
    }

    /// Reload after a write; the current list stays visible until the fetch settles
    async fn refresh(&mut self) {
        let result = self.repo.list_plans(None).await.map_err(|e| format!("{:#}", e));
        self.set_plans(result);
    }

    fn set_plans(&mut self, result: Result<Vec<HolidayPlanEntry>, String>) {
        self.state.plans = match result {
            Ok(plans) => {
                debug!("Loaded {} holiday plans", plans.len());
                Resource::Success(plans)
            }
            Err(e) => {
                warn!("Failed to fetch holiday plans: {}", e);
                Resource::Failure(FETCH_PLANS_FAILED.to_string())
            }
        };
    }

    async fn submit(&self) -> Result<()> {
        let form = &self.state.form;
        if let Some(field) = form.missing_field() {
            return Err(anyhow!("{} is required", field));
        }
        let option = form.option.ok_or_else(|| anyhow!("option is required"))?;

        let plan = NewHolidayPlan {
            date: normalize_date(form.date.trim())?,
            day: form.day.trim().to_string(),
            name: form.name.trim().to_string(),
            details: form.details.trim().to_string(),
            option,
        };
        let created = self.repo.create_plan(&plan).await?;
        info!("Created holiday plan {} ({})", created.sr_no, created.name);
        Ok(())
    }

    async fn upload(&mut self) {
        let Some(path) = self.state.file.clone() else {
            self.state.error = Some(NO_FILE_SELECTED.to_string());
            return;
        };
        let Some(option) = self.state.form.option else {
            self.state.error = Some(format!("{} no option selected", UPLOAD_FAILED));
            return;
        };

        match import_file(self.repo.as_ref(), &path, option, self.strategy).await {
            Ok(outcome) => {
                info!(
                    "Imported {} of {} rows for {} from {}",
                    outcome.created.len(),
                    outcome.submitted,
                    option,
                    path.display()
                );
                self.state.error = None;
                self.state.notice = Some(UPLOAD_SUCCEEDED.to_string());
                self.state.file = None;
                self.refresh().await;
            }
            Err(e) => {
                warn!("Bulk upload of {} failed: {:#}", path.display(), e);
                self.state.error = Some(format!("{} {}", UPLOAD_FAILED, e));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::PlanOption;
    use crate::api::memory::{InMemoryRepository, plan_entry};
    use rust_xlsxwriter::Workbook;
    use std::path::Path;

    async fn mounted(repo: InMemoryRepository) -> (Arc<InMemoryRepository>, PlanEditorApp) {
        let repo = Arc::new(repo);
        let mut app = PlanEditorApp::new(repo.clone(), ImportStrategy::ValidateFirst);
        app.update(Msg::Mount).await;
        let loaded = app.load_plans().await;
        app.update(loaded).await;
        (repo, app)
    }

    async fn fill_form(app: &mut PlanEditorApp, date: &str) {
        app.update(Msg::SelectOption(Some(PlanOption::Option3))).await;
        app.update(Msg::SetDate(date.to_string())).await;
        app.update(Msg::SetDay("Friday".to_string())).await;
        app.update(Msg::SetName("Republic Day".to_string())).await;
        app.update(Msg::SetDetails("National holiday".to_string())).await;
    }

    fn write_sheet(path: &Path, rows: &[[&str; 4]]) {
        let mut workbook = Workbook::new();
        let sheet = workbook.add_worksheet();
        for (r, row) in rows.iter().enumerate() {
            for (c, value) in row.iter().enumerate() {
                sheet.write_string(r as u32, c as u16, *value).unwrap();
            }
        }
        workbook.save(path).unwrap();
    }

    #[tokio::test]
    async fn test_mount_shows_loading_until_plans_arrive() {
        let repo = InMemoryRepository::new().with_plans(vec![plan_entry(
            1,
            "2024-01-01",
            "A",
            PlanOption::Option1,
        )]);
        let mut app = PlanEditorApp::new(Arc::new(repo), ImportStrategy::ValidateFirst);
        app.update(Msg::SelectOption(Some(PlanOption::Option1))).await;

        app.update(Msg::Mount).await;
        assert_eq!(app.state.plans, Resource::Loading);
        assert!(app.render().ends_with("Loading..."));

        let loaded = app.load_plans().await;
        app.update(loaded).await;
        assert_eq!(app.state.visible_plans().len(), 1);
        assert!(!app.render().contains("Loading..."));
    }

    #[tokio::test]
    async fn test_filter_by_selected_option() {
        let repo = InMemoryRepository::new().with_plans(vec![
            plan_entry(1, "2024-01-01", "A", PlanOption::Option1),
            plan_entry(2, "2024-01-02", "B", PlanOption::Option2),
            plan_entry(3, "2024-01-03", "C", PlanOption::Option1),
        ]);
        let (repo, mut app) = mounted(repo).await;

        assert!(app.state.visible_plans().is_empty());
        app.update(Msg::SelectOption(Some(PlanOption::Option1))).await;

        let names: Vec<&str> = app
            .state
            .visible_plans()
            .into_iter()
            .map(|p| p.name.as_str())
            .collect();
        assert_eq!(names, vec!["A", "C"]);
        assert_eq!(repo.list_plan_calls(), vec![None]);

        let rendered = app.render();
        assert!(rendered.contains("| 1      | 2024-01-01 |"));
        assert!(rendered.contains("| 2      | 2024-01-03 |"));
    }

    #[tokio::test]
    async fn test_submit_normalises_date_and_resets_form() {
        let (repo, mut app) = mounted(InMemoryRepository::new()).await;
        fill_form(&mut app, "2024-01-26T00:00:00").await;
        app.update(Msg::Submit).await;

        let requests = repo.plan_requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].date, "2024-01-26");
        assert_eq!(requests[0].option, PlanOption::Option3);

        assert_eq!(app.state.notice.as_deref(), Some(ADD_SUCCEEDED));
        assert_eq!(app.state.form, PlanForm::default());
        // Refreshed after the write
        assert_eq!(repo.list_plan_calls(), vec![None, None]);
        assert_eq!(app.state.plans.success().map(Vec::len), Some(1));
    }

    #[tokio::test]
    async fn test_submit_failure_keeps_form() {
        let (repo, mut app) = mounted(InMemoryRepository::new()).await;
        fill_form(&mut app, "not a date").await;
        app.update(Msg::Submit).await;

        let error = app.state.error.clone().unwrap();
        assert!(error.starts_with(ADD_FAILED));
        assert!(error.contains("Invalid date: not a date"));
        assert_eq!(app.state.form.option, Some(PlanOption::Option3));
        assert_eq!(app.state.form.name, "Republic Day");
        assert!(repo.plan_requests().is_empty());
        assert_eq!(repo.list_plan_calls().len(), 1);
    }

    #[tokio::test]
    async fn test_submit_requires_every_field() {
        let (repo, mut app) = mounted(InMemoryRepository::new()).await;
        fill_form(&mut app, "2024-01-26").await;
        app.update(Msg::SetDetails("  ".to_string())).await;
        app.update(Msg::Submit).await;

        assert!(app.state.error.as_deref().unwrap().contains("details is required"));
        assert!(repo.plan_requests().is_empty());
    }

    #[tokio::test]
    async fn test_upload_without_file() {
        let (repo, mut app) = mounted(InMemoryRepository::new()).await;
        app.update(Msg::SelectOption(Some(PlanOption::Option1))).await;
        app.update(Msg::UploadFile).await;

        assert_eq!(app.state.error.as_deref(), Some(NO_FILE_SELECTED));
        assert!(repo.plan_requests().is_empty());
    }

    #[tokio::test]
    async fn test_upload_success_clears_file_and_refreshes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("plans.xlsx");
        write_sheet(
            &path,
            &[
                ["Sr.No.", "Day", "Name", "Details"],
                ["2024-01-01", "Monday", "New Year", "Office closed"],
                ["2024-12-25", "Wednesday", "Christmas", "Office closed"],
            ],
        );

        let (repo, mut app) = mounted(InMemoryRepository::new()).await;
        app.update(Msg::SelectOption(Some(PlanOption::Option5))).await;
        app.update(Msg::SelectFile(path)).await;
        app.update(Msg::UploadFile).await;

        assert_eq!(app.state.notice.as_deref(), Some(UPLOAD_SUCCEEDED));
        assert_eq!(app.state.file, None);
        assert_eq!(app.state.visible_plans().len(), 2);
        assert!(repo.stored_plans().iter().all(|p| p.option == PlanOption::Option5));
    }

    #[tokio::test]
    async fn test_upload_failure_reports_cause() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.xlsx");
        write_sheet(
            &path,
            &[
                ["Date", "Day", "Name", "Details"],
                ["someday", "Monday", "Mystery", ""],
            ],
        );

        let (repo, mut app) = mounted(InMemoryRepository::new()).await;
        app.update(Msg::SelectOption(Some(PlanOption::Option1))).await;
        app.update(Msg::SelectFile(path.clone())).await;
        app.update(Msg::UploadFile).await;

        assert_eq!(
            app.state.error.as_deref(),
            Some("Failed to upload holiday plans: Invalid date: someday")
        );
        assert_eq!(app.state.file, Some(path));
        assert!(repo.plan_requests().is_empty());
    }
}
