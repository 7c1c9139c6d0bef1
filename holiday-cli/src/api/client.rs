//! HTTP client for the holiday plans API

use anyhow::{Context, Result, bail};
use async_trait::async_trait;
use log::{debug, warn};
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;

use super::models::{
    AssignmentDetails, AssignmentRequest, Holiday, HolidayPlanEntry, NewHoliday, NewHolidayPlan,
    PlanOption,
};
use super::repository::HolidayRepository;
use super::resilience::{ConcurrencyLimiter, ConcurrencyStats, ResilienceConfig};

/// Client for the Remote Data Service
#[derive(Debug, Clone)]
pub struct HolidayApiClient {
    http: Client,
    base_url: String,
    limiter: ConcurrencyLimiter,
}

impl HolidayApiClient {
    pub fn new(base_url: &str, resilience: &ResilienceConfig) -> Result<Self> {
        let base_url = base_url.trim().trim_end_matches('/').to_string();
        if base_url.is_empty() {
            bail!("API base URL is empty");
        }

        let http = Client::builder()
            .timeout(resilience.request_timeout)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            http,
            base_url,
            limiter: ConcurrencyLimiter::new(resilience.concurrency.clone()),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn limiter_stats(&self) -> ConcurrencyStats {
        self.limiter.stats()
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Send a request under a concurrency permit and decode the JSON body.
    /// Non-2xx responses become errors carrying the server's message.
    async fn send_json<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        what: &str,
    ) -> Result<T> {
        let _permit = self.limiter.acquire().await?;

        let response = request
            .send()
            .await
            .with_context(|| format!("{} request failed", what))?;

        let status = response.status();
        debug!("{} -> {}", what, status);

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = server_error_message(&body);
            warn!("{} failed with {}: {}", what, status, message);
            bail!("{} failed ({}): {}", what, status, message);
        }

        response
            .json::<T>()
            .await
            .with_context(|| format!("Failed to decode {} response", what))
    }
}

/// Pull `error` out of a `{"error": "..."}` body, falling back to the raw text
fn server_error_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v.get("error").and_then(|e| e.as_str()).map(str::to_string))
        .unwrap_or_else(|| {
            let trimmed = body.trim();
            if trimmed.is_empty() {
                "no response body".to_string()
            } else {
                trimmed.to_string()
            }
        })
}

#[async_trait]
impl HolidayRepository for HolidayApiClient {
    async fn list_holidays(&self) -> Result<Vec<Holiday>> {
        let request = self.http.get(self.url("/api/holidays"));
        self.send_json(request, "List holidays").await
    }

    async fn create_holiday(&self, holiday: &NewHoliday) -> Result<Holiday> {
        let request = self.http.post(self.url("/api/holidays")).json(holiday);
        self.send_json(request, "Create holiday").await
    }

    async fn list_plans(&self, option: Option<PlanOption>) -> Result<Vec<HolidayPlanEntry>> {
        let url = match option {
            Some(option) => format!(
                "{}?option={}",
                self.url("/api/holidayplans"),
                urlencoding::encode(option.key())
            ),
            None => self.url("/api/holidayplans"),
        };
        self.send_json(self.http.get(url), "List holiday plans").await
    }

    async fn create_plan(&self, plan: &NewHolidayPlan) -> Result<HolidayPlanEntry> {
        let request = self.http.post(self.url("/api/holidayplans")).json(plan);
        self.send_json(request, "Create holiday plan").await
    }

    async fn assign_plan(&self, request: &AssignmentRequest) -> Result<AssignmentDetails> {
        let http_request = self.http.post(self.url("/api/holidayplan")).json(request);
        self.send_json(http_request, "Assign holiday plan").await
    }

    async fn assigned_options(&self, holiday_id: i64) -> Result<Vec<PlanOption>> {
        let url = format!("{}?holiday_id={}", self.url("/api/assigned_plans"), holiday_id);
        self.send_json(self.http.get(url), "List assigned plans").await
    }
}
