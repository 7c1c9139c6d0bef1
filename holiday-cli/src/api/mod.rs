//! Holiday plans API module
//!
//! Wire models, the repository interface the views depend on, and the
//! reqwest-backed client that implements it against the remote service.

pub mod client;
pub mod models;
pub mod repository;
pub mod resilience;

#[cfg(test)]
pub mod memory;

pub use client::HolidayApiClient;
pub use models::{
    Assignment, AssignmentMap, AssignmentRequest, Holiday, HolidayPlanEntry, NewHoliday,
    NewHolidayPlan, PlanCache, PlanOption,
};
pub use repository::HolidayRepository;
pub use resilience::ResilienceConfig;
