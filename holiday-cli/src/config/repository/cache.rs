//! Assignment map and plan cache persistence
//!
//! Both values are best-effort: a missing, unreadable or malformed entry
//! loads as an empty map.

use anyhow::{Context, Result};
use log::warn;
use serde::Serialize;
use serde::de::DeserializeOwned;

use super::state::StateStore;
use crate::api::{AssignmentMap, PlanCache};

pub const ASSIGNED_PLANS_KEY: &str = "assignedPlans";
pub const HOLIDAY_PLANS_KEY: &str = "holidayPlans";

pub async fn load_assignments(store: &dyn StateStore) -> AssignmentMap {
    load_or_default(store, ASSIGNED_PLANS_KEY).await
}

pub async fn save_assignments(store: &dyn StateStore, assignments: &AssignmentMap) -> Result<()> {
    save(store, ASSIGNED_PLANS_KEY, assignments).await
}

pub async fn load_plan_cache(store: &dyn StateStore) -> PlanCache {
    load_or_default(store, HOLIDAY_PLANS_KEY).await
}

pub async fn save_plan_cache(store: &dyn StateStore, cache: &PlanCache) -> Result<()> {
    save(store, HOLIDAY_PLANS_KEY, cache).await
}

/// Drop both persisted values
pub async fn clear_all(store: &dyn StateStore) -> Result<()> {
    store.remove(ASSIGNED_PLANS_KEY).await?;
    store.remove(HOLIDAY_PLANS_KEY).await
}

async fn load_or_default<T: DeserializeOwned + Default>(store: &dyn StateStore, key: &str) -> T {
    let value = match store.get(key).await {
        Ok(Some(value)) => value,
        Ok(None) => return T::default(),
        Err(e) => {
            warn!("Ignoring unreadable cache entry '{}': {:#}", key, e);
            return T::default();
        }
    };

    serde_json::from_value(value).unwrap_or_else(|e| {
        warn!("Ignoring malformed cache entry '{}': {}", key, e);
        T::default()
    })
}

async fn save<T: Serialize>(store: &dyn StateStore, key: &str, value: &T) -> Result<()> {
    let encoded = serde_json::to_value(value)
        .with_context(|| format!("Failed to encode cache entry '{}'", key))?;
    store.set(key, &encoded).await
}
