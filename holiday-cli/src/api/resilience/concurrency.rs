//! Concurrency limiter implementation
//!
//! Bulk imports fan out one write per spreadsheet row. The limiter caps how
//! many of those writes hit the server at the same time.

use super::config::ConcurrencyConfig;
use anyhow::{Context, Result};
use log::debug;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::{OwnedSemaphorePermit, Semaphore};

// Tokio's semaphore tops out at 2^61-1 permits
const UNLIMITED_PERMITS: usize = 1_000_000;

/// Semaphore-based concurrency limiter for API requests
#[derive(Debug, Clone)]
pub struct ConcurrencyLimiter {
    semaphore: Arc<Semaphore>,
    config: ConcurrencyConfig,
    requests_acquired: Arc<AtomicU64>,
    requests_waited: Arc<AtomicU64>,
}

impl ConcurrencyLimiter {
    pub fn new(config: ConcurrencyConfig) -> Self {
        let permits = if config.enabled {
            config.max_concurrent_requests.max(1)
        } else {
            UNLIMITED_PERMITS
        };

        Self {
            semaphore: Arc::new(Semaphore::new(permits)),
            config,
            requests_acquired: Arc::new(AtomicU64::new(0)),
            requests_waited: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Acquire a permit for making a request. Waits if at capacity.
    /// The permit is released when dropped.
    pub async fn acquire(&self) -> Result<OwnedSemaphorePermit> {
        if self.config.enabled && self.semaphore.available_permits() == 0 {
            self.requests_waited.fetch_add(1, Ordering::Relaxed);
            debug!(
                "Concurrency limiter: waiting for permit ({} in use)",
                self.config.max_concurrent_requests
            );
        }

        let permit = self
            .semaphore
            .clone()
            .acquire_owned()
            .await
            .context("Concurrency limiter was closed")?;
        self.requests_acquired.fetch_add(1, Ordering::Relaxed);

        if self.config.enabled {
            debug!(
                "Concurrency limiter: acquired permit ({}/{} in use)",
                self.config
                    .max_concurrent_requests
                    .saturating_sub(self.semaphore.available_permits()),
                self.config.max_concurrent_requests
            );
        }

        Ok(permit)
    }

    /// Number of requests that can start immediately
    pub fn available_permits(&self) -> usize {
        if !self.config.enabled {
            return usize::MAX;
        }
        self.semaphore.available_permits()
    }

    pub fn stats(&self) -> ConcurrencyStats {
        ConcurrencyStats {
            available_permits: self.available_permits(),
            max_concurrent_requests: self.config.max_concurrent_requests,
            requests_acquired: self.requests_acquired.load(Ordering::Relaxed),
            requests_waited: self.requests_waited.load(Ordering::Relaxed),
            enabled: self.config.enabled,
        }
    }
}

/// Statistics for the concurrency limiter
#[derive(Debug, Clone)]
pub struct ConcurrencyStats {
    pub available_permits: usize,
    pub max_concurrent_requests: usize,
    /// Total permits acquired since creation
    pub requests_acquired: u64,
    /// Number of times a request had to wait for a permit
    pub requests_waited: u64,
    pub enabled: bool,
}

impl ConcurrencyStats {
    /// Number of permits currently in use
    pub fn in_use(&self) -> usize {
        if !self.enabled {
            return 0;
        }
        self.max_concurrent_requests
            .saturating_sub(self.available_permits)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn limiter(max: usize, enabled: bool) -> ConcurrencyLimiter {
        ConcurrencyLimiter::new(ConcurrencyConfig {
            max_concurrent_requests: max,
            enabled,
        })
    }

    #[tokio::test]
    async fn test_concurrency_limiter_disabled() {
        let limiter = limiter(2, false);

        let mut permits = Vec::new();
        for _ in 0..50 {
            permits.push(limiter.acquire().await.unwrap());
        }
        assert_eq!(permits.len(), 50);
        assert_eq!(limiter.stats().in_use(), 0);
    }

    #[tokio::test]
    async fn test_concurrency_limiter_max_permits() {
        let limiter = limiter(3, true);

        let _p1 = limiter.acquire().await.unwrap();
        let _p2 = limiter.acquire().await.unwrap();
        let _p3 = limiter.acquire().await.unwrap();
        assert_eq!(limiter.available_permits(), 0);
        assert_eq!(limiter.stats().in_use(), 3);

        let fourth =
            tokio::time::timeout(tokio::time::Duration::from_millis(20), limiter.acquire()).await;
        assert!(fourth.is_err());
    }

    #[tokio::test]
    async fn test_concurrency_limiter_acquire_waits() {
        let limiter = limiter(1, true);
        let limiter_clone = limiter.clone();

        let permit = limiter.acquire().await.unwrap();
        assert_eq!(limiter.available_permits(), 0);

        let handle = tokio::spawn(async move { limiter_clone.acquire().await.is_ok() });

        tokio::time::sleep(tokio::time::Duration::from_millis(10)).await;
        drop(permit);

        let result = tokio::time::timeout(tokio::time::Duration::from_millis(200), handle).await;
        assert!(matches!(result, Ok(Ok(true))));
        assert_eq!(limiter.stats().requests_waited, 1);
    }

    #[tokio::test]
    async fn test_concurrency_limiter_stats() {
        let limiter = limiter(3, true);

        let _p1 = limiter.acquire().await.unwrap();
        let _p2 = limiter.acquire().await.unwrap();

        let stats = limiter.stats();
        assert_eq!(stats.max_concurrent_requests, 3);
        assert_eq!(stats.available_permits, 1);
        assert_eq!(stats.requests_acquired, 2);
        assert!(stats.enabled);
    }
}
