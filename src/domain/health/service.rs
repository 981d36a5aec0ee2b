use std::sync::OnceLock;
use std::time::Instant;

use crate::state::AppState;

use super::dto::{CheckResult, HealthChecks, HealthState, HealthStatus};

static START_TIME: OnceLock<Instant> = OnceLock::new();

/// Record the process start time. Called once from `main`.
pub fn init_start_time() {
    START_TIME.get_or_init(Instant::now);
}

pub struct HealthService;

impl HealthService {
    pub async fn status(state: &AppState) -> HealthStatus {
        let database = Self::check_database(state).await;

        let status = if database.status {
            HealthState::Healthy
        } else {
            HealthState::Unhealthy
        };

        HealthStatus {
            status,
            version: env!("CARGO_PKG_VERSION"),
            uptime_secs: START_TIME
                .get()
                .map(|t| t.elapsed().as_secs())
                .unwrap_or(0),
            checks: HealthChecks { database },
        }
    }

    async fn check_database(state: &AppState) -> CheckResult {
        let start = Instant::now();
        match state.db.ping().await {
            Ok(()) => CheckResult::success(start.elapsed().as_millis() as u64),
            Err(e) => CheckResult::failure(start.elapsed().as_millis() as u64, e.to_string()),
        }
    }
}
