//! Liveness and store reachability, mounted at `/health` outside the API prefix.

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;

use crate::state::AppState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceStatus {
    Ok,
    Degraded,
}

#[derive(Debug, Serialize)]
pub struct HealthReport {
    pub status: ServiceStatus,
    pub version: &'static str,
    pub db_healthy: bool,
}

/// Ping the store, bounded by the same deadline as request-path calls.
async fn store_reachable(state: &AppState) -> bool {
    let limit = state.config.store_timeout();
    match tokio::time::timeout(limit, kino_db::health_check(&state.pool)).await {
        Ok(Ok(())) => true,
        Ok(Err(e)) => {
            tracing::warn!(error = %e, "Health probe failed");
            false
        }
        Err(_) => {
            tracing::warn!(timeout_ms = limit.as_millis() as u64, "Health probe timed out");
            false
        }
    }
}

/// GET /health
///
/// Always 200; a failed store probe shows up as `"degraded"`.
async fn report(State(state): State<AppState>) -> Json<HealthReport> {
    let db_healthy = store_reachable(&state).await;
    Json(HealthReport {
        status: if db_healthy {
            ServiceStatus::Ok
        } else {
            ServiceStatus::Degraded
        },
        version: env!("CARGO_PKG_VERSION"),
        db_healthy,
    })
}

pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(report))
}
