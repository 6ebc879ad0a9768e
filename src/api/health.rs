use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

use super::envelope::ApiResponse;
use super::AppState;

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    /// Seconds since process start.
    pub uptime: u64,
    /// `true` when a live store is configured and reachable. The wire
    /// name is kept for compatibility with existing clients.
    #[serde(rename = "firebaseConnected")]
    pub store_connected: bool,
}

pub async fn health(State(state): State<Arc<AppState>>) -> Json<ApiResponse<HealthStatus>> {
    let store_connected = state
        .store
        .as_ref()
        .map(|store| store.is_available())
        .unwrap_or(false);

    Json(ApiResponse::success(
        HealthStatus {
            status: "OK".to_string(),
            uptime: state.started_at.elapsed().as_secs(),
            store_connected,
        },
        "System Operational",
    ))
}
