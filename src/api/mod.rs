//! HTTP surface: shared state, router assembly, and handlers.

pub mod envelope;
pub mod health;
pub mod pharmacies;

use std::sync::Arc;
use std::time::Instant;

use axum::body::Body;
use axum::http::StatusCode;
use axum::response::Response;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::json;
use tower_http::cors::CorsLayer;

use crate::directory::DirectorySource;
use crate::dispatcher::NotificationDispatcher;
use crate::matcher::NearbyMatcher;
use crate::metrics::AppMetrics;
use crate::store::PharmacyStore;
use envelope::ApiResponse;

/// Shared state handed to every handler. Built once at startup; the
/// store handle is injected here and nowhere re-resolved.
pub struct AppState {
    pub matcher: NearbyMatcher,
    pub dispatcher: NotificationDispatcher,
    pub store: Option<Arc<dyn PharmacyStore>>,
    pub metrics: Arc<AppMetrics>,
    pub started_at: Instant,
}

impl AppState {
    pub fn new(store: Option<Arc<dyn PharmacyStore>>, metrics: Arc<AppMetrics>) -> Self {
        let directory = DirectorySource::new(store.clone());
        Self {
            matcher: NearbyMatcher::new(directory),
            dispatcher: NotificationDispatcher::new(store.clone()),
            store,
            metrics,
            started_at: Instant::now(),
        }
    }
}

/// Assemble the full application router. Shared between `main.rs` and
/// the integration tests.
pub fn build_router(state: Arc<AppState>) -> Router {
    let metrics = state.metrics.clone();

    Router::new()
        .route("/", get(welcome))
        .route("/api/v1/health", get(health::health))
        .route(
            "/api/v1/pharmacies/notify-nearby",
            post(pharmacies::notify_nearby),
        )
        .route(
            "/metrics",
            get(move || {
                let metrics = metrics.clone();
                async move {
                    match metrics.render() {
                        Ok(body) => Response::builder()
                            .status(StatusCode::OK)
                            .header(
                                axum::http::header::CONTENT_TYPE,
                                "text/plain; version=0.0.4",
                            )
                            .body(Body::from(body))
                            .expect("metrics response should be valid"),
                        Err(err) => {
                            tracing::error!("failed to render metrics: {}", err);
                            Response::builder()
                                .status(StatusCode::INTERNAL_SERVER_ERROR)
                                .body(Body::from("metrics error"))
                                .expect("metrics error response should be valid")
                        }
                    }
                }
            }),
        )
        .fallback(not_found)
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn welcome() -> Json<ApiResponse<serde_json::Value>> {
    Json(ApiResponse::success(
        json!({
            "service": "Pharmacy Notification API",
            "status": "Active",
            "version": env!("CARGO_PKG_VERSION"),
            "availableEndpoints": {
                "healthCheck": "GET /api/v1/health",
                "notifyNearby": "POST /api/v1/pharmacies/notify-nearby"
            }
        }),
        "Welcome to the Pharmacy API Backend",
    ))
}

async fn not_found() -> (StatusCode, Json<ApiResponse<()>>) {
    (
        StatusCode::NOT_FOUND,
        Json(ApiResponse::error("Route not found")),
    )
}
