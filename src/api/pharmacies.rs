//! Notify-nearby request handler: validate, match, dispatch, respond.

use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use serde::Deserialize;

use super::envelope::ApiResponse;
use super::AppState;
use crate::directory::DataOrigin;
use crate::error::AppError;
use crate::geo::GeoPoint;
use crate::models::NotifyResult;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotifyNearbyRequest {
    #[serde(default)]
    pub request_id: Option<String>,
    #[serde(default)]
    pub user_location: Option<LocationPayload>,
}

/// Coordinates arrive as independent optionals so an absent field is
/// distinguishable from a literal 0 — the equator and prime meridian
/// are valid locations.
#[derive(Debug, Deserialize)]
pub struct LocationPayload {
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
}

const REQUIRED_FIELDS: &str =
    "Invalid payload. Required: requestId, userLocation { latitude, longitude }";

fn validate(payload: &NotifyNearbyRequest) -> Result<(String, GeoPoint), AppError> {
    let request_id = payload
        .request_id
        .as_deref()
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .ok_or_else(|| AppError::InvalidPayload(REQUIRED_FIELDS.to_string()))?;

    let location = payload
        .user_location
        .as_ref()
        .ok_or_else(|| AppError::InvalidPayload(REQUIRED_FIELDS.to_string()))?;

    let (latitude, longitude) = match (location.latitude, location.longitude) {
        (Some(latitude), Some(longitude)) => (latitude, longitude),
        _ => return Err(AppError::InvalidPayload(REQUIRED_FIELDS.to_string())),
    };

    let user_location = GeoPoint::new(latitude, longitude);
    if !user_location.is_valid() {
        return Err(AppError::InvalidPayload(
            "userLocation out of range: latitude must be in [-90, 90], longitude in [-180, 180]"
                .to_string(),
        ));
    }

    Ok((request_id.to_string(), user_location))
}

/// `POST /api/v1/pharmacies/notify-nearby`
pub async fn notify_nearby(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<NotifyNearbyRequest>,
) -> Result<Json<ApiResponse<NotifyResult>>, AppError> {
    state.metrics.notify_requests_total.inc();

    let (request_id, user_location) = validate(&payload).map_err(|err| {
        state.metrics.invalid_payloads_total.inc();
        err
    })?;

    tracing::info!(
        "notification request {} at ({}, {})",
        request_id,
        user_location.latitude,
        user_location.longitude
    );

    let outcome = state.matcher.find_nearby(user_location).await;
    if outcome.origin == DataOrigin::Seed {
        state.metrics.directory_fallbacks_total.inc();
    }

    if outcome.matches.is_empty() {
        tracing::info!("no pharmacies within range for request {}", request_id);
        return Ok(Json(ApiResponse::success(
            NotifyResult {
                notified_count: 0,
                notified_pharmacies: Vec::new(),
            },
            "No nearby pharmacies found.",
        )));
    }

    let notified = state
        .dispatcher
        .dispatch(&request_id, &outcome.matches, user_location)
        .await;
    state
        .metrics
        .notifications_dispatched_total
        .inc_by(notified.len() as f64);

    let message = format!("Successfully notified {} pharmacies.", notified.len());
    Ok(Json(ApiResponse::success(
        NotifyResult {
            notified_count: notified.len(),
            notified_pharmacies: notified,
        },
        message,
    )))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload(request_id: Option<&str>, lat: Option<f64>, lon: Option<f64>) -> NotifyNearbyRequest {
        NotifyNearbyRequest {
            request_id: request_id.map(str::to_string),
            user_location: Some(LocationPayload {
                latitude: lat,
                longitude: lon,
            }),
        }
    }

    #[test]
    fn valid_payload_passes() {
        let (id, location) = validate(&payload(Some("req_1"), Some(37.7749), Some(-122.4194))).unwrap();
        assert_eq!(id, "req_1");
        assert_eq!(location.latitude, 37.7749);
    }

    #[test]
    fn missing_or_blank_request_id_is_rejected() {
        assert!(validate(&payload(None, Some(1.0), Some(1.0))).is_err());
        assert!(validate(&payload(Some(""), Some(1.0), Some(1.0))).is_err());
        assert!(validate(&payload(Some("   "), Some(1.0), Some(1.0))).is_err());
    }

    #[test]
    fn missing_location_or_coordinate_is_rejected() {
        let no_location = NotifyNearbyRequest {
            request_id: Some("req_1".to_string()),
            user_location: None,
        };
        assert!(validate(&no_location).is_err());
        assert!(validate(&payload(Some("req_1"), None, Some(1.0))).is_err());
        assert!(validate(&payload(Some("req_1"), Some(1.0), None)).is_err());
    }

    #[test]
    fn zero_coordinates_are_valid_not_missing() {
        let (_, location) = validate(&payload(Some("req_1"), Some(0.0), Some(0.0))).unwrap();
        assert_eq!(location.latitude, 0.0);
        assert_eq!(location.longitude, 0.0);
    }

    #[test]
    fn out_of_range_coordinates_are_rejected() {
        assert!(validate(&payload(Some("req_1"), Some(95.0), Some(0.0))).is_err());
        assert!(validate(&payload(Some("req_1"), Some(0.0), Some(-181.0))).is_err());
    }
}
