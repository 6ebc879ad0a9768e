//! Notification composition and best-effort persistence.

use std::sync::Arc;

use crate::geo::GeoPoint;
use crate::models::{
    MatchedPharmacy, NotificationData, NotificationRecord, NOTIFICATION_TYPE_NEW_DRUG_REQUEST,
    RECIPIENT_TYPE_PHARMACY,
};
use crate::store::PharmacyStore;

pub struct NotificationDispatcher {
    store: Option<Arc<dyn PharmacyStore>>,
}

impl NotificationDispatcher {
    pub fn new(store: Option<Arc<dyn PharmacyStore>>) -> Self {
        Self { store }
    }

    /// Compose one notification record per match and attempt to persist
    /// the whole batch in a single atomic commit.
    ///
    /// The returned id list always covers every match: a failed commit is
    /// logged and swallowed, and with no store configured the dispatch is
    /// a dry run. Callers must not treat the id list as proof of a
    /// committed write.
    pub async fn dispatch(
        &self,
        request_id: &str,
        matches: &[MatchedPharmacy],
        user_location: GeoPoint,
    ) -> Vec<String> {
        let mut records = Vec::with_capacity(matches.len());
        let mut notified = Vec::with_capacity(matches.len());

        for matched in matches {
            tracing::info!(
                "notifying {} ({:.0}m away) for request {}",
                matched.pharmacy.name,
                matched.distance_meters,
                request_id
            );
            records.push(build_record(request_id, matched, user_location));
            notified.push(matched.pharmacy.id.clone());
        }

        if let Some(store) = &self.store {
            if !records.is_empty() {
                if let Err(err) = store.commit_notifications(&records).await {
                    tracing::error!(
                        "failed to persist {} notification(s) for request {}: {}",
                        records.len(),
                        request_id,
                        err
                    );
                }
            }
        } else {
            tracing::debug!("no store configured, dispatch for {} is a dry run", request_id);
        }

        notified
    }
}

fn build_record(
    request_id: &str,
    matched: &MatchedPharmacy,
    user_location: GeoPoint,
) -> NotificationRecord {
    let km = matched.distance_meters / 1000.0;
    NotificationRecord {
        recipient_id: matched.pharmacy.id.clone(),
        recipient_type: RECIPIENT_TYPE_PHARMACY.to_string(),
        kind: NOTIFICATION_TYPE_NEW_DRUG_REQUEST.to_string(),
        title: "New Request Nearby".to_string(),
        body: format!(
            "A new request matches your inventory location. Distance: {:.1}km",
            km
        ),
        data: NotificationData {
            request_id: request_id.to_string(),
            user_location,
        },
        read: false,
    }
}
