//! Domain types shared across the matching and dispatch pipeline.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::geo::GeoPoint;

/// Recipient type written into every notification record.
pub const RECIPIENT_TYPE_PHARMACY: &str = "Pharmacy";

/// Notification type written into every notification record.
pub const NOTIFICATION_TYPE_NEW_DRUG_REQUEST: &str = "NEW_DRUG_REQUEST";

/// Lifecycle status of a pharmacy. Only `ACTIVE` records participate
/// in matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PharmacyStatus {
    Active,
    Inactive,
    PendingApproval,
}

impl PharmacyStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PharmacyStatus::Active => "ACTIVE",
            PharmacyStatus::Inactive => "INACTIVE",
            PharmacyStatus::PendingApproval => "PENDING_APPROVAL",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "ACTIVE" => Some(PharmacyStatus::Active),
            "INACTIVE" => Some(PharmacyStatus::Inactive),
            "PENDING_APPROVAL" => Some(PharmacyStatus::PendingApproval),
            _ => None,
        }
    }
}

/// A pharmacy record. Created and updated by an external management
/// service; read-only from this service's perspective.
///
/// `location` is optional — a record without coordinates is simply
/// non-matchable, not an error.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pharmacy {
    pub id: String,
    pub owner_id: String,
    pub name: String,
    pub address: String,
    pub license_number: String,
    pub phone: String,
    pub location: Option<GeoPoint>,
    pub created_at: DateTime<Utc>,
    pub status: PharmacyStatus,
}

/// A pharmacy paired with its distance from the user at match time.
///
/// The distance lives only for the duration of one match-and-notify
/// operation and is never written back onto the pharmacy record.
#[derive(Debug, Clone)]
pub struct MatchedPharmacy {
    pub pharmacy: Pharmacy,
    pub distance_meters: f64,
}

/// Context payload embedded in each notification record.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationData {
    pub request_id: String,
    pub user_location: GeoPoint,
}

/// One notification to a matched pharmacy. The store assigns identity
/// and the `createdAt` timestamp at write time.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationRecord {
    pub recipient_id: String,
    pub recipient_type: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub title: String,
    pub body: String,
    pub data: NotificationData,
    pub read: bool,
}

/// Output contract of one notify operation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotifyResult {
    pub notified_count: usize,
    pub notified_pharmacies: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_round_trips_through_strings() {
        for status in [
            PharmacyStatus::Active,
            PharmacyStatus::Inactive,
            PharmacyStatus::PendingApproval,
        ] {
            assert_eq!(PharmacyStatus::parse(status.as_str()), Some(status));
        }
        assert_eq!(PharmacyStatus::parse("DELETED"), None);
    }

    #[test]
    fn status_serializes_as_screaming_snake_case() {
        let json = serde_json::to_string(&PharmacyStatus::PendingApproval).unwrap();
        assert_eq!(json, "\"PENDING_APPROVAL\"");
    }

    #[test]
    fn notification_record_uses_wire_field_names() {
        let record = NotificationRecord {
            recipient_id: "pharm_dt_sf".to_string(),
            recipient_type: RECIPIENT_TYPE_PHARMACY.to_string(),
            kind: NOTIFICATION_TYPE_NEW_DRUG_REQUEST.to_string(),
            title: "New Request Nearby".to_string(),
            body: "body".to_string(),
            data: NotificationData {
                request_id: "req_1".to_string(),
                user_location: crate::geo::GeoPoint::new(37.7749, -122.4194),
            },
            read: false,
        };

        let json: serde_json::Value = serde_json::to_value(&record).unwrap();
        assert_eq!(json["recipientId"], "pharm_dt_sf");
        assert_eq!(json["recipientType"], "Pharmacy");
        assert_eq!(json["type"], "NEW_DRUG_REQUEST");
        assert_eq!(json["data"]["requestId"], "req_1");
        assert_eq!(json["read"], false);
    }
}
