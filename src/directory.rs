//! Pharmacy directory source with seed-list fallback.
//!
//! `fetch_active` never fails. When no store is configured, the store
//! query errors, or the query comes back empty, the built-in seed list
//! is served instead and the result is tagged [`DataOrigin::Seed`] so
//! callers (and tests) can observe the degradation without parsing logs.

use std::sync::Arc;

use chrono::Utc;

use crate::geo::GeoPoint;
use crate::models::{Pharmacy, PharmacyStatus};
use crate::store::PharmacyStore;

/// Where a directory listing came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataOrigin {
    /// Fetched from the configured store.
    Live,
    /// Built-in fallback data.
    Seed,
}

/// One directory listing: the pharmacies plus their origin.
#[derive(Debug, Clone)]
pub struct Directory {
    pub pharmacies: Vec<Pharmacy>,
    pub origin: DataOrigin,
}

#[derive(Clone)]
pub struct DirectorySource {
    store: Option<Arc<dyn PharmacyStore>>,
}

impl DirectorySource {
    pub fn new(store: Option<Arc<dyn PharmacyStore>>) -> Self {
        Self { store }
    }

    /// Fetch all active pharmacies, falling back to the seed list.
    ///
    /// Store errors are logged and swallowed here; they never surface
    /// past this layer.
    pub async fn fetch_active(&self) -> Directory {
        let Some(store) = &self.store else {
            tracing::debug!("no store configured, serving seed pharmacy list");
            return Directory {
                pharmacies: seed_pharmacies(),
                origin: DataOrigin::Seed,
            };
        };

        match store.query_active_pharmacies().await {
            Ok(pharmacies) if !pharmacies.is_empty() => Directory {
                pharmacies,
                origin: DataOrigin::Live,
            },
            Ok(_) => {
                tracing::warn!("store has no active pharmacies, falling back to seed list");
                Directory {
                    pharmacies: seed_pharmacies(),
                    origin: DataOrigin::Seed,
                }
            }
            Err(err) => {
                tracing::error!("pharmacy query failed, falling back to seed list: {}", err);
                Directory {
                    pharmacies: seed_pharmacies(),
                    origin: DataOrigin::Seed,
                }
            }
        }
    }
}

fn seed_pharmacy(
    id: &str,
    owner_id: &str,
    name: &str,
    address: &str,
    license_number: &str,
    phone: &str,
    latitude: f64,
    longitude: f64,
) -> Pharmacy {
    Pharmacy {
        id: id.to_string(),
        owner_id: owner_id.to_string(),
        name: name.to_string(),
        address: address.to_string(),
        license_number: license_number.to_string(),
        phone: phone.to_string(),
        location: Some(GeoPoint::new(latitude, longitude)),
        created_at: Utc::now(),
        status: PharmacyStatus::Active,
    }
}

/// The fixed four-pharmacy fallback dataset. Keeps the service runnable
/// and testable without a live backend.
pub fn seed_pharmacies() -> Vec<Pharmacy> {
    vec![
        seed_pharmacy(
            "pharm_dt_sf",
            "user_owner_1",
            "Downtown CVS",
            "123 Market St, San Francisco, CA",
            "LIC-1001",
            "+1 415-555-0101",
            37.7749,
            -122.4194,
        ),
        seed_pharmacy(
            "pharm_mission",
            "user_owner_2",
            "Mission District Pharma",
            "200 Valencia St, San Francisco, CA",
            "LIC-1002",
            "+1 415-555-0102",
            37.7600,
            -122.4200,
        ),
        seed_pharmacy(
            "pharm_oakland",
            "user_owner_3",
            "Oakland Medical Center",
            "50 Broadway, Oakland, CA",
            "LIC-1003",
            "+1 510-555-0103",
            37.8044,
            -122.2712,
        ),
        seed_pharmacy(
            "pharm_ny",
            "user_owner_4",
            "New York Chemist",
            "100 5th Ave, NY, NY",
            "LIC-1004",
            "+1 212-555-0104",
            40.7128,
            -74.0060,
        ),
    ]
}
