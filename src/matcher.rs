//! Nearby-pharmacy matching against the fixed search radius.

use std::cmp::Ordering;

use crate::directory::{DataOrigin, DirectorySource};
use crate::geo::{distance_meters, GeoPoint};
use crate::models::MatchedPharmacy;

/// Eligibility cutoff for a match, in meters.
pub const SEARCH_RADIUS_METERS: f64 = 10_000.0;

/// Result of one matching pass: matches sorted ascending by distance,
/// plus the origin of the directory data they were drawn from.
#[derive(Debug)]
pub struct MatchOutcome {
    pub matches: Vec<MatchedPharmacy>,
    pub origin: DataOrigin,
}

#[derive(Clone)]
pub struct NearbyMatcher {
    directory: DirectorySource,
}

impl NearbyMatcher {
    pub fn new(directory: DirectorySource) -> Self {
        Self { directory }
    }

    /// Find all active pharmacies within [`SEARCH_RADIUS_METERS`] of the
    /// user, sorted ascending by distance. Pharmacies without a location
    /// are skipped. Read-only with respect to the store.
    pub async fn find_nearby(&self, user_location: GeoPoint) -> MatchOutcome {
        let directory = self.directory.fetch_active().await;
        let origin = directory.origin;

        let mut matches: Vec<MatchedPharmacy> = directory
            .pharmacies
            .into_iter()
            .filter_map(|pharmacy| {
                let location = pharmacy.location?;
                let distance = distance_meters(user_location, location);
                if distance <= SEARCH_RADIUS_METERS {
                    Some(MatchedPharmacy {
                        pharmacy,
                        distance_meters: distance,
                    })
                } else {
                    None
                }
            })
            .collect();

        // sort_by is stable, so equal distances keep fetch order.
        matches.sort_by(|a, b| {
            a.distance_meters
                .partial_cmp(&b.distance_meters)
                .unwrap_or(Ordering::Equal)
        });

        MatchOutcome { matches, origin }
    }
}
