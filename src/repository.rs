//! SQLite-backed implementation of [`PharmacyStore`].
//!
//! Notification batches are written inside a single transaction so the
//! commit is all-or-nothing. Timestamps are stored as RFC 3339 strings;
//! the `createdAt` of a notification is assigned here at write time.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{Row, SqlitePool};

use crate::geo::GeoPoint;
use crate::models::{NotificationRecord, Pharmacy, PharmacyStatus};
use crate::store::{PharmacyStore, StoreError};

pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert or replace a pharmacy row.
    ///
    /// Pharmacy lifecycle is owned by an external management service;
    /// this exists for seeding tooling and tests.
    pub async fn upsert_pharmacy(&self, pharmacy: &Pharmacy) -> Result<(), StoreError> {
        let (latitude, longitude) = match pharmacy.location {
            Some(location) => (Some(location.latitude), Some(location.longitude)),
            None => (None, None),
        };

        sqlx::query(
            "INSERT OR REPLACE INTO pharmacies
             (id, owner_id, name, address, license_number, phone,
              latitude, longitude, created_at, status)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&pharmacy.id)
        .bind(&pharmacy.owner_id)
        .bind(&pharmacy.name)
        .bind(&pharmacy.address)
        .bind(&pharmacy.license_number)
        .bind(&pharmacy.phone)
        .bind(latitude)
        .bind(longitude)
        .bind(pharmacy.created_at.to_rfc3339())
        .bind(pharmacy.status.as_str())
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

fn decode_pharmacy(row: &sqlx::sqlite::SqliteRow) -> Option<Pharmacy> {
    let id: String = row.try_get("id").ok()?;
    let owner_id: String = row.try_get("owner_id").ok()?;
    let name: String = row.try_get("name").ok()?;
    let address: String = row.try_get("address").ok()?;
    let license_number: String = row.try_get("license_number").ok()?;
    let phone: String = row.try_get("phone").ok()?;
    let latitude: Option<f64> = row.try_get("latitude").ok()?;
    let longitude: Option<f64> = row.try_get("longitude").ok()?;
    let created_at_raw: String = row.try_get("created_at").ok()?;
    let status_raw: String = row.try_get("status").ok()?;

    let location = match (latitude, longitude) {
        (Some(latitude), Some(longitude)) => Some(GeoPoint::new(latitude, longitude)),
        _ => None,
    };

    let created_at = DateTime::parse_from_rfc3339(&created_at_raw)
        .ok()?
        .with_timezone(&Utc);

    Some(Pharmacy {
        id,
        owner_id,
        name,
        address,
        license_number,
        phone,
        location,
        created_at,
        status: PharmacyStatus::parse(&status_raw)?,
    })
}

#[async_trait]
impl PharmacyStore for SqliteStore {
    async fn query_active_pharmacies(&self) -> Result<Vec<Pharmacy>, StoreError> {
        let rows = sqlx::query(
            "SELECT id, owner_id, name, address, license_number, phone,
                    latitude, longitude, created_at, status
             FROM pharmacies
             WHERE status = 'ACTIVE'
             ORDER BY id ASC",
        )
        .fetch_all(&self.pool)
        .await?;

        // Undecodable rows are dropped rather than failing the whole fetch.
        Ok(rows.iter().filter_map(decode_pharmacy).collect())
    }

    async fn commit_notifications(
        &self,
        records: &[NotificationRecord],
    ) -> Result<(), StoreError> {
        if records.is_empty() {
            return Ok(());
        }

        let created_at = Utc::now().to_rfc3339();
        let mut tx = self.pool.begin().await?;

        for record in records {
            let data = serde_json::to_string(&record.data)
                .map_err(|err| StoreError::Backend(err.to_string()))?;

            sqlx::query(
                "INSERT INTO notifications
                 (recipient_id, recipient_type, type, title, body, data, created_at, read)
                 VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
            )
            .bind(&record.recipient_id)
            .bind(&record.recipient_type)
            .bind(&record.kind)
            .bind(&record.title)
            .bind(&record.body)
            .bind(&data)
            .bind(&created_at)
            .bind(record.read)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(())
    }

    fn is_available(&self) -> bool {
        !self.pool.is_closed()
    }
}
