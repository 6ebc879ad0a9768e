//! Abstract document store consumed by the directory and dispatcher.
//!
//! The service runs with or without a backing store. When one is
//! configured it is injected as `Arc<dyn PharmacyStore>` at construction
//! time — there is no ambient global handle to re-check.

use async_trait::async_trait;
use thiserror::Error;

use crate::models::{NotificationRecord, Pharmacy};

/// Failure at the persistence boundary. Always absorbed inside the
/// directory (seed fallback) or the dispatcher (best-effort commit);
/// it never fails a request on its own.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("store backend error: {0}")]
    Backend(String),
}

/// Read and write operations the core needs from a document store.
#[async_trait]
pub trait PharmacyStore: Send + Sync {
    /// Fetch all pharmacies with `ACTIVE` status. Order is not significant.
    async fn query_active_pharmacies(&self) -> Result<Vec<Pharmacy>, StoreError>;

    /// Persist a batch of notification records atomically: either every
    /// record in the batch is committed or none is.
    async fn commit_notifications(
        &self,
        records: &[NotificationRecord],
    ) -> Result<(), StoreError>;

    /// Health-check signal: `true` when the backend is reachable.
    fn is_available(&self) -> bool;
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::sync::Mutex;

    use super::*;

    /// Configurable in-memory store double for unit tests.
    pub(crate) struct StubStore {
        pub pharmacies: Vec<Pharmacy>,
        pub fail_query: bool,
        pub fail_commit: bool,
        /// One entry per `commit_notifications` call (batches stay intact).
        pub committed: Mutex<Vec<Vec<NotificationRecord>>>,
    }

    impl StubStore {
        pub fn with_pharmacies(pharmacies: Vec<Pharmacy>) -> Self {
            Self {
                pharmacies,
                fail_query: false,
                fail_commit: false,
                committed: Mutex::new(Vec::new()),
            }
        }

        pub fn failing_query() -> Self {
            Self {
                pharmacies: Vec::new(),
                fail_query: true,
                fail_commit: false,
                committed: Mutex::new(Vec::new()),
            }
        }

        pub fn failing_commit(pharmacies: Vec<Pharmacy>) -> Self {
            Self {
                pharmacies,
                fail_query: false,
                fail_commit: true,
                committed: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl PharmacyStore for StubStore {
        async fn query_active_pharmacies(&self) -> Result<Vec<Pharmacy>, StoreError> {
            if self.fail_query {
                return Err(StoreError::Backend("query failed".to_string()));
            }
            Ok(self.pharmacies.clone())
        }

        async fn commit_notifications(
            &self,
            records: &[NotificationRecord],
        ) -> Result<(), StoreError> {
            if self.fail_commit {
                return Err(StoreError::Backend("commit failed".to_string()));
            }
            self.committed
                .lock()
                .expect("committed lock poisoned")
                .push(records.to_vec());
            Ok(())
        }

        fn is_available(&self) -> bool {
            !self.fail_query
        }
    }
}
