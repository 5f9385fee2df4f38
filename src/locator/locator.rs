use crate::locator::LeaderInfo;
use crate::store::{CoordinationStore, StoreReadError};
use std::fmt;

/// LeaderLocator resolves the network address of the current leader sentinel.
///
/// There is no caching here on purpose. Leadership can move between two calls, so every call
/// goes back to the store.
pub struct LeaderLocator<S: CoordinationStore> {
    store: S,
    leader_key: String,
}

impl<S: CoordinationStore> LeaderLocator<S> {
    pub fn new(store: S, leader_key: impl Into<String>) -> Self {
        LeaderLocator {
            store,
            leader_key: leader_key.into(),
        }
    }

    pub fn leader_key(&self) -> &str {
        &self.leader_key
    }

    /// Do one consistent read of the leader key and decode it.
    pub async fn locate_leader(&self) -> Result<LeaderInfo, LocateLeaderError> {
        let record = self
            .store
            .read_key(&self.leader_key)
            .await?
            .ok_or(LocateLeaderError::NotAvailable(NotAvailableReason::RecordAbsent))?;

        LeaderInfo::from_record(&record)
            .map_err(|reason| LocateLeaderError::NotAvailable(NotAvailableReason::RecordMalformed(reason)))
    }
}

#[derive(Debug, thiserror::Error)]
pub enum LocateLeaderError {
    // Expected while an election is in progress. Can be retried later.
    #[error("Leader sentinel info not available: {0}")]
    NotAvailable(NotAvailableReason),

    #[error("Failed to read leader sentinel info from coordination store")]
    StoreUnreachable(#[source] StoreReadError),
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum NotAvailableReason {
    RecordAbsent,
    RecordMalformed(String),
}

impl fmt::Display for NotAvailableReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NotAvailableReason::RecordAbsent => write!(f, "no leader record published"),
            NotAvailableReason::RecordMalformed(reason) => write!(f, "malformed leader record: {}", reason),
        }
    }
}

// ------- Conversions --------

impl From<StoreReadError> for LocateLeaderError {
    fn from(e: StoreReadError) -> Self {
        LocateLeaderError::StoreUnreachable(e)
    }
}
