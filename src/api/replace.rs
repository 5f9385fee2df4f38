use crate::locator::{LeaderInfo, LeaderLocator, LocateLeaderError, NotAvailableReason};
use crate::publisher::{ConfigPublisher, LeaderTransport, PublishError, TransportError};
use crate::store::{CoordinationStore, StoreReadError};
use serde::Serialize;

/// Resolve the current leader sentinel through `store`, then replace its configuration with
/// `config` through `transport`.
///
/// One store read, then at most one write. Nothing is retried. If the caller wants to try again,
/// calling this again re-resolves the leader, which is what it should do since leadership may have
/// moved.
pub async fn replace_config<S, T, C>(
    store: S,
    transport: T,
    leader_key: &str,
    config: &C,
) -> Result<(), ReplaceConfigError>
where
    S: CoordinationStore,
    T: LeaderTransport,
    C: Serialize + ?Sized,
{
    let locator = LeaderLocator::new(store, leader_key);
    let publisher = ConfigPublisher::new(transport);

    locate_and_publish(&locator, &publisher, config).await
}

pub(super) async fn locate_and_publish<S, T, C>(
    locator: &LeaderLocator<S>,
    publisher: &ConfigPublisher<T>,
    config: &C,
) -> Result<(), ReplaceConfigError>
where
    S: CoordinationStore,
    T: LeaderTransport,
    C: Serialize + ?Sized,
{
    let leader = locator.locate_leader().await?;

    publisher
        .publish(&leader, config)
        .await
        .map_err(|e| ReplaceConfigError::from_publish_error(leader, e))
}

#[derive(Debug, thiserror::Error)]
pub enum ReplaceConfigError {
    // Store answered, but there's no usable leader record. Likely an election is in progress.
    #[error("Leader sentinel info not available: {0}")]
    LeaderUnavailable(NotAvailableReason),

    #[error("Coordination store unreachable")]
    CoordinationStoreUnreachable(#[source] StoreReadError),

    #[error("Error setting config on leader sentinel {}:{}", .leader.listen_address, .leader.port)]
    TransportFailure {
        leader: LeaderInfo,
        #[source]
        source: TransportError,
    },

    #[error("Error setting config: leader sentinel returned non ok code: {status}{}",
        .reason.as_ref().map(|r| format!(" {}", r)).unwrap_or_default())]
    RejectedByLeader {
        leader: LeaderInfo,
        status: u16,
        reason: Option<String>,
        body: String,
    },

    #[error("Failed to marshal config")]
    Serialization(#[source] serde_json::Error),
}

/// Terminal state of a replace attempt that didn't succeed. Lets callers decide on a retry
/// policy without matching on error details.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum ReplaceOutcome {
    /// No leader record. Nothing was sent.
    Unresolvable,
    /// Couldn't read the store. Nothing was sent.
    StoreUnreachable,
    /// Leader resolved but the exchange with it didn't complete. The leader may or may not have
    /// applied the config.
    TransportFailed,
    /// Leader answered and declined.
    Rejected,
    /// Config couldn't be encoded. Nothing was sent.
    NotSent,
}

impl ReplaceConfigError {
    pub fn outcome(&self) -> ReplaceOutcome {
        match self {
            ReplaceConfigError::LeaderUnavailable(_) => ReplaceOutcome::Unresolvable,
            ReplaceConfigError::CoordinationStoreUnreachable(_) => ReplaceOutcome::StoreUnreachable,
            ReplaceConfigError::TransportFailure { .. } => ReplaceOutcome::TransportFailed,
            ReplaceConfigError::RejectedByLeader { .. } => ReplaceOutcome::Rejected,
            ReplaceConfigError::Serialization(_) => ReplaceOutcome::NotSent,
        }
    }

    /// True if the attempt stopped before any leader was known.
    pub fn is_leader_unresolved(&self) -> bool {
        matches!(
            self.outcome(),
            ReplaceOutcome::Unresolvable | ReplaceOutcome::StoreUnreachable
        )
    }

    /// The leader the attempt was aimed at, if it got that far.
    pub fn leader(&self) -> Option<&LeaderInfo> {
        match self {
            ReplaceConfigError::TransportFailure { leader, .. } => Some(leader),
            ReplaceConfigError::RejectedByLeader { leader, .. } => Some(leader),
            _ => None,
        }
    }

    fn from_publish_error(leader: LeaderInfo, publish_error: PublishError) -> Self {
        match publish_error {
            PublishError::Serialization(e) => ReplaceConfigError::Serialization(e),
            PublishError::Transport(source) => ReplaceConfigError::TransportFailure { leader, source },
            PublishError::Rejected { status, reason, body } => ReplaceConfigError::RejectedByLeader {
                leader,
                status,
                reason,
                body,
            },
        }
    }
}

// ------- Conversions --------

impl From<LocateLeaderError> for ReplaceConfigError {
    fn from(locate_error: LocateLeaderError) -> Self {
        match locate_error {
            LocateLeaderError::NotAvailable(reason) => ReplaceConfigError::LeaderUnavailable(reason),
            LocateLeaderError::StoreUnreachable(e) => ReplaceConfigError::CoordinationStoreUnreachable(e),
        }
    }
}
