use crate::api::replace::{locate_and_publish, ReplaceConfigError};
use crate::locator::LeaderLocator;
use crate::publisher::{ConfigPublisher, LeaderTransport};
use crate::store::{ClusterPath, CoordinationStore};
use serde::Serialize;

/// ConfigReplacer replaces the configuration of one cluster.
///
/// It keeps its store and transport around between calls, but never the leader. Every call to
/// `replace_config()` looks the leader up again.
pub struct ConfigReplacer<S: CoordinationStore, T: LeaderTransport> {
    cluster_path: ClusterPath,
    locator: LeaderLocator<S>,
    publisher: ConfigPublisher<T>,
}

impl<S: CoordinationStore, T: LeaderTransport> ConfigReplacer<S, T> {
    pub fn new(cluster_path: ClusterPath, store: S, transport: T) -> Self {
        let locator = LeaderLocator::new(store, cluster_path.leader_sentinel_info_key());

        ConfigReplacer {
            cluster_path,
            locator,
            publisher: ConfigPublisher::new(transport),
        }
    }

    pub fn cluster_path(&self) -> &ClusterPath {
        &self.cluster_path
    }

    pub async fn replace_config<C>(&self, config: &C) -> Result<(), ReplaceConfigError>
    where
        C: Serialize + ?Sized,
    {
        locate_and_publish(&self.locator, &self.publisher, config).await
    }
}
