use std::fmt;

/// ClusterPath knows where a cluster's entries live inside the coordination store.
///
/// Layout: `{base_path}/{cluster_name}/...`. The leader sentinel refreshes its own record under
/// `leader-sentinel-info`.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ClusterPath {
    base_path: String,
    cluster_name: String,
}

impl ClusterPath {
    pub const DEFAULT_BASE_PATH: &'static str = "/sentinel-config/cluster";

    const LEADER_SENTINEL_INFO: &'static str = "leader-sentinel-info";

    pub fn new(base_path: impl Into<String>, cluster_name: impl Into<String>) -> Self {
        ClusterPath {
            base_path: base_path.into(),
            cluster_name: cluster_name.into(),
        }
    }

    pub fn with_default_base(cluster_name: impl Into<String>) -> Self {
        Self::new(Self::DEFAULT_BASE_PATH, cluster_name)
    }

    pub fn cluster_name(&self) -> &str {
        &self.cluster_name
    }

    pub fn cluster_root(&self) -> String {
        format!("{}/{}", self.base_path.trim_end_matches('/'), self.cluster_name)
    }

    pub fn leader_sentinel_info_key(&self) -> String {
        format!("{}/{}", self.cluster_root(), Self::LEADER_SENTINEL_INFO)
    }
}

impl fmt::Display for ClusterPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.cluster_root())
    }
}
