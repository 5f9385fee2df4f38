use crate::api::client::ConfigReplacer;
use crate::api::options::ReplacerOptionsValidated;
use crate::api::ReplacerOptions;
use crate::publisher::HttpTransport;
use crate::store::{ClusterPath, EtcdStore};
use std::convert::TryFrom;

pub struct ReplacerConfig {
    pub cluster_name: String,
    // e.g. "http://127.0.0.1:2379". Tried in order.
    pub store_endpoints: Vec<String>,
    pub logger: slog::Logger,
    pub options: ReplacerOptions,
}

#[derive(Debug, thiserror::Error)]
pub enum ReplacerCreationError {
    #[error("Illegal options for configuring replacer: {0}")]
    IllegalOptions(String),
    #[error("Cluster name must not be empty")]
    EmptyClusterName,
    #[error("No coordination store endpoints provided")]
    NoStoreEndpoints,
    #[error("Invalid coordination store endpoint '{0}': must start with http:// or https://")]
    InvalidStoreEndpoint(String),
    #[error("Failed to build HTTP client")]
    HttpClient(#[source] reqwest::Error),
}

/// Build a `ConfigReplacer` that reads the leader from etcd and talks HTTP to it.
pub fn try_create_config_replacer(
    config: ReplacerConfig,
) -> Result<ConfigReplacer<EtcdStore, HttpTransport>, ReplacerCreationError> {
    let logger = config.logger;

    let options = ReplacerOptionsValidated::try_from(config.options)
        .map_err(|e| ReplacerCreationError::IllegalOptions(e.to_string()))?;

    if config.cluster_name.trim().is_empty() {
        return Err(ReplacerCreationError::EmptyClusterName);
    }
    validate_store_endpoints(&config.store_endpoints)?;

    let cluster_path = ClusterPath::new(options.store_base_path, config.cluster_name);
    let logger = logger.new(slog::o!("Cluster" => cluster_path.cluster_name().to_string()));

    let store = EtcdStore::new(
        logger.new(slog::o!("Component" => "EtcdStore")),
        config.store_endpoints,
        options.store_request_timeout,
    )
    .map_err(ReplacerCreationError::HttpClient)?;

    let transport_logger = logger.new(slog::o!("Component" => "HttpTransport"));
    let transport = match options.leader_request_timeout {
        Some(timeout) => {
            let http = HttpTransport::client_builder()
                .timeout(timeout)
                .build()
                .map_err(ReplacerCreationError::HttpClient)?;
            HttpTransport::with_client(transport_logger, http)
        }
        None => HttpTransport::new(transport_logger).map_err(ReplacerCreationError::HttpClient)?,
    };

    Ok(ConfigReplacer::new(cluster_path, store, transport))
}

fn validate_store_endpoints(endpoints: &[String]) -> Result<(), ReplacerCreationError> {
    if endpoints.is_empty() {
        return Err(ReplacerCreationError::NoStoreEndpoints);
    }

    for endpoint in endpoints {
        if !endpoint.starts_with("http://") && !endpoint.starts_with("https://") {
            return Err(ReplacerCreationError::InvalidStoreEndpoint(endpoint.clone()));
        }
    }

    Ok(())
}
