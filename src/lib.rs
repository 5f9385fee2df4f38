mod api;
mod locator;
mod publisher;
mod store;

pub use api::error_chain;
pub use api::read_config_source;
pub use api::read_config_source_from;
pub use api::replace_config;
pub use api::try_create_config_replacer;
pub use api::ClusterConfig;
pub use api::ConfigReplacer;
pub use api::ConfigSourceError;
pub use api::ReplaceConfigError;
pub use api::ReplaceOutcome;
pub use api::ReplacerConfig;
pub use api::ReplacerCreationError;
pub use api::ReplacerOptions;
pub use api::STDIN_SOURCE;
pub use locator::LeaderInfo;
pub use locator::LeaderLocator;
pub use locator::LocateLeaderError;
pub use locator::NotAvailableReason;
pub use publisher::config_endpoint_url;
pub use publisher::ConfigPublisher;
pub use publisher::HttpTransport;
pub use publisher::LeaderRequest;
pub use publisher::LeaderResponse;
pub use publisher::LeaderTransport;
pub use publisher::PublishError;
pub use publisher::TransportError;
pub use store::ClusterPath;
pub use store::CoordinationStore;
pub use store::EtcdStore;
pub use store::InMemoryStore;
pub use store::StoreReadError;

// Same rule as always: `crate::{root_mod}` holds no code. Just `mod` and `pub use` statements,
// and no `mod` is `pub`.
