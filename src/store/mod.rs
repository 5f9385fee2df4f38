//! This mod holds the read-only view of the coordination store that the rest of the crate depends
//! on, plus the implementations we ship.
mod api;
mod etcd;
mod in_memory;
mod path;

pub use api::CoordinationStore;
pub use api::StoreReadError;
pub use etcd::EtcdStore;
pub use in_memory::InMemoryStore;
pub use path::ClusterPath;
