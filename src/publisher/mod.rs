mod http_transport;
mod publisher;
#[cfg(test)]
mod test_utils;
mod transport;

pub use http_transport::HttpTransport;
pub use publisher::config_endpoint_url;
pub use publisher::ConfigPublisher;
pub use publisher::PublishError;
pub use transport::LeaderRequest;
pub use transport::LeaderResponse;
pub use transport::LeaderTransport;
pub use transport::TransportError;

#[cfg(test)]
pub(crate) use test_utils::TestUtilTransport;
