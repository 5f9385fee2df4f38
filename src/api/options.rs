use crate::store::{ClusterPath, EtcdStore};
use std::convert::TryFrom;
use std::time::Duration;

#[derive(Clone, Debug, Default)]
pub struct ReplacerOptions {
    pub store_request_timeout: Option<Duration>,
    // None means the HTTP client's own default, which is no timeout.
    pub leader_request_timeout: Option<Duration>,
    pub store_base_path: Option<String>,
}

pub(super) struct ReplacerOptionsValidated {
    pub store_request_timeout: Duration,
    pub leader_request_timeout: Option<Duration>,
    pub store_base_path: String,
}

impl ReplacerOptionsValidated {
    fn validate(&self) -> Result<(), &'static str> {
        if self.store_request_timeout == Duration::from_secs(0) {
            return Err("Coordination store request timeout must be greater than zero");
        }
        if self.leader_request_timeout == Some(Duration::from_secs(0)) {
            return Err("Leader request timeout must be greater than zero");
        }
        if !self.store_base_path.starts_with('/') {
            return Err("Coordination store base path must start with '/'");
        }
        if self.store_base_path.len() > 1 && self.store_base_path.ends_with('/') {
            return Err("Coordination store base path must not end with '/'");
        }

        Ok(())
    }
}

impl TryFrom<ReplacerOptions> for ReplacerOptionsValidated {
    type Error = &'static str;

    fn try_from(options: ReplacerOptions) -> Result<Self, Self::Error> {
        let values = ReplacerOptionsValidated {
            store_request_timeout: options
                .store_request_timeout
                .unwrap_or(EtcdStore::DEFAULT_REQUEST_TIMEOUT),
            leader_request_timeout: options.leader_request_timeout,
            store_base_path: options
                .store_base_path
                .unwrap_or_else(|| ClusterPath::DEFAULT_BASE_PATH.to_string()),
        };

        values.validate()?;
        Ok(values)
    }
}
