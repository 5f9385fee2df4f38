use serde::{Deserialize, Serialize};

/// LeaderInfo is where the current leader sentinel accepts requests, as published by that
/// sentinel into the coordination store.
///
/// Field names on the wire match what the sentinel writes: `{"ID", "ListenAddress", "Port"}`.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct LeaderInfo {
    #[serde(rename = "ID", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(rename = "ListenAddress")]
    pub listen_address: String,
    #[serde(rename = "Port")]
    pub port: String,
}

impl LeaderInfo {
    pub fn new(listen_address: impl Into<String>, port: impl Into<String>) -> Self {
        LeaderInfo {
            id: None,
            listen_address: listen_address.into(),
            port: port.into(),
        }
    }

    /// Decode a leader record as stored in the coordination store. The error is a human readable
    /// description of what's wrong with the record.
    pub(crate) fn from_record(record: &[u8]) -> Result<Self, String> {
        let text = std::str::from_utf8(record).map_err(|e| format!("record is not UTF-8: {}", e))?;
        let info: LeaderInfo = serde_json::from_str(text).map_err(|e| format!("record is not a leader record: {}", e))?;

        if info.listen_address.trim().is_empty() {
            return Err("record has an empty listen address".to_string());
        }
        if !is_host(&info.listen_address) {
            return Err(format!("record has an unusable listen address {:?}", info.listen_address));
        }
        if info.port.trim().is_empty() {
            return Err("record has an empty port".to_string());
        }
        if !info.port.bytes().all(|b| b.is_ascii_digit()) || info.port.parse::<u16>().is_err() {
            return Err(format!("record has an unusable port {:?}", info.port));
        }

        Ok(info)
    }
}

// Anything that would change the meaning of `http://{address}:{port}/...` is out.
fn is_host(address: &str) -> bool {
    !address
        .chars()
        .any(|c| c.is_whitespace() || c.is_control() || matches!(c, '/' | '?' | '#' | '@' | '\\' | '%'))
}
