use crate::api::ClusterConfig;
use std::io::{self, Read};
use std::path::Path;

/// Path that means "read the config from stdin".
pub const STDIN_SOURCE: &str = "-";

/// Load and decode a config document from `source`, which is either a file path or `-` for stdin.
pub fn read_config_source(source: &str) -> Result<ClusterConfig, ConfigSourceError> {
    read_config_source_from(source, io::stdin().lock())
}

/// Same as `read_config_source()`, with `stdin` standing in for the process's standard input.
pub fn read_config_source_from<R: Read>(source: &str, stdin: R) -> Result<ClusterConfig, ConfigSourceError> {
    let bytes = if source == STDIN_SOURCE {
        read_all(stdin).map_err(ConfigSourceError::ReadStdin)?
    } else {
        std::fs::read(Path::new(source)).map_err(|e| ConfigSourceError::ReadFile {
            path: source.to_string(),
            source: e,
        })?
    };

    ClusterConfig::from_json_slice(&bytes).map_err(ConfigSourceError::Decode)
}

fn read_all<R: Read>(mut reader: R) -> io::Result<Vec<u8>> {
    let mut bytes = vec![];
    reader.read_to_end(&mut bytes)?;
    Ok(bytes)
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigSourceError {
    #[error("Cannot read config file from stdin")]
    ReadStdin(#[source] io::Error),
    #[error("Cannot read provided config file '{path}'")]
    ReadFile {
        path: String,
        #[source]
        source: io::Error,
    },
    #[error("Failed to unmarshal config")]
    Decode(#[source] serde_json::Error),
}
