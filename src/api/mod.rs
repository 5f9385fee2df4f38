//! This mod is meant to hold most of the code for the library's client-facing API.
mod client;
mod options;
mod replace;
mod report;
mod source;
mod types;
mod wiring;

pub use client::ConfigReplacer;
pub use options::ReplacerOptions;
pub use replace::replace_config;
pub use replace::ReplaceConfigError;
pub use replace::ReplaceOutcome;
pub use report::error_chain;
pub use source::read_config_source;
pub use source::read_config_source_from;
pub use source::ConfigSourceError;
pub use source::STDIN_SOURCE;
pub use types::ClusterConfig;
pub use wiring::try_create_config_replacer;
pub use wiring::ReplacerConfig;
pub use wiring::ReplacerCreationError;
