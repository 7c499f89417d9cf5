//! Error types for graph construction

use thiserror::Error;

/// Errors that can occur while configuring the graph builder
///
/// Malformed graph data is never an error here: dangling references and
/// prerequisite cycles are reported as [`Diagnostic`](crate::Diagnostic)s.
#[derive(Error, Debug)]
pub enum GraphError {
    /// Threshold outside its valid range
    #[error("Configuration error: {0}")]
    Config(String),

    /// TOML parse or serialise failure
    #[error("TOML error: {0}")]
    Toml(String),
}

impl From<toml::de::Error> for GraphError {
    fn from(e: toml::de::Error) -> Self {
        GraphError::Toml(e.to_string())
    }
}

impl From<toml::ser::Error> for GraphError {
    fn from(e: toml::ser::Error) -> Self {
        GraphError::Toml(e.to_string())
    }
}
