//! Provenance tracking

use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque reference into the external evidence store
///
/// The engine never dereferences these; it only carries them from claims,
/// edges and gates through to forcing points.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProvenanceRef(String);

impl ProvenanceRef {
    /// Wrap an evidence id
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Borrow the raw identifier
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProvenanceRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ProvenanceRef {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}
