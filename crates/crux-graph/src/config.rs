//! Configuration for role assignment

use crate::GraphError;
use serde::{Deserialize, Serialize};

/// Default minimum support-ratio gap before the weaker side of a conflict is demoted
pub const DEFAULT_SUPPORT_DELTA_THRESHOLD: f64 = 0.15;

/// Default support ratio at which a claim counts as high-support
pub const DEFAULT_HIGH_SUPPORT_THRESHOLD: f64 = 0.25;

/// Configuration for the graph builder
///
/// # Examples
///
/// ```
/// use crux_graph::GraphConfig;
///
/// let config = GraphConfig::default();
/// assert_eq!(config.support_delta_threshold, 0.15);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphConfig {
    /// Minimum `|ratio_a - ratio_b|` for the lower side of a conflict to
    /// become a challenger
    #[serde(default = "default_support_delta_threshold")]
    pub support_delta_threshold: f64,

    /// Support ratio at or above which a claim is high-support
    #[serde(default = "default_high_support_threshold")]
    pub high_support_threshold: f64,
}

fn default_support_delta_threshold() -> f64 {
    DEFAULT_SUPPORT_DELTA_THRESHOLD
}

fn default_high_support_threshold() -> f64 {
    DEFAULT_HIGH_SUPPORT_THRESHOLD
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            support_delta_threshold: DEFAULT_SUPPORT_DELTA_THRESHOLD,
            high_support_threshold: DEFAULT_HIGH_SUPPORT_THRESHOLD,
        }
    }
}

impl GraphConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), GraphError> {
        if !(0.0..=1.0).contains(&self.support_delta_threshold) {
            return Err(GraphError::Config(format!(
                "support_delta_threshold must be in [0.0, 1.0], got {}",
                self.support_delta_threshold
            )));
        }
        if !(0.0..=1.0).contains(&self.high_support_threshold) {
            return Err(GraphError::Config(format!(
                "high_support_threshold must be in [0.0, 1.0], got {}",
                self.high_support_threshold
            )));
        }
        Ok(())
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, GraphError> {
        let config: Self = toml::from_str(toml_str)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, GraphError> {
        Ok(toml::to_string_pretty(self)?)
    }
}
