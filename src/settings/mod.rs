// src/settings/mod.rs

//! Compute settings for field evaluations.

use serde::{Deserialize, Serialize};

use crate::WeylError;

/// Batches with at least this many points are evaluated on the rayon pool.
pub const DEFAULT_PARALLEL_THRESHOLD: usize = 1024;

/// Controls validation and scheduling of a field evaluation.
/// Every field has a default, so a partial (or empty) JSON object is accepted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ComputeSettings {
    /// Maximum tolerated `|E_ij - E_ji|`. `None` disables the symmetry check.
    pub symmetry_tolerance: Option<f64>,
    /// Fail with `WeylError::NonFinite` instead of letting NaN/Inf propagate.
    pub reject_non_finite: bool,
    pub parallel_threshold: usize,
}

impl Default for ComputeSettings {
    fn default() -> Self {
        ComputeSettings {
            symmetry_tolerance: None,
            reject_non_finite: false,
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
        }
    }
}

impl ComputeSettings {
    /// Parses settings from a JSON string and validates them.
    pub fn from_json(json_str: &str) -> Result<Self, WeylError> {
        let settings: ComputeSettings = serde_json::from_str(json_str)
            .map_err(|e| WeylError::InvalidSettings(format!("Failed to parse settings: {}", e)))?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), WeylError> {
        if let Some(tolerance) = self.symmetry_tolerance {
            if !tolerance.is_finite() || tolerance < 0.0 {
                return Err(WeylError::InvalidSettings(format!(
                    "symmetry_tolerance must be finite and non-negative, got {}",
                    tolerance
                )));
            }
        }
        if self.parallel_threshold == 0 {
            return Err(WeylError::InvalidSettings("parallel_threshold must be at least 1".to_string()));
        }
        Ok(())
    }
}
