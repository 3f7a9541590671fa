pub mod kernel;
pub mod weyl;
pub mod batch;
pub mod validation;
pub mod settings;
pub mod provenance;

// Re-exporting the core tensor types and operations for easier access.
pub use kernel::{SpatialTensor, SpatialTensor3, SPATIAL_DIM};
pub use weyl::{weyl_electric, weyl_electric_scalar};
pub use batch::{weyl_electric_scalar_field, ScalarField};
pub use settings::ComputeSettings;
pub use validation::AsymmetryWarning;

use ndarray::ArrayViewD;
use thiserror::Error;
use tracing::debug;

// --- Return Types and Errors ---

#[derive(Debug, Error)]
pub enum WeylError {
    #[error("shape mismatch for `{argument}`: expected {expected:?}, found {actual:?}")]
    ShapeMismatch {
        argument: &'static str,
        expected: Vec<usize>,
        actual: Vec<usize>,
    },
    #[error("`{argument}` has a non-finite component at point {point}")]
    NonFinite { argument: &'static str, point: usize },
    #[error("spatial metric is singular")]
    SingularMetric,
    #[error("invalid settings: {0}")]
    InvalidSettings(String),
    #[error(transparent)]
    Layout(#[from] ndarray::ShapeError),
    #[error("provenance failed: {0}")]
    ProvenanceFailed(String),
}

/// The outcome of one `WeylEngine::evaluate` call.
#[derive(Debug, serde::Serialize)]
pub struct FieldSolution {
    pub id: String,
    pub point_shape: Vec<usize>,
    pub values: Vec<f64>, // Row-major over the point axes
    pub warnings: Vec<AsymmetryWarning>,
    pub provenance_chain: Vec<provenance::ProvenanceRecord>,
}

// --- Engine Facade ---

/// Evaluates Weyl electric scalar fields over three-dimensional slices and
/// records the lineage of every evaluation.
pub struct WeylEngine {
    settings: ComputeSettings,
    provenance_chain: provenance::ProvenanceChain,
}

impl Default for WeylEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl WeylEngine {
    pub fn new() -> Self {
        WeylEngine {
            settings: ComputeSettings::default(),
            provenance_chain: provenance::ProvenanceChain::new(),
        }
    }

    pub fn with_settings(settings: ComputeSettings) -> Result<Self, WeylError> {
        settings.validate()?;
        Ok(WeylEngine {
            settings,
            provenance_chain: provenance::ProvenanceChain::new(),
        })
    }

    pub fn settings(&self) -> &ComputeSettings {
        &self.settings
    }

    /// The main entry point: computes the scalar at every point of the batch.
    ///
    /// Both inputs have shape `[p..., 3, 3]`. Nothing is recorded unless the
    /// evaluation succeeds.
    pub fn evaluate(
        &mut self,
        id: &str,
        weyl_electric: ArrayViewD<'_, f64>,
        inverse_spatial_metric: ArrayViewD<'_, f64>,
    ) -> Result<FieldSolution, WeylError> {
        debug!(id, "received weyl electric scalar evaluation");

        let mut input_bytes = provenance::component_bytes(weyl_electric.iter());
        input_bytes.extend(provenance::component_bytes(inverse_spatial_metric.iter()));

        let field = batch::weyl_electric_scalar_field::<SPATIAL_DIM>(
            weyl_electric.view(),
            inverse_spatial_metric.view(),
            &self.settings,
        )?;
        let point_shape = field.point_shape().to_vec();
        let num_points: usize = point_shape.iter().product();
        let warnings = field.warnings().to_vec();
        let values: Vec<f64> = field.into_values().iter().copied().collect();

        self.provenance_chain.add_record(
            "input_tensors".to_string(),
            &input_bytes,
            env!("CARGO_PKG_VERSION").to_string(),
            serde_json::json!({"problem_id": id, "point_shape": point_shape, "dim": SPATIAL_DIM}),
        )?;
        self.provenance_chain.add_record(
            "scalar_field".to_string(),
            &provenance::component_bytes(values.iter()),
            env!("CARGO_PKG_VERSION").to_string(),
            serde_json::json!({"num_points": num_points, "asymmetry_warnings": warnings.len()}),
        )?;

        debug!(id, num_points, warnings = warnings.len(), "weyl electric scalar evaluation finished");

        Ok(FieldSolution {
            id: id.to_string(),
            point_shape,
            values,
            warnings,
            provenance_chain: self.provenance_chain.drain_records(),
        })
    }
}
