// src/batch/mod.rs

//! Evaluation of the Weyl electric scalar over batches of spatial points.
//!
//! Inputs are row-major arrays of shape `[p0, p1, ..., D, D]`. The leading
//! "point" axes are never contracted; the result has exactly that shape.

use ndarray::{ArrayD, ArrayViewD, IxDyn};
use rayon::prelude::*;
use tracing::{debug, warn};

use crate::kernel::{tensor_from_row_slice, SpatialTensor};
use crate::settings::ComputeSettings;
use crate::validation::{self, AsymmetryWarning};
use crate::weyl::weyl_electric_scalar;
use crate::WeylError;

/// A scalar per spatial point, plus any diagnostics raised while computing it.
#[derive(Debug, Clone)]
pub struct ScalarField {
    values: ArrayD<f64>,
    warnings: Vec<AsymmetryWarning>,
}

impl ScalarField {
    pub fn values(&self) -> &ArrayD<f64> {
        &self.values
    }

    pub fn warnings(&self) -> &[AsymmetryWarning] {
        &self.warnings
    }

    /// Shape of the point axes. Empty for a single point.
    pub fn point_shape(&self) -> &[usize] {
        self.values.shape()
    }

    pub fn into_values(self) -> ArrayD<f64> {
        self.values
    }
}

/// Splits `[p..., D, D]` into the point shape, or reports what was expected.
fn point_shape_of<const D: usize>(argument: &'static str, shape: &[usize]) -> Result<Vec<usize>, WeylError> {
    let rank = shape.len();
    if rank < 2 || shape[rank - 2] != D || shape[rank - 1] != D {
        let mut expected: Vec<usize> = if rank >= 2 { shape[..rank - 2].to_vec() } else { Vec::new() };
        expected.extend_from_slice(&[D, D]);
        return Err(WeylError::ShapeMismatch {
            argument,
            expected,
            actual: shape.to_vec(),
        });
    }
    Ok(shape[..rank - 2].to_vec())
}

/// Checks both inputs and returns their shared point shape.
pub fn check_shapes<const D: usize>(
    weyl_electric: &ArrayViewD<'_, f64>,
    inverse_spatial_metric: &ArrayViewD<'_, f64>,
) -> Result<Vec<usize>, WeylError> {
    let points = point_shape_of::<D>("weyl_electric", weyl_electric.shape())?;
    let metric_points = point_shape_of::<D>("inverse_spatial_metric", inverse_spatial_metric.shape())?;
    if points != metric_points {
        let mut expected = points;
        expected.extend_from_slice(&[D, D]);
        return Err(WeylError::ShapeMismatch {
            argument: "inverse_spatial_metric",
            expected,
            actual: inverse_spatial_metric.shape().to_vec(),
        });
    }
    Ok(points)
}

/// Computes `E_ij E_kl g^ik g^jl` at every point of a batch.
///
/// Each point is independent; batches of at least
/// `settings.parallel_threshold` points are spread over the rayon pool.
/// The values do not depend on which path is taken.
pub fn weyl_electric_scalar_field<const D: usize>(
    weyl_electric: ArrayViewD<'_, f64>,
    inverse_spatial_metric: ArrayViewD<'_, f64>,
    settings: &ComputeSettings,
) -> Result<ScalarField, WeylError> {
    let point_shape = check_shapes::<D>(&weyl_electric, &inverse_spatial_metric)?;
    let num_points: usize = point_shape.iter().product();
    let block = D * D;

    // Logical (row-major) order regardless of the memory layout of the views.
    let e_components: Vec<f64> = weyl_electric.iter().copied().collect();
    let g_components: Vec<f64> = inverse_spatial_metric.iter().copied().collect();

    let mut tensors: Vec<(SpatialTensor<D>, SpatialTensor<D>)> = Vec::with_capacity(num_points);
    for (e_block, g_block) in e_components.chunks_exact(block).zip(g_components.chunks_exact(block)) {
        tensors.push((
            tensor_from_row_slice::<D>("weyl_electric", e_block)?,
            tensor_from_row_slice::<D>("inverse_spatial_metric", g_block)?,
        ));
    }

    if settings.reject_non_finite {
        for (point, (e, g)) in tensors.iter().enumerate() {
            validation::check_finite(e, "weyl_electric", point)?;
            validation::check_finite(g, "inverse_spatial_metric", point)?;
        }
    }

    let mut warnings = Vec::new();
    if let Some(tolerance) = settings.symmetry_tolerance {
        for (point, (e, _)) in tensors.iter().enumerate() {
            if let Some(warning) = validation::check_symmetry(e, point, tolerance) {
                warn!(
                    point = warning.point,
                    i = warning.component.0,
                    j = warning.component.1,
                    deviation = warning.deviation,
                    tolerance = warning.tolerance,
                    "weyl electric tensor is not symmetric"
                );
                warnings.push(warning);
            }
        }
    }

    let parallel = num_points >= settings.parallel_threshold;
    debug!(num_points, parallel, dim = D, "evaluating weyl electric scalar field");

    let scalars: Vec<f64> = if parallel {
        tensors.par_iter().map(|(e, g)| weyl_electric_scalar(e, g)).collect()
    } else {
        tensors.iter().map(|(e, g)| weyl_electric_scalar(e, g)).collect()
    };

    let values = ArrayD::from_shape_vec(IxDyn(&point_shape), scalars)?;
    Ok(ScalarField { values, warnings })
}
