// src/validation/mod.rs

//! Optional input checks run before a field evaluation.
//!
//! Neither check is needed for the arithmetic to be well defined; they exist for
//! callers who want to catch corrupted input early.

use serde::{Deserialize, Serialize};

use crate::kernel::SpatialTensor;
use crate::WeylError;

/// Non-fatal diagnostic raised when a Weyl electric tensor is measurably
/// asymmetric at a point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AsymmetryWarning {
    /// Flat (row-major) index of the point within the batch.
    pub point: usize,
    /// Component `(i, j)` with the largest `|E_ij - E_ji|`, `i < j`.
    pub component: (usize, usize),
    pub deviation: f64,
    pub tolerance: f64,
}

/// Returns a warning when the largest `|E_ij - E_ji|` exceeds `tolerance`.
pub fn check_symmetry<const D: usize>(
    weyl_electric: &SpatialTensor<D>,
    point: usize,
    tolerance: f64,
) -> Option<AsymmetryWarning> {
    let mut worst: Option<((usize, usize), f64)> = None;
    for i in 0..D {
        for j in (i + 1)..D {
            let deviation = (weyl_electric[(i, j)] - weyl_electric[(j, i)]).abs();
            // NaN deviations compare false and are left to the finiteness check.
            if deviation > tolerance && worst.map_or(true, |(_, d)| deviation > d) {
                worst = Some(((i, j), deviation));
            }
        }
    }
    worst.map(|(component, deviation)| AsymmetryWarning {
        point,
        component,
        deviation,
        tolerance,
    })
}

/// Rejects any NaN or infinite component.
pub fn check_finite<const D: usize>(
    tensor: &SpatialTensor<D>,
    argument: &'static str,
    point: usize,
) -> Result<(), WeylError> {
    if tensor.iter().all(|c| c.is_finite()) {
        Ok(())
    } else {
        Err(WeylError::NonFinite { argument, point })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kernel::{tensor_from_rows, SpatialTensor3};

    #[test]
    fn test_symmetric_tensor_has_no_warning() {
        let e = tensor_from_rows([[1.0, 0.5, 0.2], [0.5, 2.0, 0.1], [0.2, 0.1, 3.0]]);
        assert!(check_symmetry(&e, 0, 0.0).is_none());
    }

    #[test]
    fn test_asymmetry_reports_largest_deviation() {
        let e = tensor_from_rows([[1.0, 0.5, 0.2], [0.6, 2.0, 0.1], [0.2, 0.4, 3.0]]);
        let warning = check_symmetry(&e, 7, 1e-3).unwrap();
        assert_eq!(warning.point, 7);
        assert_eq!(warning.component, (1, 2));
        assert!((warning.deviation - 0.3).abs() < 1e-12);
        assert_eq!(warning.tolerance, 1e-3);
    }

    #[test]
    fn test_asymmetry_within_tolerance_is_ignored() {
        let e = tensor_from_rows([[1.0, 0.5, 0.0], [0.5 + 1e-10, 2.0, 0.0], [0.0, 0.0, 3.0]]);
        assert!(check_symmetry(&e, 0, 1e-8).is_none());
        assert!(check_symmetry(&e, 0, 1e-12).is_some());
    }

    #[test]
    fn test_check_finite() {
        let mut g = SpatialTensor3::identity();
        assert!(check_finite(&g, "inverse_spatial_metric", 0).is_ok());
        g[(2, 0)] = f64::INFINITY;
        match check_finite(&g, "inverse_spatial_metric", 4) {
            Err(WeylError::NonFinite { argument, point }) => {
                assert_eq!(argument, "inverse_spatial_metric");
                assert_eq!(point, 4);
            }
            other => panic!("expected NonFinite, got {:?}", other),
        }
    }
}
