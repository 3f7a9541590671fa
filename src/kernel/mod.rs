// src/kernel/mod.rs

//! The numerical kernel of the engine.
//! Fixed-size spatial tensors and the index contractions built on them.
//!
//! Every contraction is spelled out as nested loops over `0..D` so the index
//! bookkeeping can be read directly against the tensor expression it implements.

use nalgebra::SMatrix;

use crate::WeylError;

/// Number of spatial dimensions in a 3+1 slicing.
pub const SPATIAL_DIM: usize = 3;

/// A rank-2 spatial tensor. Whether the indices are covariant or
/// contravariant is carried by the argument name, not the type.
pub type SpatialTensor<const D: usize> = SMatrix<f64, D, D>;

// Type alias for the common three-dimensional case.
pub type SpatialTensor3 = SpatialTensor<SPATIAL_DIM>;

/// Builds a tensor from nested rows, `rows[i][j]` becoming component `(i, j)`.
pub fn tensor_from_rows<const D: usize>(rows: [[f64; D]; D]) -> SpatialTensor<D> {
    SpatialTensor::<D>::from_fn(|i, j| rows[i][j])
}

/// Builds a tensor from a row-major slice of exactly `D * D` components.
pub fn tensor_from_row_slice<const D: usize>(
    argument: &'static str,
    components: &[f64],
) -> Result<SpatialTensor<D>, WeylError> {
    if components.len() != D * D {
        return Err(WeylError::ShapeMismatch {
            argument,
            expected: vec![D * D],
            actual: vec![components.len()],
        });
    }
    Ok(SpatialTensor::<D>::from_row_slice(components))
}

/// Double contraction of two lower-index tensors through two copies of an
/// upper-index metric: `a_ij b_kl g^ik g^jl`.
///
/// The first index of `a` pairs with the first index of `b`, and likewise the
/// second with the second. All four indices are summed, so the result is rank 0.
pub fn double_contraction<const D: usize>(
    a: &SpatialTensor<D>,
    b: &SpatialTensor<D>,
    inverse_metric: &SpatialTensor<D>,
) -> f64 {
    let mut sum = 0.0;
    for i in 0..D {
        for j in 0..D {
            for k in 0..D {
                for l in 0..D {
                    sum += a[(i, j)] * b[(k, l)] * inverse_metric[(i, k)] * inverse_metric[(j, l)];
                }
            }
        }
    }
    sum
}

/// Trace of a lower-index tensor taken with the metric: `t_ij g^ij`.
pub fn metric_trace<const D: usize>(tensor: &SpatialTensor<D>, inverse_metric: &SpatialTensor<D>) -> f64 {
    let mut trace = 0.0;
    for i in 0..D {
        for j in 0..D {
            trace += tensor[(i, j)] * inverse_metric[(i, j)];
        }
    }
    trace
}

/// Raises the first index: `t^k_j = g^ki t_ij`.
pub fn raise_first_index<const D: usize>(
    tensor: &SpatialTensor<D>,
    inverse_metric: &SpatialTensor<D>,
) -> SpatialTensor<D> {
    let mut raised = SpatialTensor::<D>::zeros();
    for k in 0..D {
        for j in 0..D {
            for i in 0..D {
                raised[(k, j)] += inverse_metric[(k, i)] * tensor[(i, j)];
            }
        }
    }
    raised
}

/// Inverts a spatial metric `g_ij` to obtain `g^ij`.
pub fn inverse_spatial_metric<const D: usize>(
    spatial_metric: &SpatialTensor<D>,
) -> Result<SpatialTensor<D>, WeylError> {
    spatial_metric.try_inverse().ok_or(WeylError::SingularMetric)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn sample_metric() -> SpatialTensor3 {
        tensor_from_rows([[2.0, 0.5, 0.0], [0.5, 1.5, 0.25], [0.0, 0.25, 1.0]])
    }

    #[test]
    fn test_double_contraction_with_identity_is_frobenius_product() {
        let a = tensor_from_rows([[1.0, 2.0, 3.0], [4.0, 5.0, 6.0], [7.0, 8.0, 9.0]]);
        let b = tensor_from_rows([[9.0, 8.0, 7.0], [6.0, 5.0, 4.0], [3.0, 2.0, 1.0]]);
        let identity = SpatialTensor3::identity();
        let expected: f64 = a.component_mul(&b).sum();
        assert_relative_eq!(double_contraction(&a, &b, &identity), expected, epsilon = 1e-12);
    }

    #[test]
    fn test_double_contraction_matches_matrix_form() {
        // a_ij b_kl g^ik g^jl == tr(g a g b^T)
        let a = tensor_from_rows([[1.0, -2.0, 0.5], [0.3, 4.0, 1.0], [2.0, 0.0, -1.0]]);
        let b = tensor_from_rows([[0.5, 1.0, 0.0], [-1.0, 2.0, 3.0], [0.25, 0.0, 1.5]]);
        let g = sample_metric();
        let expected = (g * a * g * b.transpose()).trace();
        assert_relative_eq!(double_contraction(&a, &b, &g), expected, epsilon = 1e-12);
    }

    #[test]
    fn test_metric_trace() {
        let t = tensor_from_rows([[1.0, 0.0, 0.0], [0.0, 2.0, 0.0], [0.0, 0.0, 3.0]]);
        assert_relative_eq!(metric_trace(&t, &SpatialTensor3::identity()), 6.0);
        let scaled = SpatialTensor3::identity() * 0.5;
        assert_relative_eq!(metric_trace(&t, &scaled), 3.0);
    }

    #[test]
    fn test_raise_first_index_matches_matrix_product() {
        let t = tensor_from_rows([[1.0, 2.0, 0.0], [2.0, -1.0, 0.5], [0.0, 0.5, 3.0]]);
        let g = sample_metric();
        let raised = raise_first_index(&t, &g);
        let expected = g * t;
        for i in 0..3 {
            for j in 0..3 {
                assert_relative_eq!(raised[(i, j)], expected[(i, j)], epsilon = 1e-12);
            }
        }
    }

    #[test]
    fn test_inverse_spatial_metric() {
        let metric = sample_metric();
        let inverse = inverse_spatial_metric(&metric).unwrap();
        let product = metric * inverse;
        for i in 0..3 {
            for j in 0..3 {
                let expected = if i == j { 1.0 } else { 0.0 };
                assert_relative_eq!(product[(i, j)], expected, epsilon = 1e-12);
            }
        }
    }

    #[test]
    fn test_inverse_spatial_metric_singular() {
        let metric = tensor_from_rows([[1.0, 1.0, 0.0], [1.0, 1.0, 0.0], [0.0, 0.0, 1.0]]);
        assert!(matches!(inverse_spatial_metric(&metric), Err(WeylError::SingularMetric)));
    }

    #[test]
    fn test_tensor_from_row_slice_wrong_length() {
        let result = tensor_from_row_slice::<3>("weyl_electric", &[1.0; 8]);
        match result {
            Err(WeylError::ShapeMismatch { argument, expected, actual }) => {
                assert_eq!(argument, "weyl_electric");
                assert_eq!(expected, vec![9]);
                assert_eq!(actual, vec![8]);
            }
            other => panic!("expected a shape mismatch, got {:?}", other),
        }
    }

    #[test]
    fn test_tensor_from_row_slice_is_row_major() {
        let t = tensor_from_row_slice::<2>("tensor", &[1.0, 2.0, 3.0, 4.0]).unwrap();
        assert_eq!(t[(0, 1)], 2.0);
        assert_eq!(t[(1, 0)], 3.0);
    }
}
