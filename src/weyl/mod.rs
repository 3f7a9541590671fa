// src/weyl/mod.rs

//! Point-wise electric part of the Weyl tensor and its scalar invariant.

use crate::kernel::{self, SpatialTensor};

/// Computes the electric part of the Weyl tensor in vacuum,
///
/// `E_ij = R_ij + K K_ij - K_il g^lk K_kj`,
///
/// where `R_ij` is the spatial Ricci tensor, `K_ij` the extrinsic curvature
/// and `K = g^kl K_kl` its trace. Non-vacuum data needs additional matter terms
/// that are not included here.
pub fn weyl_electric<const D: usize>(
    spatial_ricci: &SpatialTensor<D>,
    extrinsic_curvature: &SpatialTensor<D>,
    inverse_spatial_metric: &SpatialTensor<D>,
) -> SpatialTensor<D> {
    let trace_k = kernel::metric_trace(extrinsic_curvature, inverse_spatial_metric);
    // K^l_j
    let k_up_down = kernel::raise_first_index(extrinsic_curvature, inverse_spatial_metric);

    let mut weyl_electric_part = *spatial_ricci;
    for i in 0..D {
        for j in 0..D {
            let mut k_squared = 0.0;
            for l in 0..D {
                k_squared += extrinsic_curvature[(i, l)] * k_up_down[(l, j)];
            }
            weyl_electric_part[(i, j)] += trace_k * extrinsic_curvature[(i, j)] - k_squared;
        }
    }
    weyl_electric_part
}

/// Computes the scalar invariant of the electric Weyl tensor,
///
/// `E_ij E_kl g^ik g^jl` (equivalently `E^ij E_ij`),
///
/// the squared norm of `E` under the spatial metric. All four indices are
/// summed, so the result is always a single number per point.
///
/// Two other contractions look plausible and are wrong:
///
/// * `(E_ij g^ij) (E_kl g^kl)` pairs each copy of `E` with the metric on its
///   own indices. That is the squared trace, a different invariant: for
///   `E = diag(1, 2, 3)` and a flat metric it gives 36 instead of 14.
/// * Taking the outer products `E_ij E_kl` and `g^ik g^jl` and multiplying
///   them without summing every index leaves free indices behind, so the
///   result has rank 2 or higher instead of rank 0.
///
/// `E` is not required to be symmetric; no symmetry is assumed by the sum.
pub fn weyl_electric_scalar<const D: usize>(
    weyl_electric: &SpatialTensor<D>,
    inverse_spatial_metric: &SpatialTensor<D>,
) -> f64 {
    kernel::double_contraction(weyl_electric, weyl_electric, inverse_spatial_metric)
}
