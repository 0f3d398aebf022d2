//! Eigen-decomposition of the per-voxel Hessian.

use nalgebra::Matrix3;

/// Eigenvalues of a symmetric 3×3 matrix given as
/// `[dxx, dyy, dzz, dxy, dxz, dyz]` (the layout produced by
/// [`crate::hessian::HessianField::components_at`]).
///
/// The returned order is unspecified; callers that need the
/// sorted-by-magnitude convention sort themselves.
pub fn symmetric_eigenvalues(components: [f32; 6]) -> [f32; 3] {
    let [dxx, dyy, dzz, dxy, dxz, dyz] = components;
    let m = Matrix3::new(dxx, dxy, dxz, dxy, dyy, dyz, dxz, dyz, dzz);
    let eig = m.symmetric_eigen().eigenvalues;
    [eig[0], eig[1], eig[2]]
}
