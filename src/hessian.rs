//! Scale-space derivatives on f32 volumes.
//!
//! Purpose
//! - Provide the per-scale ingredients of the sheetness pipeline: Gaussian
//!   smoothing, first derivatives, gradient magnitude and the six independent
//!   Hessian components.
//!
//! Design
//! - Smoothing uses a separable 1D kernel truncated at 3σ with replicate
//!   borders.
//! - Derivatives use central differences in the interior and one-sided
//!   differences at the borders, composed twice for the Hessian.
use crate::volume::VolumeF32;

/// Volume axis selector for directional operations.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    #[inline]
    fn extent(self, volume: &VolumeF32) -> usize {
        match self {
            Axis::X => volume.nx,
            Axis::Y => volume.ny,
            Axis::Z => volume.nz,
        }
    }

    #[inline]
    fn coords(self, x: usize, y: usize, z: usize, q: usize) -> (usize, usize, usize) {
        match self {
            Axis::X => (q, y, z),
            Axis::Y => (x, q, z),
            Axis::Z => (x, y, q),
        }
    }

    #[inline]
    fn position(self, x: usize, y: usize, z: usize) -> usize {
        match self {
            Axis::X => x,
            Axis::Y => y,
            Axis::Z => z,
        }
    }
}

/// Separable Gaussian smoothing; `sigma <= 0` returns the input unchanged.
pub fn gaussian_smooth(volume: &VolumeF32, sigma: f32) -> VolumeF32 {
    if sigma <= 0.0 {
        return volume.clone();
    }
    let kernel = gaussian_kernel(sigma);
    let sx = convolve_axis(volume, &kernel, Axis::X);
    let sxy = convolve_axis(&sx, &kernel, Axis::Y);
    convolve_axis(&sxy, &kernel, Axis::Z)
}

/// Normalized 1D Gaussian kernel truncated at a 3σ radius.
fn gaussian_kernel(sigma: f32) -> Vec<f32> {
    let radius = (3.0 * sigma).ceil() as usize;
    let mut kernel = Vec::with_capacity(2 * radius + 1);
    let mut sum = 0.0;
    for i in 0..2 * radius + 1 {
        let x = i as f32 - radius as f32;
        let w = (-x * x / (2.0 * sigma * sigma)).exp();
        kernel.push(w);
        sum += w;
    }
    for w in kernel.iter_mut() {
        *w /= sum;
    }
    kernel
}

/// 1D convolution along `axis` with replicate borders.
fn convolve_axis(volume: &VolumeF32, kernel: &[f32], axis: Axis) -> VolumeF32 {
    let radius = kernel.len() / 2;
    let extent = axis.extent(volume);
    let mut out = VolumeF32::new(volume.nx, volume.ny, volume.nz);
    if extent == 0 {
        return out;
    }
    for z in 0..volume.nz {
        for y in 0..volume.ny {
            for x in 0..volume.nx {
                let pos = axis.position(x, y, z) as isize;
                let mut sum = 0.0;
                for (k, &w) in kernel.iter().enumerate() {
                    let q = (pos + k as isize - radius as isize).clamp(0, extent as isize - 1);
                    let (sx, sy, sz) = axis.coords(x, y, z, q as usize);
                    sum += volume.get(sx, sy, sz) * w;
                }
                out.set(x, y, z, sum);
            }
        }
    }
    out
}

/// First derivative along `axis`: central differences in the interior,
/// one-sided at the borders.
pub fn gradient(volume: &VolumeF32, axis: Axis) -> VolumeF32 {
    let extent = axis.extent(volume);
    let mut out = VolumeF32::new(volume.nx, volume.ny, volume.nz);
    if extent < 2 {
        return out;
    }
    for z in 0..volume.nz {
        for y in 0..volume.ny {
            for x in 0..volume.nx {
                let pos = axis.position(x, y, z);
                let (prev, next, denom) = if pos == 0 {
                    (0, 1, 1.0)
                } else if pos == extent - 1 {
                    (extent - 2, extent - 1, 1.0)
                } else {
                    (pos - 1, pos + 1, 2.0)
                };
                let (px, py, pz) = axis.coords(x, y, z, prev);
                let (qx, qy, qz) = axis.coords(x, y, z, next);
                let d = (volume.get(qx, qy, qz) - volume.get(px, py, pz)) / denom;
                out.set(x, y, z, d);
            }
        }
    }
    out
}

/// Per-voxel gradient magnitude: `sqrt(gx² + gy² + gz²)`.
pub fn gradient_magnitude(volume: &VolumeF32) -> VolumeF32 {
    let gx = gradient(volume, Axis::X);
    let gy = gradient(volume, Axis::Y);
    let gz = gradient(volume, Axis::Z);
    let mut out = VolumeF32::new(volume.nx, volume.ny, volume.nz);
    for i in 0..out.len() {
        let (x, y, z) = (gx.data[i], gy.data[i], gz.data[i]);
        out.data[i] = (x * x + y * y + z * z).sqrt();
    }
    out
}

/// The six independent components of the Hessian at every voxel.
#[derive(Clone, Debug)]
pub struct HessianField {
    pub dxx: VolumeF32,
    pub dyy: VolumeF32,
    pub dzz: VolumeF32,
    pub dxy: VolumeF32,
    pub dxz: VolumeF32,
    pub dyz: VolumeF32,
}

impl HessianField {
    /// Compute the Hessian of an already-smoothed volume by composing first
    /// derivatives.
    pub fn compute(smoothed: &VolumeF32) -> Self {
        let dx = gradient(smoothed, Axis::X);
        let dy = gradient(smoothed, Axis::Y);
        let dz = gradient(smoothed, Axis::Z);
        Self {
            dxx: gradient(&dx, Axis::X),
            dxy: gradient(&dx, Axis::Y),
            dxz: gradient(&dx, Axis::Z),
            dyy: gradient(&dy, Axis::Y),
            dyz: gradient(&dy, Axis::Z),
            dzz: gradient(&dz, Axis::Z),
        }
    }

    /// The components at linear voxel index `i` as
    /// `[dxx, dyy, dzz, dxy, dxz, dyz]`.
    #[inline]
    pub fn components_at(&self, i: usize) -> [f32; 6] {
        [
            self.dxx.data[i],
            self.dyy.data[i],
            self.dzz.data[i],
            self.dxy.data[i],
            self.dxz.data[i],
            self.dyz.data[i],
        ]
    }
}
