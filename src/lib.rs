#![doc = include_str!("../README.md")]

// Public modules (stable-ish surface)
pub mod detector;
pub mod diagnostics;
pub mod sheetness;
pub mod volume;

// “Expert” modules – still public, but considered unstable internals.
pub mod eigen;
pub mod hessian;

// --- High-level re-exports -------------------------------------------------

// Main entry points: detector + results.
pub use crate::detector::{ScaleRange, SheetnessDetector, SheetnessParams, SheetnessResult};
pub use crate::sheetness::SheetnessMeasure;
pub use crate::volume::VolumeF32;

// High-level diagnostics emitted by the detector.
pub use crate::diagnostics::{DetectionReport, ScaleDiagnostics};

// --- Prelude ---------------------------------------------------------------

/// Small prelude for quick experiments.
///
/// ```no_run
/// use sheet_detector::prelude::*;
///
/// # fn main() {
/// let volume = VolumeF32::new(64, 64, 64);
///
/// let detector = SheetnessDetector::new(SheetnessParams {
///     scales: ScaleRange {
///         min_sigma: 1.0,
///         max_sigma: 2.0,
///         sigma_step: 0.5,
///     },
///     ..Default::default()
/// });
///
/// let result = detector.process(&volume);
/// println!("latency_ms={:.3}", result.latency_ms);
/// # }
/// ```
pub mod prelude {
    pub use crate::sheetness::SheetnessMeasure;
    pub use crate::volume::VolumeF32;
    pub use crate::{ScaleRange, SheetnessDetector, SheetnessParams, SheetnessResult};
}
