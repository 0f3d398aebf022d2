//! Point-wise sheetness measure from Hessian eigenvalues and gradient
//! magnitude.
//!
//! Follows the sheetness variant of Frangi's vesselness measure with the
//! step-edge suppression term proposed by Xiao et al. (Medical Image
//! Analysis 15(1), 2011). The measure is a pure function of its inputs once
//! the parameters are fixed, so it can be evaluated concurrently per voxel
//! without synchronization.

use std::cmp::Ordering;

/// Tunable sheetness parameters plus the point-wise evaluation.
///
/// All shape parameters are non-negative; the setters clamp negative input
/// to zero instead of rejecting it. Defaults follow the values suggested in
/// the literature (`c = 1.0` works well for CT intensities).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SheetnessMeasure {
    alpha: f32,
    beta: f32,
    c: f32,
    kappa: f32,
    bright_object: bool,
}

impl Default for SheetnessMeasure {
    fn default() -> Self {
        Self {
            alpha: 0.5,
            beta: 0.5,
            c: 1.0,
            kappa: 0.8,
            bright_object: true,
        }
    }
}

impl SheetnessMeasure {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sheet-vs-line sensitivity. Clamped to `>= 0`.
    pub fn set_alpha(&mut self, alpha: f32) {
        self.alpha = alpha.max(0.0);
    }

    /// Blob rejection sensitivity. Clamped to `>= 0`.
    pub fn set_beta(&mut self, beta: f32) {
        self.beta = beta.max(0.0);
    }

    /// Noise rejection sensitivity. Clamped to `>= 0`.
    pub fn set_c(&mut self, c: f32) {
        self.c = c.max(0.0);
    }

    /// Step-edge suppression strength; `0` disables the edge term. Clamped
    /// to `>= 0`.
    pub fn set_kappa(&mut self, kappa: f32) {
        self.kappa = kappa.max(0.0);
    }

    /// Polarity of the sought structure: brighter than the surroundings
    /// (`true`) or darker (`false`).
    pub fn set_bright_object(&mut self, bright_object: bool) {
        self.bright_object = bright_object;
    }

    pub fn alpha(&self) -> f32 {
        self.alpha
    }

    pub fn beta(&self) -> f32 {
        self.beta
    }

    pub fn c(&self) -> f32 {
        self.c
    }

    pub fn kappa(&self) -> f32 {
        self.kappa
    }

    pub fn bright_object(&self) -> bool {
        self.bright_object
    }

    /// Computes the sheetness response at one sample point.
    ///
    /// `eigenvalues` are the three Hessian eigenvalues in any order;
    /// `gradient_magnitude` is the norm of the intensity gradient at the
    /// same point. Returns a value in `[0, 1)`. Wrong-polarity and
    /// degenerate inputs map to `0`; the result is never NaN or infinite.
    pub fn evaluate(&self, gradient_magnitude: f32, eigenvalues: [f32; 3]) -> f32 {
        // Sort such that |l1| <= |l2| <= |l3|.
        let mut sorted = eigenvalues;
        sorted.sort_by(|a, b| a.abs().partial_cmp(&b.abs()).unwrap_or(Ordering::Equal));

        let l1 = sorted[0].abs();
        let l2 = sorted[1].abs();
        let l3 = sorted[2].abs();

        // Polarity test on the signed sum: bright sheets have net-negative
        // curvature, dark sheets net-positive.
        let eigenvalue_sum = sorted[0] + sorted[1] + sorted[2];
        if self.bright_object {
            if eigenvalue_sum > 0.0 {
                return 0.0;
            }
        } else if eigenvalue_sum < 0.0 {
            return 0.0;
        }

        // The ratios below divide by l2 and l3.
        if l2 < f32::EPSILON || l3 < f32::EPSILON {
            return 0.0;
        }

        let ra = l2 / l3; // sheet vs line
        let rb = l1 / (l2 * l3).sqrt(); // blobness
        let s = (l1 * l1 + l2 * l2 + l3 * l3).sqrt(); // second-order structureness

        let mut sheetness = gaussian_gate(ra, self.alpha);
        sheetness *= gaussian_gate(rb, self.beta);
        sheetness *= 1.0 - gaussian_gate(s, self.c);
        // Step-edge suppression, normalized by l3 rather than S.
        sheetness *= (-self.kappa * gradient_magnitude / l3).exp();
        sheetness
    }
}

/// `exp(-ratio² / (2·p²))` with the `p == 0` limits made explicit: a zero
/// parameter fully rejects any nonzero ratio and leaves a zero ratio
/// unpenalized, instead of letting `0/0` produce NaN.
#[inline]
fn gaussian_gate(ratio: f32, p: f32) -> f32 {
    if p == 0.0 {
        return if ratio == 0.0 { 1.0 } else { 0.0 };
    }
    (-(ratio * ratio) / (2.0 * p * p)).exp()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f32, b: f32, tol: f32) -> bool {
        (a - b).abs() < tol
    }

    #[test]
    fn rejects_positive_sum_for_bright_objects() {
        let m = SheetnessMeasure::default();
        assert_eq!(m.evaluate(0.0, [1.0, 2.0, 3.0]), 0.0);
        assert_eq!(m.evaluate(5.0, [0.5, -0.1, 4.0]), 0.0);
    }

    #[test]
    fn rejects_negative_sum_for_dark_objects() {
        let mut m = SheetnessMeasure::default();
        m.set_bright_object(false);
        assert_eq!(m.evaluate(0.0, [-1.0, -2.0, -3.0]), 0.0);
        assert_eq!(m.evaluate(0.0, [0.5, 0.1, -4.0]), 0.0);
    }

    #[test]
    fn dark_polarity_accepts_positive_curvature() {
        let mut m = SheetnessMeasure::default();
        m.set_bright_object(false);
        let v = m.evaluate(0.0, [0.1, 5.0, 10.0]);
        assert!(v > 0.0);
        assert!(v < 1.0);
    }

    #[test]
    fn invariant_under_eigenvalue_permutation() {
        let m = SheetnessMeasure::default();
        let reference = m.evaluate(0.3, [-0.1, -5.0, -10.0]);
        let permutations = [
            [-0.1, -10.0, -5.0],
            [-5.0, -0.1, -10.0],
            [-5.0, -10.0, -0.1],
            [-10.0, -0.1, -5.0],
            [-10.0, -5.0, -0.1],
        ];
        for p in permutations {
            assert_eq!(m.evaluate(0.3, p), reference);
        }
    }

    #[test]
    fn degenerate_eigenvalues_give_zero() {
        let m = SheetnessMeasure::default();
        // l3 = 0 implies all are 0.
        assert_eq!(m.evaluate(0.0, [0.0, 0.0, 0.0]), 0.0);
        // l2 = 0 with a dominant l3.
        assert_eq!(m.evaluate(0.0, [0.0, 0.0, -3.0]), 0.0);
    }

    #[test]
    fn matches_reference_plate_response() {
        // Strong plate: one small and two large negative eigenvalues.
        let m = SheetnessMeasure::default();
        let v = m.evaluate(0.0, [-0.1, -5.0, -10.0]);
        // Ra = 0.5, Rb ~ 0.0141, S ~ 11.18 with default parameters.
        assert!(approx_eq(v, 0.6063, 1e-3), "got {v}");
    }

    #[test]
    fn response_is_bounded() {
        let m = SheetnessMeasure::default();
        let triples = [
            [-0.1, -5.0, -10.0],
            [-1.0, -1.0, -1.0],
            [0.0, -2.0, -2.0],
            [-0.01, -0.5, -100.0],
        ];
        for t in triples {
            for gmag in [0.0, 0.5, 10.0] {
                let v = m.evaluate(gmag, t);
                assert!((0.0..1.0).contains(&v), "out of range: {v}");
            }
        }
    }

    #[test]
    fn edge_term_suppresses_high_gradient() {
        let m = SheetnessMeasure::default();
        let flat = m.evaluate(0.0, [-0.1, -5.0, -10.0]);
        let edgy = m.evaluate(20.0, [-0.1, -5.0, -10.0]);
        assert!(edgy < flat);
    }

    #[test]
    fn zero_kappa_disables_edge_suppression() {
        let mut m = SheetnessMeasure::default();
        m.set_kappa(0.0);
        let flat = m.evaluate(0.0, [-0.1, -5.0, -10.0]);
        let edgy = m.evaluate(20.0, [-0.1, -5.0, -10.0]);
        assert_eq!(flat, edgy);
    }

    #[test]
    fn zero_alpha_rejects_nonequal_mid_eigenvalues() {
        let mut m = SheetnessMeasure::default();
        m.set_alpha(0.0);
        // Ra = 0.5 != 0, so the sheetness gate must drop to exactly 0.
        let v = m.evaluate(0.0, [-0.1, -5.0, -10.0]);
        assert_eq!(v, 0.0);
        assert!(v.is_finite());
    }

    #[test]
    fn zero_parameter_gate_limits_are_explicit() {
        // 0/0 in the exponent counts as no penalty, x/0 as full rejection.
        assert_eq!(super::gaussian_gate(0.0, 0.0), 1.0);
        assert_eq!(super::gaussian_gate(0.5, 0.0), 0.0);

        // Zero alpha therefore never produces NaN through evaluate.
        let mut m = SheetnessMeasure::default();
        m.set_alpha(0.0);
        let v = m.evaluate(0.0, [-0.1, -5.0, -5.0]);
        assert!(v.is_finite());
    }

    #[test]
    fn repeated_evaluation_is_bit_identical() {
        let m = SheetnessMeasure::default();
        let a = m.evaluate(1.25, [-0.3, -4.0, -9.0]);
        let b = m.evaluate(1.25, [-0.3, -4.0, -9.0]);
        assert_eq!(a.to_bits(), b.to_bits());
    }

    #[test]
    fn setters_clamp_negative_input() {
        let mut m = SheetnessMeasure::default();
        m.set_alpha(-1.0);
        m.set_beta(-0.5);
        m.set_c(-2.0);
        m.set_kappa(-0.1);
        assert_eq!(m.alpha(), 0.0);
        assert_eq!(m.beta(), 0.0);
        assert_eq!(m.c(), 0.0);
        assert_eq!(m.kappa(), 0.0);
    }
}
