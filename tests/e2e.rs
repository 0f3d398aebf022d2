mod common;

use common::synthetic_volume::gaussian_slab;
use sheet_detector::{ScaleRange, SheetnessDetector, SheetnessParams};

#[test]
fn detector_highlights_bright_slab() {
    let _ = env_logger::builder().is_test(true).try_init();
    let n = 24usize;
    let volume = gaussian_slab(n, 1.5, 10.0);

    let params = SheetnessParams {
        scales: ScaleRange {
            min_sigma: 1.0,
            max_sigma: 2.0,
            sigma_step: 0.5,
        },
        ..Default::default()
    };
    let detector = SheetnessDetector::new(params);
    let result = detector.process(&volume);

    for &v in &result.response.data {
        assert!((0.0..1.0).contains(&v), "response out of range: {v}");
    }

    let center = result.response.get(n / 2, n / 2, n / 2);
    assert!(
        center > 0.3,
        "expected a strong sheet response on the slab plane, got {center}"
    );

    let corner = result.response.get(1, 1, 1);
    assert!(
        corner < center * 0.5,
        "off-plane response {corner} should be well below the plane response {center}"
    );

    let winning_sigma = result.best_scale.get(n / 2, n / 2, n / 2);
    assert!(
        (1.0..=2.0).contains(&winning_sigma),
        "winning scale {winning_sigma} outside the configured range"
    );

    assert_eq!(result.scale_trace.len(), 3);
    for trace in &result.scale_trace {
        assert!(trace.elapsed_ms >= 0.0);
        assert!(trace.max_response >= trace.mean_response);
    }
}

#[test]
fn inverted_polarity_rejects_bright_slab() {
    let _ = env_logger::builder().is_test(true).try_init();
    let n = 24usize;
    let volume = gaussian_slab(n, 1.5, 10.0);

    let mut params = SheetnessParams {
        scales: ScaleRange {
            min_sigma: 1.0,
            max_sigma: 2.0,
            sigma_step: 0.5,
        },
        ..Default::default()
    };
    params.measure.set_bright_object(false);
    let detector = SheetnessDetector::new(params);
    let result = detector.process(&volume);

    // The slab has net-negative curvature at its plane; dark-object polarity
    // must reject it outright.
    assert_eq!(result.response.get(n / 2, n / 2, n / 2), 0.0);
}
