use sheet_detector::{SheetnessDetector, SheetnessParams, VolumeF32};

fn main() {
    // Demo stub: runs the detector on a synthetic bright slab
    let n = 32usize;
    let mut volume = VolumeF32::new(n, n, n);
    let mid = n as f32 / 2.0;
    for z in 0..n {
        let d = z as f32 - mid;
        let v = (-d * d / 2.0).exp();
        for y in 0..n {
            for x in 0..n {
                volume.set(x, y, z, v);
            }
        }
    }

    let detector = SheetnessDetector::new(SheetnessParams::default());
    let result = detector.process(&volume);
    let max = result.response.data.iter().cloned().fold(0.0f32, f32::max);
    println!("max_response={max:.4} latency_ms={:.3}", result.latency_ms);
}
