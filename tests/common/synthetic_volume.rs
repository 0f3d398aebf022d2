use sheet_detector::VolumeF32;

/// Generates a bright sheet-like slab: a Gaussian profile across z centered
/// on the mid-plane, with a broad in-plane envelope so the in-plane
/// curvature is small but nonzero.
pub fn gaussian_slab(n: usize, thickness: f32, amplitude: f32) -> VolumeF32 {
    assert!(n > 0, "volume extent must be positive");
    assert!(thickness > 0.0, "slab thickness must be positive");

    let mut volume = VolumeF32::new(n, n, n);
    let center = (n as f32 - 1.0) / 2.0;
    let envelope = n as f32 / 3.0;
    for z in 0..n {
        let dz = z as f32 - center;
        let profile = (-dz * dz / (2.0 * thickness * thickness)).exp();
        for y in 0..n {
            let dy = y as f32 - center;
            for x in 0..n {
                let dx = x as f32 - center;
                let r2 = dx * dx + dy * dy;
                let v = amplitude * profile * (-r2 / (2.0 * envelope * envelope)).exp();
                volume.set(x, y, z, v);
            }
        }
    }
    volume
}
