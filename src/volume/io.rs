//! I/O helpers for f32 volumes and JSON.
//!
//! - `load_raw_f32`: read a raw little-endian f32 volume of known extents.
//! - `save_raw_f32`: write a volume as raw little-endian f32.
//! - `save_slice_png`: write one z-slice to a grayscale PNG.
//! - `write_json_file`: pretty-print a serializable value to disk.
use super::VolumeF32;
use image::{GrayImage, Luma};
use serde::Serialize;
use std::fs;
use std::path::Path;

/// Load a raw little-endian f32 volume; the file size must match the extents.
pub fn load_raw_f32(path: &Path, nx: usize, ny: usize, nz: usize) -> Result<VolumeF32, String> {
    let bytes = fs::read(path).map_err(|e| format!("Failed to read {}: {e}", path.display()))?;
    let expected = nx * ny * nz * 4;
    if bytes.len() != expected {
        return Err(format!(
            "Volume {} has {} bytes, expected {} for {}x{}x{} f32",
            path.display(),
            bytes.len(),
            expected,
            nx,
            ny,
            nz
        ));
    }
    let data = bytes
        .chunks_exact(4)
        .map(|c| f32::from_le_bytes([c[0], c[1], c[2], c[3]]))
        .collect();
    Ok(VolumeF32::from_data(nx, ny, nz, data))
}

/// Save a volume as raw little-endian f32.
pub fn save_raw_f32(volume: &VolumeF32, path: &Path) -> Result<(), String> {
    ensure_parent_dir(path)?;
    let mut bytes = Vec::with_capacity(volume.len() * 4);
    for &v in &volume.data {
        bytes.extend_from_slice(&v.to_le_bytes());
    }
    fs::write(path, bytes).map_err(|e| format!("Failed to write {}: {e}", path.display()))
}

/// Save the z-slice at `z` to a grayscale PNG, clamping values in [0, 255]
/// after scaling from [0, 1].
pub fn save_slice_png(volume: &VolumeF32, z: usize, path: &Path) -> Result<(), String> {
    if z >= volume.nz {
        return Err(format!("Slice {z} out of range (nz = {})", volume.nz));
    }
    ensure_parent_dir(path)?;
    let mut out = GrayImage::new(volume.nx as u32, volume.ny as u32);
    for y in 0..volume.ny {
        for x in 0..volume.nx {
            let v = (volume.get(x, y, z) * 255.0).clamp(0.0, 255.0);
            out.put_pixel(x as u32, y as u32, Luma([v as u8]));
        }
    }
    out.save(path)
        .map_err(|e| format!("Failed to save {}: {e}", path.display()))
}

/// Serialize a value as pretty JSON to `path`, creating parent directories.
pub fn write_json_file<T: Serialize>(path: &Path, value: &T) -> Result<(), String> {
    ensure_parent_dir(path)?;
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| format!("Failed to serialize JSON for {}: {e}", path.display()))?;
    fs::write(path, json).map_err(|e| format!("Failed to write JSON {}: {e}", path.display()))
}

fn ensure_parent_dir(path: &Path) -> Result<(), String> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create {}: {e}", parent.display()))?;
        }
    }
    Ok(())
}
