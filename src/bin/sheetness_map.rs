use sheet_detector::diagnostics::DetectionReport;
use sheet_detector::volume::io::{load_raw_f32, save_raw_f32, save_slice_png, write_json_file};
use sheet_detector::{ScaleRange, SheetnessDetector, SheetnessMeasure, SheetnessParams};
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize)]
pub struct SheetnessToolConfig {
    pub input: VolumeInputConfig,
    #[serde(default)]
    pub scales: ScaleRange,
    #[serde(default)]
    pub measure: MeasureConfig,
    pub output: SheetnessOutputConfig,
}

/// Raw little-endian f32 volume plus its extents.
#[derive(Debug, Deserialize)]
pub struct VolumeInputConfig {
    pub raw: PathBuf,
    pub nx: usize,
    pub ny: usize,
    pub nz: usize,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct MeasureConfig {
    pub alpha: f32,
    pub beta: f32,
    pub c: f32,
    pub kappa: f32,
    pub bright_object: bool,
}

impl Default for MeasureConfig {
    fn default() -> Self {
        let m = SheetnessMeasure::default();
        Self {
            alpha: m.alpha(),
            beta: m.beta(),
            c: m.c(),
            kappa: m.kappa(),
            bright_object: m.bright_object(),
        }
    }
}

impl MeasureConfig {
    /// Build the measure through its setters so out-of-range values get the
    /// clamping treatment instead of an error.
    pub fn to_measure(&self) -> SheetnessMeasure {
        let mut m = SheetnessMeasure::new();
        m.set_alpha(self.alpha);
        m.set_beta(self.beta);
        m.set_c(self.c);
        m.set_kappa(self.kappa);
        m.set_bright_object(self.bright_object);
        m
    }
}

#[derive(Debug, Deserialize)]
pub struct SheetnessOutputConfig {
    #[serde(rename = "response_raw")]
    pub response_raw: PathBuf,
    #[serde(rename = "middle_slice_png")]
    pub middle_slice_png: Option<PathBuf>,
    #[serde(rename = "summary_json")]
    pub summary_json: PathBuf,
}

pub fn load_config(path: &Path) -> Result<SheetnessToolConfig, String> {
    let data = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read config {}: {e}", path.display()))?;
    serde_json::from_str(&data)
        .map_err(|e| format!("Failed to parse config {}: {e}", path.display()))
}

fn main() {
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let config_path = env::args().nth(1).ok_or_else(usage)?;
    let config = load_config(Path::new(&config_path))?;

    let input = &config.input;
    let volume = load_raw_f32(&input.raw, input.nx, input.ny, input.nz)?;

    let detector = SheetnessDetector::new(SheetnessParams {
        scales: config.scales,
        measure: config.measure.to_measure(),
    });
    let result = detector.process(&volume);

    save_raw_f32(&result.response, &config.output.response_raw)?;
    if let Some(png_path) = &config.output.middle_slice_png {
        save_slice_png(&result.response, input.nz / 2, png_path)?;
    }

    let max_response = result.response.data.iter().cloned().fold(0.0f32, f32::max);
    let report = DetectionReport {
        nx: input.nx,
        ny: input.ny,
        nz: input.nz,
        scales: result.scale_trace,
        max_response,
        latency_ms: result.latency_ms,
    };
    write_json_file(&config.output.summary_json, &report)?;

    println!(
        "Saved response volume to {} (max response {:.4})",
        config.output.response_raw.display(),
        max_response
    );
    println!(
        "Saved run summary to {} ({} scales, {:.3} ms)",
        config.output.summary_json.display(),
        report.scales.len(),
        report.latency_ms
    );

    Ok(())
}

fn usage() -> String {
    "Usage: sheetness_map <config.json>".to_string()
}
