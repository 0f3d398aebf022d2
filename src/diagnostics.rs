//! Structured diagnostics emitted by the detector, serializable for tool
//! output.

use serde::Serialize;

/// Per-scale summary of one pass of the detector.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScaleDiagnostics {
    pub sigma: f32,
    pub elapsed_ms: f64,
    pub max_response: f32,
    pub mean_response: f32,
}

/// Whole-run report for the `sheetness_map` tool.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DetectionReport {
    pub nx: usize,
    pub ny: usize,
    pub nz: usize,
    pub scales: Vec<ScaleDiagnostics>,
    pub max_response: f32,
    pub latency_ms: f64,
}
