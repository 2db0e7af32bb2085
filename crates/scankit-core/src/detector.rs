//! Detector models
//!
//! Per-detector configuration carried inside a scan request. Each variant
//! pairs a device name with an exposure time and detector-specific fields.
//!
//! An exposure time of `-1.0` is a sentinel meaning "not a timed detector";
//! processing detectors report it and the expression factory still renders
//! it positionally.

use serde::{Deserialize, Serialize};

/// Exposure-time sentinel for detectors that do not expose per-point.
pub const UNTIMED_EXPOSURE: f64 = -1.0;

/// Simulated fractal detector used throughout the test fixtures.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MandelbrotModel {
    /// Device name
    pub name: String,
    /// Exposure time per point in seconds
    pub exposure_time: f64,
    /// Iteration cap for the escape computation
    pub max_iterations: u32,
    /// Escape radius for the iteration
    pub escape_radius: f64,
    /// Image width in pixels
    pub columns: u32,
    /// Image height in pixels
    pub rows: u32,
    /// Add simulated noise to the output
    pub enable_noise: bool,
}

impl MandelbrotModel {
    /// Create a Mandelbrot model with the stock simulation parameters
    pub fn new(name: impl Into<String>, exposure_time: f64) -> Self {
        Self {
            name: name.into(),
            exposure_time,
            max_iterations: 500,
            escape_radius: 10.0,
            columns: 301,
            rows: 241,
            enable_noise: false,
        }
    }
}

/// Post-scan cluster processing configuration.
///
/// Not a physical detector: it names another detector whose data a
/// processing pipeline consumes, so its exposure time is the untimed
/// sentinel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClusterProcessingModel {
    /// Processing step name
    pub name: String,
    /// The detector whose frames are processed
    pub detector_name: String,
    /// Path to the processing pipeline definition
    pub processing_file_path: String,
    /// JVM heap given to the processing run
    pub xmx: String,
    /// Processing timeout in milliseconds
    pub time_out: u64,
    /// Cores requested on the cluster
    pub number_of_cores: u32,
    /// Watch the output file for overwrites
    pub monitor_for_overwrite: bool,
}

impl ClusterProcessingModel {
    /// Create a processing model for the given detector and pipeline file
    pub fn new(
        name: impl Into<String>,
        detector_name: impl Into<String>,
        processing_file_path: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            detector_name: detector_name.into(),
            processing_file_path: processing_file_path.into(),
            xmx: "1024m".into(),
            time_out: 600_000,
            number_of_cores: 1,
            monitor_for_overwrite: false,
        }
    }
}

/// Simulated Malcolm (hardware-triggered) device.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DummyMalcolmModel {
    /// Device name
    pub name: String,
    /// Exposure time per point in seconds
    pub exposure_time: f64,
    /// Axes the device moves itself during its inner scan
    pub axes_to_move: Vec<String>,
}

impl DummyMalcolmModel {
    /// Create a dummy Malcolm model moving no axes
    pub fn new(name: impl Into<String>, exposure_time: f64) -> Self {
        Self {
            name: name.into(),
            exposure_time,
            axes_to_move: Vec::new(),
        }
    }
}

/// Per-detector configuration included in a scan request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum DetectorModel {
    /// Simulated fractal detector
    Mandelbrot(MandelbrotModel),
    /// Post-scan cluster processing step
    ClusterProcessing(ClusterProcessingModel),
    /// Simulated hardware-triggered device
    DummyMalcolm(DummyMalcolmModel),
}

impl DetectorModel {
    /// Device name
    pub fn name(&self) -> &str {
        match self {
            DetectorModel::Mandelbrot(m) => &m.name,
            DetectorModel::ClusterProcessing(m) => &m.name,
            DetectorModel::DummyMalcolm(m) => &m.name,
        }
    }

    /// Exposure time in seconds, or [`UNTIMED_EXPOSURE`] for detectors that
    /// are not timed
    pub fn exposure_time(&self) -> f64 {
        match self {
            DetectorModel::Mandelbrot(m) => m.exposure_time,
            DetectorModel::ClusterProcessing(_) => UNTIMED_EXPOSURE,
            DetectorModel::DummyMalcolm(m) => m.exposure_time,
        }
    }

    /// Set the exposure time.
    ///
    /// Ignored for processing detectors, which are untimed; the DSL applies
    /// the same rule by only forwarding positive exposures.
    pub fn set_exposure_time(&mut self, exposure_time: f64) {
        match self {
            DetectorModel::Mandelbrot(m) => m.exposure_time = exposure_time,
            DetectorModel::ClusterProcessing(_) => {}
            DetectorModel::DummyMalcolm(m) => m.exposure_time = exposure_time,
        }
    }
}

impl From<MandelbrotModel> for DetectorModel {
    fn from(model: MandelbrotModel) -> Self {
        DetectorModel::Mandelbrot(model)
    }
}

impl From<ClusterProcessingModel> for DetectorModel {
    fn from(model: ClusterProcessingModel) -> Self {
        DetectorModel::ClusterProcessing(model)
    }
}

impl From<DummyMalcolmModel> for DetectorModel {
    fn from(model: DummyMalcolmModel) -> Self {
        DetectorModel::DummyMalcolm(model)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn processing_model_is_untimed() {
        let model: DetectorModel =
            ClusterProcessingModel::new("processing", "mandelbrot", "/tmp/something.nxs").into();
        assert_eq!(model.exposure_time(), UNTIMED_EXPOSURE);
    }

    #[test]
    fn set_exposure_ignored_for_processing() {
        let mut model: DetectorModel =
            ClusterProcessingModel::new("processing", "mandelbrot", "/tmp/something.nxs").into();
        model.set_exposure_time(0.5);
        assert_eq!(model.exposure_time(), UNTIMED_EXPOSURE);
    }

    #[test]
    fn mandelbrot_stock_parameters() {
        let model = MandelbrotModel::new("mandelbrot", 0.1);
        assert_eq!(model.max_iterations, 500);
        assert_eq!(model.columns, 301);
        assert!(!model.enable_noise);
    }
}
