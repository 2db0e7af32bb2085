//! Scan requests
//!
//! A [`ScanRequest`] is the full, serializable description of one scan
//! submission: the compound scan path, detectors, monitors, scripts,
//! metadata and file destinations. It is the canonical wire representation
//! handed to the scan-execution service, which never mutates it; status
//! flows back through separate scan beans.
//!
//! Two construction paths are first-class:
//! - direct: `ScanRequest::new(compound)` plus the mutating setters such as
//!   [`ScanRequest::put_detector`], used by manual/test construction;
//! - builder: [`ScanRequestBuilder`](builder::ScanRequestBuilder), fluent or
//!   map-driven, which hands out the finished request exactly once.
//!
//! Unset state is asymmetric on purpose: scalar and object fields default to
//! `None`/`false`, collection fields default to *empty*, never `None`.

pub mod builder;

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use crate::detector::DetectorModel;
use crate::points::compound::CompoundModel;

/// Sample description written into the scan output file.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SampleData {
    /// Sample name
    pub name: Option<String>,
    /// Free-text description
    pub description: Option<String>,
}

/// Which region of the output file a metadata block targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MetadataType {
    /// Top-level entry metadata
    Entry,
    /// Sample metadata
    Sample,
    /// Instrument metadata
    Instrument,
    /// User metadata
    User,
}

/// A single metadata field value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MetadataValue {
    /// Text value
    Text(String),
    /// Integer value
    Integer(i64),
    /// Floating-point value
    Number(f64),
    /// Boolean value
    Flag(bool),
}

/// A typed block of key/value metadata written into the scan output file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanMetadata {
    /// Target region of the output file
    pub metadata_type: MetadataType,
    /// Field name to value
    pub fields: BTreeMap<String, MetadataValue>,
}

impl ScanMetadata {
    /// Create an empty metadata block for the given region
    pub fn new(metadata_type: MetadataType) -> Self {
        Self {
            metadata_type,
            fields: BTreeMap::new(),
        }
    }

    /// Add or replace a field
    pub fn add_field(&mut self, name: impl Into<String>, value: MetadataValue) {
        self.fields.insert(name.into(), value);
    }
}

/// A position across one or more scannables, as axis-name to value.
///
/// Used for the optional start/end positions a scan moves to before the
/// first point and after the last.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    /// Scannable name to target value
    pub values: BTreeMap<String, f64>,
}

impl Position {
    /// Create an empty position
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the target value for one scannable
    pub fn set(&mut self, name: impl Into<String>, value: f64) {
        self.values.insert(name.into(), value);
    }

    /// Target value for one scannable, if present
    pub fn get(&self, name: &str) -> Option<f64> {
        self.values.get(name).copied()
    }

    /// Names of the scannables this position moves
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }
}

/// A script run before or after the scan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScriptRequest {
    /// Path to the script file
    pub file: String,
}

impl ScriptRequest {
    /// Create a script request for the given file
    pub fn new(file: impl Into<String>) -> Self {
        Self { file: file.into() }
    }
}

/// Post-scan processing to request, as application name to the configuration
/// files it should run with.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessingRequest {
    /// Application name to ordered configuration paths
    pub request: BTreeMap<String, Vec<String>>,
}

impl ProcessingRequest {
    /// Create an empty processing request
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a configuration path for an application
    pub fn add(&mut self, app: impl Into<String>, config_path: impl Into<String>) {
        self.request
            .entry(app.into())
            .or_default()
            .push(config_path.into());
    }
}

/// The full, serializable description of a scan submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanRequest {
    /// The scan path: models in outer-to-inner order plus region bindings
    pub compound_model: CompoundModel,
    /// Detector name to its configured model
    pub detectors: BTreeMap<String, DetectorModel>,
    /// Scannables read at every scan point
    pub monitor_names_per_point: Vec<String>,
    /// Scannables read once per scan
    pub monitor_names_per_scan: Vec<String>,
    /// Sample description, if provided
    pub sample_data: Option<SampleData>,
    /// Metadata blocks written into the output file
    pub scan_metadata: Vec<ScanMetadata>,
    /// Output file path chosen by the caller, if any
    pub file_path: Option<String>,
    /// NeXus template files applied to the output
    pub template_file_paths: BTreeSet<String>,
    /// Position to move to before the first point
    pub start_position: Option<Position>,
    /// Position to move to after the last point
    pub end_position: Option<Position>,
    /// Script run before the scan starts
    pub before_script: Option<ScriptRequest>,
    /// Script run after the scan completes
    pub after_script: Option<ScriptRequest>,
    /// Run the after-script even when the scan fails or is aborted
    pub always_run_after_script: bool,
    /// Skip server-side preprocessing of this request
    pub ignore_preprocess: bool,
    /// Post-scan processing to request
    pub processing_request: Option<ProcessingRequest>,
}

impl ScanRequest {
    /// Create a request around a compound model, all optional fields unset
    pub fn new(compound_model: CompoundModel) -> Self {
        Self {
            compound_model,
            detectors: BTreeMap::new(),
            monitor_names_per_point: Vec::new(),
            monitor_names_per_scan: Vec::new(),
            sample_data: None,
            scan_metadata: Vec::new(),
            file_path: None,
            template_file_paths: BTreeSet::new(),
            start_position: None,
            end_position: None,
            before_script: None,
            after_script: None,
            always_run_after_script: false,
            ignore_preprocess: false,
            processing_request: None,
        }
    }

    /// The compound scan path
    pub fn compound_model(&self) -> &CompoundModel {
        &self.compound_model
    }

    /// Add or replace a detector in place.
    ///
    /// This is the direct-construction path; the builder path assembles the
    /// whole map up front instead.
    pub fn put_detector(&mut self, name: impl Into<String>, model: impl Into<DetectorModel>) {
        self.detectors.insert(name.into(), model.into());
    }

    /// Detector model by name
    pub fn detector(&self, name: &str) -> Option<&DetectorModel> {
        self.detectors.get(name)
    }

    /// Append a metadata block
    pub fn add_metadata(&mut self, metadata: ScanMetadata) {
        self.scan_metadata.push(metadata);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detector::MandelbrotModel;
    use crate::points::StepModel;

    fn any_request() -> ScanRequest {
        let mut compound = CompoundModel::new();
        compound.add_model(StepModel::new("fred", 0.0, 10.0, 1.0));
        ScanRequest::new(compound)
    }

    #[test]
    fn unset_scalars_are_none_and_collections_empty() {
        let request = any_request();
        assert!(request.sample_data.is_none());
        assert!(request.file_path.is_none());
        assert!(request.start_position.is_none());
        assert!(request.processing_request.is_none());
        assert!(!request.always_run_after_script);
        assert!(request.detectors.is_empty());
        assert!(request.monitor_names_per_point.is_empty());
        assert!(request.template_file_paths.is_empty());
        assert!(request.scan_metadata.is_empty());
    }

    #[test]
    fn put_detector_replaces_by_name() {
        let mut request = any_request();
        request.put_detector("mandelbrot", MandelbrotModel::new("mandelbrot", 0.1));
        request.put_detector("mandelbrot", MandelbrotModel::new("mandelbrot", 0.5));
        assert_eq!(request.detectors.len(), 1);
        assert_eq!(
            request.detector("mandelbrot").unwrap().exposure_time(),
            0.5
        );
    }

    #[test]
    fn wire_names_are_camel_case() {
        let request = any_request();
        let json = serde_json::to_value(&request).unwrap();
        assert!(json.get("compoundModel").is_some());
        assert!(json.get("monitorNamesPerPoint").is_some());
        assert!(json.get("templateFilePaths").is_some());
        assert!(json.get("ignorePreprocess").is_some());
    }

    #[test]
    fn round_trips_through_json() {
        let mut request = any_request();
        request.put_detector("mandelbrot", MandelbrotModel::new("mandelbrot", 0.1));
        request.file_path = Some("/scratch/scan_001.nxs".into());

        let json = serde_json::to_string(&request).unwrap();
        let back: ScanRequest = serde_json::from_str(&json).unwrap();
        assert_eq!(back, request);
    }
}
