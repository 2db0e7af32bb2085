//! Fluent and map-driven scan-request construction.
//!
//! The builder assembles a [`ScanRequest`] from a mandatory scan path model
//! plus any of the recognized optional fields. The typed fluent path catches
//! type errors at compile time; the untyped map path exists so a scripting
//! binding can forward keyword arguments generically, and reports its type
//! errors when `build()` runs, not when the map is supplied.
//!
//! `build()` consumes the builder, so the caller holds the only reference to
//! the finished request and no post-build mutation through the builder is
//! possible.

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::collections::{BTreeMap, BTreeSet};
use tracing::debug;

use super::{Position, ProcessingRequest, SampleData, ScanMetadata, ScanRequest, ScriptRequest};
use crate::detector::DetectorModel;
use crate::error::RequestError;
use crate::points::compound::CompoundModel;
use crate::points::ScanPathModel;

/// Builder for [`ScanRequest`].
///
/// ```
/// use scankit_core::points::StepModel;
/// use scankit_core::request::builder::ScanRequestBuilder;
///
/// let request = ScanRequestBuilder::new(StepModel::new("fred", 0.0, 10.0, 1.0))
///     .with_file_path("/scratch/scan_001.nxs")
///     .build()
///     .unwrap();
/// assert_eq!(request.file_path.as_deref(), Some("/scratch/scan_001.nxs"));
/// ```
#[derive(Debug)]
pub struct ScanRequestBuilder {
    request: ScanRequest,
    overrides: Map<String, Value>,
}

impl ScanRequestBuilder {
    /// Create a builder around a single mandatory scan path model
    pub fn new(model: impl Into<ScanPathModel>) -> Self {
        let mut compound = CompoundModel::new();
        compound.add_model(model);
        Self::from_compound(compound)
    }

    /// Create a builder around an already-assembled compound model
    pub fn from_compound(compound: CompoundModel) -> Self {
        Self {
            request: ScanRequest::new(compound),
            overrides: Map::new(),
        }
    }

    /// Create a builder from a scan path model plus an untyped field map.
    ///
    /// Map keys must come from the recognized set (`detectors`,
    /// `monitorNamesPerPoint`, `monitorNamesPerScan`, `sampleData`,
    /// `scanMetadata`, `filePath`, `templateFilePaths`, `startPosition`,
    /// `endPosition`, `beforeScript`, `afterScript`, `alwaysRunAfterScript`,
    /// `ignorePreprocess`, `processingRequest`). Nothing is validated here;
    /// a wrong-typed value or an unknown key surfaces from [`build`].
    ///
    /// [`build`]: ScanRequestBuilder::build
    pub fn from_map(model: impl Into<ScanPathModel>, fields: Map<String, Value>) -> Self {
        let mut builder = Self::new(model);
        builder.overrides = fields;
        builder
    }

    /// Set the detector map
    pub fn with_detectors(mut self, detectors: BTreeMap<String, DetectorModel>) -> Self {
        self.request.detectors = detectors;
        self
    }

    /// Add one detector, keeping any already set
    pub fn with_detector(mut self, name: impl Into<String>, model: impl Into<DetectorModel>) -> Self {
        self.request.detectors.insert(name.into(), model.into());
        self
    }

    /// Set the per-point monitor names
    pub fn with_monitor_names_per_point(mut self, names: Vec<String>) -> Self {
        self.request.monitor_names_per_point = names;
        self
    }

    /// Set the per-scan monitor names
    pub fn with_monitor_names_per_scan(mut self, names: Vec<String>) -> Self {
        self.request.monitor_names_per_scan = names;
        self
    }

    /// Set the sample description
    pub fn with_sample_data(mut self, sample_data: SampleData) -> Self {
        self.request.sample_data = Some(sample_data);
        self
    }

    /// Set the metadata blocks
    pub fn with_scan_metadata(mut self, metadata: Vec<ScanMetadata>) -> Self {
        self.request.scan_metadata = metadata;
        self
    }

    /// Set the output file path
    pub fn with_file_path(mut self, path: impl Into<String>) -> Self {
        self.request.file_path = Some(path.into());
        self
    }

    /// Set the NeXus template file paths
    pub fn with_template_file_paths(mut self, paths: BTreeSet<String>) -> Self {
        self.request.template_file_paths = paths;
        self
    }

    /// Set the position moved to before the first point
    pub fn with_start_position(mut self, position: Position) -> Self {
        self.request.start_position = Some(position);
        self
    }

    /// Set the position moved to after the last point
    pub fn with_end_position(mut self, position: Position) -> Self {
        self.request.end_position = Some(position);
        self
    }

    /// Set the script run before the scan
    pub fn with_before_script(mut self, script: ScriptRequest) -> Self {
        self.request.before_script = Some(script);
        self
    }

    /// Set the script run after the scan
    pub fn with_after_script(mut self, script: ScriptRequest) -> Self {
        self.request.after_script = Some(script);
        self
    }

    /// Run the after-script even on failure or abort
    pub fn with_always_run_after_script(mut self, always: bool) -> Self {
        self.request.always_run_after_script = always;
        self
    }

    /// Skip server-side preprocessing
    pub fn with_ignore_preprocess(mut self, ignore: bool) -> Self {
        self.request.ignore_preprocess = ignore;
        self
    }

    /// Set the post-scan processing request
    pub fn with_processing_request(mut self, processing: ProcessingRequest) -> Self {
        self.request.processing_request = Some(processing);
        self
    }

    /// Finish construction, consuming the builder.
    ///
    /// Applies any untyped map entries supplied via [`from_map`]; the first
    /// entry whose value does not convert to the field's type fails with
    /// [`RequestError::TypeMismatch`], an unknown key with
    /// [`RequestError::UnrecognizedField`]. Fields never set stay at their
    /// defaults: `None`/`false` for scalars, empty for collections.
    ///
    /// [`from_map`]: ScanRequestBuilder::from_map
    pub fn build(mut self) -> Result<ScanRequest, RequestError> {
        let overrides = std::mem::take(&mut self.overrides);
        for (key, value) in overrides {
            self.apply(&key, value)?;
        }
        debug!(
            models = self.request.compound_model.models().len(),
            detectors = self.request.detectors.len(),
            "built scan request"
        );
        Ok(self.request)
    }

    fn apply(&mut self, key: &str, value: Value) -> Result<(), RequestError> {
        let request = &mut self.request;
        match key {
            "detectors" => {
                request.detectors = convert("detectors", "a map of detector models", value)?
            }
            "monitorNamesPerPoint" => {
                request.monitor_names_per_point =
                    convert("monitorNamesPerPoint", "a list of strings", value)?
            }
            "monitorNamesPerScan" => {
                request.monitor_names_per_scan =
                    convert("monitorNamesPerScan", "a list of strings", value)?
            }
            "sampleData" => {
                request.sample_data = Some(convert("sampleData", "a sample data object", value)?)
            }
            "scanMetadata" => {
                request.scan_metadata =
                    convert("scanMetadata", "a list of metadata blocks", value)?
            }
            "filePath" => request.file_path = Some(convert("filePath", "a string", value)?),
            "templateFilePaths" => {
                request.template_file_paths =
                    convert("templateFilePaths", "a set of strings", value)?
            }
            "startPosition" => {
                request.start_position = Some(convert("startPosition", "a position map", value)?)
            }
            "endPosition" => {
                request.end_position = Some(convert("endPosition", "a position map", value)?)
            }
            "beforeScript" => {
                request.before_script =
                    Some(convert("beforeScript", "a script request", value)?)
            }
            "afterScript" => {
                request.after_script = Some(convert("afterScript", "a script request", value)?)
            }
            "alwaysRunAfterScript" => {
                request.always_run_after_script =
                    convert("alwaysRunAfterScript", "a boolean", value)?
            }
            "ignorePreprocess" => {
                request.ignore_preprocess = convert("ignorePreprocess", "a boolean", value)?
            }
            "processingRequest" => {
                request.processing_request =
                    Some(convert("processingRequest", "a processing request", value)?)
            }
            _ => {
                return Err(RequestError::UnrecognizedField {
                    field: key.to_string(),
                })
            }
        }
        Ok(())
    }
}

fn convert<T: DeserializeOwned>(
    field: &'static str,
    expected: &'static str,
    value: Value,
) -> Result<T, RequestError> {
    serde_json::from_value(value).map_err(|source| RequestError::TypeMismatch {
        field,
        expected,
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detector::MandelbrotModel;
    use crate::points::StepModel;
    use serde_json::json;

    fn path() -> StepModel {
        StepModel::new("fred", 0.0, 10.0, 1.0)
    }

    #[test]
    fn bare_build_leaves_defaults() {
        let request = ScanRequestBuilder::new(path()).build().unwrap();
        assert!(request.detectors.is_empty());
        assert!(request.sample_data.is_none());
        assert!(!request.always_run_after_script);
        assert_eq!(request.compound_model.models().len(), 1);
    }

    #[test]
    fn fluent_and_map_paths_agree() {
        let fluent = ScanRequestBuilder::new(path())
            .with_detector("mandelbrot", MandelbrotModel::new("mandelbrot", 0.1))
            .with_monitor_names_per_point(vec!["beam_current".into()])
            .with_file_path("/scratch/scan_001.nxs")
            .with_always_run_after_script(true)
            .build()
            .unwrap();

        let mut fields = Map::new();
        fields.insert(
            "detectors".into(),
            json!({"mandelbrot": {"type": "Mandelbrot", "name": "mandelbrot",
                "exposureTime": 0.1, "maxIterations": 500, "escapeRadius": 10.0,
                "columns": 301, "rows": 241, "enableNoise": false}}),
        );
        fields.insert("monitorNamesPerPoint".into(), json!(["beam_current"]));
        fields.insert("filePath".into(), json!("/scratch/scan_001.nxs"));
        fields.insert("alwaysRunAfterScript".into(), json!(true));
        let mapped = ScanRequestBuilder::from_map(path(), fields).build().unwrap();

        assert_eq!(fluent, mapped);
    }

    #[test]
    fn type_mismatch_surfaces_at_build() {
        let mut fields = Map::new();
        fields.insert("detectors".into(), json!("not a map"));
        let builder = ScanRequestBuilder::from_map(path(), fields);

        // No error yet: the bad value sits unexamined until build()
        let err = builder.build().unwrap_err();
        match err {
            RequestError::TypeMismatch { field, .. } => assert_eq!(field, "detectors"),
            other => panic!("expected type mismatch, got {other}"),
        }
    }

    #[test]
    fn unknown_key_is_rejected() {
        let mut fields = Map::new();
        fields.insert("detektors".into(), json!({}));
        let err = ScanRequestBuilder::from_map(path(), fields)
            .build()
            .unwrap_err();
        assert!(matches!(err, RequestError::UnrecognizedField { field } if field == "detektors"));
    }

    #[test]
    fn build_consumes_the_builder() {
        // Compile-time property: `build(self)` moves the builder, so there is
        // nothing left to mutate. Assert the value-level consequence instead.
        let request = ScanRequestBuilder::new(path())
            .with_file_path("/a.nxs")
            .build()
            .unwrap();
        assert_eq!(request.file_path.as_deref(), Some("/a.nxs"));
    }
}
