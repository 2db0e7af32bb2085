//! Rendering of scan models into DSL source text.
//!
//! The [`ExpressionFactory`] turns any scan path model, region, detector
//! model or whole scan request into a syntactically valid DSL function call,
//! in one of two registers:
//!
//! - **concise**: positional arguments in a fixed per-type order, dropping
//!   defaulted optional keywords. The mandatory-plus-behavioural tuple of a
//!   path model is always written out in full.
//! - **verbose**: the full keyword form, `key=value` for every field of the
//!   per-type call shape.
//!
//! Bounding boxes are always rendered as derived `(start, start + length)`
//! corner pairs, never as stored lengths. Rendering never returns partial
//! text: an unrenderable input fails with a [`RenderError`].

use scankit_core::detector::DetectorModel;
use scankit_core::error::RenderError;
use scankit_core::points::roi::Roi;
use scankit_core::points::{AxialModel, ScanPathModel, StepModel, TwoAxisModel};
use scankit_core::request::{MetadataType, MetadataValue, ScanMetadata, ScanRequest};

/// Which text register to render in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Register {
    /// Positional arguments, defaulted optional keywords omitted
    Concise,
    /// Full `key=value` keyword form
    Verbose,
}

/// Renders typed scan objects as DSL call expressions.
#[derive(Debug, Clone, Copy)]
pub struct ExpressionFactory {
    register: Register,
}

impl ExpressionFactory {
    /// Create a factory for the given register
    pub fn new(register: Register) -> Self {
        Self { register }
    }

    /// Create a concise-register factory
    pub fn concise() -> Self {
        Self::new(Register::Concise)
    }

    /// Create a verbose-register factory
    pub fn verbose() -> Self {
        Self::new(Register::Verbose)
    }

    /// The register this factory renders in
    pub fn register(&self) -> Register {
        self.register
    }

    fn is_verbose(&self) -> bool {
        self.register == Register::Verbose
    }

    /// Render a scan path model, with the regions bound to it appended where
    /// the call shape allows them.
    ///
    /// Fails for regions attached to an axial path (the DSL has no such
    /// form) and for an array model with no positions.
    pub fn path_expression(
        &self,
        model: &ScanPathModel,
        rois: &[Roi],
    ) -> Result<String, RenderError> {
        match model {
            ScanPathModel::Axial(axial) => {
                if !rois.is_empty() {
                    return Err(RenderError::UnsupportedType {
                        type_name: "region bound to an axial path".into(),
                    });
                }
                self.axial_expression(axial)
            }
            ScanPathModel::TwoAxis(two_axis) => self.two_axis_expression(two_axis, rois),
        }
    }

    fn axial_expression(&self, model: &AxialModel) -> Result<String, RenderError> {
        match model {
            AxialModel::Step(m) => Ok(self.step_expression(m)),
            AxialModel::MultiStep(m) => {
                let steps = m
                    .step_models
                    .iter()
                    .map(|s| self.step_expression(s))
                    .collect::<Vec<_>>()
                    .join(", ");
                if self.is_verbose() {
                    Ok(format!(
                        "mstep(axis={}, stepModels=[{}], alternating={}, continuous={})",
                        quote(&m.name),
                        steps,
                        py_bool(m.alternating),
                        py_bool(m.continuous)
                    ))
                } else {
                    Ok(format!(
                        "mstep({}, [{}], {}, {})",
                        quote(&m.name),
                        steps,
                        py_bool(m.alternating),
                        py_bool(m.continuous)
                    ))
                }
            }
            AxialModel::Repeat(m) => {
                if self.is_verbose() {
                    Ok(format!(
                        "repeat(axis={}, count={}, value={}, sleep={})",
                        quote(&m.name),
                        m.count,
                        py_f64(m.value),
                        m.sleep
                    ))
                } else {
                    Ok(format!(
                        "repeat({}, {}, {}, {})",
                        quote(&m.name),
                        m.count,
                        py_f64(m.value),
                        m.sleep
                    ))
                }
            }
            AxialModel::Array(m) => match (m.positions.as_slice(), self.register) {
                ([], _) => Err(RenderError::MissingField {
                    call: "array",
                    field: "values",
                }),
                ([single], Register::Concise) => {
                    Ok(format!("val({}, {})", quote(&m.name), py_f64(*single)))
                }
                ([single], Register::Verbose) => Ok(format!(
                    "array(axis={}, values=[{}])",
                    quote(&m.name),
                    py_f64(*single)
                )),
                (many, Register::Concise) => Ok(format!(
                    "array({}, [{}], {}, {})",
                    quote(&m.name),
                    join_f64(many),
                    py_bool(m.alternating),
                    py_bool(m.continuous)
                )),
                (many, Register::Verbose) => Ok(format!(
                    "array(axis={}, values=[{}], alternating={}, continuous={})",
                    quote(&m.name),
                    join_f64(many),
                    py_bool(m.alternating),
                    py_bool(m.continuous)
                )),
            },
        }
    }

    /// Render a single step model; shared by `step` and the `mstep` children.
    fn step_expression(&self, m: &StepModel) -> String {
        if self.is_verbose() {
            format!(
                "step(axis={}, start={}, stop={}, step={}, alternating={}, continuous={})",
                quote(&m.name),
                py_f64(m.start),
                py_f64(m.stop),
                py_f64(m.step),
                py_bool(m.alternating),
                py_bool(m.continuous)
            )
        } else {
            format!(
                "step({}, {}, {}, {}, {}, {})",
                quote(&m.name),
                py_f64(m.start),
                py_f64(m.stop),
                py_f64(m.step),
                py_bool(m.alternating),
                py_bool(m.continuous)
            )
        }
    }

    fn two_axis_expression(
        &self,
        model: &TwoAxisModel,
        rois: &[Roi],
    ) -> Result<String, RenderError> {
        let roi_suffix = self.roi_suffix(rois)?;
        match model {
            TwoAxisModel::GridPoints(m) => {
                let axes = axes_pair(&m.x_axis_name, &m.y_axis_name);
                let (start, stop) = corner_pairs(&m.bounding_box);
                let count = format!("count=({}, {})", m.x_axis_points, m.y_axis_points);
                Ok(if self.is_verbose() {
                    format!(
                        "grid(axes={axes}, start={start}, stop={stop}, {count}, alternating={}, continuous={}, verticalOrientation={}{roi_suffix})",
                        py_bool(m.alternating),
                        py_bool(m.continuous),
                        py_bool(m.vertical_orientation)
                    )
                } else {
                    format!(
                        "grid({axes}, {start}, {stop}, {count}, {}, {}, {}{roi_suffix})",
                        py_bool(m.alternating),
                        py_bool(m.continuous),
                        py_bool(m.vertical_orientation)
                    )
                })
            }
            TwoAxisModel::GridStep(m) => {
                let axes = axes_pair(&m.x_axis_name, &m.y_axis_name);
                let (start, stop) = corner_pairs(&m.bounding_box);
                Ok(if self.is_verbose() {
                    format!(
                        "grid(axes={axes}, start={start}, stop={stop}, step=({}, {}), alternating={}, continuous={}, verticalOrientation={}{roi_suffix})",
                        py_f64(m.x_axis_step),
                        py_f64(m.y_axis_step),
                        py_bool(m.alternating),
                        py_bool(m.continuous),
                        py_bool(m.vertical_orientation)
                    )
                } else {
                    format!(
                        "grid({axes}, {start}, {stop}, ({}, {}), {}, {}, {}{roi_suffix})",
                        py_f64(m.x_axis_step),
                        py_f64(m.y_axis_step),
                        py_bool(m.alternating),
                        py_bool(m.continuous),
                        py_bool(m.vertical_orientation)
                    )
                })
            }
            TwoAxisModel::GridPointsRandomOffset(m) => {
                let axes = axes_pair(&m.x_axis_name, &m.y_axis_name);
                let (start, stop) = corner_pairs(&m.bounding_box);
                let count = format!("({}, {})", m.x_axis_points, m.y_axis_points);
                Ok(if self.is_verbose() {
                    format!(
                        "random_offset_grid(axes={axes}, start={start}, stop={stop}, count={count}, alternating={}, continuous={}, verticalOrientation={}, offset={}, seed={}{roi_suffix})",
                        py_bool(m.alternating),
                        py_bool(m.continuous),
                        py_bool(m.vertical_orientation),
                        py_f64(m.offset),
                        m.seed
                    )
                } else {
                    // Non-default jitter still has to survive the concise form
                    let mut jitter = String::new();
                    if m.offset != 0.0 {
                        jitter.push_str(&format!(", offset={}", py_f64(m.offset)));
                    }
                    if m.seed != 0 {
                        jitter.push_str(&format!(", seed={}", m.seed));
                    }
                    format!(
                        "random_offset_grid({axes}, {start}, {stop}, {count}, {}, {}, {}{jitter}{roi_suffix})",
                        py_bool(m.alternating),
                        py_bool(m.continuous),
                        py_bool(m.vertical_orientation)
                    )
                })
            }
            TwoAxisModel::Spiral(m) => {
                let axes = axes_pair(&m.x_axis_name, &m.y_axis_name);
                let (start, stop) = corner_pairs(&m.bounding_box);
                Ok(if self.is_verbose() {
                    format!(
                        "spiral(axes={axes}, start={start}, stop={stop}, scale={}, alternating={}, continuous={}{roi_suffix})",
                        py_f64(m.scale),
                        py_bool(m.alternating),
                        py_bool(m.continuous)
                    )
                } else {
                    format!(
                        "spiral({axes}, {start}, {stop}, {}, {}, {}{roi_suffix})",
                        py_f64(m.scale),
                        py_bool(m.alternating),
                        py_bool(m.continuous)
                    )
                })
            }
            TwoAxisModel::Lissajous(m) => {
                let axes = axes_pair(&m.x_axis_name, &m.y_axis_name);
                let (start, stop) = corner_pairs(&m.bounding_box);
                Ok(if self.is_verbose() {
                    format!(
                        "lissajous(axes={axes}, start={start}, stop={stop}, a={}, b={}, points={}, alternating={}, continuous={}{roi_suffix})",
                        py_f64(m.a),
                        py_f64(m.b),
                        m.points,
                        py_bool(m.alternating),
                        py_bool(m.continuous)
                    )
                } else {
                    format!(
                        "lissajous({axes}, {start}, {stop}, {}, {}, {}, {}, {}{roi_suffix})",
                        py_f64(m.a),
                        py_f64(m.b),
                        m.points,
                        py_bool(m.alternating),
                        py_bool(m.continuous)
                    )
                })
            }
            TwoAxisModel::LinePoints(m) => {
                let origin = num_pair(m.bounding_line.x_start, m.bounding_line.y_start);
                Ok(if self.is_verbose() {
                    format!(
                        "line(origin={origin}, length={}, angle={}, count={}, alternating={}, continuous={}{roi_suffix})",
                        py_f64(m.bounding_line.length),
                        py_f64(m.bounding_line.angle),
                        m.points,
                        py_bool(m.alternating),
                        py_bool(m.continuous)
                    )
                } else {
                    format!(
                        "line({origin}, {}, {}, count={}, {}, {}{roi_suffix})",
                        py_f64(m.bounding_line.length),
                        py_f64(m.bounding_line.angle),
                        m.points,
                        py_bool(m.alternating),
                        py_bool(m.continuous)
                    )
                })
            }
            TwoAxisModel::LineStep(m) => {
                let origin = num_pair(m.bounding_line.x_start, m.bounding_line.y_start);
                Ok(if self.is_verbose() {
                    format!(
                        "line(origin={origin}, length={}, angle={}, step={}, alternating={}, continuous={}{roi_suffix})",
                        py_f64(m.bounding_line.length),
                        py_f64(m.bounding_line.angle),
                        py_f64(m.step),
                        py_bool(m.alternating),
                        py_bool(m.continuous)
                    )
                } else {
                    format!(
                        "line({origin}, {}, {}, step={}, {}, {}{roi_suffix})",
                        py_f64(m.bounding_line.length),
                        py_f64(m.bounding_line.angle),
                        py_f64(m.step),
                        py_bool(m.alternating),
                        py_bool(m.continuous)
                    )
                })
            }
            TwoAxisModel::PointSingle(m) => {
                if !rois.is_empty() {
                    return Err(RenderError::UnsupportedType {
                        type_name: "region bound to a single-point path".into(),
                    });
                }
                Ok(if self.is_verbose() {
                    format!("point(x={}, y={})", py_f64(m.x), py_f64(m.y))
                } else {
                    format!("point({}, {})", py_f64(m.x), py_f64(m.y))
                })
            }
        }
    }

    /// The trailing region argument, empty when no regions are bound.
    fn roi_suffix(&self, rois: &[Roi]) -> Result<String, RenderError> {
        let expr = match rois {
            [] => return Ok(String::new()),
            [single] => self.roi_expression(single)?,
            many => {
                let parts = many
                    .iter()
                    .map(|r| self.roi_expression(r))
                    .collect::<Result<Vec<_>, _>>()?;
                format!("[{}]", parts.join(", "))
            }
        };
        Ok(if self.is_verbose() {
            format!(", roi={expr}")
        } else {
            format!(", {expr}")
        })
    }

    /// Render a region of interest.
    pub fn roi_expression(&self, roi: &Roi) -> Result<String, RenderError> {
        Ok(match roi {
            Roi::Point { x, y } => {
                if self.is_verbose() {
                    format!("point(x={}, y={})", py_f64(*x), py_f64(*y))
                } else {
                    format!("point({}, {})", py_f64(*x), py_f64(*y))
                }
            }
            Roi::Circular { centre, radius } => {
                if self.is_verbose() {
                    format!(
                        "circ(origin={}, radius={})",
                        num_pair(centre.0, centre.1),
                        py_f64(*radius)
                    )
                } else {
                    format!("circ({}, {})", num_pair(centre.0, centre.1), py_f64(*radius))
                }
            }
            Roi::Rectangular {
                origin,
                lengths,
                angle,
            } => {
                if self.is_verbose() {
                    format!(
                        "rect(origin={}, size={}, angle={})",
                        num_pair(origin.0, origin.1),
                        num_pair(lengths.0, lengths.1),
                        py_f64(*angle)
                    )
                } else if *angle == 0.0 {
                    format!(
                        "rect({}, {})",
                        num_pair(origin.0, origin.1),
                        num_pair(lengths.0, lengths.1)
                    )
                } else {
                    format!(
                        "rect({}, {}, {})",
                        num_pair(origin.0, origin.1),
                        num_pair(lengths.0, lengths.1),
                        py_f64(*angle)
                    )
                }
            }
            // Same shape in both registers
            Roi::Polygonal { points } => {
                let vertices = points
                    .iter()
                    .map(|(x, y)| num_pair(*x, *y))
                    .collect::<Vec<_>>()
                    .join(", ");
                format!("poly({vertices})")
            }
        })
    }

    /// Render a detector model.
    ///
    /// The name and exposure time are always positional, the exposure even
    /// when it is the `-1.0` untimed sentinel. Detector-specific fields are
    /// keyword-only; the concise register drops those still at their
    /// defaults, the verbose register lists every one.
    pub fn detector_expression(&self, model: &DetectorModel) -> Result<String, RenderError> {
        let verbose = self.is_verbose();
        let mut kwargs: Vec<String> = Vec::new();
        match model {
            DetectorModel::Mandelbrot(m) => {
                if verbose || m.max_iterations != 500 {
                    kwargs.push(format!("maxIterations={}", m.max_iterations));
                }
                if verbose || m.escape_radius != 10.0 {
                    kwargs.push(format!("escapeRadius={}", py_f64(m.escape_radius)));
                }
                if verbose || m.columns != 301 {
                    kwargs.push(format!("columns={}", m.columns));
                }
                if verbose || m.rows != 241 {
                    kwargs.push(format!("rows={}", m.rows));
                }
                if verbose || m.enable_noise {
                    kwargs.push(format!("enableNoise={}", py_bool(m.enable_noise)));
                }
            }
            DetectorModel::ClusterProcessing(m) => {
                kwargs.push(format!("detectorName={}", quote(&m.detector_name)));
                kwargs.push(format!("processingFilePath={}", quote(&m.processing_file_path)));
                if verbose || m.xmx != "1024m" {
                    kwargs.push(format!("xmx={}", quote(&m.xmx)));
                }
                if verbose || m.time_out != 600_000 {
                    kwargs.push(format!("timeOut={}", m.time_out));
                }
                if verbose || m.number_of_cores != 1 {
                    kwargs.push(format!("numberOfCores={}", m.number_of_cores));
                }
                if verbose || m.monitor_for_overwrite {
                    kwargs.push(format!(
                        "monitorForOverwrite={}",
                        py_bool(m.monitor_for_overwrite)
                    ));
                }
            }
            DetectorModel::DummyMalcolm(m) => {
                if verbose || !m.axes_to_move.is_empty() {
                    let axes = m
                        .axes_to_move
                        .iter()
                        .map(|a| quote(a))
                        .collect::<Vec<_>>()
                        .join(", ");
                    kwargs.push(format!("axesToMove=[{axes}]"));
                }
            }
        }
        let mut expr = format!(
            "detector({}, {}",
            quote(model.name()),
            py_f64(model.exposure_time())
        );
        for kwarg in kwargs {
            expr.push_str(", ");
            expr.push_str(&kwarg);
        }
        expr.push(')');
        Ok(expr)
    }

    /// Render a whole scan request as an `mscan(...)` call.
    ///
    /// Only fields on the DSL surface are rendered (path, monitors,
    /// detectors, metadata, file, preprocessing, processing); sample data,
    /// scripts, positions and templates have no DSL form and are skipped.
    /// Fails when the compound model is empty.
    pub fn request_expression(&self, request: &ScanRequest) -> Result<String, RenderError> {
        let compound = request.compound_model();
        if compound.is_empty() {
            return Err(RenderError::MissingField {
                call: "mscan",
                field: "path",
            });
        }

        let paths = compound
            .models()
            .iter()
            .enumerate()
            .map(|(i, model)| self.path_expression(model, compound.rois_for(i)))
            .collect::<Result<Vec<_>, _>>()?;
        let path = if self.is_verbose() || paths.len() > 1 {
            format!("[{}]", paths.join(", "))
        } else {
            paths.into_iter().next().unwrap_or_default()
        };

        let monitors = quote_list(&request.monitor_names_per_point);

        let mut expr = if self.is_verbose() {
            format!("mscan(path={path}, monitorsPerPoint={monitors}")
        } else {
            format!("mscan({path}, {monitors}")
        };

        if !request.monitor_names_per_scan.is_empty() {
            expr.push_str(&format!(
                ", monitorsPerScan={}",
                quote_list(&request.monitor_names_per_scan)
            ));
        }
        if !request.detectors.is_empty() {
            let detectors = request
                .detectors
                .values()
                .map(|d| self.detector_expression(d))
                .collect::<Result<Vec<_>, _>>()?;
            expr.push_str(&format!(", det=[{}]", detectors.join(", ")));
        }
        if !request.scan_metadata.is_empty() {
            let blocks = request
                .scan_metadata
                .iter()
                .map(|md| self.metadata_expression(md))
                .collect::<Result<Vec<_>, _>>()?;
            expr.push_str(&format!(", metadata=[{}]", blocks.join(", ")));
        }
        if let Some(file) = &request.file_path {
            expr.push_str(&format!(", file={}", quote(file)));
        }
        // The DSL default is allow_preprocess=False, i.e. preprocessing
        // ignored; only the non-default state needs writing out.
        if !request.ignore_preprocess {
            expr.push_str(", allow_preprocess=True");
        }
        if let Some(processing) = &request.processing_request {
            let mut pairs = Vec::new();
            for (app, paths) in &processing.request {
                for path in paths {
                    pairs.push(format!("({}, {})", quote(app), quote(path)));
                }
            }
            expr.push_str(&format!(", proc=[{}]", pairs.join(", ")));
        }
        expr.push(')');
        Ok(expr)
    }

    fn metadata_expression(&self, metadata: &ScanMetadata) -> Result<String, RenderError> {
        // sample() is the only metadata constructor on the DSL surface
        if metadata.metadata_type != MetadataType::Sample {
            return Err(RenderError::UnsupportedType {
                type_name: format!("{:?} metadata block", metadata.metadata_type),
            });
        }
        let fields = metadata
            .fields
            .iter()
            .map(|(key, value)| {
                let rendered = match value {
                    MetadataValue::Text(text) => quote(text),
                    MetadataValue::Integer(i) => i.to_string(),
                    MetadataValue::Number(n) => py_f64(*n),
                    MetadataValue::Flag(flag) => py_bool(*flag).to_string(),
                };
                format!("{key}={rendered}")
            })
            .collect::<Vec<_>>()
            .join(", ");
        Ok(format!("sample({fields})"))
    }
}

/// Render a double-typed field: always at least one decimal digit.
pub(crate) fn py_f64(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 {
        format!("{value:.1}")
    } else {
        format!("{value}")
    }
}

/// Render a geometry coordinate: whole values in integer form.
pub(crate) fn py_num(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{value}")
    }
}

fn py_bool(value: bool) -> &'static str {
    if value {
        "True"
    } else {
        "False"
    }
}

/// Single-quoted DSL string literal.
pub(crate) fn quote(text: &str) -> String {
    let mut quoted = String::with_capacity(text.len() + 2);
    quoted.push('\'');
    for ch in text.chars() {
        if ch == '\'' || ch == '\\' {
            quoted.push('\\');
        }
        quoted.push(ch);
    }
    quoted.push('\'');
    quoted
}

fn quote_list(items: &[String]) -> String {
    let quoted = items.iter().map(|s| quote(s)).collect::<Vec<_>>().join(", ");
    format!("[{quoted}]")
}

fn num_pair(a: f64, b: f64) -> String {
    format!("({}, {})", py_num(a), py_num(b))
}

fn axes_pair(x: &str, y: &str) -> String {
    format!("({}, {})", quote(x), quote(y))
}

/// Corner pairs `(start, stop)` derived from a bounding box.
fn corner_pairs(bbox: &scankit_core::points::BoundingBox) -> (String, String) {
    (
        num_pair(bbox.x_axis_start, bbox.y_axis_start),
        num_pair(bbox.x_axis_end(), bbox.y_axis_end()),
    )
}

fn join_f64(values: &[f64]) -> String {
    values.iter().map(|v| py_f64(*v)).collect::<Vec<_>>().join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use scankit_core::points::{ArrayModel, BoundingBox, GridPointsModel, MultiStepModel};

    #[test]
    fn step_concise_and_verbose() {
        let model: ScanPathModel = StepModel::new("fred", 0.0, 10.0, 1.0).into();
        assert_eq!(
            ExpressionFactory::concise()
                .path_expression(&model, &[])
                .unwrap(),
            "step('fred', 0.0, 10.0, 1.0, False, True)"
        );
        assert_eq!(
            ExpressionFactory::verbose()
                .path_expression(&model, &[])
                .unwrap(),
            "step(axis='fred', start=0.0, stop=10.0, step=1.0, alternating=False, continuous=True)"
        );
    }

    #[test]
    fn empty_mstep_concise() {
        let model: ScanPathModel = MultiStepModel::new("fred").into();
        assert_eq!(
            ExpressionFactory::concise()
                .path_expression(&model, &[])
                .unwrap(),
            "mstep('fred', [], False, False)"
        );
    }

    #[test]
    fn single_value_array_is_val() {
        let model: ScanPathModel = ArrayModel::new("fred", vec![0.1]).into();
        assert_eq!(
            ExpressionFactory::concise()
                .path_expression(&model, &[])
                .unwrap(),
            "val('fred', 0.1)"
        );
        assert_eq!(
            ExpressionFactory::verbose()
                .path_expression(&model, &[])
                .unwrap(),
            "array(axis='fred', values=[0.1])"
        );
    }

    #[test]
    fn multi_value_array_concise() {
        let model: ScanPathModel = ArrayModel::new("fred", vec![0.1, 0.2]).into();
        assert_eq!(
            ExpressionFactory::concise()
                .path_expression(&model, &[])
                .unwrap(),
            "array('fred', [0.1, 0.2], False, True)"
        );
    }

    #[test]
    fn empty_array_fails() {
        let model: ScanPathModel = ArrayModel::new("fred", Vec::new()).into();
        let err = ExpressionFactory::concise()
            .path_expression(&model, &[])
            .unwrap_err();
        assert!(matches!(err, RenderError::MissingField { call: "array", .. }));
    }

    #[test]
    fn grid_concise_renders_derived_corners() {
        let mut grid = GridPointsModel::new(
            "myFast",
            "mySlow",
            BoundingBox::new(0.0, 1.0, 10.0, 11.0),
            3,
            4,
        );
        grid.alternating = true;
        grid.continuous = true;
        let model: ScanPathModel = grid.into();
        assert_eq!(
            ExpressionFactory::concise()
                .path_expression(&model, &[])
                .unwrap(),
            "grid(('myFast', 'mySlow'), (0, 1), (10, 12), count=(3, 4), True, True, False)"
        );
    }

    #[test]
    fn roi_bound_to_axial_path_is_rejected() {
        let model: ScanPathModel = StepModel::new("fred", 0.0, 10.0, 1.0).into();
        let err = ExpressionFactory::concise()
            .path_expression(&model, &[Roi::circle((0.0, 0.0), 1.0)])
            .unwrap_err();
        assert!(matches!(err, RenderError::UnsupportedType { .. }));
    }

    #[test]
    fn whole_doubles_keep_a_decimal_digit() {
        assert_eq!(py_f64(0.0), "0.0");
        assert_eq!(py_f64(-1.0), "-1.0");
        assert_eq!(py_f64(0.1), "0.1");
    }

    #[test]
    fn coordinates_render_minimally() {
        assert_eq!(py_num(10.0), "10");
        assert_eq!(py_num(0.5), "0.5");
        assert_eq!(py_num(-3.0), "-3");
    }
}
