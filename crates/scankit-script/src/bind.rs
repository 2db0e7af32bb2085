//! Binding of parsed DSL calls to typed scan objects.
//!
//! Each DSL function has a fixed slot list; keyword arguments fill slots by
//! name and positional arguments fill the remaining slots left to right. This
//! is what lets one binder accept both registers: the concise form supplies
//! slots positionally while the verbose form names every one, and mixtures
//! (like a concise `grid` carrying only `count=` as a keyword) bind the same
//! way.
//!
//! Binding mirrors the rendering rules in [`crate::render`], so for any
//! renderable model `parse(render(model)) == model` in both registers.

use scankit_core::detector::{
    ClusterProcessingModel, DetectorModel, DummyMalcolmModel, MandelbrotModel,
};
use scankit_core::error::ParseError;
use scankit_core::points::compound::CompoundModel;
use scankit_core::points::roi::Roi;
use scankit_core::points::{
    ArrayModel, BoundingBox, BoundingLine, GridPointsModel, GridPointsRandomOffsetModel,
    GridStepModel, LinePointsModel, LineStepModel, LissajousModel, MultiStepModel,
    PointSingleModel, RepeatModel, ScanPathModel, SpiralModel, StepModel,
};
use scankit_core::request::{
    MetadataType, MetadataValue, ProcessingRequest, ScanMetadata, ScanRequest,
};
use tracing::debug;

use crate::parse::{parse_call, PyCall, PyValue};

/// Parse DSL text into a scan path model plus any regions bound to it.
pub fn parse_path(source: &str) -> Result<(ScanPathModel, Vec<Roi>), ParseError> {
    bind_path_call(&parse_call(source)?)
}

/// Parse DSL text into a region of interest.
pub fn parse_roi(source: &str) -> Result<Roi, ParseError> {
    bind_roi_call(&parse_call(source)?)
}

/// Parse a `detector(...)` DSL call into a detector model.
pub fn parse_detector(source: &str) -> Result<DetectorModel, ParseError> {
    bind_detector_call(&parse_call(source)?)
}

/// Parse an `mscan(...)` or `scan_request(...)` DSL call into a full scan
/// request. The two spellings take the same arguments; `mscan` is the
/// submitting form and the one the expression factory renders.
pub fn parse_request(source: &str) -> Result<ScanRequest, ParseError> {
    let call = parse_call(source)?;
    if call.name != "mscan" && call.name != "scan_request" {
        return Err(ParseError::UnknownFunction { name: call.name });
    }
    bind_request_call(&call)
}

/// Argument slots of one DSL function, filled from a parsed call.
struct Args<'a> {
    function: &'static str,
    names: Vec<&'static str>,
    values: Vec<Option<&'a PyValue>>,
}

impl<'a> Args<'a> {
    /// Fill the named slots: keywords first, then positionals into whatever
    /// is still empty, left to right.
    ///
    /// With `route_rois` set, a positional call or list of calls is steered
    /// into the `roi` slot regardless of position; the grid-family functions
    /// take their trailing region argument after keyword-only jitter
    /// parameters, so plain left-to-right filling would misplace it.
    fn bind(
        call: &'a PyCall,
        function: &'static str,
        names: &[&'static str],
        route_rois: bool,
    ) -> Result<Self, ParseError> {
        let names: Vec<&'static str> = names.to_vec();
        let mut values: Vec<Option<&'a PyValue>> = vec![None; names.len()];

        for (key, value) in &call.kwargs {
            let slot = names
                .iter()
                .position(|name| name == key)
                .ok_or_else(|| ParseError::UnexpectedArgument {
                    function,
                    argument: key.clone(),
                })?;
            if values[slot].is_some() {
                return Err(ParseError::BadArgument {
                    function,
                    argument: key.clone(),
                    reason: "given more than once".into(),
                });
            }
            values[slot] = Some(value);
        }

        for (index, value) in call.args.iter().enumerate() {
            let slot = if route_rois && matches!(value, PyValue::Call(_) | PyValue::List(_)) {
                names.iter().position(|name| *name == "roi")
            } else {
                (0..names.len())
                    .find(|&i| values[i].is_none() && !(route_rois && names[i] == "roi"))
            };
            match slot {
                Some(i) if values[i].is_none() => values[i] = Some(value),
                _ => {
                    return Err(ParseError::UnexpectedArgument {
                        function,
                        argument: format!("#{}", index + 1),
                    })
                }
            }
        }

        Ok(Self {
            function,
            names,
            values,
        })
    }

    fn get(&self, name: &str) -> Option<&'a PyValue> {
        self.names
            .iter()
            .position(|n| *n == name)
            .and_then(|i| self.values[i])
    }

    fn required(&self, name: &'static str) -> Result<&'a PyValue, ParseError> {
        self.get(name).ok_or(ParseError::MissingArgument {
            function: self.function,
            argument: name,
        })
    }

    fn str(&self, name: &'static str) -> Result<String, ParseError> {
        expect_str(self.function, name, self.required(name)?)
    }

    fn f64(&self, name: &'static str) -> Result<f64, ParseError> {
        expect_f64(self.function, name, self.required(name)?)
    }

    fn f64_or(&self, name: &'static str, default: f64) -> Result<f64, ParseError> {
        match self.get(name) {
            Some(value) => expect_f64(self.function, name, value),
            None => Ok(default),
        }
    }

    fn bool_or(&self, name: &'static str, default: bool) -> Result<bool, ParseError> {
        match self.get(name) {
            Some(PyValue::Bool(b)) => Ok(*b),
            Some(other) => Err(bad(self.function, name, "a boolean", other)),
            None => Ok(default),
        }
    }

    fn u32_or(&self, name: &'static str, default: u32) -> Result<u32, ParseError> {
        match self.get(name) {
            Some(value) => expect_u32(self.function, name, value),
            None => Ok(default),
        }
    }

    fn u64_or(&self, name: &'static str, default: u64) -> Result<u64, ParseError> {
        match self.get(name) {
            Some(value) => expect_u64(self.function, name, value),
            None => Ok(default),
        }
    }

    fn axes(&self, name: &'static str) -> Result<(String, String), ParseError> {
        let value = self.required(name)?;
        match value {
            PyValue::Tuple(items) => match items.as_slice() {
                [PyValue::Str(x), PyValue::Str(y)] => Ok((x.clone(), y.clone())),
                _ => Err(bad(self.function, name, "a tuple of two axis names", value)),
            },
            other => Err(bad(self.function, name, "a tuple of two axis names", other)),
        }
    }

    fn pair(&self, name: &'static str) -> Result<(f64, f64), ParseError> {
        expect_pair(self.function, name, self.required(name)?)
    }

    fn count_pair(&self, name: &'static str) -> Result<(u32, u32), ParseError> {
        let value = self.required(name)?;
        match value {
            PyValue::Tuple(items) => match items.as_slice() {
                [a, b] => Ok((
                    expect_u32(self.function, name, a)?,
                    expect_u32(self.function, name, b)?,
                )),
                _ => Err(bad(self.function, name, "a tuple of two point counts", value)),
            },
            other => Err(bad(self.function, name, "a tuple of two point counts", other)),
        }
    }

    /// The trailing region argument, empty when absent.
    fn rois(&self) -> Result<Vec<Roi>, ParseError> {
        match self.get("roi") {
            None => Ok(Vec::new()),
            Some(PyValue::Call(call)) => Ok(vec![bind_roi_call(call)?]),
            Some(PyValue::List(items)) => items
                .iter()
                .map(|item| match item {
                    PyValue::Call(call) => bind_roi_call(call),
                    other => Err(bad(self.function, "roi", "a region call", other)),
                })
                .collect(),
            Some(other) => Err(bad(
                self.function,
                "roi",
                "a region call or list of region calls",
                other,
            )),
        }
    }
}

fn bad(
    function: &'static str,
    argument: impl Into<String>,
    expected: &str,
    found: &PyValue,
) -> ParseError {
    ParseError::BadArgument {
        function,
        argument: argument.into(),
        reason: format!("expected {expected}, found {}", found.kind()),
    }
}

fn expect_str(
    function: &'static str,
    argument: &'static str,
    value: &PyValue,
) -> Result<String, ParseError> {
    match value {
        PyValue::Str(s) => Ok(s.clone()),
        other => Err(bad(function, argument, "a string", other)),
    }
}

fn expect_f64(
    function: &'static str,
    argument: &'static str,
    value: &PyValue,
) -> Result<f64, ParseError> {
    value
        .as_f64()
        .ok_or_else(|| bad(function, argument, "a number", value))
}

fn expect_u32(
    function: &'static str,
    argument: &'static str,
    value: &PyValue,
) -> Result<u32, ParseError> {
    match value {
        PyValue::Int(i) if *i >= 0 && *i <= u32::MAX as i64 => Ok(*i as u32),
        other => Err(bad(function, argument, "a non-negative integer", other)),
    }
}

fn expect_u64(
    function: &'static str,
    argument: &'static str,
    value: &PyValue,
) -> Result<u64, ParseError> {
    match value {
        PyValue::Int(i) if *i >= 0 => Ok(*i as u64),
        other => Err(bad(function, argument, "a non-negative integer", other)),
    }
}

fn expect_pair(
    function: &'static str,
    argument: &'static str,
    value: &PyValue,
) -> Result<(f64, f64), ParseError> {
    match value {
        PyValue::Tuple(items) => match items.as_slice() {
            [a, b] => Ok((
                expect_f64(function, argument, a)?,
                expect_f64(function, argument, b)?,
            )),
            _ => Err(bad(function, argument, "a tuple of two numbers", value)),
        },
        other => Err(bad(function, argument, "a tuple of two numbers", other)),
    }
}

/// A list of strings; a bare string is accepted as a one-element list.
fn expect_str_list(
    function: &'static str,
    argument: &'static str,
    value: &PyValue,
) -> Result<Vec<String>, ParseError> {
    match value {
        PyValue::Str(s) => Ok(vec![s.clone()]),
        PyValue::List(items) => items
            .iter()
            .map(|item| expect_str(function, argument, item))
            .collect(),
        other => Err(bad(function, argument, "a list of strings", other)),
    }
}

fn expect_f64_list(
    function: &'static str,
    argument: &'static str,
    value: &PyValue,
) -> Result<Vec<f64>, ParseError> {
    match value {
        PyValue::List(items) => items
            .iter()
            .map(|item| expect_f64(function, argument, item))
            .collect(),
        other => Err(bad(function, argument, "a list of numbers", other)),
    }
}

/// A single value or a list, flattened to a slice of values.
fn listify(value: &PyValue) -> Vec<&PyValue> {
    match value {
        PyValue::List(items) => items.iter().collect(),
        single => vec![single],
    }
}

/// Bind any scan path call, returning the model and its trailing regions.
pub(crate) fn bind_path_call(call: &PyCall) -> Result<(ScanPathModel, Vec<Roi>), ParseError> {
    match call.name.as_str() {
        "step" => Ok((bind_step(call)?.into(), Vec::new())),
        "mstep" => bind_mstep(call).map(|m| (m.into(), Vec::new())),
        "repeat" => bind_repeat(call).map(|m| (m.into(), Vec::new())),
        "array" => bind_array(call).map(|m| (m.into(), Vec::new())),
        "val" => bind_val(call).map(|m| (m.into(), Vec::new())),
        "grid" => bind_grid(call),
        "random_offset_grid" => bind_random_offset_grid(call),
        "spiral" => bind_spiral(call),
        "lissajous" => bind_lissajous(call),
        "line" => bind_line(call),
        "point" => bind_point(call).map(|m| (m.into(), Vec::new())),
        _ => Err(ParseError::UnknownFunction {
            name: call.name.clone(),
        }),
    }
}

fn bind_step(call: &PyCall) -> Result<StepModel, ParseError> {
    const FN: &str = "step";
    let args = Args::bind(
        call,
        FN,
        &["axis", "start", "stop", "step", "alternating", "continuous"],
        false,
    )?;
    let mut model = StepModel::new(
        args.str("axis")?,
        args.f64("start")?,
        args.f64("stop")?,
        args.f64("step")?,
    );
    model.alternating = args.bool_or("alternating", model.alternating)?;
    model.continuous = args.bool_or("continuous", model.continuous)?;
    Ok(model)
}

fn bind_mstep(call: &PyCall) -> Result<MultiStepModel, ParseError> {
    const FN: &str = "mstep";
    let args = Args::bind(
        call,
        FN,
        &["axis", "stepModels", "alternating", "continuous"],
        false,
    )?;
    let mut model = MultiStepModel::new(args.str("axis")?);
    for item in listify(args.required("stepModels")?) {
        match item {
            PyValue::Call(child) if child.name == "step" => model.add_step(bind_step(child)?),
            other => return Err(bad(FN, "stepModels", "a list of step() calls", other)),
        }
    }
    model.alternating = args.bool_or("alternating", model.alternating)?;
    model.continuous = args.bool_or("continuous", model.continuous)?;
    Ok(model)
}

fn bind_repeat(call: &PyCall) -> Result<RepeatModel, ParseError> {
    const FN: &str = "repeat";
    let args = Args::bind(call, FN, &["axis", "count", "value", "sleep"], false)?;
    Ok(RepeatModel::new(
        args.str("axis")?,
        expect_u32(FN, "count", args.required("count")?)?,
        args.f64("value")?,
        args.u64_or("sleep", 0)?,
    ))
}

fn bind_array(call: &PyCall) -> Result<ArrayModel, ParseError> {
    const FN: &str = "array";
    let args = Args::bind(
        call,
        FN,
        &["axis", "values", "alternating", "continuous"],
        false,
    )?;
    let mut model = ArrayModel::new(
        args.str("axis")?,
        expect_f64_list(FN, "values", args.required("values")?)?,
    );
    model.alternating = args.bool_or("alternating", model.alternating)?;
    model.continuous = args.bool_or("continuous", model.continuous)?;
    Ok(model)
}

fn bind_val(call: &PyCall) -> Result<ArrayModel, ParseError> {
    const FN: &str = "val";
    let args = Args::bind(call, FN, &["axis", "value"], false)?;
    Ok(ArrayModel::new(args.str("axis")?, vec![args.f64("value")?]))
}

fn bind_grid(call: &PyCall) -> Result<(ScanPathModel, Vec<Roi>), ParseError> {
    const FN: &str = "grid";
    let has_count = call.kwarg("count").is_some();
    let has_step = call.kwarg("step").is_some();
    if has_count && has_step {
        return Err(ParseError::BadArgument {
            function: FN,
            argument: "count".into(),
            reason: "exactly one of count= or step= may be given".into(),
        });
    }
    // The raster form writes its step pair positionally in the concise
    // register; without either keyword the fourth slot is a step tuple.
    let density = if has_count { "count" } else { "step" };
    let args = Args::bind(
        call,
        FN,
        &[
            "axes",
            "start",
            "stop",
            density,
            "alternating",
            "continuous",
            "verticalOrientation",
            "roi",
        ],
        true,
    )?;
    let (x_axis_name, y_axis_name) = args.axes("axes")?;
    let bounding_box = BoundingBox::from_corners(args.pair("start")?, args.pair("stop")?);
    let alternating = args.bool_or("alternating", true)?;
    let continuous = args.bool_or("continuous", true)?;
    let vertical_orientation = args.bool_or("verticalOrientation", false)?;
    let rois = args.rois()?;

    let model: ScanPathModel = if density == "count" {
        let (x_points, y_points) = args.count_pair("count")?;
        let mut grid =
            GridPointsModel::new(x_axis_name, y_axis_name, bounding_box, x_points, y_points);
        grid.alternating = alternating;
        grid.continuous = continuous;
        grid.vertical_orientation = vertical_orientation;
        grid.into()
    } else {
        let (x_step, y_step) = args.pair("step")?;
        let mut grid = GridStepModel::new(x_axis_name, y_axis_name, bounding_box, x_step, y_step);
        grid.alternating = alternating;
        grid.continuous = continuous;
        grid.vertical_orientation = vertical_orientation;
        grid.into()
    };
    Ok((model, rois))
}

fn bind_random_offset_grid(call: &PyCall) -> Result<(ScanPathModel, Vec<Roi>), ParseError> {
    const FN: &str = "random_offset_grid";
    let args = Args::bind(
        call,
        FN,
        &[
            "axes",
            "start",
            "stop",
            "count",
            "alternating",
            "continuous",
            "verticalOrientation",
            "offset",
            "seed",
            "roi",
        ],
        true,
    )?;
    let (x_axis_name, y_axis_name) = args.axes("axes")?;
    let bounding_box = BoundingBox::from_corners(args.pair("start")?, args.pair("stop")?);
    let (x_points, y_points) = args.count_pair("count")?;
    let mut grid = GridPointsRandomOffsetModel::new(
        x_axis_name,
        y_axis_name,
        bounding_box,
        x_points,
        y_points,
    );
    grid.alternating = args.bool_or("alternating", true)?;
    grid.continuous = args.bool_or("continuous", true)?;
    grid.vertical_orientation = args.bool_or("verticalOrientation", false)?;
    grid.offset = args.f64_or("offset", 0.0)?;
    grid.seed = args.u64_or("seed", 0)?;
    let rois = args.rois()?;
    Ok((grid.into(), rois))
}

fn bind_spiral(call: &PyCall) -> Result<(ScanPathModel, Vec<Roi>), ParseError> {
    const FN: &str = "spiral";
    let args = Args::bind(
        call,
        FN,
        &["axes", "start", "stop", "scale", "alternating", "continuous", "roi"],
        true,
    )?;
    let (x_axis_name, y_axis_name) = args.axes("axes")?;
    let bounding_box = BoundingBox::from_corners(args.pair("start")?, args.pair("stop")?);
    let mut spiral = SpiralModel::new(
        x_axis_name,
        y_axis_name,
        bounding_box,
        args.f64_or("scale", 1.0)?,
    );
    spiral.alternating = args.bool_or("alternating", false)?;
    spiral.continuous = args.bool_or("continuous", true)?;
    let rois = args.rois()?;
    Ok((spiral.into(), rois))
}

fn bind_lissajous(call: &PyCall) -> Result<(ScanPathModel, Vec<Roi>), ParseError> {
    const FN: &str = "lissajous";
    let args = Args::bind(
        call,
        FN,
        &[
            "axes",
            "start",
            "stop",
            "a",
            "b",
            "points",
            "alternating",
            "continuous",
            "roi",
        ],
        true,
    )?;
    let (x_axis_name, y_axis_name) = args.axes("axes")?;
    let bounding_box = BoundingBox::from_corners(args.pair("start")?, args.pair("stop")?);
    let mut lissajous = LissajousModel::new(x_axis_name, y_axis_name, bounding_box);
    lissajous.a = args.f64_or("a", lissajous.a)?;
    lissajous.b = args.f64_or("b", lissajous.b)?;
    lissajous.points = args.u32_or("points", lissajous.points)?;
    lissajous.alternating = args.bool_or("alternating", false)?;
    lissajous.continuous = args.bool_or("continuous", true)?;
    let rois = args.rois()?;
    Ok((lissajous.into(), rois))
}

fn bind_line(call: &PyCall) -> Result<(ScanPathModel, Vec<Roi>), ParseError> {
    const FN: &str = "line";
    // count/step is keyword-only in both registers
    let has_count = call.kwarg("count").is_some();
    let has_step = call.kwarg("step").is_some();
    let density = match (has_count, has_step) {
        (true, true) => {
            return Err(ParseError::BadArgument {
                function: FN,
                argument: "count".into(),
                reason: "exactly one of count= or step= may be given".into(),
            })
        }
        (false, false) => {
            return Err(ParseError::MissingArgument {
                function: FN,
                argument: "count",
            })
        }
        (true, false) => "count",
        (false, true) => "step",
    };
    let args = Args::bind(
        call,
        FN,
        &["origin", "length", "angle", density, "alternating", "continuous", "roi"],
        true,
    )?;
    let bounding_line = BoundingLine::new(
        args.pair("origin")?,
        args.f64("length")?,
        args.f64("angle")?,
    );
    let alternating = args.bool_or("alternating", false)?;
    let continuous = args.bool_or("continuous", true)?;
    let rois = args.rois()?;

    let model: ScanPathModel = if density == "count" {
        let mut line = LinePointsModel::new(
            bounding_line,
            expect_u32(FN, "count", args.required("count")?)?,
        );
        line.alternating = alternating;
        line.continuous = continuous;
        line.into()
    } else {
        let mut line = LineStepModel::new(bounding_line, args.f64("step")?);
        line.alternating = alternating;
        line.continuous = continuous;
        line.into()
    };
    Ok((model, rois))
}

fn bind_point(call: &PyCall) -> Result<PointSingleModel, ParseError> {
    const FN: &str = "point";
    let args = Args::bind(call, FN, &["x", "y"], false)?;
    Ok(PointSingleModel::new(args.f64("x")?, args.f64("y")?))
}

/// Bind a region call. `point(x, y)` doubles as the point region here.
pub(crate) fn bind_roi_call(call: &PyCall) -> Result<Roi, ParseError> {
    match call.name.as_str() {
        "point" => {
            let args = Args::bind(call, "point", &["x", "y"], false)?;
            Ok(Roi::Point {
                x: args.f64("x")?,
                y: args.f64("y")?,
            })
        }
        "circ" => {
            let args = Args::bind(call, "circ", &["origin", "radius"], false)?;
            Ok(Roi::circle(args.pair("origin")?, args.f64("radius")?))
        }
        "rect" => {
            let args = Args::bind(call, "rect", &["origin", "size", "angle"], false)?;
            Ok(Roi::rectangle(
                args.pair("origin")?,
                args.pair("size")?,
                args.f64_or("angle", 0.0)?,
            ))
        }
        "poly" => bind_poly(call),
        _ => Err(ParseError::UnknownFunction {
            name: call.name.clone(),
        }),
    }
}

fn bind_poly(call: &PyCall) -> Result<Roi, ParseError> {
    const FN: &str = "poly";
    if let Some((key, _)) = call.kwargs.first() {
        return Err(ParseError::UnexpectedArgument {
            function: FN,
            argument: key.clone(),
        });
    }
    let points = call
        .args
        .iter()
        .map(|vertex| expect_pair(FN, "points", vertex))
        .collect::<Result<Vec<_>, _>>()?;
    if points.len() < 3 {
        return Err(ParseError::BadArgument {
            function: FN,
            argument: "points".into(),
            reason: "a polygon needs at least three vertices".into(),
        });
    }
    Ok(Roi::polygon(points))
}

/// Bind a `detector(...)` call, inferring the model type from the keyword
/// arguments: processing pipeline fields select the cluster processing
/// model, `axesToMove` the Malcolm device, anything else the Mandelbrot
/// simulator.
pub(crate) fn bind_detector_call(call: &PyCall) -> Result<DetectorModel, ParseError> {
    const FN: &str = "detector";
    if call.name != FN {
        return Err(ParseError::UnknownFunction {
            name: call.name.clone(),
        });
    }
    let name = expect_str(
        FN,
        "name",
        call.args.first().ok_or(ParseError::MissingArgument {
            function: FN,
            argument: "name",
        })?,
    )?;
    let exposure = expect_f64(
        FN,
        "exposure",
        call.args.get(1).ok_or(ParseError::MissingArgument {
            function: FN,
            argument: "exposure",
        })?,
    )?;
    if call.args.len() > 2 {
        return Err(ParseError::UnexpectedArgument {
            function: FN,
            argument: "#3".into(),
        });
    }

    let has = |key: &str| call.kwarg(key).is_some();
    if has("detectorName") || has("processingFilePath") {
        let mut model = ClusterProcessingModel::new(name, "", "");
        for (key, value) in &call.kwargs {
            match key.as_str() {
                "detectorName" => model.detector_name = expect_str(FN, "detectorName", value)?,
                "processingFilePath" => {
                    model.processing_file_path = expect_str(FN, "processingFilePath", value)?
                }
                "xmx" => model.xmx = expect_str(FN, "xmx", value)?,
                "timeOut" => model.time_out = expect_u64(FN, "timeOut", value)?,
                "numberOfCores" => model.number_of_cores = expect_u32(FN, "numberOfCores", value)?,
                "monitorForOverwrite" => match value {
                    PyValue::Bool(b) => model.monitor_for_overwrite = *b,
                    other => return Err(bad(FN, "monitorForOverwrite", "a boolean", other)),
                },
                _ => {
                    return Err(ParseError::UnexpectedArgument {
                        function: FN,
                        argument: key.clone(),
                    })
                }
            }
        }
        if model.detector_name.is_empty() {
            return Err(ParseError::MissingArgument {
                function: FN,
                argument: "detectorName",
            });
        }
        if model.processing_file_path.is_empty() {
            return Err(ParseError::MissingArgument {
                function: FN,
                argument: "processingFilePath",
            });
        }
        Ok(model.into())
    } else if has("axesToMove") {
        let mut model = DummyMalcolmModel::new(name, exposure);
        for (key, value) in &call.kwargs {
            match key.as_str() {
                "axesToMove" => model.axes_to_move = expect_str_list(FN, "axesToMove", value)?,
                _ => {
                    return Err(ParseError::UnexpectedArgument {
                        function: FN,
                        argument: key.clone(),
                    })
                }
            }
        }
        Ok(model.into())
    } else {
        let mut model = MandelbrotModel::new(name, exposure);
        for (key, value) in &call.kwargs {
            match key.as_str() {
                "maxIterations" => model.max_iterations = expect_u32(FN, "maxIterations", value)?,
                "escapeRadius" => model.escape_radius = expect_f64(FN, "escapeRadius", value)?,
                "columns" => model.columns = expect_u32(FN, "columns", value)?,
                "rows" => model.rows = expect_u32(FN, "rows", value)?,
                "enableNoise" => match value {
                    PyValue::Bool(b) => model.enable_noise = *b,
                    other => return Err(bad(FN, "enableNoise", "a boolean", other)),
                },
                _ => {
                    return Err(ParseError::UnexpectedArgument {
                        function: FN,
                        argument: key.clone(),
                    })
                }
            }
        }
        Ok(model.into())
    }
}

fn bind_request_call(call: &PyCall) -> Result<ScanRequest, ParseError> {
    const FN: &str = "mscan";
    let args = Args::bind(
        call,
        FN,
        &[
            "path",
            "monitorsPerPoint",
            "monitorsPerScan",
            "det",
            "metadata",
            "file",
            "allow_preprocess",
            "proc",
        ],
        false,
    )?;

    let mut compound = CompoundModel::new();
    for item in listify(args.required("path")?) {
        match item {
            PyValue::Call(path_call) => {
                let (model, rois) = bind_path_call(path_call)?;
                compound.add_data(model, rois);
            }
            other => return Err(bad(FN, "path", "a scan path call", other)),
        }
    }
    let mut request = ScanRequest::new(compound);

    if let Some(value) = args.get("monitorsPerPoint") {
        request.monitor_names_per_point = expect_str_list(FN, "monitorsPerPoint", value)?;
    }
    if let Some(value) = args.get("monitorsPerScan") {
        request.monitor_names_per_scan = expect_str_list(FN, "monitorsPerScan", value)?;
    }
    if let Some(value) = args.get("det") {
        for item in listify(value) {
            match item {
                PyValue::Call(det_call) => {
                    let model = bind_detector_call(det_call)?;
                    request.put_detector(model.name().to_string(), model);
                }
                other => return Err(bad(FN, "det", "a detector() call", other)),
            }
        }
    }
    if let Some(value) = args.get("metadata") {
        for item in listify(value) {
            match item {
                PyValue::Call(md_call) if md_call.name == "sample" => {
                    request.add_metadata(bind_sample(md_call)?)
                }
                other => return Err(bad(FN, "metadata", "a sample() call", other)),
            }
        }
    }
    if let Some(value) = args.get("file") {
        request.file_path = Some(expect_str(FN, "file", value)?);
    }
    // The DSL default is preprocessing off; absence means ignore.
    request.ignore_preprocess = !args.bool_or("allow_preprocess", false)?;
    if let Some(value) = args.get("proc") {
        let mut processing = ProcessingRequest::new();
        for item in listify(value) {
            match item {
                PyValue::Tuple(pair) => match pair.as_slice() {
                    [PyValue::Str(app), PyValue::Str(config)] => processing.add(app, config),
                    _ => return Err(bad(FN, "proc", "an (app, path) string pair", item)),
                },
                other => return Err(bad(FN, "proc", "an (app, path) string pair", other)),
            }
        }
        request.processing_request = Some(processing);
    }

    debug!(
        models = request.compound_model.models().len(),
        detectors = request.detectors.len(),
        "bound scan request from script"
    );
    Ok(request)
}

fn bind_sample(call: &PyCall) -> Result<ScanMetadata, ParseError> {
    const FN: &str = "sample";
    if let Some(first) = call.args.first() {
        return Err(bad(FN, "#1", "keyword arguments only", first));
    }
    let mut metadata = ScanMetadata::new(MetadataType::Sample);
    for (key, value) in &call.kwargs {
        let field = match value {
            PyValue::Str(s) => MetadataValue::Text(s.clone()),
            PyValue::Int(i) => MetadataValue::Integer(*i),
            PyValue::Float(f) => MetadataValue::Number(*f),
            PyValue::Bool(b) => MetadataValue::Flag(*b),
            other => return Err(bad(FN, key.clone(), "a scalar value", other)),
        };
        metadata.add_field(key, field);
    }
    Ok(metadata)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn binds_concise_step() {
        let (model, rois) = parse_path("step('fred', 0.0, 10.0, 1.0, False, True)").unwrap();
        assert!(rois.is_empty());
        let expected: ScanPathModel = StepModel::new("fred", 0.0, 10.0, 1.0).into();
        assert_eq!(model, expected);
    }

    #[test]
    fn binds_verbose_step() {
        let (model, _) = parse_path(
            "step(axis='fred', start=0.0, stop=10.0, step=1.0, alternating=False, continuous=True)",
        )
        .unwrap();
        let expected: ScanPathModel = StepModel::new("fred", 0.0, 10.0, 1.0).into();
        assert_eq!(model, expected);
    }

    #[test]
    fn binds_grid_with_count_keyword_between_positionals() {
        let (model, _) = parse_path(
            "grid(('myFast', 'mySlow'), (0, 1), (10, 12), count=(3, 4), True, True, False)",
        )
        .unwrap();
        match model {
            ScanPathModel::TwoAxis(scankit_core::points::TwoAxisModel::GridPoints(grid)) => {
                assert_eq!(grid.x_axis_points, 3);
                assert_eq!(grid.y_axis_points, 4);
                assert_eq!(grid.bounding_box.x_axis_length, 10.0);
                assert_eq!(grid.bounding_box.y_axis_length, 11.0);
                assert!(grid.alternating);
                assert!(!grid.vertical_orientation);
            }
            other => panic!("expected grid points model, got {other:?}"),
        }
    }

    #[test]
    fn binds_raster_grid_from_bare_step_tuple() {
        let (model, _) =
            parse_path("grid(('x', 'y'), (0, 0), (2, 2), (0.5, 0.5), True, True, False)").unwrap();
        match model {
            ScanPathModel::TwoAxis(scankit_core::points::TwoAxisModel::GridStep(grid)) => {
                assert_eq!(grid.x_axis_step, 0.5);
            }
            other => panic!("expected raster grid model, got {other:?}"),
        }
    }

    #[test]
    fn grid_rejects_count_and_step_together() {
        let err = parse_path("grid(('x', 'y'), (0, 0), (1, 1), count=(2, 2), step=(0.5, 0.5))")
            .unwrap_err();
        assert!(matches!(err, ParseError::BadArgument { function: "grid", .. }));
    }

    #[test]
    fn trailing_roi_binds_after_jitter_keywords() {
        let (model, rois) = parse_path(
            "random_offset_grid(('x', 'y'), (0, 0), (1, 1), (5, 5), True, True, False, offset=2.5, seed=7, circ((0.5, 0.5), 0.4))",
        )
        .unwrap();
        match model {
            ScanPathModel::TwoAxis(
                scankit_core::points::TwoAxisModel::GridPointsRandomOffset(grid),
            ) => {
                assert_eq!(grid.offset, 2.5);
                assert_eq!(grid.seed, 7);
            }
            other => panic!("expected random-offset grid, got {other:?}"),
        }
        assert_eq!(rois, vec![Roi::circle((0.5, 0.5), 0.4)]);
    }

    #[test]
    fn roi_list_binds_every_region() {
        let (_, rois) = parse_path(
            "grid(('x', 'y'), (0, 0), (1, 1), count=(2, 2), True, True, False, [circ((0, 0), 1.0), rect((0, 0), (1, 1))])",
        )
        .unwrap();
        assert_eq!(rois.len(), 2);
        assert_eq!(rois[1], Roi::rectangle((0.0, 0.0), (1.0, 1.0), 0.0));
    }

    #[test]
    fn point_is_a_path_or_a_region_by_position() {
        let (model, _) = parse_path("point(2.0, 3.0)").unwrap();
        let expected: ScanPathModel = PointSingleModel::new(2.0, 3.0).into();
        assert_eq!(model, expected);

        let roi = parse_roi("point(2.0, 3.0)").unwrap();
        assert_eq!(roi, Roi::Point { x: 2.0, y: 3.0 });
    }

    #[test]
    fn poly_needs_three_vertices() {
        let err = parse_roi("poly((0, 0), (1, 0))").unwrap_err();
        assert!(matches!(err, ParseError::BadArgument { function: "poly", .. }));
        assert!(parse_roi("poly((0, 0), (1, 0), (1, 1))").is_ok());
    }

    #[test]
    fn detector_kwargs_select_the_model_type() {
        let mandelbrot = parse_detector("detector('mandelbrot', 0.1)").unwrap();
        assert!(matches!(mandelbrot, DetectorModel::Mandelbrot(_)));

        let processing = parse_detector(
            "detector('processing', -1.0, detectorName='mandelbrot', processingFilePath='/tmp/something.nxs', xmx='1024m', timeOut=600000, numberOfCores=1, monitorForOverwrite=False)",
        )
        .unwrap();
        let expected: DetectorModel =
            ClusterProcessingModel::new("processing", "mandelbrot", "/tmp/something.nxs").into();
        assert_eq!(processing, expected);

        let malcolm =
            parse_detector("detector('malcolm', 0.1, axesToMove=['stage_x', 'stage_y'])").unwrap();
        match malcolm {
            DetectorModel::DummyMalcolm(m) => assert_eq!(m.axes_to_move.len(), 2),
            other => panic!("expected malcolm model, got {other:?}"),
        }
    }

    #[test]
    fn unknown_function_is_reported_by_name() {
        let err = parse_path("gird(('x', 'y'), (0, 0), (1, 1), count=(2, 2))").unwrap_err();
        assert!(matches!(err, ParseError::UnknownFunction { name } if name == "gird"));
    }

    #[test]
    fn mscan_binds_paths_monitors_and_detectors() {
        let request = parse_request(
            "mscan(step('fred', 0.0, 10.0, 1.0, False, True), ['beam_current'], det=[detector('mandelbrot', 0.1)], file='/scratch/scan.nxs')",
        )
        .unwrap();
        assert_eq!(request.compound_model.models().len(), 1);
        assert_eq!(request.monitor_names_per_point, vec!["beam_current"]);
        assert!(request.detector("mandelbrot").is_some());
        assert_eq!(request.file_path.as_deref(), Some("/scratch/scan.nxs"));
        // preprocessing defaults to off
        assert!(request.ignore_preprocess);
    }

    #[test]
    fn scan_request_spelling_is_accepted() {
        let a = parse_request("mscan(point(1.0, 2.0), [])").unwrap();
        let b = parse_request("scan_request(point(1.0, 2.0), [])").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn mscan_allow_preprocess_inverts_ignore_flag() {
        let request =
            parse_request("mscan(point(1.0, 2.0), [], allow_preprocess=True)").unwrap();
        assert!(!request.ignore_preprocess);
    }

    #[test]
    fn mscan_proc_pairs_group_by_application() {
        let request = parse_request(
            "mscan(point(1.0, 2.0), [], proc=[('fit', '/cfg/a.nxs'), ('fit', '/cfg/b.nxs')])",
        )
        .unwrap();
        let processing = request.processing_request.unwrap();
        assert_eq!(
            processing.request.get("fit").map(Vec::len),
            Some(2)
        );
    }

    #[test]
    fn sample_metadata_maps_scalar_kinds() {
        let request = parse_request(
            "mscan(point(1.0, 2.0), [], metadata=[sample(name='quartz', runs=3, temperature=291.5, aligned=True)])",
        )
        .unwrap();
        let block = &request.scan_metadata[0];
        assert_eq!(block.metadata_type, MetadataType::Sample);
        assert_eq!(
            block.fields.get("name"),
            Some(&MetadataValue::Text("quartz".into()))
        );
        assert_eq!(block.fields.get("runs"), Some(&MetadataValue::Integer(3)));
        assert_eq!(
            block.fields.get("aligned"),
            Some(&MetadataValue::Flag(true))
        );
    }
}
