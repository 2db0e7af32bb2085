//! Scan path models
//!
//! This module provides the data types describing how scannable axes are
//! traversed during a mapping scan:
//! - Axial (one-dimensional) paths: step, array, repeat, multi-step
//! - Two-axis (area) paths: grids, spiral, Lissajous, lines, single point
//! - Bounding geometry (boxes and lines) shared by the area paths
//! - Regions of interest restricting which generated positions are visited
//! - The compound model aggregating paths into one nested scan
//!
//! All models are plain serializable data. Point generation happens in an
//! external point-generator service; nothing here walks a trajectory.

pub mod compound;
pub mod roi;

use serde::{Deserialize, Serialize};
use std::fmt;

/// Tolerance used when deciding whether `stop` lands on a step boundary.
const STEP_TOLERANCE: f64 = 1e-10;

/// Axis-aligned rectangular extent of a two-axis scan path.
///
/// Lengths are signed: `stop = start + length`, so a negative length means
/// the traversal runs from a numerically higher start to a lower stop. DSL
/// callers supply `(start, stop)` corners and the length is derived.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoundingBox {
    /// Fast-axis start position
    pub x_axis_start: f64,
    /// Slow-axis start position
    pub y_axis_start: f64,
    /// Signed fast-axis extent
    pub x_axis_length: f64,
    /// Signed slow-axis extent
    pub y_axis_length: f64,
}

impl BoundingBox {
    /// Create a bounding box from explicit start positions and lengths
    pub fn new(x_axis_start: f64, y_axis_start: f64, x_axis_length: f64, y_axis_length: f64) -> Self {
        Self {
            x_axis_start,
            y_axis_start,
            x_axis_length,
            y_axis_length,
        }
    }

    /// Create a bounding box from `(start, stop)` corner pairs, deriving the
    /// signed lengths as `stop - start` exactly as the DSL does
    pub fn from_corners(start: (f64, f64), stop: (f64, f64)) -> Self {
        Self {
            x_axis_start: start.0,
            y_axis_start: start.1,
            x_axis_length: stop.0 - start.0,
            y_axis_length: stop.1 - start.1,
        }
    }

    /// Fast-axis stop position (`start + length`, derived, not stored)
    pub fn x_axis_end(&self) -> f64 {
        self.x_axis_start + self.x_axis_length
    }

    /// Slow-axis stop position (`start + length`, derived, not stored)
    pub fn y_axis_end(&self) -> f64 {
        self.y_axis_start + self.y_axis_length
    }
}

impl fmt::Display for BoundingBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({}, {}) -> ({}, {})",
            self.x_axis_start,
            self.y_axis_start,
            self.x_axis_end(),
            self.y_axis_end()
        )
    }
}

/// Line segment extent of a two-axis line scan path.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoundingLine {
    /// Fast-axis coordinate of the segment origin
    pub x_start: f64,
    /// Slow-axis coordinate of the segment origin
    pub y_start: f64,
    /// Segment length
    pub length: f64,
    /// Segment angle in radians, counter-clockwise from the fast axis
    pub angle: f64,
}

impl BoundingLine {
    /// Create a bounding line from an origin point, length and angle
    pub fn new(origin: (f64, f64), length: f64, angle: f64) -> Self {
        Self {
            x_start: origin.0,
            y_start: origin.1,
            length,
            angle,
        }
    }
}

/// Linear stepping along one axis.
///
/// Traverses `start` towards `stop` in increments of `step`. The point count
/// is `floor((stop - start) / step) + 1`; `stop` is included when it lands
/// within tolerance of a step boundary. `step` must be non-zero, but that is
/// enforced by the point-generator service, not here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StepModel {
    /// Scannable axis name
    pub name: String,
    /// First position
    pub start: f64,
    /// Limit position
    pub stop: f64,
    /// Signed increment between positions
    pub step: f64,
    /// Reverse direction on alternate passes of an enclosing scan
    pub alternating: bool,
    /// Request hardware-continuous (fly) motion where supported
    pub continuous: bool,
}

impl StepModel {
    /// Create a step model with the default alternating/continuous flags
    pub fn new(name: impl Into<String>, start: f64, stop: f64, step: f64) -> Self {
        Self {
            name: name.into(),
            start,
            stop,
            step,
            alternating: false,
            continuous: true,
        }
    }

    /// Number of positions this model generates.
    ///
    /// Returns `None` for a zero step, where the count is undefined.
    pub fn point_count(&self) -> Option<usize> {
        if self.step == 0.0 {
            return None;
        }
        let span = (self.stop - self.start) / self.step;
        if span < 0.0 {
            return Some(1);
        }
        Some((span + STEP_TOLERANCE).floor() as usize + 1)
    }
}

impl Default for StepModel {
    fn default() -> Self {
        Self::new("", 0.0, 0.0, 0.0)
    }
}

/// Explicit list of positions along one axis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArrayModel {
    /// Scannable axis name
    pub name: String,
    /// Ordered positions to visit; must be non-empty to generate points
    pub positions: Vec<f64>,
    /// Reverse direction on alternate passes of an enclosing scan
    pub alternating: bool,
    /// Request hardware-continuous (fly) motion where supported
    pub continuous: bool,
}

impl ArrayModel {
    /// Create an array model with the default alternating/continuous flags
    pub fn new(name: impl Into<String>, positions: Vec<f64>) -> Self {
        Self {
            name: name.into(),
            positions,
            alternating: false,
            continuous: true,
        }
    }
}

/// One fixed position revisited a number of times.
///
/// Used as an innermost path to expose the same position repeatedly, with an
/// optional delay between visits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepeatModel {
    /// Scannable axis name
    pub name: String,
    /// Number of visits
    pub count: u32,
    /// The position to hold
    pub value: f64,
    /// Delay between visits in milliseconds
    pub sleep: u64,
}

impl RepeatModel {
    /// Create a repeat model
    pub fn new(name: impl Into<String>, count: u32, value: f64, sleep: u64) -> Self {
        Self {
            name: name.into(),
            count,
            value,
            sleep,
        }
    }
}

/// Concatenation of step models sharing one axis.
///
/// All child step models traverse the axis named by this model; children
/// carrying a different name are rejected by the execution service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MultiStepModel {
    /// Scannable axis name shared by every child step
    pub name: String,
    /// Ordered child step segments
    pub step_models: Vec<StepModel>,
    /// Reverse direction on alternate passes of an enclosing scan
    pub alternating: bool,
    /// Request hardware-continuous (fly) motion where supported
    pub continuous: bool,
}

impl MultiStepModel {
    /// Create a multi-step model with no child segments
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            step_models: Vec::new(),
            alternating: false,
            continuous: false,
        }
    }

    /// Append a child step segment
    pub fn add_step(&mut self, step: StepModel) {
        self.step_models.push(step);
    }
}

/// Point-count-based rectangular grid over two axes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GridPointsModel {
    /// Fast axis name
    pub x_axis_name: String,
    /// Slow axis name
    pub y_axis_name: String,
    /// Grid extent
    pub bounding_box: BoundingBox,
    /// Number of positions along the fast axis
    pub x_axis_points: u32,
    /// Number of positions along the slow axis
    pub y_axis_points: u32,
    /// Snake through the grid, reversing the fast axis on alternate rows
    pub alternating: bool,
    /// Request hardware-continuous (fly) motion where supported
    pub continuous: bool,
    /// Treat the y axis as the fast (innermost) axis
    pub vertical_orientation: bool,
}

impl GridPointsModel {
    /// Create a grid with the given axis names, extent and point counts
    pub fn new(
        x_axis_name: impl Into<String>,
        y_axis_name: impl Into<String>,
        bounding_box: BoundingBox,
        x_axis_points: u32,
        y_axis_points: u32,
    ) -> Self {
        Self {
            x_axis_name: x_axis_name.into(),
            y_axis_name: y_axis_name.into(),
            bounding_box,
            x_axis_points,
            y_axis_points,
            alternating: true,
            continuous: true,
            vertical_orientation: false,
        }
    }

    /// Total number of grid positions
    pub fn point_count(&self) -> usize {
        self.x_axis_points as usize * self.y_axis_points as usize
    }
}

impl Default for GridPointsModel {
    fn default() -> Self {
        Self::new("stage_x", "stage_y", BoundingBox::default(), 5, 5)
    }
}

/// Step-size-based rectangular grid (raster) over two axes.
///
/// The per-axis point counts are derived from the box extent and step sizes;
/// a non-integral quotient is rounded down by the generator service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GridStepModel {
    /// Fast axis name
    pub x_axis_name: String,
    /// Slow axis name
    pub y_axis_name: String,
    /// Grid extent
    pub bounding_box: BoundingBox,
    /// Spacing along the fast axis
    pub x_axis_step: f64,
    /// Spacing along the slow axis
    pub y_axis_step: f64,
    /// Snake through the grid, reversing the fast axis on alternate rows
    pub alternating: bool,
    /// Request hardware-continuous (fly) motion where supported
    pub continuous: bool,
    /// Treat the y axis as the fast (innermost) axis
    pub vertical_orientation: bool,
}

impl GridStepModel {
    /// Create a raster grid with the given axis names, extent and step sizes
    pub fn new(
        x_axis_name: impl Into<String>,
        y_axis_name: impl Into<String>,
        bounding_box: BoundingBox,
        x_axis_step: f64,
        y_axis_step: f64,
    ) -> Self {
        Self {
            x_axis_name: x_axis_name.into(),
            y_axis_name: y_axis_name.into(),
            bounding_box,
            x_axis_step,
            y_axis_step,
            alternating: true,
            continuous: true,
            vertical_orientation: false,
        }
    }
}

/// Point-count grid with bounded per-point jitter.
///
/// Each nominal grid position is displaced by a random offset no larger than
/// `offset` (a percentage of the fast-axis spacing), seeded for
/// reproducibility.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GridPointsRandomOffsetModel {
    /// Fast axis name
    pub x_axis_name: String,
    /// Slow axis name
    pub y_axis_name: String,
    /// Grid extent
    pub bounding_box: BoundingBox,
    /// Number of positions along the fast axis
    pub x_axis_points: u32,
    /// Number of positions along the slow axis
    pub y_axis_points: u32,
    /// Snake through the grid, reversing the fast axis on alternate rows
    pub alternating: bool,
    /// Request hardware-continuous (fly) motion where supported
    pub continuous: bool,
    /// Treat the y axis as the fast (innermost) axis
    pub vertical_orientation: bool,
    /// Maximum jitter, as a percentage of the fast-axis spacing
    pub offset: f64,
    /// Seed for the jitter generator
    pub seed: u64,
}

impl GridPointsRandomOffsetModel {
    /// Create a random-offset grid with zero jitter and seed
    pub fn new(
        x_axis_name: impl Into<String>,
        y_axis_name: impl Into<String>,
        bounding_box: BoundingBox,
        x_axis_points: u32,
        y_axis_points: u32,
    ) -> Self {
        Self {
            x_axis_name: x_axis_name.into(),
            y_axis_name: y_axis_name.into(),
            bounding_box,
            x_axis_points,
            y_axis_points,
            alternating: true,
            continuous: true,
            vertical_orientation: false,
            offset: 0.0,
            seed: 0,
        }
    }
}

/// Archimedean spiral filling a bounding box.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpiralModel {
    /// Fast axis name
    pub x_axis_name: String,
    /// Slow axis name
    pub y_axis_name: String,
    /// Extent the spiral is clipped to
    pub bounding_box: BoundingBox,
    /// Radial growth per turn
    pub scale: f64,
    /// Reverse direction on alternate passes of an enclosing scan
    pub alternating: bool,
    /// Request hardware-continuous (fly) motion where supported
    pub continuous: bool,
}

impl SpiralModel {
    /// Create a spiral with the given scale
    pub fn new(
        x_axis_name: impl Into<String>,
        y_axis_name: impl Into<String>,
        bounding_box: BoundingBox,
        scale: f64,
    ) -> Self {
        Self {
            x_axis_name: x_axis_name.into(),
            y_axis_name: y_axis_name.into(),
            bounding_box,
            scale,
            alternating: false,
            continuous: true,
        }
    }
}

/// Lissajous curve filling a bounding box.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LissajousModel {
    /// Fast axis name
    pub x_axis_name: String,
    /// Slow axis name
    pub y_axis_name: String,
    /// Extent the curve is scaled to
    pub bounding_box: BoundingBox,
    /// Fast-axis frequency parameter
    pub a: f64,
    /// Slow-axis frequency parameter
    pub b: f64,
    /// Number of positions along the curve
    pub points: u32,
    /// Reverse direction on alternate passes of an enclosing scan
    pub alternating: bool,
    /// Request hardware-continuous (fly) motion where supported
    pub continuous: bool,
}

impl LissajousModel {
    /// Create a Lissajous model with the conventional default parameters
    pub fn new(
        x_axis_name: impl Into<String>,
        y_axis_name: impl Into<String>,
        bounding_box: BoundingBox,
    ) -> Self {
        Self {
            x_axis_name: x_axis_name.into(),
            y_axis_name: y_axis_name.into(),
            bounding_box,
            a: 1.0,
            b: 0.25,
            points: 100,
            alternating: false,
            continuous: true,
        }
    }
}

/// Equally-spaced positions along a line segment, by point count.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinePointsModel {
    /// Fast axis name
    pub x_axis_name: String,
    /// Slow axis name
    pub y_axis_name: String,
    /// The traversed segment
    pub bounding_line: BoundingLine,
    /// Number of positions along the segment
    pub points: u32,
    /// Reverse direction on alternate passes of an enclosing scan
    pub alternating: bool,
    /// Request hardware-continuous (fly) motion where supported
    pub continuous: bool,
}

impl LinePointsModel {
    /// Create a line-points model with default axis names
    pub fn new(bounding_line: BoundingLine, points: u32) -> Self {
        Self {
            x_axis_name: "stage_x".into(),
            y_axis_name: "stage_y".into(),
            bounding_line,
            points,
            alternating: false,
            continuous: true,
        }
    }
}

/// Equally-spaced positions along a line segment, by spacing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineStepModel {
    /// Fast axis name
    pub x_axis_name: String,
    /// Slow axis name
    pub y_axis_name: String,
    /// The traversed segment
    pub bounding_line: BoundingLine,
    /// Distance between positions along the segment
    pub step: f64,
    /// Reverse direction on alternate passes of an enclosing scan
    pub alternating: bool,
    /// Request hardware-continuous (fly) motion where supported
    pub continuous: bool,
}

impl LineStepModel {
    /// Create a line-step model with default axis names
    pub fn new(bounding_line: BoundingLine, step: f64) -> Self {
        Self {
            x_axis_name: "stage_x".into(),
            y_axis_name: "stage_y".into(),
            bounding_line,
            step,
            alternating: false,
            continuous: true,
        }
    }
}

/// A single fixed two-axis position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PointSingleModel {
    /// Fast axis name
    pub x_axis_name: String,
    /// Slow axis name
    pub y_axis_name: String,
    /// Fast-axis position
    pub x: f64,
    /// Slow-axis position
    pub y: f64,
}

impl PointSingleModel {
    /// Create a single-point model with default axis names
    pub fn new(x: f64, y: f64) -> Self {
        Self {
            x_axis_name: "stage_x".into(),
            y_axis_name: "stage_y".into(),
            x,
            y,
        }
    }
}

/// One-dimensional axis traversal pattern.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum AxialModel {
    /// Linear stepping
    Step(StepModel),
    /// Explicit position list
    Array(ArrayModel),
    /// One value revisited
    Repeat(RepeatModel),
    /// Concatenated step segments
    MultiStep(MultiStepModel),
}

impl AxialModel {
    /// The scannable axis this model traverses
    pub fn name(&self) -> &str {
        match self {
            AxialModel::Step(m) => &m.name,
            AxialModel::Array(m) => &m.name,
            AxialModel::Repeat(m) => &m.name,
            AxialModel::MultiStep(m) => &m.name,
        }
    }

    /// Whether hardware-continuous motion is requested
    pub fn is_continuous(&self) -> bool {
        match self {
            AxialModel::Step(m) => m.continuous,
            AxialModel::Array(m) => m.continuous,
            AxialModel::Repeat(_) => false,
            AxialModel::MultiStep(m) => m.continuous,
        }
    }
}

/// Two-dimensional area traversal pattern.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum TwoAxisModel {
    /// Point-count grid
    GridPoints(GridPointsModel),
    /// Step-size grid (raster)
    GridStep(GridStepModel),
    /// Jittered point-count grid
    GridPointsRandomOffset(GridPointsRandomOffsetModel),
    /// Archimedean spiral
    Spiral(SpiralModel),
    /// Lissajous curve
    Lissajous(LissajousModel),
    /// Line segment by point count
    LinePoints(LinePointsModel),
    /// Line segment by spacing
    LineStep(LineStepModel),
    /// Single fixed position
    PointSingle(PointSingleModel),
}

impl TwoAxisModel {
    /// Fast axis name
    pub fn x_axis_name(&self) -> &str {
        match self {
            TwoAxisModel::GridPoints(m) => &m.x_axis_name,
            TwoAxisModel::GridStep(m) => &m.x_axis_name,
            TwoAxisModel::GridPointsRandomOffset(m) => &m.x_axis_name,
            TwoAxisModel::Spiral(m) => &m.x_axis_name,
            TwoAxisModel::Lissajous(m) => &m.x_axis_name,
            TwoAxisModel::LinePoints(m) => &m.x_axis_name,
            TwoAxisModel::LineStep(m) => &m.x_axis_name,
            TwoAxisModel::PointSingle(m) => &m.x_axis_name,
        }
    }

    /// Slow axis name
    pub fn y_axis_name(&self) -> &str {
        match self {
            TwoAxisModel::GridPoints(m) => &m.y_axis_name,
            TwoAxisModel::GridStep(m) => &m.y_axis_name,
            TwoAxisModel::GridPointsRandomOffset(m) => &m.y_axis_name,
            TwoAxisModel::Spiral(m) => &m.y_axis_name,
            TwoAxisModel::Lissajous(m) => &m.y_axis_name,
            TwoAxisModel::LinePoints(m) => &m.y_axis_name,
            TwoAxisModel::LineStep(m) => &m.y_axis_name,
            TwoAxisModel::PointSingle(m) => &m.y_axis_name,
        }
    }

    /// The bounding box, for models that carry one
    pub fn bounding_box(&self) -> Option<&BoundingBox> {
        match self {
            TwoAxisModel::GridPoints(m) => Some(&m.bounding_box),
            TwoAxisModel::GridStep(m) => Some(&m.bounding_box),
            TwoAxisModel::GridPointsRandomOffset(m) => Some(&m.bounding_box),
            TwoAxisModel::Spiral(m) => Some(&m.bounding_box),
            TwoAxisModel::Lissajous(m) => Some(&m.bounding_box),
            TwoAxisModel::LinePoints(_) | TwoAxisModel::LineStep(_) | TwoAxisModel::PointSingle(_) => None,
        }
    }

    /// Whether hardware-continuous motion is requested
    pub fn is_continuous(&self) -> bool {
        match self {
            TwoAxisModel::GridPoints(m) => m.continuous,
            TwoAxisModel::GridStep(m) => m.continuous,
            TwoAxisModel::GridPointsRandomOffset(m) => m.continuous,
            TwoAxisModel::Spiral(m) => m.continuous,
            TwoAxisModel::Lissajous(m) => m.continuous,
            TwoAxisModel::LinePoints(m) => m.continuous,
            TwoAxisModel::LineStep(m) => m.continuous,
            TwoAxisModel::PointSingle(_) => false,
        }
    }
}

/// Any scan path model accepted by a compound model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ScanPathModel {
    /// One-dimensional traversal
    Axial(AxialModel),
    /// Two-dimensional traversal
    TwoAxis(TwoAxisModel),
}

impl ScanPathModel {
    /// Names of the scannable axes this model moves, fast axis first
    pub fn axis_names(&self) -> Vec<&str> {
        match self {
            ScanPathModel::Axial(m) => vec![m.name()],
            ScanPathModel::TwoAxis(m) => vec![m.x_axis_name(), m.y_axis_name()],
        }
    }

    /// Whether hardware-continuous motion is requested
    pub fn is_continuous(&self) -> bool {
        match self {
            ScanPathModel::Axial(m) => m.is_continuous(),
            ScanPathModel::TwoAxis(m) => m.is_continuous(),
        }
    }
}

impl From<AxialModel> for ScanPathModel {
    fn from(model: AxialModel) -> Self {
        ScanPathModel::Axial(model)
    }
}

impl From<TwoAxisModel> for ScanPathModel {
    fn from(model: TwoAxisModel) -> Self {
        ScanPathModel::TwoAxis(model)
    }
}

impl From<StepModel> for ScanPathModel {
    fn from(model: StepModel) -> Self {
        ScanPathModel::Axial(AxialModel::Step(model))
    }
}

impl From<ArrayModel> for ScanPathModel {
    fn from(model: ArrayModel) -> Self {
        ScanPathModel::Axial(AxialModel::Array(model))
    }
}

impl From<RepeatModel> for ScanPathModel {
    fn from(model: RepeatModel) -> Self {
        ScanPathModel::Axial(AxialModel::Repeat(model))
    }
}

impl From<MultiStepModel> for ScanPathModel {
    fn from(model: MultiStepModel) -> Self {
        ScanPathModel::Axial(AxialModel::MultiStep(model))
    }
}

impl From<GridPointsModel> for ScanPathModel {
    fn from(model: GridPointsModel) -> Self {
        ScanPathModel::TwoAxis(TwoAxisModel::GridPoints(model))
    }
}

impl From<GridStepModel> for ScanPathModel {
    fn from(model: GridStepModel) -> Self {
        ScanPathModel::TwoAxis(TwoAxisModel::GridStep(model))
    }
}

impl From<GridPointsRandomOffsetModel> for ScanPathModel {
    fn from(model: GridPointsRandomOffsetModel) -> Self {
        ScanPathModel::TwoAxis(TwoAxisModel::GridPointsRandomOffset(model))
    }
}

impl From<SpiralModel> for ScanPathModel {
    fn from(model: SpiralModel) -> Self {
        ScanPathModel::TwoAxis(TwoAxisModel::Spiral(model))
    }
}

impl From<LissajousModel> for ScanPathModel {
    fn from(model: LissajousModel) -> Self {
        ScanPathModel::TwoAxis(TwoAxisModel::Lissajous(model))
    }
}

impl From<LinePointsModel> for ScanPathModel {
    fn from(model: LinePointsModel) -> Self {
        ScanPathModel::TwoAxis(TwoAxisModel::LinePoints(model))
    }
}

impl From<LineStepModel> for ScanPathModel {
    fn from(model: LineStepModel) -> Self {
        ScanPathModel::TwoAxis(TwoAxisModel::LineStep(model))
    }
}

impl From<PointSingleModel> for ScanPathModel {
    fn from(model: PointSingleModel) -> Self {
        ScanPathModel::TwoAxis(TwoAxisModel::PointSingle(model))
    }
}
