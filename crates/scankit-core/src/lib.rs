//! # ScanKit Core
//!
//! Value types and assembly logic for beamline mapping-scan requests:
//! scan path models, regions of interest, detector models, the compound
//! model and the [`ScanRequest`] aggregate with its builder.
//!
//! This crate is pure, synchronous data transformation: build once, read or
//! render afterwards. Point generation, request validation and execution
//! happen in external services behind the queue interface.

pub mod detector;
pub mod error;
pub mod points;
pub mod request;

pub use detector::{
    ClusterProcessingModel, DetectorModel, DummyMalcolmModel, MandelbrotModel, UNTIMED_EXPOSURE,
};

pub use error::{Error, ParseError, RenderError, RequestError, Result, SubmitError};

pub use points::{
    compound::{CompoundModel, RegionBinding},
    roi::Roi,
    ArrayModel, AxialModel, BoundingBox, BoundingLine, GridPointsModel,
    GridPointsRandomOffsetModel, GridStepModel, LinePointsModel, LineStepModel, LissajousModel,
    MultiStepModel, PointSingleModel, RepeatModel, ScanPathModel, SpiralModel, StepModel,
    TwoAxisModel,
};

pub use request::{
    builder::ScanRequestBuilder, MetadataType, MetadataValue, Position, ProcessingRequest,
    SampleData, ScanMetadata, ScanRequest, ScriptRequest,
};
