//! # ScanKit
//!
//! A Rust toolkit for building, rendering and submitting beamline
//! mapping-scan requests:
//! - Typed scan path models (step, array, grids, lines, spiral, Lissajous)
//!   with regions of interest and detector configuration
//! - A `ScanRequest` aggregate with a fluent and map-driven builder
//! - Two-way mapping between requests and the mapping-scan DSL, in concise
//!   and verbose registers
//! - A submission interface with scan beans, status events and an
//!   in-process loopback broker
//!
//! ## Architecture
//!
//! ScanKit is organized as a workspace with multiple crates:
//!
//! 1. **scankit-core** - Scan models, regions, detectors, requests, builder
//! 2. **scankit-script** - DSL rendering and parsing
//! 3. **scankit-queue** - Submission interface and status beans
//! 4. **scankit** - This facade, re-exporting the public surface
//!
//! ## Example
//!
//! ```
//! use scankit::{parse_request, ExpressionFactory, ScanRequestBuilder, StepModel};
//!
//! let request = ScanRequestBuilder::new(StepModel::new("fred", 0.0, 10.0, 1.0))
//!     .with_file_path("/scratch/scan_001.nxs")
//!     .build()?;
//!
//! let script = ExpressionFactory::concise().request_expression(&request)?;
//! assert_eq!(parse_request(&script)?, request);
//! # Ok::<(), anyhow::Error>(())
//! ```

pub use scankit_core::{
    ArrayModel, AxialModel, BoundingBox, BoundingLine, ClusterProcessingModel, CompoundModel,
    DetectorModel, DummyMalcolmModel, Error, GridPointsModel, GridPointsRandomOffsetModel,
    GridStepModel, LinePointsModel, LineStepModel, LissajousModel, MandelbrotModel, MetadataType,
    MetadataValue, MultiStepModel, ParseError, PointSingleModel, Position, ProcessingRequest,
    RegionBinding, RenderError, RepeatModel, RequestError, Result, Roi, SampleData, ScanMetadata,
    ScanPathModel, ScanRequest, ScanRequestBuilder, ScriptRequest, SpiralModel, StepModel,
    SubmitError, TwoAxisModel, UNTIMED_EXPOSURE,
};

pub use scankit_script::{
    parse_detector, parse_path, parse_request, parse_roi, ExpressionFactory, Register,
};

pub use scankit_queue::{estimate_points, InProcessQueue, ScanBean, ScanEvent, Status, Submitter};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Initialize logging with the default configuration
///
/// Sets up structured logging with:
/// - Console output with pretty formatting
/// - RUST_LOG environment variable support
pub fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into());

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stdout)
        .with_target(true)
        .with_level(true)
        .pretty();

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();

    Ok(())
}
