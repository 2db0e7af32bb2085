//! Fixture and round-trip tests for the DSL surface.
//!
//! The literal fixtures pin the exact rendered text for representative
//! models; the round-trip tests assert that parsing the rendered text in
//! either register reconstructs an equal model.

use proptest::prelude::*;
use scankit_core::detector::{ClusterProcessingModel, DetectorModel, MandelbrotModel};
use scankit_core::points::compound::CompoundModel;
use scankit_core::points::roi::Roi;
use scankit_core::points::{
    ArrayModel, BoundingBox, BoundingLine, GridPointsModel, GridPointsRandomOffsetModel,
    LinePointsModel, LissajousModel, MultiStepModel, ScanPathModel, SpiralModel, StepModel,
};
use scankit_core::request::{MetadataType, MetadataValue, ProcessingRequest, ScanMetadata, ScanRequest};
use scankit_script::{parse_detector, parse_path, parse_request, ExpressionFactory};

fn round_trip_path(model: ScanPathModel, rois: Vec<Roi>) {
    for factory in [ExpressionFactory::concise(), ExpressionFactory::verbose()] {
        let text = factory.path_expression(&model, &rois).unwrap();
        let (parsed, parsed_rois) = parse_path(&text).unwrap();
        assert_eq!(parsed, model, "register {:?}: {text}", factory.register());
        assert_eq!(parsed_rois, rois, "register {:?}: {text}", factory.register());
    }
}

#[test]
fn step_fixture_strings() {
    let model: ScanPathModel = StepModel::new("fred", 0.0, 10.0, 1.0).into();
    assert_eq!(
        ExpressionFactory::concise().path_expression(&model, &[]).unwrap(),
        "step('fred', 0.0, 10.0, 1.0, False, True)"
    );
    assert_eq!(
        ExpressionFactory::verbose().path_expression(&model, &[]).unwrap(),
        "step(axis='fred', start=0.0, stop=10.0, step=1.0, alternating=False, continuous=True)"
    );
    round_trip_path(model, Vec::new());
}

#[test]
fn empty_multi_step_fixture() {
    let model: ScanPathModel = MultiStepModel::new("fred").into();
    assert_eq!(
        ExpressionFactory::concise().path_expression(&model, &[]).unwrap(),
        "mstep('fred', [], False, False)"
    );
    round_trip_path(model, Vec::new());
}

#[test]
fn array_fixtures() {
    let single: ScanPathModel = ArrayModel::new("fred", vec![0.1]).into();
    assert_eq!(
        ExpressionFactory::concise().path_expression(&single, &[]).unwrap(),
        "val('fred', 0.1)"
    );
    round_trip_path(single, Vec::new());

    let double: ScanPathModel = ArrayModel::new("fred", vec![0.1, 0.2]).into();
    assert_eq!(
        ExpressionFactory::concise().path_expression(&double, &[]).unwrap(),
        "array('fred', [0.1, 0.2], False, True)"
    );
    round_trip_path(double, Vec::new());
}

#[test]
fn grid_fixture_string() {
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
        ExpressionFactory::concise().path_expression(&model, &[]).unwrap(),
        "grid(('myFast', 'mySlow'), (0, 1), (10, 12), count=(3, 4), True, True, False)"
    );
    round_trip_path(model, Vec::new());
}

#[test]
fn cluster_processing_detector_fixture() {
    let model: DetectorModel =
        ClusterProcessingModel::new("processing", "mandelbrot", "/tmp/something.nxs").into();
    let text = ExpressionFactory::verbose().detector_expression(&model).unwrap();
    assert_eq!(
        text,
        "detector('processing', -1.0, detectorName='mandelbrot', processingFilePath='/tmp/something.nxs', xmx='1024m', timeOut=600000, numberOfCores=1, monitorForOverwrite=False)"
    );
    assert_eq!(parse_detector(&text).unwrap(), model);

    // Concise drops the defaulted fields but keeps the pipeline ones
    let concise = ExpressionFactory::concise().detector_expression(&model).unwrap();
    assert_eq!(
        concise,
        "detector('processing', -1.0, detectorName='mandelbrot', processingFilePath='/tmp/something.nxs')"
    );
    assert_eq!(parse_detector(&concise).unwrap(), model);
}

#[test]
fn mandelbrot_detector_round_trips_non_default_fields() {
    let mut mandelbrot = MandelbrotModel::new("mandelbrot", 0.1);
    mandelbrot.max_iterations = 1000;
    mandelbrot.enable_noise = true;
    let model: DetectorModel = mandelbrot.into();
    for factory in [ExpressionFactory::concise(), ExpressionFactory::verbose()] {
        let text = factory.detector_expression(&model).unwrap();
        assert_eq!(parse_detector(&text).unwrap(), model);
    }
}

#[test]
fn grid_with_regions_round_trips() {
    let grid: ScanPathModel = GridPointsModel::new(
        "stage_x",
        "stage_y",
        BoundingBox::new(0.0, 0.0, 10.0, 10.0),
        20,
        20,
    )
    .into();
    round_trip_path(
        grid,
        vec![
            Roi::circle((5.0, 5.0), 3.0),
            Roi::rectangle((1.0, 1.0), (2.0, 2.0), 0.0),
            Roi::polygon(vec![(0.0, 0.0), (4.0, 0.0), (2.0, 3.0)]),
        ],
    );
}

#[test]
fn random_offset_grid_round_trips_jitter() {
    let mut grid = GridPointsRandomOffsetModel::new(
        "stage_x",
        "stage_y",
        BoundingBox::new(0.0, 0.0, 5.0, 5.0),
        10,
        10,
    );
    grid.offset = 12.5;
    grid.seed = 42;
    round_trip_path(grid.into(), vec![Roi::circle((2.0, 2.0), 1.5)]);
}

#[test]
fn line_spiral_and_lissajous_round_trip() {
    let line: ScanPathModel =
        LinePointsModel::new(BoundingLine::new((0.0, 2.0), 5.5, 0.75), 10).into();
    round_trip_path(line, Vec::new());

    let spiral: ScanPathModel = SpiralModel::new(
        "stage_x",
        "stage_y",
        BoundingBox::new(0.0, 0.0, 4.0, 4.0),
        2.5,
    )
    .into();
    round_trip_path(spiral, Vec::new());

    let lissajous: ScanPathModel = LissajousModel::new(
        "stage_x",
        "stage_y",
        BoundingBox::new(-2.0, -2.0, 4.0, 4.0),
    )
    .into();
    round_trip_path(lissajous, Vec::new());
}

#[test]
fn full_request_round_trips_in_both_registers() {
    let mut compound = CompoundModel::new();
    compound.add_model(StepModel::new("energy", 1200.0, 1300.0, 5.0));
    compound.add_data(
        GridPointsModel::new(
            "stage_x",
            "stage_y",
            BoundingBox::new(0.0, 0.0, 10.0, 10.0),
            5,
            5,
        ),
        vec![Roi::circle((5.0, 5.0), 4.0)],
    );
    let mut request = ScanRequest::new(compound);
    request.put_detector("mandelbrot", MandelbrotModel::new("mandelbrot", 0.1));
    request.put_detector(
        "processing",
        ClusterProcessingModel::new("processing", "mandelbrot", "/tmp/something.nxs"),
    );
    request.monitor_names_per_point = vec!["beam_current".into()];
    request.monitor_names_per_scan = vec!["ring_energy".into()];
    request.file_path = Some("/scratch/scan_001.nxs".into());
    request.ignore_preprocess = true;
    let mut metadata = ScanMetadata::new(MetadataType::Sample);
    metadata.add_field("name", MetadataValue::Text("quartz".into()));
    metadata.add_field("temperature", MetadataValue::Number(291.5));
    request.add_metadata(metadata);
    let mut processing = ProcessingRequest::new();
    processing.add("fit", "/cfg/fit.nxs");
    request.processing_request = Some(processing);

    for factory in [ExpressionFactory::concise(), ExpressionFactory::verbose()] {
        let text = factory.request_expression(&request).unwrap();
        let parsed = parse_request(&text).unwrap();
        assert_eq!(parsed, request, "register {:?}: {text}", factory.register());
    }
}

#[test]
fn allow_preprocess_survives_the_round_trip() {
    let mut request = ScanRequest::new(CompoundModel::with_models([StepModel::new(
        "fred", 0.0, 1.0, 0.1,
    )
    .into()]));
    request.ignore_preprocess = false;

    let text = ExpressionFactory::concise().request_expression(&request).unwrap();
    assert!(text.contains("allow_preprocess=True"));
    assert!(!parse_request(&text).unwrap().ignore_preprocess);
}

proptest! {
    #[test]
    fn step_models_round_trip(
        name in "[a-z][a-z0-9_]{0,11}",
        start in -1000.0f64..1000.0,
        stop in -1000.0f64..1000.0,
        step in -10.0f64..10.0,
        alternating: bool,
        continuous: bool,
    ) {
        let mut model = StepModel::new(name, start, stop, step);
        model.alternating = alternating;
        model.continuous = continuous;
        round_trip_path(model.into(), Vec::new());
    }

    // Corner coordinates stay integral so the rendered (start, stop) pair
    // reconstructs the stored length without floating-point drift.
    #[test]
    fn grids_round_trip_on_integral_corners(
        x0 in -100i32..100,
        y0 in -100i32..100,
        width in 1i32..100,
        height in 1i32..100,
        nx in 1u32..50,
        ny in 1u32..50,
        alternating: bool,
        vertical in proptest::bool::ANY,
    ) {
        let mut grid = GridPointsModel::new(
            "stage_x",
            "stage_y",
            BoundingBox::new(x0 as f64, y0 as f64, width as f64, height as f64),
            nx,
            ny,
        );
        grid.alternating = alternating;
        grid.vertical_orientation = vertical;
        round_trip_path(grid.into(), Vec::new());
    }

    #[test]
    fn array_models_round_trip(
        name in "[a-z][a-z0-9_]{0,11}",
        positions in proptest::collection::vec(-1000.0f64..1000.0, 1..8),
    ) {
        round_trip_path(ArrayModel::new(name, positions).into(), Vec::new());
    }
}
