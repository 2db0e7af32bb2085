//! End-to-end flow: script text to typed request to submission events.

use scankit::{
    parse_request, ExpressionFactory, GridPointsModel, InProcessQueue, MandelbrotModel,
    BoundingBox, ScanRequestBuilder, Status, StepModel, Submitter,
};

#[tokio::test]
async fn script_to_submission() {
    let request = parse_request(
        "mscan(grid(('stage_x', 'stage_y'), (0, 0), (10, 10), count=(5, 5), True, True, False), \
         ['beam_current'], det=[detector('mandelbrot', 0.1)], file='/scratch/map_001.nxs')",
    )
    .unwrap();

    let queue = InProcessQueue::new("submission.queue");
    let mut events = queue.subscribe();
    let bean = queue.blocking_submit("mapping scan", request).await.unwrap();

    assert_eq!(bean.status, Status::Complete);
    assert_eq!(bean.size, 25);
    assert_eq!(bean.request.file_path.as_deref(), Some("/scratch/map_001.nxs"));

    let first = events.try_recv().unwrap();
    assert_eq!(first.bean.status, Status::Submitted);
}

#[tokio::test]
async fn built_request_round_trips_through_script() {
    let mut grid = GridPointsModel::new(
        "stage_x",
        "stage_y",
        BoundingBox::new(0.0, 0.0, 10.0, 10.0),
        5,
        5,
    );
    grid.alternating = false;
    let request = ScanRequestBuilder::new(grid)
        .with_detector("mandelbrot", MandelbrotModel::new("mandelbrot", 0.1))
        .with_monitor_names_per_point(vec!["beam_current".into()])
        .build()
        .unwrap();

    for factory in [ExpressionFactory::concise(), ExpressionFactory::verbose()] {
        let script = factory.request_expression(&request).unwrap();
        assert_eq!(parse_request(&script).unwrap(), request);
    }
}

#[tokio::test]
async fn submitted_request_survives_marshalling() {
    let request = ScanRequestBuilder::new(StepModel::new("energy", 1200.0, 1300.0, 5.0))
        .build()
        .unwrap();

    let queue = InProcessQueue::new("submission.queue");
    let bean = queue.blocking_submit("energy scan", request.clone()).await.unwrap();

    // The bean carries the request unchanged through a JSON round trip
    let json = serde_json::to_string(&bean).unwrap();
    let restored: scankit::ScanBean = serde_json::from_str(&json).unwrap();
    assert_eq!(restored.request, request);
}
