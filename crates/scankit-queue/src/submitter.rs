//! Submission interface and the in-process loopback broker.

use async_trait::async_trait;
use tokio::sync::broadcast;
use tracing::{debug, info};

use scankit_core::error::SubmitError;
use scankit_core::request::ScanRequest;

use crate::bean::{ScanBean, ScanEvent, Status};

/// Capacity of the status-event channel; slow subscribers lag rather than
/// block the broker.
const EVENT_CHANNEL_CAPACITY: usize = 256;

/// Accepts scan requests for execution and publishes progress events.
#[async_trait]
pub trait Submitter: Send + Sync {
    /// Queue a request and return immediately with its submission bean.
    async fn submit(&self, name: &str, request: ScanRequest) -> Result<ScanBean, SubmitError>;

    /// Queue a request and wait for it to reach a final state, returning the
    /// final bean.
    async fn blocking_submit(
        &self,
        name: &str,
        request: ScanRequest,
    ) -> Result<ScanBean, SubmitError>;

    /// Subscribe to the status topic. Events published before the call are
    /// not replayed.
    fn subscribe(&self) -> broadcast::Receiver<ScanEvent>;
}

/// Loopback broker executing submissions in-process.
///
/// Stands in for the remote execution service in tests and offline tooling:
/// it runs no hardware, but walks each accepted scan through the same
/// lifecycle a real broker would publish. Requests are marshalled before
/// acceptance so anything that cannot reach a real broker fails here too.
#[derive(Debug)]
pub struct InProcessQueue {
    queue: String,
    events: broadcast::Sender<ScanEvent>,
    closed: std::sync::atomic::AtomicBool,
}

impl InProcessQueue {
    /// Create a broker for the given submission queue name
    pub fn new(queue: impl Into<String>) -> Self {
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self {
            queue: queue.into(),
            events,
            closed: std::sync::atomic::AtomicBool::new(false),
        }
    }

    /// The submission queue name
    pub fn queue_name(&self) -> &str {
        &self.queue
    }

    /// Stop accepting submissions; scans already accepted keep running
    pub fn close(&self) {
        self.closed.store(true, std::sync::atomic::Ordering::SeqCst);
        info!(queue = %self.queue, "submission queue closed");
    }

    /// Whether [`close`](InProcessQueue::close) has been called
    pub fn is_closed(&self) -> bool {
        self.closed.load(std::sync::atomic::Ordering::SeqCst)
    }

    /// Validate a request and wrap it in a submission bean.
    fn accept(&self, name: &str, request: ScanRequest) -> Result<ScanBean, SubmitError> {
        if self.is_closed() {
            return Err(SubmitError::QueueClosed {
                queue: self.queue.clone(),
            });
        }
        if request.compound_model().is_empty() {
            return Err(SubmitError::Rejected {
                reason: "scan request has no path models".into(),
            });
        }
        // A request that cannot be marshalled could never reach a broker
        serde_json::to_string(&request)?;

        let bean = ScanBean::new(name, request);
        debug!(
            queue = %self.queue,
            scan = %bean.unique_id,
            size = bean.size,
            "accepted scan request"
        );
        self.publish(&bean);
        Ok(bean)
    }

    fn publish(&self, bean: &ScanBean) {
        publish(&self.events, bean);
    }
}

fn publish(events: &broadcast::Sender<ScanEvent>, bean: &ScanBean) {
    // No subscribers is not an error for a broker
    let _ = events.send(ScanEvent { bean: bean.clone() });
}

/// Walk one accepted scan through its lifecycle, publishing each state.
fn run_scan(events: &broadcast::Sender<ScanEvent>, queue: &str, mut bean: ScanBean) -> ScanBean {
    bean.status = Status::Preparing;
    publish(events, &bean);

    bean.status = Status::Running;
    publish(events, &bean);

    if bean.size > 0 {
        // Coarse progress: quarter-scan updates
        for quarter in 1..=4 {
            bean.position = bean.size * quarter / 4;
            publish(events, &bean);
        }
    }

    bean.status = Status::Complete;
    bean.message = Some("Scan complete".into());
    publish(events, &bean);
    info!(queue = %queue, scan = %bean.unique_id, "scan complete");
    bean
}

#[async_trait]
impl Submitter for InProcessQueue {
    async fn submit(&self, name: &str, request: ScanRequest) -> Result<ScanBean, SubmitError> {
        let bean = self.accept(name, request)?;
        let events = self.events.clone();
        let queue = self.queue.clone();
        let running = bean.clone();
        tokio::spawn(async move {
            run_scan(&events, &queue, running);
        });
        Ok(bean)
    }

    async fn blocking_submit(
        &self,
        name: &str,
        request: ScanRequest,
    ) -> Result<ScanBean, SubmitError> {
        let bean = self.accept(name, request)?;
        Ok(run_scan(&self.events, &self.queue, bean))
    }

    fn subscribe(&self) -> broadcast::Receiver<ScanEvent> {
        self.events.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scankit_core::points::compound::CompoundModel;
    use scankit_core::points::StepModel;

    fn request() -> ScanRequest {
        ScanRequest::new(CompoundModel::with_models([StepModel::new(
            "fred", 0.0, 10.0, 1.0,
        )
        .into()]))
    }

    #[tokio::test]
    async fn blocking_submit_returns_a_complete_bean() {
        let queue = InProcessQueue::new("submission.queue");
        let bean = queue.blocking_submit("fred scan", request()).await.unwrap();
        assert_eq!(bean.status, Status::Complete);
        assert_eq!(bean.position, bean.size);
        assert_eq!(bean.size, 11);
    }

    #[tokio::test]
    async fn events_walk_the_lifecycle_in_order() {
        let queue = InProcessQueue::new("submission.queue");
        let mut events = queue.subscribe();
        let final_bean = queue.blocking_submit("fred scan", request()).await.unwrap();

        let mut statuses = Vec::new();
        while let Ok(event) = events.try_recv() {
            assert_eq!(event.bean.unique_id, final_bean.unique_id);
            statuses.push(event.bean.status);
        }
        assert_eq!(statuses.first(), Some(&Status::Submitted));
        assert_eq!(statuses.last(), Some(&Status::Complete));
        let running_from = statuses
            .iter()
            .position(|s| *s == Status::Running)
            .unwrap();
        assert!(statuses[..running_from]
            .iter()
            .all(|s| matches!(s, Status::Submitted | Status::Preparing)));
    }

    #[tokio::test]
    async fn positions_never_move_backwards() {
        let queue = InProcessQueue::new("submission.queue");
        let mut events = queue.subscribe();
        queue.blocking_submit("fred scan", request()).await.unwrap();

        let mut last = 0;
        while let Ok(event) = events.try_recv() {
            assert!(event.bean.position >= last);
            last = event.bean.position;
        }
        assert_eq!(last, 11);
    }

    #[tokio::test]
    async fn closed_queue_rejects_submissions() {
        let queue = InProcessQueue::new("submission.queue");
        queue.close();
        let err = queue.submit("fred scan", request()).await.unwrap_err();
        assert!(matches!(err, SubmitError::QueueClosed { queue } if queue == "submission.queue"));
    }

    #[tokio::test]
    async fn empty_request_is_rejected() {
        let queue = InProcessQueue::new("submission.queue");
        let empty = ScanRequest::new(CompoundModel::new());
        let err = queue.blocking_submit("empty", empty).await.unwrap_err();
        assert!(matches!(err, SubmitError::Rejected { .. }));
    }

    #[tokio::test]
    async fn nonblocking_submit_returns_submitted_bean() {
        let queue = InProcessQueue::new("submission.queue");
        let bean = queue.submit("fred scan", request()).await.unwrap();
        assert_eq!(bean.status, Status::Submitted);
        assert_eq!(bean.position, 0);
    }
}
