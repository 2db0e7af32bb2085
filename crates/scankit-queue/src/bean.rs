//! Status beans published while a submitted scan runs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use scankit_core::points::{AxialModel, ScanPathModel, TwoAxisModel};
use scankit_core::request::ScanRequest;

/// Lifecycle state of a submitted scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Status {
    /// Accepted onto the queue, not yet started
    Submitted,
    /// Devices are being configured
    Preparing,
    /// Points are being collected
    Running,
    /// Paused by an operator
    Paused,
    /// Finished normally
    Complete,
    /// Aborted by an operator
    Terminated,
    /// Finished abnormally
    Failed,
}

impl Status {
    /// Whether this state ends the scan's lifecycle
    pub fn is_final(self) -> bool {
        matches!(self, Status::Complete | Status::Terminated | Status::Failed)
    }

    /// Whether the scan is actively consuming beam time
    pub fn is_active(self) -> bool {
        matches!(self, Status::Preparing | Status::Running | Status::Paused)
    }
}

/// Progress snapshot of one submitted scan.
///
/// A bean is created when a request is accepted and republished with updated
/// `status`/`position` as the scan advances. `unique_id` ties every
/// republication to the original submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanBean {
    /// Identifier assigned at submission
    pub unique_id: Uuid,
    /// Human-readable scan name
    pub name: String,
    /// Current lifecycle state
    pub status: Status,
    /// Points collected so far
    pub position: u64,
    /// Total points expected, 0 when unknown
    pub size: u64,
    /// Operator-facing status message
    pub message: Option<String>,
    /// When the request was accepted
    pub submit_time: DateTime<Utc>,
    /// The request being executed
    pub request: ScanRequest,
}

impl ScanBean {
    /// Create a bean for a freshly accepted request.
    ///
    /// The size is estimated from the request's path models; scans whose
    /// point count cannot be determined up front report a size of 0.
    pub fn new(name: impl Into<String>, request: ScanRequest) -> Self {
        let size = estimate_points(&request);
        Self {
            unique_id: Uuid::new_v4(),
            name: name.into(),
            status: Status::Submitted,
            position: 0,
            size,
            message: None,
            submit_time: Utc::now(),
            request,
        }
    }

    /// Fraction of the scan completed, `None` when the size is unknown
    pub fn completion(&self) -> Option<f64> {
        if self.size == 0 {
            return None;
        }
        Some(self.position as f64 / self.size as f64)
    }
}

/// One status-topic message: the republished bean.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScanEvent {
    /// The scan's progress snapshot at publication time
    pub bean: ScanBean,
}

/// Best-effort point count of a request, the product of the per-model
/// counts. Models whose count depends on the point-generator service
/// contribute a factor of 1; a request with no countable model yields 0.
pub fn estimate_points(request: &ScanRequest) -> u64 {
    let models = request.compound_model().models();
    if models.is_empty() {
        return 0;
    }
    let mut total: u64 = 1;
    let mut countable = false;
    for model in models {
        let count = match model {
            ScanPathModel::Axial(AxialModel::Step(m)) => m.point_count().map(|c| c as u64),
            ScanPathModel::Axial(AxialModel::Array(m)) => Some(m.positions.len() as u64),
            ScanPathModel::Axial(AxialModel::Repeat(m)) => Some(m.count as u64),
            ScanPathModel::Axial(AxialModel::MultiStep(m)) => m
                .step_models
                .iter()
                .map(|s| s.point_count().map(|c| c as u64))
                .sum::<Option<u64>>(),
            ScanPathModel::TwoAxis(TwoAxisModel::GridPoints(m)) => Some(m.point_count() as u64),
            ScanPathModel::TwoAxis(TwoAxisModel::GridPointsRandomOffset(m)) => {
                Some(m.x_axis_points as u64 * m.y_axis_points as u64)
            }
            ScanPathModel::TwoAxis(TwoAxisModel::Lissajous(m)) => Some(m.points as u64),
            ScanPathModel::TwoAxis(TwoAxisModel::LinePoints(m)) => Some(m.points as u64),
            ScanPathModel::TwoAxis(TwoAxisModel::PointSingle(_)) => Some(1),
            // Step-size grids, step lines and spirals resolve their counts
            // in the point-generator service
            ScanPathModel::TwoAxis(TwoAxisModel::GridStep(_))
            | ScanPathModel::TwoAxis(TwoAxisModel::LineStep(_))
            | ScanPathModel::TwoAxis(TwoAxisModel::Spiral(_)) => None,
        };
        if let Some(count) = count {
            total = total.saturating_mul(count);
            countable = true;
        }
    }
    if countable {
        total
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scankit_core::points::compound::CompoundModel;
    use scankit_core::points::{BoundingBox, GridPointsModel, GridStepModel, StepModel};

    fn request_of(models: Vec<ScanPathModel>) -> ScanRequest {
        ScanRequest::new(CompoundModel::with_models(models))
    }

    #[test]
    fn final_and_active_states_partition() {
        assert!(Status::Complete.is_final());
        assert!(Status::Failed.is_final());
        assert!(!Status::Running.is_final());
        assert!(Status::Running.is_active());
        assert!(Status::Paused.is_active());
        assert!(!Status::Submitted.is_active());
    }

    #[test]
    fn size_multiplies_nested_model_counts() {
        let request = request_of(vec![
            StepModel::new("energy", 0.0, 10.0, 1.0).into(),
            GridPointsModel::new("x", "y", BoundingBox::new(0.0, 0.0, 1.0, 1.0), 5, 4).into(),
        ]);
        // 11 energy points times a 5x4 grid
        assert_eq!(estimate_points(&request), 220);
    }

    #[test]
    fn unknown_counts_do_not_zero_the_estimate() {
        let request = request_of(vec![
            StepModel::new("energy", 0.0, 10.0, 1.0).into(),
            GridStepModel::new("x", "y", BoundingBox::new(0.0, 0.0, 1.0, 1.0), 0.1, 0.1).into(),
        ]);
        assert_eq!(estimate_points(&request), 11);
    }

    #[test]
    fn fully_unknown_request_reports_zero() {
        let request = request_of(vec![GridStepModel::new(
            "x",
            "y",
            BoundingBox::new(0.0, 0.0, 1.0, 1.0),
            0.1,
            0.1,
        )
        .into()]);
        let bean = ScanBean::new("raster", request);
        assert_eq!(bean.size, 0);
        assert_eq!(bean.completion(), None);
    }

    #[test]
    fn bean_starts_submitted_at_position_zero() {
        let request = request_of(vec![StepModel::new("fred", 0.0, 10.0, 1.0).into()]);
        let bean = ScanBean::new("fred scan", request);
        assert_eq!(bean.status, Status::Submitted);
        assert_eq!(bean.position, 0);
        assert_eq!(bean.size, 11);
    }

    #[test]
    fn bean_serializes_with_java_style_names() {
        let request = request_of(vec![StepModel::new("fred", 0.0, 10.0, 1.0).into()]);
        let bean = ScanBean::new("fred scan", request);
        let json = serde_json::to_value(&bean).unwrap();
        assert!(json.get("uniqueId").is_some());
        assert!(json.get("submitTime").is_some());
        assert_eq!(json["status"], "Submitted");
    }
}
