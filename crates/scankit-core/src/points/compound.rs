//! Compound scan models
//!
//! A compound model is an ordered aggregate of scan path models plus their
//! region-of-interest associations. The model order defines the nested-loop
//! order of the scan, outer-to-inner: the fast axis comes last.

use serde::{Deserialize, Serialize};

use super::roi::Roi;
use super::ScanPathModel;

/// Association between one model of a compound scan and the regions that
/// restrict it.
///
/// Models are referenced by their index in the owning compound model. The
/// binding is stored data only; geometric resolution belongs to the external
/// point-generator service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegionBinding {
    /// Index of the restricted model within the compound model
    pub model: usize,
    /// Regions restricting that model
    pub rois: Vec<Roi>,
}

/// Ordered aggregate of scan path models and their region bindings.
///
/// A compound model inside a submitted scan request is never empty; the
/// request builder guarantees this by requiring a path model up front.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompoundModel {
    models: Vec<ScanPathModel>,
    regions: Vec<RegionBinding>,
}

impl CompoundModel {
    /// Create an empty compound model
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a compound model from models only, with no region bindings
    pub fn with_models(models: impl IntoIterator<Item = ScanPathModel>) -> Self {
        Self {
            models: models.into_iter().collect(),
            regions: Vec::new(),
        }
    }

    /// Append a model with no associated regions
    pub fn add_model(&mut self, model: impl Into<ScanPathModel>) {
        self.models.push(model.into());
    }

    /// Append a model together with the regions restricting it.
    ///
    /// An empty `rois` list records no binding, matching `add_model`.
    pub fn add_data(&mut self, model: impl Into<ScanPathModel>, rois: Vec<Roi>) {
        let index = self.models.len();
        self.models.push(model.into());
        if !rois.is_empty() {
            self.regions.push(RegionBinding { model: index, rois });
        }
    }

    /// The models in outer-to-inner order, as provided
    pub fn models(&self) -> &[ScanPathModel] {
        &self.models
    }

    /// All region bindings
    pub fn regions(&self) -> &[RegionBinding] {
        &self.regions
    }

    /// Regions bound to the model at `index`, empty when unrestricted
    pub fn rois_for(&self, index: usize) -> &[Roi] {
        self.regions
            .iter()
            .find(|binding| binding.model == index)
            .map(|binding| binding.rois.as_slice())
            .unwrap_or(&[])
    }

    /// Whether this compound model holds no models at all
    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::points::{GridPointsModel, StepModel};

    #[test]
    fn models_keep_insertion_order() {
        let mut compound = CompoundModel::new();
        compound.add_model(StepModel::new("outer", 0.0, 10.0, 1.0));
        compound.add_model(StepModel::new("inner", 0.0, 5.0, 1.0));

        let names: Vec<_> = compound
            .models()
            .iter()
            .flat_map(|m| m.axis_names())
            .collect();
        assert_eq!(names, vec!["outer", "inner"]);
    }

    #[test]
    fn rois_follow_their_model() {
        let mut compound = CompoundModel::new();
        compound.add_model(StepModel::new("energy", 0.0, 10.0, 1.0));
        compound.add_data(
            GridPointsModel::default(),
            vec![Roi::circle((4.0, 6.0), 5.0)],
        );

        assert!(compound.rois_for(0).is_empty());
        assert_eq!(compound.rois_for(1).len(), 1);
    }

    #[test]
    fn empty_roi_list_records_no_binding() {
        let mut compound = CompoundModel::new();
        compound.add_data(GridPointsModel::default(), Vec::new());
        assert!(compound.regions().is_empty());
    }
}
