use serde::{Deserialize, Serialize};

use crate::landmarks::domain::landmark_set::LandmarkSet;
use crate::rendering::domain::graphics_layer::GraphicsLayer;
use crate::shared::frame::Frame;
use crate::shared::point::PointF;

/// Numeric feature output: one list of landmark coordinates per face.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PointListOutput {
    lists: Vec<Vec<PointF>>,
}

impl PointListOutput {
    pub fn clear(&mut self) {
        self.lists.clear();
    }

    pub fn add_value_list(&mut self, landmarks: &LandmarkSet) {
        self.lists.push(landmarks.points().to_vec());
    }

    pub fn value_lists(&self) -> &[Vec<PointF>] {
        &self.lists
    }

    pub fn len(&self) -> usize {
        self.lists.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lists.is_empty()
    }
}

/// Everything one run of the landmark task produces.
///
/// `graphics` and `points` are `None` when the predictor did not fit (no
/// faces); the image is forwarded either way.
#[derive(Clone, Debug)]
pub struct FacemarkOutput {
    pub image: Frame,
    pub graphics: Option<GraphicsLayer>,
    pub points: Option<PointListOutput>,
}

impl FacemarkOutput {
    pub fn has_landmarks(&self) -> bool {
        self.points.is_some()
    }

    /// Number of faces with landmarks.
    pub fn face_count(&self) -> usize {
        self.points.as_ref().map_or(0, PointListOutput::len)
    }
}
