//! Landmark points predicted for one face, plus the 68-point layout.
//!
//! Only the 68-point scheme gives indices a fixed meaning; other counts are
//! treated as an unordered cloud of keypoints.

use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

use crate::shared::constants::FACE_68_LANDMARK_COUNT;
use crate::shared::point::PointF;

/// A named run of consecutive landmarks in the 68-point scheme.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FaceFeature {
    pub name: &'static str,
    pub first: usize,
    pub last: usize,
    /// Closed features join the last point back to the first.
    pub closed: bool,
}

impl FaceFeature {
    const fn open(name: &'static str, first: usize, last: usize) -> Self {
        Self {
            name,
            first,
            last,
            closed: false,
        }
    }

    const fn closed(name: &'static str, first: usize, last: usize) -> Self {
        Self {
            name,
            first,
            last,
            closed: true,
        }
    }

    pub fn indices(&self) -> RangeInclusive<usize> {
        self.first..=self.last
    }
}

/// Features drawn for a 68-point face. Nose bridge and lower nose share
/// index 30.
pub const FACE_68_FEATURES: [FaceFeature; 9] = [
    FaceFeature::open("jaw", 0, 16),
    FaceFeature::open("left_eyebrow", 17, 21),
    FaceFeature::open("right_eyebrow", 22, 26),
    FaceFeature::open("nose_bridge", 27, 30),
    FaceFeature::closed("lower_nose", 30, 35),
    FaceFeature::closed("left_eye", 36, 41),
    FaceFeature::closed("right_eye", 42, 47),
    FaceFeature::closed("outer_lip", 48, 59),
    FaceFeature::closed("inner_lip", 60, 67),
];

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LandmarkSet {
    points: Vec<PointF>,
}

impl LandmarkSet {
    pub fn new(points: Vec<PointF>) -> Self {
        Self { points }
    }

    pub fn points(&self) -> &[PointF] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn is_face_68(&self) -> bool {
        self.points.len() == FACE_68_LANDMARK_COUNT
    }

    /// Points of one feature, or `None` when the set is not a 68-point face.
    pub fn feature_points(&self, feature: &FaceFeature) -> Option<&[PointF]> {
        if !self.is_face_68() {
            return None;
        }
        self.points.get(feature.indices())
    }
}

impl From<Vec<PointF>> for LandmarkSet {
    fn from(points: Vec<PointF>) -> Self {
        Self::new(points)
    }
}
