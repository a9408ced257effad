use crate::landmarks::domain::landmark_set::{LandmarkSet, FACE_68_FEATURES};
use crate::rendering::domain::graphics_layer::GraphicsLayer;
use crate::rendering::domain::landmark_renderer::LandmarkRenderer;

use super::point_renderer::PointRenderer;

/// Draws the jaw, brows, nose, eyes and lips of a 68-point face.
///
/// Open features become polylines, closed ones polygons. Any other landmark
/// count has no known anatomy, so each landmark is drawn as a point instead.
pub struct FaceOutlineRenderer;

impl FaceOutlineRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl Default for FaceOutlineRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl LandmarkRenderer for FaceOutlineRenderer {
    fn render(
        &self,
        landmarks: &LandmarkSet,
        _frame_width: u32,
        _frame_height: u32,
        layer: &mut GraphicsLayer,
    ) -> Result<(), Box<dyn std::error::Error>> {
        if !landmarks.is_face_68() {
            log::debug!(
                "{} landmarks is not a 68-point face, drawing points",
                landmarks.len()
            );
            PointRenderer::draw_points(landmarks, layer);
            return Ok(());
        }

        for feature in &FACE_68_FEATURES {
            let Some(points) = landmarks.feature_points(feature) else {
                continue;
            };
            if feature.closed {
                layer.add_polygon(points.to_vec());
            } else {
                layer.add_polyline(points.to_vec());
            }
        }
        Ok(())
    }
}
