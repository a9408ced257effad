use crate::landmarks::domain::landmark_set::LandmarkSet;
use crate::rendering::domain::graphics_layer::GraphicsLayer;
use crate::rendering::domain::landmark_renderer::LandmarkRenderer;

/// Draws one point per landmark.
pub struct PointRenderer;

impl PointRenderer {
    pub fn new() -> Self {
        Self
    }

    pub(crate) fn draw_points(landmarks: &LandmarkSet, layer: &mut GraphicsLayer) {
        for point in landmarks.points() {
            layer.add_point(*point);
        }
    }
}

impl Default for PointRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl LandmarkRenderer for PointRenderer {
    fn render(
        &self,
        landmarks: &LandmarkSet,
        _frame_width: u32,
        _frame_height: u32,
        layer: &mut GraphicsLayer,
    ) -> Result<(), Box<dyn std::error::Error>> {
        Self::draw_points(landmarks, layer);
        Ok(())
    }
}
