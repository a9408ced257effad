use crate::landmarks::domain::landmark_set::LandmarkSet;
use crate::rendering::domain::graphics_layer::GraphicsLayer;

/// Domain interface for turning one face's landmarks into display shapes.
///
/// Shapes are appended to `layer`; the frame size bounds what may be drawn.
pub trait LandmarkRenderer: Send {
    fn render(
        &self,
        landmarks: &LandmarkSet,
        frame_width: u32,
        frame_height: u32,
        layer: &mut GraphicsLayer,
    ) -> Result<(), Box<dyn std::error::Error>>;
}
