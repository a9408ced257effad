use crate::landmarks::domain::landmark_set::LandmarkSet;
use crate::rendering::domain::delaunay::triangulate;
use crate::rendering::domain::graphics_layer::GraphicsLayer;
use crate::rendering::domain::landmark_renderer::LandmarkRenderer;
use crate::shared::point::PointF;

/// Draws the Delaunay triangulation of the landmarks.
///
/// Triangle vertices are snapped to integer pixels, and only triangles whose
/// three snapped vertices fall inside the frame are kept.
pub struct DelaunayRenderer;

impl DelaunayRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl Default for DelaunayRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl LandmarkRenderer for DelaunayRenderer {
    fn render(
        &self,
        landmarks: &LandmarkSet,
        frame_width: u32,
        frame_height: u32,
        layer: &mut GraphicsLayer,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let triangles = triangulate(landmarks.points(), frame_width, frame_height)?;
        for triangle in visible_triangles(&triangles, frame_width, frame_height) {
            layer.add_polygon(
                triangle
                    .iter()
                    .map(|&(x, y)| PointF::new(x as f32, y as f32))
                    .collect(),
            );
        }
        Ok(())
    }
}

/// Snaps triangles to integer pixels and drops any with a vertex outside
/// `[0, width) × [0, height)`.
pub fn visible_triangles(
    triangles: &[[PointF; 3]],
    frame_width: u32,
    frame_height: u32,
) -> Vec<[(i32, i32); 3]> {
    let contains = |(x, y): (i32, i32)| {
        x >= 0 && y >= 0 && (x as i64) < frame_width as i64 && (y as i64) < frame_height as i64
    };
    triangles
        .iter()
        .map(|t| t.map(|p| p.rounded()))
        .filter(|t| t.iter().all(|&v| contains(v)))
        .collect()
}
