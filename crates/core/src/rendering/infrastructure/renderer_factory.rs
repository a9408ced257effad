use crate::rendering::domain::display_mode::DisplayMode;
use crate::rendering::domain::landmark_renderer::LandmarkRenderer;

use super::delaunay_renderer::DelaunayRenderer;
use super::face_outline_renderer::FaceOutlineRenderer;
use super::point_renderer::PointRenderer;

/// Creates the renderer for a display mode.
pub fn create_renderer(mode: DisplayMode) -> Box<dyn LandmarkRenderer> {
    log::debug!("Using {mode} landmark renderer");
    match mode {
        DisplayMode::Points => Box::new(PointRenderer::new()),
        DisplayMode::Face => Box::new(FaceOutlineRenderer::new()),
        DisplayMode::Delaunay => Box::new(DelaunayRenderer::new()),
    }
}
