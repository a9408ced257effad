pub mod delaunay_renderer;
pub mod face_outline_renderer;
pub mod overlay_painter;
pub mod point_renderer;
pub mod renderer_factory;
