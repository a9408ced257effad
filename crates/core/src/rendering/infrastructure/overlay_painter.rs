use image::{Rgb, RgbImage};
use imageproc::drawing::{draw_filled_circle_mut, draw_line_segment_mut};

use crate::rendering::domain::graphics_layer::{GraphicsLayer, GraphicsShape};
use crate::shared::frame::Frame;
use crate::shared::point::PointF;

pub const DEFAULT_COLOR: [u8; 3] = [0, 255, 0];
pub const DEFAULT_POINT_RADIUS: i32 = 2;

/// Rasterises a graphics layer onto an RGB frame.
pub struct OverlayPainter {
    color: Rgb<u8>,
    point_radius: i32,
}

impl OverlayPainter {
    pub fn new(color: [u8; 3], point_radius: i32) -> Self {
        Self {
            color: Rgb(color),
            point_radius: point_radius.max(0),
        }
    }

    pub fn paint(
        &self,
        frame: &mut Frame,
        layer: &GraphicsLayer,
    ) -> Result<(), Box<dyn std::error::Error>> {
        if frame.channels() != 3 {
            return Err(format!(
                "Overlay needs an RGB frame, got {} channels",
                frame.channels()
            )
            .into());
        }

        let mut canvas = RgbImage::from_raw(frame.width(), frame.height(), frame.data().to_vec())
            .ok_or("Failed to create image from frame data")?;

        for shape in &layer.shapes {
            match shape {
                GraphicsShape::Point(p) => {
                    let (x, y) = p.rounded();
                    draw_filled_circle_mut(&mut canvas, (x, y), self.point_radius, self.color);
                }
                GraphicsShape::Polyline(points) => self.draw_chain(&mut canvas, points, false),
                GraphicsShape::Polygon(points) => self.draw_chain(&mut canvas, points, true),
            }
        }

        frame.data_mut().copy_from_slice(canvas.as_raw());
        Ok(())
    }

    fn draw_chain(&self, canvas: &mut RgbImage, points: &[PointF], closed: bool) {
        for pair in points.windows(2) {
            draw_line_segment_mut(
                canvas,
                (pair[0].x, pair[0].y),
                (pair[1].x, pair[1].y),
                self.color,
            );
        }
        if closed && points.len() > 2 {
            let (first, last) = (points[0], points[points.len() - 1]);
            draw_line_segment_mut(canvas, (last.x, last.y), (first.x, first.y), self.color);
        }
    }
}

impl Default for OverlayPainter {
    fn default() -> Self {
        Self::new(DEFAULT_COLOR, DEFAULT_POINT_RADIUS)
    }
}
