use serde::{Deserialize, Serialize};

use crate::shared::face_region::FaceRegion;
use crate::shared::point::PointF;

/// Floating-point rectangle in image coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RectF {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl RectF {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Truncates each component toward zero.
    pub fn to_region(&self) -> FaceRegion {
        FaceRegion::new(
            self.x as i32,
            self.y as i32,
            self.width as i32,
            self.height as i32,
        )
    }

    fn enclosing(points: &[PointF]) -> Self {
        let Some(first) = points.first() else {
            return Self::default();
        };
        let (mut min_x, mut min_y, mut max_x, mut max_y) = (first.x, first.y, first.x, first.y);
        for p in &points[1..] {
            min_x = min_x.min(p.x);
            min_y = min_y.min(p.y);
            max_x = max_x.max(p.x);
            max_y = max_y.max(p.y);
        }
        Self::new(min_x, min_y, max_x - min_x, max_y - min_y)
    }
}

/// An upstream annotation drawn over the image, typically a detector's
/// face box.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum GraphicsItem {
    Point {
        x: f32,
        y: f32,
    },
    Rectangle {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
    },
    Ellipse {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
    },
    Polygon {
        points: Vec<PointF>,
    },
    Polyline {
        points: Vec<PointF>,
    },
    Text {
        x: f32,
        y: f32,
        text: String,
    },
}

impl GraphicsItem {
    pub fn rectangle(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self::Rectangle {
            x,
            y,
            width,
            height,
        }
    }

    pub fn is_text(&self) -> bool {
        matches!(self, Self::Text { .. })
    }

    pub fn bounding_rect(&self) -> RectF {
        match self {
            Self::Point { x, y } | Self::Text { x, y, .. } => RectF::new(*x, *y, 0.0, 0.0),
            Self::Rectangle {
                x,
                y,
                width,
                height,
            }
            | Self::Ellipse {
                x,
                y,
                width,
                height,
            } => RectF::new(*x, *y, *width, *height),
            Self::Polygon { points } | Self::Polyline { points } => RectF::enclosing(points),
        }
    }
}
