use serde::{Deserialize, Serialize};

/// Axis-aligned face box in integer image pixel coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FaceRegion {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl FaceRegion {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Whole box lies in the image domain.
    ///
    /// The right and bottom edges must stay strictly below the image size,
    /// so a box touching the last column or row is rejected.
    pub fn is_inside(&self, image_width: u32, image_height: u32) -> bool {
        let (w, h) = (image_width as i64, image_height as i64);
        self.x >= 0
            && self.y >= 0
            && (self.x as i64 + self.width as i64) < w
            && (self.y as i64 + self.height as i64) < h
    }

    /// Box intersected with the image, as `(x, y, width, height)`.
    ///
    /// Returns `None` when nothing of the box is visible.
    pub fn clamp_to(&self, image_width: u32, image_height: u32) -> Option<(u32, u32, u32, u32)> {
        let x1 = self.x.max(0) as i64;
        let y1 = self.y.max(0) as i64;
        let x2 = (self.x as i64 + self.width as i64).min(image_width as i64);
        let y2 = (self.y as i64 + self.height as i64).min(image_height as i64);
        if x2 <= x1 || y2 <= y1 {
            return None;
        }
        Some((x1 as u32, y1 as u32, (x2 - x1) as u32, (y2 - y1) as u32))
    }
}
