use std::path::Path;

use crate::imaging::domain::image_reader::ImageReader;
use crate::shared::frame::Frame;

/// Decodes image files with the `image` crate, converting every pixel
/// format to 8-bit RGB.
pub struct ImageFileReader;

impl ImageFileReader {
    pub fn new() -> Self {
        Self
    }
}

impl Default for ImageFileReader {
    fn default() -> Self {
        Self::new()
    }
}

impl ImageReader for ImageFileReader {
    fn read(&self, path: &Path) -> Result<Frame, Box<dyn std::error::Error>> {
        let img = image::open(path)
            .map_err(|e| format!("Failed to open image {}: {e}", path.display()))?
            .into_rgb8();
        let (width, height) = img.dimensions();
        log::debug!("Read {}x{} image from {}", width, height, path.display());
        Ok(Frame::new(img.into_raw(), width, height, 3))
    }
}
