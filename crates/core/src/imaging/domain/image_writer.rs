use std::path::Path;

use crate::shared::frame::Frame;

/// Persists an annotated frame, i.e. the input image with its landmark
/// overlay already painted in.
pub trait ImageWriter: Send {
    /// Writes the frame at its own resolution so overlay coordinates stay
    /// in image space. The file format follows the path's extension.
    fn write(&self, path: &Path, frame: &Frame) -> Result<(), Box<dyn std::error::Error>>;
}
