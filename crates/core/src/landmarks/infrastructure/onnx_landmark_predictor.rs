//! Facial landmark regressor running on ONNX Runtime via `ort`.
//!
//! Each face box is cropped, resized to the network input, and the network's
//! `2 * N` outputs (normalised to the crop) are mapped back to image pixels.

use std::path::Path;

use crate::landmarks::domain::landmark_predictor::LandmarkPredictor;
use crate::landmarks::domain::landmark_set::LandmarkSet;
use crate::shared::face_region::FaceRegion;
use crate::shared::frame::Frame;
use crate::shared::point::PointF;

use super::execution_provider::open_session;

/// Fallback input resolution when the model's input shape is dynamic.
pub const DEFAULT_INPUT_SIZE: u32 = 112;

/// Crop of the frame fed to the network, in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Crop {
    x: u32,
    y: u32,
    width: u32,
    height: u32,
}

impl Crop {
    /// Part of `face` visible in a non-empty image, at least one pixel in
    /// each direction so degenerate boxes still get a landmark set.
    fn for_face(face: &FaceRegion, image_width: u32, image_height: u32) -> Self {
        if let Some((x, y, width, height)) = face.clamp_to(image_width, image_height) {
            return Self {
                x,
                y,
                width,
                height,
            };
        }
        let x = face.x.clamp(0, image_width as i32 - 1) as u32;
        let y = face.y.clamp(0, image_height as i32 - 1) as u32;
        Self {
            x,
            y,
            width: 1,
            height: 1,
        }
    }
}

pub struct OnnxLandmarkPredictor {
    session: ort::session::Session,
    input_size: u32,
}

impl OnnxLandmarkPredictor {
    /// Load a landmark ONNX model.
    ///
    /// The input resolution is read from the model's NCHW input shape,
    /// falling back to [`DEFAULT_INPUT_SIZE`].
    pub fn new(model_path: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        let session = open_session(model_path)?;

        let input_size = session
            .inputs()
            .first()
            .and_then(|input| {
                if let ort::value::ValueType::Tensor { ref shape, .. } = input.dtype() {
                    if shape.len() >= 4 && shape[2] > 0 {
                        Some(shape[2] as u32)
                    } else {
                        None
                    }
                } else {
                    None
                }
            })
            .unwrap_or(DEFAULT_INPUT_SIZE);

        log::info!(
            "Loaded landmark model {} (input {input_size}x{input_size})",
            model_path.display()
        );
        Ok(Self {
            session,
            input_size,
        })
    }
}

impl LandmarkPredictor for OnnxLandmarkPredictor {
    fn fit(
        &mut self,
        frame: &Frame,
        faces: &[FaceRegion],
    ) -> Result<Option<Vec<LandmarkSet>>, Box<dyn std::error::Error>> {
        if faces.is_empty() {
            return Ok(None);
        }
        if frame.is_empty() {
            return Err("Empty image".into());
        }

        let mut sets = Vec::with_capacity(faces.len());
        for face in faces {
            let crop = Crop::for_face(face, frame.width(), frame.height());
            if face.width <= 0 || face.height <= 0 {
                log::debug!("Degenerate face box {face:?}, using a 1x1 crop");
            }

            let input_tensor = preprocess(frame, crop, self.input_size);
            let input_value = ort::value::Tensor::from_array(input_tensor)?;
            let outputs = self.session.run(ort::inputs![input_value])?;
            if outputs.len() == 0 {
                return Err("Landmark model produced no outputs".into());
            }

            let raw = outputs[0].try_extract_array::<f32>()?;
            let values = raw.as_slice().ok_or("Cannot get landmark slice")?;
            sets.push(decode_landmarks(values, crop)?);
        }

        Ok(Some(sets))
    }
}

// ---------------------------------------------------------------------------
// Pre/post-processing
// ---------------------------------------------------------------------------

/// Crop, resize to `size × size` and normalize to [0,1] NCHW float32.
fn preprocess(frame: &Frame, crop: Crop, size: u32) -> ndarray::Array4<f32> {
    let src = frame.as_ndarray();
    let channels = frame.channels().max(1) as usize;
    let s = size as usize;
    let (cw, ch) = (crop.width as f64, crop.height as f64);
    let max_x = (crop.x + crop.width - 1) as usize;
    let max_y = (crop.y + crop.height - 1) as usize;

    let mut tensor = ndarray::Array4::<f32>::zeros((1, 3, s, s));

    for y in 0..s {
        let src_y = (crop.y as usize + ((y as f64 + 0.5) * ch / s as f64) as usize).min(max_y);
        for x in 0..s {
            let src_x =
                (crop.x as usize + ((x as f64 + 0.5) * cw / s as f64) as usize).min(max_x);
            for c in 0..3 {
                tensor[[0, c, y, x]] = src[[src_y, src_x, c.min(channels - 1)]] as f32 / 255.0;
            }
        }
    }

    tensor
}

/// Map interleaved `[x0, y0, x1, y1, ...]` crop-relative values to image
/// coordinates.
fn decode_landmarks(values: &[f32], crop: Crop) -> Result<LandmarkSet, Box<dyn std::error::Error>> {
    if values.is_empty() || values.len() % 2 != 0 {
        return Err(format!(
            "Landmark model output must hold x/y pairs, got {} values",
            values.len()
        )
        .into());
    }

    let points = values
        .chunks_exact(2)
        .map(|xy| {
            PointF::new(
                crop.x as f32 + xy[0] * crop.width as f32,
                crop.y as f32 + xy[1] * crop.height as f32,
            )
        })
        .collect();
    Ok(LandmarkSet::new(points))
}
