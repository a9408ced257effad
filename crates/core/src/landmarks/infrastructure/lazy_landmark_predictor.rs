use crate::landmarks::domain::landmark_predictor::LandmarkPredictor;
use crate::landmarks::domain::landmark_set::LandmarkSet;
use crate::shared::face_region::FaceRegion;
use crate::shared::frame::Frame;

/// Builds the real predictor on demand.
pub type PredictorLoader =
    Box<dyn FnMut() -> Result<Box<dyn LandmarkPredictor>, Box<dyn std::error::Error>> + Send>;

/// Defers model loading until the first `fit`, then reuses the loaded
/// predictor for every later call.
///
/// A failed load leaves nothing cached, so the next `fit` tries again.
pub struct LazyLandmarkPredictor {
    loader: PredictorLoader,
    inner: Option<Box<dyn LandmarkPredictor>>,
}

impl LazyLandmarkPredictor {
    pub fn new(loader: PredictorLoader) -> Self {
        Self {
            loader,
            inner: None,
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.inner.is_some()
    }

    fn predictor(&mut self) -> Result<&mut Box<dyn LandmarkPredictor>, Box<dyn std::error::Error>> {
        if !self.is_loaded() {
            log::info!("Loading landmark model");
            self.inner = Some((self.loader)()?);
        }
        self.inner
            .as_mut()
            .ok_or_else(|| "Landmark model not loaded".into())
    }
}

impl LandmarkPredictor for LazyLandmarkPredictor {
    fn fit(
        &mut self,
        frame: &Frame,
        faces: &[FaceRegion],
    ) -> Result<Option<Vec<LandmarkSet>>, Box<dyn std::error::Error>> {
        self.predictor()?.fit(frame, faces)
    }
}
