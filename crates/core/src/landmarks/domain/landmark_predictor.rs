use crate::landmarks::domain::landmark_set::LandmarkSet;
use crate::shared::face_region::FaceRegion;
use crate::shared::frame::Frame;

/// Domain interface for facial landmark fitting.
///
/// `Ok(None)` means the fit did not succeed (e.g. no faces were given) and
/// no landmarks should be emitted. `Ok(Some(sets))` holds exactly one set per
/// input face, in input order.
pub trait LandmarkPredictor: Send {
    fn fit(
        &mut self,
        frame: &Frame,
        faces: &[FaceRegion],
    ) -> Result<Option<Vec<LandmarkSet>>, Box<dyn std::error::Error>>;
}
