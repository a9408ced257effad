use std::time::Instant;

use crate::annotation::domain::graphics_item::GraphicsItem;
use crate::annotation::domain::region_collector::collect_face_regions;
use crate::landmarks::domain::landmark_predictor::LandmarkPredictor;
use crate::landmarks::domain::landmark_set::LandmarkSet;
use crate::pipeline::facemark_output::{FacemarkOutput, PointListOutput};
use crate::pipeline::facemark_params::FacemarkParams;
use crate::pipeline::pipeline_logger::{NullPipelineLogger, PipelineLogger};
use crate::rendering::domain::graphics_layer::GraphicsLayer;
use crate::rendering::infrastructure::renderer_factory::create_renderer;
use crate::shared::constants::TASK_NAME;
use crate::shared::error::FacemarkError;
use crate::shared::frame::Frame;

/// Called after each task step with `(current, total)`.
pub type StepProgressFn = Box<dyn FnMut(usize, usize) + Send>;

const PROGRESS_STEPS: usize = 3;

/// Inputs of one run. Either may be missing when the host has nothing
/// connected.
#[derive(Clone, Copy, Debug, Default)]
pub struct FacemarkInput<'a> {
    pub frame: Option<&'a Frame>,
    pub items: Option<&'a [GraphicsItem]>,
}

impl<'a> FacemarkInput<'a> {
    pub fn new(frame: &'a Frame, items: &'a [GraphicsItem]) -> Self {
        Self {
            frame: Some(frame),
            items: Some(items),
        }
    }
}

/// Facial landmark task: collect face boxes → fit → render.
///
/// The predictor is owned for the lifetime of the task, so a lazily loaded
/// model is shared by every run.
pub struct FacemarkTask {
    params: FacemarkParams,
    predictor: Box<dyn LandmarkPredictor>,
    logger: Box<dyn PipelineLogger>,
    on_progress: Option<StepProgressFn>,
}

impl FacemarkTask {
    pub fn new(params: FacemarkParams, predictor: Box<dyn LandmarkPredictor>) -> Self {
        Self {
            params,
            predictor,
            logger: Box::new(NullPipelineLogger),
            on_progress: None,
        }
    }

    pub fn with_logger(mut self, logger: Box<dyn PipelineLogger>) -> Self {
        self.logger = logger;
        self
    }

    pub fn with_progress(mut self, on_progress: StepProgressFn) -> Self {
        self.on_progress = Some(on_progress);
        self
    }

    pub fn name(&self) -> &'static str {
        TASK_NAME
    }

    pub fn params(&self) -> &FacemarkParams {
        &self.params
    }

    pub fn set_params(&mut self, params: FacemarkParams) {
        self.params = params;
    }

    pub fn progress_steps(&self) -> usize {
        PROGRESS_STEPS
    }

    pub fn logger(&self) -> &dyn PipelineLogger {
        self.logger.as_ref()
    }

    pub fn run(&mut self, input: FacemarkInput<'_>) -> Result<FacemarkOutput, FacemarkError> {
        let frame = input
            .frame
            .ok_or_else(|| FacemarkError::invalid("Invalid parameters"))?;
        if frame.is_empty() {
            return Err(FacemarkError::invalid("Empty image"));
        }
        self.step(1);

        let started = Instant::now();
        let faces = collect_face_regions(
            input.items.unwrap_or_default(),
            frame.width(),
            frame.height(),
        );
        self.logger.timing("collect", elapsed_ms(started));
        self.logger.metric("faces", faces.len() as f64);

        let started = Instant::now();
        let fitted = self
            .predictor
            .fit(frame, &faces)
            .map_err(|e| FacemarkError::from_library(&*e))?;
        self.logger.timing("fit", elapsed_ms(started));

        let (graphics, points) = match fitted {
            Some(landmarks) => {
                let started = Instant::now();
                let (layer, points) = self
                    .render(&landmarks, frame)
                    .map_err(|e| FacemarkError::from_library(&*e))?;
                self.logger.timing("render", elapsed_ms(started));
                (Some(layer), Some(points))
            }
            None => {
                self.logger
                    .info(&format!("No landmarks fitted ({} faces)", faces.len()));
                (None, None)
            }
        };
        self.step(2);

        let output = FacemarkOutput {
            image: frame.clone(),
            graphics,
            points,
        };
        self.step(3);
        Ok(output)
    }

    fn render(
        &self,
        landmarks: &[LandmarkSet],
        frame: &Frame,
    ) -> Result<(GraphicsLayer, PointListOutput), Box<dyn std::error::Error>> {
        let renderer = create_renderer(self.params.display_mode);
        let mut layer = GraphicsLayer::new(TASK_NAME, 0);
        for set in landmarks {
            renderer.render(set, frame.width(), frame.height(), &mut layer)?;
        }

        let mut points = PointListOutput::default();
        for set in landmarks {
            points.add_value_list(set);
        }
        Ok((layer, points))
    }

    fn step(&mut self, current: usize) {
        self.logger.progress(current, PROGRESS_STEPS);
        if let Some(on_progress) = self.on_progress.as_mut() {
            on_progress(current, PROGRESS_STEPS);
        }
    }
}

fn elapsed_ms(started: Instant) -> f64 {
    started.elapsed().as_secs_f64() * 1000.0
}
