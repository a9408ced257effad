/// Task name; also the per-plugin model directory name.
pub const TASK_NAME: &str = "infer_facemark_lbf";

pub const LANDMARK_MODEL_NAME: &str = "face_landmarks_68.onnx";

/// Subdirectory of a task's plugin directory holding its model files.
pub const MODEL_SUBDIR: &str = "Model";

/// Landmark count of the jaw/brows/nose/eyes/lips annotation scheme.
pub const FACE_68_LANDMARK_COUNT: usize = 68;

pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "bmp", "tiff", "tif", "webp"];
