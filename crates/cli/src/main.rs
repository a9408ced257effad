use std::fs;
use std::path::{Path, PathBuf};
use std::process;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use clap::Parser;

use facemark_core::annotation::domain::graphics_item::GraphicsItem;
use facemark_core::annotation::infrastructure::json_annotation_reader::read_annotations;
use facemark_core::imaging::domain::image_reader::ImageReader;
use facemark_core::imaging::domain::image_writer::ImageWriter;
use facemark_core::imaging::infrastructure::image_file_reader::ImageFileReader;
use facemark_core::imaging::infrastructure::image_file_writer::ImageFileWriter;
use facemark_core::landmarks::domain::landmark_predictor::LandmarkPredictor;
use facemark_core::landmarks::infrastructure::execution_provider::preferred_provider_name;
use facemark_core::landmarks::infrastructure::lazy_landmark_predictor::{
    LazyLandmarkPredictor, PredictorLoader,
};
use facemark_core::landmarks::infrastructure::model_resolver::{self, ModelLocation, ProgressFn};
use facemark_core::landmarks::infrastructure::onnx_landmark_predictor::OnnxLandmarkPredictor;
use facemark_core::pipeline::facemark_output::FacemarkOutput;
use facemark_core::pipeline::facemark_params::FacemarkParams;
use facemark_core::pipeline::facemark_task::{FacemarkInput, FacemarkTask};
use facemark_core::pipeline::pipeline_logger::StdoutPipelineLogger;
use facemark_core::rendering::domain::display_mode::DisplayMode;
use facemark_core::rendering::infrastructure::overlay_painter::OverlayPainter;
use facemark_core::shared::constants::{IMAGE_EXTENSIONS, LANDMARK_MODEL_NAME, TASK_NAME};
use facemark_core::shared::task_info::FACEMARK_TASK_INFO;

/// Facial landmark detection on images.
#[derive(Parser)]
#[command(name = "facemark")]
struct Cli {
    /// Input image file.
    input: Option<PathBuf>,

    /// JSON file with annotation items (face boxes from an upstream detector).
    #[arg(long)]
    annotations: Option<PathBuf>,

    /// Face box as x,y,width,height. Repeatable.
    #[arg(long = "face", value_parser = parse_face)]
    faces: Vec<GraphicsItem>,

    /// Display type: points, face, delaunay (or 0, 1, 2).
    #[arg(long)]
    display_type: Option<DisplayMode>,

    /// Parameter file (JSON). Defaults to the saved user parameters.
    #[arg(long)]
    params: Option<PathBuf>,

    /// Save the effective parameters as the user defaults.
    #[arg(long)]
    save_params: bool,

    /// Write the input image with landmarks drawn over it.
    #[arg(long)]
    output: Option<PathBuf>,

    /// Write landmarks and graphics as JSON.
    #[arg(long)]
    landmarks_json: Option<PathBuf>,

    /// Landmark model file (ONNX). Overrides the plugin/cache lookup.
    #[arg(long)]
    model: Option<PathBuf>,

    /// Plugin root holding `<task>/Model/<model file>`.
    #[arg(long)]
    plugins_dir: Option<PathBuf>,

    /// Download URL used when the model is not found locally.
    #[arg(long)]
    model_url: Option<String>,

    /// Print task information and exit.
    #[arg(long)]
    info: bool,
}

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    if cli.info {
        println!("{FACEMARK_TASK_INFO}");
        return Ok(());
    }
    let input = validate(&cli)?;

    let params = effective_params(&cli)?;
    if cli.save_params {
        let path = save_user_params(&params, FacemarkParams::config_path())?;
        log::info!("Saved parameters to {}", path.display());
    }

    let frame = ImageFileReader::new().read(&input)?;
    let items = collect_items(&cli)?;
    log::info!(
        "{}: {}x{} image, {} annotation items, display {}",
        input.display(),
        frame.width(),
        frame.height(),
        items.len(),
        params.display_mode
    );

    let mut task = FacemarkTask::new(params, build_predictor(&cli))
        .with_logger(Box::new(StdoutPipelineLogger::new()));
    let output = task.run(FacemarkInput::new(&frame, &items))?;
    task.logger().summary();

    if output.has_landmarks() {
        log::info!("Fitted landmarks for {} faces", output.face_count());
    } else {
        log::warn!("No face inside the image, no landmarks produced");
    }

    if let Some(path) = &cli.output {
        write_overlay(&output, path)?;
        log::info!("Output written to {}", path.display());
    }
    if let Some(path) = &cli.landmarks_json {
        write_landmarks_json(&output, params.display_mode, path)?;
        log::info!("Landmarks written to {}", path.display());
    }

    Ok(())
}

fn validate(cli: &Cli) -> Result<PathBuf, Box<dyn std::error::Error>> {
    let input = cli
        .input
        .clone()
        .ok_or("Input image is required unless --info is used")?;
    if !input.exists() {
        return Err(format!("Input file not found: {}", input.display()).into());
    }
    if !is_image(&input) {
        return Err(format!(
            "Unsupported input '{}', expected one of: {}",
            input.display(),
            IMAGE_EXTENSIONS.join(", ")
        )
        .into());
    }
    if let Some(path) = &cli.annotations {
        if !path.exists() {
            return Err(format!("Annotation file not found: {}", path.display()).into());
        }
    }
    if let Some(path) = &cli.model {
        if !path.exists() {
            return Err(format!("Model file not found: {}", path.display()).into());
        }
    }
    if let Some(path) = &cli.output {
        if !is_image(path) {
            return Err(format!("Output must be an image file, got '{}'", path.display()).into());
        }
    }
    Ok(input)
}

/// Parameter file (or saved defaults), then `--display-type` on top.
fn effective_params(cli: &Cli) -> Result<FacemarkParams, Box<dyn std::error::Error>> {
    let mut params = match &cli.params {
        Some(path) => FacemarkParams::load_from(path)?,
        None => FacemarkParams::load(),
    };
    if let Some(mode) = cli.display_type {
        params.display_mode = mode;
    }
    Ok(params)
}

fn collect_items(cli: &Cli) -> Result<Vec<GraphicsItem>, Box<dyn std::error::Error>> {
    let mut items = match &cli.annotations {
        Some(path) => read_annotations(path)?,
        None => Vec::new(),
    };
    items.extend(cli.faces.iter().cloned());
    Ok(items)
}

/// Wraps the ONNX predictor so the model is only resolved and loaded when a
/// fit actually runs.
fn build_predictor(cli: &Cli) -> Box<dyn LandmarkPredictor> {
    let model = cli.model.clone();
    let plugins_dir = cli.plugins_dir.clone();
    let model_url = cli.model_url.clone();

    let loader: PredictorLoader = Box::new(move || {
        load_predictor(
            model.as_deref(),
            plugins_dir.as_deref(),
            model_url.as_deref(),
        )
    });
    Box::new(LazyLandmarkPredictor::new(loader))
}

fn load_predictor(
    model: Option<&Path>,
    plugins_dir: Option<&Path>,
    model_url: Option<&str>,
) -> Result<Box<dyn LandmarkPredictor>, Box<dyn std::error::Error>> {
    let model_path = match model {
        Some(path) => path.to_path_buf(),
        None => {
            log::info!("Resolving model: {LANDMARK_MODEL_NAME}");
            let location = ModelLocation {
                plugins_dir,
                task_name: TASK_NAME,
                model_name: LANDMARK_MODEL_NAME,
                url: model_url,
            };
            let progress = DownloadProgress::default();
            let resolved = model_resolver::resolve(&location, Some(progress.callback()));
            if progress.printed() {
                eprintln!();
            }
            resolved?
        }
    };
    log::info!(
        "Loading {} ({} execution provider)",
        model_path.display(),
        preferred_provider_name()
    );
    Ok(Box::new(OnnxLandmarkPredictor::new(&model_path)?))
}

fn write_overlay(output: &FacemarkOutput, path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let mut frame = output.image.clone();
    if let Some(layer) = &output.graphics {
        OverlayPainter::default().paint(&mut frame, layer)?;
    }
    ImageFileWriter::new().write(path, &frame)
}

fn write_landmarks_json(
    output: &FacemarkOutput,
    display_mode: DisplayMode,
    path: &Path,
) -> Result<(), Box<dyn std::error::Error>> {
    let json = landmarks_json(output, display_mode);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, serde_json::to_string_pretty(&json)?)?;
    Ok(())
}

fn landmarks_json(output: &FacemarkOutput, display_mode: DisplayMode) -> serde_json::Value {
    serde_json::json!({
        "task": TASK_NAME,
        "image": {
            "width": output.image.width(),
            "height": output.image.height(),
        },
        "display_mode": display_mode,
        "faces": output.points,
        "graphics": output.graphics,
    })
}

fn parse_face(value: &str) -> Result<GraphicsItem, String> {
    let parts: Vec<f32> = value
        .split(',')
        .map(|p| p.trim().parse::<f32>())
        .collect::<Result<_, _>>()
        .map_err(|_| format!("Face box must be x,y,width,height, got '{value}'"))?;
    match parts.as_slice() {
        [x, y, w, h] if *w >= 0.0 && *h >= 0.0 => Ok(GraphicsItem::rectangle(*x, *y, *w, *h)),
        [_, _, _, _] => Err(format!("Face box size must not be negative, got '{value}'")),
        _ => Err(format!("Face box must be x,y,width,height, got '{value}'")),
    }
}

fn is_image(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| IMAGE_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
        .unwrap_or(false)
}

fn save_user_params(
    params: &FacemarkParams,
    config_path: Option<PathBuf>,
) -> Result<PathBuf, Box<dyn std::error::Error>> {
    let path = config_path
        .ok_or("Cannot determine the user config directory to save parameters")?;
    params.save_to(&path)?;
    Ok(path)
}

/// Download progress on stderr. Remembers whether a progress line was
/// drawn so the caller only terminates it after a real download.
#[derive(Clone, Default)]
struct DownloadProgress {
    printed: Arc<AtomicBool>,
}

impl DownloadProgress {
    fn callback(&self) -> ProgressFn {
        let printed = Arc::clone(&self.printed);
        Box::new(move |downloaded, total| {
            printed.store(true, Ordering::Relaxed);
            eprint!("\r{}", progress_line(downloaded, total));
        })
    }

    fn printed(&self) -> bool {
        self.printed.load(Ordering::Relaxed)
    }
}

fn progress_line(downloaded: u64, total: u64) -> String {
    if total > 0 {
        let pct = (downloaded as f64 / total as f64 * 100.0) as u32;
        format!("Downloading landmark model... {pct}%")
    } else {
        format!("Downloading landmark model... {downloaded} bytes")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use facemark_core::landmarks::domain::landmark_set::LandmarkSet;
    use facemark_core::pipeline::facemark_output::PointListOutput;
    use facemark_core::rendering::domain::graphics_layer::GraphicsLayer;
    use facemark_core::shared::frame::Frame;
    use facemark_core::shared::point::PointF;
    use tempfile::TempDir;

    fn cli(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("facemark").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_parse_face() {
        assert_eq!(
            parse_face("10, 20,30,40").unwrap(),
            GraphicsItem::rectangle(10.0, 20.0, 30.0, 40.0)
        );
    }

    #[test]
    fn test_parse_face_rejects_bad_input() {
        assert!(parse_face("10,20,30").is_err());
        assert!(parse_face("a,b,c,d").is_err());
        assert!(parse_face("0,0,-5,10").is_err());
    }

    #[test]
    fn test_is_image() {
        assert!(is_image(Path::new("face.JPG")));
        assert!(is_image(Path::new("dir/face.png")));
        assert!(!is_image(Path::new("clip.mp4")));
        assert!(!is_image(Path::new("noext")));
    }

    #[test]
    fn test_display_type_accepts_names_and_codes() {
        assert_eq!(
            cli(&["in.png", "--display-type", "delaunay"]).display_type,
            Some(DisplayMode::Delaunay)
        );
        assert_eq!(
            cli(&["in.png", "--display-type", "1"]).display_type,
            Some(DisplayMode::Face)
        );
        assert!(Cli::try_parse_from(["facemark", "in.png", "--display-type", "mesh"]).is_err());
    }

    #[test]
    fn test_repeated_faces() {
        let cli = cli(&["in.png", "--face", "1,2,3,4", "--face", "5,6,7,8"]);
        assert_eq!(cli.faces.len(), 2);
        assert_eq!(collect_items(&cli).unwrap().len(), 2);
    }

    #[test]
    fn test_validate_requires_input() {
        let err = validate(&cli(&[])).unwrap_err();
        assert!(err.to_string().contains("Input image is required"));
    }

    #[test]
    fn test_validate_missing_input_file() {
        let err = validate(&cli(&["/nonexistent/face.png"])).unwrap_err();
        assert!(err.to_string().contains("Input file not found"));
    }

    #[test]
    fn test_validate_rejects_non_image_input() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("clip.mp4");
        fs::write(&path, b"").unwrap();
        let err = validate(&cli(&[path.to_str().unwrap()])).unwrap_err();
        assert!(err.to_string().contains("Unsupported input"));
    }

    #[test]
    fn test_display_type_overrides_params_file() {
        let tmp = TempDir::new().unwrap();
        let params_path = tmp.path().join("params.json");
        FacemarkParams::new(DisplayMode::Face)
            .save_to(&params_path)
            .unwrap();

        let from_file = cli(&["in.png", "--params", params_path.to_str().unwrap()]);
        assert_eq!(
            effective_params(&from_file).unwrap().display_mode,
            DisplayMode::Face
        );

        let overridden = cli(&[
            "in.png",
            "--params",
            params_path.to_str().unwrap(),
            "--display-type",
            "points",
        ]);
        assert_eq!(
            effective_params(&overridden).unwrap().display_mode,
            DisplayMode::Points
        );
    }

    #[test]
    fn test_landmarks_json_layout() {
        let mut points = PointListOutput::default();
        points.add_value_list(&LandmarkSet::new(vec![PointF::new(1.0, 2.0)]));
        let mut layer = GraphicsLayer::new(TASK_NAME, 0);
        layer.add_point(PointF::new(1.0, 2.0));
        let output = FacemarkOutput {
            image: Frame::new(vec![0; 12], 2, 2, 3),
            graphics: Some(layer),
            points: Some(points),
        };

        let json = landmarks_json(&output, DisplayMode::Points);

        assert_eq!(json["task"], TASK_NAME);
        assert_eq!(json["display_mode"], "points");
        assert_eq!(json["image"]["width"], 2);
        assert_eq!(json["faces"][0][0]["x"], 1.0);
        assert_eq!(json["graphics"]["shapes"][0]["type"], "point");
    }

    #[test]
    fn test_write_overlay_without_landmarks_copies_image() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("out.png");
        let output = FacemarkOutput {
            image: Frame::new(vec![7; 4 * 4 * 3], 4, 4, 3),
            graphics: None,
            points: None,
        };

        write_overlay(&output, &path).unwrap();

        let frame = ImageFileReader::new().read(&path).unwrap();
        assert_eq!(frame.data(), output.image.data());
    }

    #[test]
    fn test_save_params_without_config_dir_fails() {
        let err = save_user_params(&FacemarkParams::default(), None).unwrap_err();
        assert!(err.to_string().contains("config directory"));
    }

    #[test]
    fn test_save_params_writes_config_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("Facemark").join("params.json");
        let params = FacemarkParams::new(DisplayMode::Face);

        let saved = save_user_params(&params, Some(path.clone())).unwrap();

        assert_eq!(saved, path);
        let loaded = FacemarkParams::load_from(&path).unwrap();
        assert_eq!(loaded.display_mode, DisplayMode::Face);
    }

    #[test]
    fn test_download_progress_not_printed_until_called() {
        let progress = DownloadProgress::default();
        let _callback = progress.callback();
        assert!(!progress.printed());
    }

    #[test]
    fn test_download_progress_printed_after_callback() {
        let progress = DownloadProgress::default();
        let callback = progress.callback();
        callback(512, 1024);
        assert!(progress.printed());
    }

    #[test]
    fn test_progress_line() {
        assert_eq!(progress_line(512, 1024), "Downloading landmark model... 50%");
        assert_eq!(progress_line(300, 0), "Downloading landmark model... 300 bytes");
    }
}
