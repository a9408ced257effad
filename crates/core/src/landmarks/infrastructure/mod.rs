pub mod execution_provider;
pub mod lazy_landmark_predictor;
pub mod model_resolver;
pub mod onnx_landmark_predictor;
