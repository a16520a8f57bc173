pub mod onnx;

pub use onnx::OnnxUpscaler;
