use std::fmt;

#[derive(Debug)]
pub enum VideoError {
    Source(String),
    Sink(String),
    Image(sr_image::ImageError),
    Infer(sr_infer::InferError),
    Shape(String),
    Config(String),
    Io(String),
    NotLoaded,
    /// The output surface was closed by the viewer.
    Closed,
}

impl fmt::Display for VideoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VideoError::Source(msg) => write!(f, "source error: {msg}"),
            VideoError::Sink(msg) => write!(f, "sink error: {msg}"),
            VideoError::Image(err) => write!(f, "image error: {err}"),
            VideoError::Infer(err) => write!(f, "inference error: {err}"),
            VideoError::Shape(msg) => write!(f, "shape error: {msg}"),
            VideoError::Config(msg) => write!(f, "config error: {msg}"),
            VideoError::Io(msg) => write!(f, "io error: {msg}"),
            VideoError::NotLoaded => write!(f, "model not loaded"),
            VideoError::Closed => write!(f, "output closed"),
        }
    }
}

impl std::error::Error for VideoError {}

impl From<std::io::Error> for VideoError {
    fn from(err: std::io::Error) -> Self {
        VideoError::Io(err.to_string())
    }
}

impl From<sr_image::ImageError> for VideoError {
    fn from(err: sr_image::ImageError) -> Self {
        VideoError::Image(err)
    }
}

impl From<sr_infer::InferError> for VideoError {
    fn from(err: sr_infer::InferError) -> Self {
        VideoError::Infer(err)
    }
}

impl From<serde_json::Error> for VideoError {
    fn from(err: serde_json::Error) -> Self {
        VideoError::Config(err.to_string())
    }
}
