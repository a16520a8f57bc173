use std::fmt;

#[derive(Debug)]
pub enum ImageError {
    Decode(String),
    Encode(String),
    Tensor(sr_base::TensorError),
    Shape(String),
    OutOfBounds(String),
}

impl fmt::Display for ImageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImageError::Decode(msg) => write!(f, "decode error: {msg}"),
            ImageError::Encode(msg) => write!(f, "encode error: {msg}"),
            ImageError::Tensor(err) => write!(f, "tensor error: {err}"),
            ImageError::Shape(msg) => write!(f, "shape error: {msg}"),
            ImageError::OutOfBounds(msg) => write!(f, "out of bounds: {msg}"),
        }
    }
}

impl std::error::Error for ImageError {}

impl From<crates_image::ImageError> for ImageError {
    fn from(err: crates_image::ImageError) -> Self {
        ImageError::Decode(err.to_string())
    }
}

impl From<sr_base::TensorError> for ImageError {
    fn from(err: sr_base::TensorError) -> Self {
        ImageError::Tensor(err)
    }
}
