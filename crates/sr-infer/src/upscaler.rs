use crate::InferError;
use sr_base::Tensor;

/// A loaded super-resolution model.
///
/// Takes one luminance tensor `[1, 1, H, W]` and returns one tensor
/// `[1, 1, H', W']`. Implementations do not clamp their output.
pub trait Upscaler {
    fn name(&self) -> &str;
    fn infer(&mut self, input: &Tensor<f32>) -> Result<Tensor<f32>, InferError>;
}

impl<U: Upscaler + ?Sized> Upscaler for Box<U> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn infer(&mut self, input: &Tensor<f32>) -> Result<Tensor<f32>, InferError> {
        (**self).infer(input)
    }
}

/// Check that `tensor` is a single-image, single-channel NCHW tensor.
pub fn check_luminance_shape(tensor: &Tensor<f32>) -> Result<(usize, usize), InferError> {
    match tensor.shape[..] {
        [1, 1, h, w] if h > 0 && w > 0 => Ok((h, w)),
        _ => Err(InferError::Shape(format!(
            "expected [1, 1, H, W] tensor, got shape {:?}",
            tensor.shape
        ))),
    }
}
