use crate::{
    color::{clamp_u8, mix},
    frame::RGBA,
    Frame, ImageError,
};
use sr_base::Tensor;

/// Spatial size `(height, width)` of a `[1, 1, H, W]` or `[H, W]` result.
pub fn result_dims(result: &Tensor<f32>) -> Result<(usize, usize), ImageError> {
    match result.shape[..] {
        [1, 1, h, w] | [h, w] => Ok((h, w)),
        _ => Err(ImageError::Shape(format!(
            "expected [1, 1, H, W] luminance, got {:?}",
            result.shape
        ))),
    }
}

/// Write the luminance straight into R, G and B with opaque alpha.
pub fn render_grayscale(result: &Tensor<f32>) -> Result<Frame, ImageError> {
    let (height, width) = result_dims(result)?;

    let mut data = Vec::with_capacity(result.len() * RGBA);
    for &y in &result.data {
        let l = clamp_u8(y * 255.0);
        data.extend_from_slice(&[l, l, l, 255]);
    }

    Frame::new(width, height, data)
}

/// Combine model luminance with the chrominance of `chroma`.
///
/// `chroma` must already have the result's spatial size. Alpha is kept.
pub fn render_mix(result: &Tensor<f32>, chroma: &Frame) -> Result<Frame, ImageError> {
    let (height, width) = result_dims(result)?;
    if chroma.width() != width || chroma.height() != height {
        return Err(ImageError::Shape(format!(
            "chroma surface is {}x{}, luminance is {}x{}",
            chroma.width(),
            chroma.height(),
            width,
            height
        )));
    }

    let mut out = chroma.clone();
    for (pixel, &y) in out.data_mut().chunks_exact_mut(RGBA).zip(&result.data) {
        let mixed = mix(y, [pixel[0], pixel[1], pixel[2], pixel[3]]);
        pixel.copy_from_slice(&mixed);
    }

    Ok(out)
}
