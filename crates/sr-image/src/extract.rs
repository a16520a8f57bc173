use crate::{color::luminance, frame::RGBA, Frame, ImageError};
use sr_base::{Rect, Tensor};

fn check_crop(frame: &Frame, rect: Rect<usize>) -> Result<(), ImageError> {
    if rect.size.x == 0 || rect.size.y == 0 {
        return Err(ImageError::Shape(format!(
            "crop must be non-zero, got {}x{}",
            rect.size.x, rect.size.y
        )));
    }
    if !frame.bounds().contains_rect(rect) {
        return Err(ImageError::OutOfBounds(format!(
            "crop {:?} outside {}x{} frame",
            rect,
            frame.width(),
            frame.height()
        )));
    }
    Ok(())
}

/// Copy the RGBA pixels inside `rect` into a new frame.
pub fn crop_frame(frame: &Frame, rect: Rect<usize>) -> Result<Frame, ImageError> {
    check_crop(frame, rect)?;

    let stride = frame.width() * RGBA;
    let row_len = rect.size.x * RGBA;
    let mut data = Vec::with_capacity(row_len * rect.size.y);
    for y in rect.origin.y..rect.origin.y + rect.size.y {
        let start = y * stride + rect.origin.x * RGBA;
        data.extend_from_slice(&frame.data()[start..start + row_len]);
    }

    Frame::new(rect.size.x, rect.size.y, data)
}

/// Convert a frame (or the `crop` region of it) into a `[1, 1, H, W]`
/// luminance tensor, each sample `Y / 255`.
///
/// Samples are not clamped; Y lies in roughly `[16, 236]` for byte input.
pub fn extract_luminance(frame: &Frame, crop: Option<Rect<usize>>) -> Result<Tensor<f32>, ImageError> {
    let rect = crop.unwrap_or_else(|| frame.bounds());
    check_crop(frame, rect)?;

    let stride = frame.width() * RGBA;
    let mut samples = Vec::with_capacity(rect.area());
    for y in rect.origin.y..rect.origin.y + rect.size.y {
        let start = y * stride + rect.origin.x * RGBA;
        let row = &frame.data()[start..start + rect.size.x * RGBA];
        samples.extend(row.chunks_exact(RGBA).map(|p| {
            luminance(p[0] as f32, p[1] as f32, p[2] as f32) / 255.0
        }));
    }

    Ok(Tensor::new(vec![1, 1, rect.size.y, rect.size.x], samples)?)
}
