use crate::{Frame, ImageError};
use crates_image::{imageops, RgbaImage};

/// Resize with bilinear filtering, the way a 2D canvas scales a drawn image.
pub fn scale_bilinear(frame: &Frame, width: usize, height: usize) -> Result<Frame, ImageError> {
    if width == 0 || height == 0 {
        return Err(ImageError::Shape(format!(
            "target size must be non-zero, got {width}x{height}"
        )));
    }
    let source = RgbaImage::from_raw(
        frame.width() as u32,
        frame.height() as u32,
        frame.data().to_vec(),
    )
    .ok_or_else(|| ImageError::Shape("frame buffer does not match its size".to_string()))?;

    let scaled = imageops::resize(
        &source,
        width as u32,
        height as u32,
        imageops::FilterType::Triangle,
    );

    Frame::new(width, height, scaled.into_raw())
}
