//! Pixel handling for the super-resolution pipeline.
//!
//! Frames are RGBA8 tensors in HWC layout (`[height, width, 4]`). This crate
//! converts them to and from the single-channel luminance tensors a
//! super-resolution model consumes, and decodes/encodes image files with the
//! `image` crate.

pub mod color;
pub mod error;
pub mod extract;
pub mod frame;
pub mod render;
pub mod scale;

pub use color::{clamp_u8, mix, rgb_to_yuv, yuv_to_rgb, Rgb, Yuv};
pub use error::ImageError;
pub use extract::{crop_frame, extract_luminance};
pub use frame::Frame;
pub use render::{render_grayscale, render_mix, result_dims};
pub use scale::scale_bilinear;

use crates_image::{ImageEncoder, codecs::png::PngEncoder};

fn decode_frame_inner(data: &[u8]) -> Result<Frame, ImageError> {
    let rgba = crates_image::load_from_memory(data)?.to_rgba8();
    let (width, height) = rgba.dimensions();
    Frame::new(width as usize, height as usize, rgba.into_raw())
}

fn encode_png_inner(frame: &Frame) -> Result<Vec<u8>, ImageError> {
    let mut buffer = Vec::new();
    PngEncoder::new(&mut buffer)
        .write_image(
            frame.data(),
            frame.width() as u32,
            frame.height() as u32,
            crates_image::ExtendedColorType::Rgba8,
        )
        .map_err(|e| ImageError::Encode(e.to_string()))?;
    Ok(buffer)
}

/// Decodes an image file held in memory into an RGBA frame.
///
/// The format is auto-detected; every pixel layout is converted to RGBA8.
/// The CPU-bound decoding work runs on tokio's blocking thread pool.
///
/// # Errors
///
/// Returns `ImageError::Decode` if the data is invalid or the format is unsupported.
pub async fn decode_frame(data: &[u8]) -> Result<Frame, ImageError> {
    let owned = data.to_vec();
    tokio::task::spawn_blocking(move || decode_frame_inner(&owned))
        .await
        .map_err(|e| ImageError::Decode(e.to_string()))?
}

/// Encodes a frame as PNG bytes on tokio's blocking thread pool.
pub async fn encode_png(frame: Frame) -> Result<Vec<u8>, ImageError> {
    tokio::task::spawn_blocking(move || encode_png_inner(&frame))
        .await
        .map_err(|e| ImageError::Encode(e.to_string()))?
}
