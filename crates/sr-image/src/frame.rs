use crate::ImageError;
use sr_base::{Rect, Tensor};

/// Number of channels in every frame (R, G, B, A).
pub const RGBA: usize = 4;

/// An RGBA8 pixel grid in HWC layout: `[height, width, 4]`.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pixels: Tensor<u8>,
}

impl Frame {
    pub fn new(width: usize, height: usize, data: Vec<u8>) -> Result<Self, ImageError> {
        Ok(Self {
            pixels: Tensor::new(vec![height, width, RGBA], data)?,
        })
    }

    /// A frame with every pixel set to `rgba`.
    pub fn filled(width: usize, height: usize, rgba: [u8; 4]) -> Self {
        let data = rgba.repeat(width * height);
        Self {
            pixels: Tensor {
                shape: vec![height, width, RGBA],
                data,
            },
        }
    }

    /// Wrap an existing `[H, W, 4]` tensor.
    pub fn from_tensor(pixels: Tensor<u8>) -> Result<Self, ImageError> {
        if pixels.shape.len() != 3 || pixels.shape[2] != RGBA {
            return Err(ImageError::Shape(format!(
                "expected [H, W, 4], got {:?}",
                pixels.shape
            )));
        }
        Ok(Self { pixels })
    }

    pub fn height(&self) -> usize {
        self.pixels.shape[0]
    }

    pub fn width(&self) -> usize {
        self.pixels.shape[1]
    }

    pub fn bounds(&self) -> Rect<usize> {
        Rect::from_size(self.width(), self.height())
    }

    pub fn data(&self) -> &[u8] {
        &self.pixels.data
    }

    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.pixels.data
    }

    /// The RGBA value at `(x, y)`.
    ///
    /// # Panics
    ///
    /// Panics if `x >= width()` or `y >= height()`.
    pub fn pixel(&self, x: usize, y: usize) -> [u8; 4] {
        assert!(
            x < self.width() && y < self.height(),
            "pixel ({x}, {y}) outside {}x{} frame",
            self.width(),
            self.height()
        );
        let i = (y * self.width() + x) * RGBA;
        let p = &self.pixels.data[i..i + RGBA];
        [p[0], p[1], p[2], p[3]]
    }

    pub fn into_tensor(self) -> Tensor<u8> {
        self.pixels
    }
}
