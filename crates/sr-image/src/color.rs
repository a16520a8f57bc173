//! RGB <-> YUV conversion used to split luminance from chrominance.
//!
//! The forward transform uses the BT.601 studio-swing coefficients, the
//! inverse the full-range ones. They are only approximate inverses of each
//! other and neither function clamps; callers clamp once when storing bytes.

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Yuv {
    pub y: f32,
    pub u: f32,
    pub v: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgb {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

/// The Y component of [`rgb_to_yuv`], on the 0..255 scale.
#[inline]
pub fn luminance(r: f32, g: f32, b: f32) -> f32 {
    0.257 * r + 0.504 * g + 0.098 * b + 16.0
}

pub fn rgb_to_yuv(r: f32, g: f32, b: f32) -> Yuv {
    Yuv {
        y: luminance(r, g, b),
        u: -0.148 * r - 0.291 * g + 0.439 * b + 128.0,
        v: 0.439 * r - 0.368 * g - 0.071 * b + 128.0,
    }
}

pub fn yuv_to_rgb(y: f32, u: f32, v: f32) -> Rgb {
    Rgb {
        r: y + 1.4075 * (v - 128.0),
        g: y - 0.3455 * (u - 128.0) - 0.7169 * (v - 128.0),
        b: y + 1.7790 * (u - 128.0),
    }
}

/// Round and clamp into a byte. Halves round up.
#[inline]
pub fn clamp_u8(value: f32) -> u8 {
    value.round().clamp(0.0, 255.0) as u8
}

/// Replace the luminance of an RGBA pixel with `y` (in 0..1), keeping its
/// chrominance and alpha.
pub fn mix(y: f32, rgba: [u8; 4]) -> [u8; 4] {
    let [r, g, b, a] = rgba;
    let yuv = rgb_to_yuv(r as f32, g as f32, b as f32);
    let rgb = yuv_to_rgb(y * 255.0, yuv.u, yuv.v);
    [clamp_u8(rgb.r), clamp_u8(rgb.g), clamp_u8(rgb.b), a]
}
