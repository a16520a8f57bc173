use crate::VideoError;
use serde::Deserialize;
use sr_base::{Rect, Vec2};
use std::path::Path;

/// How the model's luminance output is written back to pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RenderMode {
    /// R = G = B = luminance.
    #[default]
    Grayscale,
    /// Luminance replaced in the bilinear-scaled input, chroma kept.
    Mix,
}

/// Region of the input fed to the model, in source pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
pub struct CropRect {
    pub x: usize,
    pub y: usize,
    pub width: usize,
    pub height: usize,
}

impl From<CropRect> for Rect<usize> {
    fn from(crop: CropRect) -> Self {
        Rect::new(Vec2::new(crop.x, crop.y), Vec2::new(crop.width, crop.height))
    }
}

/// Highest accepted `fps`; one tick per nanosecond.
pub const MAX_FPS: u32 = 1_000_000_000;

/// Configuration for the frame pipeline and loop.
#[derive(Clone, Debug, PartialEq)]
pub struct PipelineConfig {
    crop: Option<CropRect>,
    zoom_factor: usize,
    render_mode: RenderMode,
    clip_output: bool,
    preview: bool,
    frame_limit: Option<u64>,
    fps: u32,
}

/// JSON form of [`PipelineConfig`]; absent fields leave the base untouched.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ConfigPatch {
    crop: Option<CropRect>,
    zoom_factor: Option<usize>,
    render_mode: Option<RenderMode>,
    clip_output: Option<bool>,
    preview: Option<bool>,
    frame_limit: Option<u64>,
    fps: Option<u32>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            crop: None,
            zoom_factor: 4,
            render_mode: RenderMode::Grayscale,
            clip_output: true,
            preview: false,
            frame_limit: None,
            fps: 60,
        }
    }
}

impl PipelineConfig {
    /// Parse a config, filling absent fields from [`Default`].
    pub fn from_json(json: &str) -> Result<Self, VideoError> {
        Self::default().apply_json(json)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, VideoError> {
        Self::default().apply_file(path)
    }

    /// Override the fields present in `json`, keeping the rest of `self`.
    pub fn apply_json(mut self, json: &str) -> Result<Self, VideoError> {
        let patch: ConfigPatch = serde_json::from_str(json)?;
        if let Some(crop) = patch.crop {
            self.crop = Some(crop);
        }
        if let Some(zoom_factor) = patch.zoom_factor {
            self.zoom_factor = zoom_factor;
        }
        if let Some(render_mode) = patch.render_mode {
            self.render_mode = render_mode;
        }
        if let Some(clip_output) = patch.clip_output {
            self.clip_output = clip_output;
        }
        if let Some(preview) = patch.preview {
            self.preview = preview;
        }
        if let Some(frame_limit) = patch.frame_limit {
            self.frame_limit = Some(frame_limit);
        }
        if let Some(fps) = patch.fps {
            self.fps = fps;
        }
        self.validate()?;
        Ok(self)
    }

    pub fn apply_file(self, path: impl AsRef<Path>) -> Result<Self, VideoError> {
        let json = std::fs::read_to_string(path.as_ref())?;
        self.apply_json(&json)
    }

    fn validate(&self) -> Result<(), VideoError> {
        if self.zoom_factor == 0 {
            return Err(VideoError::Config("zoom_factor must be non-zero".to_string()));
        }
        if let Some(crop) = self.crop {
            if crop.width == 0 || crop.height == 0 {
                return Err(VideoError::Config("crop must have a non-zero size".to_string()));
            }
        }
        if self.fps == 0 || self.fps > MAX_FPS {
            return Err(VideoError::Config(format!(
                "fps must be in 1..={MAX_FPS}, got {}",
                self.fps
            )));
        }
        Ok(())
    }

    /// Set the requested crop. It is clamped into each frame before use.
    pub fn with_crop(mut self, crop: Option<Rect<usize>>) -> Self {
        self.crop = crop.map(|rect| CropRect {
            x: rect.origin.x,
            y: rect.origin.y,
            width: rect.size.x,
            height: rect.size.y,
        });
        self
    }

    /// Set the scale of the bilinear preview surface.
    pub fn with_zoom_factor(mut self, zoom_factor: usize) -> Self {
        self.zoom_factor = zoom_factor.max(1);
        self
    }

    pub fn with_render_mode(mut self, render_mode: RenderMode) -> Self {
        self.render_mode = render_mode;
        self
    }

    /// Clamp model output to [0, 1] before rendering.
    pub fn with_clip_output(mut self, clip_output: bool) -> Self {
        self.clip_output = clip_output;
        self
    }

    /// Also emit the bilinear-scaled input.
    pub fn with_preview(mut self, preview: bool) -> Self {
        self.preview = preview;
        self
    }

    /// Stop after this many frames.
    pub fn with_frame_limit(mut self, frame_limit: Option<u64>) -> Self {
        self.frame_limit = frame_limit;
        self
    }

    pub fn with_fps(mut self, fps: u32) -> Self {
        self.fps = fps;
        self
    }

    // Getters
    pub fn crop(&self) -> Option<Rect<usize>> {
        self.crop.map(Rect::from)
    }

    pub fn zoom_factor(&self) -> usize {
        self.zoom_factor
    }

    pub fn render_mode(&self) -> RenderMode {
        self.render_mode
    }

    pub fn clip_output(&self) -> bool {
        self.clip_output
    }

    pub fn preview(&self) -> bool {
        self.preview
    }

    pub fn frame_limit(&self) -> Option<u64> {
        self.frame_limit
    }

    pub fn fps(&self) -> u32 {
        self.fps
    }
}
