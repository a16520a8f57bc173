use crate::{PipelineConfig, RenderMode, VideoError};
use sr_base::{Rect, Tensor};
use sr_image::{crop_frame, extract_luminance, render_grayscale, render_mix, scale_bilinear, Frame};
use sr_infer::Upscaler;

/// Output of one pipeline pass.
#[derive(Debug, Clone)]
pub struct Rendered {
    /// The super-resolved frame.
    pub frame: Frame,
    /// The input region scaled by the zoom factor, when preview is enabled.
    pub preview: Option<Frame>,
}

/// Extract → infer → clamp → render for a single frame.
#[derive(Debug, Clone, Default)]
pub struct Pipeline {
    config: PipelineConfig,
}

impl Pipeline {
    pub fn new(config: PipelineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Region of `frame` to process: the configured crop clamped into the
    /// frame, or the whole frame.
    pub fn region(&self, frame: &Frame) -> Result<Rect<usize>, VideoError> {
        match self.config.crop() {
            Some(crop) => crop.clamp_within(frame.bounds()).ok_or_else(|| {
                VideoError::Shape(format!(
                    "crop {}x{} does not fit a {}x{} frame",
                    crop.size.x,
                    crop.size.y,
                    frame.width(),
                    frame.height()
                ))
            }),
            None => Ok(frame.bounds()),
        }
    }

    pub fn process<U: Upscaler + ?Sized>(
        &self,
        frame: &Frame,
        upscaler: &mut U,
    ) -> Result<Rendered, VideoError> {
        let region = self.region(frame)?;
        let lr = extract_luminance(frame, Some(region))?;
        log::debug!("LR shape: {:?}", lr.shape);

        let sr = upscaler.infer(&lr)?;
        log::debug!("SR shape: {:?}", sr.shape);
        let (out_h, out_w) = check_result(&sr)?;
        let sr = if self.config.clip_output() {
            sr.clip(0.0, 1.0)
        } else {
            sr
        };

        let needs_source = self.config.preview() || self.config.render_mode() == RenderMode::Mix;
        let source = if needs_source {
            Some(crop_frame(frame, region)?)
        } else {
            None
        };

        let preview = match (&source, self.config.preview()) {
            (Some(source), true) => {
                let zoom = self.config.zoom_factor();
                Some(scale_bilinear(
                    source,
                    source.width() * zoom,
                    source.height() * zoom,
                )?)
            }
            _ => None,
        };

        let rendered = match (self.config.render_mode(), &source) {
            (RenderMode::Mix, Some(source)) => {
                let chroma = match &preview {
                    Some(p) if p.width() == out_w && p.height() == out_h => p.clone(),
                    _ => scale_bilinear(source, out_w, out_h)?,
                };
                render_mix(&sr, &chroma)?
            }
            _ => render_grayscale(&sr)?,
        };
        log::debug!("render complete: {}x{}", rendered.width(), rendered.height());

        Ok(Rendered {
            frame: rendered,
            preview,
        })
    }
}

/// Model output must be a single-image, single-channel NCHW tensor.
fn check_result(result: &Tensor<f32>) -> Result<(usize, usize), VideoError> {
    match result.shape[..] {
        [1, 1, h, w] if h > 0 && w > 0 => Ok((h, w)),
        _ => Err(VideoError::Shape(format!(
            "expected model output [1, 1, H, W], got {:?}",
            result.shape
        ))),
    }
}
