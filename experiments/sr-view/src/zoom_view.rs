//! Zooms into a 64x64 region of the input with an ESPCN model on candle.
//!
//! The model's luminance is mixed into the bilinear-scaled region so colour
//! survives; the scaled region itself is written alongside for comparison.
//! The region origin comes from `SR_ZOOM_X` / `SR_ZOOM_Y` and is clamped into
//! each frame.

mod common;

use common::{finish, init_logging, load_config, Args, Output};
use sr_base::{Rect, Vec2};
use sr_infer::Inference;
use sr_video::{FrameLoop, InputSource, IntervalScheduler, Pipeline, PipelineConfig, RenderMode};
use std::env;

const ZOOM_SIZE: usize = 64;
const ZOOM_FACTOR: usize = 4;

fn env_usize(name: &str) -> Result<usize, String> {
    match env::var(name) {
        Ok(value) => value
            .parse()
            .map_err(|e| format!("invalid {name} '{value}': {e}")),
        Err(_) => Ok(0),
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging()?;
    let args = Args::parse("zoom-view")?;

    let origin = Vec2::new(env_usize("SR_ZOOM_X")?, env_usize("SR_ZOOM_Y")?);
    let config = load_config(
        PipelineConfig::default()
            .with_crop(Some(Rect::new(origin, Vec2::new(ZOOM_SIZE, ZOOM_SIZE))))
            .with_zoom_factor(ZOOM_FACTOR)
            .with_render_mode(RenderMode::Mix)
            .with_preview(true),
    )?;

    log::info!("loading espcn weights {}", args.model.display());
    let upscaler = Inference::cpu().use_espcn_dir(&args.model)?;

    let source = InputSource::open(&args.input).await?;
    let sink = Output::open(args.output_dir.as_ref(), "frame", "zoom-view - ESC to exit").await?;
    let preview = Output::open(args.output_dir.as_ref(), "scaled", "zoom-view scaled").await?;
    let scheduler = IntervalScheduler::from_fps(config.fps());

    let mut frame_loop = FrameLoop::new(source, sink, scheduler, Pipeline::new(config))
        .with_preview_sink(preview);
    frame_loop.load(upscaler);
    finish(frame_loop.run().await)
}
