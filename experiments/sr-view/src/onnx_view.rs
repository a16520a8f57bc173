//! Runs an ONNX super-resolution model over a whole image and renders the
//! luminance it produces as grayscale.
//!
//! Stops after one frame unless `SR_FRAME_LIMIT` or `SR_CONFIG` say otherwise.

mod common;

use common::{finish, init_logging, load_config, Args, Output};
use sr_infer::Inference;
use sr_video::{FrameLoop, InputSource, IntervalScheduler, Pipeline, PipelineConfig, RenderMode};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging()?;
    let args = Args::parse("onnx-view")?;
    let config = load_config(
        PipelineConfig::default()
            .with_render_mode(RenderMode::Grayscale)
            .with_frame_limit(Some(1)),
    )?;

    log::info!("loading model {}", args.model.display());
    let upscaler = Inference::cpu().use_onnx(args.model.as_path())?;

    let source = InputSource::open(&args.input).await?;
    let sink = Output::open(args.output_dir.as_ref(), "frame", "onnx-view - ESC to exit").await?;
    let scheduler = IntervalScheduler::from_fps(config.fps());

    let mut frame_loop = FrameLoop::new(source, sink, scheduler, Pipeline::new(config));
    frame_loop.load(upscaler);
    finish(frame_loop.run().await)
}
