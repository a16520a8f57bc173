use minifb::{Key, Window, WindowOptions};
use sr_image::Frame;
use sr_video::{FrameSink, PipelineConfig, PngSink, VideoError};
use std::env;
use std::path::PathBuf;

/// Command line: `<input> <model> [output-dir]`.
pub struct Args {
    pub input: PathBuf,
    pub model: PathBuf,
    pub output_dir: Option<PathBuf>,
}

impl Args {
    pub fn parse(program: &str) -> Result<Self, String> {
        let mut args = env::args().skip(1);
        let usage = || format!("usage: {program} <input> <model> [output-dir]");
        let input = args.next().ok_or_else(usage)?.into();
        let model = args.next().ok_or_else(usage)?.into();
        let output_dir = args.next().map(PathBuf::from);
        Ok(Self {
            input,
            model,
            output_dir,
        })
    }
}

/// Log to `SR_LOG_DIR` when set, stdout otherwise.
pub fn init_logging() -> Result<(), Box<dyn std::error::Error>> {
    match env::var("SR_LOG_DIR") {
        Ok(dir) => sr_base::init_file_logger(dir)?,
        Err(_) => sr_base::init_stdout_logger(),
    }
    Ok(())
}

/// Fields set in the `SR_CONFIG` file override `defaults`; `SR_FRAME_LIMIT`
/// overrides the frame limit (`0` disables it).
pub fn load_config(defaults: PipelineConfig) -> Result<PipelineConfig, Box<dyn std::error::Error>> {
    let mut config = match env::var("SR_CONFIG") {
        Ok(path) => {
            log::info!("loading config from {path}");
            defaults.apply_file(path)?
        }
        Err(_) => defaults,
    };
    if let Ok(limit) = env::var("SR_FRAME_LIMIT") {
        let limit: u64 = limit
            .parse()
            .map_err(|e| format!("invalid SR_FRAME_LIMIT '{limit}': {e}"))?;
        config = config.with_frame_limit((limit > 0).then_some(limit));
    }
    Ok(config)
}

/// Convert an RGBA frame to packed ARGB u32 for minifb.
fn rgba_to_argb(frame: &Frame) -> Vec<u32> {
    frame
        .data()
        .chunks_exact(4)
        .map(|p| ((p[0] as u32) << 16) | ((p[1] as u32) << 8) | p[2] as u32)
        .collect()
}

/// Shows frames in a window, opened on the first frame at its size.
pub struct WindowSink {
    title: String,
    window: Option<Window>,
}

impl WindowSink {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            window: None,
        }
    }
}

impl FrameSink for WindowSink {
    async fn send(&mut self, frame: Frame) -> Result<(), VideoError> {
        if self.window.is_none() {
            let window = Window::new(
                &self.title,
                frame.width(),
                frame.height(),
                WindowOptions::default(),
            )
            .map_err(|e| VideoError::Sink(e.to_string()))?;
            self.window = Some(window);
        }
        let Some(window) = self.window.as_mut() else {
            return Ok(());
        };
        if !window.is_open() || window.is_key_down(Key::Escape) {
            return Err(VideoError::Closed);
        }
        window
            .update_with_buffer(&rgba_to_argb(&frame), frame.width(), frame.height())
            .map_err(|e| VideoError::Sink(e.to_string()))
    }
}

/// PNG files when an output directory is given, a window otherwise.
pub enum Output {
    Png(PngSink),
    Window(WindowSink),
}

impl Output {
    pub async fn open(
        output_dir: Option<&PathBuf>,
        prefix: &str,
        title: &str,
    ) -> Result<Self, VideoError> {
        match output_dir {
            Some(dir) => Ok(Output::Png(PngSink::create(dir).await?.with_prefix(prefix))),
            None => Ok(Output::Window(WindowSink::new(title))),
        }
    }
}

impl FrameSink for Output {
    async fn send(&mut self, frame: Frame) -> Result<(), VideoError> {
        match self {
            Output::Png(sink) => sink.send(frame).await,
            Output::Window(sink) => sink.send(frame).await,
        }
    }
}

/// Final report of a loop run; closing the window is a normal exit.
pub fn finish(result: Result<u64, VideoError>) -> Result<(), Box<dyn std::error::Error>> {
    match result {
        Ok(frames) => {
            log::info!("processed {frames} frames");
            Ok(())
        }
        Err(VideoError::Closed) => {
            log::info!("exiting");
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}
