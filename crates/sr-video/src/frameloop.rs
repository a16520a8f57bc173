use crate::{FrameSink, FrameSource, Pipeline, Scheduler, VideoError};
use sr_infer::Upscaler;

enum State<U> {
    Idle,
    Running(U),
}

/// Drives frames from a source through the pipeline into a sink.
///
/// Starts Idle with its surfaces bound; [`load`](Self::load) hands it a model
/// and moves it to Running. Each cycle waits for a scheduler tick, takes one
/// frame, processes it and writes the result. Cycles never overlap.
pub struct FrameLoop<S, K, T, U> {
    source: S,
    sink: K,
    preview_sink: Option<K>,
    scheduler: T,
    pipeline: Pipeline,
    state: State<U>,
    frames: u64,
}

impl<S, K, T, U> FrameLoop<S, K, T, U>
where
    S: FrameSource,
    K: FrameSink,
    T: Scheduler,
    U: Upscaler,
{
    pub fn new(source: S, sink: K, scheduler: T, pipeline: Pipeline) -> Self {
        Self {
            source,
            sink,
            preview_sink: None,
            scheduler,
            pipeline,
            state: State::Idle,
            frames: 0,
        }
    }

    /// Receive the preview frames when the pipeline produces them.
    pub fn with_preview_sink(mut self, sink: K) -> Self {
        self.preview_sink = Some(sink);
        self
    }

    pub fn load(&mut self, upscaler: U) {
        log::info!("model loaded: {}", upscaler.name());
        self.state = State::Running(upscaler);
    }

    pub fn is_running(&self) -> bool {
        matches!(self.state, State::Running(_))
    }

    pub fn frame_count(&self) -> u64 {
        self.frames
    }

    pub fn sink(&self) -> &K {
        &self.sink
    }

    pub fn preview_sink(&self) -> Option<&K> {
        self.preview_sink.as_ref()
    }

    fn limit_reached(&self) -> bool {
        self.pipeline
            .config()
            .frame_limit()
            .is_some_and(|limit| self.frames >= limit)
    }

    /// Run one cycle. Returns `false` when the source is exhausted.
    pub async fn step(&mut self) -> Result<bool, VideoError> {
        let State::Running(upscaler) = &mut self.state else {
            return Err(VideoError::NotLoaded);
        };

        self.scheduler.tick().await;
        let Some(frame) = self.source.recv().await? else {
            return Ok(false);
        };

        let rendered = self.pipeline.process(&frame, upscaler)?;
        self.sink.send(rendered.frame).await?;
        if let (Some(sink), Some(preview)) = (self.preview_sink.as_mut(), rendered.preview) {
            sink.send(preview).await?;
        }

        self.frames += 1;
        Ok(true)
    }

    /// Run until the source ends, the frame limit is reached, the output is
    /// closed, or a cycle fails.
    ///
    /// Returns the total number of frames processed.
    pub async fn run(&mut self) -> Result<u64, VideoError> {
        if !self.is_running() {
            return Err(VideoError::NotLoaded);
        }

        while !self.limit_reached() {
            match self.step().await {
                Ok(true) => {}
                Ok(false) => {
                    log::info!("source exhausted after {} frames", self.frames);
                    return Ok(self.frames);
                }
                Err(VideoError::Closed) => {
                    log::info!("output closed after {} frames", self.frames);
                    return Err(VideoError::Closed);
                }
                Err(e) => {
                    log::error!("frame loop stopped after {} frames: {e}", self.frames);
                    return Err(e);
                }
            }
        }

        log::info!("frame limit reached: {} frames", self.frames);
        Ok(self.frames)
    }
}
