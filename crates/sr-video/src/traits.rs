use crate::VideoError;
use sr_image::Frame;

/// Async source of input frames.
///
/// `recv` returns `Ok(None)` once the source is exhausted.
#[allow(async_fn_in_trait)]
pub trait FrameSource {
    async fn recv(&mut self) -> Result<Option<Frame>, VideoError>;
}

/// Async destination for rendered frames.
#[allow(async_fn_in_trait)]
pub trait FrameSink {
    async fn send(&mut self, frame: Frame) -> Result<(), VideoError>;
}

/// Paces the frame loop, standing in for a display refresh callback.
#[allow(async_fn_in_trait)]
pub trait Scheduler {
    /// Wait until the next cycle may start.
    async fn tick(&mut self);
}
