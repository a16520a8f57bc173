//! Frame sources, sinks and the loop that runs a super-resolution model over
//! them.

pub mod config;
pub mod error;
pub mod frameloop;
pub mod pipeline;
pub mod scheduler;
pub mod sink;
pub mod source;
pub mod traits;

pub use config::{CropRect, PipelineConfig, RenderMode, MAX_FPS};
pub use error::VideoError;
pub use frameloop::FrameLoop;
pub use pipeline::{Pipeline, Rendered};
pub use scheduler::{ImmediateScheduler, IntervalScheduler};
pub use sink::{MemorySink, PngSink};
pub use source::{ImageSource, InputSource, MemorySource, SequenceSource};
pub use traits::{FrameSink, FrameSource, Scheduler};
