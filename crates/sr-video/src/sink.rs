use crate::{FrameSink, VideoError};
use sr_image::{encode_png, Frame};
use std::path::{Path, PathBuf};

/// Writes numbered PNG files (`frame_000000.png`, ...) into a directory.
#[derive(Debug)]
pub struct PngSink {
    dir: PathBuf,
    prefix: String,
    index: u64,
}

impl PngSink {
    /// Create the sink, creating `dir` if needed.
    pub async fn create(dir: impl AsRef<Path>) -> Result<Self, VideoError> {
        let dir = dir.as_ref().to_path_buf();
        tokio::fs::create_dir_all(&dir)
            .await
            .map_err(|e| VideoError::Sink(format!("failed to create {}: {e}", dir.display())))?;
        Ok(Self {
            dir,
            prefix: "frame".to_string(),
            index: 0,
        })
    }

    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    /// Path the next frame will be written to.
    pub fn next_path(&self) -> PathBuf {
        self.dir
            .join(format!("{}_{:06}.png", self.prefix, self.index))
    }
}

impl FrameSink for PngSink {
    async fn send(&mut self, frame: Frame) -> Result<(), VideoError> {
        let path = self.next_path();
        let bytes = encode_png(frame).await?;
        tokio::fs::write(&path, bytes)
            .await
            .map_err(|e| VideoError::Sink(format!("failed to write {}: {e}", path.display())))?;
        log::debug!("wrote {}", path.display());
        self.index += 1;
        Ok(())
    }
}

/// Keeps every frame it receives.
#[derive(Debug, Default)]
pub struct MemorySink {
    frames: Vec<Frame>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    pub fn into_frames(self) -> Vec<Frame> {
        self.frames
    }
}

impl FrameSink for MemorySink {
    async fn send(&mut self, frame: Frame) -> Result<(), VideoError> {
        self.frames.push(frame);
        Ok(())
    }
}
