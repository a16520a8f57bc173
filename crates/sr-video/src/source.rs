use crate::{FrameSource, VideoError};
use sr_image::{decode_frame, Frame};
use std::path::{Path, PathBuf};

const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "bmp", "gif", "tiff", "webp"];

fn is_image_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| IMAGE_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
        .unwrap_or(false)
}

async fn load_frame(path: &Path) -> Result<Frame, VideoError> {
    let bytes = tokio::fs::read(path)
        .await
        .map_err(|e| VideoError::Source(format!("failed to read {}: {e}", path.display())))?;
    Ok(decode_frame(&bytes).await?)
}

/// A still image, decoded once and returned on every tick.
#[derive(Debug)]
pub struct ImageSource {
    frame: Frame,
}

impl ImageSource {
    pub async fn open(path: impl AsRef<Path>) -> Result<Self, VideoError> {
        let frame = load_frame(path.as_ref()).await?;
        log::debug!(
            "opened image {} ({}x{})",
            path.as_ref().display(),
            frame.width(),
            frame.height()
        );
        Ok(Self { frame })
    }

    pub fn from_frame(frame: Frame) -> Self {
        Self { frame }
    }
}

impl FrameSource for ImageSource {
    async fn recv(&mut self) -> Result<Option<Frame>, VideoError> {
        Ok(Some(self.frame.clone()))
    }
}

/// A directory of image files played back in file-name order.
///
/// Files are decoded as they are reached. With looping enabled the sequence
/// restarts after the last file; otherwise the source ends.
#[derive(Debug)]
pub struct SequenceSource {
    paths: Vec<PathBuf>,
    index: usize,
    looping: bool,
}

impl SequenceSource {
    pub async fn open(dir: impl AsRef<Path>, looping: bool) -> Result<Self, VideoError> {
        let dir = dir.as_ref();
        let mut entries = tokio::fs::read_dir(dir)
            .await
            .map_err(|e| VideoError::Source(format!("failed to open {}: {e}", dir.display())))?;
        let mut paths = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if is_image_file(&path) {
                paths.push(path);
            }
        }
        paths.sort();
        Self::from_paths(paths, looping)
    }

    pub fn from_paths(paths: Vec<PathBuf>, looping: bool) -> Result<Self, VideoError> {
        if paths.is_empty() {
            return Err(VideoError::Source("image sequence is empty".to_string()));
        }
        log::debug!("image sequence of {} frames, looping: {looping}", paths.len());
        Ok(Self {
            paths,
            index: 0,
            looping,
        })
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }
}

impl FrameSource for SequenceSource {
    async fn recv(&mut self) -> Result<Option<Frame>, VideoError> {
        if self.index == self.paths.len() {
            if !self.looping {
                return Ok(None);
            }
            self.index = 0;
        }
        let frame = load_frame(&self.paths[self.index]).await?;
        self.index += 1;
        Ok(Some(frame))
    }
}

/// Frames held in memory.
#[derive(Debug, Default)]
pub struct MemorySource {
    frames: Vec<Frame>,
    index: usize,
    looping: bool,
}

impl MemorySource {
    pub fn new(frames: Vec<Frame>) -> Self {
        Self {
            frames,
            index: 0,
            looping: false,
        }
    }

    pub fn with_looping(mut self, looping: bool) -> Self {
        self.looping = looping;
        self
    }
}

impl FrameSource for MemorySource {
    async fn recv(&mut self) -> Result<Option<Frame>, VideoError> {
        if self.index == self.frames.len() {
            if !self.looping || self.frames.is_empty() {
                return Ok(None);
            }
            self.index = 0;
        }
        let frame = self.frames[self.index].clone();
        self.index += 1;
        Ok(Some(frame))
    }
}

/// Opens a still image or, for a directory, a looping image sequence.
#[derive(Debug)]
pub enum InputSource {
    Image(ImageSource),
    Sequence(SequenceSource),
}

impl InputSource {
    pub async fn open(path: impl AsRef<Path>) -> Result<Self, VideoError> {
        let path = path.as_ref();
        let metadata = tokio::fs::metadata(path)
            .await
            .map_err(|e| VideoError::Source(format!("failed to open {}: {e}", path.display())))?;
        if metadata.is_dir() {
            Ok(InputSource::Sequence(SequenceSource::open(path, true).await?))
        } else {
            Ok(InputSource::Image(ImageSource::open(path).await?))
        }
    }

    pub fn with_looping(self, looping: bool) -> Self {
        match self {
            InputSource::Sequence(mut sequence) => {
                sequence.looping = looping;
                InputSource::Sequence(sequence)
            }
            other => other,
        }
    }
}

impl FrameSource for InputSource {
    async fn recv(&mut self) -> Result<Option<Frame>, VideoError> {
        match self {
            InputSource::Image(source) => source.recv().await,
            InputSource::Sequence(source) => source.recv().await,
        }
    }
}
