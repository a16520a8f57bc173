use std::fmt;
use std::path::PathBuf;

pub enum ModelSource {
    File(PathBuf),
    Memory(Vec<u8>),
}

impl fmt::Debug for ModelSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModelSource::File(path) => f.debug_tuple("File").field(path).finish(),
            ModelSource::Memory(bytes) => write!(f, "Memory({} bytes)", bytes.len()),
        }
    }
}

impl From<PathBuf> for ModelSource {
    fn from(path: PathBuf) -> Self {
        ModelSource::File(path)
    }
}

impl From<&std::path::Path> for ModelSource {
    fn from(path: &std::path::Path) -> Self {
        ModelSource::File(path.to_path_buf())
    }
}

impl From<Vec<u8>> for ModelSource {
    fn from(bytes: Vec<u8>) -> Self {
        ModelSource::Memory(bytes)
    }
}
