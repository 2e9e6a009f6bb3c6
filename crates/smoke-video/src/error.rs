use std::fmt;
use std::path::PathBuf;

#[derive(Debug)]
pub enum VideoError {
    NotFound(PathBuf),
    Spawn(String),
    Probe(String),
    Stream(String),
    Shape(String),
    Tensor(smoke_base::TensorError),
}

impl fmt::Display for VideoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VideoError::NotFound(path) => write!(f, "video not found: {}", path.display()),
            VideoError::Spawn(msg) => write!(f, "spawn error: {msg}"),
            VideoError::Probe(msg) => write!(f, "probe error: {msg}"),
            VideoError::Stream(msg) => write!(f, "stream error: {msg}"),
            VideoError::Shape(msg) => write!(f, "shape error: {msg}"),
            VideoError::Tensor(err) => write!(f, "tensor error: {err}"),
        }
    }
}

impl std::error::Error for VideoError {}

impl From<smoke_base::TensorError> for VideoError {
    fn from(err: smoke_base::TensorError) -> Self {
        VideoError::Tensor(err)
    }
}
