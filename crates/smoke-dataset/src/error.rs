use std::fmt;
use std::path::PathBuf;

#[derive(Debug)]
pub enum DatasetError {
    Io(String),
    Metadata(String),
    Config(String),
    IndexOutOfRange { index: usize, len: usize },
    EmptyClip(PathBuf),
    Shape(String),
    Video(smoke_video::VideoError),
    Flow(smoke_flow::FlowError),
    Image(smoke_image::ImageError),
    Tensor(smoke_base::TensorError),
    Candle(String),
}

impl fmt::Display for DatasetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DatasetError::Io(msg) => write!(f, "io error: {msg}"),
            DatasetError::Metadata(msg) => write!(f, "metadata error: {msg}"),
            DatasetError::Config(msg) => write!(f, "config error: {msg}"),
            DatasetError::IndexOutOfRange { index, len } => {
                write!(f, "index {index} out of range for dataset of {len} videos")
            }
            DatasetError::EmptyClip(path) => write!(f, "no frames in {}", path.display()),
            DatasetError::Shape(msg) => write!(f, "shape error: {msg}"),
            DatasetError::Video(err) => write!(f, "video error: {err}"),
            DatasetError::Flow(err) => write!(f, "flow error: {err}"),
            DatasetError::Image(err) => write!(f, "image error: {err}"),
            DatasetError::Tensor(err) => write!(f, "tensor error: {err}"),
            DatasetError::Candle(msg) => write!(f, "candle error: {msg}"),
        }
    }
}

impl std::error::Error for DatasetError {}

impl From<std::io::Error> for DatasetError {
    fn from(err: std::io::Error) -> Self {
        DatasetError::Io(err.to_string())
    }
}

impl From<smoke_video::VideoError> for DatasetError {
    fn from(err: smoke_video::VideoError) -> Self {
        DatasetError::Video(err)
    }
}

impl From<smoke_flow::FlowError> for DatasetError {
    fn from(err: smoke_flow::FlowError) -> Self {
        DatasetError::Flow(err)
    }
}

impl From<smoke_image::ImageError> for DatasetError {
    fn from(err: smoke_image::ImageError) -> Self {
        DatasetError::Image(err)
    }
}

impl From<smoke_base::TensorError> for DatasetError {
    fn from(err: smoke_base::TensorError) -> Self {
        DatasetError::Tensor(err)
    }
}

impl From<candle_core::Error> for DatasetError {
    fn from(err: candle_core::Error) -> Self {
        DatasetError::Candle(err.to_string())
    }
}
