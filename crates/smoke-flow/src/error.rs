use std::fmt;

#[derive(Debug)]
pub enum FlowError {
    Shape(String),
    NotEnoughFrames(usize),
    Image(smoke_image::ImageError),
    Video(smoke_video::VideoError),
    Tensor(smoke_base::TensorError),
    Backend(String),
}

impl fmt::Display for FlowError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FlowError::Shape(msg) => write!(f, "shape error: {msg}"),
            FlowError::NotEnoughFrames(count) => {
                write!(f, "optical flow needs at least 2 frames, got {count}")
            }
            FlowError::Image(err) => write!(f, "image error: {err}"),
            FlowError::Video(err) => write!(f, "video error: {err}"),
            FlowError::Tensor(err) => write!(f, "tensor error: {err}"),
            FlowError::Backend(msg) => write!(f, "flow backend error: {msg}"),
        }
    }
}

impl std::error::Error for FlowError {}

impl From<smoke_image::ImageError> for FlowError {
    fn from(err: smoke_image::ImageError) -> Self {
        FlowError::Image(err)
    }
}

impl From<smoke_video::VideoError> for FlowError {
    fn from(err: smoke_video::VideoError) -> Self {
        FlowError::Video(err)
    }
}

impl From<smoke_base::TensorError> for FlowError {
    fn from(err: smoke_base::TensorError) -> Self {
        FlowError::Tensor(err)
    }
}

#[cfg(feature = "opencv")]
impl From<opencv::Error> for FlowError {
    fn from(err: opencv::Error) -> Self {
        FlowError::Backend(err.to_string())
    }
}
