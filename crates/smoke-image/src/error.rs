use std::fmt;

#[derive(Debug)]
pub enum ImageError {
    Shape(String),
    Encode(String),
    Tensor(smoke_base::TensorError),
}

impl fmt::Display for ImageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImageError::Shape(msg) => write!(f, "shape error: {msg}"),
            ImageError::Encode(msg) => write!(f, "encode error: {msg}"),
            ImageError::Tensor(err) => write!(f, "tensor error: {err}"),
        }
    }
}

impl std::error::Error for ImageError {}

impl From<smoke_base::TensorError> for ImageError {
    fn from(err: smoke_base::TensorError) -> Self {
        ImageError::Tensor(err)
    }
}
