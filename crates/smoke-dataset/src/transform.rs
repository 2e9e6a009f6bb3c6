use crate::DatasetError;
use smoke_base::Tensor;

/// Hook applied to a clip's frames before they are laid out for training,
/// e.g. for augmentation.
///
/// Input and output are `[T, H, W, C]` tensors with values in [-1, 1]. A
/// transform may change any dimension; the label is repeated once per frame
/// of the returned tensor.
pub trait Transform: Send + Sync {
    fn apply(&self, frames: Tensor<f32>) -> Result<Tensor<f32>, DatasetError>;
}

impl<F> Transform for F
where
    F: Fn(Tensor<f32>) -> Result<Tensor<f32>, DatasetError> + Send + Sync,
{
    fn apply(&self, frames: Tensor<f32>) -> Result<Tensor<f32>, DatasetError> {
        self(frames)
    }
}
