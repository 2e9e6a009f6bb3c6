use crate::VideoError;
use smoke_base::Tensor;

/// A decoded video: RGB frames stacked as `[T, H, W, 3]`.
#[derive(Debug, Clone, PartialEq)]
pub struct Clip {
    frames: Tensor<u8>,
}

impl Clip {
    /// Wrap an existing `[T, H, W, 3]` tensor.
    pub fn new(frames: Tensor<u8>) -> Result<Self, VideoError> {
        match frames.shape.as_slice() {
            [_, _, _, 3] => Ok(Self { frames }),
            other => Err(VideoError::Shape(format!(
                "expected [T, H, W, 3] clip, got {other:?}"
            ))),
        }
    }

    /// Stack individual `[H, W, 3]` frames.
    pub fn from_frames(frames: &[Tensor<u8>]) -> Result<Self, VideoError> {
        Self::new(Tensor::stack(frames)?)
    }

    /// Split a packed rgb24 byte stream into `width` x `height` frames.
    pub fn from_rgb24(width: usize, height: usize, data: Vec<u8>) -> Result<Self, VideoError> {
        let frame_size = width * height * 3;
        if frame_size == 0 {
            return Err(VideoError::Shape(format!(
                "invalid frame size {width}x{height}"
            )));
        }
        if data.len() % frame_size != 0 {
            return Err(VideoError::Stream(format!(
                "{} bytes is not a whole number of {width}x{height} frames",
                data.len()
            )));
        }
        let count = data.len() / frame_size;
        Self::new(Tensor::new(vec![count, height, width, 3], data)?)
    }

    pub fn frame_count(&self) -> usize {
        self.frames.shape[0]
    }

    pub fn height(&self) -> usize {
        self.frames.shape[1]
    }

    pub fn width(&self) -> usize {
        self.frames.shape[2]
    }

    /// Copy out frame `index` as an `[H, W, 3]` tensor.
    pub fn frame(&self, index: usize) -> Option<Tensor<u8>> {
        let data = self.frames.slice(index)?.to_vec();
        Some(Tensor {
            shape: self.frames.shape[1..].to_vec(),
            data,
        })
    }

    /// Iterate over frames as `[H, W, 3]` tensors.
    pub fn frames(&self) -> impl Iterator<Item = Tensor<u8>> + '_ {
        (0..self.frame_count()).filter_map(|i| self.frame(i))
    }

    pub fn as_tensor(&self) -> &Tensor<u8> {
        &self.frames
    }

    pub fn into_tensor(self) -> Tensor<u8> {
        self.frames
    }
}
