use crate::{DatasetError, Layout, SmokeLabel};
use candle_core::{Device, Tensor as CanTensor};
use smoke_base::Tensor;

/// One training item.
#[derive(Clone, Debug, PartialEq)]
pub struct Sample {
    /// Frames in [-1, 1], `[T, C, H, W]` or `[C, T, H, W]` per `layout`.
    pub frames: Tensor<f32>,
    /// Per-frame `[p(no smoke), p(smoke)]`, `[T, 2]` or `[2, T]` per `layout`.
    pub labels: Tensor<f32>,
    pub file_name: String,
    pub label: SmokeLabel,
    pub layout: Layout,
}

impl Sample {
    pub fn frame_count(&self) -> usize {
        self.frames.shape[self.layout.time_axis()]
    }

    /// Frame `index` as an `[H, W, C]` tensor, e.g. for previews.
    pub fn frame(&self, index: usize) -> Option<Tensor<f32>> {
        if self.frames.ndim() != 4 || index >= self.frame_count() {
            return None;
        }
        let (time_axis, channel_axis) = match self.layout {
            Layout::Tchw => (0, 1),
            Layout::Cthw => (1, 0),
        };
        let shape = &self.frames.shape;
        let strides = self.frames.strides();
        let (channels, height, width) = (shape[channel_axis], shape[2], shape[3]);

        let base = index * strides[time_axis];
        let mut data = Vec::with_capacity(height * width * channels);
        for y in 0..height {
            for x in 0..width {
                let pixel = base + y * strides[2] + x * strides[3];
                for c in 0..channels {
                    data.push(self.frames.data[pixel + c * strides[channel_axis]]);
                }
            }
        }
        Some(Tensor {
            shape: vec![height, width, channels],
            data,
        })
    }

    /// Copy frames and labels into candle tensors on `device`, keeping shapes.
    pub fn to_candle(&self, device: &Device) -> Result<(CanTensor, CanTensor), DatasetError> {
        let frames = CanTensor::from_vec(
            self.frames.data.clone(),
            self.frames.shape.clone(),
            device,
        )?;
        let labels = CanTensor::from_vec(
            self.labels.data.clone(),
            self.labels.shape.clone(),
            device,
        )?;
        Ok((frames, labels))
    }
}
