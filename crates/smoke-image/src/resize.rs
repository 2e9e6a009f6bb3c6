use crate::{CHANNELS, ImageError, frame_dims, to_rgb_image};
use image::imageops::{self, FilterType};
use smoke_base::Tensor;

/// Default length the shorter frame side is brought up to.
pub const DEFAULT_TARGET: u32 = 224;

/// Upscale-only resize rule.
///
/// When either side of a frame is shorter than `target`, the frame is scaled
/// uniformly so its shorter side becomes `target`. Frames that already meet
/// the target on both sides are left alone; nothing is ever downscaled.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ResizePolicy {
    target: u32,
}

impl Default for ResizePolicy {
    fn default() -> Self {
        Self {
            target: DEFAULT_TARGET,
        }
    }
}

impl ResizePolicy {
    pub fn new(target: u32) -> Self {
        Self { target }
    }

    pub fn target(&self) -> u32 {
        self.target
    }

    /// Uniform scale factor for a `width` x `height` frame, or `None` when no
    /// resize is needed.
    pub fn scale_for(&self, width: usize, height: usize) -> Option<f64> {
        let shorter = width.min(height);
        if shorter == 0 {
            return None;
        }
        let target = self.target as usize;
        if width < target || height < target {
            Some(self.target as f64 / shorter as f64)
        } else {
            None
        }
    }

    /// Output `(height, width)` for an input frame of `height` x `width`.
    pub fn output_dims(&self, height: usize, width: usize) -> (usize, usize) {
        match self.scale_for(width, height) {
            Some(scale) => (
                (height as f64 * scale).round() as usize,
                (width as f64 * scale).round() as usize,
            ),
            None => (height, width),
        }
    }

    /// Apply the policy to one `[H, W, 3]` frame. A frame that needs no
    /// resize comes back as an unchanged copy.
    pub fn apply(&self, frame: &Tensor<u8>) -> Result<Tensor<u8>, ImageError> {
        let (h, w) = frame_dims(frame)?;
        let (out_h, out_w) = self.output_dims(h, w);
        if (out_h, out_w) == (h, w) {
            return Ok(frame.clone());
        }
        resize_frame(frame, out_h, out_w)
    }
}

/// Resample an `[H, W, 3]` frame to `[height, width, 3]` with a bilinear filter.
pub fn resize_frame(
    frame: &Tensor<u8>,
    height: usize,
    width: usize,
) -> Result<Tensor<u8>, ImageError> {
    if height == 0 || width == 0 {
        return Err(ImageError::Shape(format!(
            "cannot resize to {width}x{height}"
        )));
    }
    let source = to_rgb_image(frame)?;
    let resized = imageops::resize(&source, width as u32, height as u32, FilterType::Triangle);
    Ok(Tensor::new(
        vec![height, width, CHANNELS],
        resized.into_raw(),
    )?)
}
