//! Per-frame image operations for the smoke clip loader.
//!
//! Frames are `Tensor<u8>` in HWC layout: `[height, width, 3]`, RGB.
//! This crate wraps the `image` crate for resampling and PNG encoding and
//! provides the normalization and color conversions the loader needs.

pub mod color;
pub mod error;
pub mod normalize;
pub mod resize;

pub use color::hsv_to_rgb;
pub use error::ImageError;
pub use normalize::{denormalize, normalize};
pub use resize::{ResizePolicy, resize_frame};

use image::{ImageEncoder, RgbImage};
use smoke_base::Tensor;

/// Number of channels in every frame handled by this crate.
pub const CHANNELS: usize = 3;

/// Check that `frame` is `[H, W, 3]` and return `(height, width)`.
pub fn frame_dims(frame: &Tensor<u8>) -> Result<(usize, usize), ImageError> {
    match frame.shape.as_slice() {
        &[h, w, CHANNELS] => Ok((h, w)),
        other => Err(ImageError::Shape(format!(
            "expected [H, W, {CHANNELS}] frame, got {other:?}"
        ))),
    }
}

pub(crate) fn to_rgb_image(frame: &Tensor<u8>) -> Result<RgbImage, ImageError> {
    let (h, w) = frame_dims(frame)?;
    RgbImage::from_raw(w as u32, h as u32, frame.data.clone()).ok_or_else(|| {
        ImageError::Shape(format!("{w}x{h} frame does not match buffer of {}", frame.len()))
    })
}

/// Encode an RGB frame as PNG bytes, e.g. to preview decoded or flow frames.
pub fn encode_png(frame: &Tensor<u8>) -> Result<Vec<u8>, ImageError> {
    let (h, w) = frame_dims(frame)?;
    let mut buffer = Vec::new();
    image::codecs::png::PngEncoder::new(&mut buffer)
        .write_image(
            &frame.data,
            w as u32,
            h as u32,
            image::ExtendedColorType::Rgb8,
        )
        .map_err(|e| ImageError::Encode(e.to_string()))?;
    Ok(buffer)
}
