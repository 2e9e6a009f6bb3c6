//! Dense optical flow for the smoke clip loader.
//!
//! A [`FlowEstimator`] computes per-pixel motion between two RGB frames.
//! [`flow_to_rgb`] encodes a flow field as an image (hue for direction,
//! brightness for magnitude) so flow clips go through the same resize and
//! normalization path as color clips.
//!
//! [`HornSchunck`] is always available. With the `opencv` feature,
//! `FarnebackEstimator` computes flow through OpenCV instead.

pub mod encode;
pub mod error;
#[cfg(feature = "opencv")]
pub mod farneback;
pub mod field;
pub mod horn_schunck;
mod luma;

pub use encode::flow_to_rgb;
pub use error::FlowError;
#[cfg(feature = "opencv")]
pub use farneback::{FarnebackConfig, FarnebackEstimator};
pub use field::FlowField;
pub use horn_schunck::{HornSchunck, HornSchunckConfig};

use smoke_base::Tensor;
use smoke_video::Clip;

/// Estimates dense motion from `prev` to `next`, both `[H, W, 3]` frames of
/// the same size.
pub trait FlowEstimator: Send + Sync {
    fn estimate(&self, prev: &Tensor<u8>, next: &Tensor<u8>) -> Result<FlowField, FlowError>;
}

/// Compute flow between every pair of consecutive frames and encode each
/// field as RGB. A clip of `T` frames yields a clip of `T - 1` flow frames.
pub fn batch_optical_flow(estimator: &dyn FlowEstimator, clip: &Clip) -> Result<Clip, FlowError> {
    let count = clip.frame_count();
    if count < 2 {
        return Err(FlowError::NotEnoughFrames(count));
    }

    let mut encoded = Vec::with_capacity(count - 1);
    let mut frames = clip.frames();
    let Some(mut prev) = frames.next() else {
        return Err(FlowError::NotEnoughFrames(count));
    };
    for next in frames {
        let field = estimator.estimate(&prev, &next)?;
        encoded.push(flow_to_rgb(&field)?);
        prev = next;
    }

    log::debug!("computed {} flow frames", encoded.len());
    Ok(Clip::from_frames(&encoded)?)
}
