//! Video clip decoding for the smoke clip loader.
//!
//! A [`VideoDecoder`] turns a file on disk into a [`Clip`]: every frame of
//! the video as RGB, stacked into a `Tensor<u8>` of shape `[T, H, W, 3]`.
//! [`FfmpegDecoder`] is the default backend and shells out to `ffprobe` and
//! `ffmpeg`.

pub mod clip;
pub mod error;
pub mod ffmpeg;

pub use clip::Clip;
pub use error::VideoError;
pub use ffmpeg::{FfmpegConfig, FfmpegDecoder};

use std::path::Path;

/// Decodes a whole video file into memory.
pub trait VideoDecoder: Send + Sync {
    fn decode(&self, path: &Path) -> Result<Clip, VideoError>;
}
