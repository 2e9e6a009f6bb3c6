//! Smoke video dataset for training frame-level smoke classifiers.
//!
//! [`SmokeVideoDataset`] maps an index to a [`Sample`]: the clip named by
//! metadata record `index`, decoded, optionally turned into optical flow,
//! upscaled to the target size, normalized to [-1, 1], and paired with a
//! per-frame two-class label derived from the record's admin label code.

pub mod config;
pub mod dataset;
pub mod error;
pub mod label;
pub mod loader;
pub mod metadata;
pub mod sample;
pub mod transform;

pub use config::{DatasetConfig, FlowBackend, Layout, Mode};
pub use dataset::{Dataset, DatasetIter};
pub use error::DatasetError;
pub use label::{
    AdminLabelPolicy, LabelPolicy, NEGATIVE_CODES, NUM_CLASSES, POSITIVE_CODES, SmokeLabel,
};
pub use loader::SmokeVideoDataset;
pub use metadata::{Metadata, VideoRecord};
pub use sample::Sample;
pub use transform::Transform;
