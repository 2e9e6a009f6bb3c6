use crate::{
    AdminLabelPolicy, Dataset, DatasetConfig, DatasetError, LabelPolicy, Layout, Metadata, Mode,
    NUM_CLASSES, Sample, SmokeLabel, Transform, VideoRecord,
};
use smoke_base::Tensor;
use smoke_flow::{FlowEstimator, batch_optical_flow};
use smoke_image::{ResizePolicy, normalize};
use smoke_video::{FfmpegDecoder, VideoDecoder};
use std::path::{Path, PathBuf};

/// Smoke video clips addressed by metadata index.
///
/// Video decoding, optical flow, labeling and augmentation are pluggable;
/// [`SmokeVideoDataset::new`] wires up ffmpeg decoding, the configured flow
/// backend and the fixed admin label table.
pub struct SmokeVideoDataset {
    metadata: Metadata,
    root_dir: PathBuf,
    extension: String,
    mode: Mode,
    layout: Layout,
    resize: ResizePolicy,
    decoder: Box<dyn VideoDecoder>,
    flow: Box<dyn FlowEstimator>,
    labels: Box<dyn LabelPolicy>,
    transform: Option<Box<dyn Transform>>,
}

impl SmokeVideoDataset {
    /// Load the metadata file named by `config` and build the dataset.
    pub fn new(config: &DatasetConfig) -> Result<Self, DatasetError> {
        config.validate()?;
        let metadata = Metadata::load(config.metadata_path())?;
        Ok(Self::from_metadata(metadata, config))
    }

    /// Build the dataset from already loaded metadata. The metadata path in
    /// `config` is ignored.
    pub fn from_metadata(metadata: Metadata, config: &DatasetConfig) -> Self {
        log::info!(
            "smoke dataset: {} videos under {}, mode {}, layout {}",
            metadata.len(),
            config.root_dir().display(),
            config.mode(),
            config.layout()
        );
        Self {
            metadata,
            root_dir: config.root_dir().to_path_buf(),
            extension: config.extension().to_string(),
            mode: config.mode(),
            layout: config.layout(),
            resize: ResizePolicy::new(config.resize_to()),
            decoder: Box::new(FfmpegDecoder::new(config.ffmpeg_config())),
            flow: config.flow_estimator(),
            labels: Box::new(AdminLabelPolicy),
            transform: None,
        }
    }

    pub fn with_decoder(mut self, decoder: impl VideoDecoder + 'static) -> Self {
        self.decoder = Box::new(decoder);
        self
    }

    pub fn with_flow_estimator(mut self, flow: impl FlowEstimator + 'static) -> Self {
        self.flow = Box::new(flow);
        self
    }

    pub fn with_label_policy(mut self, labels: impl LabelPolicy + 'static) -> Self {
        self.labels = Box::new(labels);
        self
    }

    pub fn with_transform(mut self, transform: impl Transform + 'static) -> Self {
        self.transform = Some(Box::new(transform));
        self
    }

    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    pub fn root_dir(&self) -> &Path {
        &self.root_dir
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn layout(&self) -> Layout {
        self.layout
    }

    /// `root_dir/<file_name>.<extension>`
    pub fn video_path(&self, record: &VideoRecord) -> PathBuf {
        if self.extension.is_empty() {
            self.root_dir.join(&record.file_name)
        } else {
            self.root_dir
                .join(format!("{}.{}", record.file_name, self.extension))
        }
    }

    /// Label the record at `index` without decoding its video.
    pub fn label(&self, index: usize) -> Option<SmokeLabel> {
        self.metadata.get(index).map(|r| self.labels.classify(r))
    }

    /// Decode `path` and return its frames as `[T, H, W, 3]` in [-1, 1],
    /// upscaled per the resize policy. In flow mode the frames are the
    /// encoded optical flow and there is one fewer of them.
    pub fn load_frames(&self, path: &Path) -> Result<Tensor<f32>, DatasetError> {
        let clip = self
            .decoder
            .decode(path)
            .inspect_err(|e| log::warn!("failed to decode {}: {}", path.display(), e))?;
        if clip.frame_count() == 0 {
            return Err(DatasetError::EmptyClip(path.to_path_buf()));
        }

        let clip = match self.mode {
            Mode::Rgb => clip,
            Mode::Flow => batch_optical_flow(self.flow.as_ref(), &clip)?,
        };

        let (h, w) = (clip.height(), clip.width());
        let (out_h, out_w) = self.resize.output_dims(h, w);
        if (out_h, out_w) != (h, w) {
            log::debug!(
                "upscaling {} from {}x{} to {}x{}",
                path.display(),
                w,
                h,
                out_w,
                out_h
            );
        }

        let mut frames = Vec::with_capacity(clip.frame_count());
        for frame in clip.frames() {
            frames.push(normalize(&self.resize.apply(&frame)?));
        }
        Ok(Tensor::stack(&frames)?)
    }

    fn per_frame_labels(
        &self,
        label: SmokeLabel,
        frame_count: usize,
    ) -> Result<Tensor<f32>, DatasetError> {
        let labels = Tensor::new(vec![NUM_CLASSES], label.probabilities().to_vec())?
            .repeat(frame_count)?;
        Ok(match self.layout {
            Layout::Tchw => labels,
            Layout::Cthw => labels.permute(&[1, 0])?,
        })
    }
}

impl Dataset for SmokeVideoDataset {
    type Item = Sample;

    fn len(&self) -> usize {
        self.metadata.len()
    }

    fn get(&self, index: usize) -> Result<Sample, DatasetError> {
        let record = self
            .metadata
            .get(index)
            .ok_or(DatasetError::IndexOutOfRange {
                index,
                len: self.metadata.len(),
            })?;
        let path = self.video_path(record);
        log::debug!("loading sample {}: {}", index, path.display());

        let mut frames = self.load_frames(&path)?;
        if let Some(transform) = &self.transform {
            frames = transform.apply(frames)?;
            if frames.ndim() != 4 {
                return Err(DatasetError::Shape(format!(
                    "transform must return [T, H, W, C] frames, got {:?}",
                    frames.shape
                )));
            }
        }

        let label = self.labels.classify(record);
        if !label.is_known() {
            log::debug!(
                "{}: label code {} has no class",
                record.file_name,
                record.label_state_admin
            );
        }

        let frame_count = frames.shape[0];
        let labels = self.per_frame_labels(label, frame_count)?;
        let frames = frames.permute(&self.layout.frame_axes())?;

        Ok(Sample {
            frames,
            labels,
            file_name: record.file_name.clone(),
            label,
            layout: self.layout,
        })
    }
}
