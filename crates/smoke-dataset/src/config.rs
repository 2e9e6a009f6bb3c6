use crate::DatasetError;
use serde::{Deserialize, Serialize};
#[cfg(feature = "opencv")]
use smoke_flow::{FarnebackConfig, FarnebackEstimator};
use smoke_flow::{FlowEstimator, HornSchunck, HornSchunckConfig};
use smoke_image::resize::DEFAULT_TARGET;
use smoke_video::FfmpegConfig;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// What each frame of a sample encodes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Decoded RGB frames.
    #[default]
    Rgb,
    /// Optical flow between consecutive frames, encoded as RGB.
    Flow,
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Rgb => write!(f, "rgb"),
            Mode::Flow => write!(f, "flow"),
        }
    }
}

impl FromStr for Mode {
    type Err = DatasetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "rgb" => Ok(Mode::Rgb),
            "flow" => Ok(Mode::Flow),
            other => Err(DatasetError::Config(format!(
                "unknown mode {other:?}, expected \"rgb\" or \"flow\""
            ))),
        }
    }
}

/// Dimension order of sample tensors.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Layout {
    /// frames `[T, C, H, W]`, labels `[T, 2]`
    #[default]
    Tchw,
    /// frames `[C, T, H, W]`, labels `[2, T]`
    Cthw,
}

impl Layout {
    /// Axes that take a `[T, H, W, C]` tensor to this layout.
    pub fn frame_axes(&self) -> [usize; 4] {
        match self {
            Layout::Tchw => [0, 3, 1, 2],
            Layout::Cthw => [3, 0, 1, 2],
        }
    }

    /// Position of the time axis in the frame tensor.
    pub fn time_axis(&self) -> usize {
        match self {
            Layout::Tchw => 0,
            Layout::Cthw => 1,
        }
    }
}

impl fmt::Display for Layout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Layout::Tchw => write!(f, "tchw"),
            Layout::Cthw => write!(f, "cthw"),
        }
    }
}

impl FromStr for Layout {
    type Err = DatasetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "tchw" => Ok(Layout::Tchw),
            "cthw" => Ok(Layout::Cthw),
            other => Err(DatasetError::Config(format!(
                "unknown layout {other:?}, expected \"tchw\" or \"cthw\""
            ))),
        }
    }
}

/// Optical flow estimator used in [`Mode::Flow`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlowBackend {
    /// Built-in Horn–Schunck estimator.
    #[default]
    HornSchunck,
    /// OpenCV Farneback estimator, needs the `opencv` feature.
    Farneback,
}

impl FlowBackend {
    /// Whether this build can construct the backend.
    pub fn is_available(&self) -> bool {
        match self {
            FlowBackend::HornSchunck => true,
            FlowBackend::Farneback => cfg!(feature = "opencv"),
        }
    }
}

impl fmt::Display for FlowBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FlowBackend::HornSchunck => write!(f, "horn_schunck"),
            FlowBackend::Farneback => write!(f, "farneback"),
        }
    }
}

impl FromStr for FlowBackend {
    type Err = DatasetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "horn_schunck" => Ok(FlowBackend::HornSchunck),
            "farneback" => Ok(FlowBackend::Farneback),
            other => Err(DatasetError::Config(format!(
                "unknown flow backend {other:?}, expected \"horn_schunck\" or \"farneback\""
            ))),
        }
    }
}

fn default_resize_to() -> u32 {
    DEFAULT_TARGET
}

fn default_extension() -> String {
    "mp4".to_string()
}

/// Settings for a [`SmokeVideoDataset`](crate::SmokeVideoDataset).
///
/// Only `metadata_path` and `root_dir` are required when read from JSON:
///
/// ```json
/// { "metadata_path": "metadata.json", "root_dir": "videos", "mode": "flow",
///   "flow_backend": "farneback" }
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DatasetConfig {
    metadata_path: PathBuf,
    root_dir: PathBuf,
    #[serde(default)]
    mode: Mode,
    #[serde(default)]
    layout: Layout,
    #[serde(default)]
    flow_backend: FlowBackend,
    #[serde(default = "default_resize_to")]
    resize_to: u32,
    #[serde(default = "default_extension")]
    extension: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    ffmpeg: Option<PathBuf>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    ffprobe: Option<PathBuf>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    flow_alpha: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    flow_iterations: Option<usize>,
}

impl DatasetConfig {
    pub fn new(metadata_path: impl Into<PathBuf>, root_dir: impl Into<PathBuf>) -> Self {
        Self {
            metadata_path: metadata_path.into(),
            root_dir: root_dir.into(),
            mode: Mode::default(),
            layout: Layout::default(),
            flow_backend: FlowBackend::default(),
            resize_to: default_resize_to(),
            extension: default_extension(),
            ffmpeg: None,
            ffprobe: None,
            flow_alpha: None,
            flow_iterations: None,
        }
    }

    /// Read a config from JSON. Relative paths inside it are resolved
    /// against the directory holding the config file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, DatasetError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .map_err(|e| DatasetError::Io(format!("{}: {e}", path.display())))?;
        let mut config: Self = serde_json::from_str(&json)
            .map_err(|e| DatasetError::Config(format!("{}: {e}", path.display())))?;

        if let Some(base) = path.parent() {
            config.metadata_path = resolve(base, &config.metadata_path);
            config.root_dir = resolve(base, &config.root_dir);
        }
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), DatasetError> {
        if self.resize_to == 0 {
            return Err(DatasetError::Config("resize_to must be positive".to_string()));
        }
        if !self.flow_backend.is_available() {
            return Err(DatasetError::Config(format!(
                "flow backend {} needs the opencv feature",
                self.flow_backend
            )));
        }
        if self.flow_alpha.is_some_and(|a| a.is_nan() || a <= 0.0) {
            return Err(DatasetError::Config("flow_alpha must be positive".to_string()));
        }
        Ok(())
    }

    pub fn with_mode(mut self, mode: Mode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_layout(mut self, layout: Layout) -> Self {
        self.layout = layout;
        self
    }

    pub fn with_flow_backend(mut self, flow_backend: FlowBackend) -> Self {
        self.flow_backend = flow_backend;
        self
    }

    /// Set the length the shorter frame side is upscaled to.
    pub fn with_resize_to(mut self, resize_to: u32) -> Self {
        self.resize_to = resize_to;
        self
    }

    /// Set the video file extension, without the leading dot.
    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into();
        self
    }

    pub fn with_ffmpeg(mut self, ffmpeg: impl Into<PathBuf>) -> Self {
        self.ffmpeg = Some(ffmpeg.into());
        self
    }

    pub fn with_ffprobe(mut self, ffprobe: impl Into<PathBuf>) -> Self {
        self.ffprobe = Some(ffprobe.into());
        self
    }

    pub fn with_flow_alpha(mut self, alpha: f32) -> Self {
        self.flow_alpha = Some(alpha);
        self
    }

    pub fn with_flow_iterations(mut self, iterations: usize) -> Self {
        self.flow_iterations = Some(iterations);
        self
    }

    // Getters
    pub fn metadata_path(&self) -> &Path {
        &self.metadata_path
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

    pub fn flow_backend(&self) -> FlowBackend {
        self.flow_backend
    }

    pub fn resize_to(&self) -> u32 {
        self.resize_to
    }

    pub fn extension(&self) -> &str {
        &self.extension
    }

    pub fn ffmpeg_config(&self) -> FfmpegConfig {
        let mut config = FfmpegConfig::default();
        if let Some(ffmpeg) = &self.ffmpeg {
            config = config.with_ffmpeg(ffmpeg);
        }
        if let Some(ffprobe) = &self.ffprobe {
            config = config.with_ffprobe(ffprobe);
        }
        config
    }

    pub fn flow_config(&self) -> HornSchunckConfig {
        let mut config = HornSchunckConfig::default();
        if let Some(alpha) = self.flow_alpha {
            config = config.with_alpha(alpha);
        }
        if let Some(iterations) = self.flow_iterations {
            config = config.with_iterations(iterations);
        }
        config
    }

    /// Farneback settings; `flow_iterations` overrides its iteration count.
    #[cfg(feature = "opencv")]
    pub fn farneback_config(&self) -> FarnebackConfig {
        let mut config = FarnebackConfig::default();
        if let Some(iterations) = self.flow_iterations {
            config = config.with_iterations(iterations as i32);
        }
        config
    }

    /// Build the configured flow estimator. Falls back to Horn–Schunck when
    /// the backend is not compiled in.
    pub fn flow_estimator(&self) -> Box<dyn FlowEstimator> {
        match self.flow_backend {
            #[cfg(feature = "opencv")]
            FlowBackend::Farneback => {
                Box::new(FarnebackEstimator::new(self.farneback_config()))
            }
            #[cfg(not(feature = "opencv"))]
            FlowBackend::Farneback => {
                log::warn!("flow backend farneback needs the opencv feature, using horn_schunck");
                Box::new(HornSchunck::new(self.flow_config()))
            }
            FlowBackend::HornSchunck => Box::new(HornSchunck::new(self.flow_config())),
        }
    }
}

fn resolve(base: &Path, path: &Path) -> PathBuf {
    if path.is_relative() {
        base.join(path)
    } else {
        path.to_path_buf()
    }
}
