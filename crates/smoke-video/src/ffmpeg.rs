use crate::{Clip, VideoDecoder, VideoError};
use serde::Deserialize;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

/// Locations of the ffmpeg tools used by [`FfmpegDecoder`].
#[derive(Clone, Debug, PartialEq)]
pub struct FfmpegConfig {
    ffmpeg: PathBuf,
    ffprobe: PathBuf,
}

impl Default for FfmpegConfig {
    fn default() -> Self {
        Self {
            ffmpeg: PathBuf::from("ffmpeg"),
            ffprobe: PathBuf::from("ffprobe"),
        }
    }
}

impl FfmpegConfig {
    /// Set the ffmpeg executable (a bare name is looked up on `PATH`).
    pub fn with_ffmpeg(mut self, ffmpeg: impl Into<PathBuf>) -> Self {
        self.ffmpeg = ffmpeg.into();
        self
    }

    /// Set the ffprobe executable.
    pub fn with_ffprobe(mut self, ffprobe: impl Into<PathBuf>) -> Self {
        self.ffprobe = ffprobe.into();
        self
    }

    pub fn ffmpeg(&self) -> &Path {
        &self.ffmpeg
    }

    pub fn ffprobe(&self) -> &Path {
        &self.ffprobe
    }
}

/// Decodes videos by piping them through `ffmpeg` as raw rgb24.
///
/// The frame size is read with `ffprobe` first. Autorotation is disabled so
/// the decoded frames always match the probed stream dimensions.
#[derive(Clone, Debug, Default)]
pub struct FfmpegDecoder {
    config: FfmpegConfig,
}

impl FfmpegDecoder {
    pub fn new(config: FfmpegConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &FfmpegConfig {
        &self.config
    }

    /// Width and height of the first video stream in `path`.
    pub fn probe(&self, path: &Path) -> Result<(usize, usize), VideoError> {
        let output = run(
            &self.config.ffprobe,
            &[
                OsStr::new("-v"),
                OsStr::new("error"),
                OsStr::new("-select_streams"),
                OsStr::new("v:0"),
                OsStr::new("-show_entries"),
                OsStr::new("stream=width,height"),
                OsStr::new("-of"),
                OsStr::new("json"),
                path.as_os_str(),
            ],
        )
        .map_err(|e| match e {
            VideoError::Stream(msg) => VideoError::Probe(msg),
            other => other,
        })?;
        parse_probe(&output)
    }
}

impl VideoDecoder for FfmpegDecoder {
    fn decode(&self, path: &Path) -> Result<Clip, VideoError> {
        if !path.is_file() {
            return Err(VideoError::NotFound(path.to_path_buf()));
        }

        let (width, height) = self.probe(path)?;
        log::debug!("decoding {} ({}x{})", path.display(), width, height);

        let data = run(
            &self.config.ffmpeg,
            &[
                OsStr::new("-v"),
                OsStr::new("error"),
                OsStr::new("-noautorotate"),
                OsStr::new("-i"),
                path.as_os_str(),
                OsStr::new("-f"),
                OsStr::new("rawvideo"),
                OsStr::new("-pix_fmt"),
                OsStr::new("rgb24"),
                OsStr::new("-"),
            ],
        )?;
        if data.is_empty() {
            return Err(VideoError::Stream(format!(
                "no frames decoded from {}",
                path.display()
            )));
        }

        let clip = Clip::from_rgb24(width, height, data)?;
        log::debug!(
            "decoded {} frames from {}",
            clip.frame_count(),
            path.display()
        );
        Ok(clip)
    }
}

// Run a tool to completion and return its stdout.
fn run(program: &Path, args: &[&OsStr]) -> Result<Vec<u8>, VideoError> {
    let output = Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .output()
        .map_err(|e| VideoError::Spawn(format!("{}: {e}", program.display())))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        log::warn!("{} failed: {}", program.display(), stderr.trim());
        return Err(VideoError::Stream(format!(
            "{} exited with {}: {}",
            program.display(),
            output.status,
            stderr.trim()
        )));
    }
    Ok(output.stdout)
}

#[derive(Deserialize)]
struct ProbeOutput {
    #[serde(default)]
    streams: Vec<ProbeStream>,
}

#[derive(Deserialize)]
struct ProbeStream {
    width: Option<usize>,
    height: Option<usize>,
}

fn parse_probe(json: &[u8]) -> Result<(usize, usize), VideoError> {
    let output: ProbeOutput =
        serde_json::from_slice(json).map_err(|e| VideoError::Probe(e.to_string()))?;
    let stream = output
        .streams
        .first()
        .ok_or_else(|| VideoError::Probe("no video stream".to_string()))?;
    match (stream.width, stream.height) {
        (Some(w), Some(h)) if w > 0 && h > 0 => Ok((w, h)),
        (w, h) => Err(VideoError::Probe(format!(
            "invalid stream dimensions {w:?}x{h:?}"
        ))),
    }
}
