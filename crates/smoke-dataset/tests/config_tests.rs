use smoke_base::Tensor;
use smoke_dataset::{DatasetConfig, DatasetError, FlowBackend, Layout, Mode};
use smoke_flow::FlowEstimator;
use std::path::{Path, PathBuf};

#[test]
fn test_defaults() {
    let config = DatasetConfig::new("meta.json", "videos");
    assert_eq!(config.metadata_path(), Path::new("meta.json"));
    assert_eq!(config.root_dir(), Path::new("videos"));
    assert_eq!(config.mode(), Mode::Rgb);
    assert_eq!(config.layout(), Layout::Tchw);
    assert_eq!(config.flow_backend(), FlowBackend::HornSchunck);
    assert_eq!(config.resize_to(), 224);
    assert_eq!(config.extension(), "mp4");
    assert_eq!(config.ffmpeg_config().ffmpeg(), Path::new("ffmpeg"));
    assert_eq!(config.flow_config().alpha(), 15.0);
    assert_eq!(config.flow_config().iterations(), 64);
    assert!(config.validate().is_ok());
}

#[test]
fn test_builder() {
    let config = DatasetConfig::new("meta.json", "videos")
        .with_mode(Mode::Flow)
        .with_layout(Layout::Cthw)
        .with_resize_to(112)
        .with_extension("webm")
        .with_ffmpeg("/opt/ffmpeg/bin/ffmpeg")
        .with_ffprobe("/opt/ffmpeg/bin/ffprobe")
        .with_flow_alpha(3.0)
        .with_flow_iterations(10);

    assert_eq!(config.mode(), Mode::Flow);
    assert_eq!(config.layout(), Layout::Cthw);
    assert_eq!(config.resize_to(), 112);
    assert_eq!(config.extension(), "webm");
    assert_eq!(
        config.ffmpeg_config().ffmpeg(),
        Path::new("/opt/ffmpeg/bin/ffmpeg")
    );
    assert_eq!(
        config.ffmpeg_config().ffprobe(),
        Path::new("/opt/ffmpeg/bin/ffprobe")
    );
    assert_eq!(config.flow_config().alpha(), 3.0);
    assert_eq!(config.flow_config().iterations(), 10);
}

#[test]
fn test_validate_rejects_bad_values() {
    let zero = DatasetConfig::new("m", "r").with_resize_to(0);
    assert!(matches!(zero.validate(), Err(DatasetError::Config(_))));

    let negative = DatasetConfig::new("m", "r").with_flow_alpha(-1.0);
    assert!(matches!(negative.validate(), Err(DatasetError::Config(_))));

    let nan = DatasetConfig::new("m", "r").with_flow_alpha(f32::NAN);
    assert!(matches!(nan.validate(), Err(DatasetError::Config(_))));
}

#[test]
fn test_mode_and_layout_parse() {
    assert_eq!("rgb".parse::<Mode>().unwrap(), Mode::Rgb);
    assert_eq!("flow".parse::<Mode>().unwrap(), Mode::Flow);
    assert!(matches!("RGB".parse::<Mode>(), Err(DatasetError::Config(_))));
    assert_eq!(Mode::Flow.to_string(), "flow");

    assert_eq!("tchw".parse::<Layout>().unwrap(), Layout::Tchw);
    assert_eq!("cthw".parse::<Layout>().unwrap(), Layout::Cthw);
    assert!("nchw".parse::<Layout>().is_err());
    assert_eq!(Layout::Cthw.to_string(), "cthw");
}

#[test]
fn test_layout_axes() {
    assert_eq!(Layout::Tchw.frame_axes(), [0, 3, 1, 2]);
    assert_eq!(Layout::Cthw.frame_axes(), [3, 0, 1, 2]);
    assert_eq!(Layout::Tchw.time_axis(), 0);
    assert_eq!(Layout::Cthw.time_axis(), 1);
}

fn temp_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("smoke-config-test-{}-{name}", std::process::id()));
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

#[test]
fn test_from_json_file_resolves_relative_paths() {
    let dir = temp_dir("relative");
    let path = dir.join("dataset.json");
    std::fs::write(
        &path,
        r#"{"metadata_path": "metadata.json", "root_dir": "/data/videos", "mode": "flow"}"#,
    )
    .unwrap();

    let config = DatasetConfig::from_json_file(&path).unwrap();
    assert_eq!(config.metadata_path(), dir.join("metadata.json"));
    assert_eq!(config.root_dir(), Path::new("/data/videos"));
    assert_eq!(config.mode(), Mode::Flow);
    assert_eq!(config.layout(), Layout::Tchw);
    assert_eq!(config.resize_to(), 224);

    std::fs::remove_dir_all(&dir).ok();
}

#[test]
fn test_from_json_file_errors() {
    let dir = temp_dir("errors");

    let missing = DatasetConfig::from_json_file(dir.join("missing.json"));
    assert!(matches!(missing, Err(DatasetError::Io(_))));

    let bad_mode = dir.join("bad_mode.json");
    std::fs::write(
        &bad_mode,
        r#"{"metadata_path": "m.json", "root_dir": "v", "mode": "depth"}"#,
    )
    .unwrap();
    assert!(matches!(
        DatasetConfig::from_json_file(&bad_mode),
        Err(DatasetError::Config(_))
    ));

    let zero = dir.join("zero.json");
    std::fs::write(
        &zero,
        r#"{"metadata_path": "m.json", "root_dir": "v", "resize_to": 0}"#,
    )
    .unwrap();
    assert!(matches!(
        DatasetConfig::from_json_file(&zero),
        Err(DatasetError::Config(_))
    ));

    std::fs::remove_dir_all(&dir).ok();
}

#[test]
fn test_json_round_trip_keeps_settings() {
    let config = DatasetConfig::new("m.json", "videos")
        .with_layout(Layout::Cthw)
        .with_flow_iterations(5);
    let json = serde_json::to_string(&config).unwrap();
    assert!(!json.contains("ffmpeg"));
    let parsed: DatasetConfig = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, config);
}

#[test]
fn test_flow_backend_parse() {
    assert_eq!(
        "horn_schunck".parse::<FlowBackend>().unwrap(),
        FlowBackend::HornSchunck
    );
    assert_eq!(
        "farneback".parse::<FlowBackend>().unwrap(),
        FlowBackend::Farneback
    );
    assert!(matches!(
        "lucas_kanade".parse::<FlowBackend>(),
        Err(DatasetError::Config(_))
    ));
    assert_eq!(FlowBackend::Farneback.to_string(), "farneback");
    assert!(FlowBackend::HornSchunck.is_available());
}

#[test]
fn test_flow_backend_from_json() {
    let json = r#"{"metadata_path": "m.json", "root_dir": "v", "flow_backend": "farneback"}"#;
    let config: DatasetConfig = serde_json::from_str(json).unwrap();
    assert_eq!(config.flow_backend(), FlowBackend::Farneback);

    let json = r#"{"metadata_path": "m.json", "root_dir": "v", "flow_backend": "tvl1"}"#;
    assert!(serde_json::from_str::<DatasetConfig>(json).is_err());
}

#[test]
fn test_flow_estimator_follows_backend() {
    let frame = Tensor::new(vec![32, 32, 3], vec![90u8; 32 * 32 * 3]).unwrap();
    for backend in [FlowBackend::HornSchunck, FlowBackend::Farneback] {
        let config = DatasetConfig::new("m", "r")
            .with_flow_backend(backend)
            .with_flow_iterations(2);
        let field = config.flow_estimator().estimate(&frame, &frame).unwrap();
        assert_eq!((field.width(), field.height()), (32, 32));
    }
}

#[cfg(not(feature = "opencv"))]
#[test]
fn test_farneback_needs_opencv_feature() {
    assert!(!FlowBackend::Farneback.is_available());
    let config = DatasetConfig::new("m", "r").with_flow_backend(FlowBackend::Farneback);
    assert!(matches!(config.validate(), Err(DatasetError::Config(_))));
}

#[cfg(feature = "opencv")]
#[test]
fn test_farneback_config_from_dataset_config() {
    assert!(FlowBackend::Farneback.is_available());
    let config = DatasetConfig::new("m", "r")
        .with_flow_backend(FlowBackend::Farneback)
        .with_flow_iterations(6);
    assert!(config.validate().is_ok());
    assert_eq!(config.farneback_config().iterations(), 6);
}
