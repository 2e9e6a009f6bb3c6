use log::{LevelFilter, Log};
use smoke_base::{FileLogger, LogConfig, StdoutLogger};
use std::fs;

fn record_at(level: log::Level, message: std::fmt::Arguments<'_>) -> log::Record<'_> {
    log::RecordBuilder::new()
        .level(level)
        .target("test")
        .file(Some("logging_tests.rs"))
        .line(Some(42))
        .args(message)
        .build()
}

#[test]
fn test_stdout_logger_respects_level() {
    let logger = StdoutLogger::new(LevelFilter::Info);
    let info = log::MetadataBuilder::new().level(log::Level::Info).build();
    let debug = log::MetadataBuilder::new().level(log::Level::Debug).build();
    assert!(logger.enabled(&info));
    assert!(!logger.enabled(&debug));

    logger.log(&record_at(log::Level::Info, format_args!("visible")));
    logger.flush();
}

#[test]
fn test_file_logger_writes_line_format() {
    let dir = std::env::temp_dir().join(format!("smoke-log-{}-write", std::process::id()));
    let _ = fs::remove_dir_all(&dir);

    let logger = FileLogger::new(&dir, LevelFilter::Debug).unwrap();
    logger.log(&record_at(log::Level::Warn, format_args!("decoder failed")));
    logger.flush();

    let path = dir.join(format!("{}.log", smoke_base::logging::format_today()));
    let content = fs::read_to_string(path).unwrap();
    assert!(content.contains("[WARN]"));
    assert!(content.contains("logging_tests.rs:42 - decoder failed"));
    assert!(content.ends_with('\n'));

    fs::remove_dir_all(&dir).ok();
}

#[test]
fn test_file_logger_filters_below_level() {
    let dir = std::env::temp_dir().join(format!("smoke-log-{}-filter", std::process::id()));
    let _ = fs::remove_dir_all(&dir);

    let logger = FileLogger::new(&dir, LevelFilter::Warn).unwrap();
    logger.log(&record_at(log::Level::Info, format_args!("hidden")));
    logger.flush();

    let path = dir.join(format!("{}.log", smoke_base::logging::format_today()));
    let content = fs::read_to_string(path).unwrap();
    assert!(!content.contains("hidden"));

    fs::remove_dir_all(&dir).ok();
}

#[test]
fn test_log_config_builder() {
    let config = LogConfig::default()
        .with_level(LevelFilter::Trace)
        .with_dir("/tmp/smoke-logs");
    assert_eq!(config.level(), LevelFilter::Trace);
    assert_eq!(config.dir().unwrap().to_str(), Some("/tmp/smoke-logs"));
}

#[test]
fn test_log_config_default_has_no_dir() {
    assert!(LogConfig::default().dir().is_none());
}

#[test]
fn test_timestamp_structure() {
    let ts = smoke_base::logging::format_timestamp();
    assert_eq!(ts.len(), 19);
    assert_eq!(&ts[4..5], "-");
    assert_eq!(&ts[10..11], "T");
    assert_eq!(&ts[16..17], ":");
}

#[test]
fn test_log_config_from_values() {
    let config = LogConfig::from_values(Some("warn"), Some("/var/log/smoke"));
    assert_eq!(config.level(), LevelFilter::Warn);
    assert_eq!(config.dir().unwrap().to_str(), Some("/var/log/smoke"));

    // level names are case-insensitive and trimmed
    let config = LogConfig::from_values(Some(" TRACE "), None);
    assert_eq!(config.level(), LevelFilter::Trace);
    assert!(config.dir().is_none());
}

#[test]
fn test_log_config_from_values_falls_back() {
    let default = LogConfig::default();

    let config = LogConfig::from_values(Some("loud"), Some(""));
    assert_eq!(config.level(), default.level());
    assert!(config.dir().is_none());

    let config = LogConfig::from_values(Some(""), None);
    assert_eq!(config, default);

    assert_eq!(LogConfig::from_values(None, None), default);
}

// The only test in this binary that touches the process environment.
#[test]
fn test_log_config_from_env() {
    use smoke_base::logging::{LOG_DIR_ENV, LOG_LEVEL_ENV};

    unsafe {
        std::env::set_var(LOG_LEVEL_ENV, "error");
        std::env::set_var(LOG_DIR_ENV, "/tmp/smoke-env-logs");
    }
    let config = LogConfig::from_env();
    assert_eq!(config.level(), LevelFilter::Error);
    assert_eq!(config.dir().unwrap().to_str(), Some("/tmp/smoke-env-logs"));

    unsafe {
        std::env::set_var(LOG_LEVEL_ENV, "not-a-level");
        std::env::set_var(LOG_DIR_ENV, "");
    }
    let config = LogConfig::from_env();
    assert_eq!(config.level(), LogConfig::default().level());
    assert!(config.dir().is_none());

    unsafe {
        std::env::remove_var(LOG_LEVEL_ENV);
        std::env::remove_var(LOG_DIR_ENV);
    }
    assert_eq!(LogConfig::from_env(), LogConfig::default());
}
