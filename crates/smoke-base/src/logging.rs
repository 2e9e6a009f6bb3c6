use log::{LevelFilter, Log, Metadata, Record};
use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Mutex;
use std::time::{SystemTime, UNIX_EPOCH};

/// Environment variable holding the maximum log level (e.g. `debug`).
pub const LOG_LEVEL_ENV: &str = "SMOKE_LOG";

/// Environment variable holding a log directory. Unset means stdout.
pub const LOG_DIR_ENV: &str = "SMOKE_LOG_DIR";

/// Where and how verbosely to log.
#[derive(Clone, Debug, PartialEq)]
pub struct LogConfig {
    level: LevelFilter,
    dir: Option<PathBuf>,
}

impl Default for LogConfig {
    fn default() -> Self {
        let level = if cfg!(debug_assertions) {
            LevelFilter::Debug
        } else {
            LevelFilter::Info
        };
        Self { level, dir: None }
    }
}

impl LogConfig {
    /// Build a config from `SMOKE_LOG` and `SMOKE_LOG_DIR`, falling back to
    /// the defaults for anything unset, empty or unparsable.
    pub fn from_env() -> Self {
        Self::from_values(
            std::env::var(LOG_LEVEL_ENV).ok().as_deref(),
            std::env::var(LOG_DIR_ENV).ok().as_deref(),
        )
    }

    /// Same as [`LogConfig::from_env`] with the variable values given directly.
    pub fn from_values(level: Option<&str>, dir: Option<&str>) -> Self {
        let mut config = Self::default();
        if let Some(value) = level.map(str::trim).filter(|v| !v.is_empty()) {
            match LevelFilter::from_str(value) {
                Ok(level) => config.level = level,
                Err(_) => eprintln!("ignoring invalid {LOG_LEVEL_ENV} value {value:?}"),
            }
        }
        if let Some(dir) = dir.filter(|d| !d.is_empty()) {
            config.dir = Some(PathBuf::from(dir));
        }
        config
    }

    pub fn with_level(mut self, level: LevelFilter) -> Self {
        self.level = level;
        self
    }

    /// Log into date-named files under `dir` instead of stdout.
    pub fn with_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.dir = Some(dir.into());
        self
    }

    pub fn level(&self) -> LevelFilter {
        self.level
    }

    pub fn dir(&self) -> Option<&PathBuf> {
        self.dir.as_ref()
    }
}

/// A logger that writes to stdout.
pub struct StdoutLogger {
    level: LevelFilter,
}

impl StdoutLogger {
    pub fn new(level: LevelFilter) -> Self {
        Self { level }
    }
}

/// A logger that writes to date-named files with automatic day rollover.
pub struct FileLogger {
    level: LevelFilter,
    state: Mutex<FileLoggerState>,
}

struct FileLoggerState {
    dir: PathBuf,
    current_date: String,
    file: File,
}

impl FileLogger {
    /// Create a FileLogger writing `YYYY-MM-DD.log` files into `dir`.
    pub fn new(dir: impl Into<PathBuf>, level: LevelFilter) -> std::io::Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;

        let current_date = format_today();
        let file = open_append(&dir, &current_date)?;

        Ok(FileLogger {
            level,
            state: Mutex::new(FileLoggerState {
                dir,
                current_date,
                file,
            }),
        })
    }
}

fn open_append(dir: &std::path::Path, date: &str) -> std::io::Result<File> {
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(dir.join(format!("{date}.log")))
}

fn format_record(record: &Record) -> String {
    format!(
        "{} [{}] [thread:{:?}] {}:{} - {}",
        format_timestamp(),
        record.level(),
        std::thread::current().id(),
        record.file().unwrap_or("unknown"),
        record.line().unwrap_or(0),
        record.args()
    )
}

impl Log for StdoutLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            println!("{}", format_record(record));
        }
    }

    fn flush(&self) {
        std::io::stdout().flush().ok();
    }
}

impl Log for FileLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());

        let today = format_today();
        if today != state.current_date {
            match open_append(&state.dir, &today) {
                Ok(file) => {
                    state.file = file;
                    state.current_date = today;
                }
                // keep writing to the previous day's file
                Err(e) => eprintln!("failed to open log file for {today}: {e}"),
            }
        }

        let line = format_record(record) + "\n";
        if let Err(e) = state.file.write_all(line.as_bytes()) {
            eprintln!("failed to write to log file: {e}");
            eprintln!("{}", line.trim_end());
        }
    }

    fn flush(&self) {
        let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        state.file.flush().ok();
    }
}

fn unix_seconds() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

/// Format current time as YYYY-MM-DDTHH:MM:SS (UTC)
pub fn format_timestamp() -> String {
    let secs = unix_seconds();
    let (year, month, day) = civil_from_days((secs / 86400) as i64);
    let time_of_day = secs % 86400;
    format!(
        "{:04}-{:02}-{:02}T{:02}:{:02}:{:02}",
        year,
        month,
        day,
        time_of_day / 3600,
        (time_of_day % 3600) / 60,
        time_of_day % 60
    )
}

/// Format current date as YYYY-MM-DD (UTC)
pub fn format_today() -> String {
    let (year, month, day) = civil_from_days((unix_seconds() / 86400) as i64);
    format!("{:04}-{:02}-{:02}", year, month, day)
}

// Howard Hinnant's days-to-civil algorithm.
fn civil_from_days(z: i64) -> (i64, u32, u32) {
    let z = z + 719468;
    let era = if z >= 0 { z } else { z - 146096 } / 146097;
    let doe = (z - era * 146097) as u32;
    let yoe = (doe - doe / 1460 + doe / 36524 - doe / 146096) / 365;
    let y = yoe as i64 + era * 400;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let d = doy - (153 * mp + 2) / 5 + 1;
    let m = if mp < 10 { mp + 3 } else { mp - 9 };
    let y = if m <= 2 { y + 1 } else { y };
    (y, m, d)
}

/// Install the global logger described by `config`.
///
/// Only the first call per process takes effect; later calls are ignored.
/// Fails only if the log directory cannot be created or opened.
pub fn init_logger(config: &LogConfig) -> std::io::Result<()> {
    let logger: Box<dyn Log> = match config.dir() {
        Some(dir) => Box::new(FileLogger::new(dir, config.level())?),
        None => Box::new(StdoutLogger::new(config.level())),
    };

    // set_logger needs a 'static reference; the logger lives for the process.
    if log::set_logger(Box::leak(logger)).is_ok() {
        log::set_max_level(config.level());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_civil_from_days_epoch() {
        assert_eq!(civil_from_days(0), (1970, 1, 1));
    }

    #[test]
    fn test_civil_from_days_leap_day() {
        assert_eq!(civil_from_days(11016), (2000, 2, 29));
    }

    #[test]
    fn test_file_logger_rolls_over_to_today() {
        let dir = std::env::temp_dir().join(format!("smoke-log-{}-rollover", std::process::id()));
        let _ = fs::remove_dir_all(&dir);

        let logger = FileLogger::new(&dir, LevelFilter::Info).unwrap();
        {
            let mut state = logger.state.lock().unwrap();
            state.current_date = "1999-01-01".to_string();
            state.file = open_append(&dir, "1999-01-01").unwrap();
        }

        let record = log::RecordBuilder::new()
            .level(log::Level::Info)
            .file(Some("rollover.rs"))
            .line(Some(7))
            .args(format_args!("after rollover"))
            .build();
        logger.log(&record);

        let today = dir.join(format!("{}.log", format_today()));
        let content = fs::read_to_string(&today).unwrap();
        assert!(content.contains("after rollover"));
        assert!(content.contains("rollover.rs:7"));
        assert_eq!(logger.state.lock().unwrap().current_date, format_today());

        fs::remove_dir_all(&dir).ok();
    }
}
