//! Logging setup on top of flexi_logger
//!
//! Three line formats are available: `text` (default), `ext` (adds the
//! source location) and `json`. Log files land in the per-user log
//! directory unless an explicit path is given, and are duplicated to stderr.

use flexi_logger::{DeferredNow, Duplicate, FileSpec, Logger, LoggerHandle};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::{Mutex, OnceLock};
use strum_macros::{Display, EnumString};

/// Global logger handle, kept for runtime reconfiguration
static LOGGER_HANDLE: OnceLock<Mutex<LoggerHandle>> = OnceLock::new();

const TARGET_PREFIX: &str = "guikit::";
const APP_DIR: &str = "Guikit";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum LogFormat {
    #[default]
    Text,
    Ext,
    Json,
}

/// Per-user directory for log files
pub fn default_log_dir() -> Option<PathBuf> {
    dirs::data_local_dir().map(|dir| dir.join(APP_DIR).join("logs"))
}

/// Bare file names go to the per-user log directory; paths are kept as given
pub fn resolve_log_file(file: &Path) -> PathBuf {
    let bare = file.parent().map_or(true, |parent| parent.as_os_str().is_empty());
    match default_log_dir() {
        Some(dir) if bare && !file.is_absolute() => dir.join(file),
        _ => file.to_path_buf(),
    }
}

pub fn init_logging(
    log_level: Option<&str>,
    log_format: Option<&str>,
    log_file: Option<&Path>,
    color_enabled: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let level = log_level.unwrap_or("info");
    let format = match log_format {
        Some(name) => LogFormat::from_str(name)
            .map_err(|_| format!("Invalid log format '{}'. Use text, ext or json", name))?,
        None => LogFormat::default(),
    };

    let mut logger = Logger::try_with_str(level)?;
    logger = match (format, color_enabled) {
        (LogFormat::Json, _) => logger.format(json_format),
        (LogFormat::Ext, true) => logger.format(extended_color_format),
        (LogFormat::Ext, false) => logger.format(extended_format),
        (LogFormat::Text, true) => logger.format(simple_color_format),
        (LogFormat::Text, false) => logger.format(simple_format),
    };

    if let Some(file) = log_file {
        let path = resolve_log_file(file);
        if let Some(dir) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
            std::fs::create_dir_all(dir)?;
        }
        // Colour codes stay out of the file
        let file_format = match format {
            LogFormat::Json => json_format,
            LogFormat::Ext => extended_format,
            LogFormat::Text => simple_format,
        };
        logger = logger
            .log_to_file(FileSpec::try_from(path.as_path())?)
            .format_for_files(file_format)
            .duplicate_to_stderr(Duplicate::All);
    }

    let handle = logger.start()?;
    if LOGGER_HANDLE.set(Mutex::new(handle)).is_err() {
        return Err("Logging has already been initialised".into());
    }

    Ok(())
}

/// Change the log level at runtime
///
/// Only the level can change; format and file output are fixed at
/// initialisation by flexi_logger.
pub fn reconfigure_logging(log_level: &str) -> Result<(), Box<dyn std::error::Error>> {
    let handle_mutex = LOGGER_HANDLE
        .get()
        .ok_or("Logger handle not initialised. Call init_logging first.")?;
    let mut handle = handle_mutex
        .lock()
        .map_err(|_| "Could not acquire logger handle lock")?;
    handle.parse_and_push_temp_spec(log_level)?;
    Ok(())
}

fn level_abbr(level: log::Level) -> &'static str {
    match level {
        log::Level::Error => "ERR",
        log::Level::Warn => "WRN",
        log::Level::Info => "INF",
        log::Level::Debug => "DBG",
        log::Level::Trace => "TRC",
    }
}

fn level_colored(level: log::Level) -> colored::ColoredString {
    use colored::Colorize;

    let abbr = level_abbr(level);
    match level {
        log::Level::Error => abbr.red().bold(),
        log::Level::Warn => abbr.yellow(),
        log::Level::Info => abbr.green(),
        log::Level::Debug => abbr.blue(),
        log::Level::Trace => abbr.magenta(),
    }
}

// "YYYY-MM-DD HH:mm:ss.fff INF message"
fn simple_format(
    w: &mut dyn std::io::Write,
    now: &mut DeferredNow,
    record: &log::Record,
) -> Result<(), std::io::Error> {
    write!(
        w,
        "{} {} {}",
        now.format("%Y-%m-%d %H:%M:%S%.3f"),
        level_abbr(record.level()),
        record.args()
    )
}

fn simple_color_format(
    w: &mut dyn std::io::Write,
    now: &mut DeferredNow,
    record: &log::Record,
) -> Result<(), std::io::Error> {
    use colored::Colorize;

    write!(
        w,
        "{} {} {}",
        now.format("%Y-%m-%d %H:%M:%S%.3f").to_string().dimmed(),
        level_colored(record.level()),
        record.args()
    )
}

// "YYYY-MM-DD HH:mm:ss.fff INF message (threads/pool.rs:42)"
fn extended_format(
    w: &mut dyn std::io::Write,
    now: &mut DeferredNow,
    record: &log::Record,
) -> Result<(), std::io::Error> {
    write!(
        w,
        "{} {} {} ({})",
        now.format("%Y-%m-%d %H:%M:%S%.3f"),
        level_abbr(record.level()),
        record.args(),
        format_target_as_path(record.target(), record.line())
    )
}

fn extended_color_format(
    w: &mut dyn std::io::Write,
    now: &mut DeferredNow,
    record: &log::Record,
) -> Result<(), std::io::Error> {
    use colored::Colorize;

    write!(
        w,
        "{} {} {} ({})",
        now.format("%Y-%m-%d %H:%M:%S%.3f").to_string().dimmed(),
        level_colored(record.level()),
        record.args(),
        format_target_as_path(record.target(), record.line()).dimmed()
    )
}

fn json_format(
    w: &mut dyn std::io::Write,
    now: &mut DeferredNow,
    record: &log::Record,
) -> Result<(), std::io::Error> {
    let line = serde_json::json!({
        "timestamp": now.format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string(),
        "level": level_abbr(record.level()),
        "message": record.args().to_string(),
        "target": format_target_as_path(record.target(), record.line()),
    });

    match serde_json::to_string(&line) {
        Ok(json) => w.write_all(json.as_bytes()),
        Err(_) => w.write_all(b"{\"error\":\"Failed to serialize log message\"}"),
    }
}

// guikit::threads::pool -> threads/pool.rs:LINE
fn format_target_as_path(target: &str, line: Option<u32>) -> String {
    let path_like = match target.strip_prefix(TARGET_PREFIX) {
        Some(module) => module.replace("::", "/") + ".rs",
        None => target.replace("::", "/"),
    };

    match line {
        Some(line) => format!("{}:{}", path_like, line),
        None => path_like,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn render(
        formatter: fn(&mut dyn std::io::Write, &mut DeferredNow, &log::Record) -> std::io::Result<()>,
        target: &str,
    ) -> String {
        let mut buffer = Vec::new();
        let mut now = DeferredNow::new();
        let record = log::Record::builder()
            .level(log::Level::Info)
            .target(target)
            .line(Some(42))
            .args(format_args!("Test message"))
            .build();

        formatter(&mut buffer, &mut now, &record).unwrap();
        String::from_utf8(buffer).unwrap()
    }

    #[test]
    fn test_log_format_parsing() {
        assert_eq!(LogFormat::from_str("json").unwrap(), LogFormat::Json);
        assert_eq!(LogFormat::from_str("EXT").unwrap(), LogFormat::Ext);
        assert!(LogFormat::from_str("xml").is_err());
        assert_eq!(LogFormat::default().to_string(), "text");
    }

    #[test]
    fn test_simple_format_has_no_location() {
        let output = render(simple_format, "guikit::threads::pool");

        assert!(output.contains("INF Test message"), "got: {}", output);
        assert!(!output.contains("pool.rs"));
    }

    #[test]
    fn test_extended_format_adds_location() {
        let output = render(extended_format, "guikit::threads::pool");

        assert!(output.ends_with("INF Test message (threads/pool.rs:42)"), "got: {}", output);
    }

    #[test]
    fn test_json_format_fields() {
        let output = render(json_format, "guikit::plugin::loader");
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();

        assert_eq!(value["level"], "INF");
        assert_eq!(value["message"], "Test message");
        assert_eq!(value["target"], "plugin/loader.rs:42");
    }

    #[test]
    fn test_foreign_targets_keep_their_path() {
        assert_eq!(format_target_as_path("tokio::runtime", None), "tokio/runtime");
        assert_eq!(format_target_as_path("guikit::app", Some(3)), "app.rs:3");
    }

    #[test]
    fn test_explicit_paths_are_kept() {
        let path = Path::new("/var/log/guikit.log");
        assert_eq!(resolve_log_file(path), path);

        let nested = Path::new("logs/guikit.log");
        assert_eq!(resolve_log_file(nested), nested);
    }

    #[test]
    fn test_bare_file_goes_to_log_dir() {
        if let Some(dir) = default_log_dir() {
            assert_eq!(resolve_log_file(Path::new("guikit.log")), dir.join("guikit.log"));
        }
    }

    #[test]
    #[serial]
    fn test_invalid_format_is_rejected() {
        let err = init_logging(Some("info"), Some("xml"), None, false).unwrap_err();
        assert!(err.to_string().contains("Invalid log format 'xml'"));
    }

    #[test]
    #[serial]
    fn test_reconfigure_after_init() {
        // Another test may already own the global logger
        let _ = init_logging(Some("info"), None, None, false);

        if LOGGER_HANDLE.get().is_some() {
            assert!(reconfigure_logging("debug").is_ok());
        }
    }
}
