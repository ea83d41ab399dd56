use parking_lot::Mutex;
/// Log bridge for font-select.
///
/// Routes the `log` facade into a debug log file so diagnostics never mix
/// with command output:
/// - `/tmp/font_select_debug.log` on Unix/macOS,
///   `%TEMP%\font_select_debug.log` on Windows.
/// - Lines are mirrored to stderr when `RUST_LOG` is set.
///
/// Level precedence: `--log-level`, then `RUST_LOG`, then the config file.
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::PathBuf;
use std::sync::OnceLock;
use std::time::{SystemTime, UNIX_EPOCH};

use font_select_config::LogLevel;
use log::{LevelFilter, Log, Metadata, Record};

const LOG_FILE_NAME: &str = "font_select_debug.log";

/// Path of the debug log file.
pub fn log_path() -> PathBuf {
    #[cfg(unix)]
    let path = PathBuf::from("/tmp").join(LOG_FILE_NAME);
    #[cfg(not(unix))]
    let path = std::env::temp_dir().join(LOG_FILE_NAME);
    path
}

struct LogBridge {
    level: LevelFilter,
    file: Mutex<Option<File>>,
    mirror_stderr: bool,
}

impl LogBridge {
    fn new(level: LevelFilter, mirror_stderr: bool) -> Self {
        let file = if level == LevelFilter::Off {
            None
        } else {
            // Silently run without a file if it can't be opened
            OpenOptions::new()
                .write(true)
                .truncate(true)
                .create(true)
                .open(log_path())
                .ok()
        };

        let bridge = Self {
            level,
            file: Mutex::new(file),
            mirror_stderr,
        };
        if level != LevelFilter::Off {
            bridge.write_line(&format!(
                "{}\nfont-select debug session started at {} (level={})\n{}",
                "=".repeat(80),
                timestamp(),
                level,
                "=".repeat(80)
            ));
        }
        bridge
    }

    fn write_line(&self, line: &str) {
        if let Some(file) = self.file.lock().as_mut() {
            let _ = writeln!(file, "{line}");
            let _ = file.flush();
        }
        if self.mirror_stderr {
            eprintln!("{line}");
        }
    }
}

impl Log for LogBridge {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        self.write_line(&format!(
            "[{}] [{:<5}] [{}] {}",
            timestamp(),
            record.level(),
            record.target(),
            record.args()
        ));
    }

    fn flush(&self) {
        if let Some(file) = self.file.lock().as_mut() {
            let _ = file.flush();
        }
    }
}

static BRIDGE: OnceLock<LogBridge> = OnceLock::new();

fn timestamp() -> String {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default();
    format!("{}.{:06}", now.as_secs(), now.subsec_micros())
}

/// Pick the effective level from the CLI flag, `RUST_LOG` and the config.
pub fn resolve_level(
    cli_level: Option<LogLevel>,
    env_level: Option<&str>,
    config_level: LogLevel,
) -> LogLevel {
    cli_level
        .or_else(|| env_level.and_then(LogLevel::from_name))
        .unwrap_or(config_level)
}

/// Install the bridge as the global logger. Later calls are no-ops.
///
/// Returns the level that was applied.
pub fn init_log_bridge(cli_level: Option<LogLevel>, config_level: LogLevel) -> LevelFilter {
    let rust_log = std::env::var("RUST_LOG").ok();
    let level = resolve_level(cli_level, rust_log.as_deref(), config_level).to_level_filter();

    let bridge = BRIDGE.get_or_init(|| LogBridge::new(level, rust_log.is_some()));
    if log::set_logger(bridge).is_ok() {
        log::set_max_level(bridge.level);
    }
    bridge.level
}
