//! Logging for the layout server

use log::{Level, LevelFilter, Log, Metadata, Record};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};

/// Track if we've already written to the log this session (to truncate on first write)
static LOG_INITIALIZED: AtomicBool = AtomicBool::new(false);

const LOG_PREFIX: &str = "[Layout Server]";

/// Helper to log to file for debugging (truncates on first write each session)
pub fn log_to_file(msg: &str) {
    let log_path = PathBuf::from("logs").join("layout_debug.txt");
    if let Some(dir) = log_path.parent() {
        let _ = std::fs::create_dir_all(dir);
    }

    let is_first_write = !LOG_INITIALIZED.swap(true, Ordering::SeqCst);

    let file_result = if is_first_write {
        OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(&log_path)
    } else {
        OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_path)
    };

    if let Ok(mut file) = file_result {
        let _ = writeln!(file, "{}", msg);
    }
}

/// `log` backend: stderr for the user, the debug file for everything
pub struct ServerLogger {
    level: LevelFilter,
    to_file: bool,
}

impl ServerLogger {
    pub fn new(level: LevelFilter, to_file: bool) -> Self {
        Self { level, to_file }
    }

    /// Install as the global logger
    pub fn install(self) -> Result<(), log::SetLoggerError> {
        let level = self.level;
        log::set_boxed_logger(Box::new(self))?;
        log::set_max_level(level);
        Ok(())
    }
}

impl Log for ServerLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let line = format_line(record.level(), &record.args().to_string());
        eprintln!("{}", line);
        if self.to_file {
            log_to_file(&line);
        }
    }

    fn flush(&self) {}
}

fn format_line(level: Level, message: &str) -> String {
    match level {
        Level::Info => format!("{} {}", LOG_PREFIX, message),
        other => format!("{} {}: {}", LOG_PREFIX, other, message),
    }
}
