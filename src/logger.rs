use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;
use std::sync::Mutex;

lazy_static::lazy_static! {
    static ref LOGGER: Mutex<Option<File>> = Mutex::new(None);
}

pub const DEFAULT_LOG_FILE: &str = "flag_master.log";

/// Opens the log file once. Later calls are no-ops.
pub fn init(path: &Path) {
    let Ok(mut logger) = LOGGER.lock() else {
        return;
    };
    if logger.is_none()
        && let Ok(file) = OpenOptions::new().create(true).append(true).open(path)
    {
        *logger = Some(file);
    }
}

pub fn log(message: &str) {
    let Ok(mut guard) = LOGGER.lock() else {
        return;
    };
    if let Some(logger) = guard.as_mut() {
        let _ = write_entry(logger, message);
    }
}

fn write_entry(out: &mut impl Write, message: &str) -> io::Result<()> {
    let timestamp = chrono::Local::now().format("%Y-%m-%d %H:%M:%S");
    writeln!(out, "[{}] {}", timestamp, message)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_logger_init_and_log() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("test.log");
        init(&path);
        log("Test log message");

        // Nothing else in the test binary initialises the logger.
        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(
            contents
                .lines()
                .any(|line| line.starts_with('[') && line.ends_with("] Test log message"))
        );
    }

    #[test]
    fn test_entry_is_timestamped() {
        let mut out = Vec::new();
        write_entry(&mut out, "Quiz started").unwrap();
        let line = String::from_utf8(out).unwrap();

        // "[YYYY-MM-DD HH:MM:SS] message\n"
        assert_eq!(line.len(), "[2024-01-01 00:00:00] Quiz started\n".len());
        assert!(line.starts_with('['));
        assert_eq!(&line[20..], "] Quiz started\n");
        assert!(chrono::NaiveDateTime::parse_from_str(&line[1..20], "%Y-%m-%d %H:%M:%S").is_ok());
    }

    #[test]
    fn test_log_without_init_does_not_panic() {
        log("nobody is listening");
    }
}
