use std::fs::{File, OpenOptions};
use std::io::Write;
use std::sync::Mutex;

pub const LOG_FILE: &str = "quiz_debug.log";

lazy_static::lazy_static! {
    static ref LOGGER: Mutex<Option<File>> = Mutex::new(None);
}

pub fn init() {
    let Ok(mut logger) = LOGGER.lock() else {
        return;
    };
    if logger.is_some() {
        return;
    }
    if let Ok(file) = OpenOptions::new().create(true).append(true).open(LOG_FILE) {
        *logger = Some(file);
    }
}

pub fn log(message: &str) {
    let Ok(mut logger) = LOGGER.lock() else {
        return;
    };
    if let Some(file) = logger.as_mut() {
        let timestamp = chrono::Utc::now().timestamp();
        let _ = writeln!(file, "[{}] {}", timestamp, message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_logger_init_is_idempotent() {
        init();
        init();
    }

    #[test]
    fn test_logger_log() {
        init();
        log("Test log message");
    }
}
