//! Minimal `log` backend that writes to the browser console.

use log::{Level, LevelFilter, Log, Metadata, Record};
use wasm_bindgen::JsValue;
use web_sys::console;

struct ConsoleLogger;

static LOGGER: ConsoleLogger = ConsoleLogger;

impl Log for ConsoleLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let line = JsValue::from_str(&format_record(record));
        match record.level() {
            Level::Error => console::error_1(&line),
            Level::Warn => console::warn_1(&line),
            Level::Info => console::info_1(&line),
            Level::Debug | Level::Trace => console::debug_1(&line),
        }
    }

    fn flush(&self) {}
}

/// Console line for a record: `[LEVEL] target: message`.
fn format_record(record: &Record) -> String {
    format!("[{}] {}: {}", record.level(), record.target(), record.args())
}

/// Install the console logger. Later calls keep the first logger.
pub fn init(level: LevelFilter) {
    if log::set_logger(&LOGGER).is_ok() {
        log::set_max_level(level);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_line_names_level_and_target() {
        let line = format_record(
            &Record::builder()
                .level(Level::Warn)
                .target("breath_pacer::engine")
                .args(format_args!("Rejected start: {}", "bad duration"))
                .build(),
        );
        assert_eq!(line, "[WARN] breath_pacer::engine: Rejected start: bad duration");
    }

    #[test]
    fn disabled_levels_are_filtered() {
        log::set_max_level(LevelFilter::Info);
        let debug = Metadata::builder().level(Level::Debug).build();
        let error = Metadata::builder().level(Level::Error).build();
        assert!(!LOGGER.enabled(&debug));
        assert!(LOGGER.enabled(&error));
    }
}
