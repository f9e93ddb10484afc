//! `log` facade backend for the Workers console
//!
//! Core modules log through the `log` macros; inside the worker those
//! records are forwarded to `console.log` / `console.warn` / `console.error`.

use log::{Level, LevelFilter, Log, Metadata, Record};
use worker::{console_error, console_log, console_warn};

struct ConsoleLogger;

static LOGGER: ConsoleLogger = ConsoleLogger;

impl Log for ConsoleLogger {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record<'_>) {
        if !self.enabled(record.metadata()) {
            return;
        }

        match record.level() {
            Level::Error => console_error!("[{}] {}", record.target(), record.args()),
            Level::Warn => console_warn!("[{}] {}", record.target(), record.args()),
            Level::Info | Level::Debug | Level::Trace => {
                console_log!("{} [{}] {}", record.level(), record.target(), record.args());
            }
        }
    }

    fn flush(&self) {}
}

/// Install the console logger once per isolate and apply `level`
pub fn init(level: LevelFilter) {
    // Already installed by an earlier request in this isolate
    let _ = log::set_logger(&LOGGER);
    log::set_max_level(level);
}
