//! Log sinks that receive formatted exchanges

use std::cell::RefCell;
use std::rc::Rc;

const LOG_TARGET: &str = "reqlog";

/// Prefix test report tools use to recognise a raw HTML message
pub const HTML_MARKER: &str = "*HTML* ";

/// Destination for report records
pub trait LogSink {
    /// Informational record. `html` marks `message` as an HTML fragment.
    fn info(&self, message: &str, html: bool);

    /// Error record
    fn error(&self, message: &str);
}

impl<S: LogSink + ?Sized> LogSink for &S {
    fn info(&self, message: &str, html: bool) {
        (**self).info(message, html)
    }

    fn error(&self, message: &str) {
        (**self).error(message)
    }
}

impl<S: LogSink + ?Sized> LogSink for Rc<S> {
    fn info(&self, message: &str, html: bool) {
        (**self).info(message, html)
    }

    fn error(&self, message: &str) {
        (**self).error(message)
    }
}

/// Sink backed by the `log` facade
#[derive(Debug, Clone, Copy, Default)]
pub struct LogCrateSink;

impl LogSink for LogCrateSink {
    fn info(&self, message: &str, html: bool) {
        if html {
            log::info!(target: LOG_TARGET, "{}{}", HTML_MARKER, message);
        } else {
            log::info!(target: LOG_TARGET, "{}", message);
        }
    }

    fn error(&self, message: &str) {
        log::error!(target: LOG_TARGET, "{}", message);
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Level {
    Info,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub level: Level,
    pub message: String,
    pub html: bool,
}

/// Sink that keeps every record in memory
#[derive(Debug, Default)]
pub struct RecordingSink {
    records: RefCell<Vec<Record>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> Vec<Record> {
        self.records.borrow().clone()
    }

    pub fn infos(&self) -> Vec<Record> {
        self.with_level(Level::Info)
    }

    pub fn errors(&self) -> Vec<Record> {
        self.with_level(Level::Error)
    }

    fn with_level(&self, level: Level) -> Vec<Record> {
        self.records
            .borrow()
            .iter()
            .filter(|record| record.level == level)
            .cloned()
            .collect()
    }
}

impl LogSink for RecordingSink {
    fn info(&self, message: &str, html: bool) {
        self.records.borrow_mut().push(Record {
            level: Level::Info,
            message: message.to_string(),
            html,
        });
    }

    fn error(&self, message: &str) {
        self.records.borrow_mut().push(Record {
            level: Level::Error,
            message: message.to_string(),
            html: false,
        });
    }
}
