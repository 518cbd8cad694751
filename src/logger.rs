//! Writing formatted exchanges to a sink

use crate::config::LoggerConfig;
use crate::error::Result;
use crate::exchange::Exchange;
use crate::format::ResponseFormatter;
use crate::render::{render_html, render_text};
use crate::sink::LogSink;

/// Formats exchanges and writes them to a [`LogSink`]
pub struct RequestsLogger<S> {
    formatter: ResponseFormatter,
    sink: S,
    html: bool,
}

impl<S: LogSink> RequestsLogger<S> {
    pub fn new(sink: S) -> Self {
        Self::with_config(sink, &LoggerConfig::default())
    }

    pub fn with_config(sink: S, config: &LoggerConfig) -> Self {
        Self {
            formatter: ResponseFormatter::new(config),
            sink,
            html: config.html,
        }
    }

    /// Format `exchange` and emit it as a single informational record
    pub fn write_log(&mut self, exchange: &Exchange) -> Result<()> {
        let report = self.formatter.format(exchange, &self.sink)?;
        if self.html {
            self.sink.info(&render_html(&report), true);
        } else {
            self.sink.info(&render_text(&report), false);
        }
        Ok(())
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn formatter(&self) -> &ResponseFormatter {
        &self.formatter
    }

    pub fn into_sink(self) -> S {
        self.sink
    }
}
