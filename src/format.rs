//! Exchange formatting
//!
//! [`ResponseFormatter`] turns an [`Exchange`] into a curl-style transcript:
//!
//! ```text
//! > POST http://example.com/items
//! > Content-Type: application/json
//! >
//! {"name": "x"}
//! * Elapsed time: 0:00:00.125000
//! >
//! < 201 Created
//! < Content-Type: application/json
//! <
//! ```
//!
//! JSON and XML response bodies are pretty-printed separately from the
//! transcript lines; anything else is appended to the lines as text.

use crate::config::LoggerConfig;
use crate::decode::{decode_body, decode_bytes};
use crate::error::Result;
use crate::exchange::{Exchange, ExchangeId};
use crate::pretty::{pretty_json, pretty_xml_bytes};
use crate::sink::LogSink;
use lru::LruCache;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;

const JSON_CONTENT_TYPE: &str = "application/json";
const XML_CONTENT_TYPE: &str = "application/xml";

/// Formatted transcript of one exchange
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormattedReport {
    lines: Vec<String>,
    pretty_body: Option<String>,
}

impl FormattedReport {
    /// First transcript line (`> METHOD URL`), used as the report title
    pub fn summary(&self) -> &str {
        self.lines.first().map(String::as_str).unwrap_or_default()
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Separately pretty-printed JSON or XML body
    pub fn pretty_body(&self) -> Option<&str> {
        self.pretty_body.as_deref()
    }

    /// Transcript lines joined with newlines
    pub fn text(&self) -> String {
        self.lines.join("\n")
    }
}

/// Formats exchanges, memoizing the most recent reports by exchange id
pub struct ResponseFormatter {
    cache: LruCache<ExchangeId, Arc<FormattedReport>>,
    default_charset: String,
    computed: u64,
}

impl ResponseFormatter {
    pub fn new(config: &LoggerConfig) -> Self {
        Self {
            cache: LruCache::new(config.cache_capacity()),
            default_charset: config.default_charset.clone(),
            computed: 0,
        }
    }

    /// Format `exchange`, reporting a JSON body that fails to parse to
    /// `sink` as an error record.
    ///
    /// Malformed XML and bodies that do not match their declared charset
    /// fail the call.
    pub fn format<S: LogSink + ?Sized>(
        &mut self,
        exchange: &Exchange,
        sink: &S,
    ) -> Result<Arc<FormattedReport>> {
        if let Some(report) = self.cache.get(&exchange.id()).cloned() {
            log::debug!("Reusing formatted report for exchange {}", exchange.id());
            return Ok(report);
        }

        let report = Arc::new(self.build(exchange, sink)?);
        self.computed += 1;
        self.cache.put(exchange.id(), Arc::clone(&report));
        Ok(report)
    }

    /// Number of reports built so far (cache hits excluded)
    pub fn computed(&self) -> u64 {
        self.computed
    }

    pub fn cached(&self) -> usize {
        self.cache.len()
    }

    fn build<S: LogSink + ?Sized>(&self, exchange: &Exchange, sink: &S) -> Result<FormattedReport> {
        let request = &exchange.request;
        let response = &exchange.response;
        let mut lines = Vec::new();

        lines.push(format!("> {} {}", request.method, request.url));
        for (name, value) in request.headers.iter() {
            lines.push(format!("> {}: {}", name, value));
        }
        lines.push(">".to_string());
        if let Some(body) = request.body.as_ref().filter(|body| !body.is_empty()) {
            let text = decode_body(body, request.headers.content_type(), &self.default_charset)?;
            lines.push(text.into_owned());
        }
        lines.push(format!("* Elapsed time: {}", format_elapsed(response.elapsed)));
        lines.push(">".to_string());

        lines.push(format!("< {} {}", response.status_code, response.reason));
        for (name, value) in response.headers.iter() {
            lines.push(format!("< {}: {}", name, value));
        }
        lines.push("<".to_string());

        let mut pretty_body = None;
        if let Some(content) = response.content.as_deref().filter(|c| !c.is_empty()) {
            let content_type = response.headers.content_type();
            let declared = content_type.unwrap_or_default();

            if declared.contains(JSON_CONTENT_TYPE) {
                let text = decode_bytes(content, content_type, &self.default_charset)?;
                match pretty_json(&text) {
                    Ok(pretty) => pretty_body = Some(pretty),
                    Err(err) => {
                        log::debug!("JSON body did not parse: {}", err);
                        lines.push(text.into_owned());
                        sink.error(&format!(
                            "Incorrect response content type (not application/JSON): {} {}",
                            request.method, request.url
                        ));
                    }
                }
            } else if declared.contains(XML_CONTENT_TYPE) {
                // XML carries its own encoding; the header charset is not consulted.
                pretty_body = Some(pretty_xml_bytes(content)?);
            } else {
                let text = decode_bytes(content, content_type, &self.default_charset)?;
                lines.push(text.into_owned());
            }
        }

        Ok(FormattedReport { lines, pretty_body })
    }
}

/// Render a duration in clock notation: `[D day(s), ]H:MM:SS[.ffffff]`.
pub fn format_elapsed(elapsed: Duration) -> String {
    let secs = elapsed.as_secs();
    let (days, hours, minutes, seconds) =
        (secs / 86_400, secs / 3600 % 24, secs / 60 % 60, secs % 60);

    let mut out = match days {
        0 => String::new(),
        1 => "1 day, ".to_string(),
        n => format!("{} days, ", n),
    };
    out.push_str(&format!("{}:{:02}:{:02}", hours, minutes, seconds));
    let micros = elapsed.subsec_micros();
    if micros > 0 {
        out.push_str(&format!(".{:06}", micros));
    }
    out
}
