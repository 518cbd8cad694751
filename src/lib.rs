//! reqlog - readable HTTP exchange logs for test reports
//!
//! This crate formats a completed HTTP request/response pair into a
//! curl-style transcript, pretty-prints JSON and XML bodies, and writes the
//! result to a report sink as a collapsible HTML block. [`wrap`] and
//! [`http::LoggingClient`] do this automatically after each call.

pub mod config;
pub mod decode;
pub mod error;
pub mod exchange;
pub mod format;
pub mod http;
pub mod logger;
pub mod logging;
pub mod pretty;
pub mod render;
pub mod sink;
pub mod wrap;

pub use config::LoggerConfig;
pub use error::{Result, ReqlogError};
pub use exchange::{Body, Exchange, ExchangeId, Headers, Request, Response};
pub use format::{FormattedReport, ResponseFormatter};
pub use logger::RequestsLogger;
pub use sink::{LogCrateSink, LogSink, RecordingSink};
pub use wrap::wrap;

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
