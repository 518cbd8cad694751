//! HTTP client module
//!
//! Runs requests through `reqwest` and writes every completed exchange to
//! the report log.

use crate::config::LoggerConfig;
use crate::error::{Result, ReqlogError};
use crate::exchange::{Exchange, Request};
use crate::logger::RequestsLogger;
use crate::sink::LogSink;
use reqwest::{Client, ClientBuilder};
use std::time::Instant;

/// HTTP client wrapper that logs each exchange
pub struct LoggingClient<S> {
    client: Client,
    logger: RequestsLogger<S>,
}

impl<S: LogSink> LoggingClient<S> {
    /// Create a client with default transport settings
    pub fn new(sink: S, config: &LoggerConfig) -> Result<Self> {
        let client = ClientBuilder::new().build().map_err(ReqlogError::Http)?;
        Ok(Self::with_client(client, RequestsLogger::with_config(sink, config)))
    }

    pub fn with_client(client: Client, logger: RequestsLogger<S>) -> Self {
        Self { client, logger }
    }

    /// Underlying client, for building requests
    pub fn client(&self) -> &Client {
        &self.client
    }

    pub fn logger(&self) -> &RequestsLogger<S> {
        &self.logger
    }

    /// Execute `request`, log the exchange and return it.
    ///
    /// Transport errors are returned before anything is logged.
    pub async fn execute(&mut self, request: reqwest::Request) -> Result<Exchange> {
        let snapshot = Request::from_reqwest(&request);
        let started = Instant::now();
        let response = self.client.execute(request).await.map_err(ReqlogError::Http)?;
        let exchange = Exchange::capture(snapshot, response, started.elapsed()).await?;
        log::debug!(
            "{} {} -> {} in {:?}",
            exchange.request.method,
            exchange.request.url,
            exchange.response.status_code,
            exchange.response.elapsed
        );

        self.logger.write_log(&exchange)?;
        Ok(exchange)
    }
}
