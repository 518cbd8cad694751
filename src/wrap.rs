//! Automatic logging around HTTP-issuing operations

use crate::error::ReqlogError;
use crate::exchange::Exchange;
use crate::logger::RequestsLogger;
use crate::sink::LogSink;

/// Wrap `operation` so every exchange it returns is written to `logger`.
///
/// The wrapped operation takes the same argument and hands back the
/// operation's output unchanged. Errors from `operation` are returned as-is
/// and nothing is logged for them; a formatting failure is converted into the
/// operation's error type.
pub fn wrap<'a, S, A, T, E, F>(
    logger: &'a mut RequestsLogger<S>,
    mut operation: F,
) -> impl FnMut(A) -> Result<T, E> + 'a
where
    S: LogSink,
    T: AsRef<Exchange>,
    E: From<ReqlogError>,
    F: FnMut(A) -> Result<T, E> + 'a,
{
    move |args| {
        let response = operation(args)?;
        logger.write_log(response.as_ref())?;
        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use super::wrap;
    use crate::error::ReqlogError;
    use crate::exchange::{Exchange, Request, Response};
    use crate::logger::RequestsLogger;
    use crate::sink::RecordingSink;
    use std::cell::Cell;

    #[derive(Debug)]
    enum CallError {
        Refused(String),
        Logging(ReqlogError),
    }

    impl From<ReqlogError> for CallError {
        fn from(err: ReqlogError) -> Self {
            CallError::Logging(err)
        }
    }

    fn fetch((method, path): (&str, &str)) -> Result<Exchange, CallError> {
        Ok(Exchange::new(
            Request::new(method, format!("http://example.com{}", path)),
            Response::new(200, "OK")
                .header("Content-Type", "application/json")
                .content(r#"{"ok":true}"#),
        ))
    }

    #[test]
    fn wrapped_call_logs_and_returns_response() {
        let mut logger = RequestsLogger::new(RecordingSink::new());
        let response = {
            let mut call = wrap(&mut logger, fetch);
            call(("GET", "/status")).expect("response")
        };

        assert_eq!(response.request.url, "http://example.com/status");
        assert_eq!(response.response.content.as_deref(), Some(&br#"{"ok":true}"#[..]));
        let records = logger.sink().infos();
        assert_eq!(records.len(), 1);
        assert!(records[0].message.contains("&gt; GET http://example.com/status"));
        assert!(records[0].message.contains("\"ok\": true"));
    }

    #[test]
    fn operation_errors_propagate_without_logging() {
        let mut logger = RequestsLogger::new(RecordingSink::new());
        let attempts = Cell::new(0);
        let result = {
            let mut call = wrap(&mut logger, |host: &str| -> Result<Exchange, CallError> {
                attempts.set(attempts.get() + 1);
                Err(CallError::Refused(host.to_string()))
            });
            call("example.com")
        };

        assert!(matches!(result, Err(CallError::Refused(host)) if host == "example.com"));
        assert_eq!(attempts.get(), 1);
        assert!(logger.sink().records().is_empty());
        assert_eq!(logger.formatter().computed(), 0);
    }

    #[test]
    fn formatting_failures_become_operation_errors() {
        let mut logger = RequestsLogger::new(RecordingSink::new());
        let result = {
            let mut call = wrap(&mut logger, |_: ()| -> Result<Exchange, CallError> {
                Ok(Exchange::new(
                    Request::new("GET", "http://example.com/feed"),
                    Response::new(200, "OK")
                        .header("Content-Type", "application/xml")
                        .content("<feed>"),
                ))
            });
            call(())
        };

        assert!(matches!(result, Err(CallError::Logging(_))));
    }
}
