use reqlog::pretty::pretty_xml;
use reqlog::{
    wrap, Exchange, LoggerConfig, RecordingSink, ReqlogError, Request, RequestsLogger, Response,
    ResponseFormatter,
};

fn json_exchange(body: &str) -> Exchange {
    Exchange::new(
        Request::new("GET", "http://example.com/api/users"),
        Response::new(200, "OK")
            .header("Content-Type", "application/json")
            .content(body),
    )
}

#[test]
fn test_sorted_json_pretty_body() {
    let mut formatter = ResponseFormatter::new(&LoggerConfig::default());
    let report = formatter
        .format(&json_exchange(r#"{"b":1,"a":2}"#), &RecordingSink::new())
        .expect("report");
    let pretty = report.pretty_body().expect("pretty body");
    let lines: Vec<&str> = pretty.lines().collect();
    assert_eq!(lines, vec!["{", "    \"a\": 2,", "    \"b\": 1", "}"]);
}

#[test]
fn test_malformed_json_does_not_fail() {
    let sink = RecordingSink::new();
    let mut formatter = ResponseFormatter::new(&LoggerConfig::default());
    let report = formatter
        .format(&json_exchange("{\"unterminated\": "), &sink)
        .expect("report");
    assert!(report.lines().iter().any(|line| line == "{\"unterminated\": "));
    assert_eq!(sink.errors().len(), 1);
}

#[test]
fn test_pretty_xml_reparses_to_same_tree() {
    let source = "<catalog><book id=\"b1\"><title>Rust</title></book><book id=\"b2\"/></catalog>";
    let exchange = Exchange::new(
        Request::new("GET", "http://example.com/catalog"),
        Response::new(200, "OK")
            .header("Content-Type", "application/xml; charset=utf-8")
            .content(source),
    );
    let mut formatter = ResponseFormatter::new(&LoggerConfig::default());
    let report = formatter
        .format(&exchange, &RecordingSink::new())
        .expect("report");
    let pretty = report.pretty_body().expect("pretty body");

    // Pretty-printing is stable once whitespace has been normalized.
    assert_eq!(pretty_xml(pretty).expect("reparse"), pretty);
    assert_eq!(pretty_xml(source).expect("source"), pretty);
}

#[test]
fn test_malformed_xml_is_an_error() {
    let exchange = Exchange::new(
        Request::new("GET", "http://example.com/catalog"),
        Response::new(200, "OK")
            .header("Content-Type", "application/xml")
            .content("<catalog><book></catalog>"),
    );
    let mut formatter = ResponseFormatter::new(&LoggerConfig::default());
    let err = formatter
        .format(&exchange, &RecordingSink::new())
        .expect_err("malformed xml");
    assert!(matches!(
        err,
        ReqlogError::Xml(_) | ReqlogError::MalformedXml(_)
    ));
}

#[test]
fn test_wrapped_calls_reuse_cached_reports() {
    let exchange = json_exchange("[1, 2, 3]");
    let mut logger = RequestsLogger::new(RecordingSink::new());
    {
        let mut call = wrap(&mut logger, |exchange: &Exchange| {
            Ok::<_, ReqlogError>(exchange.clone())
        });
        let first = call(&exchange).expect("first");
        let second = call(&exchange).expect("second");
        assert_eq!(first.id(), second.id());
    }

    assert_eq!(logger.formatter().computed(), 1);
    let infos = logger.sink().infos();
    assert_eq!(infos.len(), 2);
    assert_eq!(infos[0], infos[1]);
}
