//! Report rendering for the log sink

use crate::format::FormattedReport;
use quick_xml::escape::partial_escape;

/// Collapsible HTML block titled with the report summary.
///
/// Only `&`, `<` and `>` are escaped so quoted JSON and XML attribute values
/// stay readable.
pub fn render_html(report: &FormattedReport) -> String {
    let pretty = report.pretty_body().map(|body| partial_escape(body)).unwrap_or_default();
    format!(
        "<details><summary>{}</summary><p>{}\n{}</p></details>",
        partial_escape(report.summary()),
        partial_escape(&report.text()),
        pretty
    )
}

/// Plain transcript followed by the pretty body, if any
pub fn render_text(report: &FormattedReport) -> String {
    match report.pretty_body() {
        Some(pretty) => format!("{}\n{}", report.text(), pretty),
        None => report.text(),
    }
}
