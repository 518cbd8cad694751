//! Pretty-printing of structured bodies

use crate::error::{Result, ReqlogError};
use encoding_rs::{Encoding, UTF_8};
use quick_xml::events::{BytesDecl, Event};
use quick_xml::{Reader, Writer};
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::Value;

const JSON_INDENT: &[u8] = b"    ";

/// Re-serialize a JSON document with sorted keys and 4-space indentation.
///
/// `serde_json` keeps object keys in a `BTreeMap`, so parsing into a
/// [`Value`] already sorts them. Non-ASCII text is written as-is.
pub fn pretty_json(text: &str) -> Result<String> {
    let value: Value = serde_json::from_str(text)?;
    let mut out = Vec::with_capacity(text.len() * 2);
    let mut serializer =
        serde_json::Serializer::with_formatter(&mut out, PrettyFormatter::with_indent(JSON_INDENT));
    value.serialize(&mut serializer)?;
    String::from_utf8(out).map_err(|e| ReqlogError::Decode(e.to_string()))
}

/// Pretty-print an XML document given as raw bytes.
///
/// The encoding comes from a byte order mark, then from the declaration's
/// `encoding` pseudo-attribute, and defaults to UTF-8. Bytes that are not
/// valid in that encoding are an error.
pub fn pretty_xml_bytes(bytes: &[u8]) -> Result<String> {
    let (encoding, bom_len) = match Encoding::for_bom(bytes) {
        Some(found) => found,
        None => (declared_encoding(bytes)?.unwrap_or(UTF_8), 0),
    };
    let text = encoding
        .decode_without_bom_handling_and_without_replacement(&bytes[bom_len..])
        .ok_or_else(|| ReqlogError::Decode(encoding.name().to_string()))?;
    pretty_xml(&text)
}

fn declared_encoding(bytes: &[u8]) -> Result<Option<&'static Encoding>> {
    let mut reader = Reader::from_reader(bytes);
    let Ok(Event::Decl(decl)) = reader.read_event() else {
        return Ok(None);
    };
    let Some(label) = decl.encoding() else {
        return Ok(None);
    };
    let label = label.map_err(quick_xml::Error::from)?;
    Encoding::for_label(&label)
        .map(Some)
        .ok_or_else(|| ReqlogError::UnknownCharset(String::from_utf8_lossy(&label).into_owned()))
}

/// Parse an XML document and write it back indented with tabs.
///
/// The whole document is validated: mismatched or unclosed elements, text or
/// a second element outside the root, invalid names, broken attributes and
/// bad entity or character references are errors.
pub fn pretty_xml(text: &str) -> Result<String> {
    let mut reader = Reader::from_str(text);
    reader.config_mut().trim_text(true);

    let mut writer = Writer::new_with_indent(Vec::new(), b'\t', 1);
    writer.write_event(Event::Decl(BytesDecl::new("1.0", None, None)))?;

    let mut depth = 0usize;
    let mut seen_root = false;
    loop {
        let event = reader.read_event()?;
        match &event {
            Event::Eof => break,
            Event::Decl(_) => continue,
            Event::Start(start) | Event::Empty(start) => {
                if depth == 0 && seen_root {
                    return Err(malformed(&reader, "more than one root element"));
                }
                if !is_name(start.name().as_ref()) {
                    return Err(malformed(&reader, "invalid element name"));
                }
                for attribute in start.attributes() {
                    let attribute = attribute.map_err(quick_xml::Error::from)?;
                    if !is_name(attribute.key.as_ref()) {
                        return Err(malformed(&reader, "invalid attribute name"));
                    }
                    if attribute.value.contains(&b'<') {
                        return Err(malformed(&reader, "'<' in attribute value"));
                    }
                    if !attribute.unescape_value()?.chars().all(is_xml_char) {
                        return Err(malformed(&reader, "invalid character in attribute value"));
                    }
                }
                seen_root = true;
                if matches!(event, Event::Start(_)) {
                    depth += 1;
                }
            }
            Event::End(_) => {
                depth = depth
                    .checked_sub(1)
                    .ok_or_else(|| malformed(&reader, "unexpected closing tag"))?;
            }
            Event::Text(_) | Event::CData(_) if depth == 0 => {
                return Err(malformed(&reader, "text outside the root element"));
            }
            Event::Text(content) => {
                if !content.unescape()?.chars().all(is_xml_char) {
                    return Err(malformed(&reader, "invalid character in text"));
                }
            }
            _ => {}
        }
        writer.write_event(event)?;
    }

    if depth > 0 {
        return Err(malformed(&reader, "unclosed element at end of document"));
    }
    if !seen_root {
        return Err(ReqlogError::MalformedXml("no root element".to_string()));
    }

    let mut out = writer.into_inner();
    out.push(b'\n');
    String::from_utf8(out).map_err(|e| ReqlogError::Decode(e.to_string()))
}

fn malformed<R>(reader: &Reader<R>, reason: &str) -> ReqlogError {
    ReqlogError::MalformedXml(format!("{} (at byte {})", reason, reader.buffer_position()))
}

/// Characters allowed by the XML 1.0 `Char` production
fn is_xml_char(c: char) -> bool {
    matches!(c,
        '\t' | '\n' | '\r'
        | '\u{20}'..='\u{D7FF}'
        | '\u{E000}'..='\u{FFFD}'
        | '\u{10000}'..='\u{10FFFF}')
}

fn is_name_start_char(c: char) -> bool {
    c == ':' || c == '_' || c.is_ascii_alphabetic() || (!c.is_ascii() && c.is_alphabetic())
}

fn is_name_char(c: char) -> bool {
    is_name_start_char(c)
        || c.is_ascii_digit()
        || matches!(c, '-' | '.' | '\u{B7}' | '\u{300}'..='\u{36F}' | '\u{203F}'..='\u{2040}')
        || (!c.is_ascii() && c.is_alphanumeric())
}

fn is_name(name: &[u8]) -> bool {
    let Ok(name) = std::str::from_utf8(name) else {
        return false;
    };
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if is_name_start_char(first) => chars.all(is_name_char),
        _ => false,
    }
}
