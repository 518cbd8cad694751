//! Charset-aware body decoding

use crate::error::{Result, ReqlogError};
use crate::exchange::Body;
use encoding_rs::Encoding;
use std::borrow::Cow;

/// Charset used when the content type does not declare one
pub const DEFAULT_CHARSET: &str = "utf-8";

/// Pull the `charset=` parameter out of a content type value.
pub fn extract_charset(content_type: Option<&str>) -> Option<String> {
    let content_type = content_type?;
    content_type.split(';').find_map(|param| {
        let (name, value) = param.split_once('=')?;
        if !name.trim().eq_ignore_ascii_case("charset") {
            return None;
        }
        let value = value.trim().trim_matches('"').trim_matches('\'');
        (!value.is_empty()).then(|| value.to_string())
    })
}

/// Decode a body to text.
///
/// Text bodies pass through untouched. Without a declared charset the body
/// is decoded as `default_charset`, falling back to lossy UTF-8 when that
/// fails. A declared charset is applied strictly.
pub fn decode_body<'a>(
    body: &'a Body,
    content_type: Option<&str>,
    default_charset: &str,
) -> Result<Cow<'a, str>> {
    let bytes = match body {
        Body::Text(text) => return Ok(Cow::Borrowed(text)),
        Body::Bytes(bytes) => bytes.as_slice(),
    };
    decode_bytes(bytes, content_type, default_charset)
}

/// Same as [`decode_body`] for raw bytes.
pub fn decode_bytes<'a>(
    bytes: &'a [u8],
    content_type: Option<&str>,
    default_charset: &str,
) -> Result<Cow<'a, str>> {
    match extract_charset(content_type) {
        Some(charset) => decode_strict(bytes, &charset),
        None => match decode_strict(bytes, default_charset) {
            Ok(text) => Ok(text),
            Err(err) => {
                log::debug!("Falling back to lossy decoding: {}", err);
                Ok(String::from_utf8_lossy(bytes))
            }
        },
    }
}

fn decode_strict<'a>(bytes: &'a [u8], charset: &str) -> Result<Cow<'a, str>> {
    let encoding = Encoding::for_label(charset.as_bytes())
        .ok_or_else(|| ReqlogError::UnknownCharset(charset.to_string()))?;
    encoding
        .decode_without_bom_handling_and_without_replacement(bytes)
        .ok_or_else(|| ReqlogError::Decode(encoding.name().to_string()))
}
