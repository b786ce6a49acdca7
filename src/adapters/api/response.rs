//! Parsing and message construction for target-API XML responses
//!
//! Both endpoints answer with a small XML document whose leaf elements form
//! a flat field map, e.g.
//! `<response><status>ok</status><cardnumber>1030045</cardnumber></response>`.
//! Success means the `status` field equals `ok`.

use crate::domain::errors::ApiError;
use crate::domain::record::TargetRecord;
use quick_xml::events::Event;
use quick_xml::Reader;
use std::collections::BTreeMap;

/// The target-record field used to label upsert messages
pub const IDENTIFIER_FIELD: &str = "cardnumber";

/// Parse an API response body into a flat field map.
///
/// Leaf element text is collected under the element's local name; values
/// are kept raw here and trimmed where they are rendered or compared.
pub fn parse_fields(body: &str) -> Result<BTreeMap<String, String>, ApiError> {
    let mut reader = Reader::from_str(body);

    let mut buf = Vec::new();
    let mut stack: Vec<String> = Vec::new();
    let mut fields = BTreeMap::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) => {
                stack.push(local_name(e.name().as_ref()));
            }
            Ok(Event::Empty(e)) => {
                if !stack.is_empty() {
                    fields
                        .entry(local_name(e.name().as_ref()))
                        .or_insert_with(String::new);
                }
            }
            Ok(Event::Text(e)) => {
                // Field text lives below the document root
                if stack.len() >= 2 {
                    let value = e
                        .unescape()
                        .map_err(|e| ApiError::InvalidResponse(e.to_string()))?;
                    if let Some(key) = stack.last() {
                        fields.entry(key.clone()).or_default().push_str(&value);
                    }
                }
            }
            Ok(Event::End(_)) => {
                stack.pop();
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(ApiError::InvalidResponse(e.to_string())),
            _ => {}
        }
        buf.clear();
    }

    Ok(fields)
}

/// True when the response's `status` field equals `ok`
pub fn status_is_ok(fields: &BTreeMap<String, String>) -> bool {
    fields.get("status").map(|s| s.trim()) == Some("ok")
}

/// Construct the human-readable message for one upsert.
///
/// A record carrying a non-empty identifier field gets
/// `<identifier>: <status-line> - ` followed by every response field as
/// `key="trimmed-value" ` in sorted key order (trailing space after each
/// pair). Otherwise the message is `<status-line> - <status-value>`.
pub fn build_message(
    record: &TargetRecord,
    status_line: &str,
    fields: &BTreeMap<String, String>,
) -> String {
    match record.get(IDENTIFIER_FIELD).filter(|v| !v.is_empty()) {
        Some(identifier) => {
            let mut message = format!("{identifier}: {status_line} - ");
            for (key, value) in fields {
                message.push_str(&format!("{key}=\"{}\" ", value.trim()));
            }
            message
        }
        None => {
            let status = fields.get("status").map(|s| s.trim()).unwrap_or_default();
            format!("{status_line} - {status}")
        }
    }
}

fn local_name(name: &[u8]) -> String {
    let name = String::from_utf8_lossy(name);
    match name.rsplit_once(':') {
        Some((_, local)) => local.to_string(),
        None => name.to_string(),
    }
}
