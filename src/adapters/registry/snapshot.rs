//! Snapshot reader for Base Bibliotek XML files
//!
//! A snapshot document has `<record>` elements directly under the root;
//! each record's direct child elements become the fields of one
//! [`SourceRecord`]. Namespace prefixes are stripped, entities are
//! unescaped, and text values are trimmed.

use crate::domain::errors::RegistryError;
use crate::domain::record::SourceRecord;
use crate::domain::result::Result;
use quick_xml::events::Event;
use quick_xml::Reader;
use std::path::Path;

/// A parsed snapshot file
///
/// Parsing is eager; iteration is restartable and finite, and an optional
/// record limit is applied by the consumer (`records().take(n)`), so the
/// total count stays independent of any limit.
#[derive(Debug, Default)]
pub struct Snapshot {
    records: Vec<SourceRecord>,
}

impl Snapshot {
    /// Load and parse a snapshot file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let xml = std::fs::read_to_string(path).map_err(|e| {
            RegistryError::Io(format!("Failed to read snapshot {}: {}", path.display(), e))
        })?;
        Self::parse(&xml)
    }

    /// Parse a snapshot document
    ///
    /// An empty document yields an empty snapshot; malformed XML is an
    /// error.
    pub fn parse(xml: &str) -> Result<Self> {
        let mut reader = Reader::from_str(xml);
        reader.config_mut().trim_text(true);

        let mut buf = Vec::new();
        let mut stack: Vec<String> = Vec::new();
        let mut records = Vec::new();
        let mut current: Option<SourceRecord> = None;

        loop {
            match reader.read_event_into(&mut buf) {
                Ok(Event::Start(e)) => {
                    stack.push(local_name(e.name().as_ref()));
                    if stack.len() == 2 && stack[1] == "record" {
                        current = Some(SourceRecord::new());
                    }
                }
                Ok(Event::Empty(e)) => {
                    // Self-closing field inside a record: present but empty
                    if stack.len() == 2 {
                        if let Some(record) = current.as_mut() {
                            record.insert(local_name(e.name().as_ref()), "");
                        }
                    }
                }
                Ok(Event::Text(e)) => {
                    if stack.len() == 3 && stack[1] == "record" {
                        if let Some(record) = current.as_mut() {
                            let value = e
                                .unescape()
                                .map_err(|e| RegistryError::InvalidSnapshot(e.to_string()))?;
                            record.insert(stack[2].clone(), value.trim());
                        }
                    }
                }
                Ok(Event::End(_)) => {
                    if stack.len() == 2 && stack[1] == "record" {
                        if let Some(record) = current.take() {
                            records.push(record);
                        }
                    }
                    stack.pop();
                }
                Ok(Event::Eof) => break,
                Err(e) => return Err(RegistryError::InvalidSnapshot(e.to_string()).into()),
                _ => {}
            }
            buf.clear();
        }

        Ok(Self { records })
    }

    /// Total number of records in the snapshot, independent of any limit
    /// applied during iteration
    pub fn total(&self) -> usize {
        self.records.len()
    }

    /// Iterate over the records in document order
    pub fn records(&self) -> impl Iterator<Item = &SourceRecord> {
        self.records.iter()
    }
}

/// Strip a namespace prefix from an element name
fn local_name(name: &[u8]) -> String {
    let name = String::from_utf8_lossy(name);
    match name.rsplit_once(':') {
        Some((_, local)) => local.to_string(),
        None => name.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_records() {
        let xml = r#"<?xml version="1.0" encoding="UTF-8"?>
<base>
  <record>
    <bibnr>1030045</bibnr>
    <inst>Example Public Library</inst>
  </record>
  <record>
    <bibnr>2060021</bibnr>
    <inst>Another Library</inst>
  </record>
</base>"#;

        let snapshot = Snapshot::parse(xml).unwrap();
        assert_eq!(snapshot.total(), 2);

        let records: Vec<&SourceRecord> = snapshot.records().collect();
        assert_eq!(records[0].get("bibnr"), Some("1030045"));
        assert_eq!(records[0].get("inst"), Some("Example Public Library"));
        assert_eq!(records[1].get("bibnr"), Some("2060021"));
    }

    #[test]
    fn test_parse_strips_namespace_prefixes() {
        let xml = r#"<bb:base xmlns:bb="http://example.org/bb">
  <bb:record>
    <bb:bibnr>1030045</bb:bibnr>
  </bb:record>
</bb:base>"#;

        let snapshot = Snapshot::parse(xml).unwrap();
        assert_eq!(snapshot.total(), 1);
        let record = snapshot.records().next().unwrap();
        assert_eq!(record.get("bibnr"), Some("1030045"));
    }

    #[test]
    fn test_parse_unescapes_and_trims() {
        let xml = r#"<base>
  <record>
    <inst>  Smith &amp; Sons Library  </inst>
  </record>
</base>"#;

        let snapshot = Snapshot::parse(xml).unwrap();
        let record = snapshot.records().next().unwrap();
        assert_eq!(record.get("inst"), Some("Smith & Sons Library"));
    }

    #[test]
    fn test_parse_self_closing_field() {
        let xml = "<base><record><bibnr>1</bibnr><epost/></record></base>";
        let snapshot = Snapshot::parse(xml).unwrap();
        let record = snapshot.records().next().unwrap();
        assert_eq!(record.get("epost"), Some(""));
    }

    #[test]
    fn test_parse_ignores_non_record_elements() {
        let xml = r#"<base>
  <exported>2015-02-06</exported>
  <record><bibnr>1</bibnr></record>
</base>"#;

        let snapshot = Snapshot::parse(xml).unwrap();
        assert_eq!(snapshot.total(), 1);
    }

    #[test]
    fn test_parse_empty_document() {
        let snapshot = Snapshot::parse("<base></base>").unwrap();
        assert_eq!(snapshot.total(), 0);
        assert!(snapshot.records().next().is_none());
    }

    #[test]
    fn test_parse_malformed_document() {
        let result = Snapshot::parse("<base><record><bibnr>1</record></base>");
        assert!(result.is_err());
    }

    #[test]
    fn test_records_iteration_is_restartable() {
        let xml = "<base><record><bibnr>1</bibnr></record><record><bibnr>2</bibnr></record></base>";
        let snapshot = Snapshot::parse(xml).unwrap();

        assert_eq!(snapshot.records().take(1).count(), 1);
        // A fresh iterator starts over; the limit never touches the total
        assert_eq!(snapshot.records().count(), 2);
        assert_eq!(snapshot.total(), 2);
    }
}
