//! W3C `unicode.xml` symbol dataset
//!
//! The document lists `<character>` elements whose `dec` attribute holds a
//! decimal code point, or a hyphenated pair for a code point range. Two
//! child elements matter here:
//!
//! - `<AMS>`: the mnemonic name
//! - `<latex>`: the LaTeX command
//!
//! ```rust
//! use latex_unicode::dataset::parse_dataset;
//!
//! let records = parse_dataset(r#"<charlist>
//!     <character dec="945"><AMS>alpha</AMS><latex>\alpha </latex></character>
//! </charlist>"#).unwrap();
//! assert_eq!(records[0].code_point, 945);
//! ```

pub mod source;

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::core::builder::SymbolRecord;
use crate::utils::error::DatasetError;

pub use source::{
    default_cache_path, DatasetSource, MemoryDatasetSource, StdDatasetSource, CACHE_FILE_NAME,
    DEFAULT_DATASET_URL, DEFAULT_FETCH_TIMEOUT,
};

const CHARACTER: &[u8] = b"character";
const MNEMONIC: &[u8] = b"AMS";
const COMMAND: &[u8] = b"latex";

/// Child element whose text is being collected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Mnemonic,
    Command,
}

/// A `<character>` element being read
struct Pending {
    record: SymbolRecord,
    /// Element depth below `<character>`
    depth: usize,
    field: Option<Field>,
    text: String,
}

/// Parse the `dec` identifier: a number, or `start-end` for a range
fn parse_identifier(value: &str) -> Result<SymbolRecord, DatasetError> {
    let malformed = || DatasetError::MalformedIdentifier {
        value: value.to_string(),
    };
    let value = value.trim();
    match value.split_once('-') {
        Some((start, _)) => Ok(SymbolRecord::range(start.trim().parse().unwrap_or(0))),
        // Past u32 saturates, which the builder rejects as out of range
        None => value
            .parse::<u64>()
            .map(|n| SymbolRecord::new(u32::try_from(n).unwrap_or(u32::MAX)))
            .map_err(|_| malformed()),
    }
}

fn start_character(element: &BytesStart<'_>, index: usize) -> Result<SymbolRecord, DatasetError> {
    let attr = element
        .try_get_attribute("dec")
        .map_err(|e| DatasetError::Xml {
            position: 0,
            source: e.into(),
        })?
        .ok_or(DatasetError::MissingIdentifier { index })?;
    let value = attr.unescape_value().map_err(|e| DatasetError::Xml {
        position: 0,
        source: e,
    })?;
    parse_identifier(&value)
}

fn field_of(name: &[u8]) -> Option<Field> {
    if name == MNEMONIC {
        Some(Field::Mnemonic)
    } else if name == COMMAND {
        Some(Field::Command)
    } else {
        None
    }
}

/// Store collected text, keeping the first occurrence of each field
fn finish_field(pending: &mut Pending, field: Field) {
    let text = std::mem::take(&mut pending.text);
    let slot = match field {
        Field::Mnemonic => &mut pending.record.mnemonic_name,
        Field::Command => &mut pending.record.command_name,
    };
    if slot.is_none() {
        *slot = Some(text);
    }
}

/// Parse a dataset document into records, in document order
pub fn parse_dataset(xml: &str) -> Result<Vec<SymbolRecord>, DatasetError> {
    let mut reader = Reader::from_str(xml);
    let mut records = Vec::new();
    let mut pending: Option<Pending> = None;
    let mut seen = 0usize;

    loop {
        let position = reader.buffer_position() as u64;
        let event = reader
            .read_event()
            .map_err(|source| DatasetError::Xml { position, source })?;
        let xml_err = |source: quick_xml::Error| DatasetError::Xml { position, source };

        match event {
            Event::Start(element) => {
                if let Some(p) = pending.as_mut() {
                    p.depth += 1;
                    if p.depth == 1 {
                        p.field = field_of(element.name().as_ref());
                        p.text.clear();
                    }
                } else if element.name().as_ref() == CHARACTER {
                    seen += 1;
                    pending = Some(Pending {
                        record: start_character(&element, seen)?,
                        depth: 0,
                        field: None,
                        text: String::new(),
                    });
                }
            }
            Event::Empty(element) => {
                if pending.is_none() && element.name().as_ref() == CHARACTER {
                    seen += 1;
                    records.push(start_character(&element, seen)?);
                } else if let Some(p) = pending.as_mut() {
                    if p.depth == 0 {
                        if let Some(field) = field_of(element.name().as_ref()) {
                            p.text.clear();
                            finish_field(p, field);
                        }
                    }
                }
            }
            Event::Text(text) => {
                if let Some(p) = pending.as_mut().filter(|p| p.field.is_some()) {
                    p.text.push_str(&text.unescape().map_err(xml_err)?);
                }
            }
            Event::CData(data) => {
                if let Some(p) = pending.as_mut().filter(|p| p.field.is_some()) {
                    p.text.push_str(&String::from_utf8_lossy(&data));
                }
            }
            Event::End(_) => {
                if let Some(mut p) = pending.take() {
                    if p.depth == 0 {
                        records.push(p.record);
                        continue;
                    }
                    if p.depth == 1 {
                        if let Some(field) = p.field.take() {
                            finish_field(&mut p, field);
                        }
                    }
                    p.depth -= 1;
                    pending = Some(p);
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<charlist>
  <character id="U00041-0005A" dec="65-90" mode="text" type="other">
    <latex>\Letters</latex>
  </character>
  <character id="U003B1" dec="945" mode="math" type="other">
    <afii>27A1</afii>
    <latex>\alpha </latex>
    <varlatex>\upalpha</varlatex>
    <AMS>alpha</AMS>
    <description unicode="L&amp;">GREEK SMALL LETTER ALPHA</description>
  </character>
  <character id="U02264" dec="8804" mode="math" type="relation">
    <latex>\leq</latex>
  </character>
  <character id="U000A0" dec="160" mode="text" type="punctuation">
    <latex>~</latex>
  </character>
  <character dec="8734"/>
</charlist>"#;

    #[test]
    fn test_parse_sample() {
        let records = parse_dataset(SAMPLE).unwrap();
        assert_eq!(records.len(), 5);

        assert!(records[0].is_range);
        assert_eq!(records[0].code_point, 65);

        assert_eq!(records[1].code_point, 945);
        assert_eq!(records[1].mnemonic_name.as_deref(), Some("alpha"));
        // Raw text; trimming is the builder's job
        assert_eq!(records[1].command_name.as_deref(), Some("\\alpha "));

        assert_eq!(records[2].command_name.as_deref(), Some("\\leq"));
        assert_eq!(records[2].mnemonic_name, None);

        assert_eq!(records[3].command_name.as_deref(), Some("~"));
        assert_eq!(records[4], SymbolRecord::new(8734));
    }

    #[test]
    fn test_unrelated_children_ignored() {
        let records = parse_dataset(SAMPLE).unwrap();
        // <varlatex> and <description> never leak into the command field
        assert_eq!(records[1].command_name.as_deref(), Some("\\alpha "));
    }

    #[test]
    fn test_escaped_text() {
        let records = parse_dataset(
            r#"<charlist><character dec="38"><latex>\&amp;</latex></character></charlist>"#,
        )
        .unwrap();
        assert_eq!(records[0].command_name.as_deref(), Some("\\&"));
    }

    #[test]
    fn test_missing_dec() {
        let err = parse_dataset(r#"<charlist><character id="x"/></charlist>"#).unwrap_err();
        assert!(matches!(err, DatasetError::MissingIdentifier { index: 1 }));
    }

    #[test]
    fn test_malformed_dec() {
        let err = parse_dataset(r#"<charlist><character dec="abc"></character></charlist>"#)
            .unwrap_err();
        assert!(matches!(err, DatasetError::MalformedIdentifier { .. }));
    }

    #[test]
    fn test_broken_xml() {
        let err = parse_dataset(r#"<charlist><character dec="1"></charlist>"#).unwrap_err();
        assert!(matches!(err, DatasetError::Xml { .. }));
    }

    #[test]
    fn test_identifier_forms() {
        assert_eq!(parse_identifier("945").unwrap(), SymbolRecord::new(945));
        assert!(parse_identifier("0041-005A").unwrap().is_range);
        assert!(parse_identifier("-").unwrap().is_range);
        assert!(parse_identifier("").is_err());
    }

    #[test]
    fn test_oversized_dec_saturates() {
        assert_eq!(
            parse_identifier("4294967296").unwrap(),
            SymbolRecord::new(u32::MAX)
        );
    }
}
