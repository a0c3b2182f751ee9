//! XLSX shared strings parsing.

use crate::error::{Error, Result};
use quick_xml::events::Event;
use std::borrow::Cow;

/// Shared strings table (`xl/sharedStrings.xml`).
#[derive(Debug, Clone, Default)]
pub struct SharedStrings {
    /// All strings in table order
    strings: Vec<String>,
}

impl SharedStrings {
    /// Parse the shared strings table.
    ///
    /// Rich text runs are concatenated; phonetic hints (`<rPh>`) are dropped.
    pub fn parse(xml: &str) -> Result<Self> {
        let mut strings = Vec::new();
        let mut reader = quick_xml::Reader::from_str(xml);

        let mut buf = Vec::new();
        let mut in_si = false;
        let mut in_t = false;
        let mut phonetic_depth = 0usize;
        let mut current_text = String::new();

        loop {
            match reader.read_event_into(&mut buf) {
                Ok(Event::Start(e)) => match e.local_name().as_ref() {
                    b"si" => {
                        in_si = true;
                        current_text.clear();
                    }
                    b"rPh" => phonetic_depth += 1,
                    b"t" if in_si && phonetic_depth == 0 => in_t = true,
                    _ => {}
                },
                // `<si/>` and `<si><t/></si>` are empty strings that still take an index
                Ok(Event::Empty(e)) if e.local_name().as_ref() == b"si" => {
                    strings.push(String::new());
                }
                Ok(Event::Text(e)) if in_t => {
                    let text = e.unescape().map_err(|e| Error::XmlParse(e.to_string()))?;
                    current_text.push_str(&text);
                }
                Ok(Event::End(e)) => match e.local_name().as_ref() {
                    b"si" => {
                        strings.push(unescape_ooxml(&current_text).into_owned());
                        in_si = false;
                    }
                    b"rPh" => phonetic_depth = phonetic_depth.saturating_sub(1),
                    b"t" => in_t = false,
                    _ => {}
                },
                Ok(Event::Eof) => break,
                Err(e) => return Err(Error::XmlParse(e.to_string())),
                _ => {}
            }
            buf.clear();
        }

        Ok(Self { strings })
    }

    /// Get a string by index.
    pub fn get(&self, index: usize) -> Option<&str> {
        self.strings.get(index).map(|s| s.as_str())
    }

    /// Get the count of shared strings.
    pub fn len(&self) -> usize {
        self.strings.len()
    }

    /// Check if empty.
    pub fn is_empty(&self) -> bool {
        self.strings.is_empty()
    }
}

/// Decode `_xHHHH_` escapes used by OOXML for characters XML cannot carry
/// (control characters such as `_x000D_`).
pub(crate) fn unescape_ooxml(text: &str) -> Cow<'_, str> {
    if !text.contains("_x") {
        return Cow::Borrowed(text);
    }

    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(start) = rest.find("_x") {
        out.push_str(&rest[..start]);
        let candidate = &rest[start..];
        let decoded = candidate
            .get(2..6)
            .filter(|hex| hex.bytes().all(|b| b.is_ascii_hexdigit()))
            .filter(|_| candidate.as_bytes().get(6) == Some(&b'_'))
            .and_then(|hex| u32::from_str_radix(hex, 16).ok())
            .and_then(char::from_u32);

        match decoded {
            Some(ch) => {
                out.push(ch);
                rest = &candidate[7..];
            }
            None => {
                out.push_str("_x");
                rest = &candidate[2..];
            }
        }
    }
    out.push_str(rest);
    Cow::Owned(out)
}
