//! ZIP package access for workbook files.

use crate::error::{Error, Result};
use std::cell::RefCell;
use std::collections::HashMap;
use std::io::{Cursor, Read};
use std::path::{Component, Path, PathBuf};

/// A single `<Relationship>` entry from a .rels part.
#[derive(Debug, Clone)]
pub struct Relationship {
    /// Relationship ID (e.g., "rId1")
    pub id: String,
    /// Relationship type URI
    pub rel_type: String,
    /// Target path, relative to the owning part unless it starts with `/`
    pub target: String,
}

/// Relationships of one package part, keyed by ID.
#[derive(Debug, Clone, Default)]
pub struct Relationships {
    by_id: HashMap<String, Relationship>,
}

impl Relationships {
    /// Get a relationship by ID.
    pub fn get(&self, id: &str) -> Option<&Relationship> {
        self.by_id.get(id)
    }

    /// Iterate over all relationships, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = &Relationship> {
        self.by_id.values()
    }

    /// Number of relationships.
    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    /// Check if empty.
    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }

    fn insert(&mut self, rel: Relationship) {
        self.by_id.insert(rel.id.clone(), rel);
    }
}

/// Rewrite a UTF-16 encoding declaration after the content has been decoded.
///
/// quick-xml honours the declared encoding, so a string that is already UTF-8
/// must not claim to be UTF-16.
fn fix_xml_encoding_declaration(content: String) -> String {
    if !content.starts_with("<?xml") {
        return content;
    }
    let Some(end_decl) = content.find("?>") else {
        return content;
    };

    let (decl, rest) = content.split_at(end_decl + 2);
    let fixed = decl
        .replace("encoding=\"UTF-16\"", "encoding=\"UTF-8\"")
        .replace("encoding='UTF-16'", "encoding='UTF-8'")
        .replace("encoding=\"utf-16\"", "encoding=\"UTF-8\"")
        .replace("encoding='utf-16'", "encoding='UTF-8'");
    format!("{}{}", fixed, rest)
}

/// Decode XML bytes handling UTF-8 (with or without BOM) and UTF-16 LE/BE.
pub fn decode_xml_bytes(bytes: &[u8]) -> Result<String> {
    if let Some(rest) = bytes.strip_prefix(&[0xEF, 0xBB, 0xBF]) {
        return String::from_utf8(rest.to_vec())
            .map_err(|e| Error::InvalidData(format!("invalid UTF-8 in XML part: {}", e)));
    }

    if let Some(rest) = bytes.strip_prefix(&[0xFF, 0xFE]) {
        return decode_utf16(rest, u16::from_le_bytes).map(fix_xml_encoding_declaration);
    }

    if let Some(rest) = bytes.strip_prefix(&[0xFE, 0xFF]) {
        return decode_utf16(rest, u16::from_be_bytes).map(fix_xml_encoding_declaration);
    }

    match String::from_utf8(bytes.to_vec()) {
        Ok(s) => Ok(s),
        // ASCII markup in UTF-16 leaves a zero byte in every other position
        Err(_) if bytes.len() >= 4 && bytes[1] == 0 && bytes[3] == 0 => {
            decode_utf16(bytes, u16::from_le_bytes).map(fix_xml_encoding_declaration)
        }
        Err(_) if bytes.len() >= 4 && bytes[0] == 0 && bytes[2] == 0 => {
            decode_utf16(bytes, u16::from_be_bytes).map(fix_xml_encoding_declaration)
        }
        Err(_) => Ok(String::from_utf8_lossy(bytes).into_owned()),
    }
}

fn decode_utf16(bytes: &[u8], to_unit: fn([u8; 2]) -> u16) -> Result<String> {
    let units = bytes.chunks_exact(2).map(|pair| to_unit([pair[0], pair[1]]));

    char::decode_utf16(units)
        .collect::<std::result::Result<String, _>>()
        .map_err(|e| Error::InvalidData(format!("invalid UTF-16 in XML part: {}", e)))
}

/// An Office Open XML package held in memory.
///
/// Parts are read lazily from the underlying ZIP archive.
pub struct Package {
    archive: RefCell<zip::ZipArchive<Cursor<Vec<u8>>>>,
}

impl Package {
    /// Open a package from its raw bytes.
    pub fn from_bytes(data: Vec<u8>) -> Result<Self> {
        let archive = zip::ZipArchive::new(Cursor::new(data))?;
        Ok(Self {
            archive: RefCell::new(archive),
        })
    }

    /// Read an XML part as a string, decoding UTF-8 or UTF-16 content.
    pub fn read_xml(&self, path: &str) -> Result<String> {
        let mut archive = self.archive.borrow_mut();
        let mut file = archive
            .by_name(path)
            .map_err(|_| Error::MissingComponent(path.to_string()))?;

        let mut bytes = Vec::new();
        file.read_to_end(&mut bytes)
            .map_err(|e| Error::ZipArchive(format!("{}: {}", path, e)))?;
        decode_xml_bytes(&bytes)
    }

    /// Check if a part exists in the archive.
    pub fn exists(&self, path: &str) -> bool {
        self.archive.borrow().file_names().any(|n| n == path)
    }

    /// Read the relationships owned by `part_path` (`<dir>/_rels/<file>.rels`).
    ///
    /// A part without a .rels file has no relationships.
    pub fn read_relationships(&self, part_path: &str) -> Result<Relationships> {
        let path = Path::new(part_path);
        let parent = path.parent().unwrap_or(Path::new(""));
        let filename = path.file_name().unwrap_or_default().to_string_lossy();
        let rels_path = if parent.as_os_str().is_empty() {
            format!("_rels/{}.rels", filename)
        } else {
            format!("{}/_rels/{}.rels", parent.display(), filename)
        };

        let xml = match self.read_xml(&rels_path) {
            Ok(xml) => xml,
            Err(Error::MissingComponent(_)) => return Ok(Relationships::default()),
            Err(e) => return Err(e),
        };

        parse_relationships(&xml)
    }

    /// Resolve a relationship target against the part that owns it.
    pub fn resolve_path(base: &str, relative: &str) -> String {
        if let Some(stripped) = relative.strip_prefix('/') {
            return stripped.to_string();
        }

        let mut result = Path::new(base)
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();
        for component in Path::new(relative).components() {
            match component {
                Component::ParentDir => {
                    result.pop();
                }
                Component::Normal(c) => result.push(c),
                _ => {}
            }
        }

        normalize_separators(result)
    }
}

fn normalize_separators(path: PathBuf) -> String {
    path.to_string_lossy().replace('\\', "/")
}

fn parse_relationships(xml: &str) -> Result<Relationships> {
    let mut rels = Relationships::default();
    if xml.trim().is_empty() {
        return Ok(rels);
    }

    let mut reader = quick_xml::Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut buf = Vec::new();
    loop {
        match reader.read_event_into(&mut buf) {
            Ok(quick_xml::events::Event::Empty(e)) | Ok(quick_xml::events::Event::Start(e))
                if e.local_name().as_ref() == b"Relationship" =>
            {
                let mut id = String::new();
                let mut rel_type = String::new();
                let mut target = String::new();

                for attr in e.attributes().flatten() {
                    let value = String::from_utf8_lossy(&attr.value).to_string();
                    match attr.key.as_ref() {
                        b"Id" => id = value,
                        b"Type" => rel_type = value,
                        b"Target" => target = value,
                        _ => {}
                    }
                }

                if !id.is_empty() && !target.is_empty() {
                    rels.insert(Relationship {
                        id,
                        rel_type,
                        target,
                    });
                }
            }
            Ok(quick_xml::events::Event::Eof) => break,
            Err(e) => return Err(Error::XmlParse(e.to_string())),
            _ => {}
        }
        buf.clear();
    }

    Ok(rels)
}

impl std::fmt::Debug for Package {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Package")
            .field("parts", &self.archive.borrow().len())
            .finish()
    }
}
