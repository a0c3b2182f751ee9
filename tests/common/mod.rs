//! In-memory XLSX fixtures for integration tests.

#![allow(dead_code)]

use sheetpick::CellValue;
use std::io::{Cursor, Write};
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

/// A worksheet given as rows of optional cells, starting at A1.
pub struct SheetSpec {
    pub name: String,
    pub rows: Vec<Vec<Option<CellValue>>>,
}

impl SheetSpec {
    pub fn new(name: &str, rows: Vec<Vec<Option<CellValue>>>) -> Self {
        Self {
            name: name.to_string(),
            rows,
        }
    }
}

/// Shorthand for a row of text cells.
pub fn text_row(cells: &[&str]) -> Vec<Option<CellValue>> {
    cells.iter().map(|s| Some(CellValue::from(*s))).collect()
}

fn column_letters(mut col: usize) -> String {
    let mut letters = Vec::new();
    loop {
        letters.push(b'A' + (col % 26) as u8);
        if col < 26 {
            break;
        }
        col = col / 26 - 1;
    }
    letters.reverse();
    String::from_utf8(letters).unwrap()
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Build an XLSX workbook with the given sheets. Text goes through the
/// shared strings table.
pub fn build_xlsx(sheets: &[SheetSpec]) -> Vec<u8> {
    let mut shared: Vec<String> = Vec::new();
    let mut sheet_parts = Vec::new();

    for sheet in sheets {
        let mut xml = String::from(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main"><sheetData>"#,
        );
        for (r, row) in sheet.rows.iter().enumerate() {
            xml.push_str(&format!(r#"<row r="{}">"#, r + 1));
            for (c, cell) in row.iter().enumerate() {
                let reference = format!("{}{}", column_letters(c), r + 1);
                match cell {
                    None => {}
                    Some(CellValue::Text(s)) => {
                        let idx = match shared.iter().position(|x| x == s) {
                            Some(idx) => idx,
                            None => {
                                shared.push(s.clone());
                                shared.len() - 1
                            }
                        };
                        xml.push_str(&format!(r#"<c r="{}" t="s"><v>{}</v></c>"#, reference, idx));
                    }
                    Some(CellValue::Number(n)) => {
                        xml.push_str(&format!(r#"<c r="{}"><v>{}</v></c>"#, reference, n));
                    }
                    Some(CellValue::Bool(b)) => {
                        xml.push_str(&format!(
                            r#"<c r="{}" t="b"><v>{}</v></c>"#,
                            reference,
                            if *b { 1 } else { 0 }
                        ));
                    }
                }
            }
            xml.push_str("</row>");
        }
        xml.push_str("</sheetData></worksheet>");
        sheet_parts.push(xml);
    }

    let mut content_types = String::from(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">
  <Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>
  <Default Extension="xml" ContentType="application/xml"/>
  <Override PartName="/xl/workbook.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml"/>
  <Override PartName="/xl/sharedStrings.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.sharedStrings+xml"/>"#,
    );
    let mut workbook = String::from(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<workbook xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships"><sheets>"#,
    );
    let mut workbook_rels = String::from(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
  <Relationship Id="rIdStrings" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/sharedStrings" Target="sharedStrings.xml"/>"#,
    );

    for (i, sheet) in sheets.iter().enumerate() {
        content_types.push_str(&format!(
            r#"<Override PartName="/xl/worksheets/sheet{}.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.worksheet+xml"/>"#,
            i + 1
        ));
        workbook.push_str(&format!(
            r#"<sheet name="{}" sheetId="{}" r:id="rId{}"/>"#,
            escape(&sheet.name),
            i + 1,
            i + 1
        ));
        workbook_rels.push_str(&format!(
            r#"<Relationship Id="rId{}" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="worksheets/sheet{}.xml"/>"#,
            i + 1,
            i + 1
        ));
    }
    content_types.push_str("</Types>");
    workbook.push_str("</sheets></workbook>");
    workbook_rels.push_str("</Relationships>");

    let mut shared_xml = format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<sst xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" count="{0}" uniqueCount="{0}">"#,
        shared.len()
    );
    for s in &shared {
        shared_xml.push_str(&format!(
            r#"<si><t xml:space="preserve">{}</t></si>"#,
            escape(s)
        ));
    }
    shared_xml.push_str("</sst>");

    let mut buffer = Vec::new();
    {
        let mut zip = ZipWriter::new(Cursor::new(&mut buffer));
        let options = SimpleFileOptions::default();
        let mut add = |name: &str, body: &str| {
            zip.start_file(name, options).unwrap();
            zip.write_all(body.as_bytes()).unwrap();
        };

        add("[Content_Types].xml", &content_types);
        add(
            "_rels/.rels",
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
  <Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="xl/workbook.xml"/>
</Relationships>"#,
        );
        add("xl/workbook.xml", &workbook);
        add("xl/_rels/workbook.xml.rels", &workbook_rels);
        add("xl/sharedStrings.xml", &shared_xml);
        for (i, part) in sheet_parts.iter().enumerate() {
            add(&format!("xl/worksheets/sheet{}.xml", i + 1), part);
        }
        zip.finish().unwrap();
    }
    buffer
}

/// Build a workbook with a single sheet.
pub fn single_sheet(rows: Vec<Vec<Option<CellValue>>>) -> Vec<u8> {
    build_xlsx(&[SheetSpec::new("Sheet1", rows)])
}
