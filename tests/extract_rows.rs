//! End-to-end extraction tests over generated workbooks.

mod common;

use common::{build_xlsx, single_sheet, text_row, SheetSpec};
use sheetpick::{
    extract_rows, extract_rows_with, project_bytes, read_records, ByteSource, CellValue, Error,
    ErrorKind, Field, Location, ProjectedRow,
};
use std::collections::HashMap;

/// Serves generated workbook bytes without touching the filesystem.
struct FixtureSource(HashMap<String, Vec<u8>>);

impl ByteSource for FixtureSource {
    async fn fetch(&self, location: &Location) -> sheetpick::Result<Vec<u8>> {
        self.0
            .get(&location.to_string())
            .cloned()
            .ok_or_else(|| Error::Fetch {
                location: location.to_string(),
                reason: "not found".to_string(),
            })
    }
}

const ALL_NAMES: [&str; 9] = [
    "Display",
    "Locomotion",
    "Body Movement Type",
    "Locus of control",
    "Encoding Channel",
    "Anchor",
    "Visual Mark",
    "Skipping Tool",
    "Overview",
];

#[test]
fn test_two_column_scenario() {
    let data = single_sheet(vec![
        text_row(&["Display", "Overview"]),
        text_row(&["Walking", "desc text"]),
    ]);

    let rows = project_bytes(&data).unwrap();
    assert_eq!(rows.len(), 1);

    let mut expected = ProjectedRow::default();
    expected.set(Field::Display, Some(CellValue::from("Walking")));
    expected.set(Field::Overview, Some(CellValue::from("desc text")));
    assert_eq!(rows[0], expected);

    let json = serde_json::to_value(&rows).unwrap();
    let object = json[0].as_object().unwrap();
    assert_eq!(object.len(), 9);
    assert_eq!(object["Display"], "Walking");
    assert_eq!(object["Overview"], "desc text");
    for name in ALL_NAMES.iter().filter(|n| !matches!(**n, "Display" | "Overview")) {
        assert!(object[*name].is_null(), "{} should be null", name);
    }
}

#[test]
fn test_row_count_and_order() {
    let mut rows = vec![text_row(&["Display", "Locomotion"])];
    for i in 0..25 {
        rows.push(vec![
            Some(CellValue::from(format!("technique {}", i))),
            Some(CellValue::from(i as f64)),
        ]);
    }

    let projected = project_bytes(&single_sheet(rows)).unwrap();
    assert_eq!(projected.len(), 25);
    for (i, row) in projected.iter().enumerate() {
        assert_eq!(
            row.display,
            Some(CellValue::from(format!("technique {}", i)))
        );
        assert_eq!(row.locomotion, Some(CellValue::from(i as f64)));
    }
}

#[test]
fn test_all_nine_headers_in_any_order() {
    let mut header: Vec<&str> = ALL_NAMES.to_vec();
    header.reverse();
    header.swap(1, 6);
    let values: Vec<String> = header.iter().map(|h| format!("value of {}", h)).collect();
    let value_refs: Vec<&str> = values.iter().map(String::as_str).collect();

    let rows = project_bytes(&single_sheet(vec![text_row(&header), text_row(&value_refs)])).unwrap();
    assert_eq!(rows.len(), 1);
    for field in Field::ALL {
        assert_eq!(
            rows[0].get(field),
            Some(&CellValue::from(format!("value of {}", field.name())))
        );
    }
}

#[test]
fn test_missing_anchor_column() {
    let data = single_sheet(vec![
        text_row(&["Display", "Visual Mark", "Skipping Tool"]),
        text_row(&["a", "b", "c"]),
        text_row(&["d", "e", "f"]),
    ]);

    let rows = project_bytes(&data).unwrap();
    assert_eq!(rows.len(), 2);
    assert!(rows.iter().all(|row| row.anchor.is_none()));
    assert_eq!(rows[1].visual_mark, Some(CellValue::from("e")));
}

#[test]
fn test_extra_columns_and_types() {
    let data = single_sheet(vec![
        text_row(&["Notes", "Anchor", "Skipping Tool", "Locus of control"]),
        vec![
            Some(CellValue::from("ignored")),
            Some(CellValue::from(3.5)),
            Some(CellValue::from(true)),
            None,
        ],
    ]);

    let rows = project_bytes(&data).unwrap();
    assert_eq!(rows[0].anchor, Some(CellValue::from(3.5)));
    assert_eq!(rows[0].skipping_tool, Some(CellValue::from(true)));
    assert_eq!(rows[0].locus_of_control, None);
    assert_eq!(rows[0].iter().filter(|(_, v)| v.is_some()).count(), 2);
}

#[test]
fn test_rows_without_known_fields_are_kept() {
    let data = single_sheet(vec![
        text_row(&["Display", "Comment"]),
        vec![None, Some(CellValue::from("only a comment"))],
        text_row(&["Walking", "x"]),
    ]);

    let rows = project_bytes(&data).unwrap();
    assert_eq!(rows.len(), 2);
    assert!(rows[0].is_empty());
    assert_eq!(rows[1].display, Some(CellValue::from("Walking")));
}

#[test]
fn test_only_first_sheet_is_read() {
    let data = build_xlsx(&[
        SheetSpec::new(
            "Techniques",
            vec![text_row(&["Display"]), text_row(&["from first"])],
        ),
        SheetSpec::new(
            "Archive",
            vec![
                text_row(&["Display"]),
                text_row(&["from second"]),
                text_row(&["more"]),
            ],
        ),
    ]);

    let rows = project_bytes(&data).unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].display, Some(CellValue::from("from first")));
}

#[test]
fn test_records_keep_every_column() {
    let data = single_sheet(vec![
        text_row(&["Display", "Comment"]),
        text_row(&["Walking", "slow"]),
    ]);

    let records = read_records(&data).unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].get("Comment"), Some(&CellValue::from("slow")));
}

#[test]
fn test_zero_worksheets() {
    let data = build_xlsx(&[]);
    let err = project_bytes(&data).unwrap_err();
    assert!(matches!(err, Error::EmptyWorkbook));
    assert_eq!(err.kind(), ErrorKind::EmptyWorkbook);
}

#[test]
fn test_plain_text_bytes() {
    let err = project_bytes(b"Display,Overview\nWalking,desc text\n").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Decode);
}

#[test]
fn test_truncated_workbook() {
    let data = single_sheet(vec![text_row(&["Display"])]);
    let err = project_bytes(&data[..data.len() / 2]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Decode);
}

#[tokio::test]
async fn test_extract_with_injected_source() {
    let data = single_sheet(vec![
        text_row(&["Display", "Overview"]),
        text_row(&["Walking", "desc text"]),
    ]);
    let source = FixtureSource(HashMap::from([(
        "https://example.com/techniques.xlsx".to_string(),
        data,
    )]));

    let location = Location::parse("https://example.com/techniques.xlsx").unwrap();
    let rows = extract_rows_with(&source, &location)
        .await
        .unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].display, Some(CellValue::from("Walking")));

    let location = Location::parse("https://example.com/other.xlsx").unwrap();
    let err = extract_rows_with(&source, &location)
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Fetch);
}

#[tokio::test]
async fn test_extract_from_local_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("techniques.xlsx");
    std::fs::write(
        &path,
        single_sheet(vec![
            text_row(&["Encoding Channel", "Display"]),
            text_row(&["color", "Walking"]),
        ]),
    )
    .unwrap();

    let rows = extract_rows(path.to_str().unwrap()).await.unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].encoding_channel, Some(CellValue::from("color")));
    assert_eq!(rows[0].display, Some(CellValue::from("Walking")));
}

#[tokio::test]
async fn test_extract_from_file_url() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("My Techniques.xlsx");
    std::fs::write(
        &path,
        single_sheet(vec![
            text_row(&["Display"]),
            text_row(&["Walking"]),
        ]),
    )
    .unwrap();

    let url = url::Url::from_file_path(&path).unwrap();
    let rows = extract_rows(url.as_str()).await.unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].display, Some(CellValue::from("Walking")));
}

#[tokio::test]
async fn test_extract_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing.xlsx");

    let err = extract_rows(path.to_str().unwrap()).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Fetch);
}
