//! Minimal OOXML workbook writer. An .xlsx file is a ZIP package of XML parts;
//! this emits the four mandatory parts with a single two-column sheet, using
//! inline strings so no shared-string table is needed.

use crate::core::report::{Report, SPECIALTY_HEADER, TOTAL_LABEL};
use crate::utils::error::Result;
use std::fmt::Write as _;
use std::io::Write;
use zip::write::{FileOptions, ZipWriter};

const CONTENT_TYPES: &str = concat!(
    r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
    r#"<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">"#,
    r#"<Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>"#,
    r#"<Default Extension="xml" ContentType="application/xml"/>"#,
    r#"<Override PartName="/xl/workbook.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml"/>"#,
    r#"<Override PartName="/xl/worksheets/sheet1.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.worksheet+xml"/>"#,
    r#"</Types>"#,
);

const ROOT_RELS: &str = concat!(
    r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
    r#"<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">"#,
    r#"<Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="xl/workbook.xml"/>"#,
    r#"</Relationships>"#,
);

const WORKBOOK_RELS: &str = concat!(
    r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
    r#"<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">"#,
    r#"<Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="worksheets/sheet1.xml"/>"#,
    r#"</Relationships>"#,
);

/// Serialize the report into an in-memory .xlsx blob. Column A holds the
/// specialty labels, column B the counts, headed by the unit name; a TOTAL row
/// closes the sheet.
pub fn workbook(report: &Report) -> Result<Vec<u8>> {
    let sheet = worksheet_xml(report);
    let workbook = workbook_xml(&report.unit);

    let mut zip = ZipWriter::new(std::io::Cursor::new(Vec::new()));

    zip.start_file::<_, ()>("[Content_Types].xml", FileOptions::default())?;
    zip.write_all(CONTENT_TYPES.as_bytes())?;

    zip.start_file::<_, ()>("_rels/.rels", FileOptions::default())?;
    zip.write_all(ROOT_RELS.as_bytes())?;

    zip.start_file::<_, ()>("xl/workbook.xml", FileOptions::default())?;
    zip.write_all(workbook.as_bytes())?;

    zip.start_file::<_, ()>("xl/_rels/workbook.xml.rels", FileOptions::default())?;
    zip.write_all(WORKBOOK_RELS.as_bytes())?;

    zip.start_file::<_, ()>("xl/worksheets/sheet1.xml", FileOptions::default())?;
    zip.write_all(sheet.as_bytes())?;

    let cursor = zip.finish()?;
    Ok(cursor.into_inner())
}

fn workbook_xml(unit: &str) -> String {
    format!(
        concat!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
            r#"<workbook xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" "#,
            r#"xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships">"#,
            r#"<sheets><sheet name="{}" sheetId="1" r:id="rId1"/></sheets></workbook>"#,
        ),
        escape_xml(&sheet_name(unit)),
    )
}

fn worksheet_xml(report: &Report) -> String {
    let mut rows = String::new();
    write_text_row(&mut rows, 1, SPECIALTY_HEADER, &report.unit);

    let mut row_num = 2;
    for row in &report.rows {
        write_count_row(&mut rows, row_num, row.specialty, u64::from(row.count));
        row_num += 1;
    }
    write_count_row(&mut rows, row_num, TOTAL_LABEL, report.total);

    format!(
        concat!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
            r#"<worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main">"#,
            r#"<sheetData>{}</sheetData></worksheet>"#,
        ),
        rows,
    )
}

fn write_text_row(out: &mut String, row: u32, left: &str, right: &str) {
    let _ = write!(
        out,
        r#"<row r="{row}"><c r="A{row}" t="inlineStr"><is><t>{}</t></is></c><c r="B{row}" t="inlineStr"><is><t>{}</t></is></c></row>"#,
        escape_xml(left),
        escape_xml(right),
    );
}

fn write_count_row(out: &mut String, row: u32, label: &str, count: u64) {
    let _ = write!(
        out,
        r#"<row r="{row}"><c r="A{row}" t="inlineStr"><is><t>{}</t></is></c><c r="B{row}"><v>{count}</v></c></row>"#,
        escape_xml(label),
    );
}

/// Worksheet names reject a handful of characters and cap at 31 chars.
fn sheet_name(unit: &str) -> String {
    unit.chars()
        .map(|c| match c {
            '\\' | '/' | '?' | '*' | '[' | ']' | ':' => ' ',
            other => other,
        })
        .take(31)
        .collect()
}

fn escape_xml(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            other => escaped.push(other),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::Category;
    use std::collections::BTreeMap;

    fn sample_report() -> Report {
        let mut entries = BTreeMap::new();
        entries.insert("Enfermería".to_string(), 4);
        entries.insert("Medicina".to_string(), 2);
        Report::build(Category::Universitarios, "HUGC Dr. Negrín", &entries)
    }

    fn read_part(blob: &[u8], name: &str) -> String {
        let cursor = std::io::Cursor::new(blob.to_vec());
        let mut archive = zip::ZipArchive::new(cursor).unwrap();
        let mut file = archive.by_name(name).unwrap();
        let mut content = String::new();
        std::io::Read::read_to_string(&mut file, &mut content).unwrap();
        content
    }

    #[test]
    fn workbook_contains_all_package_parts() {
        let blob = workbook(&sample_report()).unwrap();

        let cursor = std::io::Cursor::new(blob);
        let archive = zip::ZipArchive::new(cursor).unwrap();
        let mut names: Vec<&str> = archive.file_names().collect();
        names.sort_unstable();

        assert_eq!(
            names,
            vec![
                "[Content_Types].xml",
                "_rels/.rels",
                "xl/_rels/workbook.xml.rels",
                "xl/workbook.xml",
                "xl/worksheets/sheet1.xml",
            ]
        );
    }

    #[test]
    fn sheet_carries_header_rows_and_total() {
        let report = sample_report();
        let blob = workbook(&report).unwrap();
        let sheet = read_part(&blob, "xl/worksheets/sheet1.xml");

        assert!(sheet.contains("<t>Especialidad</t>"));
        assert!(sheet.contains("<t>HUGC Dr. Negrín</t>"));
        assert!(sheet.contains("<t>Enfermería</t>"));
        assert!(sheet.contains("<v>4</v>"));
        assert!(sheet.contains("<t>TOTAL</t>"));
        assert!(sheet.contains("<v>6</v>"));

        // Header + 9 university rows + TOTAL.
        assert_eq!(sheet.matches("<row ").count(), 11);
    }

    #[test]
    fn sheet_name_lands_in_workbook_part() {
        let blob = workbook(&sample_report()).unwrap();
        let wb = read_part(&blob, "xl/workbook.xml");
        assert!(wb.contains(r#"name="HUGC Dr. Negrín""#));
    }

    #[test]
    fn unit_names_are_xml_escaped() {
        let report = Report::build(Category::Universitarios, "Unidad & Co <1>", &BTreeMap::new());
        let blob = workbook(&report).unwrap();
        let sheet = read_part(&blob, "xl/worksheets/sheet1.xml");

        assert!(sheet.contains("Unidad &amp; Co &lt;1&gt;"));
        assert!(!sheet.contains("Unidad & Co"));
    }

    #[test]
    fn sheet_names_are_sanitized_and_capped() {
        assert_eq!(sheet_name("a/b:c*d"), "a b c d");
        let long = "x".repeat(40);
        assert_eq!(sheet_name(&long).chars().count(), 31);
    }
}
