//! Auto-filter detection for XLSX workbooks.
//!
//! The workbook readers do not expose auto-filters, so the worksheet XML is
//! read directly from the archive: `xl/workbook.xml` maps the sheet name to a
//! relationship id, `xl/_rels/workbook.xml.rels` maps that id to the
//! worksheet part, and the part's `<autoFilter ref="..."/>` gives the range.

use std::borrow::Cow;
use std::collections::HashMap;
use std::io::{Read, Seek};
use std::path::Path;

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use tracing::debug;
use zip::ZipArchive;

use crate::raw::CellRange;

/// Reads the auto-filter range of `sheet_name`, if the file is an XLSX
/// archive and the sheet declares one. Any read failure yields `None`.
pub fn read_auto_filter(path: &Path, sheet_name: &str) -> Option<CellRange> {
    let file = std::fs::File::open(path).ok()?;
    let mut archive = match ZipArchive::new(file) {
        Ok(archive) => archive,
        Err(error) => {
            debug!(path = %path.display(), %error, "not a zip archive, skipping auto-filter lookup");
            return None;
        }
    };
    let workbook_xml = read_zip_text(&mut archive, "xl/workbook.xml")?;
    let rels_xml = read_zip_text(&mut archive, "xl/_rels/workbook.xml.rels")?;
    let part = resolve_worksheet_path(&workbook_xml, &rels_xml, sheet_name)?;
    let sheet_xml = read_zip_text(&mut archive, &part)?;
    let range = auto_filter_ref(&sheet_xml).and_then(|reference| CellRange::parse(&reference));
    debug!(sheet = sheet_name, part = %part, found = range.is_some(), "auto-filter lookup");
    range
}

fn read_zip_text<R: Read + Seek>(archive: &mut ZipArchive<R>, path: &str) -> Option<String> {
    let mut file = archive.by_name(path).ok()?;
    let mut content = String::new();
    file.read_to_string(&mut content).ok()?;
    Some(content)
}

fn attribute(element: &BytesStart<'_>, key: &[u8]) -> Option<String> {
    element
        .attributes()
        .flatten()
        .find(|attr| attr.key.as_ref() == key)
        .map(|attr| {
            let raw = String::from_utf8_lossy(&attr.value).into_owned();
            quick_xml::escape::unescape(&raw)
                .map(Cow::into_owned)
                .unwrap_or(raw)
        })
}

/// Resolves the archive path of the worksheet named `sheet_name`.
fn resolve_worksheet_path(workbook_xml: &str, rels_xml: &str, sheet_name: &str) -> Option<String> {
    let mut rid = None;
    let mut reader = Reader::from_str(workbook_xml);
    reader.config_mut().trim_text(true);
    let mut buf = Vec::new();
    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Empty(ref e)) | Ok(Event::Start(ref e)) if e.name().as_ref() == b"sheet" => {
                if attribute(e, b"name").as_deref() == Some(sheet_name) {
                    rid = attribute(e, b"r:id");
                    break;
                }
            }
            Ok(Event::Eof) | Err(_) => break,
            _ => {}
        }
        buf.clear();
    }
    let rid = rid?;

    let mut targets: HashMap<String, String> = HashMap::new();
    let mut reader = Reader::from_str(rels_xml);
    reader.config_mut().trim_text(true);
    let mut buf = Vec::new();
    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Empty(ref e)) | Ok(Event::Start(ref e))
                if e.name().as_ref() == b"Relationship" =>
            {
                if let (Some(id), Some(target)) = (attribute(e, b"Id"), attribute(e, b"Target")) {
                    targets.insert(id, target);
                }
            }
            Ok(Event::Eof) | Err(_) => break,
            _ => {}
        }
        buf.clear();
    }

    let target = targets.get(&rid)?;
    Some(match target.strip_prefix('/') {
        Some(absolute) => absolute.to_string(),
        None => format!("xl/{target}"),
    })
}

/// The `ref` attribute of the worksheet-level `<autoFilter>` element.
fn auto_filter_ref(sheet_xml: &str) -> Option<String> {
    let mut reader = Reader::from_str(sheet_xml);
    reader.config_mut().trim_text(true);
    let mut buf = Vec::new();
    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Empty(ref e)) | Ok(Event::Start(ref e))
                if e.name().as_ref() == b"autoFilter" =>
            {
                return attribute(e, b"ref");
            }
            Ok(Event::Eof) | Err(_) => return None,
            _ => {}
        }
        buf.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WORKBOOK: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<workbook xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships">
  <sheets>
    <sheet name="Summary" sheetId="1" r:id="rId1"/>
    <sheet name="Lanes &amp; Rates" sheetId="2" r:id="rId2"/>
  </sheets>
</workbook>"#;

    const RELS: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
  <Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="worksheets/sheet1.xml"/>
  <Relationship Id="rId2" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="/xl/worksheets/sheet2.xml"/>
</Relationships>"#;

    #[test]
    fn resolves_relative_and_absolute_targets() {
        assert_eq!(
            resolve_worksheet_path(WORKBOOK, RELS, "Summary").as_deref(),
            Some("xl/worksheets/sheet1.xml")
        );
        assert_eq!(
            resolve_worksheet_path(WORKBOOK, RELS, "Lanes & Rates").as_deref(),
            Some("xl/worksheets/sheet2.xml")
        );
        assert_eq!(resolve_worksheet_path(WORKBOOK, RELS, "Missing"), None);
    }

    #[test]
    fn finds_auto_filter_ref() {
        let xml = r#"<worksheet><sheetData><row r="1"/></sheetData><autoFilter ref="B4:H40"/></worksheet>"#;
        assert_eq!(auto_filter_ref(xml).as_deref(), Some("B4:H40"));
        assert_eq!(auto_filter_ref("<worksheet><sheetData/></worksheet>"), None);
    }
}
