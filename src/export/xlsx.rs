use super::SectionRow;
use crate::error::{Error, Result};
use chrono::{DateTime, Datelike, Local, Timelike, Utc};
use log::{info, warn};
use std::fs::File;
use std::io::{Seek, Write};
use std::path::Path;
use zip::write::FileOptions;
use zip::{CompressionMethod, ZipWriter};

/// Longest text a spreadsheet cell accepts
pub const MAX_CELL_CHARS: usize = 32_767;

/// Longest worksheet name Excel accepts
pub const MAX_SHEET_NAME_CHARS: usize = 31;

const SHEET_NAME_FORBIDDEN: [char; 7] = ['[', ']', ':', '*', '?', '/', '\\'];

const CONTENT_TYPES: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">
<Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>
<Default Extension="xml" ContentType="application/xml"/>
<Override PartName="/xl/workbook.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml"/>
<Override PartName="/xl/worksheets/sheet1.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.worksheet+xml"/>
<Override PartName="/xl/sharedStrings.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.sharedStrings+xml"/>
<Override PartName="/docProps/core.xml" ContentType="application/vnd.openxmlformats-package.core-properties+xml"/>
</Types>"#;

const ROOT_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
<Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="xl/workbook.xml"/>
<Relationship Id="rId2" Type="http://schemas.openxmlformats.org/package/2006/relationships/metadata/core-properties" Target="docProps/core.xml"/>
</Relationships>"#;

const WORKBOOK_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
<Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="worksheets/sheet1.xml"/>
<Relationship Id="rId2" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/sharedStrings" Target="sharedStrings.xml"/>
</Relationships>"#;

/// Writes section rows to a single-sheet `.xlsx` workbook
///
/// Column A holds the source file name, column B the section text. All
/// cells are shared strings.
pub struct XlsxWriter {
    sheet_name: String,
    header: bool,
}

impl XlsxWriter {
    pub fn new() -> Self {
        Self {
            sheet_name: "Sheet1".to_string(),
            header: true,
        }
    }

    /// Set the worksheet name
    pub fn sheet_name(mut self, name: impl Into<String>) -> Self {
        self.sheet_name = name.into();
        self
    }

    /// Emit a `File` / `Content` header row before the data
    pub fn header(mut self, header: bool) -> Self {
        self.header = header;
        self
    }

    /// Write `rows` to a workbook file at `path`
    pub fn write_to_file(&self, rows: &[SectionRow], path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let file = File::create(path)?;
        self.write(rows, file)?;
        info!("Exported {} rows to {}", rows.len(), path.display());
        Ok(())
    }

    /// Write `rows` as a workbook package into any seekable writer
    pub fn write<W: Write + Seek>(&self, rows: &[SectionRow], writer: W) -> Result<W> {
        if rows.is_empty() {
            return Err(Error::Spreadsheet("no rows to export".to_string()));
        }
        validate_sheet_name(&self.sheet_name)?;

        let mut table: Vec<[&str; 2]> = Vec::with_capacity(rows.len() + 1);
        if self.header {
            table.push(["File", "Content"]);
        }
        table.extend(rows.iter().map(|r| [r.file.as_str(), r.content.as_str()]));

        let now = Local::now();
        let mut zip = ZipWriter::new(writer);

        let parts = [
            ("[Content_Types].xml", CONTENT_TYPES.to_string()),
            ("_rels/.rels", ROOT_RELS.to_string()),
            ("docProps/core.xml", core_properties(Utc::now())),
            ("xl/workbook.xml", self.workbook_xml()),
            ("xl/_rels/workbook.xml.rels", WORKBOOK_RELS.to_string()),
            ("xl/worksheets/sheet1.xml", sheet_xml(table.len())),
            ("xl/sharedStrings.xml", shared_strings_xml(&table)),
        ];

        for (name, body) in parts {
            zip.start_file(name, file_options(&now))?;
            zip.write_all(body.as_bytes())?;
        }

        Ok(zip.finish()?)
    }

    fn workbook_xml(&self) -> String {
        format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<workbook xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships">
<sheets><sheet name="{}" sheetId="1" r:id="rId1"/></sheets>
</workbook>"#,
            escape_xml(&self.sheet_name)
        )
    }
}

impl Default for XlsxWriter {
    fn default() -> Self {
        Self::new()
    }
}

/// Excel refuses empty names, names over 31 characters, and any of `[]:*?/\`
fn validate_sheet_name(name: &str) -> Result<()> {
    let len = name.chars().count();
    if len == 0 || len > MAX_SHEET_NAME_CHARS {
        return Err(Error::Spreadsheet(format!(
            "sheet name must be 1 to {} characters, got {}",
            MAX_SHEET_NAME_CHARS, len
        )));
    }
    if let Some(c) = name.chars().find(|c| SHEET_NAME_FORBIDDEN.contains(c)) {
        return Err(Error::Spreadsheet(format!(
            "sheet name {:?} contains forbidden character {:?}",
            name, c
        )));
    }
    Ok(())
}

fn file_options(now: &DateTime<Local>) -> FileOptions<'static, ()> {
    FileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .last_modified_time(
            zip::DateTime::from_date_and_time(
                now.year() as u16,
                now.month() as u8,
                now.day() as u8,
                now.hour() as u8,
                now.minute() as u8,
                now.second() as u8,
            )
            .unwrap_or_default(),
        )
}

fn core_properties(created: DateTime<Utc>) -> String {
    let stamp = created.format("%Y-%m-%dT%H:%M:%SZ");
    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<cp:coreProperties xmlns:cp="http://schemas.openxmlformats.org/package/2006/metadata/core-properties" xmlns:dc="http://purl.org/dc/elements/1.1/" xmlns:dcterms="http://purl.org/dc/terms/" xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance">
<dc:creator>pdfsplit</dc:creator>
<dcterms:created xsi:type="dcterms:W3CDTF">{stamp}</dcterms:created>
<dcterms:modified xsi:type="dcterms:W3CDTF">{stamp}</dcterms:modified>
</cp:coreProperties>"#
    )
}

/// Worksheet whose cell (row r, column c) refers to shared string `2 * r + c`
fn sheet_xml(row_count: usize) -> String {
    let mut xml = String::from(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main"><sheetData>"#,
    );

    for row in 0..row_count {
        let n = row + 1;
        xml.push_str(&format!(
            r#"<row r="{n}"><c r="A{n}" t="s"><v>{}</v></c><c r="B{n}" t="s"><v>{}</v></c></row>"#,
            row * 2,
            row * 2 + 1
        ));
    }

    xml.push_str("</sheetData></worksheet>");
    xml
}

fn shared_strings_xml(table: &[[&str; 2]]) -> String {
    let count = table.len() * 2;
    let mut xml = format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<sst xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" count="{count}" uniqueCount="{count}">"#
    );

    for cell in table.iter().flatten() {
        xml.push_str(r#"<si><t xml:space="preserve">"#);
        xml.push_str(&escape_xml(&fit_cell(cell)));
        xml.push_str("</t></si>");
    }

    xml.push_str("</sst>");
    xml
}

fn fit_cell(text: &str) -> String {
    match text.char_indices().nth(MAX_CELL_CHARS) {
        Some((cut, _)) => {
            warn!(
                "Cell text truncated to {} characters",
                MAX_CELL_CHARS
            );
            text[..cut].to_string()
        }
        None => text.to_string(),
    }
}

/// Escape text for XML element and attribute content
///
/// Characters XML 1.0 cannot carry are dropped.
fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            '\t' | '\n' | '\r' => out.push(c),
            c if (c as u32) < 0x20 => {}
            c => out.push(c),
        }
    }
    out
}
