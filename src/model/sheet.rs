//! Comma-separated character sheet: one header row, one row per character.
//!
//! Every value is a plain string and an empty string stands for an absent value. Fields
//! containing commas, quotes or line breaks are quoted with `"` and inner quotes doubled.

use std::path::Path;

use anyhow::Context;
use indexmap::IndexMap;

use crate::foundation::error::{CardError, CardResult};
use crate::model::record::{COLUMNS, CharacterRecord};

/// One data row keyed by header name.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SheetRow {
    cells: IndexMap<String, String>,
}

impl SheetRow {
    /// Empty row.
    pub fn new() -> Self {
        Self::default()
    }

    /// Value of `column`, or `None` when the sheet has no such column.
    pub fn get(&self, column: &str) -> Option<&str> {
        self.cells.get(column).map(String::as_str)
    }

    /// Set or replace the value of `column`.
    pub fn set(&mut self, column: impl Into<String>, value: impl Into<String>) {
        self.cells.insert(column.into(), value.into());
    }
}

/// Header plus rows, in file order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Sheet {
    header: Vec<String>,
    rows: Vec<SheetRow>,
}

impl Sheet {
    /// Empty sheet with the given header.
    pub fn with_columns<S: AsRef<str>>(columns: &[S]) -> Self {
        Self {
            header: columns.iter().map(|c| c.as_ref().to_string()).collect(),
            rows: Vec::new(),
        }
    }

    /// Build a character sheet with the canonical column set.
    pub fn from_records<'a>(records: impl IntoIterator<Item = &'a CharacterRecord>) -> Self {
        let mut sheet = Self::with_columns(&COLUMNS[..]);
        for record in records {
            sheet.push_cells(record.to_row());
        }
        sheet
    }

    /// Column names in file order.
    pub fn header(&self) -> &[String] {
        &self.header
    }

    /// Data rows, header excluded.
    pub fn rows(&self) -> &[SheetRow] {
        &self.rows
    }

    /// Number of data rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the sheet has no data rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Append a row given positionally; missing trailing cells become empty strings.
    pub fn push_cells(&mut self, cells: Vec<String>) {
        let mut row = SheetRow::new();
        let mut cells = cells.into_iter();
        for column in &self.header {
            row.set(column.clone(), cells.next().unwrap_or_default());
        }
        self.rows.push(row);
    }

    /// Parse sheet text. The first record is the header; a UTF-8 BOM is ignored.
    pub fn parse(text: &str) -> CardResult<Self> {
        let text = text.strip_prefix('\u{feff}').unwrap_or(text);
        let mut records = split_records(text)?.into_iter();

        let header: Vec<String> = records
            .next()
            .ok_or_else(|| CardError::validation("sheet has no header row"))?
            .into_iter()
            .map(|h| h.trim().to_string())
            .collect();
        if header.iter().all(|h| h.is_empty()) {
            return Err(CardError::validation("sheet header row is empty"));
        }

        let mut sheet = Self {
            header,
            rows: Vec::new(),
        };
        for cells in records {
            sheet.push_cells(cells);
        }
        Ok(sheet)
    }

    /// Serialize with `\n` line endings, quoting only where needed.
    pub fn to_csv_string(&self) -> String {
        let mut out = String::new();
        push_line(&mut out, self.header.iter().map(String::as_str));
        for row in &self.rows {
            push_line(
                &mut out,
                self.header
                    .iter()
                    .map(|column| row.get(column).unwrap_or_default()),
            );
        }
        out
    }

    /// Read and parse the sheet at `path`.
    pub fn read(path: &Path) -> CardResult<Self> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| CardError::io(format!("read sheet '{}': {e}", path.display())))?;
        Self::parse(&text)
    }

    /// Write the sheet, creating parent directories.
    pub fn write(&self, path: &Path) -> CardResult<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("create sheet dir '{}'", parent.display()))?;
        }
        std::fs::write(path, self.to_csv_string())
            .map_err(|e| CardError::io(format!("write sheet '{}': {e}", path.display())))
    }
}

fn push_line<'a>(out: &mut String, cells: impl Iterator<Item = &'a str>) {
    let line: Vec<String> = cells.map(escape_cell).collect();
    out.push_str(&line.join(","));
    out.push('\n');
}

fn escape_cell(value: &str) -> String {
    if value.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

/// Split text into records of cells, honoring quoted fields that span lines.
/// Blank lines are dropped.
fn split_records(text: &str) -> CardResult<Vec<Vec<String>>> {
    let mut records = Vec::new();
    let mut record = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = text.chars().peekable();

    while let Some(ch) = chars.next() {
        if in_quotes {
            if ch == '"' {
                if chars.peek() == Some(&'"') {
                    current.push('"');
                    chars.next();
                } else {
                    in_quotes = false;
                }
            } else {
                current.push(ch);
            }
            continue;
        }
        match ch {
            '"' => in_quotes = true,
            ',' => record.push(std::mem::take(&mut current)),
            '\r' if chars.peek() == Some(&'\n') => {}
            '\n' | '\r' => {
                record.push(std::mem::take(&mut current));
                finish_record(&mut records, std::mem::take(&mut record));
            }
            _ => current.push(ch),
        }
    }

    if in_quotes {
        return Err(CardError::validation("unterminated quoted field in sheet"));
    }
    if !current.is_empty() || !record.is_empty() {
        record.push(current);
        finish_record(&mut records, record);
    }
    Ok(records)
}

fn finish_record(records: &mut Vec<Vec<String>>, record: Vec<String>) {
    let blank = record.len() == 1 && record[0].trim().is_empty();
    if !blank {
        records.push(record);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/model/sheet.rs"]
mod tests;
