//! Character sheet to card files.

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::assets::decode::encode_png;
use crate::foundation::core::Canvas;
use crate::foundation::error::{CardError, CardResult};
use crate::model::record::CharacterRecord;
use crate::model::sheet::{Sheet, SheetRow};
use crate::render::compositor::CardCompositor;
use crate::render::text::TextRasterizer;

const CARD_EXT: &str = "png";

/// Append-only card directory: an existing file is never overwritten.
///
/// `<name>.png` is tried first, then `<name>_1.png`, `<name>_2.png`, and so on. Each
/// candidate is claimed with `create_new`, so two writers can not end up on one path.
#[derive(Clone, Debug)]
pub struct OutputDir {
    dir: PathBuf,
}

impl OutputDir {
    /// Output directory at `dir`; created on first save.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// The directory path.
    pub fn path(&self) -> &Path {
        &self.dir
    }

    /// Claim the first free path for `name` and return it with the created, empty file.
    pub fn reserve(&self, name: &str) -> CardResult<(PathBuf, File)> {
        std::fs::create_dir_all(&self.dir).map_err(|e| {
            CardError::io(format!("create output dir '{}': {e}", self.dir.display()))
        })?;

        let stem = file_stem_for(name);
        for index in 0u32.. {
            let file_name = match index {
                0 => format!("{stem}.{CARD_EXT}"),
                n => format!("{stem}_{n}.{CARD_EXT}"),
            };
            let path = self.dir.join(file_name);
            match OpenOptions::new().write(true).create_new(true).open(&path) {
                Ok(file) => return Ok((path, file)),
                Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => continue,
                Err(e) => {
                    return Err(CardError::io(format!(
                        "create card '{}': {e}",
                        path.display()
                    )));
                }
            }
        }
        Err(CardError::io(format!("no free file name for '{stem}'")))
    }

    /// Encode `card` and write it under the first free name.
    pub fn save(&self, name: &str, card: &Canvas) -> CardResult<PathBuf> {
        let bytes = encode_png(card)?;
        let (path, mut file) = self.reserve(name)?;
        if let Err(e) = file.write_all(&bytes).and_then(|()| file.sync_all()) {
            drop(file);
            std::fs::remove_file(&path).ok();
            return Err(CardError::io(format!(
                "write card '{}': {e}",
                path.display()
            )));
        }
        Ok(path)
    }
}

/// File stem for a character name: path separators become `_`.
pub fn file_stem_for(name: &str) -> String {
    let stem: String = name
        .trim()
        .chars()
        .map(|c| match c {
            '/' | '\\' | '\0' => '_',
            c => c,
        })
        .collect();
    if stem.is_empty() || stem == "." || stem == ".." {
        "_".to_string()
    } else {
        stem
    }
}

/// A row that produced no card.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RowIssue {
    /// 1-based data row number, header excluded.
    pub row: usize,
    /// Character name from the row, possibly empty.
    pub name: String,
    /// Error message.
    pub reason: String,
}

/// Outcome of one rendering run.
#[derive(Clone, Debug, Default)]
pub struct RenderReport {
    /// Saved card paths, in row order.
    pub written: Vec<PathBuf>,
    /// Rows that failed validation.
    pub skipped: Vec<RowIssue>,
    /// Valid rows whose card could not be composed or saved.
    pub failed: Vec<RowIssue>,
}

impl RenderReport {
    /// Whether every row produced a card.
    pub fn is_clean(&self) -> bool {
        self.skipped.is_empty() && self.failed.is_empty()
    }
}

/// Sheet rows to saved cards.
pub struct CardRenderingPipeline<T> {
    compositor: CardCompositor<T>,
    output: OutputDir,
}

impl<T: TextRasterizer> CardRenderingPipeline<T> {
    /// Pipeline drawing with `compositor` into `output`.
    pub fn new(compositor: CardCompositor<T>, output: OutputDir) -> Self {
        Self { compositor, output }
    }

    /// Where cards are written.
    pub fn output(&self) -> &OutputDir {
        &self.output
    }

    /// Render every row of the sheet at `sheet_path`.
    pub fn run_file(&mut self, sheet_path: &Path) -> CardResult<RenderReport> {
        let sheet = Sheet::read(sheet_path)?;
        Ok(self.run(&sheet))
    }

    /// Render every row in order. Failures stay confined to their row.
    #[tracing::instrument(skip(self, sheet), fields(rows = sheet.len()))]
    pub fn run(&mut self, sheet: &Sheet) -> RenderReport {
        let mut report = RenderReport::default();
        for (i, row) in sheet.rows().iter().enumerate() {
            let row_no = i + 1;
            let name = row.get("name").unwrap_or_default().trim().to_string();

            let record = match CharacterRecord::from_row(row) {
                Ok(record) => record,
                Err(e) => {
                    tracing::warn!(row = row_no, name = %name, error = %e, "skipping row");
                    report.skipped.push(issue(row_no, &name, &e));
                    continue;
                }
            };

            match self.render_record(&record) {
                Ok(path) => {
                    tracing::info!(name = %record.name, path = %path.display(), "saved card");
                    report.written.push(path);
                }
                Err(e) => {
                    tracing::error!(row = row_no, name = %record.name, error = %e, "card failed");
                    report.failed.push(issue(row_no, &record.name, &e));
                }
            }
        }
        report
    }

    /// Validate one row, then render and save it.
    pub fn render_row(&mut self, row: &SheetRow) -> CardResult<PathBuf> {
        let record = CharacterRecord::from_row(row)?;
        self.render_record(&record)
    }

    /// Render and save an already validated record.
    pub fn render_record(&mut self, record: &CharacterRecord) -> CardResult<PathBuf> {
        let card = self.compositor.render(record)?;
        self.output.save(&record.name, &card)
    }
}

fn issue(row: usize, name: &str, err: &CardError) -> RowIssue {
    RowIssue {
        row,
        name: name.to_string(),
        reason: err.to_string(),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/pipeline.rs"]
mod tests;
