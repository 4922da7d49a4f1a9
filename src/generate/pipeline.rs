//! Descriptor folder to character sheet.

use std::path::{Path, PathBuf};

use anyhow::Context;

use crate::foundation::error::{CardError, CardResult};
use crate::foundation::random::RandomSource;
use crate::generate::names::NamePool;
use crate::model::record::CharacterRecord;
use crate::model::sheet::Sheet;
use crate::rules::engine::TagRuleEngine;
use crate::rules::tags::TagSet;

const DESCRIPTOR_EXT: &str = "txt";

/// Outcome of one generation run.
#[derive(Clone, Debug, Default)]
pub struct GenerationReport {
    /// Derived characters, in descriptor order.
    pub records: Vec<CharacterRecord>,
    /// Descriptors that could not be read, with the reason.
    pub skipped: Vec<(PathBuf, String)>,
}

/// Turns the descriptor folder into character records.
pub struct CharacterGenerationPipeline {
    engine: TagRuleEngine,
    names: NamePool,
    characters_dir: PathBuf,
}

impl CharacterGenerationPipeline {
    /// Pipeline reading descriptors from `characters_dir`.
    pub fn new(engine: TagRuleEngine, names: NamePool, characters_dir: impl Into<PathBuf>) -> Self {
        Self {
            engine,
            names,
            characters_dir: characters_dir.into(),
        }
    }

    /// Descriptor files (`*.txt`) in the characters directory, sorted by file name.
    pub fn descriptors(&self) -> CardResult<Vec<PathBuf>> {
        if !self.characters_dir.is_dir() {
            return Err(CardError::asset_missing(format!(
                "characters directory '{}' not found",
                self.characters_dir.display()
            )));
        }

        let entries = std::fs::read_dir(&self.characters_dir).with_context(|| {
            format!("list descriptors in '{}'", self.characters_dir.display())
        })?;

        let mut paths = Vec::new();
        for entry in entries {
            let path = entry.context("read descriptor dir entry")?.path();
            if path.is_file() && path.extension().is_some_and(|e| e == DESCRIPTOR_EXT) {
                paths.push(path);
            }
        }
        paths.sort();
        Ok(paths)
    }

    /// Derive one character from a descriptor file.
    ///
    /// The file stem becomes the portrait key. The name comes from the gender's pool, or
    /// falls back to the portrait key when that pool is empty.
    pub fn generate_one<R: RandomSource + ?Sized>(
        &self,
        descriptor: &Path,
        rng: &mut R,
    ) -> CardResult<CharacterRecord> {
        let image = descriptor
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .filter(|s| !s.is_empty())
            .ok_or_else(|| {
                CardError::validation(format!(
                    "descriptor '{}' has no file name",
                    descriptor.display()
                ))
            })?;
        let tags = TagSet::read(descriptor)?;

        let derivation = self.engine.derive(&tags, None, rng);
        let name = match self.names.pick(derivation.gender, rng) {
            Some(name) => name.to_string(),
            None => {
                tracing::warn!(
                    image = %image,
                    gender = ?derivation.gender,
                    "name pool is empty, using the image key as name"
                );
                image.clone()
            }
        };

        let mut record = derivation.record;
        record.name = name;
        record.image = image;
        Ok(record)
    }

    /// Derive every descriptor in file-name order.
    #[tracing::instrument(skip(self, rng), fields(dir = %self.characters_dir.display()))]
    pub fn generate<R: RandomSource + ?Sized>(&self, rng: &mut R) -> CardResult<GenerationReport> {
        let mut report = GenerationReport::default();
        for descriptor in self.descriptors()? {
            match self.generate_one(&descriptor, rng) {
                Ok(record) => {
                    tracing::debug!(name = %record.name, image = %record.image, "derived character");
                    report.records.push(record);
                }
                Err(e) => {
                    tracing::warn!(path = %descriptor.display(), error = %e, "skipping descriptor");
                    report.skipped.push((descriptor, e.to_string()));
                }
            }
        }
        Ok(report)
    }

    /// Generate every character and write the sheet to `sheet_path`.
    pub fn run<R: RandomSource + ?Sized>(
        &self,
        rng: &mut R,
        sheet_path: &Path,
    ) -> CardResult<GenerationReport> {
        let report = self.generate(rng)?;
        Sheet::from_records(&report.records).write(sheet_path)?;
        tracing::info!(
            count = report.records.len(),
            sheet = %sheet_path.display(),
            "wrote character sheet"
        );
        Ok(report)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/generate/pipeline.rs"]
mod tests;
