use std::path::Path;

use crate::foundation::error::{CardError, CardResult};
use crate::foundation::random::RandomSource;
use crate::model::record::Gender;

/// Gender-keyed pools of display names, one name per line in each source file.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NamePool {
    girl: Vec<String>,
    boy: Vec<String>,
}

impl NamePool {
    /// Pools from in-memory lists; names are trimmed and blanks dropped.
    pub fn new(girl: Vec<String>, boy: Vec<String>) -> Self {
        Self {
            girl: clean(girl),
            boy: clean(boy),
        }
    }

    /// Load both pools. A missing file yields an empty pool rather than an error.
    pub fn load(girl_path: &Path, boy_path: &Path) -> CardResult<Self> {
        Ok(Self::new(read_names(girl_path)?, read_names(boy_path)?))
    }

    /// The pool for `gender`.
    pub fn names(&self, gender: Gender) -> &[String] {
        match gender {
            Gender::Girl => &self.girl,
            Gender::Boy => &self.boy,
        }
    }

    /// Uniformly pick a name for `gender`, or `None` when that pool is empty.
    pub fn pick<R: RandomSource + ?Sized>(&self, gender: Gender, rng: &mut R) -> Option<&str> {
        let names = self.names(gender);
        if names.is_empty() {
            return None;
        }
        let idx = rng.random_range(0, names.len() as i32 - 1) as usize;
        names.get(idx).map(String::as_str)
    }
}

fn clean(names: Vec<String>) -> Vec<String> {
    names
        .into_iter()
        .map(|n| n.trim().to_string())
        .filter(|n| !n.is_empty())
        .collect()
}

fn read_names(path: &Path) -> CardResult<Vec<String>> {
    match std::fs::read_to_string(path) {
        Ok(text) => Ok(text.lines().map(str::to_string).collect()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::warn!(path = %path.display(), "name list not found, pool is empty");
            Ok(Vec::new())
        }
        Err(e) => Err(CardError::io(format!(
            "read name list '{}': {e}",
            path.display()
        ))),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/generate/names.rs"]
mod tests;
