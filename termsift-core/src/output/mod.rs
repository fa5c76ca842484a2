//! Persistence of term tables and histograms.
//!
//! Every stage writes its table so that later stages can run on their own.
//! Tables are tab-separated with a header row naming the columns:
//!
//! - Per-set tables: `term  count  score`
//! - Merged tables: `term  intersections  count  max_count  score`
//!
//! Scores are written with two decimals. Readers detect the table kind from
//! the header, so the filter stage accepts either kind.
//!
//! ## Examples
//!
//! ```rust,no_run
//! use std::path::Path;
//! use termsift_core::output::{read_term_table_file, term_table_path};
//!
//! let path = term_table_path(Path::new("summary"), "legumes");
//! let table = read_term_table_file(&path)?;
//! println!("{} terms", table.len());
//! # Ok::<(), termsift_core::types::TermsiftError>(())
//! ```

use std::fs::{self, File};
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::types::{TermTable, TermsiftError};

mod formats {
    pub mod histograms;
    pub mod terms;
}

pub use formats::histograms::{
    write_frequency_histogram, write_intersection_histogram, write_mask_histogram,
    write_score_histogram,
};
pub use formats::terms::{read_term_table, write_term_table};

/// `<dir>/<stem><suffix>`
pub fn stem_path(dir: &Path, stem: &str, suffix: &str) -> PathBuf {
    dir.join(format!("{}{}", stem, suffix))
}

/// Location of a term table, `<dir>/<stem>_terms.tsv`.
pub fn term_table_path(dir: &Path, stem: &str) -> PathBuf {
    stem_path(dir, stem, crate::constants::TERMS_SUFFIX)
}

/// Creates `dir` and its parents if missing.
pub fn ensure_dir(dir: &Path) -> Result<(), TermsiftError> {
    if !dir.is_dir() {
        debug!("Making directory \"{}\"", dir.display());
        fs::create_dir_all(dir).map_err(|source| TermsiftError::OutputPath {
            path: dir.to_path_buf(),
            source,
        })?;
    }
    Ok(())
}

/// Opens `path` for buffered writing, naming the path on failure.
pub fn create_output(path: &Path) -> Result<BufWriter<File>, TermsiftError> {
    File::create(path)
        .map(BufWriter::new)
        .map_err(|source| TermsiftError::OutputPath {
            path: path.to_path_buf(),
            source,
        })
}

pub fn write_term_table_file(path: &Path, table: &TermTable) -> Result<(), TermsiftError> {
    debug!("Writing {} terms to \"{}\"", table.len(), path.display());
    write_term_table(create_output(path)?, table)
}

/// # Errors
///
/// Returns [`TermsiftError::MissingInput`] if `path` does not exist.
pub fn read_term_table_file(path: &Path) -> Result<TermTable, TermsiftError> {
    if !path.is_file() {
        return Err(TermsiftError::MissingInput(path.to_path_buf()));
    }
    debug!("Reading terms from \"{}\"", path.display());
    read_term_table(BufReader::new(File::open(path)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TermRecord;
    use tempfile::TempDir;

    #[test]
    fn test_term_table_path() {
        assert_eq!(
            term_table_path(Path::new("data/glyma"), "k10"),
            PathBuf::from("data/glyma/k10_terms.tsv")
        );
    }

    #[test]
    fn test_table_file_round_trip() {
        let dir = TempDir::new().unwrap();
        let path = term_table_path(dir.path(), "k3");
        let table = TermTable::PerSet(vec![
            TermRecord::new("MKV", 1, 0.5),
            TermRecord::new("AAA", 4, 2.25),
        ]);
        write_term_table_file(&path, &table).unwrap();
        assert_eq!(read_term_table_file(&path).unwrap(), table);
    }

    #[test]
    fn test_read_missing_table() {
        let dir = TempDir::new().unwrap();
        let path = term_table_path(dir.path(), "absent");
        assert!(matches!(
            read_term_table_file(&path),
            Err(TermsiftError::MissingInput(p)) if p == path
        ));
    }

    #[test]
    fn test_ensure_dir_creates_parents() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("summary").join("k10");
        ensure_dir(&nested).unwrap();
        assert!(nested.is_dir());
        ensure_dir(&nested).unwrap();
    }

    #[test]
    fn test_unwritable_output_names_path() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing").join("out.tsv");
        match create_output(&path) {
            Err(TermsiftError::OutputPath { path: p, .. }) => assert_eq!(p, path),
            other => panic!("Expected OutputPath, got {:?}", other.map(|_| ())),
        }
    }
}
