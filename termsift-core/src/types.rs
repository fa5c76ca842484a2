use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A term and the simplicity score at the position where it starts.
///
/// Produced by the extractor for every unambiguous window and consumed
/// immediately by aggregation.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredOccurrence {
    /// Uppercase term of length k
    pub term: String,
    /// Oracle score at the window's start position
    pub score: f64,
}

impl ScoredOccurrence {
    pub fn new(term: impl Into<String>, score: f64) -> Self {
        Self {
            term: term.into(),
            score,
        }
    }
}

/// One unique term of a single data set.
///
/// # Examples
///
/// ```rust
/// use termsift_core::types::TermRecord;
///
/// let record = TermRecord::new("ACDEFGHIKL", 3, 0.25);
/// assert_eq!(record.term.len(), 10);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TermRecord {
    pub term: String,
    /// Number of occurrences in the set (always at least 1)
    pub count: u64,
    /// Arithmetic mean of the occurrence scores
    pub score: f64,
}

impl TermRecord {
    pub fn new(term: impl Into<String>, count: u64, score: f64) -> Self {
        Self {
            term: term.into(),
            count,
            score,
        }
    }
}

/// A term merged across several data sets.
///
/// Field order matches the column order of the persisted merged table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MergedTermRecord {
    pub term: String,
    /// Number of sets in which the term had a nonzero count
    pub intersections: u32,
    /// Sum of the per-set counts
    pub count: u64,
    /// Largest single-set count
    pub max_count: u64,
    /// Count-weighted mean of the per-set scores
    pub score: f64,
}

/// A term table of either kind.
///
/// Filtering and histogram reporting accept both per-set and merged tables;
/// the variant decides which columns exist.
#[derive(Debug, Clone, PartialEq)]
pub enum TermTable {
    /// Output of aggregation for one data set
    PerSet(Vec<TermRecord>),
    /// Output of intersection across data sets
    Merged(Vec<MergedTermRecord>),
}

impl TermTable {
    pub fn len(&self) -> usize {
        match self {
            TermTable::PerSet(rows) => rows.len(),
            TermTable::Merged(rows) => rows.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub const fn is_merged(&self) -> bool {
        matches!(self, TermTable::Merged(_))
    }

    /// Term length of the table, taken from its first row.
    pub fn term_length(&self) -> Option<usize> {
        match self {
            TermTable::PerSet(rows) => rows.first().map(|r| r.term.len()),
            TermTable::Merged(rows) => rows.first().map(|r| r.term.len()),
        }
    }

    pub fn counts(&self) -> Vec<u64> {
        match self {
            TermTable::PerSet(rows) => rows.iter().map(|r| r.count).collect(),
            TermTable::Merged(rows) => rows.iter().map(|r| r.count).collect(),
        }
    }

    pub fn scores(&self) -> Vec<f64> {
        match self {
            TermTable::PerSet(rows) => rows.iter().map(|r| r.score).collect(),
            TermTable::Merged(rows) => rows.iter().map(|r| r.score).collect(),
        }
    }
}

/// Problems with the configuration or the requested set list.
#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("\"{0}\" is not a recognized set")]
    UnknownSet(String),
    #[error("\"all\" is allowed at most one time in a set list")]
    AllRepeated,
    #[error("\"all\" is reserved and cannot name a set")]
    ReservedSetName,
    #[error("Empty set list, make sure sets are defined")]
    EmptySetList,
    #[error("Summary directory is not defined")]
    MissingSummary,
    #[error("Unknown simplicity function \"{0}\"")]
    UnknownSimplicity(String),
    #[error("Configuration file \"{}\" does not exist", .0.display())]
    NotFound(PathBuf),
}

/// Error types that can occur while building, merging or filtering term tables
#[derive(Error, Debug)]
pub enum TermsiftError {
    /// Invalid configuration or set list
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// A required input file is missing
    #[error("Input file \"{}\" does not exist", .0.display())]
    MissingInput(PathBuf),
    /// An output directory or file could not be created
    #[error("Unable to write \"{}\": {source}", path.display())]
    OutputPath {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// Term length must be at least one residue
    #[error("Invalid term length: {0}")]
    InvalidTermLength(usize),
    /// The simplicity oracle returned too few scores for a sequence
    #[error("Simplicity scores for \"{id}\" cover {found} positions, {expected} required")]
    ScoreLength {
        id: String,
        expected: usize,
        found: usize,
    },
    /// A term table could not be interpreted
    #[error("Invalid term table: {0}")]
    InvalidTable(String),
    /// Error parsing input data
    #[error("Parse error: {0}")]
    ParseError(String),
    /// File I/O operation failed
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    /// Reading or writing a delimited table failed
    #[error("Table error: {0}")]
    CsvError(#[from] csv::Error),
    /// Reading or writing the configuration file failed
    #[error("YAML error: {0}")]
    YamlError(#[from] serde_yaml::Error),
}
