//! Statistics reported by each pipeline stage.
//!
//! Stages return these alongside their tables; the engine logs them. None of
//! them is persisted.

use crate::constants::ALPHABET_SIZE;

/// `100 * numerator / denominator`, or 0 when the denominator is 0.
pub fn percent(numerator: f64, denominator: f64) -> f64 {
    if denominator == 0.0 {
        0.0
    } else {
        100.0 * numerator / denominator
    }
}

/// Number of possible terms of length `k`, as a float so large `k` cannot
/// overflow.
pub fn kmer_space(k: usize) -> f64 {
    f64::from(ALPHABET_SIZE).powi(k.min(i32::MAX as usize) as i32)
}

/// Counters gathered while scanning one sequence collection.
///
/// # Examples
///
/// ```rust
/// use termsift_core::results::ExtractionStats;
///
/// let stats = ExtractionStats {
///     records: 2,
///     residues: 40,
///     raw_terms: 22,
///     terms: 18,
/// };
/// assert_eq!(stats.skipped(), 4);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExtractionStats {
    /// Sequences read
    pub records: usize,
    /// Residues scanned
    pub residues: usize,
    /// Full windows possible, `len - k + 1` per sequence
    pub raw_terms: usize,
    /// Unambiguous terms emitted
    pub terms: usize,
}

impl ExtractionStats {
    pub fn skipped(&self) -> usize {
        self.raw_terms.saturating_sub(self.terms)
    }

    pub fn skipped_percent(&self) -> f64 {
        percent(self.skipped() as f64, self.raw_terms as f64)
    }
}

/// Summary of one set's aggregation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AggregationReport {
    pub input_terms: usize,
    pub unique_terms: usize,
    pub k: usize,
}

impl AggregationReport {
    pub fn percent_of_input(&self) -> f64 {
        percent(self.unique_terms as f64, self.input_terms as f64)
    }

    pub fn percent_of_kmer_space(&self) -> f64 {
        percent(self.unique_terms as f64, kmer_space(self.k))
    }
}

/// Running totals after one set was merged.
///
/// Percentages depend on the order in which sets are merged.
#[derive(Debug, Clone, PartialEq)]
pub struct MergeReport {
    pub set_name: String,
    /// Rows in the set's table
    pub set_terms: usize,
    /// Unique terms in the merge so far
    pub unique_terms: usize,
    /// Rows read from all sets so far
    pub total_terms: usize,
}

impl MergeReport {
    pub fn percent_of_unique(&self) -> f64 {
        percent(self.set_terms as f64, self.unique_terms as f64)
    }

    pub fn percent_of_total(&self) -> f64 {
        percent(self.set_terms as f64, self.total_terms as f64)
    }
}

/// Totals of a finished intersection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntersectionSummary {
    pub sets: usize,
    pub total_terms: usize,
    pub unique_terms: usize,
    pub intersecting_terms: usize,
}

impl IntersectionSummary {
    pub fn unique_percent_of_total(&self) -> f64 {
        percent(self.unique_terms as f64, self.total_terms as f64)
    }

    pub fn intersecting_percent_of_unique(&self) -> f64 {
        percent(self.intersecting_terms as f64, self.unique_terms as f64)
    }
}

/// Survivors of a score cutoff.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FilterReport {
    pub cutoff: f64,
    pub input_terms: usize,
    pub kept_terms: usize,
    /// Term length, unknown for an empty table
    pub k: Option<usize>,
}

impl FilterReport {
    pub fn percent_kept(&self) -> f64 {
        percent(self.kept_terms as f64, self.input_terms as f64)
    }

    pub fn percent_of_kmer_space(&self) -> Option<f64> {
        self.k
            .map(|k| percent(self.kept_terms as f64, kmer_space(k)))
    }
}
