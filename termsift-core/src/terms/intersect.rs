use std::collections::BTreeMap;

use crate::results::{IntersectionSummary, MergeReport};
use crate::types::{MergedTermRecord, TermRecord};

#[derive(Debug, Clone, Copy)]
struct MergeAccumulator {
    intersections: u32,
    count: u64,
    max_count: u64,
    /// Sum of score * count over contributing sets
    weighted_score: f64,
}

impl MergeAccumulator {
    fn from_record(record: &TermRecord) -> Self {
        Self {
            intersections: 1,
            count: record.count,
            max_count: record.count,
            weighted_score: record.score * record.count as f64,
        }
    }

    fn absorb(&mut self, record: &TermRecord) {
        self.count += record.count;
        self.max_count = self.max_count.max(record.count);
        self.weighted_score += record.score * record.count as f64;
        if record.count > 0 {
            self.intersections += 1;
        }
    }
}

/// Merges per-set term tables and keeps the terms shared by at least two
/// sets.
///
/// Sets are added one at a time in input order; the intersector owns the
/// running merge exclusively until [`finish`](Self::finish) consumes it. The
/// merged content does not depend on the order sets are added, but the
/// per-set [`MergeReport`] percentages do.
///
/// # Examples
///
/// ```rust
/// use termsift_core::terms::SetIntersector;
/// use termsift_core::types::TermRecord;
///
/// let mut intersector = SetIntersector::new();
/// intersector.add_set("set1", &[
///     TermRecord::new("AAAAAAAAAA", 5, 0.1),
///     TermRecord::new("BBBBBBBBBB", 2, 0.2),
/// ]);
/// intersector.add_set("set2", &[TermRecord::new("AAAAAAAAAA", 3, 0.3)]);
///
/// let (merged, summary) = intersector.finish();
/// assert_eq!(merged.len(), 1);
/// assert_eq!(merged[0].count, 8);
/// assert_eq!(merged[0].max_count, 5);
/// assert_eq!(merged[0].intersections, 2);
/// assert!((merged[0].score - 0.175).abs() < 1e-9);
/// assert_eq!(summary.unique_terms, 2);
/// ```
#[derive(Debug, Default)]
pub struct SetIntersector {
    merged: BTreeMap<String, MergeAccumulator>,
    sets: usize,
    total_terms: usize,
}

impl SetIntersector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Folds one set's table into the running merge.
    pub fn add_set(&mut self, name: &str, table: &[TermRecord]) -> MergeReport {
        self.sets += 1;
        self.total_terms += table.len();

        for record in table {
            match self.merged.get_mut(&record.term) {
                Some(accumulator) => accumulator.absorb(record),
                None => {
                    self.merged
                        .insert(record.term.clone(), MergeAccumulator::from_record(record));
                }
            }
        }

        MergeReport {
            set_name: name.to_string(),
            set_terms: table.len(),
            unique_terms: self.merged.len(),
            total_terms: self.total_terms,
        }
    }

    /// Normalizes scores to count-weighted means and drops every term found
    /// in a single set.
    ///
    /// Rows come out in lexicographic term order.
    pub fn finish(self) -> (Vec<MergedTermRecord>, IntersectionSummary) {
        let unique_terms = self.merged.len();
        let merged: Vec<MergedTermRecord> = self
            .merged
            .into_iter()
            .filter(|(_, acc)| acc.intersections > 1)
            .map(|(term, acc)| MergedTermRecord {
                term,
                intersections: acc.intersections,
                count: acc.count,
                max_count: acc.max_count,
                score: if acc.count == 0 {
                    0.0
                } else {
                    acc.weighted_score / acc.count as f64
                },
            })
            .collect();

        let summary = IntersectionSummary {
            sets: self.sets,
            total_terms: self.total_terms,
            unique_terms,
            intersecting_terms: merged.len(),
        };
        (merged, summary)
    }
}
