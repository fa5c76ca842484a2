use crate::results::FilterReport;
use crate::types::TermTable;

/// Drops every row whose score exceeds `cutoff`.
///
/// Merged tables come back stably sorted by `(max_count, intersections)`,
/// which groups low-abundance, low-intersection terms first. Per-set tables
/// have neither column and come back sorted by term.
///
/// # Examples
///
/// ```rust
/// use termsift_core::terms::filter_terms;
/// use termsift_core::types::{TermRecord, TermTable};
///
/// let table = TermTable::PerSet(vec![
///     TermRecord::new("MKV", 2, 0.1),
///     TermRecord::new("AAA", 9, 4.0),
/// ]);
/// let (kept, report) = filter_terms(table, 0.3);
/// assert_eq!(kept.len(), 1);
/// assert_eq!(report.percent_kept(), 50.0);
/// ```
pub fn filter_terms(table: TermTable, cutoff: f64) -> (TermTable, FilterReport) {
    let input_terms = table.len();
    let k = table.term_length();

    let mut kept = match table {
        TermTable::PerSet(mut rows) => {
            rows.retain(|r| r.score <= cutoff);
            TermTable::PerSet(rows)
        }
        TermTable::Merged(mut rows) => {
            rows.retain(|r| r.score <= cutoff);
            TermTable::Merged(rows)
        }
    };
    sort_for_output(&mut kept);

    let report = FilterReport {
        cutoff,
        input_terms,
        kept_terms: kept.len(),
        k,
    };
    (kept, report)
}

/// Puts a table in output order: merged tables by `(max_count,
/// intersections)`, per-set tables by term. Both sorts are stable.
pub fn sort_for_output(table: &mut TermTable) {
    match table {
        TermTable::PerSet(rows) => rows.sort_by(|a, b| a.term.cmp(&b.term)),
        TermTable::Merged(rows) => rows.sort_by_key(|r| (r.max_count, r.intersections)),
    }
}
