use crate::results::AggregationReport;
use crate::types::{ScoredOccurrence, TermRecord};

/// Collapses one set's occurrences into unique terms.
///
/// Occurrences are stably sorted by term and each run of equal terms becomes
/// one [`TermRecord`] with the run length as count and the mean score. The
/// result is in lexicographic term order. An empty input gives an empty
/// table.
///
/// # Examples
///
/// ```rust
/// use termsift_core::terms::aggregate_terms;
/// use termsift_core::types::ScoredOccurrence;
///
/// let occurrences = vec![
///     ScoredOccurrence::new("MKV", 1.0),
///     ScoredOccurrence::new("AAG", 0.0),
///     ScoredOccurrence::new("MKV", 3.0),
/// ];
/// let (table, report) = aggregate_terms(occurrences, 3);
///
/// assert_eq!(table[0].term, "AAG");
/// assert_eq!((table[1].count, table[1].score), (2, 2.0));
/// assert_eq!(report.unique_terms, 2);
/// ```
pub fn aggregate_terms(
    mut occurrences: Vec<ScoredOccurrence>,
    k: usize,
) -> (Vec<TermRecord>, AggregationReport) {
    let input_terms = occurrences.len();
    occurrences.sort_by(|a, b| a.term.cmp(&b.term));

    let mut table: Vec<TermRecord> = Vec::new();
    let mut score_sum = 0.0;
    for occurrence in occurrences {
        if let Some(current) = table.last_mut().filter(|r| r.term == occurrence.term) {
            current.count += 1;
            score_sum += occurrence.score;
            continue;
        }
        close_run(&mut table, score_sum);
        score_sum = occurrence.score;
        table.push(TermRecord::new(occurrence.term, 1, 0.0));
    }
    close_run(&mut table, score_sum);

    let report = AggregationReport {
        input_terms,
        unique_terms: table.len(),
        k,
    };
    (table, report)
}

/// Turns the score sum of the last run into its mean.
fn close_run(table: &mut [TermRecord], score_sum: f64) {
    if let Some(last) = table.last_mut() {
        last.score = score_sum / last.count as f64;
    }
}
