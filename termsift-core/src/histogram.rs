//! Frequency, score, intersection and mask-fraction distributions.
//!
//! All functions here are pure; [`crate::output`] writes their results.

use std::collections::BTreeMap;

use crate::constants::{NUM_MASK_HISTOGRAM_BINS, SCORE_BIN_EDGES, UNIT_MULTIPLIER};
use crate::results::percent;
use crate::types::MergedTermRecord;

/// One distinct frequency value and how many terms have it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrequencyBin {
    pub abundance: u64,
    pub count: u64,
    pub cumulative: u64,
    pub cumulative_fraction: f64,
}

/// Counts of each distinct frequency, in ascending frequency order.
///
/// # Examples
///
/// ```rust
/// use termsift_core::histogram::frequency_histogram;
///
/// let bins = frequency_histogram(&[1, 1, 2, 3, 3, 3]);
/// let counts: Vec<_> = bins.iter().map(|b| (b.abundance, b.count)).collect();
/// assert_eq!(counts, vec![(1, 2), (2, 1), (3, 3)]);
/// assert_eq!(bins[2].cumulative, 6);
/// ```
pub fn frequency_histogram(freqs: &[u64]) -> Vec<FrequencyBin> {
    let mut counts: BTreeMap<u64, u64> = BTreeMap::new();
    for &freq in freqs {
        *counts.entry(freq).or_insert(0) += 1;
    }

    let total = freqs.len() as f64;
    let mut cumulative = 0;
    counts
        .into_iter()
        .map(|(abundance, count)| {
            cumulative += count;
            FrequencyBin {
                abundance,
                count,
                cumulative,
                cumulative_fraction: cumulative as f64 / total,
            }
        })
        .collect()
}

/// Highest frequency expressed per unit of residues, 0 for no terms.
pub fn max_frequency_rate(max_freq: u64, n_terms: usize) -> f64 {
    if n_terms == 0 {
        0.0
    } else {
        max_freq as f64 * UNIT_MULTIPLIER / n_terms as f64
    }
}

/// A histogram bucket reported as a percentage of all values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PercentBin {
    /// Lower edge for score bins, center for mask bins
    pub position: f64,
    pub percent: f64,
}

/// Index of the bin holding `value`.
///
/// Bins are half-open except the last, which includes its upper edge.
/// Values outside the edges (and NaN) fall in no bin.
fn bin_index(edges: &[f64], value: f64) -> Option<usize> {
    let (first, last) = (*edges.first()?, *edges.last()?);
    if edges.len() < 2 || !(first..=last).contains(&value) {
        return None;
    }
    if value == last {
        return Some(edges.len() - 2);
    }
    Some(edges.partition_point(|edge| *edge <= value) - 1)
}

fn bin_counts(edges: &[f64], values: &[f64]) -> Vec<u64> {
    let mut counts = vec![0; edges.len().saturating_sub(1)];
    for &value in values {
        if let Some(i) = bin_index(edges, value) {
            counts[i] += 1;
        }
    }
    counts
}

/// Scores bucketed on the fixed score edges, as percentages of all scores.
pub fn score_histogram(scores: &[f64]) -> Vec<PercentBin> {
    let total = scores.len() as f64;
    bin_counts(&SCORE_BIN_EDGES, scores)
        .into_iter()
        .zip(SCORE_BIN_EDGES)
        .map(|(count, lower)| PercentBin {
            position: lower,
            percent: percent(count as f64, total),
        })
        .collect()
}

/// Per-record masked percentages in equal bins over `[0, 100]`.
pub fn mask_histogram(percent_masked: &[f64]) -> Vec<PercentBin> {
    let width = 100.0 / NUM_MASK_HISTOGRAM_BINS as f64;
    let edges: Vec<f64> = (0..=NUM_MASK_HISTOGRAM_BINS)
        .map(|i| i as f64 * width)
        .collect();
    let total = percent_masked.len() as f64;
    bin_counts(&edges, percent_masked)
        .into_iter()
        .enumerate()
        .map(|(i, count)| PercentBin {
            position: (edges[i] + edges[i + 1]) / 2.0,
            percent: percent(count as f64, total),
        })
        .collect()
}

/// Terms of one abundance bin broken down by intersection count.
#[derive(Debug, Clone, PartialEq)]
pub struct IntersectionBin {
    /// Smallest `max_count` in the bin; the bin holds `[start, 2 * start)`
    pub start: u64,
    pub total: u64,
    pub by_intersections: BTreeMap<u32, u64>,
}

impl IntersectionBin {
    /// Share of the bin's terms found in `intersections` sets.
    pub fn percent(&self, intersections: u32) -> f64 {
        let count = self.by_intersections.get(&intersections).copied().unwrap_or(0);
        percent(count as f64, self.total as f64)
    }
}

/// How many sets terms of a given abundance tend to intersect.
#[derive(Debug, Clone, PartialEq)]
pub struct IntersectionHistogram {
    pub bins: Vec<IntersectionBin>,
    /// Every intersection count observed, ascending
    pub intersections: Vec<u32>,
}

/// Buckets merged terms by `max_count` into doubling bins 1, 2, 4, ...
/// up to the largest observed `max_count`.
///
/// # Examples
///
/// ```rust
/// use termsift_core::histogram::intersection_histogram;
/// use termsift_core::types::MergedTermRecord;
///
/// let row = |max_count, intersections| MergedTermRecord {
///     term: "MKVLAAGIVG".to_string(),
///     intersections,
///     count: max_count * 2,
///     max_count,
///     score: 0.0,
/// };
/// let histogram = intersection_histogram(&[row(1, 2), row(3, 2), row(3, 3)]);
///
/// assert_eq!(histogram.bins.len(), 2);
/// assert_eq!(histogram.bins[1].start, 2);
/// assert_eq!(histogram.bins[1].percent(3), 50.0);
/// ```
pub fn intersection_histogram(rows: &[MergedTermRecord]) -> IntersectionHistogram {
    let max_count = rows.iter().map(|r| r.max_count).max().unwrap_or(0);

    let mut bins = Vec::new();
    let mut start: u64 = 1;
    while start <= max_count {
        bins.push(IntersectionBin {
            start,
            total: 0,
            by_intersections: BTreeMap::new(),
        });
        match start.checked_mul(2) {
            Some(next) => start = next,
            None => break,
        }
    }

    let mut intersections = Vec::new();
    for row in rows.iter().filter(|r| r.max_count > 0) {
        let index = (u64::BITS - 1 - row.max_count.leading_zeros()) as usize;
        let bin = &mut bins[index];
        bin.total += 1;
        *bin.by_intersections.entry(row.intersections).or_insert(0) += 1;
        intersections.push(row.intersections);
    }
    intersections.sort_unstable();
    intersections.dedup();

    IntersectionHistogram {
        bins,
        intersections,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(max_count: u64, intersections: u32) -> MergedTermRecord {
        MergedTermRecord {
            term: "MKVLAAGIVG".to_string(),
            intersections,
            count: max_count,
            max_count,
            score: 0.0,
        }
    }

    #[test]
    fn test_frequency_histogram() {
        let bins = frequency_histogram(&[1, 1, 2, 3, 3, 3]);
        assert_eq!(bins.len(), 3);
        assert_eq!(
            bins.iter().map(|b| b.cumulative).collect::<Vec<_>>(),
            vec![2, 3, 6]
        );
        let fractions: Vec<_> = bins.iter().map(|b| b.cumulative_fraction).collect();
        assert!((fractions[0] - 1.0 / 3.0).abs() < 1e-9);
        assert_eq!(fractions[1], 0.5);
        assert_eq!(fractions[2], 1.0);
    }

    #[test]
    fn test_frequency_histogram_unsorted_input() {
        let bins = frequency_histogram(&[5, 1, 5]);
        assert_eq!(bins[0].abundance, 1);
        assert_eq!(bins[1].abundance, 5);
        assert_eq!(bins[1].count, 2);
    }

    #[test]
    fn test_frequency_histogram_empty() {
        assert!(frequency_histogram(&[]).is_empty());
    }

    #[test]
    fn test_max_frequency_rate() {
        assert_eq!(max_frequency_rate(10, 0), 0.0);
        assert_eq!(max_frequency_rate(3, 3_000_000), 3.0);
    }

    #[test]
    fn test_bin_index_edges() {
        let edges = [0.0, 1.0, 2.0];
        assert_eq!(bin_index(&edges, 0.0), Some(0));
        assert_eq!(bin_index(&edges, 0.99), Some(0));
        assert_eq!(bin_index(&edges, 1.0), Some(1));
        assert_eq!(bin_index(&edges, 2.0), Some(1));
        assert_eq!(bin_index(&edges, 2.5), None);
        assert_eq!(bin_index(&edges, -0.1), None);
        assert_eq!(bin_index(&edges, f64::NAN), None);
    }

    #[test]
    fn test_score_histogram() {
        let scores = [0.0, 0.005, 0.3, 0.29, 100.0, 150.0, 2.0, 2.5];
        let bins = score_histogram(&scores);

        assert_eq!(bins.len(), SCORE_BIN_EDGES.len() - 1);
        assert_eq!(bins[0].position, 0.0);
        assert_eq!(bins[0].percent, 25.0);
        // 0.29 in [0.1, 0.3), 0.3 in [0.3, 1.0)
        assert_eq!(bins[3].percent, 12.5);
        assert_eq!(bins[4].percent, 12.5);
        assert_eq!(bins[7].position, 2.0);
        assert_eq!(bins[7].percent, 25.0);
        // 100 lands in the closed last bin, 150 in none
        assert_eq!(bins[10].percent, 12.5);
        let total: f64 = bins.iter().map(|b| b.percent).sum();
        assert_eq!(total, 87.5);
    }

    #[test]
    fn test_score_histogram_empty() {
        assert!(score_histogram(&[]).iter().all(|b| b.percent == 0.0));
    }

    #[test]
    fn test_mask_histogram() {
        let bins = mask_histogram(&[0.0, 3.9, 50.0, 100.0]);
        assert_eq!(bins.len(), NUM_MASK_HISTOGRAM_BINS);
        assert_eq!(bins[0].position, 2.0);
        assert_eq!(bins[0].percent, 50.0);
        assert_eq!(bins[12].percent, 25.0);
        assert_eq!(bins[24].position, 98.0);
        assert_eq!(bins[24].percent, 25.0);
    }

    #[test]
    fn test_intersection_histogram_bins_double() {
        let rows = vec![row(1, 2), row(1, 2), row(2, 3), row(3, 2), row(9, 4)];
        let histogram = intersection_histogram(&rows);

        let starts: Vec<_> = histogram.bins.iter().map(|b| b.start).collect();
        assert_eq!(starts, vec![1, 2, 4, 8]);
        assert_eq!(histogram.intersections, vec![2, 3, 4]);

        assert_eq!(histogram.bins[0].total, 2);
        assert_eq!(histogram.bins[0].percent(2), 100.0);
        assert_eq!(histogram.bins[1].total, 2);
        assert_eq!(histogram.bins[1].percent(3), 50.0);
        assert_eq!(histogram.bins[2].total, 0);
        assert_eq!(histogram.bins[2].percent(2), 0.0);
        assert_eq!(histogram.bins[3].percent(4), 100.0);
    }

    #[test]
    fn test_intersection_histogram_exact_power_of_two() {
        let histogram = intersection_histogram(&[row(4, 2)]);
        assert_eq!(histogram.bins.len(), 3);
        assert_eq!(histogram.bins[2].start, 4);
        assert_eq!(histogram.bins[2].total, 1);
    }

    #[test]
    fn test_intersection_histogram_empty() {
        let histogram = intersection_histogram(&[]);
        assert!(histogram.bins.is_empty());
        assert!(histogram.intersections.is_empty());
    }
}
