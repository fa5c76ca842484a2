use crate::results::ExtractionStats;
use crate::sequence::{NamedSequence, is_unambiguous};
use crate::simplicity::SimplicityOracle;
use crate::types::{ScoredOccurrence, TermsiftError};

/// Emits scored terms for every unambiguous window of a sequence collection.
///
/// Each window is scored with the oracle's score at the window's start
/// position. The oracle sees the original sequence; terms are taken from the
/// uppercased copy.
pub struct TermExtractor<'a> {
    k: usize,
    oracle: &'a dyn SimplicityOracle,
}

impl<'a> TermExtractor<'a> {
    /// # Errors
    ///
    /// Returns [`TermsiftError::InvalidTermLength`] if `k` is 0.
    pub fn new(k: usize, oracle: &'a dyn SimplicityOracle) -> Result<Self, TermsiftError> {
        if k == 0 {
            return Err(TermsiftError::InvalidTermLength(k));
        }
        Ok(Self { k, oracle })
    }

    pub const fn k(&self) -> usize {
        self.k
    }

    /// Appends the occurrences of one sequence to `out`, returning how many
    /// were emitted.
    ///
    /// Start positions run over `[0, len - k)`: the last full window is not
    /// emitted.
    pub fn extract_sequence(
        &self,
        id: &str,
        seq: &[u8],
        out: &mut Vec<ScoredOccurrence>,
    ) -> Result<usize, TermsiftError> {
        let n_windows = seq.len().saturating_sub(self.k);
        if n_windows == 0 {
            return Ok(0);
        }

        let scores = self.oracle.score(seq);
        if scores.len() < n_windows {
            return Err(TermsiftError::ScoreLength {
                id: id.to_string(),
                expected: n_windows,
                found: scores.len(),
            });
        }

        let upper = seq.to_ascii_uppercase();
        let before = out.len();
        out.extend(
            upper
                .windows(self.k)
                .zip(&scores)
                .take(n_windows)
                .filter(|(window, _)| is_unambiguous(window))
                .map(|(window, &score)| {
                    ScoredOccurrence::new(String::from_utf8_lossy(window), score)
                }),
        );
        Ok(out.len() - before)
    }

    /// Extracts every record of one data set, in order.
    ///
    /// Records are consumed one at a time; only the occurrence buffer grows.
    pub fn extract_set<I>(
        &self,
        records: I,
    ) -> Result<(Vec<ScoredOccurrence>, ExtractionStats), TermsiftError>
    where
        I: IntoIterator<Item = Result<NamedSequence, TermsiftError>>,
    {
        let mut occurrences = Vec::new();
        let mut stats = ExtractionStats::default();
        for record in records {
            let record = record?;
            stats.records += 1;
            stats.residues += record.seq.len();
            stats.raw_terms += (record.seq.len() + 1).saturating_sub(self.k);
            stats.terms += self.extract_sequence(&record.id, &record.seq, &mut occurrences)?;
        }
        Ok((occurrences, stats))
    }
}
