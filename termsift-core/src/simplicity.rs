//! Simplicity scoring and masking.
//!
//! A simplicity function gives every residue position a score measuring how
//! repetitive the sequence is there; high values mean low information
//! content. The same function masks low-complexity stretches by lowercasing
//! them. The term pipeline only depends on the [`SimplicityOracle`] trait.

use crate::constants::{DEFAULT_K, DEFAULT_SIMPLICITY_CUTOFF};
use crate::types::ConfigError;

/// Per-position scoring and masking used by term extraction and the mask
/// command.
///
/// Term length and cutoff are set before use.
pub trait SimplicityOracle {
    /// Short name stored in the configuration.
    fn label(&self) -> &'static str;

    /// One-line description for logging.
    fn description(&self) -> &'static str;

    fn set_k(&mut self, k: usize);

    fn set_cutoff(&mut self, cutoff: f64);

    /// One score per residue of `seq`.
    fn score(&self, seq: &[u8]) -> Vec<f64>;

    /// Copy of `seq` with low-complexity residues lowercased.
    fn mask(&self, seq: &[u8]) -> Vec<u8>;
}

/// Labels accepted by [`oracle_from_label`].
pub const SIMPLICITY_LABELS: [&str; 2] = ["none", "runlength"];

/// Builds the oracle named in the configuration.
pub fn oracle_from_label(label: &str) -> Result<Box<dyn SimplicityOracle>, ConfigError> {
    match label {
        "none" => Ok(Box::new(NullSimplicity)),
        "runlength" => Ok(Box::new(RunlengthSimplicity::default())),
        other => Err(ConfigError::UnknownSimplicity(other.to_string())),
    }
}

/// Scores every position as zero and masks nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSimplicity;

impl SimplicityOracle for NullSimplicity {
    fn label(&self) -> &'static str {
        "none"
    }

    fn description(&self) -> &'static str {
        "no simplicity masking"
    }

    fn set_k(&mut self, _k: usize) {}

    fn set_cutoff(&mut self, _cutoff: f64) {}

    fn score(&self, seq: &[u8]) -> Vec<f64> {
        vec![0.0; seq.len()]
    }

    fn mask(&self, seq: &[u8]) -> Vec<u8> {
        seq.to_vec()
    }
}

/// Masks runs of a single repeated residue.
///
/// A run (compared case-insensitively) is masked when its length reaches the
/// cutoff. The score at a position is the number of masked residues in the
/// term-length window starting there.
#[derive(Debug, Clone, Copy)]
pub struct RunlengthSimplicity {
    k: usize,
    cutoff: f64,
}

impl Default for RunlengthSimplicity {
    fn default() -> Self {
        Self {
            k: DEFAULT_K,
            cutoff: DEFAULT_SIMPLICITY_CUTOFF,
        }
    }
}

impl SimplicityOracle for RunlengthSimplicity {
    fn label(&self) -> &'static str {
        "runlength"
    }

    fn description(&self) -> &'static str {
        "runs of a repeated residue"
    }

    fn set_k(&mut self, k: usize) {
        self.k = k;
    }

    fn set_cutoff(&mut self, cutoff: f64) {
        self.cutoff = cutoff;
    }

    fn score(&self, seq: &[u8]) -> Vec<f64> {
        let masked = self.mask(seq);
        let flags: Vec<usize> = masked
            .iter()
            .zip(seq)
            .map(|(m, s)| usize::from(m != s || m.is_ascii_lowercase()))
            .collect();

        // running window sum over [i, i + k), truncated at the sequence end
        let mut scores = Vec::with_capacity(seq.len());
        let mut window: usize = flags.iter().take(self.k).sum();
        for i in 0..flags.len() {
            scores.push(window as f64);
            if let Some(next) = flags.get(i + self.k) {
                window += next;
            }
            window -= flags[i];
        }
        scores
    }

    fn mask(&self, seq: &[u8]) -> Vec<u8> {
        let mut masked = seq.to_vec();
        let mut start = 0;
        while start < seq.len() {
            let residue = seq[start].to_ascii_uppercase();
            let mut end = start + 1;
            while end < seq.len() && seq[end].to_ascii_uppercase() == residue {
                end += 1;
            }
            if (end - start) as f64 >= self.cutoff {
                masked[start..end].make_ascii_lowercase();
            }
            start = end;
        }
        masked
    }
}
