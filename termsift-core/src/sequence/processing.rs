use crate::constants::AMBIGUOUS_RESIDUES;

/// Returns `true` if no residue in `window` is ambiguous.
///
/// The check is case sensitive; callers uppercase sequences before
/// extracting terms so a masked `x` is caught as `X`.
#[inline]
pub fn is_unambiguous(window: &[u8]) -> bool {
    !window.iter().any(|c| AMBIGUOUS_RESIDUES.contains(c))
}

/// Number of lowercase (masked) residues.
pub fn num_masked(seq: &[u8]) -> usize {
    seq.iter().filter(|c| c.is_ascii_lowercase()).count()
}

/// Percentage of residues that are masked, 0 for an empty sequence.
pub fn percent_masked(seq: &[u8]) -> f64 {
    if seq.is_empty() {
        return 0.0;
    }
    100.0 * num_masked(seq) as f64 / seq.len() as f64
}
