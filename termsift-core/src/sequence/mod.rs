//! Sequence input and residue-level helpers.
//!
//! Peptide collections are read from FASTA files one record at a time so
//! that a whole genome never has to be held in memory at once. Residues are
//! plain ASCII bytes: uppercase for unmasked positions, lowercase for
//! positions masked as low complexity, and `X` or `.` for ambiguous positions.
//!
//! ## Modules
//!
//! - [`io`]: FASTA reading and writing
//! - [`processing`]: ambiguity and masking checks
//!
//! ## Examples
//!
//! ```rust
//! use termsift_core::sequence::{is_unambiguous, num_masked};
//!
//! assert!(is_unambiguous(b"ACDEFGHIKL"));
//! assert!(!is_unambiguous(b"ACDEXGHIKL"));
//! assert_eq!(num_masked(b"ACdeFG"), 2);
//! ```

pub mod io;
pub mod processing;

pub use io::*;
pub use processing::*;
