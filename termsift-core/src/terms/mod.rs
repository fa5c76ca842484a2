//! The term pipeline: extraction, aggregation, intersection and filtering.
//!
//! ## Overview
//!
//! 1. [`extract`] scans sequences and emits a [`ScoredOccurrence`] for every
//!    unambiguous window of length k.
//! 2. [`aggregate`] sorts one set's occurrences by term and collapses each
//!    run into a [`TermRecord`] with count and mean score.
//! 3. [`intersect`] merges per-set tables into [`MergedTermRecord`]s and
//!    drops terms seen in a single set.
//! 4. [`filter`] removes rows whose score exceeds a cutoff.
//!
//! Every stage returns a new table; none mutates its input.
//!
//! ## Examples
//!
//! ```rust
//! use termsift_core::simplicity::NullSimplicity;
//! use termsift_core::terms::{SetIntersector, TermExtractor, aggregate_terms};
//! use termsift_core::sequence::NamedSequence;
//!
//! let oracle = NullSimplicity;
//! let extractor = TermExtractor::new(3, &oracle)?;
//!
//! let mut intersector = SetIntersector::new();
//! for (name, seq) in [("a", b"MKVLMKVLQ"), ("b", b"QQMKVLAAA")] {
//!     let record = NamedSequence { id: name.to_string(), description: None, seq: seq.to_vec() };
//!     let (occurrences, _stats) = extractor.extract_set(std::iter::once(Ok(record)))?;
//!     let (table, _report) = aggregate_terms(occurrences, 3);
//!     intersector.add_set(name, &table);
//! }
//! let (merged, _summary) = intersector.finish();
//! assert!(merged.iter().any(|r| r.term == "MKV" && r.intersections == 2));
//! # Ok::<(), termsift_core::types::TermsiftError>(())
//! ```
//!
//! [`ScoredOccurrence`]: crate::types::ScoredOccurrence
//! [`TermRecord`]: crate::types::TermRecord
//! [`MergedTermRecord`]: crate::types::MergedTermRecord

pub mod aggregate;
pub mod extract;
pub mod filter;
pub mod intersect;

pub use aggregate::aggregate_terms;
pub use extract::TermExtractor;
pub use filter::{filter_terms, sort_for_output};
pub use intersect::SetIntersector;
