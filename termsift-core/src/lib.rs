//! # termsift
//!
//! Finds fixed-length peptide terms shared across collections of protein
//! sequences and scores how "simple" (low-complexity) each term is.
//!
//! ## Overview
//!
//! Each data set is a directory holding a FASTA file of peptides. The
//! pipeline runs in stages, each persisting its output so later stages can
//! run on their own:
//!
//! 1. **Calculate**: every unambiguous window of length k becomes a term,
//!    scored by a [`simplicity::SimplicityOracle`] at its start position.
//!    Terms are aggregated per set into a table of counts and mean scores.
//! 2. **Intersect**: per-set tables are merged into a summary table. Terms
//!    found in a single set are dropped.
//! 3. **Filter**: terms scoring above a cutoff are removed.
//!
//! A separate masking command lowercases low-complexity regions of the input
//! sequences.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use termsift_core::config::{RunOptions, TermsiftConfig};
//! use termsift_core::engine::{calculate_peptide_terms, intersect_peptide_terms};
//!
//! let mut config = TermsiftConfig::default();
//! config.define_set("glyma", "data/glyma", None)?;
//! config.define_set("medtr", "data/medtr", None)?;
//! config.define_summary("data/summary", None);
//!
//! let sets = config.resolve_set_list(&["all".to_string()])?;
//! calculate_peptide_terms(&config, RunOptions::default(), 10, "proteins.faa", "k10", &sets)?;
//! let summary = intersect_peptide_terms(&config, "k10", &sets)?;
//! println!("{} terms intersect", summary.intersecting_terms);
//! # Ok::<(), termsift_core::types::TermsiftError>(())
//! ```
//!
//! ## Module Organization
//!
//! - [`config`]: Data set definitions and the configuration file
//! - [`engine`]: The pipeline commands
//! - [`terms`]: Extraction, aggregation, intersection and filtering
//! - [`histogram`]: Frequency, score, intersection and mask distributions
//! - [`simplicity`]: Simplicity scoring and masking
//! - [`sequence`]: FASTA input and output
//! - [`output`]: Term table and histogram files
//! - [`results`]: Statistics reported by each stage
//! - [`types`]: Core data types and errors
//!
//! ## Error Handling
//!
//! All fallible operations return [`Result<T, TermsiftError>`](types::TermsiftError),
//! covering:
//!
//! - Unknown sets and other configuration problems
//! - Missing input files
//! - Unwritable output paths
//! - Malformed FASTA or term tables

pub mod config;
pub mod constants;
pub mod engine;
pub mod histogram;
pub mod output;
pub mod results;
pub mod sequence;
pub mod simplicity;
pub mod terms;
pub mod types;

pub use config::{RunOptions, TermsiftConfig};
pub use types::{ConfigError, TermsiftError};
