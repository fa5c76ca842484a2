//! The four pipeline commands.
//!
//! Each command takes the loaded [`TermsiftConfig`] explicitly, runs its
//! stages over the requested sets in order and persists what it produced.
//! Set lists are expected to be resolved already, see
//! [`TermsiftConfig::resolve_set_list`]. Progress is reported through
//! `tracing` events; the returned summaries carry the same numbers for
//! callers that want them.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::config::{RunOptions, TermsiftConfig};
use crate::constants::{
    FREQ_HIST_SUFFIX, INTERSECT_HIST_SUFFIX, MASK_HIST_SUFFIX, SCORE_HIST_SUFFIX, UNIT_NAME,
};
use crate::histogram::{
    frequency_histogram, intersection_histogram, mask_histogram, max_frequency_rate,
    score_histogram,
};
use crate::output::{
    create_output, ensure_dir, read_term_table_file, stem_path, term_table_path,
    write_frequency_histogram, write_intersection_histogram, write_mask_histogram,
    write_score_histogram, write_term_table_file,
};
use crate::results::{
    AggregationReport, ExtractionStats, FilterReport, IntersectionSummary, percent,
};
use crate::sequence::{FastaSource, FastaWriter, NamedSequence, num_masked, percent_masked};
use crate::simplicity::oracle_from_label;
use crate::terms::{
    SetIntersector, TermExtractor, aggregate_terms, filter_terms, sort_for_output,
};
use crate::types::{TermTable, TermsiftError};

/// Outcome of building one set's term table.
#[derive(Debug, Clone, PartialEq)]
pub struct SetTermsSummary {
    pub set_name: String,
    pub extraction: ExtractionStats,
    pub aggregation: AggregationReport,
    pub table_path: PathBuf,
}

/// Outcome of masking one set's sequences.
#[derive(Debug, Clone, PartialEq)]
pub struct MaskSummary {
    pub set_name: String,
    pub records: usize,
    pub residues: usize,
    pub masked_residues: usize,
    pub output_path: PathBuf,
}

impl MaskSummary {
    pub fn percent_masked(&self) -> f64 {
        percent(self.masked_residues as f64, self.residues as f64)
    }
}

/// Builds a per-set term table for each set.
///
/// Reads `<set dir>/<infilename>`, extracts every unambiguous term of length
/// `k`, aggregates them and writes `<set dir>/<outfilestem>_terms.tsv` in
/// ascending count order along with its frequency and score histograms.
///
/// # Errors
///
/// A missing input stops the command at that set; tables already written
/// for earlier sets are kept.
pub fn calculate_peptide_terms(
    config: &TermsiftConfig,
    options: RunOptions,
    k: usize,
    infilename: &str,
    outfilestem: &str,
    sets: &[String],
) -> Result<Vec<SetTermsSummary>, TermsiftError> {
    let mut oracle = oracle_from_label(&config.simplicity)?;
    oracle.set_k(k);
    let extractor = TermExtractor::new(k, oracle.as_ref())?;
    info!(
        "Calculating terms of length {} using {} simplicity ({})",
        k,
        oracle.label(),
        oracle.description()
    );

    let mut summaries = Vec::with_capacity(sets.len());
    for set_name in sets {
        let dir = config.set_dir(set_name)?;
        let source = FastaSource::open(dir.join(infilename), options.first_n)?;
        debug!("Reading sequences from \"{}\"", source.path().display());

        let (occurrences, extraction) = extractor.extract_set(source.records()?)?;
        info!(
            set = %set_name,
            records = extraction.records,
            residues = extraction.residues,
            "{} terms, {} ({:.1}%) skipped as ambiguous",
            extraction.terms,
            extraction.skipped(),
            extraction.skipped_percent()
        );

        let (mut table, aggregation) = aggregate_terms(occurrences, extractor.k());
        info!(
            set = %set_name,
            "{} unique terms ({:.1}% of terms, {:.2e}% of possible terms)",
            aggregation.unique_terms,
            aggregation.percent_of_input(),
            aggregation.percent_of_kmer_space()
        );

        table.sort_by_key(|r| r.count);
        let table = TermTable::PerSet(table);
        write_histograms(dir, outfilestem, &table)?;
        let table_path = term_table_path(dir, outfilestem);
        write_term_table_file(&table_path, &table)?;

        summaries.push(SetTermsSummary {
            set_name: set_name.clone(),
            extraction,
            aggregation,
            table_path,
        });
    }
    Ok(summaries)
}

/// Merges the `<filestem>_terms.tsv` tables of every set into the summary
/// directory, keeping terms found in at least two sets.
pub fn intersect_peptide_terms(
    config: &TermsiftConfig,
    filestem: &str,
    sets: &[String],
) -> Result<IntersectionSummary, TermsiftError> {
    let summary_dir = config.summary_dir()?;
    ensure_dir(summary_dir)?;

    let mut intersector = SetIntersector::new();
    for set_name in sets {
        let path = term_table_path(config.set_dir(set_name)?, filestem);
        let TermTable::PerSet(rows) = read_term_table_file(&path)? else {
            return Err(TermsiftError::InvalidTable(format!(
                "\"{}\" is already a merged table",
                path.display()
            )));
        };
        let report = intersector.add_set(set_name, &rows);
        info!(
            set = %set_name,
            "{} terms ({:.1}% of {} unique, {:.1}% of {} total)",
            report.set_terms,
            report.percent_of_unique(),
            report.unique_terms,
            report.percent_of_total(),
            report.total_terms
        );
    }

    let (merged, summary) = intersector.finish();
    info!(
        sets = summary.sets,
        "{} unique terms ({:.1}% of {} total), {} ({:.1}%) intersect",
        summary.unique_terms,
        summary.unique_percent_of_total(),
        summary.total_terms,
        summary.intersecting_terms,
        summary.intersecting_percent_of_unique()
    );

    let mut table = TermTable::Merged(merged);
    sort_for_output(&mut table);
    write_histograms(summary_dir, filestem, &table)?;
    write_term_table_file(&term_table_path(summary_dir, filestem), &table)?;
    Ok(summary)
}

/// Drops terms scoring above `cutoff` from `<summary>/<infilestem>_terms.tsv`
/// and writes the survivors to `<summary>/<outfilestem>_terms.tsv`.
pub fn filter_peptide_terms(
    config: &TermsiftConfig,
    cutoff: f64,
    infilestem: &str,
    outfilestem: &str,
) -> Result<FilterReport, TermsiftError> {
    let summary_dir = config.summary_dir()?;
    let table = read_term_table_file(&term_table_path(summary_dir, infilestem))?;

    let (kept, report) = filter_terms(table, cutoff);
    match report.percent_of_kmer_space() {
        Some(space) => info!(
            "{} of {} terms ({:.1}%) score at most {}, {:.2e}% of possible terms",
            report.kept_terms,
            report.input_terms,
            report.percent_kept(),
            cutoff,
            space
        ),
        None => info!("No terms in \"{}\"", infilestem),
    }

    ensure_dir(summary_dir)?;
    write_histograms(summary_dir, outfilestem, &kept)?;
    write_term_table_file(&term_table_path(summary_dir, outfilestem), &kept)?;
    Ok(report)
}

/// Lowercases low-complexity regions of each set's sequences.
///
/// Writes `<set dir>/<outfilestem><input extension>` and the per-record
/// masked-fraction histogram `<set dir>/<outfilestem>-hist.tsv`. Records are
/// streamed; an output naming the input replaces it once the set is done.
pub fn peptide_simplicity_mask(
    config: &TermsiftConfig,
    options: RunOptions,
    cutoff: f64,
    infilename: &str,
    outfilestem: &str,
    sets: &[String],
) -> Result<Vec<MaskSummary>, TermsiftError> {
    let mut oracle = oracle_from_label(&config.simplicity)?;
    oracle.set_cutoff(cutoff);
    info!(
        "Masking with {} simplicity at cutoff {}",
        oracle.label(),
        cutoff
    );

    let mut summaries = Vec::with_capacity(sets.len());
    for set_name in sets {
        let dir = config.set_dir(set_name)?;
        let input = dir.join(infilename);
        let source = FastaSource::open(&input, options.first_n)?;
        let output_path = dir.join(masked_file_name(&input, outfilestem));

        // Masking in place goes through a temporary file next to the input
        let in_place = output_path == input;
        let write_path = if in_place {
            let mut name = output_path.clone().into_os_string();
            name.push(".tmp");
            PathBuf::from(name)
        } else {
            output_path.clone()
        };
        debug!("Writing masked sequences to \"{}\"", write_path.display());

        let mut writer = FastaWriter::create(&write_path)?;
        let mut fractions = Vec::new();
        let (mut records, mut residues, mut masked_residues) = (0, 0, 0);
        for record in source.records()? {
            let record = record?;
            let seq = oracle.mask(&record.seq);
            records += 1;
            residues += seq.len();
            masked_residues += num_masked(&seq);
            fractions.push(percent_masked(&seq));
            writer.write_record(&NamedSequence { seq, ..record })?;
        }
        writer.finish()?;
        if in_place {
            fs::rename(&write_path, &output_path).map_err(|source| TermsiftError::OutputPath {
                path: output_path.clone(),
                source,
            })?;
        }

        if fractions.is_empty() {
            info!(set = %set_name, "No sequences to mask");
        } else {
            let hist_path = stem_path(dir, outfilestem, MASK_HIST_SUFFIX);
            write_mask_histogram(create_output(&hist_path)?, &mask_histogram(&fractions))?;
        }

        let summary = MaskSummary {
            set_name: set_name.clone(),
            records,
            residues,
            masked_residues,
            output_path,
        };
        info!(
            set = %set_name,
            records = summary.records,
            "{} of {} residues ({:.1}%) masked",
            summary.masked_residues,
            summary.residues,
            summary.percent_masked()
        );
        summaries.push(summary);
    }
    Ok(summaries)
}

/// `<outfilestem>` plus the extension of `input`, if any.
fn masked_file_name(input: &Path, outfilestem: &str) -> String {
    match input.extension() {
        Some(ext) => format!("{}.{}", outfilestem, ext.to_string_lossy()),
        None => outfilestem.to_string(),
    }
}

/// Frequency and score histograms for any table, plus the intersection
/// histogram for merged tables. Nothing is written for an empty table.
fn write_histograms(dir: &Path, stem: &str, table: &TermTable) -> Result<(), TermsiftError> {
    if table.is_empty() {
        info!("No terms in \"{}\"", stem);
        return Ok(());
    }

    let counts = table.counts();
    let max_count = counts.iter().copied().max().unwrap_or(0);
    info!(
        "Maximum term frequency {} ({:.2e} per unique {})",
        max_count,
        max_frequency_rate(max_count, counts.len()),
        UNIT_NAME
    );
    write_frequency_histogram(
        create_output(&stem_path(dir, stem, FREQ_HIST_SUFFIX))?,
        &frequency_histogram(&counts),
    )?;
    write_score_histogram(
        create_output(&stem_path(dir, stem, SCORE_HIST_SUFFIX))?,
        &score_histogram(&table.scores()),
    )?;

    if let TermTable::Merged(rows) = table {
        write_intersection_histogram(
            create_output(&stem_path(dir, stem, INTERSECT_HIST_SUFFIX))?,
            &intersection_histogram(rows),
        )?;
    }
    Ok(())
}
