use std::io::Write;

use csv::WriterBuilder;

use crate::histogram::{FrequencyBin, IntersectionHistogram, PercentBin};
use crate::types::TermsiftError;

/// Write the frequency histogram as comma-separated text
pub fn write_frequency_histogram<W: Write>(
    writer: W,
    bins: &[FrequencyBin],
) -> Result<(), TermsiftError> {
    let mut writer = WriterBuilder::new().from_writer(writer);
    writer.write_record(["abundance", "count", "cumulative", "cumulative_fraction"])?;
    for bin in bins {
        writer.write_record([
            bin.abundance.to_string(),
            bin.count.to_string(),
            bin.cumulative.to_string(),
            format!("{:.3}", bin.cumulative_fraction),
        ])?;
    }
    writer.flush()?;
    Ok(())
}

/// Write the score histogram, one row per lower bin edge
pub fn write_score_histogram<W: Write>(
    writer: W,
    bins: &[PercentBin],
) -> Result<(), TermsiftError> {
    write_percent_bins(writer, bins, "score", 2)
}

/// Write the masked-fraction histogram, one row per bin center
pub fn write_mask_histogram<W: Write>(
    writer: W,
    bins: &[PercentBin],
) -> Result<(), TermsiftError> {
    write_percent_bins(writer, bins, "percent_masked", 3)
}

fn write_percent_bins<W: Write>(
    writer: W,
    bins: &[PercentBin],
    position_name: &str,
    precision: usize,
) -> Result<(), TermsiftError> {
    let mut writer = WriterBuilder::new().delimiter(b'\t').from_writer(writer);
    writer.write_record([position_name, "percent"])?;
    for bin in bins {
        writer.write_record([
            bin.position.to_string(),
            format!("{:.*}", precision, bin.percent),
        ])?;
    }
    writer.flush()?;
    Ok(())
}

/// Write the intersection histogram: one row per abundance bin, one column
/// per observed intersection count holding the bin's percentage
pub fn write_intersection_histogram<W: Write>(
    writer: W,
    histogram: &IntersectionHistogram,
) -> Result<(), TermsiftError> {
    let mut writer = WriterBuilder::new().delimiter(b'\t').from_writer(writer);

    let mut header = vec!["max_count".to_string(), "total".to_string()];
    header.extend(histogram.intersections.iter().map(|i| i.to_string()));
    writer.write_record(&header)?;

    for bin in &histogram.bins {
        let mut row = vec![bin.start.to_string(), bin.total.to_string()];
        row.extend(
            histogram
                .intersections
                .iter()
                .map(|&i| format!("{:.2}", bin.percent(i))),
        );
        writer.write_record(&row)?;
    }
    writer.flush()?;
    Ok(())
}
