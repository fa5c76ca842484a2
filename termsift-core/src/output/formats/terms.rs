use std::io::{Read, Write};

use csv::{ReaderBuilder, StringRecord, WriterBuilder};

use crate::types::{MergedTermRecord, TermRecord, TermTable, TermsiftError};

const PER_SET_COLUMNS: [&str; 3] = ["term", "count", "score"];
const MERGED_COLUMNS: [&str; 5] = ["term", "intersections", "count", "max_count", "score"];

/// Write a term table as tab-separated text, scores to two decimals
pub fn write_term_table<W: Write>(writer: W, table: &TermTable) -> Result<(), TermsiftError> {
    let mut writer = WriterBuilder::new().delimiter(b'\t').from_writer(writer);
    match table {
        TermTable::PerSet(rows) => {
            writer.write_record(PER_SET_COLUMNS)?;
            for row in rows {
                writer.write_record([
                    row.term.clone(),
                    row.count.to_string(),
                    format!("{:.2}", row.score),
                ])?;
            }
        }
        TermTable::Merged(rows) => {
            writer.write_record(MERGED_COLUMNS)?;
            for row in rows {
                writer.write_record([
                    row.term.clone(),
                    row.intersections.to_string(),
                    row.count.to_string(),
                    row.max_count.to_string(),
                    format!("{:.2}", row.score),
                ])?;
            }
        }
    }
    writer.flush()?;
    Ok(())
}

fn has_columns(headers: &StringRecord, columns: &[&str]) -> bool {
    columns.iter().all(|c| headers.iter().any(|h| h == *c))
}

/// Read a term table, deciding its kind from the header
pub fn read_term_table<R: Read>(reader: R) -> Result<TermTable, TermsiftError> {
    let mut reader = ReaderBuilder::new().delimiter(b'\t').from_reader(reader);
    let headers = reader.headers()?.clone();

    if has_columns(&headers, &MERGED_COLUMNS) {
        let rows = reader
            .deserialize::<MergedTermRecord>()
            .collect::<Result<Vec<_>, _>>()?;
        Ok(TermTable::Merged(rows))
    } else if has_columns(&headers, &PER_SET_COLUMNS) {
        let rows = reader
            .deserialize::<TermRecord>()
            .collect::<Result<Vec<_>, _>>()?;
        Ok(TermTable::PerSet(rows))
    } else {
        Err(TermsiftError::InvalidTable(format!(
            "unrecognized columns: {}",
            headers.iter().collect::<Vec<_>>().join(", ")
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_write_per_set_table() {
        let mut buffer = Vec::new();
        let table = TermTable::PerSet(vec![
            TermRecord::new("MKVLAAGIVG", 1, 0.126),
            TermRecord::new("AAAAAAAAAA", 12, 3.0),
        ]);
        write_term_table(&mut buffer, &table).unwrap();

        let output = String::from_utf8(buffer).unwrap();
        assert_eq!(
            output,
            "term\tcount\tscore\nMKVLAAGIVG\t1\t0.13\nAAAAAAAAAA\t12\t3.00\n"
        );
    }

    #[test]
    fn test_write_merged_table() {
        let mut buffer = Vec::new();
        let table = TermTable::Merged(vec![MergedTermRecord {
            term: "AAAAAAAAAA".to_string(),
            intersections: 2,
            count: 8,
            max_count: 5,
            score: 0.25,
        }]);
        write_term_table(&mut buffer, &table).unwrap();

        let output = String::from_utf8(buffer).unwrap();
        assert_eq!(
            output,
            "term\tintersections\tcount\tmax_count\tscore\nAAAAAAAAAA\t2\t8\t5\t0.25\n"
        );
    }

    #[test]
    fn test_read_detects_per_set_table() {
        let input = "term\tcount\tscore\nMKV\t2\t0.50\nAAA\t7\t3.00\n";
        let table = read_term_table(Cursor::new(input)).unwrap();
        assert_eq!(
            table,
            TermTable::PerSet(vec![
                TermRecord::new("MKV", 2, 0.5),
                TermRecord::new("AAA", 7, 3.0),
            ])
        );
    }

    #[test]
    fn test_read_detects_merged_table_in_any_column_order() {
        let input = "term\tcount\tmax_count\tscore\tintersections\nMKV\t9\t5\t0.10\t3\n";
        let table = read_term_table(Cursor::new(input)).unwrap();
        let TermTable::Merged(rows) = table else {
            panic!("Expected a merged table");
        };
        assert_eq!(rows[0].intersections, 3);
        assert_eq!(rows[0].count, 9);
        assert_eq!(rows[0].max_count, 5);
    }

    #[test]
    fn test_read_header_only_table_is_empty() {
        let table = read_term_table(Cursor::new("term\tcount\tscore\n")).unwrap();
        assert!(table.is_empty());
        assert!(!table.is_merged());
    }

    #[test]
    fn test_read_unknown_columns() {
        let result = read_term_table(Cursor::new("kmer\tfreq\nMKV\t2\n"));
        match result {
            Err(TermsiftError::InvalidTable(message)) => assert!(message.contains("kmer")),
            other => panic!("Expected InvalidTable, got {:?}", other),
        }
    }

    #[test]
    fn test_read_bad_number() {
        let result = read_term_table(Cursor::new("term\tcount\tscore\nMKV\tmany\t0.1\n"));
        assert!(matches!(result, Err(TermsiftError::CsvError(_))));
    }
}
