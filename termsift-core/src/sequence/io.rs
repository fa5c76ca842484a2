use std::fs::File;
use std::io::{BufReader, Write};
use std::iter::Take;
use std::path::{Path, PathBuf};

use bio::io::fasta;

use crate::types::TermsiftError;

/// One FASTA record.
#[derive(Debug, Clone, PartialEq)]
pub struct NamedSequence {
    /// First word of the header line
    pub id: String,
    /// Rest of the header line
    pub description: Option<String>,
    pub seq: Vec<u8>,
}

/// An ordered collection of named sequences in a FASTA file.
///
/// Records are parsed lazily as the iterator advances, so only one record is
/// resident at a time. `first_n` truncates the collection for debugging runs.
///
/// # Examples
///
/// ```rust,no_run
/// use termsift_core::sequence::FastaSource;
///
/// let source = FastaSource::open("glyma/proteins.faa", 100)?;
/// for record in source.records()? {
///     let record = record?;
///     println!("{}: {} residues", record.id, record.seq.len());
/// }
/// # Ok::<(), termsift_core::types::TermsiftError>(())
/// ```
#[derive(Debug, Clone)]
pub struct FastaSource {
    path: PathBuf,
    first_n: usize,
}

/// Lazy iterator over the records of a [`FastaSource`].
pub struct FastaRecords {
    inner: Take<fasta::Records<BufReader<File>>>,
}

impl Iterator for FastaRecords {
    type Item = Result<NamedSequence, TermsiftError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|result| {
            let record = result.map_err(|e| TermsiftError::ParseError(e.to_string()))?;
            Ok(NamedSequence {
                id: record.id().to_string(),
                description: record.desc().map(String::from),
                seq: record.seq().to_vec(),
            })
        })
    }
}

impl FastaSource {
    /// Opens a FASTA file; `first_n == 0` means every record is used.
    ///
    /// # Errors
    ///
    /// Returns [`TermsiftError::MissingInput`] if the file does not exist.
    pub fn open<P: AsRef<Path>>(path: P, first_n: usize) -> Result<Self, TermsiftError> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(TermsiftError::MissingInput(path.to_path_buf()));
        }
        Ok(Self {
            path: path.to_path_buf(),
            first_n,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn records(&self) -> Result<FastaRecords, TermsiftError> {
        let file = File::open(&self.path)?;
        let limit = if self.first_n == 0 {
            usize::MAX
        } else {
            self.first_n
        };
        Ok(FastaRecords {
            inner: fasta::Reader::new(file).records().take(limit),
        })
    }

    /// Record identifiers in file order, honoring `first_n`.
    pub fn ids(&self) -> Result<Vec<String>, TermsiftError> {
        self.records()?
            .map(|record| record.map(|r| r.id))
            .collect()
    }
}

/// Streams records to a FASTA writer, one record at a time.
///
/// # Examples
///
/// ```rust
/// use termsift_core::sequence::{FastaWriter, NamedSequence};
///
/// let mut buffer = Vec::new();
/// let mut writer = FastaWriter::new(&mut buffer);
/// writer.write_record(&NamedSequence {
///     id: "p1".to_string(),
///     description: None,
///     seq: b"MKvl".to_vec(),
/// })?;
/// writer.finish()?;
/// assert_eq!(buffer, b">p1\nMKvl\n");
/// # Ok::<(), termsift_core::types::TermsiftError>(())
/// ```
pub struct FastaWriter<W: Write> {
    inner: fasta::Writer<W>,
}

impl FastaWriter<File> {
    /// Creates (or truncates) a FASTA file, naming the path on failure.
    pub fn create(path: &Path) -> Result<Self, TermsiftError> {
        let file = File::create(path).map_err(|source| TermsiftError::OutputPath {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::new(file))
    }
}

impl<W: Write> FastaWriter<W> {
    pub fn new(writer: W) -> Self {
        Self {
            inner: fasta::Writer::new(writer),
        }
    }

    pub fn write_record(&mut self, record: &NamedSequence) -> Result<(), TermsiftError> {
        self.inner
            .write(&record.id, record.description.as_deref(), &record.seq)?;
        Ok(())
    }

    /// Flushes buffered records; dropping the writer without this loses
    /// write errors.
    pub fn finish(mut self) -> Result<(), TermsiftError> {
        self.inner.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write_temp_fasta(content: &str) -> (TempDir, PathBuf) {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("proteins.faa");
        fs::write(&path, content).unwrap();
        (dir, path)
    }

    #[test]
    fn test_read_fasta_basic() {
        let (_dir, path) = write_temp_fasta(">test_protein\nMKVL\nAAGI\n");
        let source = FastaSource::open(&path, 0).unwrap();
        let records: Vec<_> = source.records().unwrap().collect::<Result<_, _>>().unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].id, "test_protein");
        assert_eq!(records[0].seq, b"MKVLAAGI".to_vec());
    }

    #[test]
    fn test_read_fasta_with_description() {
        let (_dir, path) = write_temp_fasta(">p1 kinase domain\nMKVL\n>p2\nGGSS\n");
        let source = FastaSource::open(&path, 0).unwrap();
        let records: Vec<_> = source.records().unwrap().collect::<Result<_, _>>().unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].description, Some("kinase domain".to_string()));
        assert_eq!(records[1].description, None);
    }

    #[test]
    fn test_first_n_truncates() {
        let (_dir, path) = write_temp_fasta(">p1\nMK\n>p2\nVL\n>p3\nAA\n");
        let source = FastaSource::open(&path, 2).unwrap();
        assert_eq!(source.ids().unwrap(), vec!["p1", "p2"]);

        let all = FastaSource::open(&path, 0).unwrap();
        assert_eq!(all.ids().unwrap(), vec!["p1", "p2", "p3"]);
    }

    #[test]
    fn test_empty_file_has_no_records() {
        let (_dir, path) = write_temp_fasta("");
        let source = FastaSource::open(&path, 0).unwrap();
        assert!(source.ids().unwrap().is_empty());
    }

    #[test]
    fn test_missing_file() {
        let result = FastaSource::open("nonexistent_file.faa", 0);
        match result {
            Err(TermsiftError::MissingInput(path)) => {
                assert_eq!(path, PathBuf::from("nonexistent_file.faa"))
            }
            _ => panic!("Expected MissingInput for missing file"),
        }
    }

    #[test]
    fn test_fasta_writer_round_trip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("masked.faa");
        let records = vec![
            NamedSequence {
                id: "p1".to_string(),
                description: Some("first".to_string()),
                seq: b"MKvlAA".to_vec(),
            },
            NamedSequence {
                id: "p2".to_string(),
                description: None,
                seq: b"GGSS".to_vec(),
            },
        ];
        let mut writer = FastaWriter::create(&path).unwrap();
        for record in &records {
            writer.write_record(record).unwrap();
        }
        writer.finish().unwrap();

        let read: Vec<_> = FastaSource::open(&path, 0)
            .unwrap()
            .records()
            .unwrap()
            .collect::<Result<_, _>>()
            .unwrap();
        assert_eq!(read, records);
    }

    #[test]
    fn test_fasta_writer_to_buffer() {
        let record = NamedSequence {
            id: "p1".to_string(),
            description: Some("kinase".to_string()),
            seq: b"MKVL".to_vec(),
        };
        let mut buffer = Vec::new();
        let mut writer = FastaWriter::new(&mut buffer);
        writer.write_record(&record).unwrap();
        writer.finish().unwrap();
        assert_eq!(String::from_utf8(buffer).unwrap(), ">p1 kinase\nMKVL\n");
    }

    #[test]
    fn test_fasta_writer_unwritable_path() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing").join("out.faa");
        assert!(matches!(
            FastaWriter::create(&path),
            Err(TermsiftError::OutputPath { path: p, .. }) if p == path
        ));
    }
}
