use std::fs;
use std::io;
use std::path::Path;

use bio::io::fasta;
use tracing::debug;

use crate::error::{Error, Result};

/// A FASTA reader yielding sequences as text.
pub struct Reader<R: io::Read> {
    inner: fasta::Reader<io::BufReader<R>>,
}

impl Reader<fs::File> {
    /// Read from a given file path.
    pub fn from_file<P: AsRef<Path>>(path: P) -> io::Result<Self> {
        fs::File::open(path).map(Reader::new)
    }
}

impl<R: io::Read> Reader<R> {
    /// Read from a given reader.
    pub fn new(reader: R) -> Self {
        Reader { inner: fasta::Reader::new(reader) }
    }

    /// Read all records.
    /// Stop reading as soon as a problematic record is encountered.
    pub fn records(self) -> Result<Vec<Record>> {
        let mut records = Vec::new();
        for r in self.inner.records() {
            let record = r.map_err(|err| Error::Fasta(err.to_string()))?;
            records.push(Record {
                id: record.id().to_owned(),
                seq: String::from_utf8(record.seq().to_vec())
                    .map_err(|_| Error::Fasta(format!("record '{}' is not valid UTF-8", record.id())))?,
            });
        }
        debug!(n_records = records.len(), "read FASTA records");
        Ok(records)
    }

    /// Read the record with a given id, or the first record if no id is given.
    pub fn read_sequence(self, id: Option<&str>) -> Result<Record> {
        let records = self.records()?;
        match id {
            Some(id) => records.into_iter()
                .find(|r| r.id == id)
                .ok_or_else(|| Error::MissingRecord(id.to_owned())),
            None => records.into_iter()
                .next()
                .ok_or_else(|| Error::Fasta("no records found".to_owned())),
        }
    }
}

/// A FASTA record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub id: String,
    pub seq: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const FASTA_FILE: &'static [u8] = b">ref reference allele
ACGTACGT
ACGT
>alt
ACCTACGT
";

    #[test]
    fn test_records() {
        let records = Reader::new(FASTA_FILE).records().unwrap();
        assert_eq!(records, vec![
            Record { id: "ref".to_owned(), seq: "ACGTACGTACGT".to_owned() },
            Record { id: "alt".to_owned(), seq: "ACCTACGT".to_owned() },
        ]);
    }

    #[test]
    fn test_read_sequence() {
        assert_eq!(Reader::new(FASTA_FILE).read_sequence(None).unwrap().id, "ref");
        assert_eq!(Reader::new(FASTA_FILE).read_sequence(Some("alt")).unwrap().seq, "ACCTACGT");
        match Reader::new(FASTA_FILE).read_sequence(Some("chr1")) {
            Err(Error::MissingRecord(id)) => assert_eq!(id, "chr1"),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_read_sequence_empty() {
        assert!(Reader::new(&b""[..]).read_sequence(None).is_err());
    }

    #[test]
    fn test_from_file() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        f.write_all(FASTA_FILE).unwrap();
        let record = Reader::from_file(f.path()).unwrap().read_sequence(Some("alt")).unwrap();
        assert_eq!(record.seq, "ACCTACGT");
    }
}
